//! YouTube integration (secondary provider)
//!
//! Video search through the YouTube Data API v3. Requires an API key.

pub mod dto;
mod adapter;
mod client;

pub use client::YouTubeProvider;
