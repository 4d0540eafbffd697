//! Spotify integration (primary provider)
//!
//! Track search by genre tag. Requires a bearer token, obtained once at
//! startup through [`SpotifySession`].
//!
//! API docs: https://developer.spotify.com/documentation/web-api

pub mod dto;
mod adapter;
mod client;
mod session;

pub use client::SpotifyProvider;
pub use session::{SpotifySession, TOKEN_URL};
