//! API client library for discover.
//!
//! Provides a client for the TMDB genre endpoints used by the filter menu.

/// TMDB API client.
pub mod tmdb;
