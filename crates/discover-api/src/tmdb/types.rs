//! TMDB API response types and media type selector.

use std::fmt;
use std::str::FromStr;

use anyhow::bail;
use serde::{Deserialize, Serialize};

// --- Media Type ---

/// Media type accepted by the TMDB genre endpoints.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    /// Feature films (`movie`).
    #[default]
    Movie,
    /// Television series (`tv`).
    Tv,
}

impl MediaType {
    /// All media types in display order.
    pub const ALL: [Self; 2] = [Self::Movie, Self::Tv];

    /// Returns the path segment used by the API (`movie` / `tv`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Movie => "movie",
            Self::Tv => "tv",
        }
    }

    /// Returns the human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Movie => "Movie",
            Self::Tv => "TV",
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MediaType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "movie" => Ok(Self::Movie),
            "tv" => Ok(Self::Tv),
            other => bail!("unknown media type: {other} (expected \"movie\" or \"tv\")"),
        }
    }
}

// --- Genre List ---

/// Response from `genre/{media_type}/list` endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbGenreList {
    /// Official genres for the requested media type.
    pub genres: Vec<TmdbGenre>,
}

/// A single TMDB genre.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TmdbGenre {
    /// TMDB genre ID.
    pub id: u32,
    /// Localized genre name.
    pub name: String,
}

// --- Error ---

/// Error body returned by TMDB on non-2xx responses.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbErrorResponse {
    /// TMDB error code.
    pub status_code: u32,
    /// Error message.
    pub status_message: String,
    /// Success flag (always false for errors).
    #[allow(dead_code)]
    pub success: bool,
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::indexing_slicing)]

    use super::*;

    #[test]
    fn test_media_type_from_str() {
        // Arrange & Act & Assert
        assert_eq!("movie".parse::<MediaType>().unwrap(), MediaType::Movie);
        assert_eq!("TV".parse::<MediaType>().unwrap(), MediaType::Tv);
        assert!("anime".parse::<MediaType>().is_err());
    }

    #[test]
    fn test_media_type_serde_lowercase() {
        // Arrange & Act
        let json = serde_json::to_string(&MediaType::Tv).unwrap();
        let parsed: MediaType = serde_json::from_str("\"movie\"").unwrap();

        // Assert
        assert_eq!(json, "\"tv\"");
        assert_eq!(parsed, MediaType::Movie);
    }

    #[test]
    fn test_media_type_labels() {
        // Arrange & Act
        let labels: Vec<&str> = MediaType::ALL.iter().map(|m| m.label()).collect();

        // Assert
        assert_eq!(labels, vec!["Movie", "TV"]);
    }

    #[test]
    fn test_parse_genre_list_fixture() {
        // Arrange
        let json = include_str!("../../../../fixtures/tmdb/genre_movie_list.json");

        // Act
        let list: TmdbGenreList = serde_json::from_str(json).unwrap();

        // Assert
        assert_eq!(list.genres.len(), 19);
        assert_eq!(
            list.genres[0],
            TmdbGenre {
                id: 28,
                name: String::from("Action"),
            }
        );
    }
}
