//! `AppConfig` struct and TOML read/write.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::store::{FilterState, MediaCategory, MediaStore};

/// Default TMDB response language.
const DEFAULT_LANGUAGE: &str = "en-US";

/// Top-level application configuration.
#[derive(Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// TMDB settings.
    #[serde(default)]
    pub tmdb: TmdbConfig,
    /// Last applied filter.
    #[serde(default)]
    pub filter: SavedFilter,
}

/// TMDB client configuration.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TmdbConfig {
    /// Response language for genre names.
    #[serde(default = "default_language")]
    pub language: String,
    /// Overrides the API base URL (e.g. a local mock server).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

fn default_language() -> String {
    String::from(DEFAULT_LANGUAGE)
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self {
            language: default_language(),
            base_url: None,
        }
    }
}

/// Filter and category persisted between sessions.
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct SavedFilter {
    /// Category the filter was applied under.
    #[serde(default)]
    pub category: MediaCategory,
    /// Filter fields.
    #[serde(flatten)]
    pub state: FilterState,
}

impl SavedFilter {
    /// Builds a store seeded with the saved category and filter.
    #[must_use]
    pub fn to_store(&self) -> MediaStore {
        MediaStore::new(self.category, self.state.clone())
    }

    /// Captures the category and filter of a store.
    #[must_use]
    pub fn from_store(store: MediaStore) -> Self {
        let (category, state) = store.into_parts();
        Self { category, state }
    }
}

impl AppConfig {
    /// Loads config from a TOML file. Returns default if file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
    }

    /// Saves config to a TOML file, creating parent directories if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation or file write fails.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }
        let content = toml::to_string_pretty(self).context("failed to serialize config to TOML")?;
        std::fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use discover_api::tmdb::MediaType;

    use super::*;
    use crate::store::{FilterStore, GenreOption, GenreValue};

    fn sample_filter() -> SavedFilter {
        SavedFilter {
            category: MediaCategory::TopRated,
            state: FilterState {
                media_type: MediaType::Tv,
                genre: GenreOption {
                    label: String::from("Kids"),
                    value: GenreValue::Id(10_762),
                },
                from_year: String::from("1990"),
                to_year: String::from("1999"),
                rating: Some(6),
            },
        }
    }

    #[test]
    fn test_default_config() {
        // Arrange & Act
        let config = AppConfig::default();

        // Assert
        assert_eq!(config.tmdb.language, "en-US");
        assert!(config.tmdb.base_url.is_none());
        assert_eq!(config.filter.category, MediaCategory::Discover);
        assert!(config.filter.state.genre.is_all());
    }

    #[test]
    fn test_serialize_deserialize_roundtrip() {
        // Arrange
        let config = AppConfig {
            tmdb: TmdbConfig {
                language: String::from("ja-JP"),
                base_url: Some(String::from("http://127.0.0.1:8080/3/")),
            },
            filter: sample_filter(),
        };

        // Act
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();

        // Assert
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_load_nonexistent_returns_default() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");

        // Act
        let config = AppConfig::load(&path).unwrap();

        // Assert
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let config = AppConfig {
            filter: sample_filter(),
            ..AppConfig::default()
        };

        // Act
        config.save(&path).unwrap();
        let loaded = AppConfig::load(&path).unwrap();

        // Assert
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_partial_config() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[filter]\ncategory = \"trending\"\nmedia_type = \"tv\"\nrating = 4\n",
        )
        .unwrap();

        // Act
        let config = AppConfig::load(&path).unwrap();

        // Assert
        assert_eq!(config.tmdb, TmdbConfig::default());
        assert_eq!(config.filter.category, MediaCategory::Trending);
        assert_eq!(config.filter.state.media_type, MediaType::Tv);
        assert_eq!(config.filter.state.rating, Some(4));
        assert!(config.filter.state.genre.is_all());
        assert_eq!(config.filter.state.from_year, "1900");
    }

    #[test]
    fn test_load_invalid_media_type_fails() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[filter]\nmedia_type = \"anime\"\n").unwrap();

        // Act
        let result = AppConfig::load(&path);

        // Assert
        assert!(result.unwrap_err().to_string().contains("failed to parse"));
    }

    #[test]
    fn test_store_roundtrip() {
        // Arrange
        let saved = sample_filter();

        // Act
        let store = saved.to_store();
        let category = store.category();
        let restored = SavedFilter::from_store(store);

        // Assert
        assert_eq!(category, MediaCategory::TopRated);
        assert_eq!(restored, saved);
    }
}
