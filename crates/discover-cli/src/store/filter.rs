//! Filter state, partial updates, and media categories.

use std::fmt;

use chrono::Datelike;
use clap::ValueEnum;
use discover_api::tmdb::{MediaType, TmdbGenre};
use serde::{Deserialize, Serialize};

/// Label and value of the synthetic "match every genre" option.
pub const ALL_GENRE_LABEL: &str = "All";

/// First year offered by the year selectors.
pub const FIRST_YEAR: i32 = 1900;

/// Returns the current local calendar year.
#[must_use]
pub fn current_year() -> i32 {
    chrono::Local::now().year()
}

// --- Category ---

/// Media category chosen elsewhere in the application.
///
/// The category decides which filter controls are usable.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum MediaCategory {
    /// Trending this week; only the media type can be changed.
    Trending,
    /// Most popular titles.
    Popular,
    /// Highest rated titles.
    TopRated,
    /// Upcoming releases.
    Upcoming,
    /// Free-form discovery using every filter.
    #[default]
    Discover,
    /// Keyword search results.
    Search,
    /// Non-searchable views (favourites, details, ...); nothing can be changed.
    Other,
}

impl MediaCategory {
    /// All categories in cycling order.
    pub const ALL: [Self; 7] = [
        Self::Trending,
        Self::Popular,
        Self::TopRated,
        Self::Upcoming,
        Self::Discover,
        Self::Search,
        Self::Other,
    ];

    /// Returns the display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Trending => "Trending",
            Self::Popular => "Popular",
            Self::TopRated => "Top Rated",
            Self::Upcoming => "Upcoming",
            Self::Discover => "Discover",
            Self::Search => "Search",
            Self::Other => "Other",
        }
    }

    /// Returns the category after `self`, wrapping around.
    #[must_use]
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|c| *c == self).unwrap_or(0);
        Self::ALL
            .get(idx.saturating_add(1))
            .copied()
            .unwrap_or(Self::Trending)
    }
}

// --- Genre ---

/// Value carried by a genre option: a TMDB genre id or a named sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GenreValue {
    /// TMDB genre id.
    Id(u32),
    /// Named value such as the synthetic `"All"`.
    Named(String),
}

impl fmt::Display for GenreValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "{id}"),
            Self::Named(name) => f.write_str(name),
        }
    }
}

/// A selectable genre.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GenreOption {
    /// Display label.
    pub label: String,
    /// Value stored in the filter.
    pub value: GenreValue,
}

impl GenreOption {
    /// The synthetic option matching every genre (`{label: "All", value: "All"}`).
    #[must_use]
    pub fn all() -> Self {
        Self {
            label: String::from(ALL_GENRE_LABEL),
            value: GenreValue::Named(String::from(ALL_GENRE_LABEL)),
        }
    }

    /// Returns `true` for the synthetic "All" option.
    #[must_use]
    pub fn is_all(&self) -> bool {
        matches!(&self.value, GenreValue::Named(name) if name == ALL_GENRE_LABEL)
    }
}

impl From<TmdbGenre> for GenreOption {
    fn from(genre: TmdbGenre) -> Self {
        Self {
            label: genre.name,
            value: GenreValue::Id(genre.id),
        }
    }
}

// --- Filter ---

fn default_from_year() -> String {
    FIRST_YEAR.to_string()
}

fn default_to_year() -> String {
    current_year().to_string()
}

/// The discovery filter owned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    /// Movies or TV series.
    #[serde(default)]
    pub media_type: MediaType,
    /// Selected genre (whole option, not just its value).
    #[serde(default = "GenreOption::all")]
    pub genre: GenreOption,
    /// Lower bound of the release year range.
    #[serde(default = "default_from_year")]
    pub from_year: String,
    /// Upper bound of the release year range.
    #[serde(default = "default_to_year")]
    pub to_year: String,
    /// Minimum rating on the 0-10 scale; `None` means "any".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<u8>,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            media_type: MediaType::default(),
            genre: GenreOption::all(),
            from_year: default_from_year(),
            to_year: default_to_year(),
            rating: None,
        }
    }
}

impl FilterState {
    /// Merges every field present in `update` into the filter.
    pub fn apply(&mut self, update: FilterUpdate) {
        if let Some(media_type) = update.media_type {
            self.media_type = media_type;
        }
        if let Some(genre) = update.genre {
            self.genre = genre;
        }
        if let Some(from_year) = update.from_year {
            self.from_year = from_year;
        }
        if let Some(to_year) = update.to_year {
            self.to_year = to_year;
        }
        if let Some(rating) = update.rating {
            self.rating = rating;
        }
    }
}

/// Partial filter update; absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterUpdate {
    /// New media type.
    pub media_type: Option<MediaType>,
    /// New genre.
    pub genre: Option<GenreOption>,
    /// New lower year bound.
    pub from_year: Option<String>,
    /// New upper year bound.
    pub to_year: Option<String>,
    /// New rating; `Some(None)` clears it.
    pub rating: Option<Option<u8>>,
}

impl FilterUpdate {
    /// Changes the media type and resets the genre to "All".
    ///
    /// Genres are media-type specific, so the two always travel together.
    #[must_use]
    pub fn media_type(media_type: MediaType) -> Self {
        Self {
            media_type: Some(media_type),
            genre: Some(GenreOption::all()),
            ..Self::default()
        }
    }

    /// Changes the genre.
    #[must_use]
    pub fn genre(genre: GenreOption) -> Self {
        Self {
            genre: Some(genre),
            ..Self::default()
        }
    }

    /// Changes the lower year bound.
    #[must_use]
    pub fn from_year(year: impl Into<String>) -> Self {
        Self {
            from_year: Some(year.into()),
            ..Self::default()
        }
    }

    /// Changes the upper year bound.
    #[must_use]
    pub fn to_year(year: impl Into<String>) -> Self {
        Self {
            to_year: Some(year.into()),
            ..Self::default()
        }
    }

    /// Changes the rating (`None` clears it).
    #[must_use]
    pub fn rating(rating: Option<u8>) -> Self {
        Self {
            rating: Some(rating),
            ..Self::default()
        }
    }
}
