//! Filter options panel state.
//!
//! Holds everything the panel owns locally (genre list, year list, focus,
//! open dropdown, genre request bookkeeping) and turns user input into
//! [`FilterUpdate`]s dispatched to the injected [`FilterStore`].

use anyhow::Result;
use discover_api::tmdb::{MediaType, TmdbGenreList};

use crate::store::{
    FIRST_YEAR, FilterStore, FilterUpdate, GenreOption, MediaCategory, current_year,
};

/// Highest star count of the rating control.
pub const MAX_STARS: u8 = 5;

/// A focusable control of the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    /// Media type selector.
    MediaType,
    /// Genre selector.
    Genre,
    /// Lower year bound selector.
    FromYear,
    /// Upper year bound selector.
    ToYear,
    /// Star rating.
    Rating,
}

impl Control {
    /// Controls in focus order.
    pub const ALL: [Self; 5] = [
        Self::MediaType,
        Self::Genre,
        Self::FromYear,
        Self::ToYear,
        Self::Rating,
    ];

    /// Accessibility label attached to the control.
    ///
    /// Both year selectors carry `fromYear`.
    #[must_use]
    pub const fn accessibility_label(self) -> &'static str {
        match self {
            Self::MediaType => "mediaTypeDropdown",
            Self::Genre => "genreDropdown",
            Self::FromYear | Self::ToYear => "fromYear",
            Self::Rating => "rating",
        }
    }

    /// Whether the control accepts input under `category`.
    ///
    /// Everything is locked for `Other`; `Trending` only allows the
    /// media type to change.
    #[must_use]
    pub const fn is_enabled(self, category: MediaCategory) -> bool {
        match self {
            Self::MediaType => !matches!(category, MediaCategory::Other),
            Self::Genre | Self::FromYear | Self::ToYear | Self::Rating => {
                !matches!(category, MediaCategory::Trending | MediaCategory::Other)
            }
        }
    }

    /// Whether the control opens a dropdown list.
    #[must_use]
    pub const fn is_dropdown(self) -> bool {
        !matches!(self, Self::Rating)
    }

    fn position(self) -> usize {
        Self::ALL.iter().position(|c| *c == self).unwrap_or(0)
    }

    fn next(self) -> Self {
        Self::ALL
            .get(self.position().saturating_add(1))
            .copied()
            .unwrap_or(Self::MediaType)
    }

    fn prev(self) -> Self {
        self.position()
            .checked_sub(1)
            .and_then(|i| Self::ALL.get(i).copied())
            .unwrap_or(Self::Rating)
    }
}

/// A selectable year.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearOption {
    /// Display label.
    pub label: String,
    /// Stored value (same text as the label).
    pub value: String,
}

/// Builds the inclusive, ascending year list `[from, to]`.
#[must_use]
pub fn year_options(from: i32, to: i32) -> Vec<YearOption> {
    (from..=to)
        .map(|year| {
            let text = year.to_string();
            YearOption {
                label: text.clone(),
                value: text,
            }
        })
        .collect()
}

/// Converts a star count to the stored 0-10 rating.
///
/// Zero stars means "no rating" and yields `None`.
#[must_use]
pub fn stars_to_rating(stars: u8) -> Option<u8> {
    match stars.min(MAX_STARS) {
        0 => None,
        n => Some(n.saturating_mul(2)),
    }
}

/// Converts a stored 0-10 rating to the star count shown.
#[must_use]
pub fn rating_to_stars(rating: Option<u8>) -> u8 {
    rating.map_or(0, |r| (r / 2).min(MAX_STARS))
}

/// A genre request issued by the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenreRequest {
    /// Request generation; only the newest one is applied.
    pub generation: u64,
    /// Media type to fetch genres for.
    pub media_type: MediaType,
}

/// Completed genre request.
#[derive(Debug)]
pub struct GenreResponse {
    /// Generation of the originating request.
    pub generation: u64,
    /// Media type the genres belong to.
    pub media_type: MediaType,
    /// Fetch result.
    pub result: Result<TmdbGenreList>,
}

/// Progress of the genre list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchStatus {
    /// No request issued yet.
    Idle,
    /// Waiting for genres of the given media type.
    Loading(MediaType),
    /// Genres loaded for the given media type.
    Loaded(MediaType),
    /// The last request failed.
    Failed(String),
}

/// An open dropdown list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dropdown {
    /// Control the list belongs to.
    pub control: Control,
    /// Highlighted row.
    pub cursor: usize,
}

/// State of the filter options panel.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct FilterOptions {
    /// Genre options; the synthetic "All" option is always first.
    genre_list: Vec<GenreOption>,
    /// Year options, fixed for the panel's lifetime.
    years: Vec<YearOption>,
    /// Focused control.
    pub focus: Control,
    /// Open dropdown, if any.
    pub dropdown: Option<Dropdown>,
    /// Genre list progress.
    pub status: FetchStatus,
    /// Latest issued request generation.
    generation: u64,
    /// Media type of the latest issued request.
    requested: Option<MediaType>,
    /// Messages of failed genre requests, oldest first.
    fetch_errors: Vec<String>,
}

impl Default for FilterOptions {
    fn default() -> Self {
        Self::new(year_options(FIRST_YEAR, current_year()))
    }
}

impl FilterOptions {
    /// Creates a panel with the given year list and only the "All" genre.
    #[must_use]
    pub fn new(years: Vec<YearOption>) -> Self {
        Self {
            genre_list: vec![GenreOption::all()],
            years,
            focus: Control::MediaType,
            dropdown: None,
            status: FetchStatus::Idle,
            generation: 0,
            requested: None,
            fetch_errors: Vec::new(),
        }
    }

    /// Genre options currently offered.
    #[must_use]
    pub fn genre_list(&self) -> &[GenreOption] {
        &self.genre_list
    }

    /// Year options offered by both year selectors.
    #[must_use]
    pub fn years(&self) -> &[YearOption] {
        &self.years
    }

    /// Messages of failed genre requests.
    #[must_use]
    pub fn fetch_errors(&self) -> &[String] {
        &self.fetch_errors
    }

    // --- Genre fetching ---

    /// Issues a genre request when the store's media type has no request yet.
    ///
    /// Called on mount and after every store change. The genre list drops
    /// back to "All" until the new genres arrive, so a genre of the previous
    /// media type cannot be picked in between.
    pub fn sync<S: FilterStore>(&mut self, store: &S) -> Option<GenreRequest> {
        let media_type = store.filter().media_type;
        if self.requested == Some(media_type) {
            return None;
        }

        self.generation = self.generation.wrapping_add(1);
        self.requested = Some(media_type);
        self.status = FetchStatus::Loading(media_type);
        self.genre_list = vec![GenreOption::all()];
        self.close_dropdown_for(Control::Genre);
        Some(GenreRequest {
            generation: self.generation,
            media_type,
        })
    }

    /// Applies a completed genre request.
    ///
    /// Responses from superseded requests are dropped. A successful response
    /// replaces the list with "All" followed by the fetched genres; it never
    /// appends, since genres of different media types must not mix. A failed
    /// response leaves the list as it was. Returns `true` if the response was
    /// the latest one.
    pub fn apply_genres(&mut self, response: GenreResponse) -> bool {
        if response.generation != self.generation {
            tracing::debug!(
                generation = response.generation,
                latest = self.generation,
                "dropping stale genre response"
            );
            return false;
        }

        match response.result {
            Ok(list) => {
                let mut genre_list = Vec::with_capacity(list.genres.len().saturating_add(1));
                genre_list.push(GenreOption::all());
                genre_list.extend(list.genres.into_iter().map(GenreOption::from));
                self.genre_list = genre_list;
                self.status = FetchStatus::Loaded(response.media_type);
            }
            Err(e) => {
                let message = format!("failed to load {} genres: {e:#}", response.media_type);
                self.status = FetchStatus::Failed(message.clone());
                self.fetch_errors.push(message);
            }
        }
        self.close_dropdown_for(Control::Genre);
        true
    }

    // --- Store updates ---

    /// Selects a media type; the genre resets to "All".
    pub fn select_media_type<S: FilterStore>(&self, store: &mut S, media_type: MediaType) {
        if Control::MediaType.is_enabled(store.category()) {
            store.dispatch(FilterUpdate::media_type(media_type));
        }
    }

    /// Selects a genre.
    pub fn select_genre<S: FilterStore>(&self, store: &mut S, genre: GenreOption) {
        if Control::Genre.is_enabled(store.category()) {
            store.dispatch(FilterUpdate::genre(genre));
        }
    }

    /// Selects the lower year bound.
    pub fn select_from_year<S: FilterStore>(&self, store: &mut S, year: &YearOption) {
        if Control::FromYear.is_enabled(store.category()) {
            store.dispatch(FilterUpdate::from_year(year.value.clone()));
        }
    }

    /// Selects the upper year bound.
    pub fn select_to_year<S: FilterStore>(&self, store: &mut S, year: &YearOption) {
        if Control::ToYear.is_enabled(store.category()) {
            store.dispatch(FilterUpdate::to_year(year.value.clone()));
        }
    }

    /// Sets the rating from a star count; `None` (or zero) clears it.
    pub fn change_rating<S: FilterStore>(&self, store: &mut S, stars: Option<u8>) {
        if Control::Rating.is_enabled(store.category()) {
            store.dispatch(FilterUpdate::rating(stars.and_then(stars_to_rating)));
        }
    }

    /// Picks a star count; picking the current count again clears it.
    pub fn pick_stars<S: FilterStore>(&self, store: &mut S, stars: u8) {
        let current = rating_to_stars(store.filter().rating);
        let picked = if stars == current { None } else { Some(stars) };
        self.change_rating(store, picked);
    }

    /// Moves the rating up or down by one star.
    pub fn step_stars<S: FilterStore>(&self, store: &mut S, up: bool) {
        let current = rating_to_stars(store.filter().rating);
        let stars = if up {
            current.saturating_add(1).min(MAX_STARS)
        } else {
            current.saturating_sub(1)
        };
        self.change_rating(store, Some(stars));
    }

    // --- Focus and dropdowns ---

    /// Moves focus to the next control.
    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    /// Moves focus to the previous control.
    pub fn focus_prev(&mut self) {
        self.focus = self.focus.prev();
    }

    /// Number of options offered by `control`.
    #[must_use]
    pub fn option_count(&self, control: Control) -> usize {
        match control {
            Control::MediaType => MediaType::ALL.len(),
            Control::Genre => self.genre_list.len(),
            Control::FromYear | Control::ToYear => self.years.len(),
            Control::Rating => 0,
        }
    }

    /// Labels of the options offered by `control`.
    #[must_use]
    pub fn option_labels(&self, control: Control) -> Vec<String> {
        match control {
            Control::MediaType => MediaType::ALL
                .iter()
                .map(|m| String::from(m.label()))
                .collect(),
            Control::Genre => self.genre_list.iter().map(|g| g.label.clone()).collect(),
            Control::FromYear | Control::ToYear => {
                self.years.iter().map(|y| y.label.clone()).collect()
            }
            Control::Rating => Vec::new(),
        }
    }

    /// Index of the store's current value among `control`'s options.
    #[must_use]
    pub fn selected_index<S: FilterStore>(&self, control: Control, store: &S) -> Option<usize> {
        let filter = store.filter();
        match control {
            Control::MediaType => MediaType::ALL.iter().position(|m| *m == filter.media_type),
            Control::Genre => self.genre_list.iter().position(|g| *g == filter.genre),
            Control::FromYear => self.years.iter().position(|y| y.value == filter.from_year),
            Control::ToYear => self.years.iter().position(|y| y.value == filter.to_year),
            Control::Rating => None,
        }
    }

    /// Opens the dropdown of the focused control if it is enabled.
    pub fn open_dropdown<S: FilterStore>(&mut self, store: &S) {
        let control = self.focus;
        if !control.is_dropdown() || !control.is_enabled(store.category()) {
            return;
        }
        if self.option_count(control) == 0 {
            return;
        }
        let cursor = self.selected_index(control, store).unwrap_or(0);
        self.dropdown = Some(Dropdown { control, cursor });
    }

    /// Closes the open dropdown without selecting.
    pub const fn close_dropdown(&mut self) {
        self.dropdown = None;
    }

    fn close_dropdown_for(&mut self, control: Control) {
        if self.dropdown.is_some_and(|d| d.control == control) {
            self.dropdown = None;
        }
    }

    /// Moves the dropdown cursor up.
    pub const fn dropdown_up(&mut self) {
        if let Some(dropdown) = self.dropdown.as_mut() {
            dropdown.cursor = dropdown.cursor.saturating_sub(1);
        }
    }

    /// Moves the dropdown cursor down.
    pub fn dropdown_down(&mut self) {
        let Some(control) = self.dropdown.map(|d| d.control) else {
            return;
        };
        let last = self.option_count(control).saturating_sub(1);
        if let Some(dropdown) = self.dropdown.as_mut() {
            dropdown.cursor = dropdown.cursor.saturating_add(1).min(last);
        }
    }

    /// Selects the highlighted option and closes the dropdown.
    pub fn confirm_dropdown<S: FilterStore>(&mut self, store: &mut S) {
        let Some(Dropdown { control, cursor }) = self.dropdown.take() else {
            return;
        };
        match control {
            Control::MediaType => {
                if let Some(media_type) = MediaType::ALL.get(cursor).copied() {
                    self.select_media_type(store, media_type);
                }
            }
            Control::Genre => {
                if let Some(genre) = self.genre_list.get(cursor).cloned() {
                    self.select_genre(store, genre);
                }
            }
            Control::FromYear => {
                if let Some(year) = self.years.get(cursor) {
                    self.select_from_year(store, year);
                }
            }
            Control::ToYear => {
                if let Some(year) = self.years.get(cursor) {
                    self.select_to_year(store, year);
                }
            }
            Control::Rating => {}
        }
    }
}
