//! `FilterStore` trait and the in-memory `MediaStore`.

use super::filter::{FilterState, FilterUpdate, MediaCategory};

/// Read/write access to the shared filter.
///
/// The filter menu is generic over this trait so it can be driven by a
/// recording store in tests.
pub trait FilterStore {
    /// Returns the active media category.
    fn category(&self) -> MediaCategory;

    /// Returns the current filter.
    fn filter(&self) -> &FilterState;

    /// Applies a partial update to the filter.
    fn dispatch(&mut self, update: FilterUpdate);
}

/// In-memory store holding the category and the filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MediaStore {
    /// Active category.
    category: MediaCategory,
    /// Current filter.
    filter: FilterState,
}

impl MediaStore {
    /// Creates a store with the given category and filter.
    #[must_use]
    pub const fn new(category: MediaCategory, filter: FilterState) -> Self {
        Self { category, filter }
    }

    /// Switches the active category.
    pub fn set_category(&mut self, category: MediaCategory) {
        tracing::debug!(from = ?self.category, to = ?category, "category changed");
        self.category = category;
    }

    /// Consumes the store, returning its category and filter.
    #[must_use]
    pub fn into_parts(self) -> (MediaCategory, FilterState) {
        (self.category, self.filter)
    }
}

impl FilterStore for MediaStore {
    fn category(&self) -> MediaCategory {
        self.category
    }

    fn filter(&self) -> &FilterState {
        &self.filter
    }

    fn dispatch(&mut self, update: FilterUpdate) {
        tracing::debug!(?update, "filter update dispatched");
        self.filter.apply(update);
    }
}
