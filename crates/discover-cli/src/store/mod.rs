//! Shared filter store.
//!
//! Owns the discovery filter and the active media category. The filter
//! menu receives the store as an explicit dependency and only mutates it
//! through dispatched [`FilterUpdate`]s.

mod filter;
mod media_store;

#[cfg(test)]
pub use filter::GenreValue;
pub use filter::{
    FIRST_YEAR, FilterState, FilterUpdate, GenreOption, MediaCategory, current_year,
};
pub use media_store::{FilterStore, MediaStore};
