//! Application configuration module.
//!
//! Manages the TOML config file holding TMDB settings and the last
//! applied filter.

#[allow(clippy::module_inception)]
mod config;
mod paths;

#[allow(clippy::module_name_repetitions)]
pub use config::{AppConfig, SavedFilter};
pub use paths::resolve_config_path;
