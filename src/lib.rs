//! Aircheck - match radio show uploads to broadcast metadata
//!
//! This library sits at the front of a radio automation intake workflow:
//! it parses upload filenames of the form `ShowName_MMDDYY.ext` into a show
//! identity and broadcast date, resolves show aliases against a catalog,
//! and serves parse previews over a small JSON API.

pub mod catalog;
pub mod cli;
pub mod config;
pub mod output;
pub mod pattern;
pub mod server;
pub mod utils;

pub use catalog::{Show, ShowCatalog};
pub use cli::{Cli, Commands, OutputFormat};
pub use config::Config;
pub use pattern::{suggest_filename, validate_pattern, FilenameParser, ParseResult};

/// Result type used throughout the library
pub type Result<T> = anyhow::Result<T>;

/// Error types specific to aircheck
#[derive(thiserror::Error, Debug)]
pub enum AircheckError {
    #[error("A show named \"{0}\" already exists")]
    DuplicateShow(String),

    #[error("Alias already exists: {0}")]
    DuplicateAlias(String),

    #[error("Show not found: {0}")]
    ShowNotFound(String),
}
