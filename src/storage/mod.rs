//! Storage layer
//!
//! Profile configuration persisted as TOML under the user's config directory.

use crate::error::StorageError;

pub mod config;

type Result<T> = std::result::Result<T, StorageError>;
