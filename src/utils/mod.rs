//! Utils module - Shared helpers for the CLI and storage layers

/// Verbose console output
pub mod logging;

/// Validation of configuration values
pub mod validation;
