//! # infinibrowser
//!
//! Typed client for the Infinibrowser API.
//!
//! ```rust,ignore
//! use infinibrowser::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> infinibrowser::Result<()> {
//!     let client = InfinibrowserClient::default_client()?;
//!
//!     match client.get_item("Water").await {
//!         ApiResult::Success { data, .. } => println!("{}", data),
//!         ApiResult::NotOk { data, .. } => eprintln!("{}: {}", data.code, data.message),
//!         ApiResult::Transport(error) => eprintln!("{}: {}", error.code(), error),
//!     }
//!
//!     Ok(())
//! }
//! ```

pub use error::AppError;

/// Commonly used types in one import.
pub mod prelude {
    pub use crate::Result;
    pub use crate::api::client::{ClientConfig, InfinibrowserClient, RefineConfig};
    pub use crate::api::models::{ErrorBody, LineageStep, StepElement};
    pub use crate::api::request::RequestOptions;
    pub use crate::api::response::{ApiResult, ErrorCode, RawResponse};
    pub use crate::error::{ApiError, AppError, TransportError};
}

/// Library layers
pub mod api; // Infinibrowser HTTP client
pub mod storage; // Profile configuration

/// Binary front end and support modules
pub mod cli; // Command-line interface
pub mod error; // Error handling
pub mod utils; // Shared helpers

pub type Result<T> = std::result::Result<T, AppError>;
