//! Infinibrowser HTTP client, request helpers, result type and models

pub mod client;
pub mod models;
pub mod request;
pub mod response;
