use crate::error::TransportError;
use reqwest::header::HeaderMap;
use reqwest::{StatusCode, Url};
use std::fmt;

/// Wire names for every failure kind a call can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    NotOk,
    SyntaxError,
    Timeout,
    UnknownError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::NotOk => "NOT_OK",
            ErrorCode::SyntaxError => "SYNTAX_ERROR",
            ErrorCode::Timeout => "TIMEOUT",
            ErrorCode::UnknownError => "UNKNOWN_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Snapshot of the HTTP response taken before the body was decoded.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub url: Url,
    pub body: String,
}

/// Outcome of a single API call.
///
/// `NotOk` is an expected path: the service answered with a non-2xx status and
/// a JSON error body. Everything that prevented a decoded answer lands in
/// `Transport`.
#[derive(Debug)]
pub enum ApiResult<T, E> {
    Success { data: T, raw_response: RawResponse },
    NotOk { data: E, raw_response: RawResponse },
    Transport(TransportError),
}

impl<T, E> ApiResult<T, E> {
    pub fn is_ok(&self) -> bool {
        matches!(self, ApiResult::Success { .. })
    }

    pub fn error_code(&self) -> Option<ErrorCode> {
        match self {
            ApiResult::Success { .. } => None,
            ApiResult::NotOk { .. } => Some(ErrorCode::NotOk),
            ApiResult::Transport(error) => Some(error.code()),
        }
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            ApiResult::Success { data, .. } => Some(data),
            _ => None,
        }
    }

    pub fn error_data(&self) -> Option<&E> {
        match self {
            ApiResult::NotOk { data, .. } => Some(data),
            _ => None,
        }
    }

    pub fn raw_response(&self) -> Option<&RawResponse> {
        match self {
            ApiResult::Success { raw_response, .. } | ApiResult::NotOk { raw_response, .. } => {
                Some(raw_response)
            }
            ApiResult::Transport(_) => None,
        }
    }

    pub fn transport_error(&self) -> Option<&TransportError> {
        match self {
            ApiResult::Transport(error) => Some(error),
            _ => None,
        }
    }

    pub fn map<U, F>(self, f: F) -> ApiResult<U, E>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            ApiResult::Success { data, raw_response } => ApiResult::Success {
                data: f(data),
                raw_response,
            },
            ApiResult::NotOk { data, raw_response } => ApiResult::NotOk { data, raw_response },
            ApiResult::Transport(error) => ApiResult::Transport(error),
        }
    }
}
