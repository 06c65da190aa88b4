//! Error kinds produced while handling item requests

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};
use std::fmt;

use crate::http;

/// Why a submitted item was rejected
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Body is not parseable JSON
    InvalidJson(String),
    /// `name` missing, not a string, or blank
    InvalidName,
    /// `quantity` missing, not a number, or not strictly positive
    InvalidQuantity,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidJson(detail) => write!(f, "Invalid JSON body: {detail}"),
            Self::InvalidName => f.write_str("Invalid name field"),
            Self::InvalidQuantity => f.write_str("Invalid quantity field"),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Every non-success outcome of the item API
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    Validation(ValidationError),
    ItemNotFound,
    RouteNotFound,
    PayloadTooLarge,
    BodyRead(String),
}

impl ApiError {
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::BodyRead(_) => StatusCode::BAD_REQUEST,
            Self::ItemNotFound | Self::RouteNotFound => StatusCode::NOT_FOUND,
            Self::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
        }
    }

    pub fn into_response(self) -> Response<Full<Bytes>> {
        http::build_message_response(self.status(), &self.to_string())
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation(e) => write!(f, "{e}"),
            Self::ItemNotFound => f.write_str("Item not found"),
            Self::RouteNotFound => f.write_str("Route not found"),
            Self::PayloadTooLarge => f.write_str("Payload too large"),
            Self::BodyRead(_) => f.write_str("Failed to read request body"),
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Validation(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self::Validation(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ApiError::from(ValidationError::InvalidName).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::ItemNotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::RouteNotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::PayloadTooLarge.status(),
            StatusCode::PAYLOAD_TOO_LARGE
        );
        assert_eq!(
            ApiError::BodyRead("reset".to_string()).status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            ApiError::from(ValidationError::InvalidQuantity).to_string(),
            "Invalid quantity field"
        );
        assert_eq!(ApiError::ItemNotFound.to_string(), "Item not found");
        assert_eq!(ApiError::RouteNotFound.to_string(), "Route not found");
        assert!(ValidationError::InvalidJson("EOF".to_string())
            .to_string()
            .starts_with("Invalid JSON body"));
    }
}
