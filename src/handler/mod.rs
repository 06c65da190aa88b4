//! Request handler module
//!
//! Routes shopping list requests, validates payloads and drives the store.

pub mod error;
pub mod items;
pub mod router;
pub mod validate;

// Re-export main entry point
pub use router::handle_request;
