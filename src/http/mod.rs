//! HTTP protocol layer module
//!
//! Response builders shared by the item handlers, kept apart from business logic.

pub mod response;

pub use response::{
    build_json_response, build_message_response, build_no_content_response, set_server_header,
};
