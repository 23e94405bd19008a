//! HTTP utilities module
//!
//! MIME detection, cache validation, and response builders shared by
//! the request handlers.

pub mod cache;
pub mod mime;
pub mod response;

pub use response::{
    build_304_response, build_404_response, build_405_response, build_413_response,
    build_error_response, build_json_response, build_options_response,
};
