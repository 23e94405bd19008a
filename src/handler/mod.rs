//! Request handling module
//!
//! Routing, static file serving, and the JSON save handler.

mod router;
mod save;
mod static_files;

pub use router::handle_request;
