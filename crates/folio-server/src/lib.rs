//! Preview server for folio blogs.
//!
//! Every request reads and renders posts from disk, so edits show up on the
//! next page load without a rebuild.

pub mod server;

pub use server::{PostServer, ServerConfig, ServerError, LOAD_ERROR_MESSAGE};
