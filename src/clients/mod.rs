//! Typed clients over the resource actors.

#[macro_use]
mod macros;

pub mod catalog_client;
pub mod document_client;

pub use catalog_client::*;
pub use document_client::*;
