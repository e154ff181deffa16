//! Catalog units (courses and services) and the snapshot action used when pricing.

mod actions;
pub mod dtos;
pub mod entity;
pub mod error;

pub use actions::*;
pub use dtos::*;
pub use error::*;
