//! Pricing documents held in memory while they are edited.

mod actions;
pub mod dtos;
pub mod entity;
pub mod error;

pub use actions::*;
pub use dtos::*;
pub use error::*;
