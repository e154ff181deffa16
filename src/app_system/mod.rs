//! System orchestration, startup, and shutdown logic.

pub mod pricing_system;
pub mod telemetry;
pub mod error;

pub use pricing_system::*;
pub use telemetry::*;
pub use error::*;
