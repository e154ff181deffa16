pub mod money;
pub mod catalog;
pub mod policy;
pub mod document;

pub use money::*;
pub use catalog::*;
pub use policy::*;
pub use document::*;
