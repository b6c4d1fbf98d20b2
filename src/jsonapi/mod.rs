pub mod format;
pub mod types;
pub mod validate;

pub use format::*;
pub use types::*;
pub use validate::*;
