pub mod types;
pub use crate::types::*;
