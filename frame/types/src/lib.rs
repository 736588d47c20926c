mod traits;
mod types;

pub use crate::traits::*;
pub use crate::types::*;
