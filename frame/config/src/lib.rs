pub mod constants;
pub mod envs;

pub use crate::constants::*;
pub use crate::envs::*;
