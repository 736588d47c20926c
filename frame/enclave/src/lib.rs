pub mod bridge;
mod error;
pub mod ocalls;
mod register;
pub mod sealing;

pub use crate::error::{FrameEnclaveError as Error, Result};
pub use crate::ocalls::OcallContext;

use frame_types::Measurement;

/// Identity the runtime measures an enclave by. Sealing keys are bound to it.
pub trait EnclaveIdentity {
    fn measurement(&self) -> Measurement;
}
