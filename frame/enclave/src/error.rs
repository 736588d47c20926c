use frame_types::{SgxStatus, UntrustedStatus};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, FrameEnclaveError>;

#[derive(Error, Debug)]
pub enum FrameEnclaveError {
    #[error("Sgx Error: {err}")]
    SgxError { err: SgxStatus },

    #[error("Enclave ocall failed function: {function:?}, status: {status:?}")]
    UntrustedError {
        status: UntrustedStatus,
        function: &'static str,
    },
}

impl FrameEnclaveError {
    /// Status reported to the host when this error ends an ecall.
    pub fn as_status(&self) -> SgxStatus {
        match self {
            FrameEnclaveError::SgxError { err } => *err,
            FrameEnclaveError::UntrustedError { .. } => SgxStatus::Unexpected,
        }
    }
}

impl From<SgxStatus> for FrameEnclaveError {
    fn from(err: SgxStatus) -> Self {
        FrameEnclaveError::SgxError { err }
    }
}
