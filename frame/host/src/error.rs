use frame_types::{EnclaveStatus, SgxStatus};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, FrameHostError>;

#[derive(Error, Debug)]
pub enum FrameHostError {
    #[error("SGX ecall failed function: {function:?}, status: {status}, command: {cmd:?}")]
    SgxStatus {
        status: SgxStatus,
        function: &'static str,
        cmd: u32,
    },
    #[error("Failed to create enclave, status: {status}")]
    CreateEnclave { status: SgxStatus },
    #[error("Enclave ecall failed function: {function:?}, status: {status:?}, command: {cmd:?}")]
    EnclaveError {
        status: EnclaveStatus,
        function: &'static str,
        cmd: u32,
    },
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl FrameHostError {
    /// The transport status behind this error, if it came from the runtime.
    pub fn sgx_status(&self) -> Option<SgxStatus> {
        match self {
            FrameHostError::SgxStatus { status, .. } => Some(*status),
            FrameHostError::CreateEnclave { status } => Some(*status),
            _ => None,
        }
    }
}
