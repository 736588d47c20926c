use frame_host::{errlist::error_message, Error as FrameHostError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Failed to initialize enclave: {0}")]
    InitEnclave(FrameHostError),
    #[error("Failed to get the public key: {0}")]
    PublicKey(FrameHostError),
    #[error("Failed to sign: {0}")]
    Signature(FrameHostError),
    #[error("No data to sign")]
    NoDataToSign,
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl SessionError {
    pub fn exit_code(&self) -> i32 {
        -1
    }

    /// What the console shows when the session aborts with this error.
    pub fn console_message(&self) -> String {
        match self {
            SessionError::InitEnclave(err) => {
                let mut msg = err.sgx_status().map(error_message).unwrap_or_default();
                msg.push_str("Failed to initialize enclave!\n");
                msg
            }
            SessionError::PublicKey(err) => call_failure("App Error", err),
            SessionError::Signature(err) => call_failure("Signature Error", err),
            SessionError::NoDataToSign => "Error receiving data to sign!\n".to_string(),
            SessionError::IoError(err) => format!("IO error: {}\n", err),
        }
    }
}

fn call_failure(prefix: &str, err: &FrameHostError) -> String {
    match err {
        FrameHostError::EnclaveError { status, .. } => format!("{}: {}!\n", prefix, status.code()),
        FrameHostError::SgxStatus { status, .. } => {
            format!("{}{}: {}!\n", error_message(*status), prefix, status.code())
        }
        other => format!("{}: {}!\n", prefix, other),
    }
}
