use frame_types::SgxStatus;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, WebauthnEnclaveError>;

#[derive(Error, Debug)]
pub enum WebauthnEnclaveError {
    #[error("Frame enclave error: {0}")]
    FrameEnclaveError(#[from] frame_enclave::Error),
    #[error("Bincode error: {0}")]
    BincodeError(#[from] bincode::Error),
    #[error("Ecdsa error: {0:?}")]
    EcdsaError(p256::ecdsa::Error),
    #[error("No data to sign")]
    EmptyData,
}

impl WebauthnEnclaveError {
    /// The status code written back as the ecall's logical return value.
    pub fn as_status(&self) -> SgxStatus {
        match self {
            WebauthnEnclaveError::FrameEnclaveError(err) => err.as_status(),
            WebauthnEnclaveError::EmptyData => SgxStatus::InvalidParameter,
            _ => SgxStatus::Unexpected,
        }
    }
}

impl From<p256::ecdsa::Error> for WebauthnEnclaveError {
    fn from(err: p256::ecdsa::Error) -> Self {
        WebauthnEnclaveError::EcdsaError(err)
    }
}

impl From<SgxStatus> for WebauthnEnclaveError {
    fn from(err: SgxStatus) -> Self {
        WebauthnEnclaveError::FrameEnclaveError(err.into())
    }
}
