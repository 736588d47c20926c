pub mod ecalls;
pub mod errlist;
mod error;
pub mod init_enclave;
pub mod urts;

pub use ecalls::{EcallResultExt, EnclaveConnector};
pub use error::{FrameHostError as Error, Result};
pub use init_enclave::EnclaveDir;
pub use urts::{EcallResult, SgxEnclave};
