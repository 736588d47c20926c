pub mod codec;
pub mod ecalls;
mod error;
pub mod ocalls;
pub mod session;
pub mod store;

pub use crate::error::SessionError;
pub use crate::ocalls::{ConsoleOcalls, EnclaveOcalls};
pub use crate::session::{Session, SessionState, SignedRequest};
pub use crate::store::SealedDataStore;
