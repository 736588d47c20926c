pub mod context;
mod ecalls;
mod enclave_key;
mod error;
mod ocalls;
pub mod service;

pub use crate::context::WebauthnEnclave;
pub use crate::enclave_key::{EnclaveKey, KeyMaterial, KEY_MATERIAL_SIZE, SEALED_KEY_SIZE};
pub use crate::error::{Result, WebauthnEnclaveError};
