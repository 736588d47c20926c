use crate::{
    ecalls::{handle_get_public_key, handle_sign_data},
    service::KeyStore,
};
use frame_enclave::{register_ecall, EnclaveIdentity};
use frame_types::Measurement;
use sha2::{Digest, Sha256};
use webauthn_ecall_types::Ecall;

const ENCLAVE_NAME: &[u8] = b"webauthn-enclave";

/// The loaded signer enclave.
pub struct WebauthnEnclave {
    measurement: Measurement,
    key_store: KeyStore,
}

impl WebauthnEnclave {
    pub fn new() -> Self {
        let mut hasher = Sha256::new();
        hasher.update(ENCLAVE_NAME);
        hasher.update(env!("CARGO_PKG_VERSION").as_bytes());
        let mut measurement = [0u8; 32];
        measurement.copy_from_slice(&hasher.finalize());

        Self::with_measurement(measurement)
    }

    /// Builds an enclave that reports `measurement`, i.e. a different build.
    pub fn with_measurement(measurement: Measurement) -> Self {
        WebauthnEnclave {
            measurement,
            key_store: KeyStore::new(measurement),
        }
    }

    pub fn key_store(&self) -> &KeyStore {
        &self.key_store
    }
}

impl Default for WebauthnEnclave {
    fn default() -> Self {
        Self::new()
    }
}

impl EnclaveIdentity for WebauthnEnclave {
    fn measurement(&self) -> Measurement {
        self.measurement
    }
}

register_ecall!(
    WebauthnEnclave,
    Ecall,
    (Ecall::GetPublicKey, handle_get_public_key),
    (Ecall::SignData, handle_sign_data),
);
