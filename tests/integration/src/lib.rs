#![cfg(test)]

mod session;
mod transport;

use frame_host::{EnclaveDir, SgxEnclave};
use frame_types::{Ec256Public, EnclaveImage};
use once_cell::sync::Lazy;
use p256::ecdsa::{signature::Verifier, Signature, VerifyingKey};
use sha2::{Digest, Sha256};
use std::path::Path;
use webauthn_host::{EnclaveOcalls, SealedDataStore};

pub static SUBSCRIBER_INIT: Lazy<()> = Lazy::new(test_utils::tracing::init_tracing);

pub fn set_env_vars() {
    Lazy::force(&SUBSCRIBER_INIT);
}

pub fn init_enclave(image: Box<dyn EnclaveImage>, dir: &Path) -> SgxEnclave {
    EnclaveDir::with_path(dir).init_enclave(image, true).unwrap()
}

pub fn ocalls_in(dir: &Path) -> EnclaveOcalls {
    EnclaveOcalls::new(SealedDataStore::new(dir.join("enclave_data.seal")))
}

/// Rebuilds the verifying key from the little-endian coordinates.
pub fn verifying_key(pk: &Ec256Public) -> VerifyingKey {
    let mut sec1 = vec![0x04];
    sec1.extend(pk.gx.iter().rev());
    sec1.extend(pk.gy.iter().rev());
    VerifyingKey::from_sec1_bytes(&sec1).unwrap()
}

/// Checks a signature over `data || SHA-256(client_json)`.
pub fn verify_webauthn(
    vk: &VerifyingKey,
    data: &[u8],
    client_json: &[u8],
    r_s: &[u8],
) -> bool {
    let mut msg = data.to_vec();
    msg.extend_from_slice(&Sha256::digest(client_json));
    let sig = Signature::from_slice(r_s).unwrap();
    vk.verify(&msg, &sig).is_ok()
}
