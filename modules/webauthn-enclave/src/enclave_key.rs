//! The enclave's P-256 signing key and its sealed representation.

use crate::error::Result;
use frame_enclave::sealing::calc_sealed_data_size;
use frame_types::{Ec256Public, Ec256Signature, SgxStatus, ECP256_KEY_SIZE, NISTP_ECP256_KEY_SIZE};
use p256::ecdsa::{signature::Signer, Signature, SigningKey};
use rand::{rngs::OsRng, RngCore};
use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

pub const KEY_MATERIAL_SIZE: usize = ECP256_KEY_SIZE;
/// Size of the blob the key is persisted as. No additional MAC text is sealed.
pub const SEALED_KEY_SIZE: usize = calc_sealed_data_size(0, KEY_MATERIAL_SIZE);

/// Plaintext of the sealed blob.
#[derive(Serialize, Deserialize)]
pub struct KeyMaterial {
    private_key: [u8; ECP256_KEY_SIZE],
}

impl Drop for KeyMaterial {
    fn drop(&mut self) {
        self.private_key.zeroize();
    }
}

pub struct EnclaveKey {
    signing_key: SigningKey,
}

impl EnclaveKey {
    pub fn new() -> Result<Self> {
        let signing_key = loop {
            let mut ret = [0u8; ECP256_KEY_SIZE];
            OsRng
                .try_fill_bytes(&mut ret)
                .map_err(|_| SgxStatus::Unexpected)?;

            let key = SigningKey::from_slice(&ret);
            ret.zeroize();
            if let Ok(key) = key {
                break key;
            }
        };

        Ok(EnclaveKey { signing_key })
    }

    pub fn from_material(material: &KeyMaterial) -> Result<Self> {
        let signing_key = SigningKey::from_slice(&material.private_key)?;
        Ok(EnclaveKey { signing_key })
    }

    pub fn material(&self) -> KeyMaterial {
        let mut private_key = [0u8; ECP256_KEY_SIZE];
        private_key.copy_from_slice(&self.signing_key.to_bytes());
        KeyMaterial { private_key }
    }

    /// Public coordinates, each little-endian.
    pub fn public_key(&self) -> Ec256Public {
        let point = self.signing_key.verifying_key().to_encoded_point(false);
        let mut pk = Ec256Public::default();
        // uncompressed SEC1: 0x04 || x || y, both big-endian
        let coords = &point.as_bytes()[1..];
        pk.gx.copy_from_slice(&coords[..ECP256_KEY_SIZE]);
        pk.gy.copy_from_slice(&coords[ECP256_KEY_SIZE..]);
        pk.gx.reverse();
        pk.gy.reverse();
        pk
    }

    /// ECDSA over SHA-256 of `msg` with deterministic nonces.
    pub fn sign(&self, msg: &[u8]) -> Result<Ec256Signature> {
        let sig: Signature = self.signing_key.try_sign(msg)?;
        let bytes = sig.to_bytes();

        Ok(Ec256Signature {
            x: be_to_limbs(&bytes[..ECP256_KEY_SIZE]),
            y: be_to_limbs(&bytes[ECP256_KEY_SIZE..]),
        })
    }
}

/// Splits a big-endian integer into little-endian ordered 32-bit limbs.
fn be_to_limbs(be: &[u8]) -> [u32; NISTP_ECP256_KEY_SIZE] {
    let mut limbs = [0u32; NISTP_ECP256_KEY_SIZE];
    for (limb, chunk) in limbs.iter_mut().zip(be.rchunks(4)) {
        let mut word = [0u8; 4];
        word.copy_from_slice(chunk);
        *limb = u32::from_be_bytes(word);
    }
    limbs
}
