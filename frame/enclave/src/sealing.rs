//! Sealing of data to an enclave identity.
//!
//! Blob layout: `key_id (32) || nonce (24) || additional length (u32 LE) ||
//! payload length (u32 LE) || additional || ciphertext with tag (16)`.
//! The sealing key is derived from the simulation fuse key, the enclave
//! measurement and the per-blob `key_id`, so only the same enclave can
//! unseal it.

use crate::error::Result;
use frame_types::{Measurement, SgxResult, SgxStatus};
use hmac::{Hmac, Mac};
use log::debug;
use rand::{rngs::OsRng, RngCore};
use sha2::Sha256;
use std::convert::TryInto;
use xsalsa20poly1305::{
    aead::{Aead, KeyInit, Payload},
    Nonce, XSalsa20Poly1305,
};
use zeroize::Zeroizing;

/// Stands in for the per-CPU fuse key in simulation mode.
pub const SIM_FUSE_KEY: [u8; 32] = *b"webauthn-sgx-simulation-fusekey!";

pub const KEY_ID_SIZE: usize = 32;
pub const NONCE_SIZE: usize = 24;
pub const MAC_SIZE: usize = 16;
const HEADER_SIZE: usize = KEY_ID_SIZE + NONCE_SIZE + 4 + 4;
const SEAL_LABEL: &[u8] = b"SGX-SEAL";

type HmacSha256 = Hmac<Sha256>;

/// Size of a sealed blob carrying `add_mac_txt_size` bytes of additional
/// text and `txt_encrypt_size` bytes of payload.
pub const fn calc_sealed_data_size(add_mac_txt_size: usize, txt_encrypt_size: usize) -> usize {
    HEADER_SIZE + add_mac_txt_size + txt_encrypt_size + MAC_SIZE
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SealedData {
    key_id: [u8; KEY_ID_SIZE],
    nonce: [u8; NONCE_SIZE],
    additional: Vec<u8>,
    ciphertext: Vec<u8>,
}

impl SealedData {
    pub fn seal(identity: &Measurement, additional: &[u8], plaintext: &[u8]) -> Result<Self> {
        let mut key_id = [0u8; KEY_ID_SIZE];
        let mut nonce = [0u8; NONCE_SIZE];
        OsRng
            .try_fill_bytes(&mut key_id)
            .and_then(|_| OsRng.try_fill_bytes(&mut nonce))
            .map_err(|_| SgxStatus::Unexpected)?;

        let cipher = cipher_for(identity, &key_id)?;
        let ciphertext = cipher
            .encrypt(
                Nonce::from_slice(&nonce),
                Payload {
                    msg: plaintext,
                    aad: additional,
                },
            )
            .map_err(|_| SgxStatus::Unexpected)?;

        Ok(SealedData {
            key_id,
            nonce,
            additional: additional.to_vec(),
            ciphertext,
        })
    }

    /// Fails with `MacMismatch` when the blob was sealed by another identity
    /// or has been modified.
    pub fn unseal(&self, identity: &Measurement) -> Result<Zeroizing<Vec<u8>>> {
        let cipher = cipher_for(identity, &self.key_id)?;
        let plaintext = cipher
            .decrypt(
                Nonce::from_slice(&self.nonce),
                Payload {
                    msg: &self.ciphertext,
                    aad: &self.additional,
                },
            )
            .map_err(|_| {
                debug!("sealed data failed authentication");
                SgxStatus::MacMismatch
            })?;

        Ok(Zeroizing::new(plaintext))
    }

    pub fn payload_len(&self) -> usize {
        self.ciphertext.len() - MAC_SIZE
    }

    pub fn sealed_size(&self) -> usize {
        calc_sealed_data_size(self.additional.len(), self.payload_len())
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.sealed_size());
        bytes.extend_from_slice(&self.key_id);
        bytes.extend_from_slice(&self.nonce);
        bytes.extend_from_slice(&(self.additional.len() as u32).to_le_bytes());
        bytes.extend_from_slice(&(self.payload_len() as u32).to_le_bytes());
        bytes.extend_from_slice(&self.additional);
        bytes.extend_from_slice(&self.ciphertext);
        bytes
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < HEADER_SIZE {
            return Err(SgxStatus::InvalidParameter.into());
        }
        let (key_id, rest) = bytes.split_at(KEY_ID_SIZE);
        let (nonce, rest) = rest.split_at(NONCE_SIZE);
        let (add_len, rest) = rest.split_at(4);
        let (txt_len, body) = rest.split_at(4);
        let add_len = read_len(add_len)?;
        let txt_len = read_len(txt_len)?;

        let expected = add_len
            .checked_add(txt_len)
            .and_then(|len| len.checked_add(HEADER_SIZE + MAC_SIZE))
            .ok_or(SgxStatus::InvalidParameter)?;
        if bytes.len() != expected {
            return Err(SgxStatus::InvalidParameter.into());
        }
        let (additional, ciphertext) = body.split_at(add_len);

        Ok(SealedData {
            key_id: key_id.try_into().map_err(|_| SgxStatus::InvalidParameter)?,
            nonce: nonce.try_into().map_err(|_| SgxStatus::InvalidParameter)?,
            additional: additional.to_vec(),
            ciphertext: ciphertext.to_vec(),
        })
    }
}

fn read_len(bytes: &[u8]) -> SgxResult<usize> {
    let raw: [u8; 4] = bytes.try_into().map_err(|_| SgxStatus::InvalidParameter)?;
    Ok(u32::from_le_bytes(raw) as usize)
}

fn cipher_for(identity: &Measurement, key_id: &[u8; KEY_ID_SIZE]) -> SgxResult<XSalsa20Poly1305> {
    let mut mac = <HmacSha256 as Mac>::new_from_slice(&SIM_FUSE_KEY)
        .map_err(|_| SgxStatus::Unexpected)?;
    mac.update(SEAL_LABEL);
    mac.update(identity);
    mac.update(key_id);
    let mut key = Zeroizing::new([0u8; 32]);
    key.copy_from_slice(&mac.finalize().into_bytes());

    XSalsa20Poly1305::new_from_slice(&key[..]).map_err(|_| SgxStatus::Unexpected)
}
