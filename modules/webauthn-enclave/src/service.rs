//! Key lifecycle and signing inside the enclave.

use crate::{
    enclave_key::{EnclaveKey, KeyMaterial, SEALED_KEY_SIZE},
    error::{Result, WebauthnEnclaveError},
    ocalls,
};
use frame_enclave::{sealing::SealedData, OcallContext};
use frame_types::{Ec256Public, Ec256Signature, Measurement};
use log::{debug, info, warn};
use parking_lot::Mutex;
use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

const NEW_KEY_MESSAGE: &str = "Generated a new enclave key pair\n";

/// Holds the signing key once it has been unsealed or generated.
pub struct KeyStore {
    measurement: Measurement,
    key: Mutex<Option<EnclaveKey>>,
}

impl KeyStore {
    pub fn new(measurement: Measurement) -> Self {
        KeyStore {
            measurement,
            key: Mutex::new(None),
        }
    }

    pub fn get_public_key(&self, ocalls: &OcallContext) -> Result<Ec256Public> {
        let mut slot = self.key.lock();
        let key = self.ensure_key(&mut slot, ocalls)?;
        Ok(key.public_key())
    }

    /// Signs `data || SHA-256(client_json)`, where `client_json` is
    /// `client_data` up to its first NUL byte.
    pub fn sign(
        &self,
        ocalls: &OcallContext,
        data: &[u8],
        client_data: &[u8],
    ) -> Result<Ec256Signature> {
        if data.is_empty() {
            return Err(WebauthnEnclaveError::EmptyData);
        }
        let mut slot = self.key.lock();
        let key = self.ensure_key(&mut slot, ocalls)?;

        let end = client_data
            .iter()
            .position(|b| *b == 0)
            .unwrap_or(client_data.len());
        let client_data_hash = Sha256::digest(&client_data[..end]);

        let mut msg = Vec::with_capacity(data.len() + client_data_hash.len());
        msg.extend_from_slice(data);
        msg.extend_from_slice(&client_data_hash);

        key.sign(&msg)
    }

    fn ensure_key<'k>(
        &self,
        slot: &'k mut Option<EnclaveKey>,
        ocalls: &OcallContext,
    ) -> Result<&'k EnclaveKey> {
        if slot.is_none() {
            let key = match self.load_key(ocalls) {
                Ok(key) => {
                    debug!("Unsealed the enclave key");
                    key
                }
                Err(e) => {
                    info!("No usable sealed key ({}), generating a new one", e);
                    self.generate_key(ocalls)?
                }
            };
            *slot = Some(key);
        }

        match slot {
            Some(key) => Ok(key),
            None => Err(frame_types::SgxStatus::Unexpected.into()),
        }
    }

    fn load_key(&self, ocalls: &OcallContext) -> Result<EnclaveKey> {
        let bytes = ocalls::load_enclave_data(ocalls, SEALED_KEY_SIZE)?;
        let sealed = SealedData::from_bytes(&bytes)?;
        let plaintext = sealed.unseal(&self.measurement)?;
        let material: KeyMaterial = bincode::deserialize(&plaintext)?;

        EnclaveKey::from_material(&material)
    }

    fn generate_key(&self, ocalls: &OcallContext) -> Result<EnclaveKey> {
        let key = EnclaveKey::new()?;
        let plaintext = Zeroizing::new(bincode::serialize(&key.material())?);
        let sealed = SealedData::seal(&self.measurement, &[], &plaintext)?;

        if let Err(e) = ocalls::save_enclave_data(ocalls, &sealed.to_bytes()) {
            warn!("Failed to save the sealed key: {}", e);
        }
        if let Err(e) = ocalls::print_string(ocalls, NEW_KEY_MESSAGE) {
            warn!("Failed to print to the host console: {}", e);
        }

        Ok(key)
    }
}
