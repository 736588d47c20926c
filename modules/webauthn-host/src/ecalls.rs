//! Untrusted proxies for the enclave's ecalls.

use frame_host::{EcallResult, EnclaveConnector, SgxEnclave};
use frame_types::{Ec256Public, Ec256Signature, EnclaveStatus, OcallTable, SgxStatus};
use std::convert::TryFrom;
use webauthn_ecall_types::*;

pub fn get_public_key(
    enclave: &SgxEnclave,
    ocall_table: &dyn OcallTable,
) -> EcallResult<Ec256Public> {
    let mut pk = Ec256Public::default();
    let mut ms = MsGetPublicKey {
        retval: EnclaveStatus::default(),
        ret_pk: &mut pk,
    };

    let res = unsafe { EnclaveConnector::new(enclave, ocall_table).invoke_ecall(&mut ms) };
    res.map(|inner| inner.map(|()| pk))
}

/// Signs `data` together with the hash of the NUL-terminated JSON in
/// `client_data`.
pub fn sign_data(
    enclave: &SgxEnclave,
    ocall_table: &dyn OcallTable,
    data: &[u8],
    client_data: &[u8],
) -> EcallResult<Ec256Signature> {
    let data_size = u32::try_from(data.len()).map_err(|_| SgxStatus::InvalidParameter)?;
    let client_data_size =
        u32::try_from(client_data.len()).map_err(|_| SgxStatus::InvalidParameter)?;

    let mut signature = Ec256Signature::default();
    let mut ms = MsSignData {
        retval: EnclaveStatus::default(),
        data: data.as_ptr(),
        data_size,
        client_data: client_data.as_ptr(),
        client_data_size,
        ret_signature: &mut signature,
    };

    let res = unsafe { EnclaveConnector::new(enclave, ocall_table).invoke_ecall(&mut ms) };
    res.map(|inner| inner.map(|()| signature))
}
