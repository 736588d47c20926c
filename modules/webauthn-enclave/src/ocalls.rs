use frame_enclave::{ocalls::check_ocall, OcallContext, Result};
use frame_types::UntrustedStatus;
use std::ffi::CString;
use webauthn_ecall_types::*;

/// Prints `msg` on the host console. Text after an interior NUL is dropped.
pub fn print_string(ocalls: &OcallContext, msg: &str) -> Result<()> {
    let bytes = msg.as_bytes();
    let end = bytes.iter().position(|b| *b == 0).unwrap_or(bytes.len());
    // `end` excludes every NUL, so this cannot fail
    let string = CString::new(&bytes[..end]).unwrap_or_default();

    let mut ms = MsUntrustedPrintString {
        string: string.as_ptr(),
    };
    let status = unsafe { ocalls.ocall(Ocall::UntrustedPrintString as u32, &mut ms) };

    check_ocall(status, UntrustedStatus::success(), "untrusted_print_string")
}

pub fn save_enclave_data(ocalls: &OcallContext, sealed_data: &[u8]) -> Result<()> {
    let mut ms = MsUntrustedSaveEnclaveData {
        retval: UntrustedStatus::default(),
        sealed_data: sealed_data.as_ptr(),
        sealed_size: sealed_data.len(),
    };
    let status = unsafe { ocalls.ocall(Ocall::UntrustedSaveEnclaveData as u32, &mut ms) };

    check_ocall(status, ms.retval, "untrusted_save_enclave_data")
}

/// Reads exactly `sealed_size` bytes of previously saved data.
pub fn load_enclave_data(ocalls: &OcallContext, sealed_size: usize) -> Result<Vec<u8>> {
    let mut buf = vec![0u8; sealed_size];
    let mut ms = MsUntrustedLoadEnclaveData {
        retval: UntrustedStatus::default(),
        sealed_data: buf.as_mut_ptr(),
        sealed_size,
    };
    let status = unsafe { ocalls.ocall(Ocall::UntrustedLoadEnclaveData as u32, &mut ms) };
    check_ocall(status, ms.retval, "untrusted_load_enclave_data")?;

    Ok(buf)
}
