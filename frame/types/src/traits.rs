use crate::types::{EnclaveStatus, Measurement, SgxStatus};
use std::ffi::c_void;

/// The ocalls an enclave may issue while one of its ecalls is running.
///
/// A table is handed to the enclave together with each ecall and is only
/// valid for the duration of that ecall. It carries ocall entry points only.
pub trait OcallTable {
    fn nr_ocall(&self) -> usize;

    /// # Safety
    ///
    /// `pms` must point to the marshaling struct registered for `index` and
    /// stay valid until the call returns.
    unsafe fn ocall(&self, index: u32, pms: *mut c_void) -> SgxStatus;
}

/// Enclave code as loaded by the untrusted runtime.
pub trait EnclaveImage: Send + Sync {
    fn nr_ecall(&self) -> usize;

    fn measurement(&self) -> Measurement;

    /// # Safety
    ///
    /// `pms` must be null or point to the marshaling struct registered for
    /// `index`, valid until the call returns.
    unsafe fn ecall(&self, index: u32, ocall_table: &dyn OcallTable, pms: *mut c_void)
        -> SgxStatus;
}

/// A marshaling struct for one ecall.
///
/// Ties the parameter block to the dispatch index it is packed for and
/// exposes the logical status the enclave writes back into it.
pub trait EcallParams {
    const ECALL_INDEX: u32;

    fn retval(&self) -> EnclaveStatus;
}
