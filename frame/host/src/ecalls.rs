use crate::{
    error::{FrameHostError, Result},
    urts::{sgx_ecall, EcallResult, SgxEnclave},
};
use frame_types::{EcallParams, OcallTable, SgxStatus};
use std::ffi::c_void;

/// Issues ecalls on one enclave, handing it the same ocall table each time.
pub struct EnclaveConnector<'e> {
    enclave: &'e SgxEnclave,
    ocall_table: &'e dyn OcallTable,
}

impl<'e> EnclaveConnector<'e> {
    pub fn new(enclave: &'e SgxEnclave, ocall_table: &'e dyn OcallTable) -> Self {
        EnclaveConnector {
            enclave,
            ocall_table,
        }
    }

    /// Runs the ecall `M` is packed for. `retval` is only read back when the
    /// transition itself succeeded.
    ///
    /// # Safety
    ///
    /// Every pointer packed into `ms` must be valid for the whole call.
    pub unsafe fn invoke_ecall<M: EcallParams>(&self, ms: &mut M) -> EcallResult<()> {
        let status = sgx_ecall(
            self.enclave.geteid(),
            M::ECALL_INDEX,
            self.ocall_table,
            ms as *mut M as *mut c_void,
        );
        if status != SgxStatus::Success {
            return Err(status);
        }

        let retval = ms.retval();
        if retval.is_err() {
            return Ok(Err(retval));
        }

        Ok(Ok(()))
    }
}

/// Flattens a nested ecall result into a host error.
pub trait EcallResultExt<T> {
    fn into_host_result(self, function: &'static str, cmd: u32) -> Result<T>;
}

impl<T> EcallResultExt<T> for EcallResult<T> {
    fn into_host_result(self, function: &'static str, cmd: u32) -> Result<T> {
        match self {
            Err(status) => Err(FrameHostError::SgxStatus {
                status,
                function,
                cmd,
            }),
            Ok(Err(status)) => Err(FrameHostError::EnclaveError {
                status,
                function,
                cmd,
            }),
            Ok(Ok(value)) => Ok(value),
        }
    }
}
