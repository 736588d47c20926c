use crate::error::{FrameEnclaveError, Result};
use frame_types::{OcallTable, SgxStatus, UntrustedStatus};
use std::ffi::c_void;

/// The host's ocall table as seen from inside one running ecall.
#[derive(Clone, Copy)]
pub struct OcallContext<'a> {
    table: &'a dyn OcallTable,
}

impl<'a> OcallContext<'a> {
    pub fn new(table: &'a dyn OcallTable) -> Self {
        OcallContext { table }
    }

    /// # Safety
    ///
    /// `ms` must be the marshaling struct registered for `index`, and every
    /// pointer inside it must be valid until the call returns.
    pub unsafe fn ocall<T>(&self, index: u32, ms: &mut T) -> SgxStatus {
        if index as usize >= self.table.nr_ocall() {
            return SgxStatus::InvalidFunction;
        }
        self.table.ocall(index, ms as *mut T as *mut c_void)
    }
}

/// Checks both the transition status and the host's own return value.
pub fn check_ocall(status: SgxStatus, rt: UntrustedStatus, function: &'static str) -> Result<()> {
    if status != SgxStatus::Success {
        return Err(FrameEnclaveError::SgxError { err: status });
    }
    if rt.is_err() {
        return Err(FrameEnclaveError::UntrustedError {
            status: rt,
            function,
        });
    }

    Ok(())
}
