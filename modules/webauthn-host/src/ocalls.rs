//! Host implementations of the enclave's ocalls.

use crate::store::SealedDataStore;
use frame_types::{OcallTable, SgxStatus, UntrustedStatus};
use std::{
    cell::RefCell,
    convert::TryFrom,
    ffi::{c_void, CStr},
    io::{self, Write},
};
use tracing::{error, warn};
use webauthn_ecall_types::*;

/// The ocall table handed to the enclave with every ecall.
#[derive(Debug, Clone, Default)]
pub struct EnclaveOcalls {
    store: SealedDataStore,
}

impl EnclaveOcalls {
    pub fn new(store: SealedDataStore) -> Self {
        EnclaveOcalls { store }
    }

    pub fn store(&self) -> &SealedDataStore {
        &self.store
    }

    /// The same table with enclave prints written to `console` instead of
    /// stdout.
    pub fn with_console<'a, W: Write>(&'a self, console: &'a mut W) -> ConsoleOcalls<'a, W> {
        ConsoleOcalls {
            ocalls: self,
            console: RefCell::new(console),
        }
    }

    unsafe fn dispatch(&self, index: u32, pms: *mut c_void, console: &mut dyn Write) -> SgxStatus {
        if pms.is_null() {
            return SgxStatus::InvalidParameter;
        }

        match Ocall::try_from(index) {
            Ok(Ocall::UntrustedPrintString) => {
                untrusted_print_string(&*(pms as *const MsUntrustedPrintString), console)
            }
            Ok(Ocall::UntrustedSaveEnclaveData) => {
                self.untrusted_save_enclave_data(&mut *(pms as *mut MsUntrustedSaveEnclaveData))
            }
            Ok(Ocall::UntrustedLoadEnclaveData) => {
                self.untrusted_load_enclave_data(&mut *(pms as *mut MsUntrustedLoadEnclaveData))
            }
            Err(index) => {
                error!("Unknown ocall index: {}", index);
                return SgxStatus::InvalidFunction;
            }
        }

        SgxStatus::Success
    }

    unsafe fn untrusted_save_enclave_data(&self, ms: &mut MsUntrustedSaveEnclaveData) {
        if ms.sealed_data.is_null() {
            ms.retval = UntrustedStatus::error();
            return;
        }
        let sealed_data = std::slice::from_raw_parts(ms.sealed_data, ms.sealed_size);

        ms.retval = match self.store.save(sealed_data) {
            Ok(()) => UntrustedStatus::success(),
            Err(e) => {
                error!("Failed to save sealed data to {:?}: {}", self.store.path(), e);
                UntrustedStatus::error()
            }
        };
    }

    unsafe fn untrusted_load_enclave_data(&self, ms: &mut MsUntrustedLoadEnclaveData) {
        if ms.sealed_data.is_null() {
            ms.retval = UntrustedStatus::error();
            return;
        }
        let buf = std::slice::from_raw_parts_mut(ms.sealed_data, ms.sealed_size);

        ms.retval = match self.store.load_into(buf) {
            Ok(()) => UntrustedStatus::success(),
            Err(e) => {
                warn!("Failed to load sealed data from {:?}: {}", self.store.path(), e);
                UntrustedStatus::error()
            }
        };
    }
}

unsafe fn untrusted_print_string(ms: &MsUntrustedPrintString, console: &mut dyn Write) {
    if ms.string.is_null() {
        return;
    }
    let string = CStr::from_ptr(ms.string).to_string_lossy();
    if let Err(e) = console
        .write_all(string.as_bytes())
        .and_then(|_| console.flush())
    {
        warn!("Failed to print enclave message: {}", e);
    }
}

impl OcallTable for EnclaveOcalls {
    fn nr_ocall(&self) -> usize {
        Ocall::TABLE_SIZE
    }

    unsafe fn ocall(&self, index: u32, pms: *mut c_void) -> SgxStatus {
        self.dispatch(index, pms, &mut io::stdout())
    }
}

/// `EnclaveOcalls` borrowing a console for the duration of some ecalls.
pub struct ConsoleOcalls<'a, W> {
    ocalls: &'a EnclaveOcalls,
    console: RefCell<&'a mut W>,
}

impl<W: Write> OcallTable for ConsoleOcalls<'_, W> {
    fn nr_ocall(&self) -> usize {
        self.ocalls.nr_ocall()
    }

    unsafe fn ocall(&self, index: u32, pms: *mut c_void) -> SgxStatus {
        let mut console = match self.console.try_borrow_mut() {
            Ok(console) => console,
            Err(_) => return SgxStatus::EcallNotAllowed,
        };
        self.ocalls.dispatch(index, pms, &mut **console)
    }
}
