use crate::{init_enclave, ocalls_in, set_env_vars};
use frame_host::urts::sgx_ecall;
use frame_types::{Ec256Public, EnclaveId, EnclaveStatus, OcallTable, SgxStatus};
use std::{
    cell::Cell,
    convert::TryFrom,
    ffi::c_void,
    ptr,
    sync::{mpsc, Mutex},
    thread,
};
use webauthn_ecall_types::*;
use webauthn_enclave::WebauthnEnclave;
use webauthn_host::{ecalls, EnclaveOcalls};

fn nested_get_public_key(eid: EnclaveId) -> SgxStatus {
    let mut pk = Ec256Public::default();
    let mut ms = MsGetPublicKey {
        retval: EnclaveStatus::default(),
        ret_pk: &mut pk,
    };
    unsafe {
        sgx_ecall(
            eid,
            Ecall::GetPublicKey as u32,
            &EnclaveOcalls::default(),
            &mut ms as *mut _ as *mut c_void,
        )
    }
}

/// Calls back into the enclave while serving its load request.
struct ReentrantOcalls {
    eid: EnclaveId,
    inner: EnclaveOcalls,
    nested: Cell<Option<SgxStatus>>,
}

impl OcallTable for ReentrantOcalls {
    fn nr_ocall(&self) -> usize {
        self.inner.nr_ocall()
    }

    unsafe fn ocall(&self, index: u32, pms: *mut c_void) -> SgxStatus {
        if Ocall::try_from(index) == Ok(Ocall::UntrustedLoadEnclaveData) {
            self.nested.set(Some(nested_get_public_key(self.eid)));
        }
        self.inner.ocall(index, pms)
    }
}

/// Parks inside the load ocall until released.
struct BlockingOcalls {
    inner: EnclaveOcalls,
    entered: mpsc::Sender<()>,
    release: Mutex<mpsc::Receiver<()>>,
}

impl OcallTable for BlockingOcalls {
    fn nr_ocall(&self) -> usize {
        self.inner.nr_ocall()
    }

    unsafe fn ocall(&self, index: u32, pms: *mut c_void) -> SgxStatus {
        if Ocall::try_from(index) == Ok(Ocall::UntrustedLoadEnclaveData) {
            self.entered.send(()).unwrap();
            self.release.lock().unwrap().recv().unwrap();
        }
        self.inner.ocall(index, pms)
    }
}

#[test]
fn test_destroyed_enclave_is_rejected() {
    set_env_vars();
    let tmp_dir = tempfile::tempdir().unwrap();
    let ocalls = ocalls_in(tmp_dir.path());
    let enclave = init_enclave(Box::new(WebauthnEnclave::new()), tmp_dir.path());
    let eid = enclave.geteid();
    assert!(ecalls::get_public_key(&enclave, &ocalls).unwrap().is_ok());

    assert_eq!(frame_host::urts::destroy_enclave(eid), SgxStatus::Success);
    assert_eq!(
        ecalls::get_public_key(&enclave, &ocalls),
        Err(SgxStatus::InvalidEnclaveId)
    );
    assert_eq!(
        ecalls::sign_data(&enclave, &ocalls, &[0x0a], b"{}"),
        Err(SgxStatus::InvalidEnclaveId)
    );
}

#[test]
fn test_malformed_calls() {
    set_env_vars();
    let tmp_dir = tempfile::tempdir().unwrap();
    let ocalls = ocalls_in(tmp_dir.path());
    let enclave = init_enclave(Box::new(WebauthnEnclave::new()), tmp_dir.path());

    let status = unsafe { sgx_ecall(enclave.geteid(), 0, &ocalls, ptr::null_mut()) };
    assert_eq!(status, SgxStatus::InvalidParameter);

    let status = unsafe {
        sgx_ecall(
            enclave.geteid(),
            Ecall::TABLE_SIZE as u32,
            &ocalls,
            ptr::null_mut(),
        )
    };
    assert_eq!(status, SgxStatus::InvalidFunction);

    let mut ms = MsGetPublicKey {
        retval: EnclaveStatus::default(),
        ret_pk: ptr::null_mut(),
    };
    let status = unsafe {
        sgx_ecall(
            enclave.geteid(),
            0,
            &ocalls,
            &mut ms as *mut _ as *mut c_void,
        )
    };
    assert_eq!(status, SgxStatus::InvalidParameter);
}

#[test]
fn test_ecall_from_ocall_is_not_allowed() {
    set_env_vars();
    let tmp_dir = tempfile::tempdir().unwrap();
    let enclave = init_enclave(Box::new(WebauthnEnclave::new()), tmp_dir.path());
    let ocalls = ReentrantOcalls {
        eid: enclave.geteid(),
        inner: ocalls_in(tmp_dir.path()),
        nested: Cell::new(None),
    };

    let pk = ecalls::get_public_key(&enclave, &ocalls).unwrap().unwrap();
    assert_eq!(ocalls.nested.get(), Some(SgxStatus::EcallNotAllowed));

    // the outer call still completed and the enclave is usable afterwards
    assert_eq!(nested_get_public_key(enclave.geteid()), SgxStatus::Success);
    assert_eq!(
        ecalls::get_public_key(&enclave, &ocalls_in(tmp_dir.path())),
        Ok(Ok(pk))
    );
}

#[test]
fn test_concurrent_ecall_is_refused() {
    set_env_vars();
    let tmp_dir = tempfile::tempdir().unwrap();
    let enclave = init_enclave(Box::new(WebauthnEnclave::new()), tmp_dir.path());
    let eid = enclave.geteid();
    let sealed_path = tmp_dir.path().to_path_buf();

    let (entered_tx, entered_rx) = mpsc::channel();
    let (release_tx, release_rx) = mpsc::channel();
    let worker = thread::spawn(move || {
        let ocalls = BlockingOcalls {
            inner: ocalls_in(&sealed_path),
            entered: entered_tx,
            release: Mutex::new(release_rx),
        };
        let mut pk = Ec256Public::default();
        let mut ms = MsGetPublicKey {
            retval: EnclaveStatus::default(),
            ret_pk: &mut pk,
        };
        let status = unsafe { sgx_ecall(eid, 0, &ocalls, &mut ms as *mut _ as *mut c_void) };
        (status, ms.retval)
    });

    entered_rx.recv().unwrap();
    assert_eq!(nested_get_public_key(eid), SgxStatus::OutOfTcs);
    release_tx.send(()).unwrap();

    let (status, retval) = worker.join().unwrap();
    assert_eq!(status, SgxStatus::Success);
    assert!(!retval.is_err());
    assert_eq!(nested_get_public_key(eid), SgxStatus::Success);
}
