//! Untrusted runtime in simulation mode.
//!
//! Enclaves are loaded images addressed by an `EnclaveId`. Transitions are
//! synchronous calls that carry a raw pointer to a marshaling struct, exactly
//! like `sgx_ecall`. One ecall may run per enclave at a time; ecalls issued
//! from inside an ocall of the same enclave are refused.

use frame_types::{
    EnclaveId, EnclaveImage, EnclaveStatus, LaunchToken, Measurement, OcallTable, SgxResult,
    SgxStatus,
};
use hmac::{Hmac, Mac};
use lazy_static::lazy_static;
use parking_lot::RwLock;
use sha2::Sha256;
use std::{
    cell::RefCell,
    collections::HashMap,
    ffi::c_void,
    sync::{
        atomic::{AtomicBool, AtomicU64, Ordering},
        Arc,
    },
};
use tracing::{debug, info, warn};

/// Outcome of an ecall: the transport status wraps the enclave's own status,
/// so the logical result is only reachable once the transition succeeded.
pub type EcallResult<T> = std::result::Result<std::result::Result<T, EnclaveStatus>, SgxStatus>;

type HmacSha256 = Hmac<Sha256>;

const LAUNCH_KEY: &[u8] = b"webauthn-simulation-launch-key";

lazy_static! {
    static ref ENCLAVES: RwLock<HashMap<EnclaveId, Arc<LoadedEnclave>>> =
        RwLock::new(HashMap::new());
}

static NEXT_EID: AtomicU64 = AtomicU64::new(2);

thread_local! {
    static ACTIVE_ECALLS: RefCell<Vec<EnclaveId>> = RefCell::new(Vec::new());
}

struct LoadedEnclave {
    image: Box<dyn EnclaveImage>,
    busy: AtomicBool,
}

/// Marks an ecall as running on the current thread until dropped.
struct EcallGuard<'a> {
    eid: EnclaveId,
    busy: &'a AtomicBool,
}

impl<'a> EcallGuard<'a> {
    fn enter(eid: EnclaveId, busy: &'a AtomicBool) -> SgxResult<Self> {
        if ACTIVE_ECALLS.with(|active| active.borrow().contains(&eid)) {
            return Err(SgxStatus::EcallNotAllowed);
        }
        if busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(SgxStatus::OutOfTcs);
        }
        ACTIVE_ECALLS.with(|active| active.borrow_mut().push(eid));

        Ok(EcallGuard { eid, busy })
    }
}

impl Drop for EcallGuard<'_> {
    fn drop(&mut self) {
        let eid = self.eid;
        ACTIVE_ECALLS.with(|active| active.borrow_mut().retain(|id| *id != eid));
        self.busy.store(false, Ordering::Release);
    }
}

/// Loads `image` and returns the id of the new enclave.
///
/// A launch token that does not match the image is replaced and
/// `launch_token_updated` is set to 1.
pub fn create_enclave(
    image: Box<dyn EnclaveImage>,
    is_debug: bool,
    launch_token: &mut LaunchToken,
    launch_token_updated: &mut i32,
) -> SgxResult<EnclaveId> {
    if image.nr_ecall() == 0 {
        return Err(SgxStatus::InvalidMetadata);
    }

    let expected = compute_launch_token(&image.measurement(), is_debug)?;
    if launch_token[..] == expected[..] {
        *launch_token_updated = 0;
    } else {
        launch_token.copy_from_slice(&expected[..]);
        *launch_token_updated = 1;
    }

    let eid = NEXT_EID.fetch_add(1, Ordering::SeqCst);
    let loaded = LoadedEnclave {
        image,
        busy: AtomicBool::new(false),
    };
    ENCLAVES.write().insert(eid, Arc::new(loaded));
    info!("Loaded enclave {} (debug: {})", eid, is_debug);

    Ok(eid)
}

pub fn destroy_enclave(eid: EnclaveId) -> SgxStatus {
    match ENCLAVES.write().remove(&eid) {
        Some(_) => {
            info!("Destroyed enclave {}", eid);
            SgxStatus::Success
        }
        None => SgxStatus::InvalidEnclaveId,
    }
}

/// Transitions into enclave `eid` and runs ecall `index`.
///
/// # Safety
///
/// `pms` must be null or point to the marshaling struct that `index`
/// expects, and every pointer inside it must be valid for the whole call.
pub unsafe fn sgx_ecall(
    eid: EnclaveId,
    index: u32,
    ocall_table: &dyn OcallTable,
    pms: *mut c_void,
) -> SgxStatus {
    let enclave = match ENCLAVES.read().get(&eid).cloned() {
        Some(enclave) => enclave,
        None => return SgxStatus::InvalidEnclaveId,
    };
    if index as usize >= enclave.image.nr_ecall() {
        return SgxStatus::InvalidFunction;
    }

    let _guard = match EcallGuard::enter(eid, &enclave.busy) {
        Ok(guard) => guard,
        Err(status) => {
            warn!("Refused ecall {} on enclave {}: {}", index, eid, status);
            return status;
        }
    };

    debug!("ecall {} on enclave {}", index, eid);
    let status = enclave.image.ecall(index, ocall_table, pms);

    // results of an enclave torn down mid-call are not trusted
    if !ENCLAVES.read().contains_key(&eid) {
        warn!("Enclave {} was destroyed during ecall {}", eid, index);
        return SgxStatus::InvalidEnclaveId;
    }
    status
}

/// Id of the enclave whose ecall is running innermost on this thread.
pub fn current_eid() -> Option<EnclaveId> {
    ACTIVE_ECALLS.with(|active| active.borrow().last().copied())
}

fn compute_launch_token(measurement: &Measurement, is_debug: bool) -> SgxResult<LaunchToken> {
    let mut mac =
        HmacSha256::new_from_slice(LAUNCH_KEY).map_err(|_| SgxStatus::InvalidLaunchToken)?;
    mac.update(measurement);
    mac.update(&[is_debug as u8]);
    let tag = mac.finalize().into_bytes();

    let mut token = [0u8; frame_types::LAUNCH_TOKEN_SIZE];
    token[..tag.len()].copy_from_slice(&tag);
    Ok(token)
}

/// An owned handle to a loaded enclave. The enclave is destroyed when the
/// handle is dropped.
#[derive(Debug)]
pub struct SgxEnclave {
    eid: EnclaveId,
}

impl SgxEnclave {
    pub fn create(
        image: Box<dyn EnclaveImage>,
        is_debug: bool,
        launch_token: &mut LaunchToken,
        launch_token_updated: &mut i32,
    ) -> SgxResult<SgxEnclave> {
        create_enclave(image, is_debug, launch_token, launch_token_updated)
            .map(|eid| SgxEnclave { eid })
    }

    pub fn geteid(&self) -> EnclaveId {
        self.eid
    }

    pub fn destroy(self) {}
}

impl Drop for SgxEnclave {
    fn drop(&mut self) {
        let status = destroy_enclave(self.eid);
        if !status.is_success() {
            debug!("Enclave {} was already gone: {}", self.eid, status);
        }
    }
}
