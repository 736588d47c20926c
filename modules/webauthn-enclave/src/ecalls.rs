//! Trusted bridges: unpack a parameter block, run the service and write the
//! results back.

use crate::context::WebauthnEnclave;
use frame_config::{CLIENT_DATA_JSON_SIZE, ECALL_MAX_BUFFER_SIZE};
use frame_enclave::{
    bridge::{copy_in, copy_out, ms_mut},
    OcallContext,
};
use frame_types::{EnclaveStatus, SgxStatus};
use log::error;
use std::ffi::c_void;
use webauthn_ecall_types::*;

macro_rules! try_bridge {
    ($expr: expr) => {
        match $expr {
            Ok(value) => value,
            Err(status) => return status,
        }
    };
}

pub unsafe fn handle_get_public_key(
    ctx: &WebauthnEnclave,
    ocalls: &OcallContext,
    pms: *mut c_void,
) -> SgxStatus {
    let ms = try_bridge!(ms_mut::<MsGetPublicKey>(pms));
    if ms.ret_pk.is_null() {
        return SgxStatus::InvalidParameter;
    }

    ms.retval = match ctx.key_store().get_public_key(ocalls) {
        Ok(pk) => {
            try_bridge!(copy_out(ms.ret_pk, &pk));
            EnclaveStatus::success()
        }
        Err(e) => {
            error!("Error in enclave (get_public_key): {}", e);
            EnclaveStatus::from(e.as_status())
        }
    };

    SgxStatus::Success
}

pub unsafe fn handle_sign_data(
    ctx: &WebauthnEnclave,
    ocalls: &OcallContext,
    pms: *mut c_void,
) -> SgxStatus {
    let ms = try_bridge!(ms_mut::<MsSignData>(pms));
    if ms.ret_signature.is_null() {
        return SgxStatus::InvalidParameter;
    }
    let data = try_bridge!(copy_in(
        ms.data,
        ms.data_size as usize,
        ECALL_MAX_BUFFER_SIZE
    ));
    let client_data = try_bridge!(copy_in(
        ms.client_data,
        ms.client_data_size as usize,
        CLIENT_DATA_JSON_SIZE
    ));

    ms.retval = match ctx.key_store().sign(ocalls, &data, &client_data) {
        Ok(signature) => {
            try_bridge!(copy_out(ms.ret_signature, &signature));
            EnclaveStatus::success()
        }
        Err(e) => {
            error!("Error in enclave (sign_data): {}", e);
            EnclaveStatus::from(e.as_status())
        }
    };

    SgxStatus::Success
}
