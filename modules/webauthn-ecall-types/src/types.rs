use frame_types::{EcallParams, Ec256Public, Ec256Signature, EnclaveStatus, UntrustedStatus};
use std::{convert::TryFrom, os::raw::c_char};

/// Entry points into the enclave. The discriminant is the ecall index.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ecall {
    GetPublicKey = 0,
    SignData = 1,
}

impl Ecall {
    pub const TABLE_SIZE: usize = 2;
}

impl TryFrom<u32> for Ecall {
    type Error = u32;

    fn try_from(index: u32) -> Result<Self, Self::Error> {
        match index {
            0 => Ok(Ecall::GetPublicKey),
            1 => Ok(Ecall::SignData),
            other => Err(other),
        }
    }
}

/// Host services the enclave may call out to. The discriminant is the ocall
/// index.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ocall {
    UntrustedPrintString = 0,
    UntrustedSaveEnclaveData = 1,
    UntrustedLoadEnclaveData = 2,
}

impl Ocall {
    pub const TABLE_SIZE: usize = 3;
}

impl TryFrom<u32> for Ocall {
    type Error = u32;

    fn try_from(index: u32) -> Result<Self, Self::Error> {
        match index {
            0 => Ok(Ocall::UntrustedPrintString),
            1 => Ok(Ocall::UntrustedSaveEnclaveData),
            2 => Ok(Ocall::UntrustedLoadEnclaveData),
            other => Err(other),
        }
    }
}

// ecall parameter blocks

#[repr(C)]
#[derive(Debug)]
pub struct MsGetPublicKey {
    pub retval: EnclaveStatus,
    pub ret_pk: *mut Ec256Public,
}

impl EcallParams for MsGetPublicKey {
    const ECALL_INDEX: u32 = Ecall::GetPublicKey as u32;

    fn retval(&self) -> EnclaveStatus {
        self.retval
    }
}

#[repr(C)]
#[derive(Debug)]
pub struct MsSignData {
    pub retval: EnclaveStatus,
    pub data: *const u8,
    pub data_size: u32,
    pub client_data: *const u8,
    pub client_data_size: u32,
    pub ret_signature: *mut Ec256Signature,
}

impl EcallParams for MsSignData {
    const ECALL_INDEX: u32 = Ecall::SignData as u32;

    fn retval(&self) -> EnclaveStatus {
        self.retval
    }
}

// ocall parameter blocks

#[repr(C)]
#[derive(Debug)]
pub struct MsUntrustedPrintString {
    pub string: *const c_char,
}

#[repr(C)]
#[derive(Debug)]
pub struct MsUntrustedSaveEnclaveData {
    pub retval: UntrustedStatus,
    pub sealed_data: *const u8,
    pub sealed_size: usize,
}

#[repr(C)]
#[derive(Debug)]
pub struct MsUntrustedLoadEnclaveData {
    pub retval: UntrustedStatus,
    pub sealed_data: *mut u8,
    pub sealed_size: usize,
}
