use std::{convert::TryFrom, fmt};

pub const ECP256_KEY_SIZE: usize = 32;
pub const NISTP_ECP256_KEY_SIZE: usize = ECP256_KEY_SIZE / 4;
pub const MEASUREMENT_SIZE: usize = 32;
pub const LAUNCH_TOKEN_SIZE: usize = 1024;

pub type EnclaveId = u64;
pub type Measurement = [u8; MEASUREMENT_SIZE];
pub type LaunchToken = [u8; LAUNCH_TOKEN_SIZE];

pub type SgxResult<T> = Result<T, SgxStatus>;

/// Status of a transition across the enclave boundary.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SgxStatus {
    Success = 0x0000,

    Unexpected = 0x0001,
    InvalidParameter = 0x0002,
    OutOfMemory = 0x0003,
    EnclaveLost = 0x0004,
    InvalidState = 0x0005,

    InvalidFunction = 0x1001,
    OutOfTcs = 0x1003,
    EnclaveCrashed = 0x1006,
    EcallNotAllowed = 0x1007,
    OcallNotAllowed = 0x1008,

    InvalidEnclave = 0x2001,
    InvalidEnclaveId = 0x2002,
    InvalidSignature = 0x2003,
    OutOfEpc = 0x2005,
    NoDevice = 0x2006,
    MemoryMapConflict = 0x2007,
    InvalidMetadata = 0x2009,
    DeviceBusy = 0x200c,
    InvalidVersion = 0x200d,
    EnclaveFileAccess = 0x200f,
    InvalidLaunchToken = 0x2011,

    MacMismatch = 0x3001,
    InvalidAttribute = 0x3002,
}

impl SgxStatus {
    pub fn is_success(&self) -> bool {
        *self == SgxStatus::Success
    }

    pub fn code(&self) -> u32 {
        *self as u32
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SgxStatus::Success => "SGX_SUCCESS",
            SgxStatus::Unexpected => "SGX_ERROR_UNEXPECTED",
            SgxStatus::InvalidParameter => "SGX_ERROR_INVALID_PARAMETER",
            SgxStatus::OutOfMemory => "SGX_ERROR_OUT_OF_MEMORY",
            SgxStatus::EnclaveLost => "SGX_ERROR_ENCLAVE_LOST",
            SgxStatus::InvalidState => "SGX_ERROR_INVALID_STATE",
            SgxStatus::InvalidFunction => "SGX_ERROR_INVALID_FUNCTION",
            SgxStatus::OutOfTcs => "SGX_ERROR_OUT_OF_TCS",
            SgxStatus::EnclaveCrashed => "SGX_ERROR_ENCLAVE_CRASHED",
            SgxStatus::EcallNotAllowed => "SGX_ERROR_ECALL_NOT_ALLOWED",
            SgxStatus::OcallNotAllowed => "SGX_ERROR_OCALL_NOT_ALLOWED",
            SgxStatus::InvalidEnclave => "SGX_ERROR_INVALID_ENCLAVE",
            SgxStatus::InvalidEnclaveId => "SGX_ERROR_INVALID_ENCLAVE_ID",
            SgxStatus::InvalidSignature => "SGX_ERROR_INVALID_SIGNATURE",
            SgxStatus::OutOfEpc => "SGX_ERROR_OUT_OF_EPC",
            SgxStatus::NoDevice => "SGX_ERROR_NO_DEVICE",
            SgxStatus::MemoryMapConflict => "SGX_ERROR_MEMORY_MAP_CONFLICT",
            SgxStatus::InvalidMetadata => "SGX_ERROR_INVALID_METADATA",
            SgxStatus::DeviceBusy => "SGX_ERROR_DEVICE_BUSY",
            SgxStatus::InvalidVersion => "SGX_ERROR_INVALID_VERSION",
            SgxStatus::EnclaveFileAccess => "SGX_ERROR_ENCLAVE_FILE_ACCESS",
            SgxStatus::InvalidLaunchToken => "SGX_ERROR_INVALID_LAUNCH_TOKEN",
            SgxStatus::MacMismatch => "SGX_ERROR_MAC_MISMATCH",
            SgxStatus::InvalidAttribute => "SGX_ERROR_INVALID_ATTRIBUTE",
        }
    }
}

impl Default for SgxStatus {
    fn default() -> Self {
        SgxStatus::Unexpected
    }
}

impl fmt::Display for SgxStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} (0x{:X})", self.as_str(), self.code())
    }
}

impl TryFrom<u32> for SgxStatus {
    type Error = u32;

    fn try_from(code: u32) -> Result<Self, Self::Error> {
        let status = match code {
            0x0000 => SgxStatus::Success,
            0x0001 => SgxStatus::Unexpected,
            0x0002 => SgxStatus::InvalidParameter,
            0x0003 => SgxStatus::OutOfMemory,
            0x0004 => SgxStatus::EnclaveLost,
            0x0005 => SgxStatus::InvalidState,
            0x1001 => SgxStatus::InvalidFunction,
            0x1003 => SgxStatus::OutOfTcs,
            0x1006 => SgxStatus::EnclaveCrashed,
            0x1007 => SgxStatus::EcallNotAllowed,
            0x1008 => SgxStatus::OcallNotAllowed,
            0x2001 => SgxStatus::InvalidEnclave,
            0x2002 => SgxStatus::InvalidEnclaveId,
            0x2003 => SgxStatus::InvalidSignature,
            0x2005 => SgxStatus::OutOfEpc,
            0x2006 => SgxStatus::NoDevice,
            0x2007 => SgxStatus::MemoryMapConflict,
            0x2009 => SgxStatus::InvalidMetadata,
            0x200c => SgxStatus::DeviceBusy,
            0x200d => SgxStatus::InvalidVersion,
            0x200f => SgxStatus::EnclaveFileAccess,
            0x2011 => SgxStatus::InvalidLaunchToken,
            0x3001 => SgxStatus::MacMismatch,
            0x3002 => SgxStatus::InvalidAttribute,
            other => return Err(other),
        };

        Ok(status)
    }
}

/// Status for Ecall
///
/// Non-zero values carry the code of the `SgxStatus` the enclave failed with.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnclaveStatus(pub u32);

impl Default for EnclaveStatus {
    fn default() -> Self {
        EnclaveStatus(0)
    }
}

impl EnclaveStatus {
    pub fn success() -> Self {
        EnclaveStatus(0)
    }

    pub fn is_err(&self) -> bool {
        match self.0 {
            0 => false,
            _ => true,
        }
    }

    pub fn code(&self) -> u32 {
        self.0
    }

    pub fn as_sgx_status(&self) -> Option<SgxStatus> {
        SgxStatus::try_from(self.0).ok()
    }
}

impl From<SgxStatus> for EnclaveStatus {
    fn from(status: SgxStatus) -> Self {
        EnclaveStatus(status.code())
    }
}

/// Status for Ocall
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UntrustedStatus(pub i32);

impl Default for UntrustedStatus {
    fn default() -> Self {
        UntrustedStatus(0)
    }
}

impl UntrustedStatus {
    pub fn success() -> Self {
        UntrustedStatus(0)
    }

    pub fn error() -> Self {
        UntrustedStatus(1)
    }

    pub fn is_err(&self) -> bool {
        match self.0 {
            0 => false,
            _ => true,
        }
    }
}

/// A NIST P-256 public key. Both coordinates are stored little-endian.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Ec256Public {
    pub gx: [u8; ECP256_KEY_SIZE],
    pub gy: [u8; ECP256_KEY_SIZE],
}

/// An ECDSA P-256 signature. `x` holds r and `y` holds s, both as
/// little-endian sequences of 32-bit words.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Ec256Signature {
    pub x: [u32; NISTP_ECP256_KEY_SIZE],
    pub y: [u32; NISTP_ECP256_KEY_SIZE],
}
