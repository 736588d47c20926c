//! Human readable diagnostics for runtime status codes.

use frame_types::SgxStatus;

struct ErrEntry {
    err: SgxStatus,
    msg: &'static str,
    sug: Option<&'static str>,
}

static SGX_ERRLIST: &[ErrEntry] = &[
    ErrEntry {
        err: SgxStatus::Unexpected,
        msg: "Unexpected error occurred.",
        sug: None,
    },
    ErrEntry {
        err: SgxStatus::InvalidParameter,
        msg: "Invalid parameter.",
        sug: None,
    },
    ErrEntry {
        err: SgxStatus::OutOfMemory,
        msg: "Out of memory.",
        sug: None,
    },
    ErrEntry {
        err: SgxStatus::EnclaveLost,
        msg: "Power transition occurred.",
        sug: Some("Please refer to the sample \"PowerTransition\" for details."),
    },
    ErrEntry {
        err: SgxStatus::InvalidEnclave,
        msg: "Invalid enclave image.",
        sug: None,
    },
    ErrEntry {
        err: SgxStatus::InvalidEnclaveId,
        msg: "Invalid enclave identification.",
        sug: None,
    },
    ErrEntry {
        err: SgxStatus::InvalidSignature,
        msg: "Invalid enclave signature.",
        sug: None,
    },
    ErrEntry {
        err: SgxStatus::OutOfEpc,
        msg: "Out of EPC memory.",
        sug: None,
    },
    ErrEntry {
        err: SgxStatus::NoDevice,
        msg: "Invalid SGX device.",
        sug: Some(
            "Please make sure SGX module is enabled in the BIOS, and install SGX driver afterwards.",
        ),
    },
    ErrEntry {
        err: SgxStatus::MemoryMapConflict,
        msg: "Memory map conflicted.",
        sug: None,
    },
    ErrEntry {
        err: SgxStatus::InvalidMetadata,
        msg: "Invalid enclave metadata.",
        sug: None,
    },
    ErrEntry {
        err: SgxStatus::DeviceBusy,
        msg: "SGX device was busy.",
        sug: None,
    },
    ErrEntry {
        err: SgxStatus::InvalidVersion,
        msg: "Enclave version was invalid.",
        sug: None,
    },
    ErrEntry {
        err: SgxStatus::InvalidAttribute,
        msg: "Enclave was not authorized.",
        sug: None,
    },
    ErrEntry {
        err: SgxStatus::EnclaveFileAccess,
        msg: "Can't open enclave file.",
        sug: None,
    },
];

/// Formats the console diagnostic for `status`, one line per entry and
/// each terminated by a newline.
pub fn error_message(status: SgxStatus) -> String {
    match SGX_ERRLIST.iter().find(|entry| entry.err == status) {
        Some(entry) => {
            let mut out = String::new();
            if let Some(sug) = entry.sug {
                out.push_str(&format!("Info: {}\n", sug));
            }
            out.push_str(&format!("Error: {}\n", entry.msg));
            out
        }
        None => format!(
            "Error code is 0x{:X}. Please refer to the \"Intel SGX SDK Developer Reference\" for more details.\n",
            status.code()
        ),
    }
}
