//! Checks applied by trusted bridges before touching host memory.

use frame_types::{SgxResult, SgxStatus};
use std::{ffi::c_void, mem, ptr};

/// Borrows the marshaling struct behind `pms`.
///
/// # Safety
///
/// A non-null `pms` must point to a live `T` that nothing else accesses
/// while the returned borrow is alive.
pub unsafe fn ms_mut<'a, T>(pms: *mut c_void) -> SgxResult<&'a mut T> {
    if pms.is_null() || (pms as usize) % mem::align_of::<T>() != 0 {
        return Err(SgxStatus::InvalidParameter);
    }
    Ok(&mut *(pms as *mut T))
}

/// Copies an `[in]` buffer of `len` bytes into enclave memory.
///
/// # Safety
///
/// A non-null `ptr` must be readable for `len` bytes.
pub unsafe fn copy_in(ptr: *const u8, len: usize, max_len: usize) -> SgxResult<Vec<u8>> {
    if len > max_len {
        return Err(SgxStatus::InvalidParameter);
    }
    if len == 0 {
        return Ok(Vec::new());
    }
    if ptr.is_null() {
        return Err(SgxStatus::InvalidParameter);
    }

    Ok(std::slice::from_raw_parts(ptr, len).to_vec())
}

/// Writes an `[out]` value back to host memory.
///
/// # Safety
///
/// A non-null `dst` must be writable for one `T`.
pub unsafe fn copy_out<T: Copy>(dst: *mut T, value: &T) -> SgxResult<()> {
    if dst.is_null() {
        return Err(SgxStatus::InvalidParameter);
    }
    ptr::write_unaligned(dst, *value);
    Ok(())
}
