/// Implements `frame_types::EnclaveImage` for an enclave context.
///
/// Every variant of the ecall enum must be listed with its trusted bridge
/// handler, `unsafe fn(&Ctx, &OcallContext, *mut c_void) -> SgxStatus`.
/// The dispatch match is exhaustive, so an unhandled variant does not build.
#[macro_export]
macro_rules! register_ecall {
    (   $ctx: ty,
        $ecall: ty,
        $( ($cmd: path, $handler: path), )*
    ) => {
        impl frame_types::EnclaveImage for $ctx {
            fn nr_ecall(&self) -> usize {
                [$( stringify!($cmd) ),*].len()
            }

            fn measurement(&self) -> frame_types::Measurement {
                <$ctx as $crate::EnclaveIdentity>::measurement(self)
            }

            unsafe fn ecall(
                &self,
                index: u32,
                ocall_table: &dyn frame_types::OcallTable,
                pms: *mut std::ffi::c_void,
            ) -> frame_types::SgxStatus {
                let cmd = match <$ecall as std::convert::TryFrom<u32>>::try_from(index) {
                    Ok(cmd) => cmd,
                    Err(_) => return frame_types::SgxStatus::InvalidFunction,
                };
                let ocalls = $crate::OcallContext::new(ocall_table);
                log::debug!("ecall_entry_point: command: {:?}", cmd);

                match cmd {
                    $(
                        $cmd => $handler(self, &ocalls, pms),
                    )*
                }
            }
        }
    };
}
