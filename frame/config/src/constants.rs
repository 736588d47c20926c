// filepath
pub const ENCLAVE_PARAMS_DIR_NAME: &str = ".webauthn";
pub const ENCLAVE_TOKEN: &str = "enclave.token";
pub const DEFAULT_ENCLAVE_DATA_FILE: &str = "enclave_data.seal";

// console buffers, including the terminating NUL
pub const CLIENT_DATA_JSON_SIZE: usize = 1024;
pub const DATA_TO_SIGN_SIZE: usize = 256;

// upper bound for any `[in]` buffer copied into the enclave
pub const ECALL_MAX_BUFFER_SIZE: usize = 1 << 20;
