use crate::constants::{DEFAULT_ENCLAVE_DATA_FILE, ENCLAVE_PARAMS_DIR_NAME};
use lazy_static::lazy_static;
use std::{env, path::PathBuf};

lazy_static! {
    pub static ref PJ_ROOT_DIR: PathBuf = env::var("PJ_ROOT_DIR")
        .or_else(|_| env::var("HOME"))
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("."));
    pub static ref ENCLAVE_PARAMS_DIR: PathBuf = {
        let mut params_dir = PJ_ROOT_DIR.clone();
        params_dir.push(ENCLAVE_PARAMS_DIR_NAME);
        params_dir
    };
    pub static ref ENCLAVE_DATA_FILE: PathBuf = env::var("ENCLAVE_DATA_FILE")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_ENCLAVE_DATA_FILE));
    pub static ref ENCLAVE_DEBUG: bool = env::var("ENCLAVE_DEBUG")
        .map(|v| parse_flag(&v))
        .unwrap_or(true);
}

fn parse_flag(value: &str) -> bool {
    !matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "0" | "false" | "no" | "off"
    )
}
