#[macro_use]
extern crate clap;

use clap::{App, Arg, ArgMatches};
use frame_config::{ENCLAVE_DATA_FILE, ENCLAVE_DEBUG};
use frame_host::EnclaveDir;
use std::{io, path::PathBuf, process};
use tracing_subscriber::EnvFilter;
use webauthn_enclave::WebauthnEnclave;
use webauthn_host::{EnclaveOcalls, SealedDataStore, Session};

const SEALED_DATA_ARG: &str = "sealed-data";
const RELEASE_MODE_ARG: &str = "release-mode";

fn main() {
    // stdout carries the console protocol, logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let matches = app_definition().get_matches();
    process::exit(run(&matches));
}

fn app_definition<'a, 'b>() -> App<'a, 'b> {
    App::new("webauthn-app")
        .version(crate_version!())
        .author(crate_authors!())
        .about("Signs WebAuthn requests with a key that never leaves the enclave")
        .arg(
            Arg::with_name(SEALED_DATA_ARG)
                .long(SEALED_DATA_ARG)
                .value_name("FILE")
                .takes_value(true)
                .help("File the sealed enclave key is stored in"),
        )
        .arg(
            Arg::with_name(RELEASE_MODE_ARG)
                .long(RELEASE_MODE_ARG)
                .help("Launches the enclave in production instead of debug mode"),
        )
}

fn run(matches: &ArgMatches) -> i32 {
    let sealed_data = matches
        .value_of(SEALED_DATA_ARG)
        .map(PathBuf::from)
        .unwrap_or_else(|| ENCLAVE_DATA_FILE.clone());
    let is_debug = *ENCLAVE_DEBUG && !matches.is_present(RELEASE_MODE_ARG);

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut session = Session::new(
        stdin.lock(),
        stdout.lock(),
        EnclaveDir::new(),
        EnclaveOcalls::new(SealedDataStore::new(sealed_data)),
        is_debug,
    );

    match session.run(Box::new(WebauthnEnclave::new())) {
        Ok(_) => 0,
        Err(err) => err.exit_code(),
    }
}
