use crate::{ocalls_in, set_env_vars, verifying_key, verify_webauthn};
use frame_host::{urts, EnclaveDir};
use frame_types::{EnclaveImage, Measurement, OcallTable, SgxStatus};
use std::{ffi::c_void, io::Cursor, path::Path};
use webauthn_enclave::WebauthnEnclave;
use webauthn_host::{codec, Session, SessionError, SessionState, SignedRequest};

const CLIENT_JSON: &str = r#"{"type":"webauthn.get","challenge":"dGVzdA","origin":"https://example.com"}"#;

type ConsoleSession = Session<Cursor<Vec<u8>>, Vec<u8>>;

fn new_session(dir: &Path, input: &str) -> ConsoleSession {
    Session::new(
        Cursor::new(input.as_bytes().to_vec()),
        Vec::new(),
        EnclaveDir::with_path(dir),
        ocalls_in(dir),
        true,
    )
}

fn run(
    dir: &Path,
    input: &str,
    image: Box<dyn EnclaveImage>,
) -> (Result<SignedRequest, SessionError>, SessionState, String) {
    let mut session = new_session(dir, input);
    let res = session.run(image);
    let state = session.state();
    let output = String::from_utf8(session.into_output()).unwrap();
    (res, state, output)
}

/// An enclave whose platform went away under it.
struct LostEnclave;

impl EnclaveImage for LostEnclave {
    fn nr_ecall(&self) -> usize {
        2
    }

    fn measurement(&self) -> Measurement {
        [0u8; 32]
    }

    unsafe fn ecall(&self, _index: u32, _ocalls: &dyn OcallTable, _pms: *mut c_void) -> SgxStatus {
        SgxStatus::EnclaveLost
    }
}

/// Tears its own enclave down from inside the first ecall.
struct VanishingEnclave;

impl EnclaveImage for VanishingEnclave {
    fn nr_ecall(&self) -> usize {
        2
    }

    fn measurement(&self) -> Measurement {
        [1u8; 32]
    }

    unsafe fn ecall(&self, _index: u32, _ocalls: &dyn OcallTable, _pms: *mut c_void) -> SgxStatus {
        match urts::current_eid() {
            Some(eid) => urts::destroy_enclave(eid),
            None => SgxStatus::Unexpected,
        }
    }
}

/// An image without any ecall cannot be loaded.
struct EmptyImage;

impl EnclaveImage for EmptyImage {
    fn nr_ecall(&self) -> usize {
        0
    }

    fn measurement(&self) -> Measurement {
        [0u8; 32]
    }

    unsafe fn ecall(&self, _index: u32, _ocalls: &dyn OcallTable, _pms: *mut c_void) -> SgxStatus {
        SgxStatus::InvalidFunction
    }
}

#[test]
fn test_sign_request() {
    set_env_vars();
    let tmp_dir = tempfile::tempdir().unwrap();
    let input = format!("{}\n0a1b\n", CLIENT_JSON);

    let (res, state, output) = run(tmp_dir.path(), &input, Box::new(WebauthnEnclave::new()));
    let signed = res.unwrap();
    assert_eq!(state, SessionState::TornDown);

    let gx = codec::to_be_hex(&signed.public_key.gx);
    let gy = codec::to_be_hex(&signed.public_key.gy);
    let sig_x = codec::to_be_hex(&signed.signature.x);
    let sig_y = codec::to_be_hex(&signed.signature.y);
    assert_eq!(gx.len(), 64);
    assert_eq!(sig_x.len(), 64);

    let expected = format!(
        "Generated a new enclave key pair\nPublic Key:\ngx: {}\ngy: {}\n\n\nEnter client JSON data:\n\nEnter hex data to sign:\n\nResulting signature: {},{}\n",
        gx, gy, sig_x, sig_y
    );
    assert_eq!(output, expected);

    let r_s = codec::hex_to_bytes(&format!("{}{}", sig_x, sig_y));
    assert!(verify_webauthn(
        &verifying_key(&signed.public_key),
        &[0x0a, 0x1b],
        CLIENT_JSON.as_bytes(),
        &r_s
    ));
}

#[test]
fn test_signing_is_deterministic() {
    set_env_vars();
    let tmp_dir = tempfile::tempdir().unwrap();
    let input = format!("{}\ndeadbeef\n", CLIENT_JSON);

    let (first, _, first_output) = run(tmp_dir.path(), &input, Box::new(WebauthnEnclave::new()));
    let (second, _, second_output) =
        run(tmp_dir.path(), &input, Box::new(WebauthnEnclave::new()));
    let first = first.unwrap();
    assert_eq!(first, second.unwrap());
    assert!(first_output.starts_with("Generated a new enclave key pair\n"));
    // the second session unseals the key instead
    assert!(second_output.starts_with("Public Key:\n"));

    let (other, _, _) = run(
        tmp_dir.path(),
        &format!("{}\ndeadbeee\n", CLIENT_JSON),
        Box::new(WebauthnEnclave::new()),
    );
    let other = other.unwrap();
    assert_eq!(other.public_key, first.public_key);
    assert_ne!(other.signature, first.signature);
}

#[test]
fn test_odd_hex_aborts_before_signing() {
    set_env_vars();
    let tmp_dir = tempfile::tempdir().unwrap();
    let input = format!("{}\n0a1\n", CLIENT_JSON);

    let (res, state, output) = run(tmp_dir.path(), &input, Box::new(WebauthnEnclave::new()));
    let err = res.unwrap_err();
    assert!(matches!(err, SessionError::NoDataToSign));
    assert_eq!(err.exit_code(), -1);
    assert_eq!(state, SessionState::Aborted);
    assert!(output.ends_with("Enter hex data to sign:\n\nError receiving data to sign!\n"));
    assert!(!output.contains("Resulting signature"));
}

#[test]
fn test_empty_input_aborts() {
    set_env_vars();
    let tmp_dir = tempfile::tempdir().unwrap();

    let (res, state, output) = run(tmp_dir.path(), "", Box::new(WebauthnEnclave::new()));
    assert!(matches!(res, Err(SessionError::NoDataToSign)));
    assert_eq!(state, SessionState::Aborted);
    assert!(output.starts_with("Generated a new enclave key pair\nPublic Key:\n"));
}

#[test]
fn test_lost_enclave_aborts_without_prompting() {
    set_env_vars();
    let tmp_dir = tempfile::tempdir().unwrap();
    let input = format!("{}\n0a1b\n", CLIENT_JSON);

    let (res, state, output) = run(tmp_dir.path(), &input, Box::new(LostEnclave));
    let err = res.unwrap_err();
    assert!(matches!(err, SessionError::PublicKey(_)));
    assert_eq!(err.exit_code(), -1);
    assert_eq!(state, SessionState::Aborted);
    assert_eq!(
        output,
        "Info: Please refer to the sample \"PowerTransition\" for details.\nError: Power transition occurred.\nApp Error: 4!\n"
    );
}

#[test]
fn test_destroyed_enclave_aborts_without_prompting() {
    set_env_vars();
    let tmp_dir = tempfile::tempdir().unwrap();
    let input = format!("{}\n0a1b\n", CLIENT_JSON);

    let (res, state, output) = run(tmp_dir.path(), &input, Box::new(VanishingEnclave));
    let err = res.unwrap_err();
    assert!(matches!(err, SessionError::PublicKey(_)));
    assert_eq!(err.exit_code(), -1);
    assert_eq!(state, SessionState::Aborted);
    assert_eq!(
        output,
        "Error: Invalid enclave identification.\nApp Error: 8194!\n"
    );
}

#[test]
fn test_unloadable_image() {
    set_env_vars();
    let tmp_dir = tempfile::tempdir().unwrap();

    let (res, state, output) = run(tmp_dir.path(), "{}\n0a1b\n", Box::new(EmptyImage));
    assert!(matches!(res, Err(SessionError::InitEnclave(_))));
    assert_eq!(state, SessionState::Aborted);
    assert_eq!(
        output,
        "Error: Invalid enclave metadata.\nFailed to initialize enclave!\n"
    );
}
