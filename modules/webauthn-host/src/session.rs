//! One interactive signing session over a console.
//!
//! The session loads the enclave, prints its public key, reads the client
//! JSON and the hex encoded data to sign, prints the resulting signature and
//! destroys the enclave again. Any failure aborts the session after the
//! enclave, if created, has been destroyed.

use crate::{codec, ecalls, error::SessionError, ocalls::EnclaveOcalls};
use frame_config::{CLIENT_DATA_JSON_SIZE, DATA_TO_SIGN_SIZE};
use frame_host::{EcallResultExt, EnclaveDir, SgxEnclave};
use frame_types::{Ec256Public, Ec256Signature, EnclaveImage};
use std::io::{BufRead, Read, Write};
use tracing::{debug, error, info};
use webauthn_ecall_types::Ecall;

pub type Result<T> = std::result::Result<T, SessionError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Uninitialized,
    ContextReady,
    PublicKeyObtained,
    InputCollected,
    Signed,
    TornDown,
    Aborted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignedRequest {
    pub public_key: Ec256Public,
    pub signature: Ec256Signature,
}

pub struct Session<R, W> {
    input: R,
    output: W,
    enclave_dir: EnclaveDir,
    ocalls: EnclaveOcalls,
    is_debug: bool,
    state: SessionState,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(
        input: R,
        output: W,
        enclave_dir: EnclaveDir,
        ocalls: EnclaveOcalls,
        is_debug: bool,
    ) -> Self {
        Session {
            input,
            output,
            enclave_dir,
            ocalls,
            is_debug,
            state: SessionState::Uninitialized,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Runs the whole session against `image`. On failure the abort message
    /// has already been written to the console.
    pub fn run(&mut self, image: Box<dyn EnclaveImage>) -> Result<SignedRequest> {
        let res = self
            .enclave_dir
            .init_enclave(image, self.is_debug)
            .map_err(SessionError::InitEnclave)
            .and_then(|enclave| {
                self.state = SessionState::ContextReady;
                let res = self.sign_request(&enclave);
                enclave.destroy();
                res
            });

        match res {
            Ok(signed) => {
                self.state = SessionState::TornDown;
                info!("Session finished");
                Ok(signed)
            }
            Err(err) => {
                self.state = SessionState::Aborted;
                error!("Session aborted: {}", err);
                // the console may be the very thing that failed
                let _ = self
                    .output
                    .write_all(err.console_message().as_bytes())
                    .and_then(|_| self.output.flush());
                Err(err)
            }
        }
    }

    fn sign_request(&mut self, enclave: &SgxEnclave) -> Result<SignedRequest> {
        let console = self.ocalls.with_console(&mut self.output);
        let public_key = ecalls::get_public_key(enclave, &console)
            .into_host_result("get_public_key", Ecall::GetPublicKey as u32)
            .map_err(SessionError::PublicKey)?;
        drop(console);
        self.state = SessionState::PublicKeyObtained;

        writeln!(self.output, "Public Key:")?;
        writeln!(self.output, "gx: {}", codec::to_be_hex(&public_key.gx))?;
        writeln!(self.output, "gy: {}", codec::to_be_hex(&public_key.gy))?;
        write!(self.output, "\n\n")?;

        writeln!(self.output, "Enter client JSON data:")?;
        self.output.flush()?;
        let client_json = self.read_line(CLIENT_DATA_JSON_SIZE)?;
        writeln!(self.output)?;

        // the enclave hashes the JSON up to its first NUL
        let mut client_data = vec![0u8; CLIENT_DATA_JSON_SIZE];
        client_data[..client_json.len()].copy_from_slice(&client_json);

        writeln!(self.output, "Enter hex data to sign:")?;
        self.output.flush()?;
        let data_hex = self.read_line(DATA_TO_SIGN_SIZE)?;
        writeln!(self.output)?;

        let data = codec::hex_to_bytes(&String::from_utf8_lossy(&data_hex));
        if data.is_empty() {
            return Err(SessionError::NoDataToSign);
        }
        debug!("{} bytes to sign", data.len());
        self.state = SessionState::InputCollected;

        let console = self.ocalls.with_console(&mut self.output);
        let signature = ecalls::sign_data(enclave, &console, &data, &client_data)
            .into_host_result("sign_data", Ecall::SignData as u32)
            .map_err(SessionError::Signature)?;
        drop(console);
        drop(data);
        self.state = SessionState::Signed;

        writeln!(
            self.output,
            "Resulting signature: {},{}",
            codec::to_be_hex(&signature.x),
            codec::to_be_hex(&signature.y)
        )?;
        self.output.flush()?;

        Ok(SignedRequest {
            public_key,
            signature,
        })
    }

    /// Reads at most `size - 1` bytes up to and including a newline, then
    /// drops a trailing `\n`. Anything past the limit stays unread.
    fn read_line(&mut self, size: usize) -> Result<Vec<u8>> {
        let mut line = Vec::with_capacity(size);
        let limit = size.saturating_sub(1) as u64;
        (&mut self.input).take(limit).read_until(b'\n', &mut line)?;

        if line.last() == Some(&b'\n') {
            line.pop();
        }
        Ok(line)
    }
}
