use crate::{
    error::{FrameHostError, Result},
    urts::SgxEnclave,
};
use frame_config::{ENCLAVE_PARAMS_DIR, ENCLAVE_TOKEN};
use frame_types::{EnclaveImage, LaunchToken, LAUNCH_TOKEN_SIZE};
use std::{
    fs,
    io::{BufReader, BufWriter, Read, Write},
    path::{Path, PathBuf},
};
use tracing::{info, warn};

/// Directory holding the cached launch token.
pub struct EnclaveDir(PathBuf);

impl EnclaveDir {
    pub fn new() -> Self {
        EnclaveDir(ENCLAVE_PARAMS_DIR.to_path_buf())
    }

    pub fn with_path<P: Into<PathBuf>>(path: P) -> Self {
        EnclaveDir(path.into())
    }

    /// Loads `image`, reusing the cached launch token when it is still valid
    /// and refreshing the cache when the runtime issued a new one.
    pub fn init_enclave(&self, image: Box<dyn EnclaveImage>, is_debug: bool) -> Result<SgxEnclave> {
        let token_file_path = self.get_token_file_path();
        let mut launch_token = Self::get_launch_token(&token_file_path);

        let mut launch_token_updated = 0;
        let enclave = SgxEnclave::create(
            image,
            is_debug,
            &mut launch_token,
            &mut launch_token_updated,
        )
        .map_err(|status| FrameHostError::CreateEnclave { status })?;
        info!("Enclave {} is initialized", enclave.geteid());

        // If launch token is updated, save it as token file.
        if launch_token_updated != 0 {
            if let Err(e) = self.save_launch_token(&token_file_path, &launch_token) {
                warn!(
                    "Failed to save launch token to {:?}: {}",
                    token_file_path, e
                );
            }
        }

        Ok(enclave)
    }

    fn get_token_file_path(&self) -> PathBuf {
        self.0.join(ENCLAVE_TOKEN)
    }

    fn get_launch_token<P: AsRef<Path>>(path: P) -> LaunchToken {
        let path = path.as_ref();
        let mut buf = vec![];
        let mut res = [0u8; LAUNCH_TOKEN_SIZE];

        match fs::File::open(path) {
            Ok(f) => {
                let mut reader = BufReader::new(f);
                match reader.read_to_end(&mut buf) {
                    Ok(_) if buf.len() == LAUNCH_TOKEN_SIZE => res.copy_from_slice(&buf[..]),
                    Ok(0) => {}
                    Ok(_) => warn!("Invalid launch token read from {:?}", path),
                    Err(e) => warn!("Failed to read launch token from {:?}: {}", path, e),
                }
            }
            Err(_) => info!("No launch token file. Will create one."),
        }

        res
    }

    fn save_launch_token<P: AsRef<Path>>(&self, path: P, launch_token: &LaunchToken) -> Result<()> {
        fs::create_dir_all(&self.0)?;
        let f = fs::File::create(path)?;
        let mut writer = BufWriter::new(f);
        writer.write_all(&launch_token[..])?;
        writer.flush()?;

        Ok(())
    }
}

impl Default for EnclaveDir {
    fn default() -> Self {
        Self::new()
    }
}
