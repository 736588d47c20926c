use frame_config::ENCLAVE_DATA_FILE;
use std::{
    fs::{File, OpenOptions},
    io::{self, BufWriter, Read, Write},
    path::{Path, PathBuf},
};
use tracing::{debug, info};

/// The file the enclave persists its sealed key to. The blob is stored raw,
/// without any header.
#[derive(Debug, Clone)]
pub struct SealedDataStore {
    path: PathBuf,
}

impl SealedDataStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        SealedDataStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn save(&self, sealed_data: &[u8]) -> io::Result<()> {
        info!("Saving sealed data to {:?}", self.path);
        let file = create_file(&self.path)?;
        let mut writer = BufWriter::new(file);
        writer.write_all(sealed_data)?;
        writer.flush()?;
        writer.get_ref().sync_all()?;

        Ok(())
    }

    /// Fills `buf` from the start of the file. A missing or shorter file is
    /// an error.
    pub fn load_into(&self, buf: &mut [u8]) -> io::Result<()> {
        debug!("Loading sealed data from {:?}", self.path);
        let mut file = File::open(&self.path)?;
        file.read_exact(buf)
    }
}

impl Default for SealedDataStore {
    fn default() -> Self {
        Self::new(ENCLAVE_DATA_FILE.clone())
    }
}

#[cfg(unix)]
fn create_file(path: &Path) -> io::Result<File> {
    use std::os::unix::fs::OpenOptionsExt;
    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)
}

#[cfg(not(unix))]
fn create_file(path: &Path) -> io::Result<File> {
    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
}
