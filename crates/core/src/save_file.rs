//! Single-slot, checksummed JSON save file.
//!
//! The file is one JSON object with `format_version`, `sha256_hex` and
//! `state`. The checksum is `hex(SHA-256(state_json))` where `state_json` is
//! the compact serde_json encoding of the state; every set in the state is
//! ordered, so re-encoding a loaded state reproduces the same bytes.
//!
//! Writes go to a sibling `.tmp` file that is renamed over the slot, so a
//! failed save never leaves a half-written slot behind.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::info;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::{EngineError, LoadError};
use crate::state::SessionState;

pub const SAVE_FORMAT_VERSION: u16 = 1;
pub const SAVE_FILE_NAME: &str = "session.json";

#[derive(Serialize)]
struct SaveFileOut<'a> {
    format_version: u16,
    sha256_hex: String,
    state: &'a SessionState,
}

#[derive(Deserialize)]
struct SaveHeader {
    format_version: u16,
}

#[derive(Deserialize)]
struct SaveFileIn {
    sha256_hex: String,
    state: SessionState,
}

fn state_sha256(state: &SessionState) -> Result<String, serde_json::Error> {
    let body = serde_json::to_string(state)?;
    let digest = Sha256::digest(body.as_bytes());
    Ok(format!("{digest:064x}"))
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SaveSlot {
    path: PathBuf,
}

impl SaveSlot {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The slot file inside `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(SAVE_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    pub fn save(&self, state: &SessionState) -> Result<(), EngineError> {
        self.write_atomic(state)
            .map_err(|source| EngineError::SaveFailed { path: self.path.clone(), source })?;
        info!("saved session to {}", self.path.display());
        Ok(())
    }

    pub fn load(&self) -> Result<SessionState, LoadError> {
        let content = fs::read_to_string(&self.path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => LoadError::NoSave { path: self.path.clone() },
            _ => LoadError::Io(e),
        })?;

        let header: SaveHeader = serde_json::from_str(&content)
            .map_err(|e| LoadError::Malformed { message: e.to_string() })?;
        if header.format_version != SAVE_FORMAT_VERSION {
            return Err(LoadError::UnsupportedVersion { found: header.format_version });
        }

        let file: SaveFileIn = serde_json::from_str(&content)
            .map_err(|e| LoadError::Malformed { message: e.to_string() })?;
        let expected = state_sha256(&file.state)
            .map_err(|e| LoadError::Malformed { message: e.to_string() })?;
        if file.sha256_hex != expected {
            return Err(LoadError::ChecksumMismatch);
        }

        file.state.validate()?;
        info!("loaded session from {}", self.path.display());
        Ok(file.state)
    }

    fn write_atomic(&self, state: &SessionState) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let sha256_hex = state_sha256(state).map_err(io::Error::other)?;
        let file = SaveFileOut { format_version: SAVE_FORMAT_VERSION, sha256_hex, state };
        let json = serde_json::to_string(&file).map_err(io::Error::other)?;

        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, json)?;
        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }
}
