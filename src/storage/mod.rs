use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use crate::export::ExportPayload;
use thiserror::Error;

const EXPORT_PREFIX: &str = "cropped-";
const EXPORT_EXTENSION: &str = "png";
const PICTURES_SUBDIR: &str = "Pictures";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("missing HOME environment variable")]
    MissingHomeDirectory,
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

pub type StorageResult<T> = std::result::Result<T, StorageError>;

/// Destination for finished exports (the "download" step).
pub trait ExportSink {
    fn save_export(&self, payload: &ExportPayload) -> StorageResult<PathBuf>;
}

#[derive(Debug, Clone)]
pub struct StorageService {
    output_dir: PathBuf,
}

impl StorageService {
    pub const fn with_output_dir(output_dir: PathBuf) -> Self {
        Self { output_dir }
    }

    pub fn with_default_paths() -> StorageResult<Self> {
        let home = std::env::var("HOME").map_err(|_| StorageError::MissingHomeDirectory)?;
        let mut output_dir = PathBuf::from(home);
        output_dir.push(PICTURES_SUBDIR);
        Ok(Self::with_output_dir(output_dir))
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn allocate_target_path(&self, created_at: SystemTime) -> PathBuf {
        let mut path = self.output_dir.clone();
        path.push(export_file_name(created_at));
        path
    }

    pub fn save_export_at(
        &self,
        payload: &ExportPayload,
        created_at: SystemTime,
    ) -> StorageResult<PathBuf> {
        let target = self.allocate_target_path(created_at);
        write_overwrite(&target, &payload.png)?;
        tracing::info!(path = %target.display(), bytes = payload.png.len(), "saved export");
        Ok(target)
    }
}

impl ExportSink for StorageService {
    fn save_export(&self, payload: &ExportPayload) -> StorageResult<PathBuf> {
        self.save_export_at(payload, SystemTime::now())
    }
}

/// `cropped-<unix millis>.png`
pub fn export_file_name(created_at: SystemTime) -> String {
    let millis = created_at
        .duration_since(SystemTime::UNIX_EPOCH)
        .unwrap_or(Duration::ZERO)
        .as_millis();
    format!("{EXPORT_PREFIX}{millis}.{EXPORT_EXTENSION}")
}

fn write_overwrite(destination: &Path, bytes: &[u8]) -> StorageResult<()> {
    if let Some(parent) = destination.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(destination, bytes)?;
    Ok(())
}
