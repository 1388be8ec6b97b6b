//! File access for the JSON document and the single writer.

pub mod write_actor;

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::{debug, info};
use patrimoine_core::Result;

use crate::errors::{IntoCore, StorageError};
use crate::possessions::PossessionsDocument;

pub use write_actor::{spawn_writer, WriteHandle};

/// Location of the JSON document holding every possession.
#[derive(Debug, Clone)]
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads a fresh snapshot from disk.
    ///
    /// A missing or empty file is an empty document.
    pub fn load(&self) -> Result<PossessionsDocument> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("{} does not exist yet, using an empty document", self.path.display());
                return Ok(PossessionsDocument::default());
            }
            Err(e) => return Err(StorageError::from(e).into()),
        };
        if contents.trim().is_empty() {
            return Ok(PossessionsDocument::default());
        }
        serde_json::from_str(&contents).into_core()
    }

    /// Writes the document next to the target and renames it into place, so a
    /// reader never observes a partially written file.
    pub fn save(&self, document: &PossessionsDocument) -> Result<()> {
        let json = serde_json::to_string_pretty(document).into_core()?;
        let tmp_path = self.tmp_path();
        fs::write(&tmp_path, json).into_core()?;
        fs::rename(&tmp_path, &self.path).into_core()?;
        debug!(
            "Saved {} possessions to {}",
            document.possessions.len(),
            self.path.display()
        );
        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let mut file_name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "data.json".into());
        file_name.push(".tmp");
        self.path.with_file_name(file_name)
    }
}

/// Prepares the data file at `path`: creates missing parent directories and
/// an empty document if the file does not exist, then checks it parses.
pub fn init(path: impl AsRef<Path>) -> Result<JsonStore> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).into_core()?;
    }

    let store = JsonStore::new(path);
    if !path.exists() {
        info!("Creating empty data file at {}", path.display());
        store.save(&PossessionsDocument::default())?;
    }

    let document = store.load()?;
    info!(
        "Data file {} holds {} possessions",
        path.display(),
        document.possessions.len()
    );
    Ok(store)
}
