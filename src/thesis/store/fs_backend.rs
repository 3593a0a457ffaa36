use super::StorageBackend;
use crate::error::{Result, ThesisError};
use crate::model::{Document, StatusRecord};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

pub struct FsBackend {
    document_path: PathBuf,
    base_dir: PathBuf,
}

impl FsBackend {
    /// `base_dir` is the directory the document's `data_dir` is relative to.
    pub fn new(document_path: PathBuf, base_dir: PathBuf) -> Self {
        Self {
            document_path,
            base_dir,
        }
    }

    fn ensure_dir(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path).map_err(ThesisError::Io)?;
        }
        Ok(())
    }

    /// Writes to a temporary sibling and renames it over the target so a
    /// reader never sees a half-written file.
    fn write_json_atomic<T: Serialize>(&self, target: &Path, value: &T) -> Result<()> {
        let dir = target
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        self.ensure_dir(&dir)?;

        let content = serde_json::to_string_pretty(value).map_err(ThesisError::Serialization)?;
        let tmp = dir.join(format!(".thesis-{}.tmp", Uuid::new_v4()));
        fs::write(&tmp, content).map_err(ThesisError::Io)?;
        if let Err(e) = fs::rename(&tmp, target) {
            let _ = fs::remove_file(&tmp);
            return Err(ThesisError::Io(e));
        }
        Ok(())
    }
}

impl StorageBackend for FsBackend {
    fn load_document(&self) -> Result<Document> {
        if !self.document_path.exists() {
            return Err(ThesisError::DocumentNotFound(self.document_path.clone()));
        }
        let content = fs::read_to_string(&self.document_path).map_err(ThesisError::Io)?;
        let doc: Document = serde_json::from_str(&content).map_err(ThesisError::Serialization)?;
        Ok(doc)
    }

    fn save_document(&self, doc: &Document) -> Result<()> {
        self.write_json_atomic(&self.document_path, doc)
    }

    fn document_exists(&self) -> bool {
        self.document_path.exists()
    }

    fn read_status(&self, data_dir: &str, file: &str) -> Result<Option<StatusRecord>> {
        let path = self.status_path(data_dir, file);
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(path).map_err(ThesisError::Io)?;
        let record: StatusRecord =
            serde_json::from_str(&content).map_err(ThesisError::Serialization)?;
        Ok(Some(record))
    }

    fn write_status(&self, data_dir: &str, file: &str, record: &StatusRecord) -> Result<()> {
        self.write_json_atomic(&self.status_path(data_dir, file), record)
    }

    fn delete_status(&self, data_dir: &str, file: &str) -> Result<()> {
        fs::remove_file(self.status_path(data_dir, file)).map_err(ThesisError::Io)
    }

    fn status_exists(&self, data_dir: &str, file: &str) -> bool {
        self.status_path(data_dir, file).exists()
    }

    fn status_path(&self, data_dir: &str, file: &str) -> PathBuf {
        self.base_dir.join(data_dir).join(file)
    }
}
