use super::StorageBackend;
use crate::error::{Result, ThesisError};
use crate::model::{Document, StatusRecord};
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::PathBuf;

/// In-memory storage backend for testing.
///
/// The document is kept serialized so every load goes through the same
/// parse step as on disk. Uses `RefCell` since the tracker is single-threaded.
#[derive(Default)]
pub struct MemBackend {
    document: RefCell<Option<String>>,
    statuses: RefCell<HashMap<(String, String), StatusRecord>>,
    simulate_write_error: RefCell<bool>,
    fail_document_writes: RefCell<bool>,
    fail_document_reads: RefCell<bool>,
    locked_files: RefCell<Vec<String>>,
    corrupt_files: RefCell<Vec<String>>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(doc: &Document) -> Result<Self> {
        let backend = Self::new();
        backend.save_document(doc)?;
        Ok(backend)
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        *self.simulate_write_error.borrow_mut() = simulate;
    }

    /// Fails only writes of the root document; status files still work.
    pub fn set_fail_document_writes(&self, fail: bool) {
        *self.fail_document_writes.borrow_mut() = fail;
    }

    /// Fails loads of the root document, as if it became unreadable.
    pub fn set_fail_document_reads(&self, fail: bool) {
        *self.fail_document_reads.borrow_mut() = fail;
    }

    /// Makes writes and deletes of this status file fail, like a permission
    /// error.
    pub fn lock_file(&self, file: &str) {
        self.locked_files.borrow_mut().push(file.to_string());
    }

    /// Makes reads of this status file fail as if it held invalid JSON.
    pub fn corrupt_file(&self, file: &str) {
        self.corrupt_files.borrow_mut().push(file.to_string());
    }

    /// Number of status files currently stored.
    pub fn status_count(&self) -> usize {
        self.statuses.borrow().len()
    }

    fn check_writable(&self) -> Result<()> {
        if *self.simulate_write_error.borrow() {
            return Err(ThesisError::Store("Simulated write error".to_string()));
        }
        Ok(())
    }

    fn check_unlocked(&self, file: &str) -> Result<()> {
        if self.locked_files.borrow().iter().any(|f| f == file) {
            return Err(ThesisError::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                format!("{} is locked", file),
            )));
        }
        Ok(())
    }
}

impl StorageBackend for MemBackend {
    fn load_document(&self) -> Result<Document> {
        if *self.fail_document_reads.borrow() {
            return Err(ThesisError::Store("Simulated document read error".to_string()));
        }
        let raw = self.document.borrow();
        let raw = raw
            .as_deref()
            .ok_or_else(|| ThesisError::DocumentNotFound(PathBuf::from("memory://teachers.json")))?;
        Ok(serde_json::from_str(raw)?)
    }

    fn save_document(&self, doc: &Document) -> Result<()> {
        self.check_writable()?;
        if *self.fail_document_writes.borrow() {
            return Err(ThesisError::Store("Simulated document write error".to_string()));
        }
        let raw = serde_json::to_string(doc)?;
        *self.document.borrow_mut() = Some(raw);
        Ok(())
    }

    fn document_exists(&self) -> bool {
        self.document.borrow().is_some()
    }

    fn read_status(&self, data_dir: &str, file: &str) -> Result<Option<StatusRecord>> {
        if self.corrupt_files.borrow().iter().any(|f| f == file) {
            return serde_json::from_str::<StatusRecord>("{\"ready")
                .map(Some)
                .map_err(ThesisError::from);
        }
        let statuses = self.statuses.borrow();
        Ok(statuses
            .get(&(data_dir.to_string(), file.to_string()))
            .cloned())
    }

    fn write_status(&self, data_dir: &str, file: &str, record: &StatusRecord) -> Result<()> {
        self.check_writable()?;
        self.check_unlocked(file)?;
        self.statuses
            .borrow_mut()
            .insert((data_dir.to_string(), file.to_string()), record.clone());
        Ok(())
    }

    fn delete_status(&self, data_dir: &str, file: &str) -> Result<()> {
        self.check_unlocked(file)?;
        let removed = self
            .statuses
            .borrow_mut()
            .remove(&(data_dir.to_string(), file.to_string()));
        match removed {
            Some(_) => Ok(()),
            None => Err(ThesisError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("{} not found", file),
            ))),
        }
    }

    fn status_exists(&self, data_dir: &str, file: &str) -> bool {
        self.statuses
            .borrow()
            .contains_key(&(data_dir.to_string(), file.to_string()))
    }

    fn status_path(&self, data_dir: &str, file: &str) -> PathBuf {
        PathBuf::from(format!("memory://{}/{}", data_dir, file))
    }
}
