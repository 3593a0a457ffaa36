//! # Storage Layer
//!
//! Two kinds of files make up the on-disk state:
//!
//! 1. **Root document** (`teachers.json`): teachers, their students, the status
//!    schema and the list of groups. See [`crate::model::Document`].
//! 2. **Status files**: one flat `key -> value` JSON object per student, named
//!    by [`crate::naming::status_file_name`] and stored under the document's
//!    `data_dir`.
//!
//! ## Layout
//!
//! ```text
//! <base_dir>/
//! ├── thesis.json                   # Tracker configuration (optional)
//! └── data/students/
//!     ├── teachers.json             # Root document
//!     └── ejler_l__kromin_da.json   # Status file of one student
//! ```
//!
//! ## Split of Responsibilities
//!
//! - [`StorageBackend`] does raw I/O only (filesystem vs memory).
//! - [`TeacherStore`] owns the current [`Snapshot`] and implements
//!   [`TeacherStore::commit`]: the staged document is written, read back from
//!   the backend and re-indexed, so the in-memory state is exactly what a fresh
//!   process would see.
//!
//! ## Concurrency
//!
//! There is no locking. One mutation may be in flight at a time; hosts serving
//! several sessions must serialize all mutations behind a single owner.

use crate::error::Result;
use crate::model::{Document, StatusRecord};
use std::path::PathBuf;

pub mod fs_backend;
pub mod mem_backend;
pub mod teacher_store;

pub use teacher_store::{Snapshot, TeacherStore};

/// Raw persistence of the root document and the status files.
///
/// Status files are addressed by `(data_dir, file)` exactly as they are
/// written in the document.
pub trait StorageBackend {
    // --- Root Document ---

    /// Load and parse the root document.
    /// Fails with `DocumentNotFound` if it does not exist.
    fn load_document(&self) -> Result<Document>;

    /// Serialize and overwrite the root document in one write.
    fn save_document(&self, doc: &Document) -> Result<()>;

    fn document_exists(&self) -> bool;

    // --- Status Files ---

    /// Returns Ok(None) if the file does not exist.
    fn read_status(&self, data_dir: &str, file: &str) -> Result<Option<StatusRecord>>;

    fn write_status(&self, data_dir: &str, file: &str, record: &StatusRecord) -> Result<()>;

    /// Deleting a missing file is an error (`Io` with `NotFound`), callers
    /// decide whether that matters.
    fn delete_status(&self, data_dir: &str, file: &str) -> Result<()>;

    fn status_exists(&self, data_dir: &str, file: &str) -> bool;

    /// Location of a status file. Virtual for in-memory backends.
    fn status_path(&self, data_dir: &str, file: &str) -> PathBuf;
}
