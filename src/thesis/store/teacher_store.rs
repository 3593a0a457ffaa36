use super::StorageBackend;
use crate::error::{Result, ThesisError};
use crate::index::Index;
use crate::model::{Document, StatusRecord, StudentRecord};
use std::path::PathBuf;

/// An immutable view of the loaded document and the index derived from it.
#[derive(Debug, Clone)]
pub struct Snapshot {
    document: Document,
    index: Index,
}

impl Snapshot {
    pub fn new(document: Document) -> Self {
        let index = Index::build(&document);
        tracing::debug!(
            teachers = index.teacher_names().len(),
            students = index.student_names().len(),
            "index rebuilt"
        );
        Self { document, index }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn index(&self) -> &Index {
        &self.index
    }
}

/// Owner of the current [`Snapshot`].
///
/// Mutations never touch the snapshot in place: commands clone the document,
/// change the clone and hand it to [`TeacherStore::commit`]. A failed
/// validation or a failed write therefore leaves the previous state intact.
pub struct TeacherStore<B: StorageBackend> {
    /// Exposed as pub(crate) for testing and internal access only.
    pub(crate) backend: B,
    snapshot: Snapshot,
}

impl<B: StorageBackend> TeacherStore<B> {
    /// Loads the document. A store that fails to open has no state to
    /// serve from, so there is no partially loaded variant.
    pub fn open(backend: B) -> Result<Self> {
        let document = backend.load_document()?;
        Ok(Self {
            backend,
            snapshot: Snapshot::new(document),
        })
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn document(&self) -> &Document {
        &self.snapshot.document
    }

    pub fn index(&self) -> &Index {
        &self.snapshot.index
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Re-reads the document from the backend.
    pub fn reload(&mut self) -> Result<&Snapshot> {
        let document = self.backend.load_document()?;
        self.snapshot = Snapshot::new(document);
        Ok(&self.snapshot)
    }

    /// Writes `staged`, then reloads it from the backend as the new
    /// authoritative state and rebuilds the index.
    pub fn commit(&mut self, staged: Document) -> Result<&Snapshot> {
        self.backend.save_document(&staged)?;
        self.adopt(staged)
    }

    /// [`commit`](Self::commit) for a document referencing freshly written
    /// status files. The files are deleted again only if the document could
    /// not be written; once it is on disk they are referenced and stay, even
    /// if the reload fails.
    pub fn commit_with_files(&mut self, staged: Document, new_files: &[&str]) -> Result<&Snapshot> {
        if let Err(e) = self.backend.save_document(&staged) {
            for file in new_files {
                self.delete_status_best_effort(file);
            }
            return Err(e);
        }
        self.adopt(staged)
    }

    fn adopt(&mut self, staged: Document) -> Result<&Snapshot> {
        let reloaded = self.backend.load_document()?;
        if reloaded != staged {
            tracing::warn!("reloaded document differs from the one written");
        }
        tracing::debug!("document committed");
        self.snapshot = Snapshot::new(reloaded);
        Ok(&self.snapshot)
    }

    // --- Status Files ---

    fn data_dir(&self) -> &str {
        &self.snapshot.document.data_dir
    }

    pub fn status_path(&self, file: &str) -> PathBuf {
        self.backend.status_path(self.data_dir(), file)
    }

    pub fn status_exists(&self, file: &str) -> bool {
        self.backend.status_exists(self.data_dir(), file)
    }

    pub fn load_status(&self, file: &str) -> Result<StatusRecord> {
        self.backend
            .read_status(self.data_dir(), file)?
            .ok_or_else(|| {
                ThesisError::Store(format!(
                    "Status file {} is missing",
                    self.status_path(file).display()
                ))
            })
    }

    pub fn save_status(&self, file: &str, record: &StatusRecord) -> Result<()> {
        self.backend.write_status(self.data_dir(), file, record)
    }

    /// Deletes a status file, logging instead of failing. Returns whether the
    /// file is gone.
    pub fn delete_status_best_effort(&self, file: &str) -> bool {
        match self.backend.delete_status(self.data_dir(), file) {
            Ok(()) => true,
            Err(ThesisError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(file, "status file already absent");
                true
            }
            Err(e) => {
                tracing::warn!(file, error = %e, "could not delete status file");
                false
            }
        }
    }

    /// The record of `student` under `teacher` plus the path and contents of
    /// its status file.
    pub fn student_file_data(
        &self,
        teacher: &str,
        student: &str,
    ) -> Result<(StudentRecord, PathBuf, StatusRecord)> {
        let doc = self.document();
        if !doc.has_teacher(teacher) {
            return Err(ThesisError::TeacherNotFound(teacher.to_string()));
        }
        let record = doc
            .record(teacher, student)
            .cloned()
            .ok_or_else(|| ThesisError::StudentNotFound(student.to_string()))?;
        let path = self.status_path(&record.file);
        let status = self.load_status(&record.file)?;
        Ok((record, path, status))
    }
}
