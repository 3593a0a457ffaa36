use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::Document;
use crate::store::StorageBackend;

/// Writes an empty document unless one exists already.
pub fn run<B: StorageBackend>(backend: &B, data_dir: &str) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    if backend.document_exists() {
        result.add_message(CmdMessage::info("Document already exists, nothing to do"));
        return Ok(result);
    }

    backend.save_document(&Document::new(data_dir))?;
    tracing::info!(%data_dir, "document initialized");
    result.add_message(CmdMessage::success(format!(
        "Initialized empty document (status files in {})",
        data_dir
    )));
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::mem_backend::MemBackend;
    use crate::store::TeacherStore;
    use crate::test_utils::fixtures;

    #[test]
    fn creates_empty_document() {
        let backend = MemBackend::new();
        run(&backend, "data/students").unwrap();

        let store = TeacherStore::open(backend).unwrap();
        assert!(store.document().teachers.is_empty());
        assert!(store.index().is_empty());
        assert_eq!(store.document().data_dir, "data/students");
    }

    #[test]
    fn leaves_existing_document_alone() {
        let backend = fixtures::backend();
        let result = run(&backend, "elsewhere").unwrap();

        assert_eq!(result.messages[0].content, "Document already exists, nothing to do");
        assert_eq!(backend.load_document().unwrap(), fixtures::document());
    }
}
