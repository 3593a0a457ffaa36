use crate::commands::helpers::require_teacher;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, ThesisError};
use crate::model::DuplicateLink;
use crate::store::{StorageBackend, TeacherStore};

/// Gives `to_teacher` read-through access to a student of `from_teacher`.
///
/// The record is copied with the same `file`, so both teachers see one status
/// file, and is marked with where it came from. Sharing an entry that is
/// itself shared links back to the original owner.
pub fn duplicate_access<B: StorageBackend>(
    store: &mut TeacherStore<B>,
    to_teacher: &str,
    from_teacher: &str,
    student: &str,
) -> Result<CmdResult> {
    let doc = store.document();
    require_teacher(doc, to_teacher)?;
    require_teacher(doc, from_teacher)?;
    if !doc.has_student(student) {
        return Err(ThesisError::StudentNotFound(student.to_string()));
    }
    if doc.record(to_teacher, student).is_some() {
        return Err(ThesisError::Conflict(format!(
            "{} is already linked to {}",
            student, to_teacher
        )));
    }
    let source = doc.record(from_teacher, student).ok_or_else(|| {
        ThesisError::StudentNotFound(format!("{} is not a student of {}", student, from_teacher))
    })?;

    let mut shared = source.clone();
    shared.duplicate = Some(source.duplicate.clone().unwrap_or_else(|| DuplicateLink {
        teacher: from_teacher.to_string(),
        student: student.to_string(),
    }));

    let mut staged = doc.clone();
    staged.teachers[to_teacher].insert(student.to_string(), shared);
    store.commit(staged)?;
    tracing::info!(%student, from = %from_teacher, to = %to_teacher, "access shared");

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "{} now also sees {} (shared by {})",
        to_teacher, student, from_teacher
    )));
    Ok(result)
}
