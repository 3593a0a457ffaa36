use crate::commands::helpers::{new_status_file, require_teacher};
use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, ThesisError};
use crate::model::{DuplicateLink, StudentRecord};
use crate::store::{StorageBackend, TeacherStore};

/// Moves a student to `to_teacher`.
///
/// The source teacher is `from_teacher` when given, otherwise the student's
/// current owner. The status file is copied under the destination's naming
/// scheme and the old one is deleted once the document is committed. Shared
/// access pointing at the old entry is repointed to the new one.
pub fn transfer<B: StorageBackend>(
    store: &mut TeacherStore<B>,
    student: &str,
    to_teacher: &str,
    from_teacher: Option<&str>,
) -> Result<CmdResult> {
    let doc = store.document();
    let index = store.index();
    require_teacher(doc, to_teacher)?;
    let owner_id = index
        .student_id_of(student)
        .and_then(|id| index.teacher_of_student(id))
        .ok_or_else(|| ThesisError::StudentNotFound(student.to_string()))?;

    let source_teacher = match from_teacher {
        Some(from) => {
            let from_id = index
                .teacher_id_of(from)
                .ok_or_else(|| ThesisError::TeacherNotFound(from.to_string()))?;
            if index.student_id_under(from_id, student).is_none() {
                return Err(ThesisError::StudentNotFound(format!(
                    "{} is not a student of {}",
                    student, from
                )));
            }
            from.to_string()
        }
        None => index
            .teacher_name(owner_id)
            .ok_or_else(|| ThesisError::InvalidState(format!("No teacher found for {}", student)))?
            .to_string(),
    };

    if source_teacher == to_teacher {
        return Err(ThesisError::Conflict(format!(
            "{} already belongs to {}",
            student, to_teacher
        )));
    }
    if doc.record(to_teacher, student).is_some() {
        return Err(ThesisError::Conflict(format!(
            "{} is already linked to {}",
            student, to_teacher
        )));
    }
    let source = doc
        .record(&source_teacher, student)
        .ok_or_else(|| ThesisError::StudentNotFound(student.to_string()))?;
    if source.is_duplicate() {
        return Err(ThesisError::InvalidState(format!(
            "{} is shared with {}, not owned; shared access cannot be transferred",
            student, source_teacher
        )));
    }

    let status = match store.backend.read_status(&doc.data_dir, &source.file)? {
        Some(status) => status,
        None => {
            tracing::warn!(file = %source.file, "status file missing, transferring blank status");
            doc.blank_status()
        }
    };
    let new_file = new_status_file(store, doc, to_teacher, student)?;
    let old_file = source.file.clone();
    let moved = StudentRecord {
        file: new_file.clone(),
        duplicate: None,
        ..source.clone()
    };

    let mut staged = doc.clone();
    staged.teachers[source_teacher.as_str()].shift_remove(student);
    staged.teachers[to_teacher].insert(student.to_string(), moved);
    let mut repointed = 0;
    for record in staged.teachers.values_mut().filter_map(|m| m.get_mut(student)) {
        let points_at_source = record
            .duplicate
            .as_ref()
            .is_some_and(|link| link.teacher == source_teacher);
        if points_at_source {
            record.file = new_file.clone();
            record.duplicate = Some(DuplicateLink {
                teacher: to_teacher.to_string(),
                student: student.to_string(),
            });
            repointed += 1;
        }
    }

    store.save_status(&new_file, &status)?;
    store.commit_with_files(staged, &[&new_file])?;
    let deleted = store.delete_status_best_effort(&old_file);
    tracing::info!(%student, from = %source_teacher, to = %to_teacher, file = %new_file, "student transferred");

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "{} transferred from {} to {}",
        student, source_teacher, to_teacher
    )));
    if repointed > 0 {
        result.add_message(CmdMessage::info(format!(
            "Shared access updated for {} teacher(s)",
            repointed
        )));
    }
    if !deleted {
        result.add_message(CmdMessage::warning(format!(
            "Old status file could not be deleted: {}",
            store.status_path(&old_file).display()
        )));
    }
    Ok(result)
}
