use crate::commands::{StudentEntry, TeacherEntry};
use crate::error::{Result, ThesisError};
use crate::fuzzy::clean_text;
use crate::index::{StudentId, TeacherId};
use crate::model::Document;
use crate::naming::{status_file_name, unique_file_name};
use crate::store::{Snapshot, StorageBackend, TeacherStore};

/// Whitespace-normalized name, or `InvalidInput` if nothing is left.
pub fn clean_name(raw: &str, what: &str) -> Result<String> {
    let name = clean_text(raw);
    if name.is_empty() {
        return Err(ThesisError::InvalidInput(format!("{} name is empty", what)));
    }
    Ok(name)
}

pub fn require_teacher(doc: &Document, teacher: &str) -> Result<()> {
    if doc.has_teacher(teacher) {
        Ok(())
    } else {
        Err(ThesisError::TeacherNotFound(teacher.to_string()))
    }
}

/// Name for a new status file of `student` under `teacher`, avoiding files
/// that exist on the backend or are referenced by `doc`.
pub fn new_status_file<B: StorageBackend>(
    store: &TeacherStore<B>,
    doc: &Document,
    teacher: &str,
    student: &str,
) -> Result<String> {
    let base = status_file_name(teacher, student)?;
    Ok(unique_file_name(&base, |candidate| {
        store.status_exists(candidate)
            || doc
                .teachers
                .values()
                .flat_map(|m| m.values())
                .any(|r| r.file == candidate)
    }))
}

pub fn teacher_entry(snapshot: &Snapshot, id: TeacherId) -> Option<TeacherEntry> {
    let index = snapshot.index();
    let name = index.teacher_name(id)?;
    Some(TeacherEntry {
        id,
        name: name.to_string(),
        student_count: index.students_of(id).len(),
    })
}

pub fn student_entry(snapshot: &Snapshot, id: StudentId) -> Option<StudentEntry> {
    let index = snapshot.index();
    let name = index.student_name(id)?;
    let teacher = index.teacher_name(index.teacher_of_student(id)?)?;
    let record = snapshot.document().record(teacher, name)?.clone();
    Some(StudentEntry {
        id,
        teacher: teacher.to_string(),
        name: name.to_string(),
        record,
    })
}
