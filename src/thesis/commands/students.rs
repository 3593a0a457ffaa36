use crate::commands::helpers::{clean_name, new_status_file, require_teacher};
use crate::commands::{CmdMessage, CmdResult, RemovedStudent};
use crate::error::{Result, ThesisError};
use crate::fuzzy::fuzzy_matches;
use crate::index::StudentId;
use crate::model::{NewStudent, StudentRecord};
use crate::store::{StorageBackend, TeacherStore};

/// Adds a student under `teacher` and creates their status file with every
/// status key empty. Student names are unique across all teachers.
pub fn add<B: StorageBackend>(
    store: &mut TeacherStore<B>,
    teacher: &str,
    student: NewStudent,
) -> Result<CmdResult> {
    let doc = store.document();
    require_teacher(doc, teacher)?;
    let name = clean_name(&student.name, "Student")?;
    if doc.has_student(&name) {
        return Err(ThesisError::Conflict(format!(
            "Student is already registered: {}",
            name
        )));
    }

    let file = new_status_file(store, doc, teacher, &name)?;
    store.save_status(&file, &doc.blank_status())?;

    let mut staged = doc.clone();
    staged.teachers[teacher].insert(
        name.clone(),
        StudentRecord::new(file.clone(), student.group.trim(), student.work.trim()),
    );

    store.commit_with_files(staged, &[&file])?;
    tracing::info!(%teacher, student = %name, %file, "student added");

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Student added: {} ({})",
        name, teacher
    )));
    Ok(result)
}

/// Removes a student found by name.
///
/// Without `teacher`, the first student in id order whose name equals `query`
/// (`full_match`) or is within `max_edits` edits of it, as a whole or in any
/// single word, is removed. With `teacher`, `query` must be the exact name of
/// one of that teacher's students.
///
/// Shared access entries are removed without touching the status file. For a
/// regular entry the status file is deleted after the document is committed;
/// a failed delete is logged and does not fail the removal.
pub fn remove_by_name<B: StorageBackend>(
    store: &mut TeacherStore<B>,
    query: &str,
    full_match: bool,
    teacher: Option<&str>,
    max_edits: usize,
) -> Result<CmdResult> {
    let doc = store.document();
    let index = store.index();

    let (teacher, student) = match teacher {
        None => {
            let matched = index
                .student_names()
                .iter()
                .find(|candidate| {
                    if full_match {
                        candidate.as_str() == query
                    } else {
                        fuzzy_matches(query, candidate, max_edits)
                    }
                })
                .ok_or_else(|| ThesisError::StudentNotFound(query.to_string()))?;
            let owner = index
                .student_id_of(matched)
                .and_then(|id| index.teacher_of_student(id))
                .and_then(|id| index.teacher_name(id))
                .ok_or_else(|| {
                    ThesisError::InvalidState(format!("No teacher found for {}", matched))
                })?;
            (owner.to_string(), matched.clone())
        }
        Some(teacher) => {
            require_teacher(doc, teacher)?;
            if doc.record(teacher, query).is_none() {
                return Err(ThesisError::StudentNotFound(format!(
                    "{} is not a student of {}",
                    query, teacher
                )));
            }
            (teacher.to_string(), query.to_string())
        }
    };

    let mut staged = doc.clone();
    let record = staged.teachers[teacher.as_str()]
        .shift_remove(&student)
        .ok_or_else(|| ThesisError::StudentNotFound(student.clone()))?;

    let mut result = CmdResult::default();

    if record.is_duplicate() {
        store.commit(staged)?;
        tracing::info!(%teacher, %student, "shared access removed");
        result.add_message(CmdMessage::success(format!(
            "Shared access removed: {} ({})",
            student, teacher
        )));
        result.removed.push(RemovedStudent {
            teacher,
            name: student,
            record,
            status_path: None,
            status: None,
        });
        return Ok(result);
    }

    let status_path = store.status_path(&record.file);
    let status = match store.backend.read_status(&doc.data_dir, &record.file) {
        Ok(status) => status,
        Err(e) => {
            tracing::warn!(file = %record.file, error = %e, "unreadable status file");
            None
        }
    };

    let dangling: Vec<String> = staged
        .teachers
        .iter()
        .filter(|(_, students)| {
            students
                .get(&student)
                .and_then(|r| r.duplicate.as_ref())
                .is_some_and(|link| link.teacher == teacher)
        })
        .map(|(name, _)| name.clone())
        .collect();

    store.commit(staged)?;
    let deleted = store.delete_status_best_effort(&record.file);
    tracing::info!(%teacher, %student, file = %record.file, "student removed");

    result.add_message(CmdMessage::success(format!(
        "Student removed: {} ({})",
        student, teacher
    )));
    if !deleted {
        result.add_message(CmdMessage::warning(format!(
            "Status file could not be deleted: {}",
            status_path.display()
        )));
    }
    if !dangling.is_empty() {
        tracing::warn!(%student, teachers = ?dangling, "shared access left without its origin");
        result.add_message(CmdMessage::warning(format!(
            "Shared access to {} is left without its origin for: {}",
            student,
            dangling.join(", ")
        )));
    }
    result.removed.push(RemovedStudent {
        teacher,
        name: student,
        record,
        status_path: Some(status_path),
        status,
    });
    Ok(result)
}

/// Removes the entry behind `id`. For a shared student this is the entry of
/// the teacher the id belongs to.
pub fn remove_by_id<B: StorageBackend>(
    store: &mut TeacherStore<B>,
    id: StudentId,
    max_edits: usize,
) -> Result<CmdResult> {
    let index = store.index();
    let student = index
        .student_name(id)
        .ok_or_else(|| ThesisError::StudentNotFound(id.to_string()))?
        .to_string();
    let teacher = index
        .teacher_of_student(id)
        .and_then(|t| index.teacher_name(t))
        .map(str::to_string);

    remove_by_name(store, &student, true, teacher.as_deref(), max_edits)
}
