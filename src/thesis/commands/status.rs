use crate::commands::helpers::require_teacher;
use crate::commands::{CmdMessage, CmdResult, StatusLine, StatusView};
use crate::error::{Result, ThesisError};
use crate::store::{StorageBackend, TeacherStore};

/// Sets one status value of a student.
///
/// Only the status file is written; the root document and the index are left
/// alone. For shared access this writes the file both teachers see.
pub fn change<B: StorageBackend>(
    store: &TeacherStore<B>,
    teacher: &str,
    student: &str,
    key: &str,
    value: &str,
) -> Result<CmdResult> {
    let doc = store.document();
    require_teacher(doc, teacher)?;
    let record = doc
        .record(teacher, student)
        .ok_or_else(|| ThesisError::StudentNotFound(student.to_string()))?;
    if !doc.statuses.contains_key(key) {
        return Err(ThesisError::StatusNotFound(key.to_string()));
    }

    let mut status = store.load_status(&record.file)?;
    status.insert(key.to_string(), value.to_string());
    store.save_status(&record.file, &status)?;
    tracing::info!(%teacher, %student, %key, "status changed");

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "{}: {} = {}",
        student, doc.statuses[key], value
    )));
    Ok(result)
}

/// Status values of a student in schema order, followed by keys the schema
/// no longer knows.
pub fn show<B: StorageBackend>(
    store: &TeacherStore<B>,
    teacher: &str,
    student: &str,
) -> Result<CmdResult> {
    let (_, path, status) = store.student_file_data(teacher, student)?;
    let schema = &store.document().statuses;

    let mut lines: Vec<StatusLine> = schema
        .iter()
        .map(|(key, label)| StatusLine {
            key: key.clone(),
            label: label.clone(),
            value: status.get(key).cloned().unwrap_or_default(),
        })
        .collect();
    lines.extend(
        status
            .iter()
            .filter(|(key, _)| !schema.contains_key(key.as_str()))
            .map(|(key, value)| StatusLine {
                key: key.clone(),
                label: key.clone(),
                value: value.clone(),
            }),
    );

    Ok(CmdResult::default().with_status(StatusView {
        teacher: teacher.to_string(),
        student: student.to_string(),
        path,
        lines,
    }))
}

/// Drops a key from the status schema. Status files keep their old value
/// until they are rewritten.
pub fn remove_key<B: StorageBackend>(store: &mut TeacherStore<B>, key: &str) -> Result<CmdResult> {
    let mut staged = store.document().clone();
    let Some(label) = staged.statuses.shift_remove(key) else {
        return Err(ThesisError::StatusNotFound(key.to_string()));
    };
    store.commit(staged)?;
    tracing::info!(%key, "status key removed");

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Status removed: {} ({})",
        key, label
    )));
    Ok(result)
}
