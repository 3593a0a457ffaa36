use crate::commands::helpers::clean_name;
use crate::commands::{CmdMessage, CmdResult, RemovedStudent};
use crate::error::{Result, ThesisError};
use crate::store::{StorageBackend, TeacherStore};

pub fn add<B: StorageBackend>(store: &mut TeacherStore<B>, name: &str) -> Result<CmdResult> {
    let name = clean_name(name, "Teacher")?;
    if store.document().has_teacher(&name) {
        return Err(ThesisError::Conflict(format!(
            "Teacher is already registered: {}",
            name
        )));
    }

    let mut staged = store.document().clone();
    staged.teachers.insert(name.clone(), Default::default());
    store.commit(staged)?;
    tracing::info!(teacher = %name, "teacher added");

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!("Teacher added: {}", name)));
    Ok(result)
}

/// Removes a teacher with all of their student entries. Absent teachers are
/// a no-op.
///
/// Status files are left on disk, and shared access granted from this
/// teacher to others is not revisited; `doctor` reports what is left behind.
pub fn remove<B: StorageBackend>(store: &mut TeacherStore<B>, name: &str) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    let mut staged = store.document().clone();

    let Some(students) = staged.teachers.shift_remove(name) else {
        result.add_message(CmdMessage::info(format!("No teacher named {}", name)));
        return Ok(result);
    };

    store.commit(staged)?;
    tracing::info!(teacher = %name, students = students.len(), "teacher removed");

    for (student, record) in students {
        result.removed.push(RemovedStudent {
            teacher: name.to_string(),
            name: student,
            record,
            status_path: None,
            status: None,
        });
    }
    result.add_message(CmdMessage::success(format!(
        "Teacher removed: {} ({} student(s))",
        name,
        result.removed.len()
    )));
    if !result.removed.is_empty() {
        result.add_message(CmdMessage::warning(
            "Status files of the removed students were kept on disk",
        ));
    }
    Ok(result)
}
