//! Bootstraps a root document from tab-separated exports.
//!
//! Roster lines are `student \t group \t teacher`, schema lines are
//! `key \t label`. Blank lines are skipped in both.

use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, ThesisError};
use crate::fuzzy::clean_text;
use crate::model::{Document, StudentRecord};
use crate::naming::{status_file_name, unique_file_name};
use crate::store::StorageBackend;
use indexmap::IndexMap;

struct RosterLine {
    student: String,
    group: String,
    teacher: String,
}

fn fields(line: &str) -> Vec<String> {
    line.split('\t').map(clean_text).collect()
}

fn parse_statuses(text: &str) -> Result<IndexMap<String, String>> {
    let mut statuses = IndexMap::new();
    for (n, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match fields(line).as_slice() {
            [key, label] if !key.is_empty() => {
                statuses.insert(key.clone(), label.clone());
            }
            _ => {
                return Err(ThesisError::InvalidInput(format!(
                    "statuses line {}: expected `key<TAB>label`",
                    n + 1
                )))
            }
        }
    }
    Ok(statuses)
}

fn parse_roster(text: &str) -> Result<Vec<RosterLine>> {
    let mut roster = Vec::new();
    for (n, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match fields(line).as_slice() {
            [student, group, teacher] if !student.is_empty() && !teacher.is_empty() => {
                roster.push(RosterLine {
                    student: student.clone(),
                    group: group.clone(),
                    teacher: teacher.clone(),
                });
            }
            _ => {
                return Err(ThesisError::InvalidInput(format!(
                    "roster line {}: expected `student<TAB>group<TAB>teacher`",
                    n + 1
                )))
            }
        }
    }
    Ok(roster)
}

fn add_roster<B: StorageBackend>(
    backend: &B,
    doc: &mut Document,
    roster: Vec<RosterLine>,
    written: &mut Vec<String>,
    result: &mut CmdResult,
) -> Result<()> {
    let blank = doc.blank_status();
    for line in roster {
        if doc.has_student(&line.student) {
            tracing::warn!(student = %line.student, "duplicate roster entry skipped");
            result.add_message(CmdMessage::warning(format!(
                "Skipped repeated student: {}",
                line.student
            )));
            continue;
        }
        let base = status_file_name(&line.teacher, &line.student)?;
        let file = unique_file_name(&base, |candidate| {
            written.iter().any(|w| w == candidate)
                || backend.status_exists(&doc.data_dir, candidate)
        });
        backend.write_status(&doc.data_dir, &file, &blank)?;
        written.push(file.clone());

        if !line.group.is_empty() && !doc.groups.contains(&line.group) {
            doc.groups.push(line.group.clone());
        }
        doc.teachers
            .entry(line.teacher)
            .or_default()
            .insert(line.student, StudentRecord::new(file, line.group, ""));
    }
    Ok(())
}

fn discard_written<B: StorageBackend>(backend: &B, data_dir: &str, written: &[String]) {
    for file in written {
        if let Err(e) = backend.delete_status(data_dir, file) {
            tracing::warn!(%file, error = %e, "could not remove imported status file");
        }
    }
}

/// Creates the document and one blank status file per student. Refuses to
/// overwrite an existing document. On failure, status files written so far
/// are removed again.
pub fn run<B: StorageBackend>(
    backend: &B,
    data_dir: &str,
    roster_text: &str,
    statuses_text: &str,
) -> Result<CmdResult> {
    if backend.document_exists() {
        return Err(ThesisError::Conflict(
            "A document already exists; import only bootstraps new ones".to_string(),
        ));
    }
    let statuses = parse_statuses(statuses_text)?;
    let roster = parse_roster(roster_text)?;

    let mut doc = Document::new(data_dir);
    doc.statuses = statuses;
    let mut result = CmdResult::default();
    let mut written = Vec::new();

    let outcome = add_roster(backend, &mut doc, roster, &mut written, &mut result)
        .and_then(|()| backend.save_document(&doc));
    if let Err(e) = outcome {
        discard_written(backend, data_dir, &written);
        return Err(e);
    }
    tracing::info!(
        teachers = doc.teachers.len(),
        students = written.len(),
        "document imported"
    );

    result.add_message(CmdMessage::success(format!(
        "Imported {} teacher(s), {} student(s), {} status key(s)",
        doc.teachers.len(),
        written.len(),
        doc.statuses.len()
    )));
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::mem_backend::MemBackend;
    use crate::store::TeacherStore;

    const STATUSES: &str = "ready_0105\tГотовность ВКР на 01.05\ncheck_plag\tДопуск к проверке\n";
    const ROSTER: &str = "Кромин Денис Артёмьевич\tПГС-701\tЭйлер Л.\n\
                          \n\
                          Чаплин Чарльз Спенсер\tПГС-702\tГаусс К.\n\
                          Иванов Иван Иванович\tПГС-701\tЭйлер Л.\n";

    #[test]
    fn builds_document_and_status_files() {
        let backend = MemBackend::new();
        run(&backend, "data/students", ROSTER, STATUSES).unwrap();

        assert_eq!(backend.status_count(), 3);
        let store = TeacherStore::open(backend).unwrap();
        let doc = store.document();

        let teachers: Vec<_> = doc.teachers.keys().cloned().collect();
        assert_eq!(teachers, vec!["Эйлер Л.", "Гаусс К."]);
        assert_eq!(doc.groups, vec!["ПГС-701", "ПГС-702"]);

        let record = doc.record("Эйлер Л.", "Кромин Денис Артёмьевич").unwrap();
        assert_eq!(record.file, "ejler_l__kromin_da.json");
        assert_eq!(record.group, "ПГС-701");
        let status = store.load_status(&record.file).unwrap();
        assert_eq!(status.keys().collect::<Vec<_>>(), vec!["ready_0105", "check_plag"]);
    }

    #[test]
    fn skips_repeated_students() {
        let backend = MemBackend::new();
        let roster = format!("{}Кромин Денис Артёмьевич\tПГС-701\tГаусс К.\n", ROSTER);
        let result = run(&backend, "data/students", &roster, STATUSES).unwrap();

        assert_eq!(backend.status_count(), 3);
        assert!(result.messages.iter().any(|m| m.content.contains("Skipped")));
    }

    #[test]
    fn reports_malformed_lines() {
        let backend = MemBackend::new();
        let err = run(&backend, "data/students", "Кромин Денис\tПГС-701\n", STATUSES).unwrap_err();
        match err {
            ThesisError::InvalidInput(msg) => assert!(msg.contains("roster line 1")),
            other => panic!("unexpected error: {other:?}"),
        }

        let err = run(&backend, "data/students", ROSTER, "ready\n").unwrap_err();
        assert!(matches!(err, ThesisError::InvalidInput(_)));
        assert!(!backend.document_exists());
        assert_eq!(backend.status_count(), 0);
    }

    #[test]
    fn failed_status_write_removes_earlier_files() {
        let backend = MemBackend::new();
        backend.lock_file("gauss_k__chaplin_chs.json");
        assert!(run(&backend, "data/students", ROSTER, STATUSES).is_err());

        assert_eq!(backend.status_count(), 0);
        assert!(!backend.document_exists());
    }

    #[test]
    fn failed_document_write_removes_all_files() {
        let backend = MemBackend::new();
        backend.set_fail_document_writes(true);
        assert!(run(&backend, "data/students", ROSTER, STATUSES).is_err());
        assert_eq!(backend.status_count(), 0);
    }

    #[test]
    fn refuses_to_overwrite() {
        let backend = MemBackend::with_document(&Document::new("data/students")).unwrap();
        let err = run(&backend, "data/students", ROSTER, STATUSES).unwrap_err();
        assert!(matches!(err, ThesisError::Conflict(_)));
    }
}
