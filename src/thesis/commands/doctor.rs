//! Consistency check between the root document and the status files.

use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::{StorageBackend, TeacherStore};

/// A student entry, named by teacher and student.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryRef {
    pub teacher: String,
    pub student: String,
    pub file: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DoctorReport {
    /// Owned entries whose status file does not exist.
    pub missing_files: Vec<EntryRef>,
    /// Status files holding keys the schema does not list, with those keys.
    pub unknown_keys: Vec<(String, Vec<String>)>,
    /// Status files that exist but cannot be parsed.
    pub unreadable: Vec<(String, String)>,
    /// Shared entries whose origin is gone or points at another file.
    pub dangling_duplicates: Vec<EntryRef>,
    /// Files written by `fix`.
    pub recreated: Vec<String>,
}

impl DoctorReport {
    pub fn is_healthy(&self) -> bool {
        self.missing_files.is_empty()
            && self.unknown_keys.is_empty()
            && self.unreadable.is_empty()
            && self.dangling_duplicates.is_empty()
    }
}

/// Checks every entry. With `fix`, missing status files of owned entries are
/// recreated with every key empty; nothing else is changed.
pub fn run<B: StorageBackend>(store: &TeacherStore<B>, fix: bool) -> Result<CmdResult> {
    let doc = store.document();
    let mut report = DoctorReport::default();

    for (teacher, students) in &doc.teachers {
        for (student, record) in students {
            let entry = EntryRef {
                teacher: teacher.clone(),
                student: student.clone(),
                file: record.file.clone(),
            };

            if let Some(link) = &record.duplicate {
                let origin_ok = doc
                    .record(&link.teacher, &link.student)
                    .is_some_and(|origin| !origin.is_duplicate() && origin.file == record.file);
                if !origin_ok {
                    report.dangling_duplicates.push(entry);
                }
                continue;
            }

            match store.backend.read_status(&doc.data_dir, &record.file) {
                Ok(Some(status)) => {
                    let unknown: Vec<String> = status
                        .keys()
                        .filter(|key| !doc.statuses.contains_key(key.as_str()))
                        .cloned()
                        .collect();
                    if !unknown.is_empty() {
                        report.unknown_keys.push((record.file.clone(), unknown));
                    }
                }
                Ok(None) => report.missing_files.push(entry),
                Err(e) => report.unreadable.push((record.file.clone(), e.to_string())),
            }
        }
    }

    if fix {
        let blank = doc.blank_status();
        for entry in &report.missing_files {
            if report.recreated.contains(&entry.file) {
                continue;
            }
            store.save_status(&entry.file, &blank)?;
            tracing::info!(file = %entry.file, "status file recreated");
            report.recreated.push(entry.file.clone());
        }
    }

    tracing::debug!(healthy = report.is_healthy(), "doctor finished");
    let mut result = CmdResult::default();
    if report.is_healthy() {
        result.add_message(CmdMessage::success("No problems found"));
    } else {
        result.add_message(CmdMessage::warning(format!(
            "{} missing, {} with unknown keys, {} unreadable, {} dangling shared",
            report.missing_files.len(),
            report.unknown_keys.len(),
            report.unreadable.len(),
            report.dangling_duplicates.len()
        )));
    }
    result.report = Some(report);
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{share, status, teachers};
    use crate::test_utils::fixtures;

    fn report_of(result: CmdResult) -> DoctorReport {
        result.report.unwrap()
    }

    #[test]
    fn fixture_store_is_healthy() {
        let store = fixtures::store();
        assert!(report_of(run(&store, false).unwrap()).is_healthy());
    }

    #[test]
    fn finds_and_recreates_missing_files() {
        let store = fixtures::store();
        store.delete_status_best_effort(fixtures::IVANOV_FILE);

        let report = report_of(run(&store, false).unwrap());
        assert_eq!(report.missing_files.len(), 1);
        assert_eq!(report.missing_files[0].student, fixtures::IVANOV);
        assert!(report.recreated.is_empty());
        assert!(!store.status_exists(fixtures::IVANOV_FILE));

        let report = report_of(run(&store, true).unwrap());
        assert_eq!(report.recreated, vec![fixtures::IVANOV_FILE.to_string()]);
        assert_eq!(
            store.load_status(fixtures::IVANOV_FILE).unwrap(),
            store.document().blank_status()
        );
    }

    #[test]
    fn reports_keys_dropped_from_schema() {
        let mut store = fixtures::store();
        status::remove_key(&mut store, "final_date").unwrap();

        let report = report_of(run(&store, false).unwrap());
        assert_eq!(report.unknown_keys.len(), 3);
        assert_eq!(report.unknown_keys[0].1, vec!["final_date".to_string()]);
    }

    #[test]
    fn reports_unreadable_status_file() {
        let store = fixtures::store();
        store.backend.corrupt_file(fixtures::CHAPLIN_FILE);

        let report = report_of(run(&store, true).unwrap());
        assert!(!report.is_healthy());
        assert_eq!(report.unreadable.len(), 1);
        assert_eq!(report.unreadable[0].0, fixtures::CHAPLIN_FILE);
        assert!(report.missing_files.is_empty());
        assert!(report.recreated.is_empty());
    }

    #[test]
    fn reports_shared_access_left_by_removed_teacher() {
        let mut store = fixtures::store();
        share::duplicate_access(&mut store, fixtures::NEWTON, fixtures::EULER, fixtures::KROMIN)
            .unwrap();
        teachers::remove(&mut store, fixtures::EULER).unwrap();

        let report = report_of(run(&store, false).unwrap());
        assert_eq!(
            report.dangling_duplicates,
            vec![EntryRef {
                teacher: fixtures::NEWTON.to_string(),
                student: fixtures::KROMIN.to_string(),
                file: fixtures::KROMIN_FILE.to_string(),
            }]
        );
    }
}
