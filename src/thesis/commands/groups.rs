use crate::commands::helpers::student_entry;
use crate::commands::{CmdResult, StudentEntry};
use crate::error::Result;
use crate::index::StudentId;
use crate::store::{Snapshot, StorageBackend, TeacherStore};

fn entries_in_group(snapshot: &Snapshot, group: &str) -> Vec<StudentEntry> {
    let index = snapshot.index();
    index
        .teacher_ids()
        .into_iter()
        .flat_map(|tid| index.students_of(tid).iter().copied())
        .filter_map(|sid| student_entry(snapshot, sid))
        .filter(|entry| entry.record.group == group)
        .collect()
}

/// Ids of every student entry in `group`. A shared student contributes one
/// id per teacher.
pub fn student_ids_for_group(snapshot: &Snapshot, group: &str) -> Vec<StudentId> {
    entries_in_group(snapshot, group)
        .into_iter()
        .map(|entry| entry.id)
        .collect()
}

/// Names of the students in `group`, each once, in id order.
pub fn student_names_for_group(snapshot: &Snapshot, group: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for entry in entries_in_group(snapshot, group) {
        if !names.contains(&entry.name) {
            names.push(entry.name);
        }
    }
    names
}

pub fn run<B: StorageBackend>(store: &TeacherStore<B>, group: &str) -> Result<CmdResult> {
    Ok(CmdResult::default().with_listed_students(entries_in_group(store.snapshot(), group)))
}
