use crate::commands::helpers::{student_entry, teacher_entry};
use crate::commands::CmdResult;
use crate::error::{Result, ThesisError};
use crate::store::{StorageBackend, TeacherStore};

pub fn teachers<B: StorageBackend>(store: &TeacherStore<B>) -> Result<CmdResult> {
    let snapshot = store.snapshot();
    let entries = snapshot
        .index()
        .teacher_ids()
        .into_iter()
        .filter_map(|id| teacher_entry(snapshot, id))
        .collect();
    Ok(CmdResult::default().with_listed_teachers(entries))
}

/// Students of one teacher, or of everyone when `teacher` is `None`.
pub fn students<B: StorageBackend>(
    store: &TeacherStore<B>,
    teacher: Option<&str>,
) -> Result<CmdResult> {
    let snapshot = store.snapshot();
    let index = snapshot.index();
    let teacher_ids = match teacher {
        Some(name) => vec![index
            .teacher_id_of(name)
            .ok_or_else(|| ThesisError::TeacherNotFound(name.to_string()))?],
        None => index.teacher_ids(),
    };

    let entries = teacher_ids
        .into_iter()
        .flat_map(|tid| index.students_of(tid).iter().copied())
        .filter_map(|sid| student_entry(snapshot, sid))
        .collect();
    Ok(CmdResult::default().with_listed_students(entries))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::{StudentId, TeacherId};
    use crate::test_utils::fixtures;

    #[test]
    fn lists_teachers_in_document_order() {
        let store = fixtures::store();
        let result = teachers(&store).unwrap();

        let listed: Vec<_> = result
            .listed_teachers
            .iter()
            .map(|t| (t.id, t.name.as_str(), t.student_count))
            .collect();
        assert_eq!(
            listed,
            vec![
                (TeacherId(0), fixtures::EULER, 2),
                (TeacherId(1), fixtures::GAUSS, 1),
                (TeacherId(2), fixtures::NEWTON, 0),
            ]
        );
    }

    #[test]
    fn lists_students_of_one_or_all_teachers() {
        let store = fixtures::store();

        let all = students(&store, None).unwrap();
        let ids: Vec<_> = all.listed_students.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![StudentId(0), StudentId(1), StudentId(2)]);

        let gauss = students(&store, Some(fixtures::GAUSS)).unwrap();
        assert_eq!(gauss.listed_students.len(), 1);
        assert_eq!(gauss.listed_students[0].name, fixtures::CHAPLIN);

        let err = students(&store, Some("Никто")).unwrap_err();
        assert!(matches!(err, ThesisError::TeacherNotFound(_)));
    }
}
