//! # Id Index
//!
//! Chat front-ends cannot carry long names in callback data, so every teacher
//! and student gets a small integer id derived from the loaded document:
//!
//! - teachers are numbered `0..` in document order,
//! - students are numbered by one running counter across all teachers, in
//!   document order (the counter is not reset per teacher).
//!
//! A student with shared access (see [`crate::model::DuplicateLink`]) appears
//! under two teachers and therefore owns two ids.
//!
//! The index is a pure function of the document and is rebuilt after every
//! load and commit. Ids are **session scoped**: any mutation may renumber
//! them, so callers holding an id across a mutation must resolve the name
//! again afterwards.

use crate::model::Document;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TeacherId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StudentId(pub usize);

impl std::fmt::Display for TeacherId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "t{}", self.0)
    }
}

impl std::fmt::Display for StudentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "s{}", self.0)
    }
}

impl FromStr for TeacherId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix('t').unwrap_or(s);
        digits
            .parse()
            .map(TeacherId)
            .map_err(|_| format!("Invalid teacher id: {}", s))
    }
}

impl FromStr for StudentId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix('s').unwrap_or(s);
        digits
            .parse()
            .map(StudentId)
            .map_err(|_| format!("Invalid student id: {}", s))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Index {
    teachers: Vec<String>,
    students: Vec<String>,
    links: Vec<Vec<StudentId>>,
}

impl Index {
    pub fn build(doc: &Document) -> Self {
        let mut index = Index::default();
        let mut counter = 0;

        for (teacher, students) in &doc.teachers {
            index.teachers.push(teacher.clone());
            let mut ids = Vec::with_capacity(students.len());
            for student in students.keys() {
                index.students.push(student.clone());
                ids.push(StudentId(counter));
                counter += 1;
            }
            index.links.push(ids);
        }

        index
    }

    pub fn is_empty(&self) -> bool {
        self.teachers.is_empty()
    }

    pub fn teacher_ids(&self) -> Vec<TeacherId> {
        (0..self.teachers.len()).map(TeacherId).collect()
    }

    pub fn teacher_name(&self, id: TeacherId) -> Option<&str> {
        self.teachers.get(id.0).map(String::as_str)
    }

    pub fn student_name(&self, id: StudentId) -> Option<&str> {
        self.students.get(id.0).map(String::as_str)
    }

    pub fn teacher_id_of(&self, name: &str) -> Option<TeacherId> {
        self.teachers.iter().position(|t| t == name).map(TeacherId)
    }

    /// First id carrying this name. For a shared student that is whichever
    /// teacher comes first in document order.
    pub fn student_id_of(&self, name: &str) -> Option<StudentId> {
        self.students.iter().position(|s| s == name).map(StudentId)
    }

    /// Id of `student` as listed under `teacher`.
    pub fn student_id_under(&self, teacher: TeacherId, student: &str) -> Option<StudentId> {
        self.links
            .get(teacher.0)?
            .iter()
            .copied()
            .find(|id| self.student_name(*id) == Some(student))
    }

    pub fn students_of(&self, teacher: TeacherId) -> &[StudentId] {
        self.links.get(teacher.0).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn teacher_of_student(&self, student: StudentId) -> Option<TeacherId> {
        self.links
            .iter()
            .position(|ids| ids.contains(&student))
            .map(TeacherId)
    }

    /// Every student name in id order; shared students appear once per teacher.
    pub fn student_names(&self) -> &[String] {
        &self.students
    }

    pub fn teacher_names(&self) -> &[String] {
        &self.teachers
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::StudentRecord;

    fn doc_with(teachers: &[(&str, &[&str])]) -> Document {
        let mut doc = Document::new("data");
        for (teacher, students) in teachers {
            let map = doc.teachers.entry(teacher.to_string()).or_default();
            for s in *students {
                map.insert(s.to_string(), StudentRecord::new(format!("{s}.json"), "G", ""));
            }
        }
        doc
    }

    #[test]
    fn numbers_students_with_a_global_counter() {
        let doc = doc_with(&[("A", &["a1", "a2"]), ("B", &[]), ("C", &["c1"])]);
        let index = Index::build(&doc);

        assert_eq!(index.teacher_ids(), vec![TeacherId(0), TeacherId(1), TeacherId(2)]);
        assert_eq!(index.students_of(TeacherId(0)), &[StudentId(0), StudentId(1)]);
        assert!(index.students_of(TeacherId(1)).is_empty());
        assert_eq!(index.students_of(TeacherId(2)), &[StudentId(2)]);
        assert_eq!(index.student_name(StudentId(2)), Some("c1"));
        assert_eq!(index.teacher_of_student(StudentId(2)), Some(TeacherId(2)));
        assert_eq!(index.teacher_of_student(StudentId(9)), None);
    }

    #[test]
    fn lookups_in_both_directions() {
        let doc = doc_with(&[("A", &["a1"]), ("B", &["b1"])]);
        let index = Index::build(&doc);

        assert_eq!(index.teacher_id_of("B"), Some(TeacherId(1)));
        assert_eq!(index.teacher_name(TeacherId(1)), Some("B"));
        assert_eq!(index.student_id_of("b1"), Some(StudentId(1)));
        assert_eq!(index.teacher_id_of("Z"), None);
        assert_eq!(index.student_name(StudentId(5)), None);
    }

    #[test]
    fn rebuild_is_deterministic() {
        let doc = doc_with(&[("B", &["x", "y"]), ("A", &["z"])]);
        assert_eq!(Index::build(&doc), Index::build(&doc.clone()));
    }

    #[test]
    fn shared_student_gets_one_id_per_teacher() {
        let doc = doc_with(&[("A", &["s"]), ("B", &["s"])]);
        let index = Index::build(&doc);

        assert_eq!(index.student_id_of("s"), Some(StudentId(0)));
        assert_eq!(index.student_id_under(TeacherId(1), "s"), Some(StudentId(1)));
        assert_eq!(index.teacher_of_student(StudentId(1)), Some(TeacherId(1)));
    }

    #[test]
    fn parses_ids_with_or_without_prefix() {
        assert_eq!("t3".parse::<TeacherId>(), Ok(TeacherId(3)));
        assert_eq!("3".parse::<TeacherId>(), Ok(TeacherId(3)));
        assert_eq!("s12".parse::<StudentId>(), Ok(StudentId(12)));
        assert!("sx".parse::<StudentId>().is_err());
        assert!("".parse::<TeacherId>().is_err());
        assert_eq!(StudentId(4).to_string(), "s4");
    }
}
