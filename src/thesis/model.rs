use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Status values of one student, keyed by status key. Values are free text;
/// an empty string means "not set".
pub type StatusRecord = IndexMap<String, String>;

/// Students of a single teacher, keyed by student name.
pub type StudentMap = IndexMap<String, StudentRecord>;

/// The root JSON document.
///
/// All maps keep the order they have on disk: the [`crate::index::Index`]
/// hands out ids in that order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Directory (relative to the base directory) holding the status files.
    pub data_dir: String,
    pub teachers: IndexMap<String, StudentMap>,
    /// Status key -> human readable label.
    pub statuses: IndexMap<String, String>,
    #[serde(default)]
    pub groups: Vec<String>,
}

impl Document {
    pub fn new(data_dir: impl Into<String>) -> Self {
        Self {
            data_dir: data_dir.into(),
            teachers: IndexMap::new(),
            statuses: IndexMap::new(),
            groups: Vec::new(),
        }
    }

    pub fn has_teacher(&self, teacher: &str) -> bool {
        self.teachers.contains_key(teacher)
    }

    pub fn students_of(&self, teacher: &str) -> Option<&StudentMap> {
        self.teachers.get(teacher)
    }

    pub fn record(&self, teacher: &str, student: &str) -> Option<&StudentRecord> {
        self.teachers.get(teacher)?.get(student)
    }

    /// True if any teacher lists a student with this name.
    pub fn has_student(&self, student: &str) -> bool {
        self.teachers.values().any(|m| m.contains_key(student))
    }

    /// A status record with every known status key set to "".
    pub fn blank_status(&self) -> StatusRecord {
        self.statuses
            .keys()
            .map(|k| (k.clone(), String::new()))
            .collect()
    }
}

/// Metadata of one student under one teacher.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentRecord {
    /// Status file name, relative to `Document::data_dir`.
    pub file: String,
    #[serde(default)]
    pub group: String,
    #[serde(default)]
    pub work: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duplicate: Option<DuplicateLink>,
    /// Keys this crate does not know about, kept so a save does not drop them.
    #[serde(flatten)]
    pub extra: IndexMap<String, serde_json::Value>,
}

impl StudentRecord {
    pub fn new(file: impl Into<String>, group: impl Into<String>, work: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            group: group.into(),
            work: work.into(),
            duplicate: None,
            extra: IndexMap::new(),
        }
    }

    pub fn is_duplicate(&self) -> bool {
        self.duplicate.is_some()
    }
}

/// Marks a record as shared read-through access to another teacher's
/// student. On disk this is the single-entry object `{teacher: student}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "IndexMap<String, String>", into = "IndexMap<String, String>")]
pub struct DuplicateLink {
    pub teacher: String,
    pub student: String,
}

impl TryFrom<IndexMap<String, String>> for DuplicateLink {
    type Error = String;

    fn try_from(map: IndexMap<String, String>) -> Result<Self, Self::Error> {
        if map.len() > 1 {
            return Err(format!(
                "duplicate marker must name exactly one teacher, found {}",
                map.len()
            ));
        }
        match map.into_iter().next() {
            Some((teacher, student)) => Ok(Self { teacher, student }),
            None => Err("duplicate marker must name the original teacher".to_string()),
        }
    }
}

impl From<DuplicateLink> for IndexMap<String, String> {
    fn from(link: DuplicateLink) -> Self {
        let mut map = IndexMap::new();
        map.insert(link.teacher, link.student);
        map
    }
}

/// Input for adding a student.
#[derive(Debug, Clone, Default)]
pub struct NewStudent {
    pub name: String,
    pub group: String,
    pub work: String,
}

impl NewStudent {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = group.into();
        self
    }

    pub fn with_work(mut self, work: impl Into<String>) -> Self {
        self.work = work.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "data_dir": "data/students",
        "teachers": {
            "Эйлер Л.": {
                "Кромин Денис Артёмьевич": {
                    "file": "ejler_l__kromin_da.json",
                    "work": "kromin/work.doc",
                    "group": "ПГС-701"
                }
            },
            "Гаусс К.": {
                "Кромин Денис Артёмьевич": {
                    "file": "ejler_l__kromin_da.json",
                    "work": "",
                    "group": "ПГС-701",
                    "duplicate": {"Эйлер Л.": "Кромин Денис Артёмьевич"}
                }
            }
        },
        "statuses": {"ready_0105": "Готовность ВКР на 01.05", "plag_date": "Проверка на плагиат"},
        "groups": ["ПГС-701"]
    }"#;

    #[test]
    fn parses_duplicate_marker() {
        let doc: Document = serde_json::from_str(SAMPLE).unwrap();
        let shared = doc.record("Гаусс К.", "Кромин Денис Артёмьевич").unwrap();
        let link = shared.duplicate.as_ref().unwrap();
        assert_eq!(link.teacher, "Эйлер Л.");
        assert_eq!(link.student, "Кромин Денис Артёмьевич");
        assert!(!doc
            .record("Эйлер Л.", "Кромин Денис Артёмьевич")
            .unwrap()
            .is_duplicate());
    }

    #[test]
    fn keeps_teacher_order_and_unknown_keys() {
        let raw = r#"{"data_dir":"d","teachers":{"B":{"x":{"file":"f.json","note":"keep me"}},"A":{}},"statuses":{}}"#;
        let doc: Document = serde_json::from_str(raw).unwrap();
        let names: Vec<_> = doc.teachers.keys().cloned().collect();
        assert_eq!(names, vec!["B", "A"]);
        assert!(doc.groups.is_empty());

        let record = doc.record("B", "x").unwrap();
        assert_eq!(record.group, "");
        assert_eq!(record.extra["note"], "keep me");

        let json = serde_json::to_string(&doc).unwrap();
        assert!(json.contains("\"note\":\"keep me\""));
        assert!(!json.contains("duplicate"));
    }

    #[test]
    fn rejects_empty_duplicate_marker() {
        let raw = r#"{"file":"f.json","duplicate":{}}"#;
        assert!(serde_json::from_str::<StudentRecord>(raw).is_err());
    }

    #[test]
    fn rejects_duplicate_marker_with_several_teachers() {
        let raw = r#"{"file":"f.json","duplicate":{"A":"x","B":"x"}}"#;
        let err = serde_json::from_str::<StudentRecord>(raw).unwrap_err();
        assert!(err.to_string().contains("exactly one teacher"));
    }

    #[test]
    fn blank_status_covers_all_keys() {
        let doc: Document = serde_json::from_str(SAMPLE).unwrap();
        let blank = doc.blank_status();
        assert_eq!(blank.len(), 2);
        assert!(blank.values().all(String::is_empty));
    }
}
