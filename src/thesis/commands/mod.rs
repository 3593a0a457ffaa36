use crate::config::TrackerConfig;
use crate::index::{StudentId, TeacherId};
use crate::model::{StatusRecord, StudentRecord};
use std::path::PathBuf;

pub mod config;
pub mod doctor;
pub mod groups;
pub mod helpers;
pub mod import;
pub mod init;
pub mod list;
pub mod share;
pub mod status;
pub mod students;
pub mod teachers;
pub mod transfer;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// A teacher as shown in listings.
#[derive(Debug, Clone, PartialEq)]
pub struct TeacherEntry {
    pub id: TeacherId,
    pub name: String,
    pub student_count: usize,
}

/// A student as listed under one teacher.
#[derive(Debug, Clone, PartialEq)]
pub struct StudentEntry {
    pub id: StudentId,
    pub teacher: String,
    pub name: String,
    pub record: StudentRecord,
}

/// What a removal took out of the document, with the status contents the
/// student had at that moment (`None` for shared access or a missing file).
#[derive(Debug, Clone, PartialEq)]
pub struct RemovedStudent {
    pub teacher: String,
    pub name: String,
    pub record: StudentRecord,
    pub status_path: Option<PathBuf>,
    pub status: Option<StatusRecord>,
}

/// One status row: key, label from the schema, current value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub key: String,
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatusView {
    pub teacher: String,
    pub student: String,
    pub path: PathBuf,
    pub lines: Vec<StatusLine>,
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub listed_teachers: Vec<TeacherEntry>,
    pub listed_students: Vec<StudentEntry>,
    pub removed: Vec<RemovedStudent>,
    pub status: Option<StatusView>,
    pub report: Option<doctor::DoctorReport>,
    pub config: Option<TrackerConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_listed_teachers(mut self, teachers: Vec<TeacherEntry>) -> Self {
        self.listed_teachers = teachers;
        self
    }

    pub fn with_listed_students(mut self, students: Vec<StudentEntry>) -> Self {
        self.listed_students = students;
        self
    }

    pub fn with_status(mut self, status: StatusView) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_config(mut self, config: TrackerConfig) -> Self {
        self.config = Some(config);
        self
    }
}
