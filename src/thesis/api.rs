//! # API Facade
//!
//! A thin facade over the command layer and the single entry point for every
//! front-end (the `thesis` CLI here, a chat bot elsewhere).
//!
//! The facade dispatches to `commands/*.rs`, turns id strings into typed ids
//! and answers read-only queries straight from the current snapshot. It does
//! no printing and holds no business logic.
//!
//! `ThesisApi<B: StorageBackend>` is generic over the backend:
//! - Production: `ThesisApi<FsBackend>`, opened with [`ThesisApi::open`]
//! - Testing: `ThesisApi<MemBackend>`
//!
//! Every mutating call rebuilds the index, so ids returned before it must be
//! resolved again afterwards.

use crate::commands;
use crate::config::TrackerConfig;
use crate::error::{Result, ThesisError};
use crate::index::{StudentId, TeacherId};
use crate::model::{NewStudent, StatusRecord, StudentRecord};
use crate::store::fs_backend::FsBackend;
use crate::store::{Snapshot, StorageBackend, TeacherStore};
use indexmap::IndexMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub struct ThesisApi<B: StorageBackend> {
    store: TeacherStore<B>,
    max_edits: usize,
}

impl ThesisApi<FsBackend> {
    /// Opens the document configured in `base_dir`.
    pub fn open(base_dir: &Path) -> Result<Self> {
        let config = TrackerConfig::load(base_dir)?;
        let store = TeacherStore::open(fs_backend(base_dir, &config))?;
        Ok(Self::new(store, config.max_edits))
    }

    /// Creates an empty document at the configured location.
    pub fn init(base_dir: &Path, data_dir: &str) -> Result<commands::CmdResult> {
        let config = TrackerConfig::load(base_dir)?;
        commands::init::run(&fs_backend(base_dir, &config), data_dir)
    }

    /// Builds a new document from a roster and a status schema export.
    pub fn import(
        base_dir: &Path,
        data_dir: &str,
        roster: &str,
        statuses: &str,
    ) -> Result<commands::CmdResult> {
        let config = TrackerConfig::load(base_dir)?;
        commands::import::run(&fs_backend(base_dir, &config), data_dir, roster, statuses)
    }

    pub fn config(base_dir: &Path, action: ConfigAction) -> Result<commands::CmdResult> {
        commands::config::run(base_dir, action)
    }
}

fn fs_backend(base_dir: &Path, config: &TrackerConfig) -> FsBackend {
    FsBackend::new(config.document_path(base_dir), base_dir.to_path_buf())
}

impl<B: StorageBackend> ThesisApi<B> {
    pub fn new(store: TeacherStore<B>, max_edits: usize) -> Self {
        Self { store, max_edits }
    }

    pub fn snapshot(&self) -> &Snapshot {
        self.store.snapshot()
    }

    pub fn store(&self) -> &TeacherStore<B> {
        &self.store
    }

    // --- Mutations ---

    pub fn add_teacher(&mut self, name: &str) -> Result<commands::CmdResult> {
        commands::teachers::add(&mut self.store, name)
    }

    pub fn remove_teacher(&mut self, name: &str) -> Result<commands::CmdResult> {
        commands::teachers::remove(&mut self.store, name)
    }

    pub fn add_student(
        &mut self,
        teacher: &str,
        student: NewStudent,
    ) -> Result<commands::CmdResult> {
        commands::students::add(&mut self.store, teacher, student)
    }

    pub fn remove_student_by_name(
        &mut self,
        query: &str,
        full_match: bool,
        teacher: Option<&str>,
    ) -> Result<commands::CmdResult> {
        commands::students::remove_by_name(
            &mut self.store,
            query,
            full_match,
            teacher,
            self.max_edits,
        )
    }

    pub fn remove_student_by_id(&mut self, id: &str) -> Result<commands::CmdResult> {
        let id = parse_id::<StudentId>(id)?;
        commands::students::remove_by_id(&mut self.store, id, self.max_edits)
    }

    pub fn transfer_student(
        &mut self,
        student: &str,
        to_teacher: &str,
        from_teacher: Option<&str>,
    ) -> Result<commands::CmdResult> {
        commands::transfer::transfer(&mut self.store, student, to_teacher, from_teacher)
    }

    pub fn duplicate_access(
        &mut self,
        to_teacher: &str,
        from_teacher: &str,
        student: &str,
    ) -> Result<commands::CmdResult> {
        commands::share::duplicate_access(&mut self.store, to_teacher, from_teacher, student)
    }

    pub fn change_student_status(
        &self,
        teacher: &str,
        student: &str,
        key: &str,
        value: &str,
    ) -> Result<commands::CmdResult> {
        commands::status::change(&self.store, teacher, student, key, value)
    }

    pub fn remove_status(&mut self, key: &str) -> Result<commands::CmdResult> {
        commands::status::remove_key(&mut self.store, key)
    }

    pub fn doctor(&self, fix: bool) -> Result<commands::CmdResult> {
        commands::doctor::run(&self.store, fix)
    }

    // --- Listings ---

    pub fn list_teachers(&self) -> Result<commands::CmdResult> {
        commands::list::teachers(&self.store)
    }

    pub fn list_students(&self, teacher: Option<&str>) -> Result<commands::CmdResult> {
        commands::list::students(&self.store, teacher)
    }

    pub fn list_group(&self, group: &str) -> Result<commands::CmdResult> {
        commands::groups::run(&self.store, group)
    }

    pub fn show_status(&self, teacher: &str, student: &str) -> Result<commands::CmdResult> {
        commands::status::show(&self.store, teacher, student)
    }

    // --- Queries ---

    pub fn get_teachers(&self) -> Vec<String> {
        self.snapshot().index().teacher_names().to_vec()
    }

    pub fn get_teachers_id(&self) -> Vec<TeacherId> {
        self.snapshot().index().teacher_ids()
    }

    pub fn get_students_list(&self) -> Vec<String> {
        self.snapshot().index().student_names().to_vec()
    }

    pub fn get_teacher_students(&self, teacher: &str) -> Result<Vec<String>> {
        self.store
            .document()
            .students_of(teacher)
            .map(|students| students.keys().cloned().collect())
            .ok_or_else(|| ThesisError::TeacherNotFound(teacher.to_string()))
    }

    pub fn get_teacher_students_by_id(&self, id: TeacherId) -> Result<Vec<StudentId>> {
        let index = self.snapshot().index();
        index
            .teacher_name(id)
            .ok_or_else(|| ThesisError::TeacherNotFound(id.to_string()))?;
        Ok(index.students_of(id).to_vec())
    }

    pub fn teacher_of_student(&self, id: StudentId) -> Option<TeacherId> {
        self.snapshot().index().teacher_of_student(id)
    }

    pub fn get_student_data_by_name(&self, teacher: &str, student: &str) -> Result<StudentRecord> {
        let doc = self.store.document();
        if !doc.has_teacher(teacher) {
            return Err(ThesisError::TeacherNotFound(teacher.to_string()));
        }
        doc.record(teacher, student)
            .cloned()
            .ok_or_else(|| ThesisError::StudentNotFound(student.to_string()))
    }

    pub fn get_student_data_by_id(
        &self,
        teacher: TeacherId,
        student: StudentId,
    ) -> Result<StudentRecord> {
        let index = self.snapshot().index();
        let teacher_name = index
            .teacher_name(teacher)
            .ok_or_else(|| ThesisError::TeacherNotFound(teacher.to_string()))?;
        let student_name = index
            .student_name(student)
            .ok_or_else(|| ThesisError::StudentNotFound(student.to_string()))?;
        self.get_student_data_by_name(teacher_name, student_name)
    }

    pub fn get_student_file_data(
        &self,
        teacher: &str,
        student: &str,
    ) -> Result<(PathBuf, StatusRecord)> {
        let (_, path, status) = self.store.student_file_data(teacher, student)?;
        Ok((path, status))
    }

    pub fn get_groups(&self) -> &[String] {
        &self.store.document().groups
    }

    pub fn get_statuses(&self) -> &IndexMap<String, String> {
        &self.store.document().statuses
    }

    pub fn get_student_ids_for_group(&self, group: &str) -> Vec<StudentId> {
        commands::groups::student_ids_for_group(self.snapshot(), group)
    }

    pub fn get_student_names_for_group(&self, group: &str) -> Vec<String> {
        commands::groups::student_names_for_group(self.snapshot(), group)
    }
}

/// Parses `t3` / `s12` style ids, accepting bare numbers too.
pub fn parse_id<T: FromStr<Err = String>>(raw: &str) -> Result<T> {
    raw.trim().parse().map_err(ThesisError::InvalidInput)
}

pub use crate::commands::config::ConfigAction;
pub use crate::commands::doctor::DoctorReport;
pub use crate::commands::{CmdMessage, CmdResult, MessageLevel};
