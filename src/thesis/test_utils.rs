//! Shared fixtures for unit tests (and for downstream crates via the
//! `test_utils` feature).

pub mod fixtures {
    use crate::model::{Document, StatusRecord, StudentRecord};
    use crate::store::mem_backend::MemBackend;
    use crate::store::{StorageBackend, TeacherStore};

    pub const DATA_DIR: &str = "data/students";

    pub const EULER: &str = "Эйлер Л.";
    pub const GAUSS: &str = "Гаусс К.";
    pub const NEWTON: &str = "Ньютон И.";

    pub const KROMIN: &str = "Кромин Денис Артёмьевич";
    pub const KROMIN_FILE: &str = "ejler_l__kromin_da.json";
    pub const IVANOV: &str = "Иванов Иван Иванович";
    pub const IVANOV_FILE: &str = "ejler_l__ivanov_ii.json";
    pub const CHAPLIN: &str = "Чаплин Чарльз Спенсер";
    pub const CHAPLIN_FILE: &str = "gauss_k__chaplin_chs.json";

    pub const GROUP_A: &str = "ПГС-701";
    pub const GROUP_B: &str = "ПГС-702";

    /// Three teachers (the last one without students), three students.
    ///
    /// Ids: Эйлер=t0, Гаусс=t1, Ньютон=t2; Кромин=s0, Иванов=s1, Чаплин=s2.
    pub fn document() -> Document {
        let mut doc = Document::new(DATA_DIR);
        doc.statuses.insert(
            "ready_0105".to_string(),
            "Готовность ВКР на 01.05".to_string(),
        );
        doc.statuses.insert(
            "check_plag".to_string(),
            "Допуск к проверке на плагиат".to_string(),
        );
        doc.statuses
            .insert("final_date".to_string(), "Дата сдачи ВКР в ЭБС".to_string());

        let euler = doc.teachers.entry(EULER.to_string()).or_default();
        euler.insert(
            KROMIN.to_string(),
            StudentRecord::new(KROMIN_FILE, GROUP_A, "kromin/work.doc"),
        );
        euler.insert(
            IVANOV.to_string(),
            StudentRecord::new(IVANOV_FILE, GROUP_B, ""),
        );

        let gauss = doc.teachers.entry(GAUSS.to_string()).or_default();
        gauss.insert(
            CHAPLIN.to_string(),
            StudentRecord::new(CHAPLIN_FILE, GROUP_A, ""),
        );

        doc.teachers.entry(NEWTON.to_string()).or_default();
        doc.groups = vec![GROUP_A.to_string(), GROUP_B.to_string()];
        doc
    }

    pub fn kromin_status(doc: &Document) -> StatusRecord {
        let mut status = doc.blank_status();
        status.insert("ready_0105".to_string(), "да".to_string());
        status.insert("final_date".to_string(), "2025-06-01".to_string());
        status
    }

    /// A backend holding [`document`] and one status file per student.
    pub fn backend() -> MemBackend {
        let doc = document();
        let backend = MemBackend::with_document(&doc).expect("seed document");
        backend
            .write_status(DATA_DIR, KROMIN_FILE, &kromin_status(&doc))
            .expect("seed status");
        for file in [IVANOV_FILE, CHAPLIN_FILE] {
            backend
                .write_status(DATA_DIR, file, &doc.blank_status())
                .expect("seed status");
        }
        backend
    }

    pub fn store() -> TeacherStore<MemBackend> {
        TeacherStore::open(backend()).expect("open fixture store")
    }
}
