use std::fs;
use std::path::Path;
use thesis_tracker::api::ThesisApi;
use thesis_tracker::error::{ErrorKind, ThesisError};
use thesis_tracker::model::NewStudent;

const DOCUMENT: &str = r#"{
  "data_dir": "data/students",
  "teachers": {
    "Эйлер Л.": {
      "Кромин Денис Артёмьевич": {
        "file": "ejler_l__kromin_da.json",
        "group": "ПГС-701",
        "work": "",
        "grade": 5
      }
    },
    "Гаусс К.": {}
  },
  "statuses": {
    "ready_0105": "Готовность ВКР на 01.05",
    "check_plag": "Допуск к проверке на плагиат"
  },
  "groups": ["ПГС-701"]
}"#;

fn seed(base: &Path) {
    let data = base.join("data/students");
    fs::create_dir_all(&data).unwrap();
    fs::write(data.join("teachers.json"), DOCUMENT).unwrap();
    fs::write(
        data.join("ejler_l__kromin_da.json"),
        r#"{"ready_0105": "да", "check_plag": ""}"#,
    )
    .unwrap();
}

fn status_file(base: &Path, file: &str) -> std::path::PathBuf {
    base.join("data/students").join(file)
}

#[test]
fn open_without_document_is_not_found() {
    let temp = tempfile::tempdir().unwrap();
    let err = ThesisApi::open(temp.path()).err().unwrap();
    assert!(matches!(err, ThesisError::DocumentNotFound(_)));
}

#[test]
fn malformed_document_is_a_parse_error() {
    let temp = tempfile::tempdir().unwrap();
    let data = temp.path().join("data/students");
    fs::create_dir_all(&data).unwrap();
    fs::write(data.join("teachers.json"), r#"{"data_dir": "#).unwrap();

    let err = ThesisApi::open(temp.path()).err().unwrap();
    assert_eq!(err.kind(), ErrorKind::ParseError);
}

#[test]
fn doctor_reports_unreadable_status_file() {
    let temp = tempfile::tempdir().unwrap();
    seed(temp.path());
    fs::write(status_file(temp.path(), "ejler_l__kromin_da.json"), "{\"ready_0105\": ").unwrap();

    let api = ThesisApi::open(temp.path()).unwrap();
    let report = api.doctor(false).unwrap().report.unwrap();
    assert_eq!(report.unreadable.len(), 1);
    assert_eq!(report.unreadable[0].0, "ejler_l__kromin_da.json");
    assert!(report.missing_files.is_empty());
}

#[test]
fn commit_keeps_order_and_unknown_fields() {
    let temp = tempfile::tempdir().unwrap();
    seed(temp.path());

    let mut api = ThesisApi::open(temp.path()).unwrap();
    api.add_teacher("Ньютон И.").unwrap();

    let raw = fs::read_to_string(temp.path().join("data/students/teachers.json")).unwrap();
    let euler = raw.find("Эйлер Л.").unwrap();
    let gauss = raw.find("Гаусс К.").unwrap();
    let newton = raw.find("Ньютон И.").unwrap();
    assert!(euler < gauss && gauss < newton);
    assert!(raw.contains("\"grade\": 5"));

    let reopened = ThesisApi::open(temp.path()).unwrap();
    assert_eq!(reopened.get_teachers(), api.get_teachers());
}

#[test]
fn transfer_moves_status_file_on_disk() {
    let temp = tempfile::tempdir().unwrap();
    seed(temp.path());
    let mut api = ThesisApi::open(temp.path()).unwrap();

    api.transfer_student("Кромин Денис Артёмьевич", "Гаусс К.", None)
        .unwrap();

    assert!(!status_file(temp.path(), "ejler_l__kromin_da.json").exists());
    let moved = status_file(temp.path(), "gauss_k__kromin_da.json");
    let content: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(moved).unwrap()).unwrap();
    assert_eq!(content["ready_0105"], "да");

    let sid = api.get_teacher_students_by_id(api.get_teachers_id()[1]).unwrap()[0];
    assert_eq!(api.teacher_of_student(sid), Some(api.get_teachers_id()[1]));
    assert!(api.get_teacher_students("Эйлер Л.").unwrap().is_empty());
}

#[test]
fn empty_document_scenario() {
    let temp = tempfile::tempdir().unwrap();
    ThesisApi::init(temp.path(), "data/students").unwrap();

    let mut api = ThesisApi::open(temp.path()).unwrap();
    assert!(api.get_teachers_id().is_empty());

    api.add_teacher("X").unwrap();
    api.add_student("X", NewStudent::new("Y").with_group("G1"))
        .unwrap();

    assert_eq!(api.get_teacher_students("X").unwrap(), vec!["Y"]);
    let (path, status) = api.get_student_file_data("X", "Y").unwrap();
    assert!(path.exists());
    assert!(status.is_empty());
}

#[test]
fn status_change_survives_reopen() {
    let temp = tempfile::tempdir().unwrap();
    seed(temp.path());

    let api = ThesisApi::open(temp.path()).unwrap();
    api.change_student_status("Эйлер Л.", "Кромин Денис Артёмьевич", "check_plag", "да")
        .unwrap();

    let reopened = ThesisApi::open(temp.path()).unwrap();
    let (_, status) = reopened
        .get_student_file_data("Эйлер Л.", "Кромин Денис Артёмьевич")
        .unwrap();
    assert_eq!(status["check_plag"], "да");
}

#[test]
fn no_temporary_files_are_left_behind() {
    let temp = tempfile::tempdir().unwrap();
    seed(temp.path());
    let mut api = ThesisApi::open(temp.path()).unwrap();
    api.add_student("Гаусс К.", NewStudent::new("Риман Бернхард"))
        .unwrap();

    let leftovers: Vec<_> = fs::read_dir(temp.path().join("data/students"))
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
        .collect();
    assert!(leftovers.is_empty());
}
