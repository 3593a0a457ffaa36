use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;

fn thesis(base: &Path) -> Command {
    let mut cmd = Command::cargo_bin("thesis").unwrap();
    cmd.current_dir(base).env("NO_COLOR", "1").env_remove("RUST_LOG");
    cmd
}

fn import_fixture(base: &Path) {
    fs::write(
        base.join("roster.tsv"),
        "Кромин Денис Артёмьевич\tПГС-701\tЭйлер Л.\n\
         Иванов Иван Иванович\tПГС-702\tЭйлер Л.\n\
         Чаплин Чарльз Спенсер\tПГС-701\tГаусс К.\n",
    )
    .unwrap();
    fs::write(
        base.join("statuses.tsv"),
        "ready_0105\tГотовность ВКР на 01.05\ncheck_plag\tДопуск к проверке на плагиат\n",
    )
    .unwrap();

    thesis(base)
        .args(["import", "roster.tsv", "statuses.tsv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported 2 teacher(s), 3 student(s)"));
}

#[test]
fn missing_document_fails_with_error() {
    let temp = tempfile::tempdir().unwrap();
    thesis(temp.path())
        .arg("teachers")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn import_then_list() {
    let temp = tempfile::tempdir().unwrap();
    import_fixture(temp.path());

    thesis(temp.path())
        .arg("teachers")
        .assert()
        .success()
        .stdout(predicate::str::contains("t0"))
        .stdout(predicate::str::contains("Эйлер Л."))
        .stdout(predicate::str::contains("2 student(s)"));

    thesis(temp.path())
        .args(["group", "ПГС-701"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Кромин Денис Артёмьевич"))
        .stdout(predicate::str::contains("Чаплин Чарльз Спенсер"))
        .stdout(predicate::str::contains("Иванов").not());

    thesis(temp.path())
        .args(["import", "roster.tsv", "statuses.tsv"])
        .assert()
        .failure();
}

#[test]
fn fuzzy_remove_and_status_flow() {
    let temp = tempfile::tempdir().unwrap();
    import_fixture(temp.path());

    thesis(temp.path())
        .args(["set-status", "Эйлер Л.", "Кромин Денис Артёмьевич", "check_plag", "да"])
        .assert()
        .success();
    thesis(temp.path())
        .args(["show", "Эйлер Л.", "Кромин Денис Артёмьевич"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Допуск к проверке на плагиат"))
        .stdout(predicate::str::contains("да"));

    thesis(temp.path())
        .args(["rm", "Иваов"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Student removed: Иванов Иван Иванович"));
    assert!(!temp
        .path()
        .join("data/students/ejler_l__ivanov_ii.json")
        .exists());
}

#[test]
fn config_round_trip_and_base_dir_flag() {
    let temp = tempfile::tempdir().unwrap();
    let elsewhere = tempfile::tempdir().unwrap();

    thesis(elsewhere.path())
        .args(["config", "max-edits", "2", "--base-dir"])
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("max-edits set to 2"));

    thesis(temp.path())
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("max-edits = 2"))
        .stdout(predicate::str::contains("document = data/students/teachers.json"));
}
