use clap::Parser;
use colored::*;
use std::fs;
use std::path::{Path, PathBuf};
use thesis_tracker::api::{CmdMessage, ConfigAction, DoctorReport, MessageLevel, ThesisApi};
use thesis_tracker::commands::{StatusView, StudentEntry, TeacherEntry};
use thesis_tracker::error::Result;
use thesis_tracker::model::NewStudent;
use thesis_tracker::store::fs_backend::FsBackend;
use tracing_subscriber::EnvFilter;
use unicode_width::UnicodeWidthStr;

mod args;
use args::{Cli, Commands};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let base_dir = match cli.base_dir {
        Some(dir) => dir,
        None => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
    };

    let command = match cli.command {
        Some(Commands::Init { data_dir }) => {
            let result = ThesisApi::init(&base_dir, &data_dir)?;
            print_messages(&result.messages);
            return Ok(());
        }
        Some(Commands::Import {
            roster,
            statuses,
            data_dir,
        }) => {
            let roster = fs::read_to_string(roster)?;
            let statuses = fs::read_to_string(statuses)?;
            let result = ThesisApi::import(&base_dir, &data_dir, &roster, &statuses)?;
            print_messages(&result.messages);
            return Ok(());
        }
        Some(Commands::Config { key, value }) => return handle_config(&base_dir, key, value),
        Some(command) => command,
        None => Commands::Teachers,
    };

    let mut api = ThesisApi::open(&base_dir)?;
    match command {
        Commands::Teachers => {
            let result = api.list_teachers()?;
            print_teachers(&result.listed_teachers);
            print_messages(&result.messages);
        }
        Commands::Students { teacher } => {
            let result = api.list_students(teacher.as_deref())?;
            print_students(&result.listed_students);
            print_messages(&result.messages);
        }
        Commands::Groups => {
            for group in api.get_groups() {
                println!("{}", group);
            }
        }
        Commands::Statuses => print_statuses(&api),
        Commands::Group { name, ids } => {
            if ids {
                for id in api.get_student_ids_for_group(&name) {
                    println!("{}", id);
                }
            } else {
                for student in api.get_student_names_for_group(&name) {
                    println!("{}", student);
                }
            }
        }
        Commands::AddTeacher { name } => print_messages(&api.add_teacher(&name)?.messages),
        Commands::RemoveTeacher { name } => print_messages(&api.remove_teacher(&name)?.messages),
        Commands::AddStudent {
            teacher,
            name,
            group,
            work,
        } => {
            let student = NewStudent::new(name).with_group(group).with_work(work);
            print_messages(&api.add_student(&teacher, student)?.messages);
        }
        Commands::RemoveStudent {
            query,
            exact,
            teacher,
        } => {
            let full_match = exact || teacher.is_some();
            let result = api.remove_student_by_name(&query, full_match, teacher.as_deref())?;
            print_messages(&result.messages);
        }
        Commands::RemoveStudentId { id } => {
            print_messages(&api.remove_student_by_id(&id)?.messages)
        }
        Commands::Transfer { student, to, from } => {
            let result = api.transfer_student(&student, &to, from.as_deref())?;
            print_messages(&result.messages);
        }
        Commands::Share { student, from, to } => {
            print_messages(&api.duplicate_access(&to, &from, &student)?.messages)
        }
        Commands::Show { teacher, student } => {
            let result = api.show_status(&teacher, &student)?;
            if let Some(view) = &result.status {
                print_status(view);
            }
            print_messages(&result.messages);
        }
        Commands::SetStatus {
            teacher,
            student,
            key,
            value,
        } => {
            let result = api.change_student_status(&teacher, &student, &key, &value)?;
            print_messages(&result.messages);
        }
        Commands::DropStatus { key } => print_messages(&api.remove_status(&key)?.messages),
        Commands::Doctor { fix } => {
            let result = api.doctor(fix)?;
            if let Some(report) = &result.report {
                print_report(&api, report);
            }
            print_messages(&result.messages);
        }
        Commands::Init { .. } | Commands::Import { .. } | Commands::Config { .. } => {}
    }
    Ok(())
}

fn handle_config(base_dir: &Path, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(key), None) => ConfigAction::ShowKey(key),
        (Some(key), Some(value)) => ConfigAction::Set(key, value),
    };

    let result = ThesisApi::<FsBackend>::config(base_dir, action)?;
    if let (Some(config), true) = (&result.config, result.messages.is_empty()) {
        for key in thesis_tracker::config::TrackerConfig::keys() {
            println!("{} = {}", key, config.get(key).unwrap_or_default());
        }
    }
    print_messages(&result.messages);
    Ok(())
}

fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

/// Pads `s` with spaces to `width` terminal columns.
fn pad_to_width(s: &str, width: usize) -> String {
    format!("{}{}", s, " ".repeat(width.saturating_sub(s.width())))
}

fn print_teachers(teachers: &[TeacherEntry]) {
    if teachers.is_empty() {
        println!("No teachers found.");
        return;
    }
    let name_width = teachers.iter().map(|t| t.name.width()).max().unwrap_or(0);
    for teacher in teachers {
        println!(
            "{:>5}  {}  {}",
            teacher.id.to_string().yellow(),
            pad_to_width(&teacher.name, name_width),
            format!("{} student(s)", teacher.student_count).dimmed()
        );
    }
}

const SHARED_MARKER: &str = "⇄";

fn print_students(students: &[StudentEntry]) {
    if students.is_empty() {
        println!("No students found.");
        return;
    }
    let name_width = students.iter().map(|s| s.name.width()).max().unwrap_or(0);
    let group_width = students
        .iter()
        .map(|s| s.record.group.width())
        .max()
        .unwrap_or(0);
    for student in students {
        let marker = if student.record.is_duplicate() {
            SHARED_MARKER
        } else {
            " "
        };
        println!(
            "{:>5} {} {}  {}  {}",
            student.id.to_string().yellow(),
            marker.cyan(),
            pad_to_width(&student.name, name_width),
            pad_to_width(&student.record.group, group_width),
            student.teacher.dimmed()
        );
    }
}

fn print_statuses<B: thesis_tracker::store::StorageBackend>(api: &ThesisApi<B>) {
    let statuses = api.get_statuses();
    let key_width = statuses.keys().map(|k| k.width()).max().unwrap_or(0);
    for (key, label) in statuses {
        println!("{}  {}", pad_to_width(key, key_width).yellow(), label);
    }
}

fn print_status(view: &StatusView) {
    println!("{} ({})", view.student.bold(), view.teacher);
    println!("{}", view.path.display().to_string().dimmed());
    let label_width = view.lines.iter().map(|l| l.label.width()).max().unwrap_or(0);
    for line in &view.lines {
        let value = if line.value.is_empty() {
            "-".dimmed()
        } else {
            line.value.normal()
        };
        println!("  {}  {}", pad_to_width(&line.label, label_width), value);
    }
}

fn print_report<B: thesis_tracker::store::StorageBackend>(
    api: &ThesisApi<B>,
    report: &DoctorReport,
) {
    for entry in &report.missing_files {
        println!(
            "{} {} ({}): {}",
            "missing".red(),
            entry.student,
            entry.teacher,
            api.store().status_path(&entry.file).display()
        );
    }
    for (file, keys) in &report.unknown_keys {
        println!("{} {}: {}", "unknown keys".yellow(), file, keys.join(", "));
    }
    for (file, error) in &report.unreadable {
        println!("{} {}: {}", "unreadable".red(), file, error);
    }
    for entry in &report.dangling_duplicates {
        println!(
            "{} {} ({})",
            "dangling shared".yellow(),
            entry.student,
            entry.teacher
        );
    }
    for file in &report.recreated {
        println!("{} {}", "recreated".green(), file);
    }
}
