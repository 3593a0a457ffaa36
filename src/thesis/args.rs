use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// "0.3.2" for releases, "0.3.2@abc1234 2024-01-15 14:30" for dev builds.
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const GIT_COMMIT_DATE: &str = env!("GIT_COMMIT_DATE");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            VERSION.to_string()
        } else {
            format!("{}@{} {}", VERSION, GIT_HASH, GIT_COMMIT_DATE)
        }
    })
}

#[derive(Parser, Debug)]
#[command(name = "thesis", bin_name = "thesis", version = get_version())]
#[command(about = "Track thesis supervision status of students and their teachers", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Directory holding thesis.json and the data files (default: current directory)
    #[arg(long, global = true, value_name = "DIR")]
    pub base_dir: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create an empty document
    Init {
        /// Directory for status files, relative to the base directory
        #[arg(long, default_value = "data/students")]
        data_dir: String,
    },

    /// Build a new document from tab-separated roster and status files
    Import {
        /// Lines of `student<TAB>group<TAB>teacher`
        roster: PathBuf,

        /// Lines of `key<TAB>label`
        statuses: PathBuf,

        /// Directory for status files, relative to the base directory
        #[arg(long, default_value = "data/students")]
        data_dir: String,
    },

    /// List teachers with their ids
    #[command(alias = "t")]
    Teachers,

    /// List students with their ids
    #[command(alias = "s")]
    Students {
        /// Only students of this teacher
        #[arg(short, long)]
        teacher: Option<String>,
    },

    /// List known groups
    Groups,

    /// List status keys and labels
    Statuses,

    /// Students of one group
    Group {
        name: String,

        /// Print student ids instead of names
        #[arg(long)]
        ids: bool,
    },

    /// Register a teacher
    AddTeacher { name: String },

    /// Remove a teacher with all their students (status files are kept)
    RemoveTeacher { name: String },

    /// Register a student under a teacher
    AddStudent {
        teacher: String,
        name: String,

        #[arg(short, long, default_value = "")]
        group: String,

        /// Path or URL of the submitted work
        #[arg(short, long, default_value = "")]
        work: String,
    },

    /// Remove a student by (possibly misspelled) name
    #[command(alias = "rm")]
    RemoveStudent {
        query: String,

        /// Require the exact name
        #[arg(long)]
        exact: bool,

        /// Remove the entry of this teacher (implies an exact name)
        #[arg(short, long)]
        teacher: Option<String>,
    },

    /// Remove a student by id (e.g. s3)
    RemoveStudentId { id: String },

    /// Move a student to another teacher
    Transfer {
        student: String,
        to: String,

        /// Current teacher, checked before moving
        #[arg(long)]
        from: Option<String>,
    },

    /// Give a teacher access to another teacher's student
    Share {
        student: String,
        from: String,
        to: String,
    },

    /// Show the status values of a student
    Show { teacher: String, student: String },

    /// Set one status value of a student
    SetStatus {
        teacher: String,
        student: String,
        key: String,
        value: String,
    },

    /// Remove a key from the status schema
    DropStatus { key: String },

    /// Check status files against the document
    Doctor {
        /// Recreate missing status files
        #[arg(long)]
        fix: bool,
    },

    /// Get or set configuration
    Config {
        /// Configuration key (document, max-edits)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}
