//! # Thesis Tracker Architecture
//!
//! Thesis Tracker keeps thesis supervision status for students assigned to
//! teachers. It is a **UI-agnostic library**: the `thesis` binary is one client,
//! a chat bot is another, and both talk to the same API.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (main.rs, args.rs)                               │
//! │  - Parses arguments, formats output, handles terminal I/O   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands, id strings → typed ids        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Validate against document + index, stage, commit         │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - StorageBackend trait: FsBackend, MemBackend              │
//! │  - TeacherStore: snapshot + write-then-reload commit        │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Ids
//!
//! Chat buttons cannot carry full names, so teachers and students are also
//! addressed by small integer ids (`t0`, `s3`). They are derived from the
//! document order and renumbered by every mutation. See [`index`].
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! From `api.rs` inward, code takes and returns plain Rust values, never
//! writes to stdout/stderr and never exits the process. Diagnostics go
//! through `tracing`; the binary decides where they end up.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`commands`]: Business logic for each operation
//! - [`store`]: Storage abstraction, snapshots and commits
//! - [`model`]: Document, student records and status records
//! - [`index`]: Session-scoped integer ids
//! - [`naming`]: Transliteration and status file names
//! - [`fuzzy`]: Misspelling-tolerant name matching
//! - [`config`]: Configuration management
//! - [`error`]: Error types

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod fuzzy;
pub mod index;
pub mod model;
pub mod naming;
pub mod store;

#[cfg(any(test, feature = "test_utils"))]
pub mod test_utils;
