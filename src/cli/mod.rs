//! # Command-Line Interface
//!
//! User-facing commands and output formatting.
//!
//! ## Commands
//!
//! | Command | Purpose |
//! |---------|---------|
//! | `list [FILE]` | All tasks in dependency order |
//! | `list --next` | Tasks that can start now |
//! | `list --parallel` | Pending tasks grouped into parallel waves |
//! | `validate [FILE]` | Strict check for cycles and unknown ids |
//! | `specs` | Specs in the current project |
//!
//! `list` and `validate` take either a path or `--spec <name>`.
//!
//! ## Output Formats
//!
//! All commands support `--format` flag (or `--json`):
//! - `text` (default) - Human-readable output
//! - `json` - Machine-parseable JSON
//!
//! ## Exit Codes
//!
//! | Code | Meaning |
//! |------|---------|
//! | 0 | Success (including empty or cyclic task lists) |
//! | 1 | Unexpected error |
//! | 2 | Configuration error: missing or unreadable tasks file |
//! | 3 | `validate` found issues |
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse arguments and execute the appropriate command.

mod app;
mod output;
mod query;
mod specs;
mod validate_cmd;

pub use app::{exit_code, run, Cli, Commands, EXIT_CONFIG_ERROR, EXIT_VALIDATION_ERROR};
pub use output::{Output, OutputFormat};
pub use query::{ListMode, TaskSource};
pub use validate_cmd::CheckFailed;
