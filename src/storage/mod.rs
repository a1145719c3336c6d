//! # Storage Layer
//!
//! Everything that touches the filesystem: reading tasks documents,
//! locating the project, and loading configuration. The domain layer never
//! sees a path.
//!
//! ## Project Structure
//!
//! ```text
//! .ai/
//! ├── config/
//! │   └── workflow.yaml     # specs.base_path (default .ai/specs)
//! └── specs/
//!     └── <spec>/
//!         └── tasks.md      # Task list parsed by this crate
//! ```
//!
//! ## Key Types
//!
//! - [`TasksDocument`] - A parsed `tasks.md` and its path
//! - [`Project`] - Project root and spec resolution
//! - [`GlobalConfig`] - User-level output defaults (TOML)
//! - [`WorkflowConfig`] - Project `workflow.yaml` settings (YAML)

mod config;
mod project;
mod tasks_file;

pub use config::{
    find_project_root, ConfigError, GlobalConfig, OutputFormat, SpecsConfig, WorkflowConfig,
    CONFIG_DIR_ENV,
};
pub use project::{Project, TASKS_FILE};
pub use tasks_file::TasksDocument;
