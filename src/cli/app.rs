//! Main CLI application structure

use anyhow::Result;
use clap::{Parser, Subcommand};

use super::output::{Output, OutputFormat};
use super::query::{self, ListMode, TaskSource};
use super::validate_cmd::{self, CheckFailed};
use super::specs;
use crate::storage::{ConfigError, GlobalConfig, Project};

/// Exit code for configuration errors (bad arguments, missing files)
pub const EXIT_CONFIG_ERROR: u8 = 2;

/// Exit code for a failed `validate`
pub const EXIT_VALIDATION_ERROR: u8 = 3;

#[derive(Parser)]
#[command(name = "awkit-tasks")]
#[command(author, version, about = "Parse and schedule AI Workflow Kit task lists")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(long, short = 'f', global = true, env = "AWKIT_FORMAT")]
    pub format: Option<OutputFormat>,

    /// Shorthand for --format json
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List tasks in dependency order
    List {
        #[command(flatten)]
        source: TaskSource,

        /// Show only tasks that can start now
        #[arg(long, conflicts_with = "parallel")]
        next: bool,

        /// Group pending tasks into parallel waves
        #[arg(long)]
        parallel: bool,
    },

    /// Check for unknown dependencies, cycles, duplicate ids and misplaced subtasks
    Validate {
        #[command(flatten)]
        source: TaskSource,
    },

    /// List specs in the current project
    Specs,
}

impl Cli {
    /// Format given by --json, --format or AWKIT_FORMAT, if any
    pub fn explicit_format(&self) -> Option<OutputFormat> {
        if self.json {
            Some(OutputFormat::Json)
        } else {
            self.format
        }
    }

    /// Resolves the output format, falling back to the global config
    pub fn output_format(&self, global: &GlobalConfig) -> OutputFormat {
        self.explicit_format().unwrap_or(global.default_format)
    }
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // A broken global config falls back to text
    let (format, config_error) = match cli.explicit_format() {
        Some(format) => (format, None),
        None => match GlobalConfig::load() {
            Ok(global) => (cli.output_format(&global), None),
            Err(e) => (OutputFormat::default(), Some(e)),
        },
    };
    let output = Output::new(format, cli.verbose);

    output.verbose("awkit-tasks starting");
    if let Some(e) = config_error {
        output.verbose_ctx("config", &format!("Ignoring global config: {:#}", e));
    }

    match cli.command {
        Commands::List {
            source,
            next,
            parallel,
        } => {
            let mode = if next {
                ListMode::Next
            } else if parallel {
                ListMode::Parallel
            } else {
                ListMode::Order
            };
            output.verbose_ctx("list", &format!("Mode: {:?}", mode));
            let doc = source.load(&output)?;
            query::list(&output, &doc, mode)?
        }

        Commands::Validate { source } => {
            let doc = source.load(&output)?;
            validate_cmd::run(&output, &doc)?
        }

        Commands::Specs => {
            let project = Project::open_current()?;
            output.verbose(&format!("Project root: {}", project.root().display()));
            specs::list(&output, &project)?
        }
    }

    Ok(())
}

/// Maps an error to the process exit code
///
/// 2 for configuration errors, 3 for validation failures, 1 otherwise.
pub fn exit_code(err: &anyhow::Error) -> u8 {
    for cause in err.chain() {
        if cause.is::<ConfigError>() {
            return EXIT_CONFIG_ERROR;
        }
        if cause.is::<CheckFailed>() {
            return EXIT_VALIDATION_ERROR;
        }
    }
    1
}
