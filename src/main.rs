//! awkit-tasks - Parse and schedule AI Workflow Kit task lists

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = awkit_tasks::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::from(awkit_tasks::cli::exit_code(&e))
    } else {
        ExitCode::SUCCESS
    }
}
