//! Strict validation command

use anyhow::Result;
use thiserror::Error;

use super::output::Output;
use crate::domain::validate;
use crate::storage::TasksDocument;

/// Returned when validation found at least one issue
#[derive(Debug, Error)]
#[error("Validation failed: {count} issue(s) found in {path}")]
pub struct CheckFailed {
    pub count: usize,
    pub path: String,
}

/// Validates a tasks document and prints the report
pub fn run(output: &Output, doc: &TasksDocument) -> Result<()> {
    let report = validate(doc.tasks());
    output.verbose_ctx(
        "validate",
        &format!(
            "Checked {} tasks, {} issue(s)",
            doc.tasks().len(),
            report.len()
        ),
    );

    if output.is_json() {
        output.data(&serde_json::json!({
            "file": doc.path().display().to_string(),
            "tasks": doc.tasks().len(),
            "valid": report.is_clean(),
            "issues": report.issues,
        }));
    } else if report.is_clean() {
        println!(
            "No issues found ({} tasks in {}).",
            doc.tasks().len(),
            doc.path().display()
        );
    } else {
        println!("Found {} issue(s) in {}:", report.len(), doc.path().display());
        for issue in &report.issues {
            println!("  - {}", issue);
        }
    }

    if report.is_clean() {
        Ok(())
    } else {
        Err(CheckFailed {
            count: report.len(),
            path: doc.path().display().to_string(),
        }
        .into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::OutputFormat;

    #[test]
    fn clean_document_passes() {
        let doc = TasksDocument::from_content("tasks.md", "- [ ] 1. A\n- [ ] 2. B\n  - _depends_on: 1_");
        let output = Output::new(OutputFormat::Json, false);

        assert!(run(&output, &doc).is_ok());
    }

    #[test]
    fn cycle_fails_with_issue_count() {
        let doc = TasksDocument::from_content(
            "tasks.md",
            "- [ ] 1. A\n  - _depends_on: 2_\n- [ ] 2. B\n  - _depends_on: 1, 9_",
        );
        let output = Output::new(OutputFormat::Json, false);

        let err = run(&output, &doc).unwrap_err();
        let failed = err.downcast_ref::<CheckFailed>().unwrap();
        assert_eq!(failed.count, 2);
        assert_eq!(failed.path, "tasks.md");
    }
}
