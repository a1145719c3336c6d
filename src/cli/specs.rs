//! Spec listing

use anyhow::Result;

use super::output::Output;
use crate::storage::{Project, TasksDocument};

/// Lists specs that have a tasks.md, with completion counts
pub fn list(output: &Output, project: &Project) -> Result<()> {
    output.verbose_ctx(
        "specs",
        &format!("Scanning {}", project.specs_dir().display()),
    );

    let mut rows = Vec::new();
    for name in project.spec_names()? {
        let doc = TasksDocument::load(project.tasks_path(&name)?)?;
        let (done, total) = doc.progress();
        rows.push((name, doc, done, total));
    }

    if output.is_json() {
        let items: Vec<_> = rows
            .iter()
            .map(|(name, doc, done, total)| {
                serde_json::json!({
                    "name": name,
                    "path": doc.path().display().to_string(),
                    "completed": done,
                    "total": total,
                })
            })
            .collect();
        output.data(&items);
    } else if rows.is_empty() {
        println!("No specs found in {}.", project.specs_dir().display());
    } else {
        println!("Specs ({}):", rows.len());
        println!("{:<30} DONE", "SPEC");
        println!("{}", "-".repeat(42));
        for (name, _, done, total) in &rows {
            println!("{:<30} {}/{}", name, done, total);
        }
    }

    Ok(())
}
