//! Validate a submission file and send it for review.

use std::path::Path;

use anyhow::{Context, Result, bail};
use owo_colors::OwoColorize;

use eventdir_core::agenda::Agenda;
use eventdir_core::submission::EventSubmission;

use crate::client::Client;

pub async fn run(file: &Path, local: bool, server: &str) -> Result<()> {
    let submission = read_submission(file)?;

    if let Err(errors) = submission.validate() {
        eprintln!("{}", "Submission is invalid:".red().bold());
        for error in &errors {
            eprintln!("  - {}", error);
        }
        bail!("{} validation error(s)", errors.len());
    }

    let event = if local {
        let agenda = Agenda::load()?;
        agenda.submit(&submission.into_event())?
    } else {
        Client::new(server).submit(&submission).await?
    };

    println!(
        "{} Submitted '{}' for review (id: {})",
        "✓".green(),
        event.event_name,
        event.id
    );

    Ok(())
}

fn read_submission(file: &Path) -> Result<EventSubmission> {
    let content = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;

    let is_json = file.extension().is_some_and(|e| e == "json");

    if is_json {
        serde_json::from_str(&content)
            .with_context(|| format!("{} is not a valid submission", file.display()))
    } else {
        serde_yml::from_str(&content)
            .with_context(|| format!("{} is not a valid submission", file.display()))
    }
}
