//! Export the approved events as static JSON files.
//!
//! Produces the two files the site build serves directly: `events.json`
//! (flat, sorted by start time) and `events_grouped_by_date.json`.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};

use eventdir_core::agenda::Agenda;
use eventdir_core::event::Event;
use eventdir_core::query;

pub fn run(agenda: &Agenda, out: &Path) -> Result<()> {
    let mut events = agenda.approved()?;

    if events.is_empty() {
        anyhow::bail!("No approved events found in {}", agenda.data_path().display());
    }

    query::sort_by_start(&mut events);

    std::fs::create_dir_all(out)
        .with_context(|| format!("Failed to create {}", out.display()))?;

    let events_path = out.join("events.json");
    std::fs::write(&events_path, serde_json::to_string_pretty(&events)?)?;
    println!("Wrote {} events to {}", events.len(), events_path.display());

    let grouped: BTreeMap<String, Vec<Event>> = query::group_by_date(&events)
        .into_iter()
        .map(|(date, events)| (date.format("%Y-%m-%d").to_string(), events))
        .collect();

    let grouped_path = out.join("events_grouped_by_date.json");
    std::fs::write(&grouped_path, serde_json::to_string_pretty(&grouped)?)?;
    println!("Wrote grouped events to {}", grouped_path.display());

    Ok(())
}
