//! Validate every record in the data directory.

use anyhow::{Result, bail};
use owo_colors::OwoColorize;

use eventdir_core::agenda::Agenda;
use eventdir_core::record;

pub fn run(agenda: &Agenda) -> Result<()> {
    let dir = agenda.data_path();

    if !dir.exists() {
        bail!("Data directory {} does not exist", dir.display());
    }

    let mut ok = 0;
    let mut failures: Vec<(String, String)> = Vec::new();

    let mut entries: Vec<_> = std::fs::read_dir(&dir)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.extension().is_some_and(|e| e == "yml" || e == "yaml"))
        .collect();
    entries.sort();

    for path in entries {
        let id = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("?")
            .to_string();

        match std::fs::read_to_string(&path) {
            Ok(content) => match record::parse_event(&id, &content) {
                Ok(_) => ok += 1,
                Err(e) => failures.push((id, e.to_string())),
            },
            Err(e) => failures.push((id, e.to_string())),
        }
    }

    println!("{} record(s) valid", ok.to_string().green());

    if !failures.is_empty() {
        eprintln!();
        for (id, message) in &failures {
            eprintln!("{} {}: {}", "✗".red(), id.bold(), message);
        }
        bail!("{} record(s) failed to parse", failures.len());
    }

    Ok(())
}
