//! Staff review workflow against a running eventdir-server.

use anyhow::Result;
use owo_colors::OwoColorize;

use crate::client::Client;

pub async fn list(client: &Client, token: &str) -> Result<()> {
    let pending = client.pending(token).await?;

    if pending.is_empty() {
        println!("{}", "No submissions waiting for review".dimmed());
        return Ok(());
    }

    for event in &pending {
        let when = event.start_datetime.format("%Y-%m-%d %H:%M");
        println!(
            "{}  {} {}\n    {} {}",
            event.id.bold(),
            event.event_name,
            format!("[{}]", event.organization_name).dimmed(),
            when,
            if event.online { "online" } else { "in-person" }.dimmed(),
        );
    }
    println!("\n{} submission(s) pending", pending.len());

    Ok(())
}

pub async fn approve(client: &Client, token: &str, id: &str) -> Result<()> {
    let response = client.manage(token, id, "approved").await?;
    println!("{} {}", "✓".green(), response.message);
    Ok(())
}

pub async fn decline(client: &Client, token: &str, id: &str) -> Result<()> {
    let response = client.manage(token, id, "declined").await?;
    println!("{} {}", "✓".green(), response.message);
    Ok(())
}
