use anyhow::Result;
use chrono::NaiveDateTime;
use owo_colors::OwoColorize;

use eventdir_core::agenda::Agenda;
use eventdir_core::event::{Event, Language};
use eventdir_core::query::{self, EventQuery};

pub struct Options {
    pub from: Option<String>,
    pub to: Option<String>,
    pub tags: Vec<String>,
    pub online: Option<bool>,
    pub free: bool,
    pub org: Option<String>,
    pub search: Option<String>,
    pub all: bool,
}

pub fn run(agenda: &Agenda, options: Options) -> Result<()> {
    let events = if options.all {
        agenda.events()?.into_iter().map(|s| s.event).collect()
    } else {
        agenda.approved()?
    };

    // Without --from we list upcoming events only; "start" unbounds the past
    let from = match options.from.as_deref() {
        Some("start") => None,
        Some(s) => Some(s.to_string()),
        None => Some(chrono::Local::now().date_naive().format("%Y-%m-%d").to_string()),
    };

    let query = EventQuery {
        org: options.org,
        online: options.online,
        is_free: if options.free { Some(true) } else { None },
        tags: if options.tags.is_empty() {
            None
        } else {
            Some(options.tags.join(","))
        },
        search: options.search,
        date_start_range: from,
        date_end_range: options.to,
        ..Default::default()
    };

    let events = query::apply(events, &query)?;

    if events.is_empty() {
        println!("{}", "No events found".dimmed());
        return Ok(());
    }

    // Group events by day and print
    let mut current_date: Option<String> = None;

    for event in &events {
        let date_label = format_date_label(event.start_datetime);

        if current_date.as_ref() != Some(&date_label) {
            if current_date.is_some() {
                println!();
            }
            println!("{}", date_label.bold());
            current_date = Some(date_label);
        }

        let time = event.start_datetime.format("%H:%M");
        let org_tag = format!("[{}]", event.organization_name);
        println!(
            "  {} {} {} {}",
            time,
            event.event_name,
            marker(event),
            org_tag.dimmed()
        );
    }

    Ok(())
}

/// Short marker for the event's mode and price
fn marker(event: &Event) -> String {
    let mode = if event.online { "online" } else { "in-person" };
    if event.is_free {
        return format!("({}, free)", mode);
    }
    match event.translation(Language::PtBr) {
        Some(t) if t.cost > 0.0 => format!("({}, {})", mode, t.format_cost()),
        _ => format!("({})", mode),
    }
}

/// Format a date as a human-readable label (e.g. "Today", "Tomorrow", "Sat Sep 12")
fn format_date_label(start: NaiveDateTime) -> String {
    let today = chrono::Local::now().date_naive();
    let date = start.date();

    let diff = (date - today).num_days();
    match diff {
        0 => "Today".to_string(),
        1 => "Tomorrow".to_string(),
        _ => date.format("%a %b %-d %Y").to_string(),
    }
}
