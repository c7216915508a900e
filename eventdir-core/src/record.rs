//! YAML event record parsing and generation.
//!
//! Event records live as one YAML file per event. The on-disk schema is the
//! same flat shape the API serves, with ISO-8601 local datetimes and a
//! per-language `intl` map. Records without an explicit `status` are treated
//! as approved: the community directory is the published dataset, and only
//! server-side submissions carry `status: requested`.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::{EventDirError, EventDirResult};
use crate::event::{BrazilState, Currency, Event, EventStatus, Language, Translation};

/// On-disk record shape. Datetimes stay strings here so we can accept both
/// second- and minute-precision values.
#[derive(Serialize, Deserialize)]
struct RawEvent {
    organization_name: String,
    event_name: String,
    start_datetime: String,
    end_datetime: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    state: Option<BrazilState>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    maps_link: Option<String>,
    #[serde(default)]
    online: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    is_free: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    event_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    status: Option<EventStatus>,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    intl: BTreeMap<Language, RawTranslation>,
}

#[derive(Serialize, Deserialize)]
struct RawTranslation {
    #[serde(default)]
    event_edition: String,
    #[serde(default)]
    cost: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    currency: Option<Currency>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    banner_link: Option<String>,
    #[serde(default)]
    short_description: String,
}

/// Parse YAML record content into an Event, using `id` as its identifier.
pub fn parse_event(id: &str, content: &str) -> EventDirResult<Event> {
    let raw: RawEvent = serde_yml::from_str(content)
        .map_err(|e| EventDirError::RecordParse(format!("{}: {}", id, e)))?;

    let start_datetime = parse_datetime(&raw.start_datetime)?;
    let end_datetime = parse_datetime(&raw.end_datetime)?;

    if end_datetime < start_datetime {
        return Err(EventDirError::RecordParse(format!(
            "{}: end_datetime is before start_datetime",
            id
        )));
    }

    if raw.intl.is_empty() {
        return Err(EventDirError::RecordParse(format!(
            "{}: record has no intl block",
            id
        )));
    }

    let intl: BTreeMap<Language, Translation> = raw
        .intl
        .into_iter()
        .map(|(lang, t)| {
            (
                lang,
                Translation {
                    event_edition: t.event_edition,
                    cost: t.cost,
                    currency: t.currency,
                    banner_link: t.banner_link,
                    short_description: t.short_description,
                },
            )
        })
        .collect();

    // Derive is_free from the cost when the record doesn't say
    let is_free = raw
        .is_free
        .unwrap_or_else(|| intl.values().next().is_some_and(|t| t.cost == 0.0));

    Ok(Event {
        id: id.to_string(),
        organization_name: raw.organization_name,
        event_name: raw.event_name,
        start_datetime,
        end_datetime,
        address: raw.address,
        state: raw.state,
        maps_link: raw.maps_link,
        online: raw.online,
        is_free,
        event_link: raw.event_link,
        status: raw.status.unwrap_or(EventStatus::Approved),
        tags: raw.tags,
        intl,
    })
}

/// Generate YAML record content for an event.
pub fn generate_yaml(event: &Event) -> EventDirResult<String> {
    let raw = RawEvent {
        organization_name: event.organization_name.clone(),
        event_name: event.event_name.clone(),
        start_datetime: event.start_datetime.format("%Y-%m-%dT%H:%M:%S").to_string(),
        end_datetime: event.end_datetime.format("%Y-%m-%dT%H:%M:%S").to_string(),
        address: event.address.clone(),
        state: event.state,
        maps_link: event.maps_link.clone(),
        online: event.online,
        is_free: Some(event.is_free),
        event_link: event.event_link.clone(),
        status: Some(event.status),
        tags: event.tags.clone(),
        intl: event
            .intl
            .iter()
            .map(|(lang, t)| {
                (
                    *lang,
                    RawTranslation {
                        event_edition: t.event_edition.clone(),
                        cost: t.cost,
                        currency: t.currency,
                        banner_link: t.banner_link.clone(),
                        short_description: t.short_description.clone(),
                    },
                )
            })
            .collect(),
    };

    serde_yml::to_string(&raw).map_err(|e| EventDirError::RecordGenerate(e.to_string()))
}

/// Parse an ISO-8601 local datetime, with or without seconds
fn parse_datetime(s: &str) -> EventDirResult<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M"))
        .map_err(|_| {
            EventDirError::RecordParse(format!(
                "Invalid datetime '{}'. Expected YYYY-MM-DDTHH:MM[:SS]",
                s
            ))
        })
}
