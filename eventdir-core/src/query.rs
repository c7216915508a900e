//! Filtering, sorting, grouping and pagination over event lists.
//!
//! The whole pipeline is straight-line array logic: predicate filtering,
//! a stable sort by start time, and slice-based pagination. Query parameter
//! names mirror the public API (`name`, `org`, `tags`, `date_start_range`,
//! ...), so this type doubles as the server's query extractor.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Deserialize;

use crate::constants::DEFAULT_PER_PAGE;
use crate::date_range::DateRange;
use crate::error::EventDirResult;
use crate::event::{BrazilState, Event};

/// Filter criteria for event listings.
/// Every field is optional; an empty query matches everything.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventQuery {
    /// Substring match on event name
    pub name: Option<String>,
    /// Substring match on organization name
    pub org: Option<String>,
    /// Substring match on address
    pub address: Option<String>,
    pub state: Option<BrazilState>,
    /// Online (true) or in-person (false)
    pub online: Option<bool>,
    pub is_free: Option<bool>,
    /// Comma-separated list of tags; an event matches if it carries any
    pub tags: Option<String>,
    /// Free-text search over name, organization and descriptions
    pub search: Option<String>,
    /// Only events starting at or after this date (YYYY-MM-DD)
    pub date_from: Option<String>,
    pub date_start_range: Option<String>,
    pub date_end_range: Option<String>,
    /// 1-based page number; pagination only kicks in when set
    pub page: Option<usize>,
    pub per_page: Option<usize>,
}

impl EventQuery {
    /// Split the comma-separated tag list, dropping empty entries.
    pub fn parsed_tags(&self) -> Option<Vec<String>> {
        let tags = self.tags.as_ref()?;
        let parsed: Vec<String> = tags
            .split(',')
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect();

        if parsed.is_empty() { None } else { Some(parsed) }
    }

    /// The date window selected by this query, if any bound was given.
    pub fn date_range(&self) -> EventDirResult<Option<DateRange>> {
        if self.date_from.is_none()
            && self.date_start_range.is_none()
            && self.date_end_range.is_none()
        {
            return Ok(None);
        }

        // date_from is a lower bound only; the range params bound both ends
        let from = self
            .date_start_range
            .as_deref()
            .or(self.date_from.as_deref());

        let mut range = DateRange::all();
        if let Some(s) = from {
            range.from = Some(crate::date_range::parse_date_start(s)?);
        }
        if let Some(s) = self.date_end_range.as_deref() {
            range.to = Some(crate::date_range::parse_date_end(s)?);
        }

        Ok(Some(range))
    }
}

/// Run the full pipeline: filter, sort by start time, paginate.
pub fn apply(events: Vec<Event>, query: &EventQuery) -> EventDirResult<Vec<Event>> {
    let range = query.date_range()?;

    let mut filtered: Vec<Event> = events
        .into_iter()
        .filter(|e| matches(e, query, range.as_ref()))
        .collect();

    sort_by_start(&mut filtered);

    Ok(paginate(filtered, query.page, query.per_page))
}

/// Whether a single event passes every predicate of the query.
fn matches(event: &Event, query: &EventQuery, range: Option<&DateRange>) -> bool {
    if let Some(ref name) = query.name
        && !contains_ci(&event.event_name, name)
    {
        return false;
    }

    if let Some(ref org) = query.org
        && !contains_ci(&event.organization_name, org)
    {
        return false;
    }

    if let Some(ref address) = query.address {
        let Some(ref event_address) = event.address else {
            return false;
        };
        if !contains_ci(event_address, address) {
            return false;
        }
    }

    if let Some(state) = query.state
        && event.state != Some(state)
    {
        return false;
    }

    if let Some(online) = query.online
        && event.online != online
    {
        return false;
    }

    if let Some(is_free) = query.is_free
        && event.is_free != is_free
    {
        return false;
    }

    if let Some(tags) = query.parsed_tags()
        && !tags.iter().any(|t| event.tags.contains(t))
    {
        return false;
    }

    if let Some(ref term) = query.search
        && !event.matches_search(term)
    {
        return false;
    }

    if let Some(range) = range
        && !range.contains(event.start_datetime, event.end_datetime)
    {
        return false;
    }

    true
}

/// Stable sort by start time, so same-instant events keep their id order.
pub fn sort_by_start(events: &mut [Event]) {
    events.sort_by_key(|e| e.start_datetime);
}

/// Slice out one page. `page` is 1-based; out-of-range pages yield an empty
/// list. Without an explicit page the whole list is returned.
pub fn paginate(events: Vec<Event>, page: Option<usize>, per_page: Option<usize>) -> Vec<Event> {
    let Some(page) = page else {
        return events;
    };

    let per_page = per_page.unwrap_or(DEFAULT_PER_PAGE).max(1);
    let start = page.saturating_sub(1).saturating_mul(per_page);

    events.into_iter().skip(start).take(per_page).collect()
}

/// Group events by the calendar date they start on.
pub fn group_by_date(events: &[Event]) -> BTreeMap<NaiveDate, Vec<Event>> {
    let mut grouped: BTreeMap<NaiveDate, Vec<Event>> = BTreeMap::new();

    for event in events {
        grouped
            .entry(event.start_date())
            .or_default()
            .push(event.clone());
    }

    grouped
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
