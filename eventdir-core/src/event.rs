//! Community tech-event types.
//!
//! These types represent events in the shape the public API serves: a flat
//! record with scheduling and location fields plus a per-language `intl`
//! block carrying edition, cost and description strings.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::EventDirError;

/// A community tech event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    /// Stable identifier, derived from the record's filename stem
    pub id: String,
    pub organization_name: String,
    pub event_name: String,
    pub start_datetime: NaiveDateTime,
    pub end_datetime: NaiveDateTime,

    // Location
    pub address: Option<String>,
    pub state: Option<BrazilState>,
    pub maps_link: Option<String>,
    pub online: bool,

    pub is_free: bool,
    pub event_link: Option<String>,

    /// Review status; only approved events are publicly listed
    pub status: EventStatus,

    pub tags: Vec<String>,

    /// Per-language translation blocks, keyed by language code
    pub intl: BTreeMap<Language, Translation>,
}

impl Event {
    /// The translation for `lang`, falling back to the first available one.
    pub fn translation(&self, lang: Language) -> Option<&Translation> {
        self.intl.get(&lang).or_else(|| self.intl.values().next())
    }

    /// Case-insensitive search over event name, organization and every
    /// translation's short description.
    pub fn matches_search(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        self.event_name.to_lowercase().contains(&term)
            || self.organization_name.to_lowercase().contains(&term)
            || self
                .intl
                .values()
                .any(|t| t.short_description.to_lowercase().contains(&term))
    }

    /// The calendar date the event starts on (used for grouping).
    pub fn start_date(&self) -> NaiveDate {
        self.start_datetime.date()
    }
}

/// A per-language translation block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Translation {
    pub event_edition: String,
    pub cost: f64,
    pub currency: Option<Currency>,
    pub banner_link: Option<String>,
    pub short_description: String,
}

impl Translation {
    /// Display the cost with its currency symbol ("R$ 50.00"), or just the
    /// amount when no currency is set.
    pub fn format_cost(&self) -> String {
        match self.currency {
            Some(currency) => format!("{} {:.2}", currency.symbol(), self.cost),
            None => format!("{:.2}", self.cost),
        }
    }
}

/// Review status of an event record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    Requested,
    Approved,
    Declined,
}

impl fmt::Display for EventStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventStatus::Requested => write!(f, "requested"),
            EventStatus::Approved => write!(f, "approved"),
            EventStatus::Declined => write!(f, "declined"),
        }
    }
}

/// Language codes supported by the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Language {
    #[serde(rename = "pt-br")]
    PtBr,
    #[serde(rename = "en-us")]
    EnUs,
    #[serde(rename = "es-es")]
    EsEs,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::PtBr, Language::EnUs, Language::EsEs];

    pub fn as_str(&self) -> &'static str {
        match self {
            Language::PtBr => "pt-br",
            Language::EnUs => "en-us",
            Language::EsEs => "es-es",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Language {
    type Err = EventDirError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pt-br" => Ok(Language::PtBr),
            "en-us" => Ok(Language::EnUs),
            "es-es" => Ok(Language::EsEs),
            other => Err(EventDirError::Validation(format!(
                "Unknown language code '{}'",
                other
            ))),
        }
    }
}

/// Currencies accepted for paid events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Currency {
    BRL,
    USD,
    EUR,
    AUD,
    CAD,
}

impl Currency {
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::BRL => "R$",
            Currency::USD => "$",
            Currency::EUR => "€",
            Currency::AUD => "A$",
            Currency::CAD => "C$",
        }
    }
}

/// Brazilian state codes used for in-person events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[allow(clippy::upper_case_acronyms)]
pub enum BrazilState {
    AP,
    AM,
    BA,
    CE,
    DF,
    ES,
    GO,
    MA,
    MT,
    MS,
    MG,
    PA,
    PB,
    PR,
    PE,
    PI,
    RJ,
    RN,
    RS,
    RO,
    RR,
    SC,
    SP,
    SE,
    TO,
}

impl fmt::Display for BrazilState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl FromStr for BrazilState {
    type Err = EventDirError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        serde_json::from_value(serde_json::Value::String(s.to_uppercase()))
            .map_err(|_| EventDirError::Validation(format!("Unknown state code '{}'", s)))
    }
}

/// Partial update applied to an existing event (review tooling)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventPatch {
    pub organization_name: Option<String>,
    pub event_name: Option<String>,
    pub start_datetime: Option<NaiveDateTime>,
    pub end_datetime: Option<NaiveDateTime>,
    pub address: Option<String>,
    pub state: Option<BrazilState>,
    pub maps_link: Option<String>,
    pub online: Option<bool>,
    pub is_free: Option<bool>,
    pub event_link: Option<String>,
    pub tags: Option<Vec<String>>,
    pub intl: Option<BTreeMap<Language, Translation>>,
}

impl EventPatch {
    /// Apply this patch to an event, replacing only the fields that are set.
    pub fn apply(&self, event: &mut Event) {
        if let Some(ref v) = self.organization_name {
            event.organization_name = v.clone();
        }
        if let Some(ref v) = self.event_name {
            event.event_name = v.clone();
        }
        if let Some(v) = self.start_datetime {
            event.start_datetime = v;
        }
        if let Some(v) = self.end_datetime {
            event.end_datetime = v;
        }
        if let Some(ref v) = self.address {
            event.address = Some(v.clone());
        }
        if let Some(v) = self.state {
            event.state = Some(v);
        }
        if let Some(ref v) = self.maps_link {
            event.maps_link = Some(v.clone());
        }
        if let Some(v) = self.online {
            event.online = v;
        }
        if let Some(v) = self.is_free {
            event.is_free = v;
        }
        if let Some(ref v) = self.event_link {
            event.event_link = Some(v.clone());
        }
        if let Some(ref v) = self.tags {
            event.tags = v.clone();
        }
        if let Some(ref v) = self.intl {
            event.intl = v.clone();
        }
    }
}
