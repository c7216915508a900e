//! Event submission: API payload validation and the multi-step form wizard.
//!
//! The wizard walks a linear sequence of steps and validates only the fields
//! belonging to the current step before letting the user move forward. The
//! step list is not fixed: one translation step is inserted per supported
//! language beyond the primary one. Going back never validates.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{EventDirError, EventDirResult};
use crate::event::{BrazilState, Currency, Event, EventStatus, Language, Translation};

const MIN_DESCRIPTION_CHARS: usize = 10;
const MAX_DESCRIPTION_CHARS: usize = 300;

/// A single field validation failure
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    fn new(field: &str, message: impl Into<String>) -> Self {
        FieldError {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Collapse field errors into a single core error (for API boundaries).
pub fn validation_error(errors: &[FieldError]) -> EventDirError {
    let joined = errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ");
    EventDirError::Validation(joined)
}

/// How the event is priced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CostType {
    Free,
    Paid,
    /// Price not announced yet; stored as cost 0 with a currency
    Undefined,
}

/// The payload POSTed to /events/submit.
///
/// This is the API-shaped submission; the wizard below produces one from its
/// flat form fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventSubmission {
    pub organization_name: String,
    pub event_name: String,
    pub start_datetime: NaiveDateTime,
    pub end_datetime: NaiveDateTime,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub state: Option<BrazilState>,
    #[serde(default)]
    pub maps_link: Option<String>,
    pub online: bool,
    pub is_free: bool,
    #[serde(default)]
    pub event_link: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub intl: BTreeMap<Language, Translation>,
}

impl EventSubmission {
    /// Server-side validation of a submission payload.
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();

        check_organization(&self.organization_name, &mut errors);
        check_event_name(&self.event_name, &mut errors);

        if self.end_datetime < self.start_datetime {
            errors.push(FieldError::new(
                "end_datetime",
                "End must not be before start",
            ));
        }

        if !self.online {
            if self.address.as_deref().unwrap_or("").trim().is_empty() {
                errors.push(FieldError::new(
                    "address",
                    "Address is required for in-person events",
                ));
            }
            if self.state.is_none() {
                errors.push(FieldError::new(
                    "state",
                    "State is required for in-person events",
                ));
            }
        }

        check_optional_url("maps_link", self.maps_link.as_deref(), &mut errors);
        check_optional_url("event_link", self.event_link.as_deref(), &mut errors);

        if self.tags.is_empty() {
            errors.push(FieldError::new("tags", "Select at least one tag"));
        }

        if self.intl.is_empty() {
            errors.push(FieldError::new("intl", "At least one translation is required"));
        }
        for (lang, translation) in &self.intl {
            check_description(
                &format!("intl.{}.short_description", lang),
                &translation.short_description,
                &mut errors,
            );
            check_optional_url(
                &format!("intl.{}.banner_link", lang),
                translation.banner_link.as_deref(),
                &mut errors,
            );
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    /// Convert into an event record. Submissions are always `requested`; the
    /// id is assigned by the store on write.
    pub fn into_event(self) -> Event {
        Event {
            id: String::new(),
            organization_name: self.organization_name,
            event_name: self.event_name,
            start_datetime: self.start_datetime,
            end_datetime: self.end_datetime,
            address: self.address,
            state: self.state,
            maps_link: self.maps_link,
            online: self.online,
            is_free: self.is_free,
            event_link: self.event_link,
            status: EventStatus::Requested,
            tags: self.tags,
            intl: self.intl,
        }
    }
}

/// Translation fields that can be overridden per extra language. Anything
/// left unset falls back to the primary language's value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TranslationOverride {
    #[serde(default)]
    pub event_edition: Option<String>,
    #[serde(default)]
    pub cost_value: Option<f64>,
    #[serde(default)]
    pub short_description: Option<String>,
}

/// Flat value object holding every field of the submission form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionForm {
    // Basic info
    pub organization_name: String,
    pub event_name: String,
    pub event_edition: String,

    // Language
    pub event_language: Language,
    #[serde(default)]
    pub supported_languages: Vec<Language>,

    // Date and location
    pub start_date: Option<NaiveDate>,
    pub start_time: String,
    pub end_date: Option<NaiveDate>,
    pub end_time: String,
    #[serde(default)]
    pub online: bool,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub state: Option<BrazilState>,
    #[serde(default)]
    pub maps_link: Option<String>,

    // Details
    pub event_link: String,
    pub cost_type: CostType,
    #[serde(default)]
    pub cost_value: Option<f64>,
    #[serde(default)]
    pub cost_currency: Option<Currency>,
    pub short_description: String,
    #[serde(default)]
    pub banner_link: Option<String>,

    // Tags
    #[serde(default)]
    pub tags: Vec<String>,

    // Translations for the extra languages
    #[serde(default)]
    pub translations: BTreeMap<Language, TranslationOverride>,

    // Verification
    #[serde(default)]
    pub captcha_token: String,
}

impl Default for SubmissionForm {
    fn default() -> Self {
        SubmissionForm {
            organization_name: String::new(),
            event_name: String::new(),
            event_edition: String::new(),
            event_language: Language::PtBr,
            supported_languages: Vec::new(),
            start_date: None,
            start_time: String::new(),
            end_date: None,
            end_time: String::new(),
            online: false,
            address: None,
            state: None,
            maps_link: None,
            event_link: String::new(),
            cost_type: CostType::Free,
            cost_value: None,
            cost_currency: None,
            short_description: String::new(),
            banner_link: None,
            tags: Vec::new(),
            translations: BTreeMap::new(),
            captcha_token: String::new(),
        }
    }
}

impl SubmissionForm {
    /// Extra languages needing their own translation step.
    pub fn translation_languages(&self) -> Vec<Language> {
        self.supported_languages
            .iter()
            .copied()
            .filter(|l| *l != self.event_language)
            .collect()
    }
}

/// One step of the submission form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Language,
    BasicInfo,
    DateLocation,
    Details,
    Tags,
    Translation(Language),
    Verification,
    Review,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Language => write!(f, "Language"),
            Step::BasicInfo => write!(f, "Basic info"),
            Step::DateLocation => write!(f, "Date and location"),
            Step::Details => write!(f, "Details"),
            Step::Tags => write!(f, "Tags"),
            Step::Translation(lang) => write!(f, "Translation ({})", lang),
            Step::Verification => write!(f, "Verification"),
            Step::Review => write!(f, "Review"),
        }
    }
}

/// The multi-step form state machine.
pub struct Wizard {
    pub form: SubmissionForm,
    current: usize,
}

impl Wizard {
    pub fn new(form: SubmissionForm) -> Self {
        Wizard { form, current: 0 }
    }

    /// The step sequence for the current form state. Translation steps sit
    /// between Tags and Verification, one per extra language.
    pub fn steps(&self) -> Vec<Step> {
        let mut steps = vec![
            Step::Language,
            Step::BasicInfo,
            Step::DateLocation,
            Step::Details,
            Step::Tags,
        ];
        for lang in self.form.translation_languages() {
            steps.push(Step::Translation(lang));
        }
        steps.push(Step::Verification);
        steps.push(Step::Review);
        steps
    }

    pub fn current_step(&self) -> Step {
        let steps = self.steps();
        // The step list can shrink when languages are deselected mid-flow
        steps[self.current.min(steps.len() - 1)]
    }

    pub fn is_last_step(&self) -> bool {
        self.current + 1 >= self.steps().len()
    }

    /// Validate the current step's fields and move forward when clean.
    /// Returns the new current step, or the validation errors.
    pub fn advance(&mut self) -> Result<Step, Vec<FieldError>> {
        let step = self.current_step();
        let errors = self.validate_step(step);

        if !errors.is_empty() {
            return Err(errors);
        }

        if !self.is_last_step() {
            self.current += 1;
        }
        Ok(self.current_step())
    }

    /// Move back one step. Never validates.
    pub fn back(&mut self) -> Step {
        if self.current > 0 {
            self.current -= 1;
        }
        self.current_step()
    }

    /// Validate only the fields belonging to one step.
    pub fn validate_step(&self, step: Step) -> Vec<FieldError> {
        let form = &self.form;
        let mut errors = Vec::new();

        match step {
            Step::Language => {}
            Step::BasicInfo => {
                check_organization(&form.organization_name, &mut errors);
                check_event_name(&form.event_name, &mut errors);
                if form.event_edition.trim().is_empty() {
                    errors.push(FieldError::new("event_edition", "Event edition is required"));
                }
            }
            Step::DateLocation => {
                self.validate_dates(&mut errors);
                if !form.online {
                    if form.address.as_deref().unwrap_or("").trim().is_empty() {
                        errors.push(FieldError::new(
                            "address",
                            "Address is required for in-person events",
                        ));
                    }
                    if form.state.is_none() {
                        errors.push(FieldError::new(
                            "state",
                            "State is required for in-person events",
                        ));
                    }
                    check_optional_url("maps_link", form.maps_link.as_deref(), &mut errors);
                }
            }
            Step::Details => {
                check_url("event_link", &form.event_link, &mut errors);
                self.validate_cost(&mut errors);
                check_description("short_description", &form.short_description, &mut errors);
                check_optional_url("banner_link", form.banner_link.as_deref(), &mut errors);
            }
            Step::Tags => {
                if form.tags.is_empty() {
                    errors.push(FieldError::new("tags", "Select at least one tag"));
                }
            }
            Step::Translation(lang) => {
                // Overrides are optional; only bound what was actually given
                if let Some(t) = form.translations.get(&lang)
                    && let Some(ref desc) = t.short_description
                {
                    check_description(
                        &format!("translations.{}.short_description", lang),
                        desc,
                        &mut errors,
                    );
                }
            }
            Step::Verification => {
                if form.captcha_token.trim().is_empty() {
                    errors.push(FieldError::new("captcha", "Please complete the captcha"));
                }
            }
            Step::Review => {
                for s in self.steps() {
                    if s != Step::Review {
                        errors.extend(self.validate_step(s));
                    }
                }
            }
        }

        errors
    }

    fn validate_dates(&self, errors: &mut Vec<FieldError>) {
        let form = &self.form;

        let start_time = check_time("start_time", &form.start_time, errors);
        let end_time = check_time("end_time", &form.end_time, errors);

        if form.start_date.is_none() {
            errors.push(FieldError::new("start_date", "Start date is required"));
        }
        if form.end_date.is_none() {
            errors.push(FieldError::new("end_date", "End date is required"));
        }

        if let (Some(sd), Some(st), Some(ed), Some(et)) =
            (form.start_date, start_time, form.end_date, end_time)
            && ed.and_time(et) < sd.and_time(st)
        {
            errors.push(FieldError::new("end_date", "End must not be before start"));
        }
    }

    fn validate_cost(&self, errors: &mut Vec<FieldError>) {
        let form = &self.form;

        match form.cost_type {
            CostType::Free => {}
            CostType::Paid => {
                match form.cost_value {
                    Some(v) if v > 0.0 => {}
                    Some(_) => errors.push(FieldError::new(
                        "cost_value",
                        "Paid events need a cost greater than zero",
                    )),
                    None => errors.push(FieldError::new("cost_value", "Cost value is required")),
                }
                if form.cost_currency.is_none() {
                    errors.push(FieldError::new("cost_currency", "Currency is required"));
                }
            }
            CostType::Undefined => {
                if form.cost_value != Some(0.0) {
                    errors.push(FieldError::new(
                        "cost_value",
                        "Events with undefined cost must declare a value of 0",
                    ));
                }
                if form.cost_currency.is_none() {
                    errors.push(FieldError::new("cost_currency", "Currency is required"));
                }
            }
        }
    }

    /// Produce the submission payload. Only valid from the Review step with
    /// every other step passing validation.
    pub fn finish(&self) -> EventDirResult<EventSubmission> {
        if self.current_step() != Step::Review {
            return Err(EventDirError::Validation(
                "The form has not reached the review step".into(),
            ));
        }
        let errors = self.validate_step(Step::Review);
        if !errors.is_empty() {
            return Err(validation_error(&errors));
        }

        let form = &self.form;

        // validate_step guarantees these parse
        let start_time = parse_time(&form.start_time).unwrap();
        let end_time = parse_time(&form.end_time).unwrap();
        let start_datetime = form.start_date.unwrap().and_time(start_time);
        let end_datetime = form.end_date.unwrap().and_time(end_time);

        let cost_value = match form.cost_type {
            CostType::Free => 0.0,
            _ => form.cost_value.unwrap_or(0.0),
        };

        let primary = Translation {
            event_edition: form.event_edition.clone(),
            cost: cost_value,
            currency: form.cost_currency,
            banner_link: form.banner_link.clone(),
            short_description: form.short_description.clone(),
        };

        let mut intl = BTreeMap::new();
        intl.insert(form.event_language, primary.clone());
        for lang in form.translation_languages() {
            let over = form.translations.get(&lang).cloned().unwrap_or_default();
            intl.insert(
                lang,
                Translation {
                    event_edition: over
                        .event_edition
                        .unwrap_or_else(|| primary.event_edition.clone()),
                    cost: over.cost_value.unwrap_or(primary.cost),
                    currency: primary.currency,
                    banner_link: primary.banner_link.clone(),
                    short_description: over
                        .short_description
                        .unwrap_or_else(|| primary.short_description.clone()),
                },
            );
        }

        Ok(EventSubmission {
            organization_name: form.organization_name.clone(),
            event_name: form.event_name.clone(),
            start_datetime,
            end_datetime,
            address: form.address.clone(),
            state: form.state,
            maps_link: form.maps_link.clone(),
            online: form.online,
            is_free: form.cost_type == CostType::Free,
            event_link: Some(form.event_link.clone()),
            tags: form.tags.clone(),
            intl,
        })
    }
}

// Shared field checks

fn check_organization(value: &str, errors: &mut Vec<FieldError>) {
    if value.trim().chars().count() < 2 {
        errors.push(FieldError::new(
            "organization_name",
            "Organization name must have at least 2 characters",
        ));
    }
}

fn check_event_name(value: &str, errors: &mut Vec<FieldError>) {
    if value.trim().chars().count() < 3 {
        errors.push(FieldError::new(
            "event_name",
            "Event name must have at least 3 characters",
        ));
    }
}

fn check_description(field: &str, value: &str, errors: &mut Vec<FieldError>) {
    let len = value.trim().chars().count();
    if len < MIN_DESCRIPTION_CHARS {
        errors.push(FieldError::new(
            field,
            format!("Description must have at least {} characters", MIN_DESCRIPTION_CHARS),
        ));
    } else if len > MAX_DESCRIPTION_CHARS {
        errors.push(FieldError::new(
            field,
            format!("Description must have at most {} characters", MAX_DESCRIPTION_CHARS),
        ));
    }
}

fn check_url(field: &str, value: &str, errors: &mut Vec<FieldError>) {
    if Url::parse(value).is_err() {
        errors.push(FieldError::new(field, "Invalid URL"));
    }
}

fn check_optional_url(field: &str, value: Option<&str>, errors: &mut Vec<FieldError>) {
    if let Some(v) = value
        && !v.is_empty()
    {
        check_url(field, v, errors);
    }
}

fn check_time(field: &str, value: &str, errors: &mut Vec<FieldError>) -> Option<NaiveTime> {
    match parse_time(value) {
        Some(t) => Some(t),
        None => {
            errors.push(FieldError::new(field, "Invalid time, use HH:MM (e.g. 13:30)"));
            None
        }
    }
}

fn parse_time(value: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(value, "%H:%M").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> SubmissionForm {
        SubmissionForm {
            organization_name: "Rust Floripa".to_string(),
            event_name: "Rust Meetup".to_string(),
            event_edition: "Edição 12".to_string(),
            event_language: Language::PtBr,
            supported_languages: vec![Language::PtBr],
            start_date: NaiveDate::from_ymd_opt(2026, 8, 20),
            start_time: "19:00".to_string(),
            end_date: NaiveDate::from_ymd_opt(2026, 8, 20),
            end_time: "22:00".to_string(),
            online: true,
            event_link: "https://meetup.example.com/rust-floripa".to_string(),
            cost_type: CostType::Free,
            short_description: "Encontro mensal para falar de Rust.".to_string(),
            tags: vec!["rust".to_string()],
            captcha_token: "tok-123".to_string(),
            ..Default::default()
        }
    }

    fn walk_to(wizard: &mut Wizard, step: Step) {
        while wizard.current_step() != step {
            wizard.advance().expect("Step should validate");
        }
    }

    #[test]
    fn happy_path_walks_every_step_in_order() {
        let mut wizard = Wizard::new(valid_form());

        let mut visited = vec![wizard.current_step()];
        while !wizard.is_last_step() {
            visited.push(wizard.advance().unwrap());
        }

        assert_eq!(
            visited,
            vec![
                Step::Language,
                Step::BasicInfo,
                Step::DateLocation,
                Step::Details,
                Step::Tags,
                Step::Verification,
                Step::Review,
            ]
        );
    }

    #[test]
    fn extra_languages_insert_translation_steps_after_tags() {
        let mut form = valid_form();
        form.supported_languages = vec![Language::PtBr, Language::EnUs, Language::EsEs];

        let wizard = Wizard::new(form);
        let steps = wizard.steps();

        assert_eq!(steps[4], Step::Tags);
        assert_eq!(steps[5], Step::Translation(Language::EnUs));
        assert_eq!(steps[6], Step::Translation(Language::EsEs));
        assert_eq!(steps[7], Step::Verification);
    }

    #[test]
    fn basic_info_step_blocks_short_names() {
        let mut form = valid_form();
        form.event_name = "Go".to_string();

        let mut wizard = Wizard::new(form);
        wizard.advance().unwrap(); // Language -> BasicInfo

        let errors = wizard.advance().unwrap_err();
        assert!(errors.iter().any(|e| e.field == "event_name"));
        assert_eq!(wizard.current_step(), Step::BasicInfo);
    }

    #[test]
    fn in_person_events_require_address_and_state() {
        let mut form = valid_form();
        form.online = false;

        let mut wizard = Wizard::new(form);
        walk_to(&mut wizard, Step::DateLocation);

        let errors = wizard.advance().unwrap_err();
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert!(fields.contains(&"address"));
        assert!(fields.contains(&"state"));
    }

    #[test]
    fn online_events_skip_the_location_requirements() {
        let mut wizard = Wizard::new(valid_form());
        walk_to(&mut wizard, Step::DateLocation);

        assert!(wizard.advance().is_ok());
    }

    #[test]
    fn paid_events_require_value_and_currency() {
        let mut form = valid_form();
        form.cost_type = CostType::Paid;

        let mut wizard = Wizard::new(form);
        walk_to(&mut wizard, Step::Details);

        let errors = wizard.advance().unwrap_err();
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert!(fields.contains(&"cost_value"));
        assert!(fields.contains(&"cost_currency"));
    }

    #[test]
    fn undefined_cost_requires_explicit_zero() {
        let mut form = valid_form();
        form.cost_type = CostType::Undefined;
        form.cost_value = Some(10.0);
        form.cost_currency = Some(Currency::BRL);

        let mut wizard = Wizard::new(form);
        walk_to(&mut wizard, Step::Details);

        let errors = wizard.advance().unwrap_err();
        assert!(errors.iter().any(|e| e.field == "cost_value"));
    }

    #[test]
    fn end_before_start_is_rejected() {
        let mut form = valid_form();
        form.end_time = "18:00".to_string();

        let mut wizard = Wizard::new(form);
        walk_to(&mut wizard, Step::DateLocation);

        let errors = wizard.advance().unwrap_err();
        assert!(errors.iter().any(|e| e.field == "end_date"));
    }

    #[test]
    fn back_never_validates() {
        let mut form = valid_form();
        form.event_name = String::new();

        let mut wizard = Wizard::new(form);
        wizard.advance().unwrap(); // into BasicInfo

        assert_eq!(wizard.back(), Step::Language);
    }

    #[test]
    fn verification_requires_a_captcha_token() {
        let mut form = valid_form();
        form.captcha_token = String::new();

        let mut wizard = Wizard::new(form);
        walk_to(&mut wizard, Step::Verification);

        let errors = wizard.advance().unwrap_err();
        assert!(errors.iter().any(|e| e.field == "captcha"));
    }

    #[test]
    fn finish_builds_the_intl_map_with_fallbacks() {
        let mut form = valid_form();
        form.supported_languages = vec![Language::PtBr, Language::EnUs];
        form.translations.insert(
            Language::EnUs,
            TranslationOverride {
                event_edition: Some("Edition 12".to_string()),
                short_description: Some("Monthly meetup about Rust.".to_string()),
                cost_value: None,
            },
        );

        let mut wizard = Wizard::new(form);
        walk_to(&mut wizard, Step::Review);

        let submission = wizard.finish().expect("Should finish");

        assert!(submission.is_free);
        assert_eq!(submission.intl.len(), 2);
        let en = &submission.intl[&Language::EnUs];
        assert_eq!(en.event_edition, "Edition 12");
        assert_eq!(en.short_description, "Monthly meetup about Rust.");
        // cost falls back to the primary value
        assert_eq!(en.cost, submission.intl[&Language::PtBr].cost);
    }

    #[test]
    fn finish_before_review_is_refused() {
        let mut wizard = Wizard::new(valid_form());
        wizard.advance().unwrap();

        assert!(wizard.finish().is_err());
    }

    #[test]
    fn payload_validation_mirrors_the_wizard_rules() {
        let mut wizard = Wizard::new(valid_form());
        walk_to(&mut wizard, Step::Review);
        let mut submission = wizard.finish().unwrap();

        assert!(submission.validate().is_ok());

        submission.online = false;
        let errors = submission.validate().unwrap_err();
        assert!(errors.iter().any(|e| e.field == "address"));
    }

    #[test]
    fn payload_with_bad_urls_is_rejected() {
        let mut wizard = Wizard::new(valid_form());
        walk_to(&mut wizard, Step::Review);
        let mut submission = wizard.finish().unwrap();

        submission.event_link = Some("not a url".to_string());
        let errors = submission.validate().unwrap_err();
        assert!(errors.iter().any(|e| e.field == "event_link"));
    }
}
