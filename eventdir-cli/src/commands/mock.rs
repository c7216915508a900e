//! Generate fake event records for local development.

use std::collections::BTreeMap;

use anyhow::Result;
use chrono::{Duration, Local, NaiveDate};
use owo_colors::OwoColorize;
use rand::Rng;
use rand::seq::SliceRandom;

use eventdir_core::agenda::Agenda;
use eventdir_core::date_range;
use eventdir_core::event::{
    BrazilState, Currency, Event, EventStatus, Language, Translation,
};
use eventdir_core::tags::EVENT_TAGS;

const ORGANIZATIONS: &[&str] = &[
    "Rust Floripa",
    "Python Sudeste",
    "GDG São Paulo",
    "Front in Sampa",
    "DevOps BR",
    "Elixir Brasil",
    "PHP com Rapadura",
    "Nerdzão",
];

const EVENT_KINDS: &[&str] = &[
    "Meetup",
    "Conf",
    "Summit",
    "Week",
    "Day",
    "Hands-on",
];

const CITIES: &[(&str, BrazilState)] = &[
    ("Florianópolis", BrazilState::SC),
    ("São Paulo", BrazilState::SP),
    ("Rio de Janeiro", BrazilState::RJ),
    ("Porto Alegre", BrazilState::RS),
    ("Recife", BrazilState::PE),
    ("Belo Horizonte", BrazilState::MG),
];

pub fn run(agenda: &Agenda, count: usize, from: Option<&str>, to: Option<&str>) -> Result<()> {
    let today = Local::now().date_naive();
    let from = match from {
        Some(s) => date_range::parse_date_start(s)?.date(),
        None => today,
    };
    let to = match to {
        Some(s) => date_range::parse_date_end(s)?.date(),
        None => today + Duration::days(90),
    };
    let span_days = (to - from).num_days().max(0);

    let mut rng = rand::thread_rng();
    let mut created = 0;

    for _ in 0..count {
        let event = fake_event(&mut rng, from, span_days);

        // Collisions across random picks just mean we generated the same
        // event twice; skip and move on
        match agenda.create_approved(&event) {
            Ok(stored) => {
                created += 1;
                println!("{} {}", "+".green(), stored.id);
            }
            Err(eventdir_core::error::EventDirError::DuplicateEvent) => continue,
            Err(e) => return Err(e.into()),
        }
    }

    println!(
        "Generated {} mock event(s) in {}",
        created,
        agenda.data_path().display()
    );

    Ok(())
}

fn fake_event(rng: &mut impl Rng, from: NaiveDate, span_days: i64) -> Event {
    let org = *ORGANIZATIONS.choose(rng).unwrap();
    let kind = *EVENT_KINDS.choose(rng).unwrap();
    let topic = *EVENT_TAGS.choose(rng).unwrap();
    let name = format!("{} {}", capitalize(topic), kind);

    let date = from + Duration::days(rng.gen_range(0..=span_days));
    let start = date
        .and_hms_opt(rng.gen_range(8..=12), [0, 30][rng.gen_range(0..2)], 0)
        .unwrap();
    let end = date.and_hms_opt(rng.gen_range(14..=18), 0, 0).unwrap();

    let online = rng.gen_bool(0.4);
    let (city, state) = *CITIES.choose(rng).unwrap();
    let edition = rng.gen_range(1..=10);
    let is_free = rng.gen_bool(0.6);
    let cost = if is_free {
        0.0
    } else {
        rng.gen_range(1..=50) as f64 * 10.0
    };

    let mut tag_list = vec![topic.to_string()];
    if let Some(extra) = EVENT_TAGS.choose(rng)
        && *extra != topic
    {
        tag_list.push(extra.to_string());
    }

    let banner = format!(
        "https://placehold.co/600x400?text={}",
        name.replace(' ', "+")
    );

    let mut intl = BTreeMap::new();
    intl.insert(
        Language::PtBr,
        Translation {
            event_edition: format!("Edição {}", edition),
            cost,
            currency: Some(Currency::BRL),
            banner_link: Some(banner.clone()),
            short_description: format!("Encontro da comunidade {} sobre {}.", org, topic),
        },
    );
    intl.insert(
        Language::EnUs,
        Translation {
            event_edition: format!("Edition {}", edition),
            cost,
            currency: Some(Currency::BRL),
            banner_link: Some(banner),
            short_description: format!("{} community gathering about {}.", org, topic),
        },
    );

    Event {
        id: String::new(),
        organization_name: org.to_string(),
        event_name: name.clone(),
        start_datetime: start,
        end_datetime: end,
        address: (!online).then(|| format!("Centro de Eventos, {}", city)),
        state: (!online).then_some(state),
        maps_link: (!online).then(|| {
            format!("https://maps.google.com/?q=Centro+de+Eventos+{}", city.replace(' ', "+"))
        }),
        online,
        is_free,
        event_link: Some(format!(
            "https://example.com/{}",
            name.to_lowercase().replace(' ', "-")
        )),
        status: EventStatus::Approved,
        tags: tag_list,
        intl,
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
