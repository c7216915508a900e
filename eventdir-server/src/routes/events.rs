//! Public event endpoints

use std::collections::BTreeMap;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
};
use serde::Serialize;

use eventdir_core::event::Event;
use eventdir_core::query::{self, EventQuery};
use eventdir_core::submission::{EventSubmission, validation_error};

use crate::routes::AppError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/ping", get(ping))
        .route("/events", get(list_events))
        .route("/events/grouped", get(grouped_events))
        .route("/events/{id}", get(get_event))
        .route("/events/submit", post(submit_event))
}

#[derive(Serialize)]
struct Pong {
    message: &'static str,
}

/// GET /ping - liveness probe
async fn ping() -> Json<Pong> {
    Json(Pong { message: "pong" })
}

/// GET /events - Approved events, filtered by the query parameters
async fn list_events(
    State(state): State<AppState>,
    Query(query): Query<EventQuery>,
) -> Result<Json<Vec<Event>>, AppError> {
    let events = state.agenda().approved()?;
    let events = query::apply(events, &query)?;

    Ok(Json(events))
}

/// GET /events/grouped - Approved events grouped by start date
async fn grouped_events(
    State(state): State<AppState>,
    Query(query): Query<EventQuery>,
) -> Result<Json<BTreeMap<String, Vec<Event>>>, AppError> {
    let events = state.agenda().approved()?;
    let events = query::apply(events, &query)?;

    let grouped: BTreeMap<String, Vec<Event>> = query::group_by_date(&events)
        .into_iter()
        .map(|(date, events)| (date.format("%Y-%m-%d").to_string(), events))
        .collect();

    Ok(Json(grouped))
}

/// GET /events/:id - Single event by id
async fn get_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Event>, AppError> {
    let event = state.agenda().find(&id)?;

    Ok(Json(event))
}

/// POST /events/submit - Submit an event for review
async fn submit_event(
    State(state): State<AppState>,
    Json(submission): Json<EventSubmission>,
) -> Result<(StatusCode, Json<Event>), AppError> {
    if let Err(errors) = submission.validate() {
        return Err(validation_error(&errors).into());
    }

    let event = state.agenda().submit(&submission.into_event())?;
    tracing::info!(id = %event.id, "received event submission");

    Ok((StatusCode::CREATED, Json(event)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{Body, to_bytes};
    use axum::http::Request;
    use chrono::NaiveDate;
    use eventdir_core::event::{EventStatus, Language, Translation};
    use eventdir_core::store;
    use std::collections::BTreeMap;
    use tower::ServiceExt;

    fn sample_event(name: &str, day: u32, status: EventStatus) -> Event {
        let start = NaiveDate::from_ymd_opt(2026, 4, day)
            .unwrap()
            .and_hms_opt(19, 0, 0)
            .unwrap();
        let mut intl = BTreeMap::new();
        intl.insert(
            Language::PtBr,
            Translation {
                event_edition: "Edição 3".to_string(),
                cost: 0.0,
                currency: None,
                banner_link: None,
                short_description: "Um encontro de tecnologia da comunidade.".to_string(),
            },
        );
        Event {
            id: String::new(),
            organization_name: "Comunidade Tech".to_string(),
            event_name: name.to_string(),
            start_datetime: start,
            end_datetime: start + chrono::Duration::hours(3),
            address: None,
            state: None,
            maps_link: None,
            online: true,
            is_free: true,
            event_link: Some("https://example.com".to_string()),
            status,
            tags: vec!["rust".to_string()],
            intl,
        }
    }

    fn test_app(dir: &std::path::Path) -> Router {
        crate::router(AppState::at(dir, None))
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn list_only_returns_approved_events() {
        let dir = tempfile::tempdir().unwrap();
        store::create(dir.path(), &sample_event("Meetup A", 10, EventStatus::Approved)).unwrap();
        store::create(dir.path(), &sample_event("Meetup B", 11, EventStatus::Requested)).unwrap();

        let response = test_app(dir.path())
            .oneshot(Request::get("/events").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        let events = json.as_array().unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0]["event_name"], "Meetup A");
    }

    #[tokio::test]
    async fn list_honors_tag_filter() {
        let dir = tempfile::tempdir().unwrap();
        let mut py = sample_event("PyNight", 12, EventStatus::Approved);
        py.tags = vec!["python".to_string()];
        store::create(dir.path(), &py).unwrap();
        store::create(dir.path(), &sample_event("RustNight", 13, EventStatus::Approved)).unwrap();

        let response = test_app(dir.path())
            .oneshot(
                Request::get("/events?tags=python")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let json = body_json(response).await;
        let events = json.as_array().unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0]["event_name"], "PyNight");
    }

    #[tokio::test]
    async fn grouped_events_key_on_start_date() {
        let dir = tempfile::tempdir().unwrap();
        store::create(dir.path(), &sample_event("Day One", 10, EventStatus::Approved)).unwrap();
        store::create(dir.path(), &sample_event("Day Two", 11, EventStatus::Approved)).unwrap();

        let response = test_app(dir.path())
            .oneshot(
                Request::get("/events/grouped")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let json = body_json(response).await;
        assert!(json.get("2026-04-10").is_some());
        assert!(json.get("2026-04-11").is_some());
    }

    #[tokio::test]
    async fn missing_event_is_a_404_with_json_error() {
        let dir = tempfile::tempdir().unwrap();

        let response = test_app(dir.path())
            .oneshot(
                Request::get("/events/does-not-exist")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let json = body_json(response).await;
        assert!(json["error"].as_str().unwrap().contains("does-not-exist"));
    }

    #[tokio::test]
    async fn submit_stores_a_requested_record() {
        let dir = tempfile::tempdir().unwrap();

        let payload = serde_json::json!({
            "organization_name": "Rust BR",
            "event_name": "Rust Conf",
            "start_datetime": "2026-09-12T09:00:00",
            "end_datetime": "2026-09-12T18:00:00",
            "online": true,
            "is_free": true,
            "event_link": "https://rustconf.example.com",
            "tags": ["rust"],
            "intl": {
                "pt-br": {
                    "event_edition": "Edição 4",
                    "cost": 0.0,
                    "currency": null,
                    "banner_link": null,
                    "short_description": "Conferência brasileira de Rust."
                }
            }
        });

        let response = test_app(dir.path())
            .oneshot(
                Request::post("/events/submit")
                    .header("content-type", "application/json")
                    .body(Body::from(payload.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let json = body_json(response).await;
        assert_eq!(json["status"], "requested");

        // Not publicly visible until approved
        let listed = store::list(dir.path()).unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].event.status, EventStatus::Requested);
    }

    #[tokio::test]
    async fn invalid_submission_is_a_400() {
        let dir = tempfile::tempdir().unwrap();

        let payload = serde_json::json!({
            "organization_name": "X",
            "event_name": "Y",
            "start_datetime": "2026-09-12T09:00:00",
            "end_datetime": "2026-09-11T18:00:00",
            "online": true,
            "is_free": true,
            "tags": [],
            "intl": {}
        });

        let response = test_app(dir.path())
            .oneshot(
                Request::post("/events/submit")
                    .header("content-type", "application/json")
                    .body(Body::from(payload.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn duplicate_submission_is_a_400() {
        let dir = tempfile::tempdir().unwrap();

        let payload = serde_json::json!({
            "organization_name": "Rust BR",
            "event_name": "Rust Conf",
            "start_datetime": "2026-09-12T09:00:00",
            "end_datetime": "2026-09-12T18:00:00",
            "online": true,
            "is_free": true,
            "event_link": "https://rustconf.example.com",
            "tags": ["rust"],
            "intl": {
                "pt-br": {
                    "event_edition": "Edição 4",
                    "cost": 0.0,
                    "currency": null,
                    "banner_link": null,
                    "short_description": "Conferência brasileira de Rust."
                }
            }
        });

        let app = test_app(dir.path());
        let first = app
            .clone()
            .oneshot(
                Request::post("/events/submit")
                    .header("content-type", "application/json")
                    .body(Body::from(payload.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(first.status(), StatusCode::CREATED);

        let second = app
            .oneshot(
                Request::post("/events/submit")
                    .header("content-type", "application/json")
                    .body(Body::from(payload.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(second.status(), StatusCode::BAD_REQUEST);
    }
}
