//! Event API endpoints.

use std::convert::Infallible;

use axum::{
    extract::{Path, Query, State},
    Json,
};

use super::{media, media_opt, ApiResult, ListParams, ListResponse, LocaleParams};
use crate::errors::AppError;
use crate::models::{Event, EventSponsor, EventStatus};
use crate::pipeline;
use crate::AppState;

/// GET /api/events - Filtered, sorted page of events.
pub async fn list_events(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> ApiResult<ListResponse<Event>> {
    let locale = params.locale(state.config.default_locale)?;
    let filter = params.filter_state(
        state.config.events_page_size,
        EventStatus::parse,
        |_| None::<Infallible>,
    )?;

    let events = state.repo.list_events().await?;
    let page = pipeline::apply(&events, &filter, locale).map(|event| with_media(&state, event));

    Ok(Json(page.into()))
}

/// GET /api/events/{id} - Event detail with gallery and sponsors.
///
/// Each request counts as one view.
pub async fn get_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<LocaleParams>,
) -> ApiResult<Event> {
    let locale = params.locale(state.config.default_locale)?;

    if !state.repo.increment_event_views(&id).await? {
        return Err(AppError::NotFound(format!("Event {} not found", id)));
    }

    let mut event = state
        .repo
        .get_event(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Event {} not found", id)))?;

    event.sponsors = state
        .repo
        .list_event_sponsors(&id)
        .await?
        .into_iter()
        .map(|sponsor| EventSponsor {
            name: locale.pick(&sponsor.name_en, &sponsor.name).to_string(),
            logo_url: media_opt(&state, sponsor.logo),
        })
        .collect();

    Ok(Json(with_media(&state, event)))
}

fn with_media(state: &AppState, mut event: Event) -> Event {
    event.image_url = media_opt(state, event.image_url);
    event.image_dir = event.image_dir.iter().map(|p| media(state, p)).collect();
    event
}
