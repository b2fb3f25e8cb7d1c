//! Announcement API endpoints.

use axum::{
    extract::{Path, Query, State},
    Json,
};

use super::{ApiResult, ListParams, ListResponse, LocaleParams};
use crate::errors::AppError;
use crate::models::{AnnouncementDetail, AnnouncementFilters, AnnouncementListItem, Department};
use crate::pipeline;
use crate::AppState;

/// Number of announcements shown under "related".
const RELATED_LIMIT: i64 = 4;

/// GET /api/announcements - Filtered, sorted page of published announcements.
pub async fn list_announcements(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> ApiResult<ListResponse<AnnouncementListItem>> {
    let locale = params.locale(state.config.default_locale)?;
    let filter = params.filter_state(
        state.config.announcements_page_size,
        Department::parse,
        |code| Some(code.to_string()),
    )?;

    let announcements = state.repo.list_announcements().await?;
    let page = pipeline::apply(&announcements, &filter, locale).map(|a| a.localize(locale));

    Ok(Json(page.into()))
}

/// GET /api/announcements/filters - Semester and department choices.
pub async fn get_announcement_filters(
    State(state): State<AppState>,
    Query(params): Query<LocaleParams>,
) -> ApiResult<AnnouncementFilters> {
    let locale = params.locale(state.config.default_locale)?;

    let semesters = state.repo.list_semesters().await?;
    let departments = state.repo.list_used_departments().await?;

    Ok(Json(AnnouncementFilters::new(&semesters, &departments, locale)))
}

/// GET /api/announcements/{id} - Localized announcement; counts one view.
pub async fn get_announcement(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<LocaleParams>,
) -> ApiResult<AnnouncementDetail> {
    let locale = params.locale(state.config.default_locale)?;

    if !state.repo.increment_announcement_views(&id).await? {
        return Err(not_found(&id));
    }

    let announcement = state
        .repo
        .get_announcement(&id)
        .await?
        .ok_or_else(|| not_found(&id))?;

    Ok(Json(announcement.localize(locale)))
}

/// GET /api/announcements/{id}/related - Newest announcements of the same department.
pub async fn list_related_announcements(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<LocaleParams>,
) -> ApiResult<Vec<AnnouncementListItem>> {
    let locale = params.locale(state.config.default_locale)?;

    let announcement = state
        .repo
        .get_announcement(&id)
        .await?
        .ok_or_else(|| not_found(&id))?;

    let related = state
        .repo
        .list_related_announcements(&id, announcement.summary.department, RELATED_LIMIT)
        .await?;

    Ok(Json(related.iter().map(|a| a.localize(locale)).collect()))
}

fn not_found(id: &str) -> AppError {
    AppError::NotFound(format!("Announcement {} not found", id))
}
