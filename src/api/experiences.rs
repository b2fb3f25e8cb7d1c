//! Experience-sharing endpoints.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use super::{media_opt, parse_choice, parse_locale, ApiResult};
use crate::errors::AppError;
use crate::models::{CurriculumLanguage, Degree, ExperienceField, ExperienceFilter, ExperienceView};
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ExperienceParams {
    pub lang: Option<String>,
    pub locale: Option<String>,
    pub degree: Option<String>,
    pub curriculum_language: Option<String>,
    pub field_of_study: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ExperienceList {
    pub results: Vec<ExperienceView>,
    pub count: usize,
}

/// GET /api/experiences - Localized experiences, newest first.
pub async fn list_experiences(
    State(state): State<AppState>,
    Query(params): Query<ExperienceParams>,
) -> ApiResult<ExperienceList> {
    let locale = parse_locale(
        params.lang.as_deref().or(params.locale.as_deref()),
        state.config.default_locale,
    )?;
    let filter = ExperienceFilter {
        degree: parse_choice("degree", params.degree.as_deref(), Degree::parse)?,
        curriculum_language: parse_choice(
            "curriculum_language",
            params.curriculum_language.as_deref(),
            CurriculumLanguage::parse,
        )?,
        field_of_study: parse_choice(
            "field_of_study",
            params.field_of_study.as_deref(),
            ExperienceField::parse,
        )?,
    };

    let results: Vec<ExperienceView> = state
        .repo
        .list_experiences()
        .await?
        .iter()
        .filter(|e| filter.matches(e))
        .map(|e| {
            let mut view = e.localize(locale);
            view.photo = media_opt(&state, view.photo);
            view
        })
        .collect();

    Ok(Json(ExperienceList {
        count: results.len(),
        results,
    }))
}

/// GET /api/experiences/{id}
pub async fn get_experience(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<ExperienceParams>,
) -> ApiResult<ExperienceView> {
    let locale = parse_locale(
        params.lang.as_deref().or(params.locale.as_deref()),
        state.config.default_locale,
    )?;

    let experience = state
        .repo
        .get_experience(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Experience {} not found", id)))?;

    let mut view = experience.localize(locale);
    view.photo = media_opt(&state, view.photo);
    Ok(Json(view))
}
