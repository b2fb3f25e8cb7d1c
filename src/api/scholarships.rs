//! Scholarship endpoints.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;

use super::{parse_choice, ApiResult};
use crate::errors::AppError;
use crate::models::{
    FieldOfStudy, FundingType, Scholarship, ScholarshipFilter, ScholarshipList, ScholarshipType,
    StudyLevel,
};
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ScholarshipParams {
    pub funding_type: Option<String>,
    pub study_level: Option<String>,
    pub field_of_study: Option<String>,
    #[serde(rename = "type")]
    pub scholarship_type: Option<String>,
}

impl ScholarshipParams {
    fn filter(&self) -> Result<ScholarshipFilter, AppError> {
        Ok(ScholarshipFilter {
            funding_type: parse_choice(
                "funding_type",
                self.funding_type.as_deref(),
                FundingType::parse,
            )?,
            study_level: parse_choice("study_level", self.study_level.as_deref(), StudyLevel::parse)?,
            field_of_study: parse_choice(
                "field_of_study",
                self.field_of_study.as_deref(),
                FieldOfStudy::parse,
            )?,
            scholarship_type: parse_choice(
                "type",
                self.scholarship_type.as_deref(),
                ScholarshipType::parse,
            )?,
        })
    }
}

/// GET /api/scholarships - Active scholarships matching every given filter.
pub async fn list_scholarships(
    State(state): State<AppState>,
    Query(params): Query<ScholarshipParams>,
) -> ApiResult<ScholarshipList> {
    let filter = params.filter()?;
    let scholarships: Vec<Scholarship> = state
        .repo
        .list_scholarships()
        .await?
        .into_iter()
        .filter(|s| filter.matches(s))
        .collect();

    Ok(Json(ScholarshipList {
        scholarship_type: None,
        count: scholarships.len(),
        scholarships,
    }))
}

/// GET /api/scholarships/{id}
pub async fn get_scholarship(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Scholarship> {
    state
        .repo
        .get_scholarship(&id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Scholarship {} not found", id)))
}

/// GET /api/scholarships/type/{type} - Active scholarships of one provider type.
pub async fn list_scholarships_by_type(
    State(state): State<AppState>,
    Path(raw_type): Path<String>,
) -> ApiResult<ScholarshipList> {
    let scholarship_type = ScholarshipType::parse(&raw_type).ok_or_else(|| {
        let valid = ScholarshipType::ALL
            .iter()
            .map(|t| t.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        AppError::Validation(format!(
            "Invalid scholarship type {:?}, expected one of: {}",
            raw_type, valid
        ))
    })?;

    let scholarships: Vec<Scholarship> = state
        .repo
        .list_scholarships()
        .await?
        .into_iter()
        .filter(|s| s.scholarship_type == scholarship_type)
        .collect();

    Ok(Json(ScholarshipList {
        scholarship_type: Some(scholarship_type),
        count: scholarships.len(),
        scholarships,
    }))
}
