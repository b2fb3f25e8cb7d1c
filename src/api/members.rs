//! Member directory endpoint.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use super::{media_opt, ApiResult};
use crate::errors::AppError;
use crate::models::{sort_directory, Member, MemberSection};
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct MemberParams {
    /// A department, `alumni` or `all`.
    pub department: Option<String>,
}

/// GET /api/members - Members in directory order.
pub async fn list_members(
    State(state): State<AppState>,
    Query(params): Query<MemberParams>,
) -> ApiResult<Vec<Member>> {
    let raw = params.department.unwrap_or_default();
    let section = MemberSection::parse(&raw)
        .ok_or_else(|| AppError::Validation(format!("Unknown department {:?}", raw)))?;

    let mut members: Vec<Member> = state
        .repo
        .list_members()
        .await?
        .into_iter()
        .filter(|m| section.includes(m))
        .map(|mut m| {
            m.picture = media_opt(&state, m.picture);
            m
        })
        .collect();
    sort_directory(&mut members);

    Ok(Json(members))
}
