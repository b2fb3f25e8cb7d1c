//! Sponsor endpoint.

use axum::{extract::State, Json};

use super::{media_opt, ApiResult};
use crate::models::SponsorGroups;
use crate::AppState;

/// GET /api/sponsors - Embassies, partners and networks in display order.
pub async fn list_sponsors(State(state): State<AppState>) -> ApiResult<SponsorGroups> {
    let sponsors = state
        .repo
        .list_sponsors()
        .await?
        .into_iter()
        .map(|mut s| {
            s.logo = media_opt(&state, s.logo);
            s
        })
        .collect();

    Ok(Json(SponsorGroups::from_ordered(sponsors)))
}
