//! Search API endpoint.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use super::{parse_locale, ApiResult};
use crate::search::SearchHit;
use crate::AppState;

/// Search query parameters.
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    /// Search query string.
    #[serde(default)]
    pub q: String,
    pub locale: Option<String>,
    /// Maximum number of results (default: 20).
    #[serde(default = "default_limit")]
    pub limit: usize,
    /// Offset for pagination (default: 0).
    #[serde(default)]
    pub offset: usize,
}

fn default_limit() -> usize {
    20
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub results: Vec<SearchHit>,
    pub count: usize,
    pub limit: usize,
    pub offset: usize,
}

/// Maximum number of search results allowed.
const MAX_SEARCH_LIMIT: usize = 100;

/// GET /api/search - Full-text search over announcements and events.
pub async fn search_content(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> ApiResult<SearchResponse> {
    let locale = parse_locale(params.locale.as_deref(), state.config.default_locale)?;
    let limit = params.limit.min(MAX_SEARCH_LIMIT);

    let results = state.search.search(&params.q, locale, limit, params.offset)?;

    Ok(Json(SearchResponse {
        count: results.len(),
        results,
        limit,
        offset: params.offset,
    }))
}
