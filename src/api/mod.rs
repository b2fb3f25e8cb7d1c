//! REST API module.
//!
//! Contains all API routes and handlers following the frontend contract.

mod announcements;
mod events;
mod experiences;
mod members;
mod query;
mod scholarships;
mod search;
mod sponsors;

pub use announcements::*;
pub use events::*;
pub use experiences::*;
pub use members::*;
pub use query::*;
pub use scholarships::*;
pub use search::*;
pub use sponsors::*;

use axum::Json;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::media_url;
use crate::pipeline::Page;
use crate::AppState;

/// Paginated list envelope: `results` plus the total `count` of matches.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListResponse<T> {
    pub results: Vec<T>,
    pub count: usize,
    pub page: usize,
    pub total_pages: usize,
    pub page_size: usize,
}

impl<T> From<Page<T>> for ListResponse<T> {
    fn from(page: Page<T>) -> Self {
        Self {
            results: page.items,
            count: page.total_matching,
            page: page.page,
            total_pages: page.total_pages,
            page_size: page.page_size,
        }
    }
}

/// Response type for handlers; errors render as the error envelope.
pub type ApiResult<T> = Result<Json<T>, AppError>;

/// Resolve a stored media path against `TSAK_MEDIA_BASE_URL`.
fn media(state: &AppState, path: &str) -> String {
    media_url(state.config.media_base_url.as_deref(), path)
}

fn media_opt(state: &AppState, path: Option<String>) -> Option<String> {
    path.map(|p| media(state, &p))
}
