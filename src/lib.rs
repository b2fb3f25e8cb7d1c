//! TSAK website backend
//!
//! REST backend for the Thai Students' Association in Korea website, with
//! SQLite persistence, Tantivy full-text search and a shared list-view
//! pipeline for the events and announcements listings.

pub mod api;
pub mod client;
pub mod config;
pub mod db;
pub mod errors;
pub mod models;
pub mod pipeline;
pub mod search;

use std::sync::Arc;

use axum::{routing::get, Router};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use config::Config;
use db::Repository;
use errors::AppError;
use search::SearchIndex;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<Repository>,
    pub search: Arc<SearchIndex>,
    pub config: Arc<Config>,
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    // The site is public and read-only
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        // Events
        .route("/events", get(api::list_events))
        .route("/events/{id}", get(api::get_event))
        // Announcements
        .route("/announcements", get(api::list_announcements))
        .route("/announcements/filters", get(api::get_announcement_filters))
        .route("/announcements/{id}", get(api::get_announcement))
        .route("/announcements/{id}/related", get(api::list_related_announcements))
        // Directory
        .route("/members", get(api::list_members))
        .route("/sponsors", get(api::list_sponsors))
        // Information pages
        .route("/scholarships", get(api::list_scholarships))
        .route("/scholarships/type/{type}", get(api::list_scholarships_by_type))
        .route("/scholarships/{id}", get(api::get_scholarship))
        .route("/experiences", get(api::list_experiences))
        .route("/experiences/{id}", get(api::get_experience))
        // Search
        .route("/search", get(api::search_content));

    Router::new()
        .nest("/api", api_routes)
        .route("/health", get(health_check))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}

/// Reload every published announcement and event into the search index.
pub async fn rebuild_search_index(repo: &Repository, search: &SearchIndex) -> Result<(), AppError> {
    let mut announcements = Vec::new();
    for summary in repo.list_announcements().await? {
        if let Some(announcement) = repo.get_announcement(&summary.id).await? {
            announcements.push(announcement);
        }
    }
    let events = repo.list_events().await?;

    search.rebuild(&announcements, &events).await
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}
