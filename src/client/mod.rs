//! HTTP client for the list and detail endpoints.
//!
//! Used by consumers that render the listings themselves. Each call is a
//! single attempt; failures are reported as [`FetchError`] and never retried.

mod sequencer;

pub use sequencer::*;

use std::future::Future;
use std::time::Duration;

use chrono::NaiveDate;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use crate::api::ListResponse;
use crate::models::{AnnouncementDetail, AnnouncementListItem, Event, Locale};
use crate::pipeline::{SortDirection, SortKey};

/// Why a fetch produced no data.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Connection refused, timed out, or the body could not be read.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    /// The backend answered with a non-success status.
    #[error("backend returned {status}: {body}")]
    Status { status: u16, body: String },
    /// The body was not the expected JSON.
    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Query parameters of a list request. Unset fields are omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ListQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locale: Option<Locale>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_from: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_to: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<&'static str>,
}

impl ListQuery {
    pub fn new(locale: Locale) -> Self {
        Self {
            locale: Some(locale),
            ..Self::default()
        }
    }

    pub fn page(mut self, page: usize) -> Self {
        self.page = Some(page);
        self
    }

    pub fn date_range(mut self, from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        self.date_from = from;
        self.date_to = to;
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn sort(mut self, key: SortKey, direction: SortDirection) -> Self {
        self.sort_by = Some(key.as_str());
        self.sort_order = Some(direction.as_str());
        self
    }
}

#[derive(Serialize)]
struct LocaleQuery {
    locale: Locale,
}

/// Client for a running backend, e.g. `http://127.0.0.1:8000`.
#[derive(Debug, Clone)]
pub struct BackendClient {
    http: Client,
    base_url: String,
}

impl BackendClient {
    /// Build a client whose requests give up after `timeout`.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, FetchError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub async fn fetch_events(&self, query: &ListQuery) -> Result<ListResponse<Event>, FetchError> {
        self.get_json("/api/events", query).await
    }

    pub async fn fetch_announcements(
        &self,
        query: &ListQuery,
    ) -> Result<ListResponse<AnnouncementListItem>, FetchError> {
        self.get_json("/api/announcements", query).await
    }

    pub async fn fetch_event(&self, id: &str, locale: Locale) -> Result<Event, FetchError> {
        self.get_json(&format!("/api/events/{}", id), &LocaleQuery { locale })
            .await
    }

    pub async fn fetch_announcement(
        &self,
        id: &str,
        locale: Locale,
    ) -> Result<AnnouncementDetail, FetchError> {
        self.get_json(&format!("/api/announcements/{}", id), &LocaleQuery { locale })
            .await
    }

    /// Run `request` under a fresh ticket from `sequencer`.
    ///
    /// Returns `Ok(None)` when another request was issued on the same
    /// sequencer before this one finished; its result, error or not, is
    /// discarded.
    pub async fn fetch_latest<T, F>(
        &self,
        sequencer: &RequestSequencer,
        request: F,
    ) -> Result<Option<T>, FetchError>
    where
        F: Future<Output = Result<T, FetchError>>,
    {
        let ticket = sequencer.issue();
        let result = request.await;

        if !sequencer.is_current(ticket) {
            tracing::debug!(?ticket, "Discarding stale response");
            return Ok(None);
        }
        result.map(Some)
    }

    async fn get_json<T, Q>(&self, path: &str, query: &Q) -> Result<T, FetchError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let url = format!("{}{}", self.base_url, path);
        let response = self.http.get(&url).query(query).send().await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            tracing::warn!(%url, status = status.as_u16(), "Backend request failed");
            return Err(FetchError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_query_omits_unset_fields() {
        let query = ListQuery::new(Locale::En)
            .category("pr")
            .sort(SortKey::Popularity, SortDirection::Ascending)
            .page(2);

        let value = serde_json::to_value(&query).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "locale": "en",
                "page": 2,
                "category": "pr",
                "sort_by": "views",
                "sort_order": "asc"
            })
        );
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_network_error() {
        let addr = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap();
        let client =
            BackendClient::new(format!("http://{}", addr), Duration::from_secs(2)).unwrap();
        let err = client
            .fetch_events(&ListQuery::new(Locale::Th))
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Network(_)));
    }
}
