//! Tantivy-based search index module.
//!
//! Full-text search across announcements and events, with titles weighted
//! above body text. This backs `/api/search`; list pages use the plain
//! title filter of the list-view pipeline instead.

use std::path::Path;
use std::sync::Arc;
use tantivy::collector::TopDocs;
use tantivy::query::{BooleanQuery, BoostQuery, Occur, Query, QueryParser};
use tantivy::schema::{Field, Schema, Value, STORED, STRING, TEXT};
use tantivy::{doc, Index, IndexReader, IndexWriter, ReloadPolicy, TantivyDocument};
use tokio::sync::RwLock;

use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::{Announcement, Event, Locale};

const BOOST_TITLE: f32 = 10.0;
const BOOST_BODY: f32 = 4.0;

/// Kind of record a search hit points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocKind {
    Announcement,
    Event,
}

impl DocKind {
    fn as_str(&self) -> &'static str {
        match self {
            DocKind::Announcement => "announcement",
            DocKind::Event => "event",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s {
            "announcement" => Some(DocKind::Announcement),
            "event" => Some(DocKind::Event),
            _ => None,
        }
    }
}

/// A matching record with its localized title and relevance score.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchHit {
    pub kind: DocKind,
    pub id: String,
    pub title: String,
    pub score: f32,
}

struct SearchFields {
    kind: Field,
    id: Field,
    title_th: Field,
    title_en: Field,
    body_th: Field,
    body_en: Field,
}

/// Tantivy search index for announcements and events.
pub struct SearchIndex {
    index: Index,
    reader: IndexReader,
    writer: Arc<RwLock<IndexWriter>>,
    fields: SearchFields,
}

impl SearchIndex {
    /// Create or open a search index at the specified path.
    pub fn open(index_path: &Path) -> Result<Self, AppError> {
        std::fs::create_dir_all(index_path)
            .map_err(|e| AppError::Search(format!("Failed to create index directory: {}", e)))?;

        let mut schema_builder = Schema::builder();
        let kind = schema_builder.add_text_field("kind", STRING | STORED);
        let id = schema_builder.add_text_field("id", STRING | STORED);
        let title_th = schema_builder.add_text_field("title_th", TEXT | STORED);
        let title_en = schema_builder.add_text_field("title_en", TEXT | STORED);
        let body_th = schema_builder.add_text_field("body_th", TEXT);
        let body_en = schema_builder.add_text_field("body_en", TEXT);
        let schema = schema_builder.build();

        let fields = SearchFields {
            kind,
            id,
            title_th,
            title_en,
            body_th,
            body_en,
        };

        let index = Index::open_in_dir(index_path)
            .or_else(|_| Index::create_in_dir(index_path, schema.clone()))
            .map_err(|e| AppError::Search(format!("Failed to open/create index: {}", e)))?;

        let reader = index
            .reader_builder()
            .reload_policy(ReloadPolicy::OnCommitWithDelay)
            .try_into()
            .map_err(|e| AppError::Search(format!("Failed to create reader: {}", e)))?;

        let writer = index
            .writer(50_000_000) // 50MB buffer
            .map_err(|e| AppError::Search(format!("Failed to create writer: {}", e)))?;

        Ok(Self {
            index,
            reader,
            writer: Arc::new(RwLock::new(writer)),
            fields,
        })
    }

    /// Replace the index contents with the given announcements and events.
    pub async fn rebuild(
        &self,
        announcements: &[Announcement],
        events: &[Event],
    ) -> Result<(), AppError> {
        let mut writer = self.writer.write().await;

        writer.delete_all_documents()?;

        for announcement in announcements {
            writer.add_document(self.announcement_document(announcement))?;
        }
        for event in events {
            writer.add_document(self.event_document(event))?;
        }

        writer.commit()?;
        self.reader.reload()?;

        tracing::info!(
            announcements = announcements.len(),
            events = events.len(),
            "Search index rebuilt"
        );
        Ok(())
    }

    /// Search titles and bodies, returning hits with titles in `locale`.
    ///
    /// Query syntax errors are tolerated; whatever parses is searched.
    pub fn search(
        &self,
        query_str: &str,
        locale: Locale,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<SearchHit>, AppError> {
        if query_str.trim().is_empty() || limit == 0 {
            return Ok(Vec::new());
        }

        let searcher = self.reader.searcher();

        let field_queries = [
            (self.fields.title_th, BOOST_TITLE),
            (self.fields.title_en, BOOST_TITLE),
            (self.fields.body_th, BOOST_BODY),
            (self.fields.body_en, BOOST_BODY),
        ];

        let mut subqueries: Vec<(Occur, Box<dyn Query>)> = Vec::new();
        for (field, boost) in field_queries {
            let field_parser = QueryParser::for_index(&self.index, vec![field]);
            let (field_query, _errors) = field_parser.parse_query_lenient(query_str);
            subqueries.push((Occur::Should, Box::new(BoostQuery::new(field_query, boost))));
        }
        let combined_query = BooleanQuery::new(subqueries);

        let top_docs = searcher
            .search(&combined_query, &TopDocs::with_limit(limit + offset))
            .map_err(|e| AppError::Search(format!("Search failed: {}", e)))?;

        let hits = top_docs
            .into_iter()
            .skip(offset)
            .take(limit)
            .filter_map(|(score, doc_address)| {
                let doc: TantivyDocument = searcher.doc(doc_address).ok()?;
                let text = |field: Field| {
                    doc.get_first(field)
                        .and_then(|v| v.as_str())
                        .unwrap_or_default()
                        .to_string()
                };
                let kind = DocKind::parse(&text(self.fields.kind))?;
                let title_en = text(self.fields.title_en);
                let title_th = text(self.fields.title_th);
                Some(SearchHit {
                    kind,
                    id: text(self.fields.id),
                    title: locale.pick(&title_en, &title_th).to_string(),
                    score,
                })
            })
            .collect();

        Ok(hits)
    }

    fn announcement_document(&self, announcement: &Announcement) -> TantivyDocument {
        let summary = &announcement.summary;
        doc!(
            self.fields.kind => DocKind::Announcement.as_str(),
            self.fields.id => summary.id.clone(),
            self.fields.title_th => summary.title_th.clone(),
            self.fields.title_en => summary.title_en.clone(),
            self.fields.body_th => announcement.content_th.clone(),
            self.fields.body_en => announcement.content_en.clone()
        )
    }

    fn event_document(&self, event: &Event) -> TantivyDocument {
        let body = [
            event.subtitle.as_deref(),
            event.description.as_deref(),
            event.location.as_deref(),
        ]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(" ");

        doc!(
            self.fields.kind => DocKind::Event.as_str(),
            self.fields.id => event.id.clone(),
            self.fields.title_th => event.title.clone(),
            self.fields.title_en => event.title_en.clone().unwrap_or_default(),
            self.fields.body_th => body
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AnnouncementSummary, Department, EventStatus, Semester};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn announcement(id: &str, title_en: &str, content_en: &str) -> Announcement {
        Announcement {
            summary: AnnouncementSummary {
                id: id.to_string(),
                date: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
                semester: Semester {
                    code: "spring_2025".to_string(),
                    name_th: String::new(),
                    name_en: "Spring 2025".to_string(),
                    is_active: true,
                },
                department: Department::Tsak,
                title_th: format!("ประกาศ {}", id),
                title_en: title_en.to_string(),
                views: 0,
            },
            content_th: String::new(),
            content_en: content_en.to_string(),
            related_links: Vec::new(),
            created_at: "2025-03-01T00:00:00Z".to_string(),
            updated_at: "2025-03-01T00:00:00Z".to_string(),
        }
    }

    fn event(id: &str, title: &str, description: &str) -> Event {
        Event {
            id: id.to_string(),
            title: title.to_string(),
            title_en: None,
            subtitle: None,
            image_url: None,
            date: "20.07.2025".to_string(),
            start_date: NaiveDate::from_ymd_opt(2025, 7, 20).unwrap(),
            date_range: None,
            status: EventStatus::Open,
            status_text: String::new(),
            description: Some(description.to_string()),
            location: None,
            organizer: None,
            views: 0,
            image_dir: Vec::new(),
            sponsors: Vec::new(),
        }
    }

    #[tokio::test]
    async fn test_title_match_ranks_above_body_match() {
        let temp_dir = TempDir::new().unwrap();
        let index = SearchIndex::open(temp_dir.path()).unwrap();

        index
            .rebuild(
                &[
                    announcement("a1", "Scholarship deadline", "Apply before May"),
                    announcement("a2", "General meeting", "We will discuss the scholarship"),
                ],
                &[],
            )
            .await
            .unwrap();

        let hits = index.search("scholarship", Locale::En, 10, 0).unwrap();
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].id, "a1");
        assert_eq!(hits[0].kind, DocKind::Announcement);
        assert_eq!(hits[0].title, "Scholarship deadline");
    }

    #[tokio::test]
    async fn test_events_and_locale_fallback() {
        let temp_dir = TempDir::new().unwrap();
        let index = SearchIndex::open(temp_dir.path()).unwrap();

        index
            .rebuild(&[], &[event("7", "Songkran Festival", "Water fight at Hangang")])
            .await
            .unwrap();

        let hits = index.search("hangang", Locale::En, 10, 0).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].kind, DocKind::Event);
        // No English title stored, so the Thai title is shown.
        assert_eq!(hits[0].title, "Songkran Festival");
    }

    #[tokio::test]
    async fn test_rebuild_replaces_previous_contents() {
        let temp_dir = TempDir::new().unwrap();
        let index = SearchIndex::open(temp_dir.path()).unwrap();

        index
            .rebuild(&[], &[event("1", "Thai Night", "Dinner")])
            .await
            .unwrap();
        assert_eq!(index.search("dinner", Locale::Th, 10, 0).unwrap().len(), 1);

        index
            .rebuild(&[], &[event("1", "Thai Night", "Concert")])
            .await
            .unwrap();

        assert!(index.search("dinner", Locale::Th, 10, 0).unwrap().is_empty());
        let hits = index.search("concert", Locale::Th, 10, 0).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "1");
    }

    #[tokio::test]
    async fn test_search_empty_query() {
        let temp_dir = TempDir::new().unwrap();
        let index = SearchIndex::open(temp_dir.path()).unwrap();

        assert!(index.search("", Locale::Th, 10, 0).unwrap().is_empty());
        assert!(index.search("   ", Locale::En, 10, 0).unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_offset_skips_hits() {
        let temp_dir = TempDir::new().unwrap();
        let index = SearchIndex::open(temp_dir.path()).unwrap();

        index
            .rebuild(
                &[],
                &[
                    event("1", "Football cup", "football"),
                    event("2", "Football final", "football"),
                ],
            )
            .await
            .unwrap();

        let all = index.search("football", Locale::Th, 10, 0).unwrap();
        let rest = index.search("football", Locale::Th, 10, 1).unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(rest.len(), 1);
        assert_eq!(rest[0].id, all[1].id);
    }
}
