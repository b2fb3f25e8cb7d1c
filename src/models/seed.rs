//! Seed document used to populate an empty database.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{
    parse_date_label, Department, EventStatus, Experience, Member, RelatedLink, Scholarship,
    Semester, Sponsor,
};

/// Root of a seed file, mirroring the content sections of the website.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SeedData {
    pub semesters: Vec<Semester>,
    pub announcements: Vec<SeedAnnouncement>,
    pub events: Vec<SeedEvent>,
    pub members: Vec<Member>,
    pub sponsors: Vec<Sponsor>,
    pub scholarships: Vec<Scholarship>,
    pub experiences: Vec<Experience>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedAnnouncement {
    #[serde(default)]
    pub id: String,
    pub title_th: String,
    #[serde(default)]
    pub title_en: String,
    #[serde(default)]
    pub content_th: String,
    #[serde(default)]
    pub content_en: String,
    pub date: NaiveDate,
    /// Semester code, must exist in `semesters`.
    pub semester: String,
    #[serde(default = "default_department")]
    pub department: Department,
    #[serde(default)]
    pub views: u64,
    #[serde(default = "default_true")]
    pub is_published: bool,
    #[serde(default)]
    pub related_links: Vec<RelatedLink>,
}

fn default_department() -> Department {
    Department::Tsak
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedEvent {
    #[serde(default)]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub title_en: Option<String>,
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    pub date: String,
    /// Defaults to the first `dd.mm.yyyy` date found in `date`.
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub date_range: Option<String>,
    #[serde(default = "default_status")]
    pub status: EventStatus,
    #[serde(default)]
    pub status_text: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub organizer: Option<String>,
    #[serde(default)]
    pub views: u64,
    #[serde(default)]
    pub image_dir: Vec<String>,
    /// Ids of entries in `sponsors`.
    #[serde(default)]
    pub sponsor_ids: Vec<String>,
}

fn default_status() -> EventStatus {
    EventStatus::Open
}

impl SeedEvent {
    pub fn resolved_start_date(&self) -> Option<NaiveDate> {
        self.start_date.or_else(|| parse_date_label(&self.date))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_sections_are_optional() {
        let seed: SeedData = serde_json::from_value(json!({
            "semesters": [{ "code": "spring_2025", "nameEn": "Spring 2025" }]
        }))
        .unwrap();
        assert_eq!(seed.semesters.len(), 1);
        assert!(seed.semesters[0].is_active);
        assert!(seed.events.is_empty());
    }

    #[test]
    fn test_event_start_date_from_label() {
        let event: SeedEvent = serde_json::from_value(json!({
            "title": "Thai Night",
            "date": "20.07.2025 - 23.07.2025"
        }))
        .unwrap();
        assert_eq!(event.status, EventStatus::Open);
        assert_eq!(
            event.resolved_start_date(),
            NaiveDate::from_ymd_opt(2025, 7, 20)
        );
    }
}
