//! Announcement and semester models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::Locale;
use crate::pipeline::Listable;

string_enum! {
    /// Department that issued an announcement.
    Department {
        Tsak => "tsak",
        Executive => "executive",
        Documentation => "documentation",
        Accounting => "accounting",
        Liaison => "liaison",
        Pr => "pr",
        It => "it",
        Events => "events",
    }
}

/// Academic semester announcements are grouped by.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Semester {
    /// e.g. `spring_2025`
    pub code: String,
    #[serde(default)]
    pub name_th: String,
    #[serde(default)]
    pub name_en: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

/// Semester reference with a localized display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SemesterRef {
    pub code: String,
    pub display_name: String,
}

impl Semester {
    pub fn localize(&self, locale: Locale) -> SemesterRef {
        SemesterRef {
            code: self.code.clone(),
            display_name: locale.pick(&self.name_en, &self.name_th).to_string(),
        }
    }
}

/// Listing row of a published announcement, as loaded from storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnouncementSummary {
    pub id: String,
    pub date: NaiveDate,
    pub semester: Semester,
    pub department: Department,
    pub title_th: String,
    pub title_en: String,
    pub views: u64,
}

impl Listable for AnnouncementSummary {
    type Category = Department;
    type Group = String;

    fn display_date(&self) -> NaiveDate {
        self.date
    }

    fn category(&self) -> &Department {
        &self.department
    }

    fn group(&self) -> Option<&String> {
        Some(&self.semester.code)
    }

    fn title(&self, locale: Locale) -> &str {
        locale.pick(&self.title_en, &self.title_th)
    }

    fn popularity(&self) -> u64 {
        self.views
    }
}

/// Localized announcement list item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnouncementListItem {
    pub id: String,
    pub date: NaiveDate,
    pub semester: SemesterRef,
    pub department: Department,
    pub title: String,
    pub views: u64,
}

impl AnnouncementSummary {
    pub fn localize(&self, locale: Locale) -> AnnouncementListItem {
        AnnouncementListItem {
            id: self.id.clone(),
            date: self.date,
            semester: self.semester.localize(locale),
            department: self.department,
            title: self.title(locale).to_string(),
            views: self.views,
        }
    }
}

/// Fetched list items carry a title already localized by the server.
impl Listable for AnnouncementListItem {
    type Category = Department;
    type Group = String;

    fn display_date(&self) -> NaiveDate {
        self.date
    }

    fn category(&self) -> &Department {
        &self.department
    }

    fn group(&self) -> Option<&String> {
        Some(&self.semester.code)
    }

    fn title(&self, _locale: Locale) -> &str {
        &self.title
    }

    fn popularity(&self) -> u64 {
        self.views
    }
}

/// External link attached to an announcement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelatedLink {
    pub name_th: String,
    #[serde(default)]
    pub name_en: String,
    pub url: String,
    #[serde(default)]
    pub order: i64,
}

/// Related link with a localized name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkView {
    pub name: String,
    pub url: String,
    pub order: i64,
}

/// Full announcement with bilingual content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Announcement {
    pub summary: AnnouncementSummary,
    pub content_th: String,
    pub content_en: String,
    pub related_links: Vec<RelatedLink>,
    pub created_at: String,
    pub updated_at: String,
}

/// Localized announcement detail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnouncementDetail {
    pub id: String,
    pub date: NaiveDate,
    pub semester: SemesterRef,
    pub department: Department,
    pub title: String,
    pub content: String,
    pub views: u64,
    pub related_links: Vec<LinkView>,
    pub created_at: String,
    pub updated_at: String,
}

impl Announcement {
    pub fn localize(&self, locale: Locale) -> AnnouncementDetail {
        let item = self.summary.localize(locale);
        AnnouncementDetail {
            id: item.id,
            date: item.date,
            semester: item.semester,
            department: item.department,
            title: item.title,
            content: locale.pick(&self.content_en, &self.content_th).to_string(),
            views: item.views,
            related_links: self
                .related_links
                .iter()
                .map(|link| LinkView {
                    name: locale.pick(&link.name_en, &link.name_th).to_string(),
                    url: link.url.clone(),
                    order: link.order,
                })
                .collect(),
            created_at: self.created_at.clone(),
            updated_at: self.updated_at.clone(),
        }
    }
}

/// Choices offered by the announcement filter bar.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnouncementFilters {
    pub semesters: Vec<SemesterRef>,
    pub departments: Vec<String>,
}

/// Value the filter bar uses for "no filter".
pub const ALL_OPTION: &str = "All";

impl AnnouncementFilters {
    /// Build the filter options, each list led by the "All" choice.
    pub fn new(semesters: &[Semester], departments: &[Department], locale: Locale) -> Self {
        let all = SemesterRef {
            code: ALL_OPTION.to_string(),
            display_name: match locale {
                Locale::En => "All".to_string(),
                Locale::Th => "ทั้งหมด".to_string(),
            },
        };

        Self {
            semesters: std::iter::once(all)
                .chain(
                    semesters
                        .iter()
                        .filter(|s| s.is_active)
                        .map(|s| s.localize(locale)),
                )
                .collect(),
            departments: std::iter::once(ALL_OPTION.to_string())
                .chain(departments.iter().map(|d| d.as_str().to_string()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn semester() -> Semester {
        Semester {
            code: "spring_2025".to_string(),
            name_th: "ภาคเรียนฤดูใบไม้ผลิ 2025".to_string(),
            name_en: "Spring 2025".to_string(),
            is_active: true,
        }
    }

    fn announcement() -> Announcement {
        Announcement {
            summary: AnnouncementSummary {
                id: "a1".to_string(),
                date: NaiveDate::from_ymd_opt(2025, 4, 2).unwrap(),
                semester: semester(),
                department: Department::Executive,
                title_th: "ประกาศเลือกตั้ง".to_string(),
                title_en: String::new(),
                views: 1250,
            },
            content_th: "เนื้อหา".to_string(),
            content_en: "Content".to_string(),
            related_links: vec![RelatedLink {
                name_th: "แบบฟอร์ม".to_string(),
                name_en: "Form".to_string(),
                url: "https://example.org/form".to_string(),
                order: 0,
            }],
            created_at: "2025-04-02T00:00:00+00:00".to_string(),
            updated_at: "2025-04-02T00:00:00+00:00".to_string(),
        }
    }

    #[test]
    fn test_localize_detail_in_english() {
        let detail = announcement().localize(Locale::En);
        assert_eq!(detail.title, "ประกาศเลือกตั้ง");
        assert_eq!(detail.content, "Content");
        assert_eq!(detail.semester.display_name, "Spring 2025");
        assert_eq!(detail.related_links[0].name, "Form");
    }

    #[test]
    fn test_summary_group_is_semester_code() {
        let summary = announcement().summary;
        assert_eq!(summary.group(), Some(&"spring_2025".to_string()));
        assert_eq!(summary.category(), &Department::Executive);
    }

    #[test]
    fn test_filters_lead_with_all() {
        let mut inactive = semester();
        inactive.code = "fall_2023".to_string();
        inactive.is_active = false;

        let filters = AnnouncementFilters::new(
            &[semester(), inactive],
            &[Department::It],
            Locale::Th,
        );
        assert_eq!(filters.semesters.len(), 2);
        assert_eq!(filters.semesters[0].code, "All");
        assert_eq!(filters.semesters[0].display_name, "ทั้งหมด");
        assert_eq!(filters.departments, vec!["All", "it"]);
    }
}
