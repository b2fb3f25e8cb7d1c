//! Database repository for read access to website content.
//!
//! Every listing method returns a complete snapshot in a stable order so that
//! the list-view pipeline sees identical input for identical data.

use chrono::NaiveDate;
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};

use crate::errors::AppError;
use crate::models::{
    Announcement, AnnouncementSummary, Department, Event, EventStatus, Experience, Member,
    MemberDepartment, Position, RelatedLink, Scholarship, Semester, Sponsor, SponsorType,
};

/// Database repository for all data operations.
#[derive(Clone)]
pub struct Repository {
    pool: SqlitePool,
}

const ANNOUNCEMENT_COLUMNS: &str = r#"
    a.id, a.date, a.department, a.title_th, a.title_en, a.views,
    s.code AS semester_code, s.name_th AS semester_name_th,
    s.name_en AS semester_name_en, s.is_active AS semester_is_active
"#;

const EVENT_COLUMNS: &str = r#"
    id, title, title_en, subtitle, image_url, date_label, start_date, date_range,
    status, status_text, description, location, organizer, views
"#;

impl Repository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub(crate) fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// True when no announcements and no events have been stored yet.
    pub async fn is_empty(&self) -> Result<bool, AppError> {
        let row = sqlx::query(
            "SELECT (SELECT COUNT(*) FROM announcements) + (SELECT COUNT(*) FROM events) AS total",
        )
        .fetch_one(&self.pool)
        .await?;
        let total: i64 = row.try_get("total")?;
        Ok(total == 0)
    }

    // ==================== EVENT OPERATIONS ====================

    /// List all events, newest first. Gallery and sponsors are not loaded.
    pub async fn list_events(&self) -> Result<Vec<Event>, AppError> {
        let rows = sqlx::query(&format!(
            "SELECT {EVENT_COLUMNS} FROM events ORDER BY start_date DESC, created_at DESC, rowid"
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(event_from_row).collect()
    }

    /// Get an event with its gallery images.
    pub async fn get_event(&self, id: &str) -> Result<Option<Event>, AppError> {
        let row = sqlx::query(&format!("SELECT {EVENT_COLUMNS} FROM events WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        let Some(row) = row else {
            return Ok(None);
        };
        let mut event = event_from_row(&row)?;

        let images = sqlx::query(
            "SELECT url FROM event_images WHERE event_id = ? ORDER BY sort_order, id",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;
        event.image_dir = images
            .iter()
            .map(|r| r.try_get::<String, _>("url"))
            .collect::<Result<Vec<_>, _>>()?
            .into_iter()
            .filter(|url| !url.trim().is_empty())
            .collect();

        Ok(Some(event))
    }

    /// Sponsors attached to an event, in display order.
    pub async fn list_event_sponsors(&self, event_id: &str) -> Result<Vec<Sponsor>, AppError> {
        let rows = sqlx::query(
            r#"SELECT s.id, s.name, s.name_en, s.description, s.description_en, s.logo,
                      s.sponsor_type, s.sort_order
               FROM sponsors s
               JOIN event_sponsors es ON es.sponsor_id = s.id
               WHERE es.event_id = ?
               ORDER BY s.sort_order, s.created_at"#,
        )
        .bind(event_id)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(sponsor_from_row).collect()
    }

    /// Count a view of an event. Returns false when the event does not exist.
    pub async fn increment_event_views(&self, id: &str) -> Result<bool, AppError> {
        let result = sqlx::query("UPDATE events SET views = views + 1 WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // ==================== ANNOUNCEMENT OPERATIONS ====================

    /// List published announcements, newest first.
    pub async fn list_announcements(&self) -> Result<Vec<AnnouncementSummary>, AppError> {
        let rows = sqlx::query(&format!(
            r#"SELECT {ANNOUNCEMENT_COLUMNS}
               FROM announcements a JOIN semesters s ON s.code = a.semester_code
               WHERE a.is_published = 1
               ORDER BY a.date DESC, a.created_at DESC, a.rowid"#
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(announcement_summary_from_row).collect()
    }

    /// Get a published announcement with its related links.
    pub async fn get_announcement(&self, id: &str) -> Result<Option<Announcement>, AppError> {
        let row = sqlx::query(&format!(
            r#"SELECT {ANNOUNCEMENT_COLUMNS}, a.content_th, a.content_en, a.created_at, a.updated_at
               FROM announcements a JOIN semesters s ON s.code = a.semester_code
               WHERE a.id = ? AND a.is_published = 1"#
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let links = sqlx::query(
            r#"SELECT name_th, name_en, url, sort_order FROM announcement_links
               WHERE announcement_id = ? ORDER BY sort_order, id"#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        let related_links = links
            .iter()
            .map(|r| -> Result<RelatedLink, sqlx::Error> {
                Ok(RelatedLink {
                    name_th: r.try_get("name_th")?,
                    name_en: r.try_get("name_en")?,
                    url: r.try_get("url")?,
                    order: r.try_get("sort_order")?,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Some(Announcement {
            summary: announcement_summary_from_row(&row)?,
            content_th: row.try_get("content_th")?,
            content_en: row.try_get("content_en")?,
            related_links,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        }))
    }

    /// Count a view of a published announcement.
    ///
    /// A single UPDATE keeps concurrent increments from losing counts.
    pub async fn increment_announcement_views(&self, id: &str) -> Result<bool, AppError> {
        let result = sqlx::query(
            "UPDATE announcements SET views = views + 1 WHERE id = ? AND is_published = 1",
        )
        .bind(id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Published announcements of the same department, newest first.
    pub async fn list_related_announcements(
        &self,
        id: &str,
        department: Department,
        limit: i64,
    ) -> Result<Vec<AnnouncementSummary>, AppError> {
        let rows = sqlx::query(&format!(
            r#"SELECT {ANNOUNCEMENT_COLUMNS}
               FROM announcements a JOIN semesters s ON s.code = a.semester_code
               WHERE a.is_published = 1 AND a.department = ? AND a.id != ?
               ORDER BY a.date DESC, a.created_at DESC, a.rowid
               LIMIT ?"#
        ))
        .bind(department.as_str())
        .bind(id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(announcement_summary_from_row).collect()
    }

    /// List all semesters, most recent code first.
    pub async fn list_semesters(&self) -> Result<Vec<Semester>, AppError> {
        let rows = sqlx::query(
            "SELECT code, name_th, name_en, is_active FROM semesters ORDER BY code DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|r| -> Result<Semester, AppError> {
                let is_active: i64 = r.try_get("is_active")?;
                Ok(Semester {
                    code: r.try_get("code")?,
                    name_th: r.try_get("name_th")?,
                    name_en: r.try_get("name_en")?,
                    is_active: is_active != 0,
                })
            })
            .collect()
    }

    /// Departments that have at least one published announcement.
    pub async fn list_used_departments(&self) -> Result<Vec<Department>, AppError> {
        let rows = sqlx::query(
            "SELECT DISTINCT department FROM announcements WHERE is_published = 1",
        )
        .fetch_all(&self.pool)
        .await?;

        let mut departments = rows
            .iter()
            .map(|r| decode(r, "department", Department::parse))
            .collect::<Result<Vec<_>, _>>()?;
        departments.sort();
        Ok(departments)
    }

    // ==================== DIRECTORY OPERATIONS ====================

    /// List all members in storage order.
    pub async fn list_members(&self) -> Result<Vec<Member>, AppError> {
        let rows = sqlx::query(
            r#"SELECT id, firstname, lastname, picture, university, major, position,
                      department, working
               FROM members ORDER BY rowid"#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|r| -> Result<Member, AppError> {
                let working: i64 = r.try_get("working")?;
                Ok(Member {
                    id: r.try_get("id")?,
                    firstname: r.try_get("firstname")?,
                    lastname: r.try_get("lastname")?,
                    picture: r.try_get("picture")?,
                    university: r.try_get("university")?,
                    major: r.try_get("major")?,
                    position: decode(r, "position", Position::parse)?,
                    department: decode(r, "department", MemberDepartment::parse)?,
                    working: working != 0,
                })
            })
            .collect()
    }

    /// List sponsors in display order.
    pub async fn list_sponsors(&self) -> Result<Vec<Sponsor>, AppError> {
        let rows = sqlx::query(
            r#"SELECT id, name, name_en, description, description_en, logo, sponsor_type, sort_order
               FROM sponsors ORDER BY sort_order, created_at"#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(sponsor_from_row).collect()
    }

    // ==================== INFORMATION PAGES ====================

    /// List active scholarships in display order.
    pub async fn list_scholarships(&self) -> Result<Vec<Scholarship>, AppError> {
        let rows = sqlx::query(
            "SELECT data FROM scholarships WHERE is_active = 1 ORDER BY sort_order, created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(|r| json_column(r, "data")).collect()
    }

    /// Get an active scholarship.
    pub async fn get_scholarship(&self, id: &str) -> Result<Option<Scholarship>, AppError> {
        let row = sqlx::query("SELECT data FROM scholarships WHERE id = ? AND is_active = 1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(|r| json_column(r, "data")).transpose()
    }

    /// List experiences, most recently posted first.
    pub async fn list_experiences(&self) -> Result<Vec<Experience>, AppError> {
        let rows = sqlx::query("SELECT data FROM experiences ORDER BY date_posted DESC, rowid")
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(|r| json_column(r, "data")).collect()
    }

    pub async fn get_experience(&self, id: &str) -> Result<Option<Experience>, AppError> {
        let row = sqlx::query("SELECT data FROM experiences WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(|r| json_column(r, "data")).transpose()
    }
}

// Helper functions for row conversion

/// Decode a closed-set text column.
fn decode<T>(row: &SqliteRow, column: &str, parse: fn(&str) -> Option<T>) -> Result<T, AppError> {
    let raw: String = row.try_get(column)?;
    parse(&raw).ok_or_else(|| AppError::Internal(format!("Unexpected {} value: {}", column, raw)))
}

fn json_column<T: serde::de::DeserializeOwned>(row: &SqliteRow, column: &str) -> Result<T, AppError> {
    let raw: String = row.try_get(column)?;
    serde_json::from_str(&raw)
        .map_err(|e| AppError::Internal(format!("Corrupt {} column: {}", column, e)))
}

fn views(row: &SqliteRow) -> Result<u64, AppError> {
    let views: i64 = row.try_get("views")?;
    u64::try_from(views)
        .map_err(|_| AppError::Internal(format!("Unexpected views value: {}", views)))
}

fn event_from_row(row: &SqliteRow) -> Result<Event, AppError> {
    Ok(Event {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        title_en: row.try_get("title_en")?,
        subtitle: row.try_get("subtitle")?,
        image_url: row.try_get("image_url")?,
        date: row.try_get("date_label")?,
        start_date: row.try_get::<NaiveDate, _>("start_date")?,
        date_range: row.try_get("date_range")?,
        status: decode(row, "status", EventStatus::parse)?,
        status_text: row.try_get("status_text")?,
        description: row.try_get("description")?,
        location: row.try_get("location")?,
        organizer: row.try_get("organizer")?,
        views: views(row)?,
        image_dir: Vec::new(),
        sponsors: Vec::new(),
    })
}

fn announcement_summary_from_row(row: &SqliteRow) -> Result<AnnouncementSummary, AppError> {
    let semester_is_active: i64 = row.try_get("semester_is_active")?;
    Ok(AnnouncementSummary {
        id: row.try_get("id")?,
        date: row.try_get::<NaiveDate, _>("date")?,
        semester: Semester {
            code: row.try_get("semester_code")?,
            name_th: row.try_get("semester_name_th")?,
            name_en: row.try_get("semester_name_en")?,
            is_active: semester_is_active != 0,
        },
        department: decode(row, "department", Department::parse)?,
        title_th: row.try_get("title_th")?,
        title_en: row.try_get("title_en")?,
        views: views(row)?,
    })
}

fn sponsor_from_row(row: &SqliteRow) -> Result<Sponsor, AppError> {
    Ok(Sponsor {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        name_en: row.try_get("name_en")?,
        description: row.try_get("description")?,
        description_en: row.try_get("description_en")?,
        logo: row.try_get("logo")?,
        sponsor_type: decode(row, "sponsor_type", SponsorType::parse)?,
        order: row.try_get("sort_order")?,
    })
}
