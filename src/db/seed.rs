//! Seed import for bootstrapping an empty database.

use std::collections::HashSet;
use std::path::Path;

use chrono::Utc;
use sqlx::SqliteConnection;

use super::Repository;
use crate::errors::AppError;
use crate::models::{Experience, Member, Scholarship, SeedAnnouncement, SeedData, SeedEvent, Sponsor};

/// Number of rows written per section by a seed import.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub semesters: usize,
    pub announcements: usize,
    pub events: usize,
    pub members: usize,
    pub sponsors: usize,
    pub scholarships: usize,
    pub experiences: usize,
}

/// Read and parse a seed document.
pub async fn load_seed_file(path: &Path) -> Result<SeedData, AppError> {
    let raw = tokio::fs::read_to_string(path).await.map_err(|e| {
        AppError::Internal(format!("Failed to read seed file {}: {}", path.display(), e))
    })?;
    Ok(serde_json::from_str(&raw)?)
}

fn id_or_new(id: &str) -> String {
    if id.trim().is_empty() {
        uuid::Uuid::new_v4().to_string()
    } else {
        id.to_string()
    }
}

impl Repository {
    /// Import a seed document in a single transaction.
    ///
    /// References are checked before anything is written: announcements must
    /// name a seeded semester and events may only reference seeded sponsors.
    pub async fn import_seed(&self, seed: &SeedData) -> Result<SeedSummary, AppError> {
        let semester_codes: HashSet<&str> = seed.semesters.iter().map(|s| s.code.as_str()).collect();
        for announcement in &seed.announcements {
            if !semester_codes.contains(announcement.semester.as_str()) {
                return Err(AppError::Validation(format!(
                    "Announcement {:?} references unknown semester {:?}",
                    announcement.title_th, announcement.semester
                )));
            }
        }

        let sponsor_ids: Vec<String> = seed.sponsors.iter().map(|s| id_or_new(&s.id)).collect();
        for event in &seed.events {
            if event.resolved_start_date().is_none() {
                return Err(AppError::Validation(format!(
                    "Event {:?} has no start date and its date label {:?} is not dd.mm.yyyy",
                    event.title, event.date
                )));
            }
            if let Some(missing) = event.sponsor_ids.iter().find(|id| !sponsor_ids.contains(id)) {
                return Err(AppError::Validation(format!(
                    "Event {:?} references unknown sponsor {:?}",
                    event.title, missing
                )));
            }
        }

        let now = Utc::now().to_rfc3339();
        let mut tx = self.pool().begin().await?;

        for semester in &seed.semesters {
            sqlx::query(
                "INSERT INTO semesters (code, name_th, name_en, is_active) VALUES (?, ?, ?, ?)",
            )
            .bind(&semester.code)
            .bind(&semester.name_th)
            .bind(&semester.name_en)
            .bind(semester.is_active as i32)
            .execute(&mut *tx)
            .await?;
        }

        for (sponsor, id) in seed.sponsors.iter().zip(&sponsor_ids) {
            insert_sponsor(&mut tx, id, sponsor, &now).await?;
        }

        for announcement in &seed.announcements {
            insert_announcement(&mut tx, announcement, &now).await?;
        }

        for event in &seed.events {
            insert_event(&mut tx, event, &now).await?;
        }

        for member in &seed.members {
            insert_member(&mut tx, member).await?;
        }

        for scholarship in &seed.scholarships {
            insert_scholarship(&mut tx, scholarship, &now).await?;
        }

        for experience in &seed.experiences {
            insert_experience(&mut tx, experience).await?;
        }

        tx.commit().await?;

        let summary = SeedSummary {
            semesters: seed.semesters.len(),
            announcements: seed.announcements.len(),
            events: seed.events.len(),
            members: seed.members.len(),
            sponsors: seed.sponsors.len(),
            scholarships: seed.scholarships.len(),
            experiences: seed.experiences.len(),
        };
        tracing::info!(?summary, "Seed data imported");
        Ok(summary)
    }
}

async fn insert_sponsor(
    conn: &mut SqliteConnection,
    id: &str,
    sponsor: &Sponsor,
    now: &str,
) -> Result<(), AppError> {
    sqlx::query(
        r#"INSERT INTO sponsors (id, name, name_en, description, description_en, logo,
                                 sponsor_type, sort_order, created_at)
           VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)"#,
    )
    .bind(id)
    .bind(&sponsor.name)
    .bind(&sponsor.name_en)
    .bind(&sponsor.description)
    .bind(&sponsor.description_en)
    .bind(&sponsor.logo)
    .bind(sponsor.sponsor_type.as_str())
    .bind(sponsor.order)
    .bind(now)
    .execute(&mut *conn)
    .await?;
    Ok(())
}

async fn insert_announcement(
    conn: &mut SqliteConnection,
    announcement: &SeedAnnouncement,
    now: &str,
) -> Result<(), AppError> {
    let id = id_or_new(&announcement.id);
    let views = i64::try_from(announcement.views).unwrap_or(i64::MAX);

    sqlx::query(
        r#"INSERT INTO announcements (id, title_th, title_en, content_th, content_en, date,
                                      semester_code, department, views, is_published,
                                      created_at, updated_at)
           VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"#,
    )
    .bind(&id)
    .bind(&announcement.title_th)
    .bind(&announcement.title_en)
    .bind(&announcement.content_th)
    .bind(&announcement.content_en)
    .bind(announcement.date)
    .bind(&announcement.semester)
    .bind(announcement.department.as_str())
    .bind(views)
    .bind(announcement.is_published as i32)
    .bind(now)
    .bind(now)
    .execute(&mut *conn)
    .await?;

    for link in &announcement.related_links {
        sqlx::query(
            r#"INSERT INTO announcement_links (announcement_id, name_th, name_en, url, sort_order)
               VALUES (?, ?, ?, ?, ?)"#,
        )
        .bind(&id)
        .bind(&link.name_th)
        .bind(&link.name_en)
        .bind(&link.url)
        .bind(link.order)
        .execute(&mut *conn)
        .await?;
    }

    Ok(())
}

async fn insert_event(
    conn: &mut SqliteConnection,
    event: &SeedEvent,
    now: &str,
) -> Result<(), AppError> {
    let id = id_or_new(&event.id);
    let start_date = event.resolved_start_date().ok_or_else(|| {
        AppError::Validation(format!("Event {:?} has no start date", event.title))
    })?;
    let views = i64::try_from(event.views).unwrap_or(i64::MAX);

    sqlx::query(
        r#"INSERT INTO events (id, title, title_en, subtitle, image_url, date_label, start_date,
                               date_range, status, status_text, description, location,
                               organizer, views, created_at)
           VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"#,
    )
    .bind(&id)
    .bind(&event.title)
    .bind(&event.title_en)
    .bind(&event.subtitle)
    .bind(&event.image_url)
    .bind(&event.date)
    .bind(start_date)
    .bind(&event.date_range)
    .bind(event.status.as_str())
    .bind(&event.status_text)
    .bind(&event.description)
    .bind(&event.location)
    .bind(&event.organizer)
    .bind(views)
    .bind(now)
    .execute(&mut *conn)
    .await?;

    for (order, url) in event.image_dir.iter().enumerate() {
        sqlx::query("INSERT INTO event_images (event_id, url, sort_order) VALUES (?, ?, ?)")
            .bind(&id)
            .bind(url)
            .bind(order as i64)
            .execute(&mut *conn)
            .await?;
    }

    for sponsor_id in &event.sponsor_ids {
        sqlx::query("INSERT OR IGNORE INTO event_sponsors (event_id, sponsor_id) VALUES (?, ?)")
            .bind(&id)
            .bind(sponsor_id)
            .execute(&mut *conn)
            .await?;
    }

    Ok(())
}

async fn insert_member(conn: &mut SqliteConnection, member: &Member) -> Result<(), AppError> {
    sqlx::query(
        r#"INSERT INTO members (id, firstname, lastname, picture, university, major, position,
                                department, working)
           VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)"#,
    )
    .bind(id_or_new(&member.id))
    .bind(&member.firstname)
    .bind(&member.lastname)
    .bind(&member.picture)
    .bind(&member.university)
    .bind(&member.major)
    .bind(member.position.as_str())
    .bind(member.department.as_str())
    .bind(member.working as i32)
    .execute(&mut *conn)
    .await?;
    Ok(())
}

async fn insert_scholarship(
    conn: &mut SqliteConnection,
    scholarship: &Scholarship,
    now: &str,
) -> Result<(), AppError> {
    let mut stored = scholarship.clone();
    stored.id = id_or_new(&scholarship.id);

    sqlx::query(
        r#"INSERT INTO scholarships (id, scholarship_type, sort_order, is_active, data, created_at)
           VALUES (?, ?, ?, ?, ?, ?)"#,
    )
    .bind(&stored.id)
    .bind(stored.scholarship_type.as_str())
    .bind(stored.order)
    .bind(stored.is_active as i32)
    .bind(serde_json::to_string(&stored)?)
    .bind(now)
    .execute(&mut *conn)
    .await?;
    Ok(())
}

async fn insert_experience(
    conn: &mut SqliteConnection,
    experience: &Experience,
) -> Result<(), AppError> {
    let mut stored = experience.clone();
    stored.id = id_or_new(&experience.id);

    sqlx::query("INSERT INTO experiences (id, date_posted, data) VALUES (?, ?, ?)")
        .bind(&stored.id)
        .bind(stored.date_posted)
        .bind(serde_json::to_string(&stored)?)
        .execute(&mut *conn)
        .await?;
    Ok(())
}
