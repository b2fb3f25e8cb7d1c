//! Database module for SQLite persistence.
//!
//! SQLite holds the published website content; listings are read as
//! snapshots and shaped by the list-view pipeline.

mod repository;
mod seed;

pub use repository::*;
pub use seed::*;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::path::Path;
use std::str::FromStr;

/// Initialize the database connection pool and run migrations.
pub async fn init_database(db_path: &Path) -> Result<SqlitePool, sqlx::Error> {
    if let Some(parent) = db_path.parent() {
        tokio::fs::create_dir_all(parent).await.ok();
    }

    let db_url = format!("sqlite:{}?mode=rwc", db_path.display());

    let options = SqliteConnectOptions::from_str(&db_url)?
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
        .synchronous(sqlx::sqlite::SqliteSynchronous::Normal)
        .busy_timeout(std::time::Duration::from_secs(30));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    run_migrations(&pool).await?;

    Ok(pool)
}

/// Run database migrations.
async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS semesters (
            code TEXT PRIMARY KEY,
            name_th TEXT NOT NULL DEFAULT '',
            name_en TEXT NOT NULL DEFAULT '',
            is_active INTEGER NOT NULL DEFAULT 1
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS announcements (
            id TEXT PRIMARY KEY,
            title_th TEXT NOT NULL,
            title_en TEXT NOT NULL DEFAULT '',
            content_th TEXT NOT NULL DEFAULT '',
            content_en TEXT NOT NULL DEFAULT '',
            date TEXT NOT NULL,
            semester_code TEXT NOT NULL REFERENCES semesters(code),
            department TEXT NOT NULL DEFAULT 'tsak',
            views INTEGER NOT NULL DEFAULT 0 CHECK (views >= 0),
            is_published INTEGER NOT NULL DEFAULT 1,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS announcement_links (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            announcement_id TEXT NOT NULL REFERENCES announcements(id) ON DELETE CASCADE,
            name_th TEXT NOT NULL,
            name_en TEXT NOT NULL DEFAULT '',
            url TEXT NOT NULL,
            sort_order INTEGER NOT NULL DEFAULT 0
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS sponsors (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            name_en TEXT NOT NULL DEFAULT '',
            description TEXT NOT NULL DEFAULT '',
            description_en TEXT NOT NULL DEFAULT '',
            logo TEXT,
            sponsor_type TEXT NOT NULL,
            sort_order INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS events (
            id TEXT PRIMARY KEY,
            title TEXT NOT NULL,
            title_en TEXT,
            subtitle TEXT,
            image_url TEXT,
            date_label TEXT NOT NULL,
            start_date TEXT NOT NULL,
            date_range TEXT,
            status TEXT NOT NULL,
            status_text TEXT NOT NULL DEFAULT '',
            description TEXT,
            location TEXT,
            organizer TEXT,
            views INTEGER NOT NULL DEFAULT 0 CHECK (views >= 0),
            created_at TEXT NOT NULL
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS event_images (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            event_id TEXT NOT NULL REFERENCES events(id) ON DELETE CASCADE,
            url TEXT NOT NULL,
            sort_order INTEGER NOT NULL DEFAULT 0
        );

        CREATE TABLE IF NOT EXISTS event_sponsors (
            event_id TEXT NOT NULL REFERENCES events(id) ON DELETE CASCADE,
            sponsor_id TEXT NOT NULL REFERENCES sponsors(id) ON DELETE CASCADE,
            PRIMARY KEY (event_id, sponsor_id)
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS members (
            id TEXT PRIMARY KEY,
            firstname TEXT NOT NULL,
            lastname TEXT NOT NULL,
            picture TEXT,
            university TEXT NOT NULL,
            major TEXT NOT NULL,
            position TEXT NOT NULL,
            department TEXT NOT NULL,
            working INTEGER NOT NULL DEFAULT 1
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS scholarships (
            id TEXT PRIMARY KEY,
            scholarship_type TEXT NOT NULL,
            sort_order INTEGER NOT NULL DEFAULT 0,
            is_active INTEGER NOT NULL DEFAULT 1,
            data TEXT NOT NULL,
            created_at TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS experiences (
            id TEXT PRIMARY KEY,
            date_posted TEXT NOT NULL,
            data TEXT NOT NULL
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create indexes for common queries
    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_announcements_date ON announcements(date);
        CREATE INDEX IF NOT EXISTS idx_announcements_department ON announcements(department);
        CREATE INDEX IF NOT EXISTS idx_announcements_semester ON announcements(semester_code);
        CREATE INDEX IF NOT EXISTS idx_events_start_date ON events(start_date);
        CREATE INDEX IF NOT EXISTS idx_sponsors_type ON sponsors(sponsor_type);
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}
