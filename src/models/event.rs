//! Event model matching the frontend EventData interface.

use std::convert::Infallible;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::Locale;
use crate::pipeline::Listable;

string_enum! {
    /// Registration status of an event.
    EventStatus {
        Open => "open",
        Closed => "closed",
        Ended => "ended",
    }
}

/// Sponsor shown on an event detail page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventSponsor {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
}

/// An association event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    #[serde(default)]
    pub id: String,
    /// Thai title, also the fallback for other locales.
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title_en: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Free-form date label, e.g. `20.07.2025 - 23.07.2025`.
    pub date: String,
    pub start_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_range: Option<String>,
    pub status: EventStatus,
    #[serde(default)]
    pub status_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organizer: Option<String>,
    #[serde(default)]
    pub views: u64,
    /// Gallery image URLs, detail view only.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub image_dir: Vec<String>,
    /// Detail view only.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sponsors: Vec<EventSponsor>,
}

impl Listable for Event {
    type Category = EventStatus;
    type Group = Infallible;

    fn display_date(&self) -> NaiveDate {
        self.start_date
    }

    fn category(&self) -> &EventStatus {
        &self.status
    }

    fn group(&self) -> Option<&Infallible> {
        None
    }

    fn title(&self, locale: Locale) -> &str {
        locale.pick_opt(self.title_en.as_deref(), &self.title)
    }

    fn popularity(&self) -> u64 {
        self.views
    }
}

/// Parse the first `dd.mm.yyyy` date out of a free-form event date label.
pub fn parse_date_label(label: &str) -> Option<NaiveDate> {
    label
        .split(|c: char| c.is_whitespace() || c == '-')
        .find(|part| !part.is_empty())
        .and_then(|first| NaiveDate::parse_from_str(first, "%d.%m.%Y").ok())
}
