//! Query-string parsing for list endpoints.
//!
//! Parameters arrive as raw strings so that malformed values produce a
//! `VALIDATION_ERROR` envelope instead of axum's plain-text rejection.

use std::num::NonZeroUsize;

use chrono::NaiveDate;
use serde::Deserialize;

use crate::errors::AppError;
use crate::models::Locale;
use crate::pipeline::{FilterState, Selection, SortDirection, SortKey};

/// Value of a closed-set filter meaning "no filter".
const ALL: &str = "all";

/// Raw list-view query parameters.
///
/// `category`, `status` and `department` are aliases for the category
/// filter; `group` and `semester` for the group filter.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListParams {
    pub locale: Option<String>,
    pub lang: Option<String>,
    pub page: Option<String>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
    pub category: Option<String>,
    pub status: Option<String>,
    pub department: Option<String>,
    pub group: Option<String>,
    pub semester: Option<String>,
    pub search: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
}

/// Query parameters of detail endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LocaleParams {
    pub locale: Option<String>,
    pub lang: Option<String>,
}

impl LocaleParams {
    pub fn locale(&self, default: Locale) -> Result<Locale, AppError> {
        parse_locale(present(&self.locale).or(present(&self.lang)), default)
    }
}

/// Treat absent and blank parameters alike.
fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Parse a `locale`/`lang` parameter, defaulting when absent.
pub fn parse_locale(raw: Option<&str>, default: Locale) -> Result<Locale, AppError> {
    match raw.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(default),
        Some(value) => Locale::parse(value)
            .ok_or_else(|| AppError::Validation(format!("Unknown locale {:?}, expected en or th", value))),
    }
}

/// Parse an optional closed-set filter; `all` (any case) means no filter.
pub fn parse_choice<T>(
    name: &str,
    raw: Option<&str>,
    parse: impl Fn(&str) -> Option<T>,
) -> Result<Option<T>, AppError> {
    match raw.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(value) if value.eq_ignore_ascii_case(ALL) => Ok(None),
        Some(value) => parse(value)
            .map(Some)
            .ok_or_else(|| AppError::Validation(format!("Unknown {} {:?}", name, value))),
    }
}

fn parse_date(name: &str, raw: Option<&str>) -> Result<Option<NaiveDate>, AppError> {
    raw.map(|value| {
        NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
            AppError::Validation(format!("{} must be a YYYY-MM-DD date, got {:?}", name, value))
        })
    })
    .transpose()
}

fn parse_page(raw: Option<&str>) -> Result<NonZeroUsize, AppError> {
    match raw {
        None => Ok(NonZeroUsize::MIN),
        Some(value) => value.parse::<NonZeroUsize>().map_err(|_| {
            AppError::Validation(format!("page must be a positive integer, got {:?}", value))
        }),
    }
}

impl ListParams {
    pub fn locale(&self, default: Locale) -> Result<Locale, AppError> {
        parse_locale(present(&self.locale).or(present(&self.lang)), default)
    }

    fn category_raw(&self) -> Option<&str> {
        present(&self.category)
            .or(present(&self.status))
            .or(present(&self.department))
    }

    fn group_raw(&self) -> Option<&str> {
        present(&self.group).or(present(&self.semester))
    }

    /// Build the pipeline state these parameters describe.
    ///
    /// The page is applied last so that it survives the page reset the
    /// filter setters perform.
    pub fn filter_state<C, G>(
        &self,
        page_size: NonZeroUsize,
        parse_category: impl Fn(&str) -> Option<C>,
        parse_group: impl Fn(&str) -> Option<G>,
    ) -> Result<FilterState<C, G>, AppError> {
        let date_from = parse_date("date_from", present(&self.date_from))?;
        let date_to = parse_date("date_to", present(&self.date_to))?;
        let category = parse_choice("category", self.category_raw(), parse_category)?;
        let group = parse_choice("group", self.group_raw(), parse_group)?;
        let sort_key = parse_choice("sort_by", present(&self.sort_by), SortKey::parse)?;
        let sort_direction =
            parse_choice("sort_order", present(&self.sort_order), SortDirection::parse)?;
        let page = parse_page(present(&self.page))?;

        let state = FilterState::new(page_size)
            .with_date_range(date_from, date_to)
            .with_category(category.map_or(Selection::All, Selection::Only))
            .with_group(group.map_or(Selection::All, Selection::Only))
            .with_search(present(&self.search).unwrap_or_default())
            .with_sort(sort_key.unwrap_or_default(), sort_direction.unwrap_or_default())
            .with_page(page);

        Ok(state)
    }
}
