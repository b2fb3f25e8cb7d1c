//! List-view pipeline shared by the events and announcements listings.
//!
//! [`apply`] turns an immutable snapshot of records plus a [`FilterState`]
//! into one page of results. It filters, sorts and paginates, in that order,
//! and touches nothing but its arguments.

mod state;

pub use state::*;

use std::cmp::Ordering;
use std::num::NonZeroUsize;

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::Locale;

/// Field selectors the pipeline needs from a listable record.
pub trait Listable {
    /// Closed classification the category filter matches against.
    type Category: PartialEq;
    /// Independent grouping the group filter matches against.
    type Group: PartialEq;

    /// Calendar day used for the date range filter and date ordering.
    fn display_date(&self) -> NaiveDate;

    fn category(&self) -> &Self::Category;

    fn group(&self) -> Option<&Self::Group>;

    /// Title shown for `locale`, falling back to the default-locale title.
    fn title(&self, locale: Locale) -> &str;

    /// Non-negative popularity counter such as a view count.
    fn popularity(&self) -> u64;
}

/// One page of a filtered, sorted listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_matching: usize,
    /// Zero when nothing matched.
    pub total_pages: usize,
    /// Requested page after clamping into `1..=max(1, total_pages)`.
    pub page: usize,
    pub page_size: usize,
}

impl<T> Page<T> {
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total_matching: self.total_matching,
            total_pages: self.total_pages,
            page: self.page,
            page_size: self.page_size,
        }
    }
}

/// Filter, sort and paginate `records` according to `state`.
pub fn apply<T>(records: &[T], state: &FilterState<T::Category, T::Group>, locale: Locale) -> Page<T>
where
    T: Listable + Clone,
{
    let needle = state.search.as_deref().map(str::to_lowercase);

    let mut matching: Vec<&T> = records
        .iter()
        .filter(|r| matches_category(*r, state))
        .filter(|r| matches_group(*r, state))
        .filter(|r| matches_date_range(*r, state))
        .filter(|r| matches_search(*r, needle.as_deref(), locale))
        .collect();

    // slice::sort_by is stable; descending swaps the operands instead of
    // reversing so ties keep their input order.
    matching.sort_by(|a, b| match state.sort_direction {
        SortDirection::Ascending => compare_by_key(*a, *b, state.sort_key),
        SortDirection::Descending => compare_by_key(*b, *a, state.sort_key),
    });

    paginate(&matching, state.page, state.page_size)
}

fn compare_by_key<T: Listable>(a: &T, b: &T, key: SortKey) -> Ordering {
    match key {
        SortKey::Date => a.display_date().cmp(&b.display_date()),
        SortKey::Popularity => a.popularity().cmp(&b.popularity()),
    }
}

fn paginate<T: Clone>(matching: &[&T], page: NonZeroUsize, page_size: NonZeroUsize) -> Page<T> {
    let total_matching = matching.len();
    let size = page_size.get();
    let total_pages = total_matching.div_ceil(size);
    let page = page.get().clamp(1, total_pages.max(1));

    let start = (page - 1) * size;
    let end = (start + size).min(total_matching);
    let items = matching
        .get(start..end)
        .unwrap_or_default()
        .iter()
        .map(|r| (*r).clone())
        .collect();

    Page {
        items,
        total_matching,
        total_pages,
        page,
        page_size: size,
    }
}

pub(crate) fn matches_category<T: Listable>(
    record: &T,
    state: &FilterState<T::Category, T::Group>,
) -> bool {
    state.category.matches(Some(record.category()))
}

pub(crate) fn matches_group<T: Listable>(
    record: &T,
    state: &FilterState<T::Category, T::Group>,
) -> bool {
    state.group.matches(record.group())
}

pub(crate) fn matches_date_range<T: Listable>(
    record: &T,
    state: &FilterState<T::Category, T::Group>,
) -> bool {
    let date = record.display_date();
    state.date_from.is_none_or(|from| date >= from) && state.date_to.is_none_or(|to| date <= to)
}

/// `needle` must already be lowercased.
pub(crate) fn matches_search<T: Listable>(record: &T, needle: Option<&str>, locale: Locale) -> bool {
    match needle {
        Some(needle) => record.title(locale).to_lowercase().contains(needle),
        None => true,
    }
}
