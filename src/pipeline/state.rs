//! User-controlled filter, sort and pagination parameters.

use std::num::NonZeroUsize;

use chrono::NaiveDate;

/// A filter over a closed set of values, or no filter at all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Selection<T> {
    #[default]
    All,
    Only(T),
}

impl<T: PartialEq> Selection<T> {
    /// Whether a record carrying `value` passes this selection.
    ///
    /// Records without a value only pass `All`.
    pub fn matches(&self, value: Option<&T>) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(wanted) => value == Some(wanted),
        }
    }
}

/// Field a listing is ordered by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortKey {
    #[default]
    Date,
    Popularity,
}

impl SortKey {
    /// Parse `date`, or `views`/`popularity` for the popularity counter.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "date" => Some(SortKey::Date),
            "views" | "popularity" => Some(SortKey::Popularity),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Date => "date",
            SortKey::Popularity => "views",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    #[default]
    Descending,
}

impl SortDirection {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Some(SortDirection::Ascending),
            "desc" | "descending" => Some(SortDirection::Descending),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "asc",
            SortDirection::Descending => "desc",
        }
    }
}

/// Complete set of parameters for one rendering of a list view.
///
/// Changing any filter, the search text or the ordering moves the view back
/// to page 1; only [`FilterState::with_page`] selects another page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState<C, G> {
    pub(crate) date_from: Option<NaiveDate>,
    pub(crate) date_to: Option<NaiveDate>,
    pub(crate) category: Selection<C>,
    pub(crate) group: Selection<G>,
    pub(crate) search: Option<String>,
    pub(crate) sort_key: SortKey,
    pub(crate) sort_direction: SortDirection,
    pub(crate) page: NonZeroUsize,
    pub(crate) page_size: NonZeroUsize,
}

impl<C, G> FilterState<C, G> {
    /// Unfiltered, newest-first state for a view showing `page_size` items.
    pub fn new(page_size: NonZeroUsize) -> Self {
        Self {
            date_from: None,
            date_to: None,
            category: Selection::All,
            group: Selection::All,
            search: None,
            sort_key: SortKey::default(),
            sort_direction: SortDirection::default(),
            page: NonZeroUsize::MIN,
            page_size,
        }
    }

    pub fn page(&self) -> NonZeroUsize {
        self.page
    }

    pub fn page_size(&self) -> NonZeroUsize {
        self.page_size
    }

    pub fn with_page(mut self, page: NonZeroUsize) -> Self {
        self.page = page;
        self
    }

    pub fn with_date_range(mut self, from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        self.date_from = from;
        self.date_to = to;
        self.reset_page()
    }

    pub fn with_category(mut self, category: Selection<C>) -> Self {
        self.category = category;
        self.reset_page()
    }

    pub fn with_group(mut self, group: Selection<G>) -> Self {
        self.group = group;
        self.reset_page()
    }

    /// Set the title search text, trimmed; blank text clears the search.
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        let search = search.into();
        let search = search.trim();
        self.search = (!search.is_empty()).then(|| search.to_string());
        self.reset_page()
    }

    pub fn with_sort(mut self, key: SortKey, direction: SortDirection) -> Self {
        self.sort_key = key;
        self.sort_direction = direction;
        self.reset_page()
    }

    fn reset_page(mut self) -> Self {
        self.page = NonZeroUsize::MIN;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn size(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    #[test]
    fn test_defaults_are_newest_first() {
        let state: FilterState<u8, u8> = FilterState::new(size(10));
        assert_eq!(state.sort_key, SortKey::Date);
        assert_eq!(state.sort_direction, SortDirection::Descending);
        assert_eq!(state.page().get(), 1);
    }

    #[test]
    fn test_changing_filters_resets_page() {
        let base: FilterState<u8, u8> = FilterState::new(size(10)).with_page(size(4));

        assert_eq!(base.clone().with_search("thai").page().get(), 1);
        assert_eq!(base.clone().with_category(Selection::Only(1)).page().get(), 1);
        assert_eq!(base.clone().with_group(Selection::Only(2)).page().get(), 1);
        assert_eq!(
            base.clone()
                .with_sort(SortKey::Popularity, SortDirection::Ascending)
                .page()
                .get(),
            1
        );
        assert_eq!(base.clone().with_date_range(None, None).page().get(), 1);
        assert_eq!(base.page().get(), 4);
    }

    #[test]
    fn test_blank_search_clears() {
        let state: FilterState<u8, u8> = FilterState::new(size(6)).with_search("   ");
        assert!(state.search.is_none());
    }

    #[test]
    fn test_search_is_trimmed() {
        let state: FilterState<u8, u8> = FilterState::new(size(6)).with_search("  thai ");
        assert_eq!(state.search.as_deref(), Some("thai"));
    }

    #[test]
    fn test_selection_matches() {
        assert!(Selection::<u8>::All.matches(None));
        assert!(Selection::Only(3).matches(Some(&3)));
        assert!(!Selection::Only(3).matches(Some(&4)));
        assert!(!Selection::Only(3).matches(None));
    }

    #[test]
    fn test_sort_parsing() {
        assert_eq!(SortKey::parse("views"), Some(SortKey::Popularity));
        assert_eq!(SortKey::parse("Date"), Some(SortKey::Date));
        assert_eq!(SortKey::parse("title"), None);
        assert_eq!(SortDirection::parse("ASC"), Some(SortDirection::Ascending));
        assert_eq!(SortDirection::parse("up"), None);
    }
}
