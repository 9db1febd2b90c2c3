//! Table view model: filtering, sorting and pagination over an in-memory row set.
//!
//! Everything here is independent of the terminal. A table is described by a list
//! of [`Column`]s and a slice of [`Row`]s owned by the caller; the interactive
//! state lives in a [`ViewState`] and the rows to display are obtained with
//! [`derive_view`].
//!
//! ```text
//! rows ──▶ filter(search_query) ──▶ sort(sort) ──▶ paginate(page, items_per_page)
//!                   │
//!                   └──▶ total_pages
//! ```
//!
//! The state only changes through four transitions, each returning the new state:
//!
//! - [`ViewState::set_search_query`] (resets to page 1)
//! - [`ViewState::toggle_sort`]
//! - [`ViewState::set_items_per_page`] (resets to page 1)
//! - [`ViewState::set_page`]

use std::{cmp::Ordering, collections::HashMap, fmt};

use serde::{Deserialize, Serialize};

pub const DEFAULT_ITEMS_PER_PAGE: usize = 5;
pub const DEFAULT_ITEMS_PER_PAGE_OPTIONS: [usize; 3] = [5, 10, 15];

/// A column of the table.
///
/// `accessor` is the key used to read the cell out of each [`Row`]. Accessors must
/// be unique within one table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub header: String,
    pub accessor: String,
}

impl Column {
    pub fn new<H: Into<String>, A: Into<String>>(header: H, accessor: A) -> Self {
        Self {
            header: header.into(),
            accessor: accessor.into(),
        }
    }
}

/// A single displayable cell value.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl CellValue {
    fn rank(&self) -> u8 {
        match self {
            CellValue::Null => 0,
            CellValue::Bool(_) => 1,
            CellValue::Number(_) => 2,
            CellValue::Text(_) => 3,
        }
    }

    /// Ordering between two defined values.
    ///
    /// Values of the same kind compare naturally (numbers numerically, text
    /// lexically). Values of different kinds are ordered by kind so the result is
    /// still a total order.
    pub fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (CellValue::Number(a), CellValue::Number(b)) => a.total_cmp(b),
            (CellValue::Text(a), CellValue::Text(b)) => a.cmp(b),
            (CellValue::Bool(a), CellValue::Bool(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }

    /// Whether the textual form of this value contains `needle`, ignoring case.
    ///
    /// `needle` must already be lower-cased. Null never matches.
    fn contains_lowercase(&self, needle: &str) -> bool {
        match self {
            CellValue::Null => false,
            value => value.to_string().to_lowercase().contains(needle),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Null => Ok(()),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Number(n) => write!(f, "{n}"),
            CellValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}
impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}
impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        CellValue::Bool(value)
    }
}
impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}
impl From<i32> for CellValue {
    fn from(value: i32) -> Self {
        CellValue::Number(value.into())
    }
}
impl From<u32> for CellValue {
    fn from(value: u32) -> Self {
        CellValue::Number(value.into())
    }
}
impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(CellValue::Null, Into::into)
    }
}

/// One row of table data, keyed by column accessor.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row(HashMap<String, CellValue>);

impl Row {
    /// The value under `accessor`, with explicit nulls reported as absent.
    pub fn value(&self, accessor: &str) -> Option<&CellValue> {
        self.0
            .get(accessor)
            .filter(|value| !matches!(value, CellValue::Null))
    }

    /// Text shown in the cell for `accessor`; empty when absent.
    pub fn display(&self, accessor: &str) -> String {
        self.value(accessor)
            .map(ToString::to_string)
            .unwrap_or_default()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

impl<K: Into<String>, V: Into<CellValue>> FromIterator<(K, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum SortDirection {
    #[strum(to_string = "asc")]
    Ascending,
    #[strum(to_string = "desc")]
    Descending,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortConfig {
    pub key: String,
    pub direction: SortDirection,
}

/// Interactive state of one table instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub current_page: usize,
    pub items_per_page: usize,
    pub sort: Option<SortConfig>,
    pub search_query: String,
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new(DEFAULT_ITEMS_PER_PAGE)
    }
}

impl ViewState {
    pub fn new(items_per_page: usize) -> Self {
        Self {
            current_page: 1,
            items_per_page,
            sort: None,
            search_query: String::new(),
        }
    }

    /// Replace the search query and go back to the first page.
    #[must_use]
    pub fn set_search_query<T: Into<String>>(mut self, text: T) -> Self {
        self.search_query = text.into();
        self.current_page = 1;
        self
    }

    /// Sort by `accessor`, ascending first, then flipping between ascending and
    /// descending on each call for the same accessor.
    ///
    /// Once a sort is engaged there is no way back to the original order. The
    /// current page is kept.
    #[must_use]
    pub fn toggle_sort<T: Into<String>>(mut self, accessor: T) -> Self {
        let key = accessor.into();
        let direction = match &self.sort {
            Some(SortConfig {
                key: current,
                direction: SortDirection::Ascending,
            }) if *current == key => SortDirection::Descending,
            _ => SortDirection::Ascending,
        };
        self.sort = Some(SortConfig { key, direction });
        self
    }

    /// Change the page size and go back to the first page.
    #[must_use]
    pub fn set_items_per_page(mut self, items_per_page: usize) -> Self {
        self.items_per_page = items_per_page;
        self.current_page = 1;
        self
    }

    /// Jump to `page`. Not clamped: pages past the end derive an empty window.
    #[must_use]
    pub fn set_page(mut self, page: usize) -> Self {
        self.current_page = page;
        self
    }
}

/// Render-ready output of the derivation pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct TableView<'a> {
    pub page_rows: Vec<&'a Row>,
    pub filtered_count: usize,
    pub current_page: usize,
    pub total_pages: usize,
    pub sort: Option<SortConfig>,
}

impl TableView<'_> {
    /// "Previous" is disabled on the first page.
    pub fn is_first_page(&self) -> bool {
        self.current_page <= 1
    }

    /// "Next" is disabled on the last page, and on any page past it.
    pub fn is_last_page(&self) -> bool {
        self.current_page >= self.total_pages
    }

    /// Sort direction shown next to the header of `accessor`, if it is the sort key.
    pub fn sort_direction_of(&self, accessor: &str) -> Option<SortDirection> {
        self.sort
            .as_ref()
            .filter(|sort| sort.key == accessor)
            .map(|sort| sort.direction)
    }
}

/// Keep the rows where at least one column contains `query`, ignoring case.
pub fn filter_rows<'a>(columns: &[Column], rows: &'a [Row], query: &str) -> Vec<&'a Row> {
    if query.is_empty() {
        return rows.iter().collect();
    }
    let needle = query.to_lowercase();
    rows.iter()
        .filter(|row| {
            columns.iter().any(|column| {
                row.value(&column.accessor)
                    .is_some_and(|value| value.contains_lowercase(&needle))
            })
        })
        .collect()
}

/// Compare two rows on the sort key. Missing values go last in either direction.
pub fn compare_rows(a: &Row, b: &Row, sort: &SortConfig) -> Ordering {
    match (a.value(&sort.key), b.value(&sort.key)) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(a), Some(b)) => match sort.direction {
            SortDirection::Ascending => a.compare(b),
            SortDirection::Descending => a.compare(b).reverse(),
        },
    }
}

/// Stable sort, so rows with equal keys keep their filtered order.
pub fn sort_rows(rows: &mut [&Row], sort: &SortConfig) {
    rows.sort_by(|a, b| compare_rows(a, b, sort));
}

/// The rows of the 1-based `page`. Empty for page 0 or pages past the end.
pub fn paginate<'a>(rows: &[&'a Row], page: usize, items_per_page: usize) -> Vec<&'a Row> {
    let Some(start) = page
        .checked_sub(1)
        .and_then(|p| p.checked_mul(items_per_page))
    else {
        return Vec::new();
    };
    rows.iter().skip(start).take(items_per_page).copied().collect()
}

pub fn total_pages(row_count: usize, items_per_page: usize) -> usize {
    if items_per_page == 0 {
        return 0;
    }
    row_count.div_ceil(items_per_page)
}

/// Run the whole pipeline for `state`.
pub fn derive_view<'a>(columns: &[Column], rows: &'a [Row], state: &ViewState) -> TableView<'a> {
    let mut filtered = filter_rows(columns, rows, &state.search_query);
    let filtered_count = filtered.len();
    if let Some(sort) = &state.sort {
        sort_rows(&mut filtered, sort);
    }

    TableView {
        page_rows: paginate(&filtered, state.current_page, state.items_per_page),
        filtered_count,
        current_page: state.current_page,
        total_pages: total_pages(filtered_count, state.items_per_page),
        sort: state.sort.clone(),
    }
}
