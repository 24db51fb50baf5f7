//! List Views
//!
//! Client-side filtering, sorting and pagination over records fetched once
//! from the API. Nothing here talks to the server.
//!
//! ## Pipeline
//!
//! 1. **Filter**: case-insensitive substring match over each record type's
//!    searchable fields
//! 2. **Sort**: by one column; text ignores case, dates compare
//!    chronologically, missing values always sort last
//! 3. **Paginate**: slice the sorted result by page size

use chrono::{NaiveDate, NaiveDateTime};
use std::cmp::Ordering;
use std::fmt;

mod records;

pub use records::{
    full_name, CustomerColumn, EmployeeColumn, LeaveColumn, NotificationColumn, ServiceColumn,
    VehicleColumn,
};

pub const DEFAULT_PAGE_SIZE: usize = 10;

/// A comparable cell value
#[derive(Debug, Clone, PartialEq)]
pub enum SortValue {
    Missing,
    Number(f64),
    Text(String),
    Date(NaiveDateTime),
}

impl SortValue {
    pub fn text(value: impl Into<String>) -> Self {
        SortValue::Text(value.into())
    }

    pub fn opt_text(value: Option<&str>) -> Self {
        value.map(SortValue::text).unwrap_or(SortValue::Missing)
    }

    pub fn date(value: NaiveDate) -> Self {
        SortValue::Date(value.and_time(chrono::NaiveTime::MIN))
    }

    pub fn opt_datetime(value: Option<NaiveDateTime>) -> Self {
        value.map(SortValue::Date).unwrap_or(SortValue::Missing)
    }

    fn rank(&self) -> u8 {
        match self {
            SortValue::Number(_) => 0,
            SortValue::Date(_) => 1,
            SortValue::Text(_) => 2,
            SortValue::Missing => 3,
        }
    }

    /// Ordering between two present values
    fn compare(&self, other: &SortValue) -> Ordering {
        match (self, other) {
            (SortValue::Number(a), SortValue::Number(b)) => a.total_cmp(b),
            (SortValue::Date(a), SortValue::Date(b)) => a.cmp(b),
            (SortValue::Text(a), SortValue::Text(b)) => a
                .to_lowercase()
                .cmp(&b.to_lowercase())
                .then_with(|| a.cmp(b)),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

/// A record that can be shown in a list view
pub trait Listable {
    type Column: Copy + Eq + fmt::Debug;

    /// Whether any searchable field contains `needle` (already lowercase)
    fn matches(&self, needle: &str) -> bool;

    fn sort_value(&self, column: Self::Column) -> SortValue;
}

/// Case-insensitive substring test over optional fields
pub fn any_field_contains<'a>(
    needle: &str,
    fields: impl IntoIterator<Item = Option<&'a str>>,
) -> bool {
    fields
        .into_iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(needle))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    pub fn arrow(self) -> &'static str {
        match self {
            SortDirection::Ascending => "▲",
            SortDirection::Descending => "▼",
        }
    }
}

/// Current sort column and direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState<C> {
    pub column: Option<C>,
    pub direction: SortDirection,
}

impl<C> Default for SortState<C> {
    fn default() -> Self {
        Self {
            column: None,
            direction: SortDirection::Ascending,
        }
    }
}

impl<C: Copy + Eq> SortState<C> {
    pub fn by(column: C, direction: SortDirection) -> Self {
        Self {
            column: Some(column),
            direction,
        }
    }

    /// Same column flips direction; a new column starts ascending
    pub fn toggle(&mut self, column: C) {
        if self.column == Some(column) {
            self.direction = self.direction.flipped();
        } else {
            self.column = Some(column);
            self.direction = SortDirection::Ascending;
        }
    }

    /// Arrow to show next to `column`'s header, if it is the sort column
    pub fn indicator(&self, column: C) -> Option<&'static str> {
        (self.column == Some(column)).then(|| self.direction.arrow())
    }
}

/// Compare two records under a sort state; missing values go last
pub fn compare_by<T: Listable>(a: &T, b: &T, sort: &SortState<T::Column>) -> Ordering {
    let Some(column) = sort.column else {
        return Ordering::Equal;
    };

    let (va, vb) = (a.sort_value(column), b.sort_value(column));
    match (&va, &vb) {
        (SortValue::Missing, SortValue::Missing) => Ordering::Equal,
        (SortValue::Missing, _) => Ordering::Greater,
        (_, SortValue::Missing) => Ordering::Less,
        _ => match sort.direction {
            SortDirection::Ascending => va.compare(&vb),
            SortDirection::Descending => vb.compare(&va),
        },
    }
}

/// Stable in-place sort
pub fn sort_records<T: Listable>(items: &mut [T], sort: &SortState<T::Column>) {
    items.sort_by(|a, b| compare_by(a, b, sort));
}

/// Filter/sort/paginate state over one fetched list
#[derive(Debug, Clone)]
pub struct ListView<T: Listable> {
    items: Vec<T>,
    query: String,
    sort: SortState<T::Column>,
    page: usize,
    page_size: usize,
}

impl<T: Listable + Clone> ListView<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items,
            query: String::new(),
            sort: SortState::default(),
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn set_items(&mut self, items: Vec<T>) {
        self.items = items;
        self.page = self.page.min(self.page_count());
    }

    /// Replace or update one record in place
    pub fn update_where(&mut self, pred: impl Fn(&T) -> bool, f: impl Fn(&mut T)) {
        self.items.iter_mut().filter(|item| pred(item)).for_each(f);
    }

    pub fn remove_where(&mut self, pred: impl Fn(&T) -> bool) {
        self.items.retain(|item| !pred(item));
        self.page = self.page.min(self.page_count());
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// New search text; jumps back to the first page
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.page = 1;
    }

    pub fn sort(&self) -> &SortState<T::Column> {
        &self.sort
    }

    pub fn sort_by(&mut self, column: T::Column) {
        self.sort.toggle(column);
    }

    pub fn set_sort(&mut self, sort: SortState<T::Column>) {
        self.sort = sort;
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Records passing the filter, sorted
    pub fn filtered(&self) -> Vec<T> {
        let needle = self.query.trim().to_lowercase();
        let mut rows: Vec<T> = self
            .items
            .iter()
            .filter(|item| needle.is_empty() || item.matches(&needle))
            .cloned()
            .collect();
        sort_records(&mut rows, &self.sort);
        rows
    }

    pub fn filtered_count(&self) -> usize {
        let needle = self.query.trim().to_lowercase();
        self.items
            .iter()
            .filter(|item| needle.is_empty() || item.matches(&needle))
            .count()
    }

    /// Number of pages; never zero
    pub fn page_count(&self) -> usize {
        self.filtered_count().div_ceil(self.page_size).max(1)
    }

    /// Rows on the current page
    pub fn visible(&self) -> Vec<T> {
        let start = (self.page - 1) * self.page_size;
        self.filtered()
            .into_iter()
            .skip(start)
            .take(self.page_size)
            .collect()
    }

    /// Move to `page`, clamped into range
    pub fn set_page(&mut self, page: usize) {
        self.page = page.clamp(1, self.page_count());
    }

    pub fn next_page(&mut self) {
        self.set_page(self.page + 1);
    }

    pub fn prev_page(&mut self) {
        self.set_page(self.page.saturating_sub(1));
    }
}

/// Error for an unknown column name
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Unknown column '{0}'")]
pub struct UnknownColumn(pub String);

/// Column metadata: every column with its key and header label
pub trait ColumnInfo: Sized + Copy + PartialEq + 'static {
    const ALL: &'static [(Self, &'static str, &'static str)];

    fn key(self) -> &'static str {
        Self::ALL
            .iter()
            .find(|(c, _, _)| *c == self)
            .map(|(_, key, _)| *key)
            .unwrap_or_default()
    }

    fn label(self) -> &'static str {
        Self::ALL
            .iter()
            .find(|(c, _, _)| *c == self)
            .map(|(_, _, label)| *label)
            .unwrap_or_default()
    }

    /// Look a column up by key, ignoring case and separators
    fn parse(name: &str) -> Result<Self, UnknownColumn> {
        let wanted: String = name
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect();

        Self::ALL
            .iter()
            .find(|(_, key, _)| key.replace('_', "").eq_ignore_ascii_case(&wanted))
            .map(|(column, _, _)| *column)
            .ok_or_else(|| UnknownColumn(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        name: &'static str,
        seen: Option<NaiveDate>,
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum RowColumn {
        Name,
        Seen,
    }

    impl Listable for Row {
        type Column = RowColumn;

        fn matches(&self, needle: &str) -> bool {
            any_field_contains(needle, [Some(self.name)])
        }

        fn sort_value(&self, column: RowColumn) -> SortValue {
            match column {
                RowColumn::Name => SortValue::text(self.name),
                RowColumn::Seen => self.seen.map(SortValue::date).unwrap_or(SortValue::Missing),
            }
        }
    }

    fn day(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    fn rows() -> Vec<Row> {
        vec![
            Row { name: "delta", seen: day(2024, 3, 1) },
            Row { name: "Alpha", seen: day(2023, 12, 31) },
            Row { name: "charlie", seen: None },
            Row { name: "bravo", seen: day(2024, 1, 15) },
        ]
    }

    fn names(rows: &[Row]) -> Vec<&'static str> {
        rows.iter().map(|r| r.name).collect()
    }

    #[test]
    fn test_date_sort_both_directions() {
        let mut view = ListView::new(rows());

        view.sort_by(RowColumn::Seen);
        assert_eq!(names(&view.filtered()), vec!["Alpha", "bravo", "delta", "charlie"]);

        view.sort_by(RowColumn::Seen);
        assert_eq!(view.sort().direction, SortDirection::Descending);
        assert_eq!(names(&view.filtered()), vec!["delta", "bravo", "Alpha", "charlie"]);
    }

    #[test]
    fn test_new_column_starts_ascending() {
        let mut view = ListView::new(rows());
        view.sort_by(RowColumn::Seen);
        view.sort_by(RowColumn::Seen);
        view.sort_by(RowColumn::Name);
        assert_eq!(view.sort().direction, SortDirection::Ascending);
        assert_eq!(names(&view.filtered()), vec!["Alpha", "bravo", "charlie", "delta"]);
        assert_eq!(view.sort().indicator(RowColumn::Name), Some("▲"));
        assert_eq!(view.sort().indicator(RowColumn::Seen), None);
    }

    #[test]
    fn test_filter_is_case_insensitive() {
        let mut view = ListView::new(rows());
        view.set_query("ALP");
        assert_eq!(names(&view.filtered()), vec!["Alpha"]);

        view.set_query("  ");
        assert_eq!(view.filtered_count(), 4);
    }

    #[test]
    fn test_pagination() {
        let mut view = ListView::new(rows()).with_page_size(3);
        view.sort_by(RowColumn::Name);
        assert_eq!(view.page_count(), 2);
        assert_eq!(names(&view.visible()), vec!["Alpha", "bravo", "charlie"]);

        view.next_page();
        assert_eq!(names(&view.visible()), vec!["delta"]);

        view.next_page();
        assert_eq!(view.page(), 2);

        view.set_query("bravo");
        assert_eq!(view.page(), 1);
        assert_eq!(view.page_count(), 1);
    }

    #[test]
    fn test_empty_list_has_one_page() {
        let mut view: ListView<Row> = ListView::new(Vec::new());
        assert_eq!(view.page_count(), 1);
        view.prev_page();
        assert_eq!(view.page(), 1);
        assert!(view.visible().is_empty());
    }

    #[test]
    fn test_remove_clamps_page() {
        let mut view = ListView::new(rows()).with_page_size(2);
        view.set_page(2);
        view.remove_where(|r| r.name != "delta");
        assert_eq!(view.page(), 1);
    }
}
