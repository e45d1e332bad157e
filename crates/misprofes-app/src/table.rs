// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::pagination::{DEFAULT_PAGE_WINDOW, Pagination};

pub const DEFAULT_ROWS_PER_PAGE: usize = 10;
pub const EMPTY_PLACEHOLDER: &str = "No hay datos disponibles";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    pub const fn marker(self) -> &'static str {
        match self {
            Self::Asc => "▲",
            Self::Desc => "▼",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    Bool(bool),
    Integer(i64),
    Decimal(f64),
    Text(String),
}

impl CellValue {
    pub fn display(&self) -> String {
        match self {
            Self::Empty => String::new(),
            Self::Bool(value) => value.to_string(),
            Self::Integer(value) => value.to_string(),
            Self::Decimal(value) => format!("{value:.1}"),
            Self::Text(value) => value.clone(),
        }
    }

    fn numeric(&self) -> Option<f64> {
        match self {
            Self::Bool(value) => Some(if *value { 1.0 } else { 0.0 }),
            Self::Integer(value) => Some(*value as f64),
            Self::Decimal(value) => Some(*value),
            Self::Empty | Self::Text(_) => None,
        }
    }

    const fn rank(&self) -> u8 {
        match self {
            Self::Bool(_) | Self::Integer(_) | Self::Decimal(_) => 0,
            Self::Text(_) => 1,
            Self::Empty => 2,
        }
    }

    /// Total order: numbers (bools as 0/1) before text, empties last.
    pub fn compare(&self, other: &Self) -> Ordering {
        if let (Some(left), Some(right)) = (self.numeric(), other.numeric()) {
            return left.total_cmp(&right);
        }
        match (self, other) {
            (Self::Text(left), Self::Text(right)) => left.cmp(right),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        Self::Decimal(value)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Empty, Into::into)
    }
}

pub type CellAccessor<R> = fn(&R) -> CellValue;
pub type CellRenderer<R> = fn(&CellValue, &R) -> String;

pub struct Column<R, K> {
    pub key: K,
    pub label: String,
    pub width: Option<u16>,
    accessor: CellAccessor<R>,
    render: Option<CellRenderer<R>>,
}

impl<R, K: Copy> Clone for Column<R, K> {
    fn clone(&self) -> Self {
        Self {
            key: self.key,
            label: self.label.clone(),
            width: self.width,
            accessor: self.accessor,
            render: self.render,
        }
    }
}

impl<R, K> Column<R, K> {
    pub fn new(key: K, label: impl Into<String>, accessor: CellAccessor<R>) -> Self {
        Self {
            key,
            label: label.into(),
            width: None,
            accessor,
            render: None,
        }
    }

    pub fn with_render(mut self, render: CellRenderer<R>) -> Self {
        self.render = Some(render);
        self
    }

    pub fn with_width(mut self, width: u16) -> Self {
        self.width = Some(width);
        self
    }

    pub fn value(&self, row: &R) -> CellValue {
        (self.accessor)(row)
    }

    pub fn render_cell(&self, row: &R) -> String {
        let value = self.value(row);
        match self.render {
            Some(render) => render(&value, row),
            None => value.display(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RowKey {
    Index(usize),
    Id(i64),
    Text(String),
}

pub type RowKeyFn<R> = fn(&R) -> RowKey;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec<K> {
    pub key: K,
    pub direction: SortDirection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Paging {
    Internal(usize),
    Controlled(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableEvent<K> {
    SortChanged(SortSpec<K>),
    PageChanged(usize),
    PageChangeRequested(usize),
    RowClicked(RowKey),
}

#[derive(Debug)]
pub struct VisibleRow<'a, R> {
    pub key: RowKey,
    pub row: &'a R,
}

/// Sorted, paginated view over a set of records.
///
/// Paging is either owned by the table (`new`) or by the caller
/// (`controlled`). In controlled mode navigation only emits
/// `PageChangeRequested` and the caller reports the new page back through
/// `sync_controlled_page`.
pub struct TableView<R, K> {
    columns: Vec<Column<R, K>>,
    rows: Vec<R>,
    rows_per_page: usize,
    page_window: usize,
    sort: Option<SortSpec<K>>,
    paging: Paging,
    row_key: Option<RowKeyFn<R>>,
}

impl<R, K: Copy + PartialEq> TableView<R, K> {
    pub fn new(columns: Vec<Column<R, K>>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
            rows_per_page: DEFAULT_ROWS_PER_PAGE,
            page_window: DEFAULT_PAGE_WINDOW,
            sort: None,
            paging: Paging::Internal(1),
            row_key: None,
        }
    }

    pub fn controlled(columns: Vec<Column<R, K>>, page: usize) -> Self {
        Self {
            paging: Paging::Controlled(page),
            ..Self::new(columns)
        }
    }

    pub fn with_rows_per_page(mut self, rows_per_page: usize) -> Result<Self> {
        if rows_per_page == 0 {
            bail!("rows per page must be positive");
        }
        self.rows_per_page = rows_per_page;
        Ok(self)
    }

    pub fn with_page_window(mut self, page_window: usize) -> Self {
        self.page_window = page_window;
        self
    }

    pub fn with_row_key(mut self, row_key: RowKeyFn<R>) -> Self {
        self.row_key = Some(row_key);
        self
    }

    pub fn with_rows(mut self, rows: Vec<R>) -> Self {
        self.set_rows(rows);
        self
    }

    pub fn columns(&self) -> &[Column<R, K>] {
        &self.columns
    }

    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    pub fn sort(&self) -> Option<SortSpec<K>> {
        self.sort
    }

    pub fn is_controlled(&self) -> bool {
        matches!(self.paging, Paging::Controlled(_))
    }

    pub fn current_page(&self) -> usize {
        match self.paging {
            Paging::Internal(page) | Paging::Controlled(page) => page,
        }
    }

    pub fn set_rows(&mut self, rows: Vec<R>) {
        self.rows = rows;
        if let Paging::Internal(page) = self.paging {
            let last = self.total_pages().max(1);
            self.paging = Paging::Internal(page.clamp(1, last));
        }
    }

    pub fn total_pages(&self) -> usize {
        self.rows.len().div_ceil(self.rows_per_page)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn sort_direction_for(&self, key: K) -> Option<SortDirection> {
        self.sort
            .filter(|sort| sort.key == key)
            .map(|sort| sort.direction)
    }

    /// Asc on first click (or a different column), flips asc/desc afterwards.
    pub fn click_header(&mut self, key: K) -> Vec<TableEvent<K>> {
        let direction = match self.sort {
            Some(sort) if sort.key == key && sort.direction == SortDirection::Asc => {
                SortDirection::Desc
            }
            _ => SortDirection::Asc,
        };
        let spec = SortSpec { key, direction };
        self.sort = Some(spec);
        vec![TableEvent::SortChanged(spec)]
    }

    fn sorted_indices(&self) -> Vec<usize> {
        let mut indices: Vec<usize> = (0..self.rows.len()).collect();
        let Some(sort) = self.sort else {
            return indices;
        };
        let Some(column) = self.columns.iter().find(|column| column.key == sort.key) else {
            return indices;
        };

        let values: Vec<CellValue> = self.rows.iter().map(|row| column.value(row)).collect();
        indices.sort_by(|left, right| {
            let ordering = values[*left].compare(&values[*right]);
            match sort.direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        });
        indices
    }

    pub fn sorted_rows(&self) -> Vec<&R> {
        self.sorted_indices()
            .into_iter()
            .map(|index| &self.rows[index])
            .collect()
    }

    fn row_key_for(&self, index: usize) -> RowKey {
        match self.row_key {
            Some(row_key) => row_key(&self.rows[index]),
            None => RowKey::Index(index),
        }
    }

    pub fn visible_rows(&self) -> Vec<VisibleRow<'_, R>> {
        let start = self
            .current_page()
            .saturating_sub(1)
            .saturating_mul(self.rows_per_page);
        self.sorted_indices()
            .into_iter()
            .skip(start)
            .take(self.rows_per_page)
            .map(|index| VisibleRow {
                key: self.row_key_for(index),
                row: &self.rows[index],
            })
            .collect()
    }

    /// `None` when there is at most one page and no control should be shown.
    pub fn pagination(&self) -> Option<Pagination> {
        let total = self.total_pages();
        (total > 1)
            .then(|| Pagination::new(total, self.current_page()).with_delta(self.page_window))
    }

    pub fn request_page(&mut self, page: usize) -> Vec<TableEvent<K>> {
        let total = self.total_pages();
        if page < 1 || page > total || page == self.current_page() {
            return Vec::new();
        }

        match self.paging {
            Paging::Internal(_) => {
                self.paging = Paging::Internal(page);
                vec![TableEvent::PageChanged(page)]
            }
            Paging::Controlled(_) => vec![TableEvent::PageChangeRequested(page)],
        }
    }

    pub fn next_page(&mut self) -> Vec<TableEvent<K>> {
        self.request_page(self.current_page().saturating_add(1))
    }

    pub fn prev_page(&mut self) -> Vec<TableEvent<K>> {
        self.request_page(self.current_page().saturating_sub(1))
    }

    /// Applies the owner's page in controlled mode; ignored otherwise.
    pub fn sync_controlled_page(&mut self, page: usize) {
        if let Paging::Controlled(_) = self.paging {
            self.paging = Paging::Controlled(page);
        }
    }

    pub fn click_row(&self, visible_index: usize) -> Vec<TableEvent<K>> {
        self.visible_rows()
            .into_iter()
            .nth(visible_index)
            .map(|visible| vec![TableEvent::RowClicked(visible.key)])
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::{
        CellValue, Column, EMPTY_PLACEHOLDER, RowKey, SortDirection, SortSpec, TableEvent,
        TableView,
    };
    use anyhow::Result;
    use std::cmp::Ordering;

    #[derive(Debug, Clone, PartialEq)]
    struct Item {
        id: i64,
        tag: Option<&'static str>,
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Field {
        Id,
        Tag,
        Missing,
    }

    fn item(id: i64) -> Item {
        Item { id, tag: None }
    }

    fn columns() -> Vec<Column<Item, Field>> {
        vec![
            Column::new(Field::Id, "id", |row: &Item| CellValue::Integer(row.id)),
            Column::new(Field::Tag, "tag", |row: &Item| CellValue::from(row.tag)),
        ]
    }

    fn ids(table: &TableView<Item, Field>) -> Vec<i64> {
        table.sorted_rows().iter().map(|row| row.id).collect()
    }

    #[test]
    fn header_clicks_go_asc_then_desc() {
        let mut table = TableView::new(columns()).with_rows(vec![item(3), item(1), item(2)]);
        assert_eq!(ids(&table), vec![3, 1, 2]);

        let events = table.click_header(Field::Id);
        assert_eq!(
            events,
            vec![TableEvent::SortChanged(SortSpec {
                key: Field::Id,
                direction: SortDirection::Asc,
            })]
        );
        assert_eq!(ids(&table), vec![1, 2, 3]);

        table.click_header(Field::Id);
        assert_eq!(ids(&table), vec![3, 2, 1]);

        table.click_header(Field::Id);
        assert_eq!(table.sort_direction_for(Field::Id), Some(SortDirection::Asc));
    }

    #[test]
    fn switching_columns_restarts_ascending() {
        let mut table = TableView::new(columns()).with_rows(vec![item(1)]);
        table.click_header(Field::Id);
        table.click_header(Field::Id);
        table.click_header(Field::Tag);
        assert_eq!(table.sort_direction_for(Field::Tag), Some(SortDirection::Asc));
        assert_eq!(table.sort_direction_for(Field::Id), None);
    }

    #[test]
    fn equal_keys_keep_insertion_order_in_both_directions() {
        let rows = vec![
            Item { id: 1, tag: Some("b") },
            Item { id: 2, tag: Some("a") },
            Item { id: 3, tag: Some("b") },
            Item { id: 4, tag: Some("a") },
        ];
        let mut table = TableView::new(columns()).with_rows(rows);

        table.click_header(Field::Tag);
        assert_eq!(ids(&table), vec![2, 4, 1, 3]);

        table.click_header(Field::Tag);
        assert_eq!(ids(&table), vec![1, 3, 2, 4]);
    }

    #[test]
    fn sorting_by_unknown_column_keeps_insertion_order() {
        let mut table = TableView::new(columns()).with_rows(vec![item(3), item(1)]);
        table.click_header(Field::Missing);
        assert_eq!(ids(&table), vec![3, 1]);
    }

    #[test]
    fn missing_values_render_blank_and_sort_last() {
        let rows = vec![
            Item { id: 1, tag: None },
            Item { id: 2, tag: Some("z") },
        ];
        let mut table = TableView::new(columns()).with_rows(rows);
        assert_eq!(table.columns()[1].render_cell(&table.rows()[0]), "");

        table.click_header(Field::Tag);
        assert_eq!(ids(&table), vec![2, 1]);
    }

    #[test]
    fn cell_values_compare_naturally() {
        assert_eq!(
            CellValue::Bool(true).compare(&CellValue::Integer(0)),
            Ordering::Greater
        );
        assert_eq!(
            CellValue::Decimal(1.5).compare(&CellValue::Integer(2)),
            Ordering::Less
        );
        assert_eq!(
            CellValue::from("abc").compare(&CellValue::from("abd")),
            Ordering::Less
        );
        assert_eq!(
            CellValue::Integer(99).compare(&CellValue::from("1")),
            Ordering::Less
        );
    }

    #[test]
    fn custom_renderer_wins_over_display() {
        let column = Column::new(Field::Id, "id", |row: &Item| CellValue::Integer(row.id))
            .with_render(|value, _row| format!("#{}", value.display()))
            .with_width(4);
        assert_eq!(column.render_cell(&item(7)), "#7");
        assert_eq!(column.width, Some(4));
    }

    #[test]
    fn twenty_five_rows_make_three_pages() -> Result<()> {
        let rows = (1..=25).map(item).collect();
        let mut table = TableView::new(columns())
            .with_rows_per_page(10)?
            .with_rows(rows);
        assert_eq!(table.total_pages(), 3);

        assert!(table.request_page(4).is_empty());
        assert_eq!(table.current_page(), 1);

        assert_eq!(table.request_page(2), vec![TableEvent::PageChanged(2)]);
        assert_eq!(table.current_page(), 2);
        let visible: Vec<i64> = table.visible_rows().iter().map(|row| row.row.id).collect();
        assert_eq!(visible, (11..=20).collect::<Vec<_>>());

        table.request_page(3);
        assert_eq!(table.visible_rows().len(), 5);
        assert!(table.next_page().is_empty());
        assert_eq!(table.prev_page(), vec![TableEvent::PageChanged(2)]);
        Ok(())
    }

    #[test]
    fn requesting_current_or_zero_page_is_a_no_op() {
        let mut table = TableView::new(columns()).with_rows((1..=15).map(item).collect());
        assert!(table.request_page(1).is_empty());
        assert!(table.request_page(0).is_empty());
        assert!(table.prev_page().is_empty());
    }

    #[test]
    fn zero_rows_per_page_is_rejected() {
        let error = match TableView::new(columns()).with_rows_per_page(0) {
            Ok(_) => panic!("zero rows per page should fail"),
            Err(error) => error,
        };
        assert!(error.to_string().contains("must be positive"));
    }

    #[test]
    fn controlled_paging_only_requests_changes() {
        let mut table = TableView::controlled(columns(), 1).with_rows((1..=30).map(item).collect());
        assert!(table.is_controlled());

        assert_eq!(table.next_page(), vec![TableEvent::PageChangeRequested(2)]);
        assert_eq!(table.current_page(), 1);

        table.sync_controlled_page(3);
        assert_eq!(table.current_page(), 3);
        assert_eq!(table.visible_rows()[0].row.id, 21);
        assert!(table.request_page(3).is_empty());
    }

    #[test]
    fn uncontrolled_table_ignores_external_page_sync() {
        let mut table = TableView::new(columns()).with_rows((1..=30).map(item).collect());
        table.sync_controlled_page(3);
        assert_eq!(table.current_page(), 1);
    }

    #[test]
    fn shrinking_rows_clamps_internal_page() {
        let mut table = TableView::new(columns()).with_rows((1..=30).map(item).collect());
        table.request_page(3);
        table.set_rows((1..=12).map(item).collect());
        assert_eq!(table.current_page(), 2);

        table.set_rows(Vec::new());
        assert_eq!(table.current_page(), 1);
        assert!(table.is_empty());
        assert!(table.visible_rows().is_empty());
        assert_eq!(EMPTY_PLACEHOLDER, "No hay datos disponibles");
    }

    #[test]
    fn pagination_control_only_exists_with_multiple_pages() {
        let single = TableView::new(columns()).with_rows((1..=10).map(item).collect());
        assert!(single.pagination().is_none());

        let multi = TableView::new(columns())
            .with_page_window(2)
            .with_rows((1..=11).map(item).collect());
        let pagination = multi.pagination().expect("two pages should paginate");
        assert_eq!(pagination.total_pages(), 2);
        assert_eq!(pagination.delta(), 2);
    }

    #[test]
    fn row_keys_default_to_index_and_honor_extractor() {
        let table = TableView::new(columns()).with_rows(vec![item(5), item(6)]);
        assert_eq!(table.click_row(1), vec![TableEvent::RowClicked(RowKey::Index(1))]);
        assert!(table.click_row(9).is_empty());

        let mut keyed = TableView::new(columns())
            .with_row_key(|row: &Item| RowKey::Id(row.id))
            .with_rows(vec![item(5), item(6)]);
        keyed.click_header(Field::Id);
        keyed.click_header(Field::Id);
        assert_eq!(keyed.click_row(0), vec![TableEvent::RowClicked(RowKey::Id(6))]);
    }
}
