//! Derived state of the orders list: merge → filter → sort → paginate → summary.
//!
//! Pure functions, re-derived on every input change.

use crate::domain::a001_order::model::{merge_orders, OrderRow};
use crate::shared::date_utils::format_date;
use crate::shared::export::CsvExportable;
use crate::shared::list_utils::{
    cmp_f64, cmp_ids, cmp_text, paginate, sort_list, DateRange, Searchable, Sortable,
};
use crate::shared::overlay::StatusOverlay;
use contracts::domain::a001_order::{Order, OrderStatus};
use contracts::shared::filters::ListFilter;
use contracts::shared::pagination::PaginationInfo;
use std::borrow::Cow;
use std::cmp::Ordering;
use std::collections::BTreeMap;

pub const DEFAULT_SORT_FIELD: &str = "date";

impl Searchable for OrderRow {
    fn search_fields(&self) -> Vec<Cow<'_, str>> {
        vec![
            Cow::Borrowed(self.order.id.as_str()),
            Cow::Borrowed(self.order.customer.name.as_str()),
            Cow::Borrowed(self.order.customer.email.as_str()),
        ]
    }
}

impl Sortable for OrderRow {
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
        let primary = match field {
            "id" => Ordering::Equal,
            "customer" => cmp_text(&self.order.customer.name, &other.order.customer.name),
            "total" => cmp_f64(self.order.total, other.order.total),
            "status" => self.status.as_str().cmp(other.status.as_str()),
            // "date" и неизвестные поля; непарсящиеся даты считаются самыми старыми
            _ => self.timestamp().cmp(&other.timestamp()),
        };
        primary.then_with(|| cmp_ids(self.id(), other.id()))
    }
}

impl CsvExportable for OrderRow {
    fn headers() -> Vec<&'static str> {
        vec![
            "Order ID",
            "Date",
            "Customer",
            "Email",
            "Status",
            "Items",
            "Total",
            "Currency",
            "Payment Method",
        ]
    }

    fn to_csv_row(&self) -> Vec<String> {
        vec![
            self.order.id.clone(),
            format_date(&self.order.date),
            self.order.customer.name.clone(),
            self.order.customer.email.clone(),
            self.status.label().to_string(),
            self.order.item_count().to_string(),
            format!("{:.2}", self.order.total),
            self.order.currency.clone(),
            self.order.payment_method.clone(),
        ]
    }
}

/// Всё, что выбрал пользователь на странице списка
#[derive(Debug, Clone, PartialEq)]
pub struct OrderListQuery {
    pub filter: ListFilter,
    pub sort_field: String,
    pub sort_ascending: bool,
    /// С 1
    pub page: usize,
    pub page_size: usize,
}

impl Default for OrderListQuery {
    fn default() -> Self {
        Self {
            filter: ListFilter::default(),
            sort_field: DEFAULT_SORT_FIELD.to_string(),
            sort_ascending: false,
            page: 1,
            page_size: 10,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderListPage {
    pub rows: Vec<OrderRow>,
    pub pagination: PaginationInfo,
    /// Counts over the filtered set, zero counts omitted
    pub status_counts: BTreeMap<OrderStatus, usize>,
    pub filtered_total_amount: f64,
    /// Whole filtered and sorted set (export uses it)
    pub filtered: Vec<OrderRow>,
}

fn matches_status(row: &OrderRow, status: Option<&str>) -> bool {
    match status.map(str::trim).filter(|s| !s.is_empty()) {
        None => true,
        Some(raw) => match raw.parse::<OrderStatus>() {
            Ok(status) => row.status == status,
            Err(_) => false,
        },
    }
}

fn matches_category(row: &OrderRow, category: Option<&str>) -> bool {
    match category.map(str::trim).filter(|c| !c.is_empty()) {
        None => true,
        Some(category) => row
            .order
            .items
            .iter()
            .any(|item| item.category.eq_ignore_ascii_case(category)),
    }
}

/// Conjunction of status, search, date range and category predicates.
pub fn filter_orders(rows: &[OrderRow], filter: &ListFilter) -> Vec<OrderRow> {
    let range = DateRange::parse(&filter.date_from, &filter.date_to);
    rows.iter()
        .filter(|row| matches_status(row, filter.status.as_deref()))
        .filter(|row| row.matches_search(&filter.search))
        .filter(|row| range.contains(&row.order.date))
        .filter(|row| matches_category(row, filter.category.as_deref()))
        .cloned()
        .collect()
}

pub fn status_counts(rows: &[OrderRow]) -> BTreeMap<OrderStatus, usize> {
    let mut counts = BTreeMap::new();
    for row in rows {
        *counts.entry(row.status).or_insert(0) += 1;
    }
    counts
}

pub fn derive_order_list(
    orders: &[Order],
    overlay: &StatusOverlay,
    query: &OrderListQuery,
) -> OrderListPage {
    let merged = merge_orders(orders, overlay);
    let mut filtered = filter_orders(&merged, &query.filter);
    sort_list(&mut filtered, &query.sort_field, query.sort_ascending);

    let page = paginate(&filtered, query.page, query.page_size);
    log::debug!(
        "Order list: {} of {} match, page {}/{}",
        filtered.len(),
        merged.len(),
        page.info.current_page,
        page.info.total_pages
    );

    OrderListPage {
        rows: page.rows,
        pagination: page.info,
        status_counts: status_counts(&filtered),
        filtered_total_amount: filtered.iter().map(|row| row.order.total).sum(),
        filtered,
    }
}

/// Distinct item categories of the seed, for the category filter dropdown.
pub fn item_categories(orders: &[Order]) -> Vec<String> {
    let mut categories: Vec<String> = orders
        .iter()
        .flat_map(|o| o.items.iter())
        .map(|item| item.category.clone())
        .filter(|c| !c.is_empty())
        .collect();
    categories.sort();
    categories.dedup();
    categories
}
