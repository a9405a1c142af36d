//! Overview numbers: headline KPIs, recent activity and the sidebar summary.
//!
//! Everything here works on effective-status rows, so a status edit
//! anywhere in the app is reflected on the next derivation.

use crate::domain::a001_order::model::OrderRow;
use crate::domain::a002_form_submission::model::SubmissionRow;
use contracts::domain::a001_order::OrderStatus;
use contracts::shared::indicators::DashboardStats;
use std::cmp::Ordering;
use std::collections::HashSet;

pub fn dashboard_stats(orders: &[OrderRow], submissions: &[SubmissionRow]) -> DashboardStats {
    let customers: HashSet<String> = orders
        .iter()
        .map(|row| row.order.customer.email.trim().to_lowercase())
        .collect();

    DashboardStats {
        total_orders: orders.len(),
        total_submissions: submissions.len(),
        total_revenue: orders.iter().map(|row| row.order.total).sum(),
        total_customers: customers.len(),
    }
}

/// Newest first; unparseable timestamps go last, stable otherwise.
fn newest_first<T>(a: &T, b: &T, ts: impl Fn(&T) -> Option<chrono::NaiveDateTime>) -> Ordering {
    match (ts(a), ts(b)) {
        (Some(x), Some(y)) => y.cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

pub fn recent_orders(orders: &[OrderRow], n: usize) -> Vec<OrderRow> {
    let mut rows = orders.to_vec();
    rows.sort_by(|a, b| newest_first(a, b, OrderRow::timestamp));
    rows.truncate(n);
    rows
}

pub fn recent_submissions(submissions: &[SubmissionRow], n: usize) -> Vec<SubmissionRow> {
    let mut rows = submissions.to_vec();
    rows.sort_by(|a, b| newest_first(a, b, SubmissionRow::timestamp));
    rows.truncate(n);
    rows
}

/// Сводка в боковой панели
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SidebarSummary {
    pub completed_revenue: f64,
    pub pending_orders: usize,
    pub submissions: usize,
}

pub fn sidebar_summary(orders: &[OrderRow], submissions: &[SubmissionRow]) -> SidebarSummary {
    SidebarSummary {
        completed_revenue: orders
            .iter()
            .filter(|row| row.status == OrderStatus::Completed)
            .map(|row| row.order.total)
            .sum(),
        pending_orders: orders
            .iter()
            .filter(|row| row.status == OrderStatus::Pending)
            .count(),
        submissions: submissions.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_order::model::merge_orders;
    use crate::domain::a002_form_submission::model::merge_submissions;
    use crate::shared::fixtures::{order, submission, with_customer};
    use crate::shared::overlay::{OverlayKind, StatusOverlay};
    use crate::shared::storage::KeyValueStore;
    use contracts::domain::a002_form_submission::SubmissionStatus;

    fn overlay() -> StatusOverlay {
        StatusOverlay::new(KeyValueStore::memory(), "laguna")
    }

    #[test]
    fn test_stats_count_unique_customers_case_insensitive() {
        let orders = vec![
            with_customer(order("1", "2024-01-01", OrderStatus::Completed, 10.0), "Jane", "Jane@X.com"),
            with_customer(order("2", "2024-01-02", OrderStatus::Pending, 15.5), "Jane", "jane@x.com"),
            with_customer(order("3", "2024-01-03", OrderStatus::Cancelled, 4.5), "Bob", "bob@x.com"),
        ];
        let subs = vec![submission("9", "2024-01-01", SubmissionStatus::New, &[])];
        let stats = dashboard_stats(&merge_orders(&orders, &overlay()), &merge_submissions(&subs, &overlay()));
        assert_eq!(stats.total_orders, 3);
        assert_eq!(stats.total_submissions, 1);
        assert_eq!(stats.total_customers, 2);
        assert!((stats.total_revenue - 30.0).abs() < 1e-9);
    }

    #[test]
    fn test_recent_orders_sorted_desc_bad_dates_last() {
        let orders = vec![
            order("1", "2024-01-05", OrderStatus::Pending, 1.0),
            order("2", "garbage", OrderStatus::Pending, 1.0),
            order("3", "2024-03-01T08:00:00Z", OrderStatus::Pending, 1.0),
            order("4", "2024-02-01", OrderStatus::Pending, 1.0),
        ];
        let recent = recent_orders(&merge_orders(&orders, &overlay()), 3);
        let ids: Vec<&str> = recent.iter().map(|r| r.id()).collect();
        assert_eq!(ids, vec!["3", "4", "1"]);
    }

    #[test]
    fn test_recent_submissions_truncates() {
        let subs: Vec<_> = (1..=7)
            .map(|i| submission(&i.to_string(), &format!("2024-05-0{}", i), SubmissionStatus::New, &[]))
            .collect();
        let recent = recent_submissions(&merge_submissions(&subs, &overlay()), 5);
        assert_eq!(recent.len(), 5);
        assert_eq!(recent[0].id(), "7");
    }

    #[test]
    fn test_sidebar_summary_follows_overlay() {
        let overlay = overlay();
        let orders = vec![
            order("1", "2024-01-01", OrderStatus::Completed, 100.0),
            order("2", "2024-01-02", OrderStatus::Pending, 50.0),
            order("3", "2024-01-03", OrderStatus::Pending, 25.0),
        ];
        overlay.set_status(OverlayKind::Orders, "2", "completed");
        let summary = sidebar_summary(&merge_orders(&orders, &overlay), &[]);
        assert!((summary.completed_revenue - 150.0).abs() < 1e-9);
        assert_eq!(summary.pending_orders, 1);
        assert_eq!(summary.submissions, 0);
    }
}
