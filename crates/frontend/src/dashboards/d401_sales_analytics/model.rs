//! Sales analytics over effective-status orders and submissions.
//!
//! All functions are pure; the dashboard re-runs them on every status change.

use crate::domain::a001_order::model::OrderRow;
use crate::domain::a002_form_submission::model::SubmissionRow;
use crate::shared::date_utils::month_label;
use chrono::{Datelike, Months, NaiveDate};
use contracts::domain::a001_order::OrderStatus;
use contracts::domain::a002_form_submission::SubmissionStatus;
use contracts::shared::indicators::{
    CategorySales, MonthlySales, PipelineStage, ProductSales, SalesKpis, StatusSlice,
};
use std::collections::{BTreeMap, HashMap};

const UNCATEGORIZED: &str = "Uncategorized";

fn completed(orders: &[OrderRow]) -> impl Iterator<Item = &OrderRow> {
    orders.iter().filter(|row| row.status == OrderStatus::Completed)
}

fn count_submissions(submissions: &[SubmissionRow], status: SubmissionStatus) -> usize {
    submissions.iter().filter(|row| row.status == status).count()
}

pub fn sales_kpis(orders: &[OrderRow], submissions: &[SubmissionRow]) -> SalesKpis {
    let converted_leads = count_submissions(submissions, SubmissionStatus::Converted);
    let conversion_rate = if submissions.is_empty() {
        0.0
    } else {
        converted_leads as f64 / submissions.len() as f64 * 100.0
    };

    SalesKpis {
        completed_revenue: completed(orders).map(|row| row.order.total).sum(),
        active_deals_value: orders
            .iter()
            .filter(|row| row.status.is_active())
            .map(|row| row.order.total)
            .sum(),
        new_leads: count_submissions(submissions, SubmissionStatus::New),
        converted_leads,
        conversion_rate,
    }
}

/// Оценочная стоимость одного лида/сделки на этапе воронки, USD
pub const LEAD_VALUE: f64 = 150.0;
pub const CONTACTED_VALUE: f64 = 200.0;
pub const QUALIFIED_VALUE: f64 = 500.0;
pub const DEAL_VALUE: f64 = 1000.0;

fn stage(name: &str, count: usize, unit: &str, rate: f64) -> PipelineStage {
    PipelineStage {
        name: name.to_string(),
        count,
        unit: unit.to_string(),
        value: count as f64 * rate,
    }
}

/// Leads → Contacted → Qualified → Converted
pub fn pipeline_stages(submissions: &[SubmissionRow]) -> Vec<PipelineStage> {
    vec![
        stage("Leads", submissions.len(), "Submissions", LEAD_VALUE),
        stage(
            "Contacted",
            count_submissions(submissions, SubmissionStatus::Contacted),
            "Submissions",
            CONTACTED_VALUE,
        ),
        stage(
            "Qualified",
            count_submissions(submissions, SubmissionStatus::Qualified),
            "Submissions",
            QUALIFIED_VALUE,
        ),
        stage(
            "Converted",
            count_submissions(submissions, SubmissionStatus::Converted),
            "Deals",
            DEAL_VALUE,
        ),
    ]
}

fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Month the revenue chart ends on: the newest order date, or `today`
/// when no order has a parseable date.
pub fn reference_month(orders: &[OrderRow], today: NaiveDate) -> NaiveDate {
    orders
        .iter()
        .filter_map(|row| row.timestamp())
        .map(|ts| ts.date())
        .max()
        .map(month_start)
        .unwrap_or_else(|| month_start(today))
}

/// Completed revenue per calendar month, `months` buckets ending at
/// `reference`, oldest first. Empty months are zero.
pub fn monthly_sales(orders: &[OrderRow], reference: NaiveDate, months: usize) -> Vec<MonthlySales> {
    let last = month_start(reference);
    let mut totals: HashMap<(i32, u32), f64> = HashMap::new();
    for row in completed(orders) {
        if let Some(ts) = row.timestamp() {
            *totals.entry((ts.year(), ts.month())).or_insert(0.0) += row.order.total;
        }
    }

    (0..months)
        .rev()
        .filter_map(|back| last.checked_sub_months(Months::new(back as u32)))
        .map(|start| MonthlySales {
            month: start.format("%Y-%m").to_string(),
            label: month_label(start),
            total: totals
                .get(&(start.year(), start.month()))
                .copied()
                .unwrap_or(0.0),
        })
        .collect()
}

fn slices<K: Copy + Ord>(
    counts: BTreeMap<K, usize>,
    key: impl Fn(K) -> &'static str,
    label: impl Fn(K) -> &'static str,
) -> Vec<StatusSlice> {
    let total: usize = counts.values().sum();
    counts
        .into_iter()
        .filter(|(_, count)| *count > 0)
        .map(|(status, count)| StatusSlice {
            key: key(status).to_string(),
            label: label(status).to_string(),
            count,
            percent: if total == 0 {
                0.0
            } else {
                count as f64 / total as f64 * 100.0
            },
        })
        .collect()
}

pub fn order_status_distribution(orders: &[OrderRow]) -> Vec<StatusSlice> {
    let mut counts = BTreeMap::new();
    for row in orders {
        *counts.entry(row.status).or_insert(0usize) += 1;
    }
    slices(counts, |s: OrderStatus| s.as_str(), |s: OrderStatus| s.label())
}

pub fn submission_status_distribution(submissions: &[SubmissionRow]) -> Vec<StatusSlice> {
    let mut counts = BTreeMap::new();
    for row in submissions {
        *counts.entry(row.status).or_insert(0usize) += 1;
    }
    slices(
        counts,
        |s: SubmissionStatus| s.as_str(),
        |s: SubmissionStatus| s.label(),
    )
}

/// quantity × price of completed orders per item category, largest first
pub fn sales_by_category(orders: &[OrderRow]) -> Vec<CategorySales> {
    let mut by_category: BTreeMap<String, CategorySales> = BTreeMap::new();
    for item in completed(orders).flat_map(|row| row.order.items.iter()) {
        let category = if item.category.trim().is_empty() {
            UNCATEGORIZED.to_string()
        } else {
            item.category.clone()
        };
        let entry = by_category
            .entry(category.clone())
            .or_insert_with(|| CategorySales {
                category,
                quantity: 0,
                total: 0.0,
            });
        entry.quantity += item.quantity;
        entry.total += item.line_total();
    }

    let mut result: Vec<CategorySales> = by_category.into_values().collect();
    result.sort_by(|a, b| b.total.total_cmp(&a.total));
    result
}

/// Number of submissions per form name, largest first (ties by name)
pub fn submissions_by_form(submissions: &[SubmissionRow]) -> Vec<(String, usize)> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for row in submissions {
        *counts.entry(row.submission.form_name.as_str()).or_insert(0) += 1;
    }
    let mut result: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(form, count)| (form.to_string(), count))
        .collect();
    result.sort_by(|a, b| b.1.cmp(&a.1));
    result
}

pub fn top_products(orders: &[OrderRow], n: usize) -> Vec<ProductSales> {
    let mut by_product: BTreeMap<String, ProductSales> = BTreeMap::new();
    for item in completed(orders).flat_map(|row| row.order.items.iter()) {
        let entry = by_product
            .entry(item.product_id.clone())
            .or_insert_with(|| ProductSales {
                product_id: item.product_id.clone(),
                name: item.name.clone(),
                category: item.category.clone(),
                quantity: 0,
                total: 0.0,
            });
        entry.quantity += item.quantity;
        entry.total += item.line_total();
    }

    let mut result: Vec<ProductSales> = by_product.into_values().collect();
    result.sort_by(|a, b| b.total.total_cmp(&a.total));
    result.truncate(n);
    result
}

/// Latest `n` leads for the table under the charts
pub fn latest_leads(submissions: &[SubmissionRow], n: usize) -> Vec<SubmissionRow> {
    crate::dashboards::d400_overview::model::recent_submissions(submissions, n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_order::model::merge_orders;
    use crate::domain::a002_form_submission::model::merge_submissions;
    use crate::shared::fixtures::{order, submission, with_form, with_item};
    use crate::shared::overlay::{OverlayKind, StatusOverlay};
    use crate::shared::storage::KeyValueStore;
    use contracts::domain::a001_order::Order;
    use contracts::domain::a002_form_submission::FormSubmission;

    fn overlay() -> StatusOverlay {
        StatusOverlay::new(KeyValueStore::memory(), "laguna")
    }

    fn rows(orders: &[Order]) -> Vec<OrderRow> {
        merge_orders(orders, &overlay())
    }

    fn leads(subs: &[FormSubmission]) -> Vec<SubmissionRow> {
        merge_submissions(subs, &overlay())
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_kpis() {
        let orders = rows(&[
            order("1", "2024-01-01", OrderStatus::Completed, 100.0),
            order("2", "2024-01-02", OrderStatus::Pending, 40.0),
            order("3", "2024-01-03", OrderStatus::Processing, 60.0),
            order("4", "2024-01-04", OrderStatus::Refunded, 999.0),
        ]);
        let subs = leads(&[
            submission("1", "2024-01-01", SubmissionStatus::New, &[]),
            submission("2", "2024-01-01", SubmissionStatus::Converted, &[]),
            submission("3", "2024-01-01", SubmissionStatus::Contacted, &[]),
            submission("4", "2024-01-01", SubmissionStatus::Closed, &[]),
        ]);
        let kpis = sales_kpis(&orders, &subs);
        assert!((kpis.completed_revenue - 100.0).abs() < 1e-9);
        assert!((kpis.active_deals_value - 100.0).abs() < 1e-9);
        assert_eq!(kpis.new_leads, 1);
        assert_eq!(kpis.converted_leads, 1);
        assert!((kpis.conversion_rate - 25.0).abs() < 1e-9);
    }

    #[test]
    fn test_conversion_rate_without_submissions_is_zero() {
        let kpis = sales_kpis(&[], &[]);
        assert_eq!(kpis.conversion_rate, 0.0);
    }

    #[test]
    fn test_kpis_use_effective_status() {
        let overlay = overlay();
        overlay.set_status(OverlayKind::Orders, "2", "completed");
        let orders = merge_orders(
            &[
                order("1", "2024-01-01", OrderStatus::Completed, 100.0),
                order("2", "2024-01-02", OrderStatus::Pending, 40.0),
            ],
            &overlay,
        );
        assert!((sales_kpis(&orders, &[]).completed_revenue - 140.0).abs() < 1e-9);
    }

    #[test]
    fn test_pipeline_stages() {
        let subs = leads(&[
            submission("1", "2024-01-01", SubmissionStatus::Contacted, &[]),
            submission("2", "2024-01-01", SubmissionStatus::Contacted, &[]),
            submission("3", "2024-01-01", SubmissionStatus::Qualified, &[]),
        ]);
        let counts: Vec<(String, usize)> = pipeline_stages(&subs)
            .into_iter()
            .map(|s| (s.name, s.count))
            .collect();
        assert_eq!(
            counts,
            vec![
                ("Leads".to_string(), 3),
                ("Contacted".to_string(), 2),
                ("Qualified".to_string(), 1),
                ("Converted".to_string(), 0),
            ]
        );
    }

    #[test]
    fn test_pipeline_stage_values() {
        let subs = leads(&[
            submission("1", "2024-01-01", SubmissionStatus::Contacted, &[]),
            submission("2", "2024-01-01", SubmissionStatus::Qualified, &[]),
            submission("3", "2024-01-01", SubmissionStatus::Converted, &[]),
            submission("4", "2024-01-01", SubmissionStatus::Converted, &[]),
            submission("5", "2024-01-01", SubmissionStatus::New, &[]),
        ]);
        let stages = pipeline_stages(&subs);
        let values: Vec<f64> = stages.iter().map(|s| s.value).collect();
        // 5×150, 1×200, 1×500, 2×1000
        assert_eq!(values, vec![750.0, 200.0, 500.0, 2000.0]);
        assert_eq!(stages[0].unit, "Submissions");
        assert_eq!(stages[3].unit, "Deals");
        assert!(pipeline_stages(&[]).iter().all(|s| s.value == 0.0));
    }

    #[test]
    fn test_monthly_sales_zero_fill() {
        let orders = rows(&[
            order("1", "2024-01-15", OrderStatus::Completed, 100.0),
            order("2", "2024-01-20T10:00:00Z", OrderStatus::Completed, 50.0),
            order("3", "2024-03-02", OrderStatus::Completed, 10.0),
            order("4", "2024-03-03", OrderStatus::Pending, 500.0),
            order("5", "2023-06-01", OrderStatus::Completed, 7.0),
        ]);
        let chart = monthly_sales(&orders, ymd(2024, 3, 31), 4);
        let points: Vec<(&str, f64)> = chart.iter().map(|m| (m.month.as_str(), m.total)).collect();
        assert_eq!(
            points,
            vec![("2023-12", 0.0), ("2024-01", 150.0), ("2024-02", 0.0), ("2024-03", 10.0)]
        );
        assert_eq!(chart[1].label, "Jan 24");
    }

    #[test]
    fn test_reference_month_is_newest_order() {
        let orders = rows(&[
            order("1", "2024-10-14", OrderStatus::Pending, 1.0),
            order("2", "bad", OrderStatus::Pending, 1.0),
            order("3", "2024-02-01", OrderStatus::Pending, 1.0),
        ]);
        assert_eq!(reference_month(&orders, ymd(2026, 1, 5)), ymd(2024, 10, 1));
        assert_eq!(reference_month(&[], ymd(2026, 1, 5)), ymd(2026, 1, 1));
    }

    #[test]
    fn test_status_distribution_omits_zero_counts() {
        let orders = rows(&[
            order("1", "2024-01-01", OrderStatus::Completed, 1.0),
            order("2", "2024-01-01", OrderStatus::Completed, 1.0),
            order("3", "2024-01-01", OrderStatus::Cancelled, 1.0),
            order("4", "2024-01-01", OrderStatus::Pending, 1.0),
        ]);
        let slices = order_status_distribution(&orders);
        let keys: Vec<&str> = slices.iter().map(|s| s.key.as_str()).collect();
        assert_eq!(keys, vec!["pending", "completed", "cancelled"]);
        assert!((slices[1].percent - 50.0).abs() < 1e-9);

        let subs = leads(&[submission("1", "2024-01-01", SubmissionStatus::InProgress, &[])]);
        let slices = submission_status_distribution(&subs);
        assert_eq!(slices.len(), 1);
        assert_eq!(slices[0].label, "In Progress");
    }

    #[test]
    fn test_sales_by_category_completed_only() {
        let orders = rows(&[
            with_item(
                with_item(order("1", "2024-01-01", OrderStatus::Completed, 0.0), "p1", "Audio", 2, 50.0),
                "p2",
                "",
                1,
                5.0,
            ),
            with_item(order("2", "2024-01-01", OrderStatus::Completed, 0.0), "p3", "Lighting", 1, 300.0),
            with_item(order("3", "2024-01-01", OrderStatus::Pending, 0.0), "p1", "Audio", 10, 50.0),
        ]);
        let result: Vec<(String, f64)> = sales_by_category(&orders)
            .into_iter()
            .map(|c| (c.category, c.total))
            .collect();
        assert_eq!(
            result,
            vec![
                ("Lighting".to_string(), 300.0),
                ("Audio".to_string(), 100.0),
                ("Uncategorized".to_string(), 5.0),
            ]
        );
    }

    #[test]
    fn test_top_products_and_forms() {
        let orders = rows(&[
            with_item(order("1", "2024-01-01", OrderStatus::Completed, 0.0), "p1", "Audio", 2, 50.0),
            with_item(order("2", "2024-01-02", OrderStatus::Completed, 0.0), "p1", "Audio", 1, 50.0),
            with_item(order("3", "2024-01-03", OrderStatus::Completed, 0.0), "p2", "Audio", 1, 120.0),
        ]);
        let top = top_products(&orders, 1);
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].product_id, "p1");
        assert_eq!(top[0].quantity, 3);

        let subs = leads(&[
            with_form(submission("1", "2024-01-01", SubmissionStatus::New, &[]), "Request a Quote"),
            submission("2", "2024-01-01", SubmissionStatus::New, &[]),
            submission("3", "2024-01-01", SubmissionStatus::New, &[]),
        ]);
        assert_eq!(
            submissions_by_form(&subs),
            vec![("Contact Us".to_string(), 2), ("Request a Quote".to_string(), 1)]
        );
    }
}
