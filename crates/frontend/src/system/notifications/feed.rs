//! Notification feed: the latest orders and leads projected as bell entries.
//!
//! The feed is recomputed on every read; only the read marks are persisted,
//! as one overlay flag set per notification kind.

use crate::shared::app_state::AppState;
use crate::shared::overlay::{OverlayKind, StatusOverlay};
use crate::shared::seed::SeedData;
use crate::shared::status_channel::StatusChange;
use chrono::NaiveDateTime;
use contracts::domain::a001_order::Order;
use contracts::domain::a002_form_submission::FormSubmission;
use contracts::domain::common::parse_timestamp;
use contracts::shared::notifications::{Notification, NotificationKind};
use std::borrow::Cow;
use std::cmp::Ordering;
use std::collections::BTreeSet;

pub fn overlay_kind(kind: NotificationKind) -> OverlayKind {
    match kind {
        NotificationKind::Order => OverlayKind::OrderNotifications,
        NotificationKind::Submission => OverlayKind::SubmissionNotifications,
    }
}

fn order_notification(order: &Order, read: &BTreeSet<String>) -> Notification {
    Notification {
        id: order.id.clone(),
        kind: NotificationKind::Order,
        title: format!("New Order: #{}", order.id),
        description: format!("From {} for ${:.2}", order.customer.name, order.total),
        date: order.date.clone(),
        is_read: read.contains(&order.id),
    }
}

fn submission_notification(submission: &FormSubmission, read: &BTreeSet<String>) -> Notification {
    let name = submission.name().unwrap_or(Cow::Borrowed("N/A"));
    Notification {
        id: submission.id.clone(),
        kind: NotificationKind::Submission,
        title: format!("New Lead: {}", name),
        description: format!("From form: {}", submission.form_name),
        date: submission.submitted_at.clone(),
        is_read: read.contains(&submission.id),
    }
}

/// Сравнение "новые сверху", нераспознанные даты в конце
fn newest_first(a: Option<NaiveDateTime>, b: Option<NaiveDateTime>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => y.cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// True when some record outside the first `per_kind` is newer than the
/// oldest record inside it, i.e. the prefix is not a real top-N.
fn prefix_misses_newer<T>(records: &[T], per_kind: usize, ts: impl Fn(&T) -> &str) -> bool {
    if records.len() <= per_kind {
        return false;
    }
    let oldest_in_prefix = records[..per_kind]
        .iter()
        .filter_map(|r| parse_timestamp(ts(r)))
        .min();
    match oldest_in_prefix {
        Some(oldest) => records[per_kind..]
            .iter()
            .filter_map(|r| parse_timestamp(ts(r)))
            .any(|t| t > oldest),
        None => false,
    }
}

/// Takes the first `per_kind` records of each kind in seed order, projects
/// them and sorts the union newest first (stable).
pub fn build_feed(seed: &SeedData, overlay: &StatusOverlay, per_kind: usize) -> Vec<Notification> {
    if prefix_misses_newer(&seed.orders, per_kind, |o| o.date.as_str()) {
        log::debug!("Order seed is not recency ordered; notification feed uses the positional prefix");
    }
    if prefix_misses_newer(&seed.submissions, per_kind, |s| s.submitted_at.as_str()) {
        log::debug!("Submission seed is not recency ordered; notification feed uses the positional prefix");
    }

    let orders_read = overlay.flags(overlay_kind(NotificationKind::Order));
    let submissions_read = overlay.flags(overlay_kind(NotificationKind::Submission));

    let mut feed: Vec<Notification> = seed
        .orders
        .iter()
        .take(per_kind)
        .map(|o| order_notification(o, &orders_read))
        .chain(
            seed.submissions
                .iter()
                .take(per_kind)
                .map(|s| submission_notification(s, &submissions_read)),
        )
        .collect();

    feed.sort_by(|a, b| newest_first(parse_timestamp(&a.date), parse_timestamp(&b.date)));
    feed
}

pub fn unread_count(feed: &[Notification]) -> usize {
    feed.iter().filter(|n| !n.is_read).count()
}

/// Feed for the current app state with the configured size
pub fn current_feed(app: &AppState) -> Vec<Notification> {
    build_feed(app.seed(), app.overlay(), app.config().notifications.per_kind)
}

pub fn mark_as_read(app: &AppState, kind: NotificationKind, id: &str) {
    app.overlay().add_flags(overlay_kind(kind), [id]);
    app.channel().publish(StatusChange::NotificationsRead);
}

/// Marks every entry of `feed` as read: one storage write per kind, one event.
pub fn mark_all_as_read(app: &AppState, feed: &[Notification]) {
    for kind in [NotificationKind::Order, NotificationKind::Submission] {
        let ids: Vec<&str> = feed
            .iter()
            .filter(|n| n.kind == kind)
            .map(|n| n.id.as_str())
            .collect();
        if !ids.is_empty() {
            app.overlay().add_flags(overlay_kind(kind), ids);
        }
    }
    log::info!("Marked {} notifications as read", feed.len());
    app.channel().publish(StatusChange::NotificationsRead);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::config::DashboardConfig;
    use crate::shared::fixtures::{order, submission};
    use crate::shared::storage::KeyValueStore;
    use contracts::domain::a001_order::OrderStatus;
    use contracts::domain::a002_form_submission::SubmissionStatus;
    use std::sync::atomic::{AtomicUsize, Ordering as AtomicOrdering};
    use std::sync::Arc;

    fn seed() -> SeedData {
        SeedData {
            orders: (1..=6)
                .rev()
                .map(|i| order(&format!("10{}", i), &format!("2024-03-0{}", i), OrderStatus::Pending, 10.0 * i as f64))
                .collect(),
            submissions: (1..=6)
                .rev()
                .map(|i| {
                    submission(
                        &format!("20{}", i),
                        &format!("2024-03-0{}T12:00:00Z", i),
                        SubmissionStatus::New,
                        &[("name", "Lead")],
                    )
                })
                .collect(),
        }
    }

    fn state(seed: SeedData) -> AppState {
        AppState::new(DashboardConfig::default(), Arc::new(seed), KeyValueStore::memory())
    }

    #[test]
    fn test_feed_takes_prefix_and_sorts_desc() {
        let app = state(seed());
        let feed = build_feed(app.seed(), app.overlay(), 3);
        assert_eq!(feed.len(), 6);
        // same day: the submission at noon is newer than the order at midnight
        let ids: Vec<&str> = feed.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["206", "106", "205", "105", "204", "104"]);
    }

    #[test]
    fn test_projection_titles() {
        let mut seed = seed();
        seed.submissions[0].fields.remove("name");
        let app = state(seed);
        let feed = build_feed(app.seed(), app.overlay(), 1);

        let order = feed.iter().find(|n| n.kind == NotificationKind::Order).unwrap();
        assert_eq!(order.title, "New Order: #106");
        assert_eq!(order.description, "From Customer 106 for $60.00");

        let lead = feed.iter().find(|n| n.kind == NotificationKind::Submission).unwrap();
        assert_eq!(lead.title, "New Lead: N/A");
        assert_eq!(lead.description, "From form: Contact Us");
    }

    #[test]
    fn test_unparseable_dates_sort_last() {
        let mut seed = seed();
        seed.orders[0].date = "not a date".into();
        let app = state(seed);
        let feed = build_feed(app.seed(), app.overlay(), 2);
        assert_eq!(feed.last().map(|n| n.id.as_str()), Some("106"));
    }

    #[test]
    fn test_positional_prefix_is_kept() {
        let mut seed = seed();
        // самый новый заказ в конце коллекции не попадает в ленту
        seed.orders.push(order("999", "2025-01-01", OrderStatus::Pending, 1.0));
        let app = state(seed);
        let feed = build_feed(app.seed(), app.overlay(), 5);
        assert!(feed.iter().all(|n| n.id != "999"));
        assert!(prefix_misses_newer(&app.seed().orders, 5, |o| o.date.as_str()));
        assert!(!prefix_misses_newer(&app.seed().submissions, 5, |s| s.submitted_at.as_str()));
    }

    #[test]
    fn test_mark_as_read_is_per_kind() {
        let mut seed = seed();
        seed.submissions[0].id = "106".into();
        let app = state(seed);
        mark_as_read(&app, NotificationKind::Order, "106");

        let feed = current_feed(&app);
        let order = feed.iter().find(|n| n.kind == NotificationKind::Order && n.id == "106").unwrap();
        let lead = feed.iter().find(|n| n.kind == NotificationKind::Submission && n.id == "106").unwrap();
        assert!(order.is_read);
        assert!(!lead.is_read);
    }

    #[test]
    fn test_mark_all_as_read_clears_unread() {
        let app = state(seed());
        let events = Arc::new(AtomicUsize::new(0));
        let counter = events.clone();
        app.channel().subscribe(move |change| {
            if *change == StatusChange::NotificationsRead {
                counter.fetch_add(1, AtomicOrdering::SeqCst);
            }
        });

        let feed = build_feed(app.seed(), app.overlay(), 4);
        assert_eq!(feed.len(), 8);
        for n in feed.iter().take(5) {
            mark_as_read(&app, n.kind, &n.id);
        }
        let feed = build_feed(app.seed(), app.overlay(), 4);
        assert_eq!(unread_count(&feed), 3);

        mark_all_as_read(&app, &feed);
        let feed = build_feed(app.seed(), app.overlay(), 4);
        assert_eq!(unread_count(&feed), 0);
        assert!(feed.iter().all(|n| n.is_read));
        assert_eq!(events.load(AtomicOrdering::SeqCst), 6);
        // по одному ключу на вид, а не по ключу на уведомление
        assert_eq!(
            app.store().keys_with_prefix("laguna:overlay:"),
            vec![
                "laguna:overlay:notifications.orders".to_string(),
                "laguna:overlay:notifications.submissions".to_string(),
            ]
        );
    }

    #[test]
    fn test_read_flags_cleared_with_overrides() {
        let app = state(seed());
        let feed = current_feed(&app);
        mark_all_as_read(&app, &feed);
        app.clear_all_overrides();
        assert_eq!(unread_count(&current_feed(&app)), feed.len());
    }
}
