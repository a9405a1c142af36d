//! Application state container.
//!
//! Created once in `App` and injected with `provide_context`. Plain Rust, so the
//! status edit flow is testable without a browser.

use super::config::DashboardConfig;
use super::overlay::{OverlayKind, StatusOverlay};
use super::seed::SeedData;
use super::status_channel::{StatusChange, StatusChannel};
use super::storage::KeyValueStore;
use crate::domain::a001_order::model::{find_order, merge_orders, OrderRow};
use crate::domain::a002_form_submission::model::{
    find_submission, merge_submissions, SubmissionRow,
};
use contracts::domain::a001_order::OrderStatus;
use contracts::domain::a002_form_submission::SubmissionStatus;
use contracts::domain::common::EntityKind;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct AppState {
    config: Arc<DashboardConfig>,
    seed: Arc<SeedData>,
    store: KeyValueStore,
    overlay: StatusOverlay,
    channel: StatusChannel,
}

impl AppState {
    pub fn new(config: DashboardConfig, seed: Arc<SeedData>, store: KeyValueStore) -> Self {
        let overlay = StatusOverlay::new(store.clone(), &config.storage.namespace);
        Self {
            config: Arc::new(config),
            seed,
            store,
            overlay,
            channel: StatusChannel::new(),
        }
    }

    /// Embedded config + embedded seed + `localStorage`
    pub fn browser() -> Self {
        let state = Self::new(
            DashboardConfig::load_or_default(),
            SeedData::embedded(),
            KeyValueStore::browser(),
        );
        log::info!(
            "App state ready: {} orders, {} submissions, namespace \"{}\"",
            state.seed.orders.len(),
            state.seed.submissions.len(),
            state.config.storage.namespace
        );
        state
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn seed(&self) -> &SeedData {
        &self.seed
    }

    pub fn store(&self) -> &KeyValueStore {
        &self.store
    }

    pub fn overlay(&self) -> &StatusOverlay {
        &self.overlay
    }

    pub fn channel(&self) -> &StatusChannel {
        &self.channel
    }

    /// `{namespace}:{suffix}`
    pub fn storage_key(&self, suffix: &str) -> String {
        format!("{}:{}", self.config.storage.namespace, suffix)
    }

    pub fn order_rows(&self) -> Vec<OrderRow> {
        merge_orders(&self.seed.orders, &self.overlay)
    }

    pub fn submission_rows(&self) -> Vec<SubmissionRow> {
        merge_submissions(&self.seed.submissions, &self.overlay)
    }

    pub fn order(&self, id: &str) -> Option<OrderRow> {
        find_order(&self.seed.orders, &self.overlay, id)
    }

    pub fn submission(&self, id: &str) -> Option<SubmissionRow> {
        find_submission(&self.seed.submissions, &self.overlay, id)
    }

    pub fn change_order_status(&self, id: &str, status: OrderStatus) -> Result<(), String> {
        if self.seed.find_order(id).is_none() {
            return Err(format!("Order #{} not found", id));
        }
        self.overlay
            .set_status(OverlayKind::Orders, id, status.as_str());
        log::info!("Order #{} status -> {}", id, status);
        self.channel.publish(StatusChange::Updated {
            kind: EntityKind::Order,
            id: id.to_string(),
            status: status.as_str().to_string(),
        });
        Ok(())
    }

    pub fn change_submission_status(
        &self,
        id: &str,
        status: SubmissionStatus,
    ) -> Result<(), String> {
        if self.seed.find_submission(id).is_none() {
            return Err(format!("Submission #{} not found", id));
        }
        self.overlay
            .set_status(OverlayKind::Submissions, id, status.as_str());
        log::info!("Submission #{} status -> {}", id, status);
        self.channel.publish(StatusChange::Updated {
            kind: EntityKind::Submission,
            id: id.to_string(),
            status: status.as_str().to_string(),
        });
        Ok(())
    }

    /// Сбрасывает все пользовательские статусы и флаги прочтения
    pub fn clear_all_overrides(&self) -> usize {
        let removed = self.overlay.clear_all();
        self.channel.publish(StatusChange::Cleared);
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::fixtures::{order, submission};
    use std::sync::Mutex;

    fn state() -> AppState {
        let seed = SeedData {
            orders: vec![
                order("43", "2024-01-03", OrderStatus::Completed, 30.0),
                order("42", "2024-01-02", OrderStatus::Pending, 20.0),
            ],
            submissions: vec![submission("42", "2024-01-02", SubmissionStatus::New, &[])],
        };
        AppState::new(DashboardConfig::default(), Arc::new(seed), KeyValueStore::memory())
    }

    #[test]
    fn test_status_change_survives_reload() {
        let state = state();
        state.change_order_status("42", OrderStatus::Processing).unwrap();

        // "reload": a fresh container over the same storage
        let reloaded = AppState::new(
            DashboardConfig::default(),
            Arc::new(state.seed().clone()),
            state.store().clone(),
        );
        let row = reloaded.order("42").unwrap();
        assert_eq!(row.status, OrderStatus::Processing);
        assert_eq!(row.order.status, OrderStatus::Pending);
    }

    #[test]
    fn test_change_publishes_event() {
        let state = state();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        state.channel().subscribe(move |change| {
            sink.lock().unwrap().push(change.clone());
        });

        state
            .change_submission_status("42", SubmissionStatus::Qualified)
            .unwrap();
        state.clear_all_overrides();

        let seen = seen.lock().unwrap();
        assert_eq!(
            seen[0],
            StatusChange::Updated {
                kind: EntityKind::Submission,
                id: "42".into(),
                status: "qualified".into(),
            }
        );
        assert_eq!(seen[1], StatusChange::Cleared);
    }

    #[test]
    fn test_unknown_id_is_rejected() {
        let state = state();
        assert!(state.change_order_status("999", OrderStatus::Completed).is_err());
        assert!(state.overlay().statuses(OverlayKind::Orders).is_empty());
    }

    #[test]
    fn test_clear_all_overrides_restores_seed() {
        let state = state();
        state.change_order_status("42", OrderStatus::Cancelled).unwrap();
        state.store().set(&state.storage_key("auth_user"), "kept");
        assert_eq!(state.clear_all_overrides(), 1);
        assert_eq!(state.order("42").unwrap().status, OrderStatus::Pending);
        assert!(state.store().contains("laguna:auth_user"));
    }
}
