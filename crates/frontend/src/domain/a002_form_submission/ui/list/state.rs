use super::view_model::{SubmissionListQuery, DEFAULT_SORT_FIELD};
use crate::shared::app_state::AppState;
use contracts::shared::filters::ListFilter;
use leptos::prelude::*;
use serde::{Deserialize, Serialize};

const STORAGE_KEY: &str = "a002_form_submission_list_state_v1";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SubmissionListState {
    // filters
    pub filter: ListFilter,

    // sorting
    pub sort_field: String,
    pub sort_ascending: bool,

    // pagination (1-based)
    pub page: usize,
}

impl Default for SubmissionListState {
    fn default() -> Self {
        Self {
            filter: ListFilter::default(),
            sort_field: DEFAULT_SORT_FIELD.to_string(),
            // свежие заявки сверху
            sort_ascending: false,
            page: 1,
        }
    }
}

impl SubmissionListState {
    pub fn to_query(&self, page_size: usize) -> SubmissionListQuery {
        SubmissionListQuery {
            filter: self.filter.clone(),
            sort_field: self.sort_field.clone(),
            sort_ascending: self.sort_ascending,
            page: self.page,
            page_size,
        }
    }
}

pub fn load_state(app: &AppState) -> SubmissionListState {
    app.store()
        .get::<SubmissionListState>(&app.storage_key(STORAGE_KEY))
        .unwrap_or_default()
}

pub fn save_state(app: &AppState, state: &SubmissionListState) {
    app.store().set(&app.storage_key(STORAGE_KEY), state);
}

pub fn persist_state(app: &AppState, signal: RwSignal<SubmissionListState>) {
    save_state(app, &signal.get_untracked());
}

pub fn create_state(app: &AppState) -> RwSignal<SubmissionListState> {
    RwSignal::new(load_state(app))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::config::DashboardConfig;
    use crate::shared::seed::SeedData;
    use crate::shared::storage::KeyValueStore;
    use std::sync::Arc;

    #[test]
    fn test_state_persists_under_namespace() {
        let store = KeyValueStore::memory();
        let app = AppState::new(DashboardConfig::default(), Arc::new(SeedData::default()), store.clone());
        assert_eq!(load_state(&app), SubmissionListState::default());

        let state = SubmissionListState {
            filter: ListFilter::with_status("contacted"),
            page: 2,
            ..Default::default()
        };
        save_state(&app, &state);
        assert!(store.contains("laguna:a002_form_submission_list_state_v1"));
        assert_eq!(load_state(&app), state);
        assert_eq!(load_state(&app).to_query(10).page, 2);
    }
}
