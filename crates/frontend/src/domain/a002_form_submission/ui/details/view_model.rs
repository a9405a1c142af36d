use crate::domain::a002_form_submission::model::SubmissionRow;
use crate::layout::global_context::{AppGlobalContext, ToastKind};
use crate::shared::app_state::AppState;
use crate::shared::detail::DetailState;
use crate::shared::export::export_json;
use contracts::domain::a002_form_submission::SubmissionStatus;
use leptos::prelude::*;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

pub fn submission_detail_state(app: &AppState, id: &str) -> DetailState<SubmissionRow> {
    match app.submission(id) {
        Some(row) => DetailState::Found(row),
        None => {
            log::warn!("Submission #{} not found", id);
            DetailState::NotFound(id.to_string())
        }
    }
}

/// JSON-представление заявки для выгрузки (с эффективным статусом)
#[derive(Debug, Serialize)]
pub struct SubmissionExport<'a> {
    pub id: &'a str,
    pub form_id: &'a str,
    pub form_name: &'a str,
    pub submitted_at: &'a str,
    pub status: SubmissionStatus,
    pub fields: &'a BTreeMap<String, Value>,
}

impl<'a> From<&'a SubmissionRow> for SubmissionExport<'a> {
    fn from(row: &'a SubmissionRow) -> Self {
        let s = &row.submission;
        Self {
            id: &s.id,
            form_id: &s.form_id,
            form_name: &s.form_name,
            submitted_at: &s.submitted_at,
            status: row.status,
            fields: &s.fields,
        }
    }
}

#[derive(Clone, Copy)]
pub struct FormSubmissionDetailsVm {
    pub id: StoredValue<String>,
    pub state: Memo<DetailState<SubmissionRow>>,
    ctx: AppGlobalContext,
}

impl FormSubmissionDetailsVm {
    pub fn new(id: String, ctx: AppGlobalContext) -> Self {
        let stored_id = StoredValue::new(id);
        let state = Memo::new(move |_| {
            ctx.track_statuses();
            let id = stored_id.get_value();
            ctx.with_app(|app| submission_detail_state(app, &id))
        });
        Self {
            id: stored_id,
            state,
            ctx,
        }
    }

    pub fn status(&self) -> Signal<Option<SubmissionStatus>> {
        let state = self.state;
        Signal::derive(move || state.with(|s| s.found().map(|row| row.status)))
    }

    pub fn change_status(&self, status: SubmissionStatus) {
        let id = self.id.get_value();
        match self.ctx.with_app(|app| app.change_submission_status(&id, status)) {
            Ok(()) => self.ctx.notify(
                ToastKind::Success,
                format!("Submission #{} marked as {}", id, status.label()),
            ),
            Err(e) => self.ctx.notify(ToastKind::Error, e),
        }
    }

    pub fn export(&self) {
        let result = self.state.with_untracked(|state| match state {
            DetailState::Found(row) => {
                export_json(&SubmissionExport::from(row), &format!("submission-{}.json", row.id()))
                    .map_err(|e| e.to_string())
            }
            DetailState::NotFound(id) => Err(format!("Submission #{} not found", id)),
        });
        match result {
            Ok(()) => self.ctx.notify(ToastKind::Success, "Submission exported"),
            Err(e) => {
                log::warn!("Submission export failed: {}", e);
                self.ctx.notify(ToastKind::Error, e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::config::DashboardConfig;
    use crate::shared::fixtures::submission;
    use crate::shared::seed::SeedData;
    use crate::shared::storage::KeyValueStore;
    use std::sync::Arc;

    fn app() -> AppState {
        let seed = SeedData {
            orders: vec![],
            submissions: vec![submission(
                "5300",
                "2024-10-14T09:00:00Z",
                SubmissionStatus::New,
                &[("your-name", "Ann"), ("budget", "5k")],
            )],
        };
        AppState::new(DashboardConfig::default(), Arc::new(seed), KeyValueStore::memory())
    }

    #[test]
    fn test_lookup_uses_effective_status() {
        let app = app();
        app.change_submission_status("5300", SubmissionStatus::Qualified).unwrap();
        match submission_detail_state(&app, "5300") {
            DetailState::Found(row) => assert_eq!(row.status, SubmissionStatus::Qualified),
            other => panic!("unexpected {:?}", other),
        }
        assert!(matches!(submission_detail_state(&app, "1"), DetailState::NotFound(_)));
    }

    #[test]
    fn test_export_shape_carries_effective_status_and_fields() {
        let app = app();
        app.change_submission_status("5300", SubmissionStatus::Converted).unwrap();
        let row = app.submission("5300").unwrap();
        let json = serde_json::to_value(SubmissionExport::from(&row)).unwrap();
        assert_eq!(json["status"], "converted");
        assert_eq!(json["fields"]["budget"], "5k");
        assert_eq!(json["form_name"], "Contact Us");
    }
}
