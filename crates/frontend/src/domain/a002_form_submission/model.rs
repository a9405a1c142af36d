use crate::shared::overlay::{OverlayKind, StatusOverlay};
use chrono::NaiveDateTime;
use contracts::domain::a002_form_submission::{FormSubmission, SubmissionStatus};
use contracts::domain::common::parse_timestamp;
use std::borrow::Cow;

/// Заявка с эффективным статусом
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionRow {
    pub submission: FormSubmission,
    pub status: SubmissionStatus,
}

impl SubmissionRow {
    pub fn id(&self) -> &str {
        &self.submission.id
    }

    pub fn is_overridden(&self) -> bool {
        self.status != self.submission.status
    }

    pub fn timestamp(&self) -> Option<NaiveDateTime> {
        parse_timestamp(&self.submission.submitted_at)
    }

    /// Имя отправителя для таблиц ("N/A" если поле не заполнено)
    pub fn display_name(&self) -> Cow<'_, str> {
        self.submission.name().unwrap_or(Cow::Borrowed("N/A"))
    }
}

pub fn merge_submissions(
    submissions: &[FormSubmission],
    overlay: &StatusOverlay,
) -> Vec<SubmissionRow> {
    submissions
        .iter()
        .map(|submission| SubmissionRow {
            status: overlay.effective_status(
                OverlayKind::Submissions,
                &submission.id,
                submission.status,
            ),
            submission: submission.clone(),
        })
        .collect()
}

pub fn find_submission(
    submissions: &[FormSubmission],
    overlay: &StatusOverlay,
    id: &str,
) -> Option<SubmissionRow> {
    submissions
        .iter()
        .find(|s| s.id == id)
        .map(|submission| SubmissionRow {
            status: overlay.effective_status(
                OverlayKind::Submissions,
                &submission.id,
                submission.status,
            ),
            submission: submission.clone(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::fixtures::submission;
    use crate::shared::storage::KeyValueStore;

    #[test]
    fn test_merge_and_find() {
        let overlay = StatusOverlay::new(KeyValueStore::memory(), "laguna");
        let seed = vec![
            submission("1", "2024-02-01", SubmissionStatus::New, &[("name", "Ann")]),
            submission("2", "2024-02-02", SubmissionStatus::New, &[]),
        ];
        overlay.set_status(OverlayKind::Submissions, "2", "in_progress");

        let rows = merge_submissions(&seed, &overlay);
        assert_eq!(rows[0].status, SubmissionStatus::New);
        assert_eq!(rows[0].display_name(), "Ann");
        assert_eq!(rows[1].status, SubmissionStatus::InProgress);
        assert_eq!(rows[1].display_name(), "N/A");
        assert!(rows[1].is_overridden());

        assert!(find_submission(&seed, &overlay, "2").is_some());
        assert!(find_submission(&seed, &overlay, "3").is_none());
    }

    #[test]
    fn test_overlay_on_order_id_does_not_leak() {
        let overlay = StatusOverlay::new(KeyValueStore::memory(), "laguna");
        let seed = vec![submission("42", "2024-02-01", SubmissionStatus::New, &[])];
        overlay.set_status(OverlayKind::Orders, "42", "processing");
        assert_eq!(merge_submissions(&seed, &overlay)[0].status, SubmissionStatus::New);
    }
}
