//! Derived state of the form submissions list.

use crate::domain::a002_form_submission::model::{merge_submissions, SubmissionRow};
use crate::shared::date_utils::format_datetime;
use crate::shared::export::CsvExportable;
use crate::shared::list_utils::{cmp_ids, cmp_text, paginate, sort_list, DateRange, Searchable, Sortable};
use crate::shared::overlay::StatusOverlay;
use contracts::domain::a002_form_submission::{FormSubmission, SubmissionStatus};
use contracts::shared::filters::ListFilter;
use contracts::shared::pagination::PaginationInfo;
use std::borrow::Cow;
use std::cmp::Ordering;
use std::collections::BTreeMap;

pub const DEFAULT_SORT_FIELD: &str = "submitted_at";

impl Searchable for SubmissionRow {
    fn search_fields(&self) -> Vec<Cow<'_, str>> {
        let s = &self.submission;
        [s.name(), s.email(), s.subject(), Some(Cow::Borrowed(s.form_name.as_str()))]
            .into_iter()
            .flatten()
            .collect()
    }
}

impl Sortable for SubmissionRow {
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
        let primary = match field {
            "id" => Ordering::Equal,
            "form_name" => cmp_text(&self.submission.form_name, &other.submission.form_name),
            "name" => cmp_text(&self.display_name(), &other.display_name()),
            "status" => self.status.as_str().cmp(other.status.as_str()),
            _ => self.timestamp().cmp(&other.timestamp()),
        };
        primary.then_with(|| cmp_ids(self.id(), other.id()))
    }
}

impl CsvExportable for SubmissionRow {
    fn headers() -> Vec<&'static str> {
        vec![
            "Submission ID",
            "Submitted At",
            "Form",
            "Name",
            "Email",
            "Company",
            "Subject",
            "Status",
            "Message",
        ]
    }

    fn to_csv_row(&self) -> Vec<String> {
        let s = &self.submission;
        vec![
            s.id.clone(),
            format_datetime(&s.submitted_at),
            s.form_name.clone(),
            self.display_name().to_string(),
            s.email().unwrap_or_default().to_string(),
            s.company().unwrap_or_default().to_string(),
            s.subject().unwrap_or_default().to_string(),
            self.status.label().to_string(),
            s.message().unwrap_or_default().to_string(),
        ]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionListQuery {
    pub filter: ListFilter,
    pub sort_field: String,
    pub sort_ascending: bool,
    pub page: usize,
    pub page_size: usize,
}

impl Default for SubmissionListQuery {
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
pub struct SubmissionListPage {
    pub rows: Vec<SubmissionRow>,
    pub pagination: PaginationInfo,
    pub status_counts: BTreeMap<SubmissionStatus, usize>,
    pub filtered: Vec<SubmissionRow>,
}

fn matches_status(row: &SubmissionRow, status: Option<&str>) -> bool {
    match status.map(str::trim).filter(|s| !s.is_empty()) {
        None => true,
        Some(raw) => raw
            .parse::<SubmissionStatus>()
            .map(|status| row.status == status)
            .unwrap_or(false),
    }
}

/// Тема заявки должна совпасть точно
fn matches_subject(row: &SubmissionRow, category: Option<&str>) -> bool {
    match category.filter(|c| !c.trim().is_empty()) {
        None => true,
        Some(subject) => row.submission.subject().as_deref() == Some(subject),
    }
}

pub fn filter_submissions(rows: &[SubmissionRow], filter: &ListFilter) -> Vec<SubmissionRow> {
    let range = DateRange::parse(&filter.date_from, &filter.date_to);
    rows.iter()
        .filter(|row| matches_status(row, filter.status.as_deref()))
        .filter(|row| row.matches_search(&filter.search))
        .filter(|row| range.contains(&row.submission.submitted_at))
        .filter(|row| matches_subject(row, filter.category.as_deref()))
        .cloned()
        .collect()
}

pub fn status_counts(rows: &[SubmissionRow]) -> BTreeMap<SubmissionStatus, usize> {
    let mut counts = BTreeMap::new();
    for row in rows {
        *counts.entry(row.status).or_insert(0) += 1;
    }
    counts
}

pub fn derive_submission_list(
    submissions: &[FormSubmission],
    overlay: &StatusOverlay,
    query: &SubmissionListQuery,
) -> SubmissionListPage {
    let merged = merge_submissions(submissions, overlay);
    let mut filtered = filter_submissions(&merged, &query.filter);
    sort_list(&mut filtered, &query.sort_field, query.sort_ascending);

    let page = paginate(&filtered, query.page, query.page_size);
    log::debug!(
        "Submission list: {} of {} match, page {}/{}",
        filtered.len(),
        merged.len(),
        page.info.current_page,
        page.info.total_pages
    );

    SubmissionListPage {
        rows: page.rows,
        pagination: page.info,
        status_counts: status_counts(&filtered),
        filtered,
    }
}

/// Distinct subjects for the subject filter dropdown
pub fn subjects(submissions: &[FormSubmission]) -> Vec<String> {
    let mut subjects: Vec<String> = submissions
        .iter()
        .filter_map(|s| s.subject())
        .map(Cow::into_owned)
        .collect();
    subjects.sort();
    subjects.dedup();
    subjects
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::export::to_csv;
    use crate::shared::fixtures::{submission, with_form};
    use crate::shared::overlay::OverlayKind;
    use crate::shared::storage::KeyValueStore;

    fn overlay() -> StatusOverlay {
        StatusOverlay::new(KeyValueStore::memory(), "laguna")
    }

    fn ids(rows: &[SubmissionRow]) -> Vec<&str> {
        rows.iter().map(|r| r.id()).collect()
    }

    fn seed() -> Vec<FormSubmission> {
        vec![
            submission(
                "1",
                "2024-03-01T10:00:00Z",
                SubmissionStatus::New,
                &[("your-name", "Ann Lee"), ("your-email", "ann@corp.io"), ("your-subject", "Pricing")],
            ),
            with_form(
                submission(
                    "2",
                    "2024-03-02T10:00:00Z",
                    SubmissionStatus::Contacted,
                    &[("name", "Bob"), ("email", "bob@x.com"), ("subject", "Support")],
                ),
                "Request a Quote",
            ),
            submission("3", "2024-03-03T10:00:00Z", SubmissionStatus::New, &[("email", "anon@x.com")]),
        ]
    }

    fn query(filter: ListFilter) -> SubmissionListQuery {
        SubmissionListQuery {
            filter,
            ..Default::default()
        }
    }

    #[test]
    fn test_default_sort_is_newest_first() {
        let page = derive_submission_list(&seed(), &overlay(), &SubmissionListQuery::default());
        assert_eq!(ids(&page.rows), vec!["3", "2", "1"]);
        assert_eq!(page.status_counts.get(&SubmissionStatus::New), Some(&2));
    }

    #[test]
    fn test_search_covers_form_name_and_aliases() {
        let mut filter = ListFilter::default();
        filter.search = "QUOTE".into();
        assert_eq!(ids(&derive_submission_list(&seed(), &overlay(), &query(filter.clone())).rows), vec!["2"]);

        filter.search = "corp.io".into();
        assert_eq!(ids(&derive_submission_list(&seed(), &overlay(), &query(filter)).rows), vec!["1"]);
    }

    #[test]
    fn test_subject_filter_is_exact() {
        let filter = ListFilter {
            category: Some("Pricing".into()),
            ..Default::default()
        };
        assert_eq!(ids(&derive_submission_list(&seed(), &overlay(), &query(filter)).rows), vec!["1"]);

        let filter = ListFilter {
            category: Some("pricing".into()),
            ..Default::default()
        };
        assert!(derive_submission_list(&seed(), &overlay(), &query(filter)).rows.is_empty());
        assert_eq!(subjects(&seed()), vec!["Pricing", "Support"]);
    }

    #[test]
    fn test_status_filter_uses_overlay() {
        let overlay = overlay();
        overlay.set_status(OverlayKind::Submissions, "3", "in_progress");
        let page = derive_submission_list(&seed(), &overlay, &query(ListFilter::with_status("In Progress")));
        assert_eq!(ids(&page.rows), vec!["3"]);
    }

    #[test]
    fn test_sort_by_name_puts_missing_name_as_na() {
        let q = SubmissionListQuery {
            sort_field: "name".into(),
            sort_ascending: true,
            ..Default::default()
        };
        let page = derive_submission_list(&seed(), &overlay(), &q);
        assert_eq!(ids(&page.rows), vec!["1", "2", "3"]);
        assert_eq!(page.rows[2].display_name(), "N/A");
    }

    #[test]
    fn test_csv_row_uses_aliases() {
        let rows = merge_submissions(&seed(), &overlay());
        let csv = to_csv(&rows[..1]).unwrap();
        assert!(csv.contains("Submission ID,Submitted At,Form"));
        assert!(csv.contains("Ann Lee,ann@corp.io,,Pricing,New,"));
    }
}
