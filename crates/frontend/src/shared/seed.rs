//! Static seed data bundled into the wasm binary.

use contracts::domain::a001_order::Order;
use contracts::domain::a002_form_submission::FormSubmission;
use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;
use std::sync::Arc;

const ORDERS_JSON: &str = include_str!("../../assets/seed/orders.json");
const SUBMISSIONS_JSON: &str = include_str!("../../assets/seed/submissions.json");

static EMBEDDED: Lazy<Arc<SeedData>> =
    Lazy::new(|| Arc::new(SeedData::from_json(ORDERS_JSON, SUBMISSIONS_JSON)));

/// Immutable within a session. Both collections are recency ordered
/// (newest first).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeedData {
    pub orders: Vec<Order>,
    pub submissions: Vec<FormSubmission>,
}

impl SeedData {
    /// Parsed once per app start, shared afterwards.
    pub fn embedded() -> Arc<SeedData> {
        EMBEDDED.clone()
    }

    pub fn from_json(orders_json: &str, submissions_json: &str) -> Self {
        Self {
            orders: parse_collection(orders_json, "orders"),
            submissions: parse_collection(submissions_json, "submissions"),
        }
    }

    pub fn find_order(&self, id: &str) -> Option<&Order> {
        self.orders.iter().find(|o| o.id == id)
    }

    pub fn find_submission(&self, id: &str) -> Option<&FormSubmission> {
        self.submissions.iter().find(|s| s.id == id)
    }
}

fn parse_collection<T: DeserializeOwned>(json: &str, what: &str) -> Vec<T> {
    match serde_json::from_str::<Vec<T>>(json) {
        Ok(items) => {
            log::debug!("Loaded {} seed {}", items.len(), what);
            items
        }
        Err(e) => {
            log::error!("Failed to parse seed {}: {}", what, e);
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::common::parse_timestamp;
    use std::collections::HashSet;

    #[test]
    fn test_embedded_seed_parses() {
        let seed = SeedData::embedded();
        assert!(seed.orders.len() >= 20);
        assert!(seed.submissions.len() >= 20);
    }

    #[test]
    fn test_embedded_ids_unique() {
        let seed = SeedData::embedded();
        let order_ids: HashSet<_> = seed.orders.iter().map(|o| o.id.as_str()).collect();
        assert_eq!(order_ids.len(), seed.orders.len());
        let submission_ids: HashSet<_> = seed.submissions.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(submission_ids.len(), seed.submissions.len());
    }

    #[test]
    fn test_embedded_seed_is_recency_ordered() {
        let seed = SeedData::embedded();
        let dates: Vec<_> = seed
            .orders
            .iter()
            .map(|o| parse_timestamp(&o.date).unwrap())
            .collect();
        assert!(dates.windows(2).all(|w| w[0] >= w[1]));
        let dates: Vec<_> = seed
            .submissions
            .iter()
            .map(|s| parse_timestamp(&s.submitted_at).unwrap())
            .collect();
        assert!(dates.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn test_broken_json_yields_empty_collection() {
        let seed = SeedData::from_json("[{", "[]");
        assert!(seed.orders.is_empty());
        assert!(seed.submissions.is_empty());
    }

    #[test]
    fn test_find() {
        let seed = SeedData::embedded();
        let first = &seed.orders[0];
        assert_eq!(seed.find_order(&first.id), Some(first));
        assert_eq!(seed.find_order("does-not-exist"), None);
        assert_eq!(seed.find_submission("does-not-exist"), None);
    }

    #[test]
    fn test_mixed_field_types_keep_every_submission() {
        let submissions = r#"[
            {"id": "1", "form_name": "Contact", "submitted_at": "2024-01-02T09:00:00Z", "status": "new",
             "fields": {"name": "Ann", "interests": ["seo", "ads"], "budget": 5000}},
            {"id": "2", "form_name": "Contact", "submitted_at": "2024-01-01T09:00:00Z", "status": "contacted",
             "fields": {"name": "Bob", "newsletter": false}}
        ]"#;
        let seed = SeedData::from_json("[]", submissions);
        assert_eq!(seed.submissions.len(), 2);
        assert_eq!(seed.submissions[0].field("interests").as_deref(), Some("seo, ads"));
        assert_eq!(seed.submissions[1].field("newsletter").as_deref(), Some("No"));
    }
}
