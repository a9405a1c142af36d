use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Статус заявки: воронка продаж (лид → сделка)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStatus {
    New,
    Contacted,
    Qualified,
    InProgress,
    Converted,
    Closed,
}

impl SubmissionStatus {
    pub const ALL: [SubmissionStatus; 6] = [
        SubmissionStatus::New,
        SubmissionStatus::Contacted,
        SubmissionStatus::Qualified,
        SubmissionStatus::InProgress,
        SubmissionStatus::Converted,
        SubmissionStatus::Closed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SubmissionStatus::New => "new",
            SubmissionStatus::Contacted => "contacted",
            SubmissionStatus::Qualified => "qualified",
            SubmissionStatus::InProgress => "in_progress",
            SubmissionStatus::Converted => "converted",
            SubmissionStatus::Closed => "closed",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SubmissionStatus::New => "New",
            SubmissionStatus::Contacted => "Contacted",
            SubmissionStatus::Qualified => "Qualified",
            SubmissionStatus::InProgress => "In Progress",
            SubmissionStatus::Converted => "Converted",
            SubmissionStatus::Closed => "Closed",
        }
    }

    /// Прогресс лида по воронке, %
    pub fn stage_percentage(&self) -> u8 {
        match self {
            SubmissionStatus::New => 10,
            SubmissionStatus::Contacted => 30,
            SubmissionStatus::Qualified => 60,
            SubmissionStatus::InProgress => 75,
            SubmissionStatus::Converted => 100,
            SubmissionStatus::Closed => 0,
        }
    }
}

impl fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SubmissionStatus {
    type Err = String;

    /// Accepts both the storage code (`in_progress`) and the label (`In Progress`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace([' ', '-'], "_");
        SubmissionStatus::ALL
            .iter()
            .copied()
            .find(|status| status.as_str() == normalized)
            .ok_or_else(|| format!("Unknown submission status: {}", s))
    }
}

/// Заявка с формы обратной связи (Contact Form 7)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormSubmission {
    pub id: String,
    #[serde(default)]
    pub form_id: String,
    pub form_name: String,
    pub submitted_at: String,
    pub status: SubmissionStatus,
    /// Открытый набор полей формы: строки, числа, флажки, списки
    #[serde(default)]
    pub fields: BTreeMap<String, Value>,
}

/// Текстовое представление значения поля. `null` и пустые списки считаются незаполненными.
pub fn field_text(value: &Value) -> Option<Cow<'_, str>> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(Cow::Borrowed(s.as_str())),
        Value::Bool(b) => Some(Cow::Borrowed(if *b { "Yes" } else { "No" })),
        Value::Number(n) => Some(Cow::Owned(n.to_string())),
        Value::Array(items) => {
            let parts: Vec<Cow<'_, str>> = items.iter().filter_map(field_text).collect();
            if parts.is_empty() {
                None
            } else {
                Some(Cow::Owned(parts.join(", ")))
            }
        }
        Value::Object(_) => Some(Cow::Owned(value.to_string())),
    }
}

impl FormSubmission {
    /// Значение первого непустого поля из списка синонимов
    fn first_field(&self, keys: &[&str]) -> Option<Cow<'_, str>> {
        keys.iter()
            .filter_map(|key| self.field(key))
            .find(|value| !value.trim().is_empty())
    }

    pub fn field(&self, key: &str) -> Option<Cow<'_, str>> {
        self.fields.get(key).and_then(field_text)
    }

    pub fn name(&self) -> Option<Cow<'_, str>> {
        self.first_field(&["name", "your-name"])
    }

    pub fn email(&self) -> Option<Cow<'_, str>> {
        self.first_field(&["email", "your-email"])
    }

    pub fn subject(&self) -> Option<Cow<'_, str>> {
        self.first_field(&["subject", "your-subject"])
    }

    pub fn message(&self) -> Option<Cow<'_, str>> {
        self.first_field(&["message", "your-message"])
    }

    pub fn company(&self) -> Option<Cow<'_, str>> {
        self.first_field(&["company", "company-name"])
    }

    /// Поля, не покрытые стандартными аксессорами
    pub fn extra_fields(&self) -> Vec<(&str, Cow<'_, str>)> {
        const KNOWN: [&str; 10] = [
            "name",
            "your-name",
            "email",
            "your-email",
            "subject",
            "your-subject",
            "message",
            "your-message",
            "company",
            "company-name",
        ];
        self.fields
            .iter()
            .filter(|(key, _)| !KNOWN.contains(&key.as_str()))
            .filter_map(|(key, value)| field_text(value).map(|text| (key.as_str(), text)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission(fields: &[(&str, &str)]) -> FormSubmission {
        FormSubmission {
            id: "s1".into(),
            form_id: "f1".into(),
            form_name: "Contact".into(),
            submitted_at: "2024-01-01T09:00:00Z".into(),
            status: SubmissionStatus::New,
            fields: fields
                .iter()
                .map(|(k, v)| (k.to_string(), Value::from(*v)))
                .collect(),
        }
    }

    #[test]
    fn test_status_accepts_label_and_code() {
        assert_eq!("In Progress".parse::<SubmissionStatus>(), Ok(SubmissionStatus::InProgress));
        assert_eq!("in_progress".parse::<SubmissionStatus>(), Ok(SubmissionStatus::InProgress));
        assert_eq!("NEW".parse::<SubmissionStatus>(), Ok(SubmissionStatus::New));
        assert!("replied".parse::<SubmissionStatus>().is_err());
    }

    #[test]
    fn test_status_serializes_snake_case() {
        let json = serde_json::to_string(&SubmissionStatus::InProgress).unwrap();
        assert_eq!(json, "\"in_progress\"");
    }

    #[test]
    fn test_field_aliases() {
        let s = submission(&[("your-name", "Ann"), ("email", "ann@x.com"), ("budget", "5k")]);
        assert_eq!(s.name().as_deref(), Some("Ann"));
        assert_eq!(s.email().as_deref(), Some("ann@x.com"));
        assert_eq!(s.subject(), None);
        assert_eq!(s.extra_fields(), vec![("budget", Cow::Borrowed("5k"))]);
    }

    #[test]
    fn test_blank_alias_falls_through() {
        let s = submission(&[("name", "  "), ("your-name", "Bob")]);
        assert_eq!(s.name().as_deref(), Some("Bob"));
    }

    #[test]
    fn test_non_string_fields_deserialize_and_render() {
        let json = r#"[{
            "id": "s9",
            "form_name": "Quote",
            "submitted_at": "2024-02-01T10:00:00Z",
            "status": "new",
            "fields": {"name": "Ann", "interests": ["seo", "ads"], "budget": 5000, "newsletter": true, "phone": null}
        }]"#;
        let parsed: Vec<FormSubmission> = serde_json::from_str(json).unwrap();
        let s = &parsed[0];

        assert_eq!(s.name().as_deref(), Some("Ann"));
        assert_eq!(s.field("budget").as_deref(), Some("5000"));
        assert_eq!(s.field("phone"), None);
        assert_eq!(
            s.extra_fields(),
            vec![
                ("budget", Cow::Borrowed("5000")),
                ("interests", Cow::Borrowed("seo, ads")),
                ("newsletter", Cow::Borrowed("Yes")),
            ]
        );
    }
}
