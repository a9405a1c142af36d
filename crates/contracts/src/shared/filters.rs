use serde::{Deserialize, Serialize};

/// Фильтры списка (заказы / заявки). Все условия объединяются через AND.
///
/// Пустые строки означают "фильтр не задан", как и в состоянии списков.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListFilter {
    /// Точное совпадение эффективного статуса (код статуса)
    #[serde(default)]
    pub status: Option<String>,
    /// Подстрока без учёта регистра, ищется в нескольких полях (OR)
    #[serde(default)]
    pub search: String,
    /// Нижняя граница даты, включительно (YYYY-MM-DD)
    #[serde(default)]
    pub date_from: String,
    /// Верхняя граница даты, включительно (YYYY-MM-DD)
    #[serde(default)]
    pub date_to: String,
    /// Категориальный фильтр: категория товара для заказов, тема для заявок
    #[serde(default)]
    pub category: Option<String>,
}

impl ListFilter {
    pub fn with_status(status: &str) -> Self {
        Self {
            status: Some(status.to_string()),
            ..Default::default()
        }
    }

    pub fn with_dates(date_from: &str, date_to: &str) -> Self {
        Self {
            date_from: date_from.to_string(),
            date_to: date_to.to_string(),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.status.as_deref().map_or(true, |s| s.trim().is_empty())
            && self.search.trim().is_empty()
            && self.date_from.trim().is_empty()
            && self.date_to.trim().is_empty()
            && self.category.as_deref().map_or(true, |c| c.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_values_count_as_empty() {
        let filter = ListFilter {
            status: Some(" ".into()),
            search: "  ".into(),
            category: Some(String::new()),
            ..Default::default()
        };
        assert!(filter.is_empty());
        assert!(!ListFilter::with_status("pending").is_empty());
        assert!(!ListFilter::with_dates("2024-01-01", "").is_empty());
    }
}
