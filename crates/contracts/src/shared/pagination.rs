use serde::{Deserialize, Serialize};

/// Метаданные пагинации. Страницы нумеруются с 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationInfo {
    pub current_page: usize,
    pub total_pages: usize,
    pub total_items: usize,
    pub items_per_page: usize,
}

impl PaginationInfo {
    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    /// Индекс первой строки страницы (с 0)
    pub fn offset(&self) -> usize {
        (self.current_page.saturating_sub(1)) * self.items_per_page
    }

    /// "11–20 of 42"
    pub fn range_label(&self) -> String {
        if self.total_items == 0 {
            return "0 of 0".to_string();
        }
        let first = self.offset() + 1;
        let last = (self.offset() + self.items_per_page).min(self.total_items);
        format!("{}–{} of {}", first, last, self.total_items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_label() {
        let info = PaginationInfo {
            current_page: 2,
            total_pages: 5,
            total_items: 42,
            items_per_page: 10,
        };
        assert_eq!(info.range_label(), "11–20 of 42");
        assert!(info.has_previous());
        assert!(info.has_next());

        let last = PaginationInfo { current_page: 5, ..info };
        assert_eq!(last.range_label(), "41–42 of 42");
        assert!(!last.has_next());
    }

    #[test]
    fn test_empty_range_label() {
        let info = PaginationInfo {
            current_page: 1,
            total_pages: 0,
            total_items: 0,
            items_per_page: 10,
        };
        assert_eq!(info.range_label(), "0 of 0");
        assert!(!info.has_previous());
        assert!(!info.has_next());
    }
}
