//! Tab labels - единственный источник правды для заголовков табов.

pub const ORDER_DETAIL_PREFIX: &str = "a001_order_detail_";
pub const SUBMISSION_DETAIL_PREFIX: &str = "a002_form_submission_detail_";

/// Возвращает читаемый заголовок таба для статического ключа. Fallback: "".
pub fn tab_label_for_key(key: &str) -> &'static str {
    match key {
        // ── Aggregates ────────────────────────────────────────────────────
        "a001_order" => "Orders",
        "a002_form_submission" => "Form Submissions",

        // ── Dashboards (d4xx) ─────────────────────────────────────────────
        "d400_overview" => "Dashboard",
        "d401_sales_analytics" => "Analytics",

        _ => "",
    }
}

/// Формирует заголовок detail-таба: «<entity> · <identifier>».
pub fn detail_tab_label(entity_label: &'static str, identifier: &str) -> String {
    format!("{} · {}", entity_label, identifier)
}

pub fn order_detail_key(id: &str) -> String {
    format!("{}{}", ORDER_DETAIL_PREFIX, id)
}

pub fn submission_detail_key(id: &str) -> String {
    format!("{}{}", SUBMISSION_DETAIL_PREFIX, id)
}

/// Заголовок для любого ключа, включая detail-табы. Fallback: сам ключ.
pub fn tab_title_for_key(key: &str) -> String {
    if let Some(id) = key.strip_prefix(ORDER_DETAIL_PREFIX) {
        return detail_tab_label("Order", &format!("#{}", id));
    }
    if let Some(id) = key.strip_prefix(SUBMISSION_DETAIL_PREFIX) {
        return detail_tab_label("Submission", &format!("#{}", id));
    }
    match tab_label_for_key(key) {
        "" => key.to_string(),
        label => label.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_titles() {
        assert_eq!(tab_title_for_key("a001_order"), "Orders");
        assert_eq!(tab_title_for_key(&order_detail_key("1250")), "Order · #1250");
        assert_eq!(
            tab_title_for_key(&submission_detail_key("5300")),
            "Submission · #5300"
        );
        assert_eq!(tab_title_for_key("unknown"), "unknown");
    }
}
