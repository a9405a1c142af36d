//! Tab content registry - единственный источник правды для маппинга tab.key → View

use super::tab_labels::{ORDER_DETAIL_PREFIX, SUBMISSION_DETAIL_PREFIX};
use crate::dashboards::d400_overview::OverviewDashboard;
use crate::dashboards::d401_sales_analytics::SalesAnalyticsDashboard;
use crate::domain::a001_order::ui::details::OrderDetails;
use crate::domain::a001_order::ui::list::OrderList;
use crate::domain::a002_form_submission::ui::details::FormSubmissionDetails;
use crate::domain::a002_form_submission::ui::list::FormSubmissionList;
use crate::layout::global_context::AppGlobalContext;
use leptos::prelude::*;

/// Рендерит контент таба по его ключу.
///
/// # Arguments
/// * `key` - уникальный ключ таба (например "a001_order", "a001_order_detail_1250")
/// * `tabs_store` - контекст для закрытия таба (используется в detail-views с on_close)
pub fn render_tab_content(key: &str, tabs_store: AppGlobalContext) -> AnyView {
    let key_for_close = key.to_string();
    let on_close = Callback::new(move |_: ()| tabs_store.close_tab(&key_for_close));

    match key {
        // ═══════════════════════════════════════════════════════════════════
        // Dashboards (d4xx)
        // ═══════════════════════════════════════════════════════════════════
        "d400_overview" => view! { <OverviewDashboard /> }.into_any(),
        "d401_sales_analytics" => view! { <SalesAnalyticsDashboard /> }.into_any(),

        // ═══════════════════════════════════════════════════════════════════
        // Domain Aggregates
        // ═══════════════════════════════════════════════════════════════════

        // a001: Orders
        "a001_order" => view! { <OrderList /> }.into_any(),
        k if k.starts_with(ORDER_DETAIL_PREFIX) => {
            let id = k[ORDER_DETAIL_PREFIX.len()..].to_string();
            view! { <OrderDetails id=id on_close=on_close /> }.into_any()
        }

        // a002: Form submissions
        "a002_form_submission" => view! { <FormSubmissionList /> }.into_any(),
        k if k.starts_with(SUBMISSION_DETAIL_PREFIX) => {
            let id = k[SUBMISSION_DETAIL_PREFIX.len()..].to_string();
            view! { <FormSubmissionDetails id=id on_close=on_close /> }.into_any()
        }

        _ => {
            log::warn!("Unknown tab key: {}", key);
            let key = key.to_string();
            view! {
                <div class="placeholder">
                    "Unknown page: " {key}
                </div>
            }
            .into_any()
        }
    }
}
