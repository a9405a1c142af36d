//! Sidebar: navigation groups, KPI summary and the demo data reset.

use crate::dashboards::d400_overview::model::sidebar_summary;
use crate::layout::global_context::{AppGlobalContext, ToastKind};
use crate::layout::tabs::tab_label_for_key;
use crate::shared::date_utils::format_money;
use crate::shared::icons::icon;
use leptos::prelude::*;

#[derive(Clone, Debug, PartialEq)]
struct MenuGroup {
    label: &'static str,
    items: Vec<(&'static str, &'static str, &'static str)>, // (id, label, icon)
}

fn get_menu_groups() -> Vec<MenuGroup> {
    vec![
        MenuGroup {
            label: "Dashboards",
            items: vec![
                ("d400_overview", tab_label_for_key("d400_overview"), "dashboard"),
                ("d401_sales_analytics", tab_label_for_key("d401_sales_analytics"), "analytics"),
            ],
        },
        MenuGroup {
            label: "Sales",
            items: vec![
                ("a001_order", tab_label_for_key("a001_order"), "orders"),
                ("a002_form_submission", tab_label_for_key("a002_form_submission"), "submissions"),
            ],
        },
    ]
}

#[component]
fn SidebarSummary() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");

    let summary = Memo::new(move |_| {
        ctx.track_statuses();
        ctx.with_app(|app| sidebar_summary(&app.order_rows(), &app.submission_rows()))
    });

    view! {
        <div class="app-sidebar__summary">
            <div class="app-sidebar__summary-row">
                <span>"Revenue"</span>
                <strong>{move || format_money(summary.get().completed_revenue)}</strong>
            </div>
            <div class="app-sidebar__summary-row">
                <span>"Pending orders"</span>
                <strong>{move || summary.get().pending_orders}</strong>
            </div>
            <div class="app-sidebar__summary-row">
                <span>"Submissions"</span>
                <strong>{move || summary.get().submissions}</strong>
            </div>
        </div>
    }
}

#[component]
pub fn Sidebar() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");

    let reset_demo_data = move |_| {
        let removed = ctx.with_app(|app| app.clear_all_overrides());
        ctx.notify(
            ToastKind::Success,
            format!("Demo data restored ({} edits discarded)", removed),
        );
    };

    view! {
        <div class="app-sidebar__content">
            <div class="app-sidebar__brand">"Laguna"</div>
            {get_menu_groups()
                .into_iter()
                .map(|group| {
                    view! {
                        <div class="app-sidebar__group">
                            <div class="app-sidebar__group-label">{group.label}</div>
                            {group
                                .items
                                .into_iter()
                                .map(|(id, label, icon_name)| {
                                    view! {
                                        <div
                                            class="app-sidebar__item"
                                            class:app-sidebar__item--active=move || {
                                                ctx.active.get().as_deref() == Some(id)
                                            }
                                            on:click=move |_| ctx.open_tab(id, label)
                                        >
                                            <div class="app-sidebar__item-content">
                                                {icon(icon_name)}
                                                <span>{label}</span>
                                            </div>
                                        </div>
                                    }
                                })
                                .collect_view()}
                        </div>
                    }
                })
                .collect_view()}

            <SidebarSummary />

            <button class="app-sidebar__reset" on:click=reset_demo_data title="Discard all status edits">
                {icon("refresh")}
                " Reset demo data"
            </button>
        </div>
    }
}
