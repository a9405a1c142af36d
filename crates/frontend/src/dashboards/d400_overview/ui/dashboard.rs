use crate::dashboards::d400_overview::model::{dashboard_stats, recent_orders, recent_submissions};
use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::{order_detail_key, submission_detail_key, tab_label_for_key, tab_title_for_key};
use crate::shared::components::ui::badge::{OrderStatusBadge, SubmissionStatusBadge};
use crate::shared::components::{CardAnimated, PageHeader, StatCard};
use crate::shared::date_utils::{format_date, format_money};
use contracts::shared::indicators::ValueFormat;
use leptos::prelude::*;
use thaw::*;

const RECENT_COUNT: usize = 5;

/// Главная страница: KPI + последние заказы и заявки
#[component]
pub fn OverviewDashboard() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");

    let rows = Memo::new(move |_| {
        ctx.track_statuses();
        ctx.with_app(|app| (app.order_rows(), app.submission_rows()))
    });

    let stats = Memo::new(move |_| rows.with(|(orders, subs)| dashboard_stats(orders, subs)));
    let latest_orders = Memo::new(move |_| rows.with(|(orders, _)| recent_orders(orders, RECENT_COUNT)));
    let latest_subs = Memo::new(move |_| rows.with(|(_, subs)| recent_submissions(subs, RECENT_COUNT)));

    let open = move |key: String| ctx.open_tab(&key, &tab_title_for_key(&key));
    let open_list = move |key: &'static str| ctx.open_tab(key, tab_label_for_key(key));

    view! {
        <div class="page page--dashboard">
            <PageHeader
                title="Welcome to Laguna Dashboard"
                subtitle="Your business overview at a glance".to_string()
                icon_name="dashboard".to_string()
            >
                {()}
            </PageHeader>

            <div class="dashboard-grid dashboard-grid--kpi">
                <StatCard
                    label="Total Orders"
                    icon_name="orders"
                    value=Signal::derive(move || Some(stats.get().total_orders as f64))
                    format=ValueFormat::Integer
                />
                <StatCard
                    label="Form Submissions"
                    icon_name="submissions"
                    value=Signal::derive(move || Some(stats.get().total_submissions as f64))
                    format=ValueFormat::Integer
                />
                <StatCard
                    label="Total Revenue"
                    icon_name="analytics"
                    value=Signal::derive(move || Some(stats.get().total_revenue))
                    format=ValueFormat::Money { currency: "USD".into() }
                />
                <StatCard
                    label="Customers"
                    icon_name="user"
                    value=Signal::derive(move || Some(stats.get().total_customers as f64))
                    format=ValueFormat::Integer
                    subtitle=Signal::derive(|| Some("unique emails".to_string()))
                />
            </div>

            <div class="dashboard-grid dashboard-grid--two">
                <CardAnimated delay_ms=0 title="Recent Orders".to_string()>
                    <ul class="recent-list">
                        <For
                            each=move || latest_orders.get()
                            key=|row| (row.order.id.clone(), row.status)
                            children=move |row| {
                                let key = order_detail_key(row.id());
                                view! {
                                    <li class="recent-list__item" on:click=move |_| open(key.clone())>
                                        <div class="recent-list__main">
                                            <span class="recent-list__title">{format!("#{} · {}", row.order.id, row.order.customer.name)}</span>
                                            <span class="recent-list__meta">{format_date(&row.order.date)}</span>
                                        </div>
                                        <div class="recent-list__side">
                                            <span class="recent-list__amount">{format_money(row.order.total)}</span>
                                            <OrderStatusBadge status=row.status />
                                        </div>
                                    </li>
                                }
                            }
                        />
                    </ul>
                    <Button appearance=ButtonAppearance::Subtle on_click=move |_| open_list("a001_order")>
                        "View all orders"
                    </Button>
                </CardAnimated>

                <CardAnimated delay_ms=80 title="Recent Submissions".to_string()>
                    <ul class="recent-list">
                        <For
                            each=move || latest_subs.get()
                            key=|row| (row.submission.id.clone(), row.status)
                            children=move |row| {
                                let key = submission_detail_key(row.id());
                                view! {
                                    <li class="recent-list__item" on:click=move |_| open(key.clone())>
                                        <div class="recent-list__main">
                                            <span class="recent-list__title">{row.display_name().to_string()}</span>
                                            <span class="recent-list__meta">
                                                {format!("{} · {}", row.submission.form_name, format_date(&row.submission.submitted_at))}
                                            </span>
                                        </div>
                                        <div class="recent-list__side">
                                            <SubmissionStatusBadge status=row.status />
                                        </div>
                                    </li>
                                }
                            }
                        />
                    </ul>
                    <Button appearance=ButtonAppearance::Subtle on_click=move |_| open_list("a002_form_submission")>
                        "View all submissions"
                    </Button>
                </CardAnimated>
            </div>
        </div>
    }
}
