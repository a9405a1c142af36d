use super::charts::{BarList, BarPoint, ColumnChart, PipelineStages, ProgressRing};
use crate::dashboards::d401_sales_analytics::model::{
    latest_leads, monthly_sales, order_status_distribution, pipeline_stages, reference_month,
    sales_by_category, sales_kpis, submission_status_distribution, submissions_by_form,
    top_products,
};
use crate::layout::global_context::{AppGlobalContext, ToastKind};
use crate::layout::tabs::{submission_detail_key, tab_title_for_key};
use crate::shared::components::ui::badge::SubmissionStatusBadge;
use crate::shared::components::{CardAnimated, PageHeader, StatCard};
use crate::shared::date_utils::{format_date, format_money};
use crate::shared::export::export_json;
use crate::shared::icons::icon;
use chrono::Utc;
use contracts::shared::indicators::{IndicatorStatus, StatusSlice, ValueFormat};
use leptos::prelude::*;
use thaw::*;

const TOP_PRODUCTS: usize = 5;
const LATEST_LEADS: usize = 6;

fn slice_points(slices: Vec<StatusSlice>) -> Vec<BarPoint> {
    slices
        .into_iter()
        .map(|s| BarPoint {
            title: format!("{} ({:.0}%)", s.count, s.percent),
            label: s.label,
            value: s.count as f64,
        })
        .collect()
}

#[component]
pub fn SalesAnalyticsDashboard() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");

    let rows = Memo::new(move |_| {
        ctx.track_statuses();
        ctx.with_app(|app| (app.order_rows(), app.submission_rows()))
    });
    let months = ctx.with_app(|app| app.config().analytics.months);

    let kpis = Memo::new(move |_| rows.with(|(orders, subs)| sales_kpis(orders, subs)));
    let stages = Memo::new(move |_| rows.with(|(_, subs)| pipeline_stages(subs)));

    let revenue_points = Signal::derive(move || {
        rows.with(|(orders, _)| {
            let reference = reference_month(orders, Utc::now().date_naive());
            monthly_sales(orders, reference, months)
                .into_iter()
                .map(|m| BarPoint {
                    title: format!("{}: {}", m.label, format_money(m.total)),
                    label: m.label,
                    value: m.total,
                })
                .collect::<Vec<_>>()
        })
    });
    let order_slices = Signal::derive(move || rows.with(|(orders, _)| slice_points(order_status_distribution(orders))));
    let submission_slices =
        Signal::derive(move || rows.with(|(_, subs)| slice_points(submission_status_distribution(subs))));
    let category_points = Signal::derive(move || {
        rows.with(|(orders, _)| {
            sales_by_category(orders)
                .into_iter()
                .map(|c| BarPoint {
                    title: format_money(c.total),
                    label: c.category,
                    value: c.total,
                })
                .collect::<Vec<_>>()
        })
    });
    let form_points = Signal::derive(move || {
        rows.with(|(_, subs)| {
            submissions_by_form(subs)
                .into_iter()
                .map(|(form, count)| BarPoint {
                    title: count.to_string(),
                    label: form,
                    value: count as f64,
                })
                .collect::<Vec<_>>()
        })
    });
    let products = Memo::new(move |_| rows.with(|(orders, _)| top_products(orders, TOP_PRODUCTS)));
    let leads = Memo::new(move |_| rows.with(|(_, subs)| latest_leads(subs, LATEST_LEADS)));

    let export_report = move |_| {
        let report = serde_json::json!({
            "kpis": kpis.get_untracked(),
            "pipeline": stages.get_untracked(),
            "top_products": products.get_untracked(),
        });
        match export_json(&report, "sales-analytics.json") {
            Ok(()) => ctx.notify(ToastKind::Success, "Report exported"),
            Err(e) => ctx.notify(ToastKind::Error, e.to_string()),
        }
    };

    let conversion_status = Signal::derive(move || {
        if kpis.get().conversion_rate >= 20.0 {
            IndicatorStatus::Good
        } else {
            IndicatorStatus::Neutral
        }
    });

    view! {
        <div class="page page--dashboard">
            <PageHeader
                title="Sales Analytics"
                subtitle="Reports > Home > Sales".to_string()
                icon_name="analytics".to_string()
            >
                <Button appearance=ButtonAppearance::Secondary on_click=export_report>
                    {icon("download")}
                    " Export JSON"
                </Button>
            </PageHeader>

            <div class="dashboard-grid dashboard-grid--kpi">
                <StatCard
                    label="Active Deals"
                    icon_name="orders"
                    value=Signal::derive(move || Some(kpis.get().active_deals_value))
                    format=ValueFormat::Money { currency: "USD".into() }
                    subtitle=Signal::derive(|| Some("pending + processing".to_string()))
                />
                <StatCard
                    label="Revenue Deals"
                    icon_name="analytics"
                    value=Signal::derive(move || Some(kpis.get().completed_revenue))
                    format=ValueFormat::Money { currency: "USD".into() }
                    status=Signal::derive(|| IndicatorStatus::Good)
                />
                <StatCard
                    label="New Leads"
                    icon_name="user"
                    value=Signal::derive(move || Some(kpis.get().new_leads as f64))
                    format=ValueFormat::Integer
                />
                <StatCard
                    label="Conversion Rate"
                    icon_name="check"
                    value=Signal::derive(move || Some(kpis.get().conversion_rate))
                    format=ValueFormat::Percent { decimals: 1 }
                    status=conversion_status
                    subtitle=Signal::derive(move || Some(format!("{} converted", kpis.get().converted_leads)))
                />
            </div>

            <CardAnimated delay_ms=0 title="Sales Pipeline".to_string()>
                <PipelineStages stages=stages />
            </CardAnimated>

            <div class="dashboard-grid dashboard-grid--wide">
                <CardAnimated delay_ms=40 title="Payment Record".to_string()>
                    <ColumnChart points=revenue_points />
                </CardAnimated>
                <CardAnimated delay_ms=80 title="Lead Conversion".to_string()>
                    <ProgressRing percent=Signal::derive(move || kpis.get().conversion_rate) />
                </CardAnimated>
            </div>

            <h2 class="dashboard-section__title">"Detailed Breakdowns"</h2>
            <div class="dashboard-grid dashboard-grid--two">
                <CardAnimated delay_ms=0 title="Order Status".to_string()>
                    <BarList points=order_slices />
                </CardAnimated>
                <CardAnimated delay_ms=40 title="Sales by Product Category".to_string()>
                    <BarList points=category_points empty_text="No completed sales yet" />
                </CardAnimated>
                <CardAnimated delay_ms=80 title="Submission Status".to_string()>
                    <BarList points=submission_slices />
                </CardAnimated>
                <CardAnimated delay_ms=120 title="Submissions by Form".to_string()>
                    <BarList points=form_points />
                </CardAnimated>
            </div>

            <div class="dashboard-grid dashboard-grid--two">
                <CardAnimated delay_ms=0 title="Top Products".to_string()>
                    <ul class="recent-list">
                        <For
                            each=move || products.get()
                            key=|p| p.product_id.clone()
                            children=move |p| view! {
                                <li class="recent-list__item">
                                    <div class="recent-list__main">
                                        <span class="recent-list__title">{p.name}</span>
                                        <span class="recent-list__meta">{format!("{} · {} sold", p.category, p.quantity)}</span>
                                    </div>
                                    <span class="recent-list__amount">{format_money(p.total)}</span>
                                </li>
                            }
                        />
                    </ul>
                </CardAnimated>

                <CardAnimated delay_ms=40 title="Latest Leads".to_string()>
                    <ul class="recent-list">
                        <For
                            each=move || leads.get()
                            key=|row| (row.submission.id.clone(), row.status)
                            children=move |row| {
                                let key = submission_detail_key(row.id());
                                view! {
                                    <li
                                        class="recent-list__item"
                                        on:click=move |_| ctx.open_tab(&key, &tab_title_for_key(&key))
                                    >
                                        <div class="recent-list__main">
                                            <span class="recent-list__title">{row.display_name().to_string()}</span>
                                            <span class="recent-list__meta">
                                                {format!("{} · {}", row.submission.form_name, format_date(&row.submission.submitted_at))}
                                            </span>
                                        </div>
                                        <SubmissionStatusBadge status=row.status />
                                    </li>
                                }
                            }
                        />
                    </ul>
                </CardAnimated>
            </div>
        </div>
    }
}
