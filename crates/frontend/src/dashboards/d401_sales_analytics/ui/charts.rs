//! Lightweight CSS/SVG charts for the analytics page.

use crate::shared::date_utils::{format_compact, format_money};
use contracts::shared::indicators::PipelineStage;
use leptos::prelude::*;

/// One bar of a chart: label, value and the tooltip text
#[derive(Debug, Clone, PartialEq)]
pub struct BarPoint {
    pub label: String,
    pub value: f64,
    pub title: String,
}

fn max_value(points: &[BarPoint]) -> f64 {
    points.iter().map(|p| p.value).fold(0.0, f64::max)
}

fn height_percent(value: f64, max: f64) -> f64 {
    if max <= 0.0 {
        0.0
    } else {
        (value / max * 100.0).clamp(0.0, 100.0)
    }
}

/// Vertical bars (monthly revenue)
#[component]
pub fn ColumnChart(#[prop(into)] points: Signal<Vec<BarPoint>>) -> impl IntoView {
    view! {
        <div class="column-chart">
            <div class="column-chart__axis">
                {move || format_compact(max_value(&points.get()))}
            </div>
            <div class="column-chart__bars">
                {move || {
                    let points = points.get();
                    let max = max_value(&points);
                    points
                        .into_iter()
                        .map(|p| {
                            let style = format!("height: {:.1}%;", height_percent(p.value, max));
                            view! {
                                <div class="column-chart__col" title=p.title>
                                    <div class="column-chart__bar" style=style></div>
                                    <div class="column-chart__label">{p.label}</div>
                                </div>
                            }
                        })
                        .collect_view()
                }}
            </div>
        </div>
    }
}

/// Воронка: этап, оценочная стоимость, количество
#[component]
pub fn PipelineStages(#[prop(into)] stages: Signal<Vec<PipelineStage>>) -> impl IntoView {
    view! {
        <div class="pipeline">
            <For
                each=move || stages.get()
                key=|stage| (stage.name.clone(), stage.count)
                children=move |stage| view! {
                    <div class="pipeline__stage">
                        <div class="pipeline__name">{stage.name}</div>
                        <div class="pipeline__value">{format_money(stage.value)}</div>
                        <div class="pipeline__count">{format!("{} {}", stage.count, stage.unit)}</div>
                    </div>
                }
            />
        </div>
    }
}

/// Horizontal bars with value on the right (distributions, categories)
#[component]
pub fn BarList(
    #[prop(into)] points: Signal<Vec<BarPoint>>,
    #[prop(optional, into)] empty_text: Option<String>,
) -> impl IntoView {
    let empty_text = empty_text.unwrap_or_else(|| "No data".to_string());
    view! {
        <div class="bar-list">
            {move || {
                let points = points.get();
                if points.is_empty() {
                    return view! { <div class="bar-list__empty">{empty_text.clone()}</div> }.into_any();
                }
                let max = max_value(&points);
                points
                    .into_iter()
                    .map(|p| {
                        let style = format!("width: {:.1}%;", height_percent(p.value, max));
                        view! {
                            <div class="bar-list__row">
                                <div class="bar-list__label">{p.label}</div>
                                <div class="bar-list__track">
                                    <div class="bar-list__fill" style=style></div>
                                </div>
                                <div class="bar-list__value">{p.title}</div>
                            </div>
                        }
                    })
                    .collect_view()
                    .into_any()
            }}
        </div>
    }
}

const RING_RADIUS: f64 = 45.0;

/// Progress ring with the percentage in the middle
#[component]
pub fn ProgressRing(#[prop(into)] percent: Signal<f64>) -> impl IntoView {
    let circumference = 2.0 * std::f64::consts::PI * RING_RADIUS;
    let offset = move || {
        let p = percent.get().clamp(0.0, 100.0);
        format!("{:.2}", circumference - p / 100.0 * circumference)
    };

    view! {
        <svg class="progress-ring" viewBox="0 0 100 100" width="160" height="160">
            <circle class="progress-ring__track" stroke-width="10" fill="transparent" r="45" cx="50" cy="50" />
            <circle
                class="progress-ring__value"
                stroke-width="10"
                stroke-linecap="round"
                fill="transparent"
                r="45"
                cx="50"
                cy="50"
                transform="rotate(-90 50 50)"
                stroke-dasharray=format!("{:.2}", circumference)
                stroke-dashoffset=offset
            />
            <text x="50" y="50" text-anchor="middle" dy=".3em" class="progress-ring__text">
                {move || format!("{:.1}%", percent.get())}
            </text>
        </svg>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_scaling() {
        let points = vec![
            BarPoint { label: "a".into(), value: 50.0, title: String::new() },
            BarPoint { label: "b".into(), value: 200.0, title: String::new() },
        ];
        let max = max_value(&points);
        assert_eq!(max, 200.0);
        assert_eq!(height_percent(50.0, max), 25.0);
        assert_eq!(height_percent(10.0, 0.0), 0.0);
    }
}
