use contracts::domain::a001_order::OrderStatus;
use contracts::domain::a002_form_submission::SubmissionStatus;
use leptos::prelude::*;

/// Badge component with different variants
#[component]
pub fn Badge(
    /// Badge variant: "primary", "success", "warning", "error", "neutral" (default)
    #[prop(optional, into)]
    variant: MaybeProp<String>,
    /// Badge content
    children: Children,
    /// Additional CSS classes
    #[prop(optional, into)]
    class: MaybeProp<String>,
) -> impl IntoView {
    let variant_class = move || match variant.get().as_deref().unwrap_or("neutral") {
        "primary" => "badge--primary",
        "success" => "badge--success",
        "warning" => "badge--warning",
        "error" => "badge--error",
        _ => "badge--neutral",
    };

    let additional_class = move || class.get().unwrap_or_default();

    view! {
        <span class=move || format!("badge {} {}", variant_class(), additional_class())>
            {children()}
        </span>
    }
}

pub fn order_status_variant(status: OrderStatus) -> &'static str {
    match status {
        OrderStatus::Completed => "success",
        OrderStatus::Processing => "primary",
        OrderStatus::Pending => "warning",
        OrderStatus::Cancelled | OrderStatus::Refunded => "error",
    }
}

pub fn submission_status_variant(status: SubmissionStatus) -> &'static str {
    match status {
        SubmissionStatus::New => "primary",
        SubmissionStatus::Contacted | SubmissionStatus::InProgress => "warning",
        SubmissionStatus::Qualified | SubmissionStatus::Converted => "success",
        SubmissionStatus::Closed => "neutral",
    }
}

#[component]
pub fn OrderStatusBadge(#[prop(into)] status: Signal<OrderStatus>) -> impl IntoView {
    view! {
        <span class=move || format!("badge badge--status badge--{}", order_status_variant(status.get()))>
            {move || status.get().label()}
        </span>
    }
}

#[component]
pub fn SubmissionStatusBadge(#[prop(into)] status: Signal<SubmissionStatus>) -> impl IntoView {
    view! {
        <span class=move || format!("badge badge--status badge--{}", submission_status_variant(status.get()))>
            {move || status.get().label()}
        </span>
    }
}
