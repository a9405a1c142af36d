use crate::shared::icons::icon;
use contracts::shared::pagination::PaginationInfo;
use leptos::prelude::*;

/// PaginationControls component - reusable pagination controls (1-based pages)
#[component]
pub fn PaginationControls(
    /// Pagination metadata of the current page
    #[prop(into)]
    info: Signal<PaginationInfo>,

    /// Callback with the requested 1-based page
    on_page_change: Callback<usize>,
) -> impl IntoView {
    view! {
        <div class="pagination-controls">
            <span class="pagination-range">{move || info.get().range_label()}</span>
            <button
                class="pagination-btn"
                on:click=move |_| {
                    let current = info.get_untracked();
                    if current.has_previous() {
                        on_page_change.run(current.current_page - 1);
                    }
                }
                disabled=move || !info.get().has_previous()
                title="Previous page"
            >
                {icon("chevron-left")}
            </button>
            <span class="pagination-info">
                {move || {
                    let current = info.get();
                    format!("Page {} of {}", current.current_page, current.total_pages.max(1))
                }}
            </span>
            <button
                class="pagination-btn"
                on:click=move |_| {
                    let current = info.get_untracked();
                    if current.has_next() {
                        on_page_change.run(current.current_page + 1);
                    }
                }
                disabled=move || !info.get().has_next()
                title="Next page"
            >
                {icon("chevron-right")}
            </button>
        </div>
    }
}
