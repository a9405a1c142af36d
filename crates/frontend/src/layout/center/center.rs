use super::tab::Tab;
use crate::layout::global_context::AppGlobalContext;
use leptos::prelude::*;

/// Полоса табов + контент активного таба
#[component]
pub fn Center(children: Children) -> impl IntoView {
    let tabs_store = leptos::context::use_context::<AppGlobalContext>()
        .expect("AppGlobalContext context not found");

    view! {
        <div data-zone="center" class="app-tabs" style="flex: 1; overflow: auto;">
            <div class="app-tabs__bar">
                <For
                    each=move || tabs_store.opened.get()
                    key=|tab| tab.key.clone()
                    children=|tab| view! { <Tab tab=tab /> }
                />
            </div>
            <Show when=move || tabs_store.opened.with(|tabs| tabs.is_empty())>
                <div class="app-tabs__empty">"Pick a page in the sidebar"</div>
            </Show>
            {children()}
        </div>
    }
}
