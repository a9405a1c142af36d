use leptos::prelude::*;

use super::context::use_auth;

/// Shows `children` for a signed-in user, `fallback` otherwise
#[component]
pub fn RequireAuth(#[prop(into)] fallback: ViewFn, children: ChildrenFn) -> impl IntoView {
    let auth = use_auth();

    view! {
        <Show when=move || auth.is_authenticated() fallback=fallback>
            {children()}
        </Show>
    }
}
