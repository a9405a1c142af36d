use crate::app_shell::AppShell;
use crate::layout::global_context::AppGlobalContext;
use crate::shared::app_state::AppState;
use crate::shared::components::ToastHost;
use crate::system::auth::context::AuthProvider;
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    // Provide the AppGlobalContext store to the whole app via context.
    let ctx = AppGlobalContext::new(AppState::browser());
    provide_context(ctx);
    on_cleanup(move || ctx.teardown());

    view! {
        <thaw::ConfigProvider>
            <AuthProvider>
                <AppShell />
            </AuthProvider>
            <ToastHost />
        </thaw::ConfigProvider>
    }
}
