//! TopHeader component - application top navigation bar.
//!
//! Contains the sidebar toggle, the command palette, the notification bell,
//! the signed-in user and the logout button.

pub mod command_palette;

use crate::layout::global_context::AppGlobalContext;
use crate::shared::icons::icon;
use crate::system::auth::context::use_auth;
use crate::system::notifications::NotificationsDropdown;
use command_palette::CommandPalette;
use leptos::prelude::*;

#[component]
pub fn TopHeader() -> impl IntoView {
    let ctx =
        leptos::context::use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let auth = use_auth();

    let toggle_sidebar = move |_| ctx.toggle_left();

    let logout = move |_| {
        auth.logout();
        ctx.close_all_tabs();
    };

    let is_sidebar_visible = move || ctx.left_open.get();

    view! {
        <div class="top-header">
            <div class="top-header__brand">
                <button
                    class="top-header__icon-btn"
                    on:click=toggle_sidebar
                    title=move || if is_sidebar_visible() { "Hide navigation" } else { "Show navigation" }
                >
                    {icon("menu")}
                </button>
                <span class="top-header__title">"Laguna Dashboard"</span>
            </div>

            <div class="top-header__actions">
                <CommandPalette />
                <NotificationsDropdown />

                <div class="top-header__user">
                    <span class="top-header__avatar">
                        {move || auth.user.get().map(|u| u.initial()).unwrap_or_default()}
                    </span>
                    <span>
                        {move || auth.user.get().map(|u| u.name).unwrap_or_else(|| "Guest".to_string())}
                    </span>
                </div>

                <button class="top-header__icon-btn" on:click=logout title="Sign out">
                    {icon("logout")}
                </button>
            </div>
        </div>
    }
}
