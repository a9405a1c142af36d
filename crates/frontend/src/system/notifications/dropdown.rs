//! NotificationsDropdown - колокольчик в верхней панели.
//!
//! Лента пересчитывается при любом изменении статусов или флагов прочтения
//! (через `status_revision`).

use super::feed::{current_feed, mark_all_as_read, mark_as_read, unread_count};
use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::{order_detail_key, submission_detail_key, tab_title_for_key};
use crate::shared::date_utils::format_datetime;
use crate::shared::icons::icon;
use contracts::shared::notifications::{Notification, NotificationKind};
use leptos::prelude::*;

#[component]
pub fn NotificationsDropdown() -> impl IntoView {
    let ctx =
        leptos::context::use_context::<AppGlobalContext>().expect("AppGlobalContext not found");

    let is_open = RwSignal::new(false);

    let feed = Memo::new(move |_| {
        ctx.track_statuses();
        ctx.with_app(current_feed)
    });
    let unread = move || feed.with(|f| unread_count(f));

    let toggle_dropdown = move |_| {
        is_open.update(|open| *open = !*open);
    };

    let open_entry = move |n: Notification| {
        ctx.with_app(|app| mark_as_read(app, n.kind, &n.id));
        let key = match n.kind {
            NotificationKind::Order => order_detail_key(&n.id),
            NotificationKind::Submission => submission_detail_key(&n.id),
        };
        ctx.open_tab(&key, &tab_title_for_key(&key));
        is_open.set(false);
    };

    let mark_all = move |_| {
        let entries = feed.get_untracked();
        ctx.with_app(|app| mark_all_as_read(app, &entries));
    };

    view! {
        <div class="notifications-dropdown">
            <button
                class="top-header__icon-btn notifications-dropdown__trigger"
                on:click=toggle_dropdown
                title="Notifications"
            >
                {icon("bell")}
                <Show when=move || { unread() > 0 }>
                    <span class="notifications-dropdown__badge">{unread}</span>
                </Show>
            </button>

            <Show when=move || is_open.get()>
                <div class="notifications-dropdown__menu">
                    <div class="notifications-dropdown__header">
                        <span>"Notifications"</span>
                        <button
                            class="notifications-dropdown__mark-all"
                            on:click=mark_all
                            disabled=move || unread() == 0
                        >
                            {icon("check")}
                            " Mark all as read"
                        </button>
                    </div>
                    {move || {
                        let entries = feed.get();
                        if entries.is_empty() {
                            view! {
                                <div class="notifications-dropdown__empty">"No notifications"</div>
                            }
                            .into_any()
                        } else {
                            entries
                                .into_iter()
                                .map(|n| {
                                    let is_read = n.is_read;
                                    let glyph = match n.kind {
                                        NotificationKind::Order => icon("orders"),
                                        NotificationKind::Submission => icon("submissions"),
                                    };
                                    let title = n.title.clone();
                                    let description = n.description.clone();
                                    let date = format_datetime(&n.date);
                                    view! {
                                        <div
                                            class="notifications-dropdown__item"
                                            class:notifications-dropdown__item--unread=!is_read
                                            on:click=move |_| open_entry(n.clone())
                                        >
                                            <span class="notifications-dropdown__icon">{glyph}</span>
                                            <div class="notifications-dropdown__text">
                                                <span class="notifications-dropdown__title">{title}</span>
                                                <span class="notifications-dropdown__description">{description}</span>
                                                <span class="notifications-dropdown__date">{date}</span>
                                            </div>
                                        </div>
                                    }
                                })
                                .collect_view()
                                .into_any()
                        }
                    }}
                </div>
            </Show>
        </div>
    }
}
