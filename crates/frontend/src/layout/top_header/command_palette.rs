//! Command palette (Ctrl/Cmd+K): jump to a page, an open tab or a record by id.

use crate::layout::global_context::{AppGlobalContext, Tab};
use crate::layout::tabs::{
    order_detail_key, submission_detail_key, tab_label_for_key, tab_title_for_key,
};
use crate::shared::icons::icon;
use crate::shared::seed::SeedData;
use leptos::prelude::*;

const NAVIGATION: [(&str, &str); 4] = [
    ("d400_overview", "dashboard"),
    ("d401_sales_analytics", "analytics"),
    ("a001_order", "orders"),
    ("a002_form_submission", "submissions"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaletteEntry {
    pub key: String,
    pub label: String,
    pub group: &'static str,
    pub icon: &'static str,
}

pub fn is_palette_shortcut(key: &str, ctrl: bool, meta: bool) -> bool {
    (ctrl || meta) && key.eq_ignore_ascii_case("k")
}

/// Записи палитры для запроса: навигация, открытые detail-табы, записи по id.
/// Поиск по подстроке без учёта регистра; `#` в начале запроса игнорируется.
pub fn palette_entries(seed: &SeedData, opened: &[Tab], query: &str) -> Vec<PaletteEntry> {
    let query = query.trim();
    let needle = query.to_lowercase();
    let matches = |label: &str| needle.is_empty() || label.to_lowercase().contains(&needle);

    let mut entries: Vec<PaletteEntry> = NAVIGATION
        .iter()
        .map(|&(key, icon)| PaletteEntry {
            key: key.to_string(),
            label: tab_label_for_key(key).to_string(),
            group: "Navigation",
            icon,
        })
        .filter(|e| matches(&e.label))
        .collect();

    entries.extend(
        opened
            .iter()
            .filter(|tab| !NAVIGATION.iter().any(|(key, _)| *key == tab.key))
            .filter(|tab| matches(&tab.title))
            .map(|tab| PaletteEntry {
                key: tab.key.clone(),
                label: tab.title.clone(),
                group: "Open tabs",
                icon: "copy",
            }),
    );

    let id = query.trim_start_matches('#');
    if !id.is_empty() {
        let record_entries = [
            seed.find_order(id).map(|o| (order_detail_key(&o.id), "orders")),
            seed.find_submission(id)
                .map(|s| (submission_detail_key(&s.id), "submissions")),
        ];
        for (key, icon) in record_entries.into_iter().flatten() {
            if entries.iter().all(|e| e.key != key) {
                entries.push(PaletteEntry {
                    label: tab_title_for_key(&key),
                    key,
                    group: "Records",
                    icon,
                });
            }
        }
    }

    entries
}

#[component]
pub fn CommandPalette() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");

    let open = RwSignal::new(false);
    let query = RwSignal::new(String::new());

    let show = move || {
        query.set(String::new());
        open.set(true);
    };

    let handle = window_event_listener(leptos::ev::keydown, move |ev: leptos::ev::KeyboardEvent| {
        if is_palette_shortcut(&ev.key(), ev.ctrl_key(), ev.meta_key()) {
            ev.prevent_default();
            if open.get_untracked() {
                open.set(false);
            } else {
                show();
            }
        } else if ev.key() == "Escape" && open.get_untracked() {
            open.set(false);
        }
    });
    on_cleanup(move || handle.remove());

    let entries = Memo::new(move |_| {
        let q = query.get();
        ctx.opened
            .with(|opened| ctx.with_app(|app| palette_entries(app.seed(), opened, &q)))
    });

    let run = move |entry: PaletteEntry| {
        open.set(false);
        ctx.open_tab(&entry.key, &entry.label);
    };

    view! {
        <button class="top-header__search" on:click=move |_| show() title="Search (Ctrl+K)">
            {icon("search")}
            <span>"Search..."</span>
            <kbd class="top-header__kbd">"Ctrl K"</kbd>
        </button>

        <Show when=move || open.get()>
            <div class="command-palette__backdrop" on:click=move |_| open.set(false)>
                <div class="command-palette" on:click=|ev| ev.stop_propagation()>
                    <input
                        class="command-palette__input"
                        placeholder="Type a page name or an order / submission id..."
                        autofocus=true
                        prop:value=move || query.get()
                        on:input=move |ev| query.set(event_target_value(&ev))
                        on:keydown=move |ev: leptos::ev::KeyboardEvent| {
                            if ev.key() == "Enter" {
                                if let Some(first) = entries.get_untracked().into_iter().next() {
                                    run(first);
                                }
                            }
                        }
                    />
                    <Show
                        when=move || !entries.with(|e| e.is_empty())
                        fallback=|| view! { <div class="command-palette__empty">"No results found."</div> }
                    >
                        <ul class="command-palette__list">
                            <For
                                each=move || entries.get()
                                key=|entry| entry.key.clone()
                                children=move |entry| {
                                    let label = entry.label.clone();
                                    let group = entry.group;
                                    let icon_name = entry.icon;
                                    view! {
                                        <li class="command-palette__item" on:click=move |_| run(entry.clone())>
                                            {icon(icon_name)}
                                            <span class="command-palette__label">{label}</span>
                                            <span class="command-palette__group">{group}</span>
                                        </li>
                                    }
                                }
                            />
                        </ul>
                    </Show>
                </div>
            </div>
        </Show>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::fixtures::{order, submission};
    use contracts::domain::a001_order::OrderStatus;
    use contracts::domain::a002_form_submission::SubmissionStatus;

    fn seed() -> SeedData {
        SeedData {
            orders: vec![order("1250", "2024-03-01", OrderStatus::Pending, 10.0)],
            submissions: vec![submission("5300", "2024-03-01", SubmissionStatus::New, &[])],
        }
    }

    fn keys(entries: &[PaletteEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.key.as_str()).collect()
    }

    #[test]
    fn test_shortcut() {
        assert!(is_palette_shortcut("k", true, false));
        assert!(is_palette_shortcut("K", false, true));
        assert!(!is_palette_shortcut("k", false, false));
        assert!(!is_palette_shortcut("j", true, false));
    }

    #[test]
    fn test_empty_query_lists_navigation_and_detail_tabs() {
        let opened = vec![
            Tab { key: "a001_order".into(), title: "Orders".into() },
            Tab { key: order_detail_key("1250"), title: "Order · #1250".into() },
        ];
        let entries = palette_entries(&seed(), &opened, "");
        assert_eq!(
            keys(&entries),
            vec![
                "d400_overview",
                "d401_sales_analytics",
                "a001_order",
                "a002_form_submission",
                "a001_order_detail_1250",
            ]
        );
        assert_eq!(entries[4].group, "Open tabs");
    }

    #[test]
    fn test_query_filters_by_label() {
        let entries = palette_entries(&seed(), &[], "  ORD ");
        assert_eq!(keys(&entries), vec!["a001_order"]);
        assert!(palette_entries(&seed(), &[], "nothing like this").is_empty());
    }

    #[test]
    fn test_record_ids_open_details() {
        let entries = palette_entries(&seed(), &[], "#1250");
        assert_eq!(keys(&entries), vec!["a001_order_detail_1250"]);
        assert_eq!(entries[0].label, "Order · #1250");

        let entries = palette_entries(&seed(), &[], "5300");
        assert_eq!(keys(&entries), vec!["a002_form_submission_detail_5300"]);
        assert_eq!(entries[0].group, "Records");

        assert!(palette_entries(&seed(), &[], "9999").is_empty());
    }

    #[test]
    fn test_open_record_tab_is_not_duplicated() {
        let opened = vec![Tab { key: order_detail_key("1250"), title: "Order · #1250".into() }];
        let entries = palette_entries(&seed(), &opened, "1250");
        assert_eq!(keys(&entries), vec!["a001_order_detail_1250"]);
        assert_eq!(entries[0].group, "Open tabs");
    }
}
