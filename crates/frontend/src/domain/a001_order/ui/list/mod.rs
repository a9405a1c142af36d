pub mod state;
pub mod view_model;

use self::state::{create_state, persist_state};
use self::view_model::{derive_order_list, item_categories};
use crate::layout::global_context::{AppGlobalContext, ToastKind};
use crate::layout::tabs::{order_detail_key, tab_title_for_key};
use crate::shared::components::ui::badge::{Badge, OrderStatusBadge};
use crate::shared::components::PaginationControls;
use crate::shared::date_utils::{format_date, format_money};
use crate::shared::export::export_to_csv;
use crate::shared::icons::icon;
use crate::shared::list_utils::{get_sort_indicator, highlight_matches, SearchInput};
use contracts::domain::a001_order::OrderStatus;
use leptos::prelude::*;
use thaw::*;

#[component]
pub fn OrderList() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");

    let state = ctx.with_app(create_state);
    let categories = ctx.with_app(|app| item_categories(&app.seed().orders));

    // Фильтры/сортировка/страница переживают перезагрузку
    Effect::new(move |_| {
        state.track();
        ctx.with_app(|app| persist_state(app, state));
    });

    let page = Memo::new(move |_| {
        ctx.track_statuses();
        let current = state.get();
        ctx.with_app(|app| {
            derive_order_list(
                &app.seed().orders,
                app.overlay(),
                &current.to_query(app.config().list.page_size),
            )
        })
    });

    let toggle_sort = move |field: &'static str| {
        state.update(|s| {
            if s.sort_field == field {
                s.sort_ascending = !s.sort_ascending;
            } else {
                s.sort_field = field.to_string();
                s.sort_ascending = true;
            }
            s.page = 1;
        });
    };

    let sort_mark = move |field: &'static str| {
        state.with(|s| get_sort_indicator(&s.sort_field, field, s.sort_ascending))
    };

    let open_detail = move |id: String| {
        let key = order_detail_key(&id);
        ctx.open_tab(&key, &tab_title_for_key(&key));
    };

    let mark_processing = move |id: String| {
        match ctx.with_app(|app| app.change_order_status(&id, OrderStatus::Processing)) {
            Ok(()) => ctx.notify(ToastKind::Success, format!("Order #{} is now processing", id)),
            Err(e) => ctx.notify(ToastKind::Error, e),
        }
    };

    let export = move |_| {
        let result = page.with_untracked(|p| export_to_csv(&p.filtered, "orders.csv"));
        match result {
            Ok(()) => ctx.notify(ToastKind::Success, "Orders exported"),
            Err(e) => {
                log::warn!("Order export failed: {}", e);
                ctx.notify(ToastKind::Error, e.to_string());
            }
        }
    };

    let reset_filters = move |_| {
        state.update(|s| {
            s.filter = Default::default();
            s.page = 1;
        });
    };

    let search = Signal::derive(move || state.with(|s| s.filter.search.clone()));

    view! {
        <div class="page page--list">
            <div class="page__header">
                <div class="page__header-left">
                    {icon("orders")}
                    <h1 class="page__title">"Orders"</h1>
                    <Badge variant="primary">
                        {move || page.with(|p| p.pagination.total_items.to_string())}
                    </Badge>
                </div>
                <div class="page__header-right">
                    <Button appearance=ButtonAppearance::Secondary on_click=export>
                        {icon("download")}
                        " Export CSV"
                    </Button>
                </div>
            </div>

            <div class="page__content">
                <div class="filter-panel">
                    <Flex gap=FlexGap::Small align=FlexAlign::End>
                        <SearchInput
                            value=search
                            on_change=Callback::new(move |value: String| {
                                state.update(|s| {
                                    s.filter.search = value;
                                    s.page = 1;
                                });
                            })
                            placeholder="Search by ID, customer or email..."
                        />

                        <select
                            class="form__select"
                            on:change=move |ev| {
                                let value = event_target_value(&ev);
                                state.update(|s| {
                                    s.filter.status = (!value.is_empty()).then_some(value);
                                    s.page = 1;
                                });
                            }
                            prop:value=move || state.with(|s| s.filter.status.clone().unwrap_or_default())
                        >
                            <option value="">"All statuses"</option>
                            {OrderStatus::ALL
                                .iter()
                                .map(|status| view! { <option value=status.as_str()>{status.label()}</option> })
                                .collect_view()}
                        </select>

                        <select
                            class="form__select"
                            on:change=move |ev| {
                                let value = event_target_value(&ev);
                                state.update(|s| {
                                    s.filter.category = (!value.is_empty()).then_some(value);
                                    s.page = 1;
                                });
                            }
                            prop:value=move || state.with(|s| s.filter.category.clone().unwrap_or_default())
                        >
                            <option value="">"All categories"</option>
                            {categories
                                .into_iter()
                                .map(|category| view! { <option value=category.clone()>{category.clone()}</option> })
                                .collect_view()}
                        </select>

                        <label class="form__label">"From:"</label>
                        <input
                            type="date"
                            class="form__input"
                            prop:value=move || state.with(|s| s.filter.date_from.clone())
                            on:change=move |ev| {
                                let value = event_target_value(&ev);
                                state.update(|s| {
                                    s.filter.date_from = value;
                                    s.page = 1;
                                });
                            }
                        />
                        <label class="form__label">"To:"</label>
                        <input
                            type="date"
                            class="form__input"
                            prop:value=move || state.with(|s| s.filter.date_to.clone())
                            on:change=move |ev| {
                                let value = event_target_value(&ev);
                                state.update(|s| {
                                    s.filter.date_to = value;
                                    s.page = 1;
                                });
                            }
                        />

                        <Button
                            appearance=ButtonAppearance::Subtle
                            on_click=reset_filters
                            disabled=Signal::derive(move || state.with(|s| s.filter.is_empty()))
                        >
                            "Reset"
                        </Button>
                    </Flex>
                </div>

                <div class="list-summary">
                    {move || {
                        page.with(|p| {
                            p.status_counts
                                .iter()
                                .map(|(status, count)| {
                                    let status = *status;
                                    view! {
                                        <span
                                            class="list-summary__chip"
                                            on:click=move |_| state.update(|s| {
                                                s.filter.status = Some(status.as_str().to_string());
                                                s.page = 1;
                                            })
                                        >
                                            {format!("{}: {}", status.label(), count)}
                                        </span>
                                    }
                                })
                                .collect_view()
                        })
                    }}
                    <span class="list-summary__total">
                        {move || format!("Total: {}", page.with(|p| format_money(p.filtered_total_amount)))}
                    </span>
                </div>

                <div class="table-wrapper">
                    <Table attr:style="width: 100%;">
                        <TableHeader>
                            <TableRow>
                                <TableHeaderCell resizable=false min_width=90.0>
                                    <div class="table__sortable-header" on:click=move |_| toggle_sort("id")>
                                        "Order" <span>{move || sort_mark("id")}</span>
                                    </div>
                                </TableHeaderCell>
                                <TableHeaderCell resizable=false min_width=110.0>
                                    <div class="table__sortable-header" on:click=move |_| toggle_sort("date")>
                                        "Date" <span>{move || sort_mark("date")}</span>
                                    </div>
                                </TableHeaderCell>
                                <TableHeaderCell resizable=false min_width=200.0>
                                    <div class="table__sortable-header" on:click=move |_| toggle_sort("customer")>
                                        "Customer" <span>{move || sort_mark("customer")}</span>
                                    </div>
                                </TableHeaderCell>
                                <TableHeaderCell resizable=false min_width=110.0>
                                    <div class="table__sortable-header" on:click=move |_| toggle_sort("status")>
                                        "Status" <span>{move || sort_mark("status")}</span>
                                    </div>
                                </TableHeaderCell>
                                <TableHeaderCell resizable=false min_width=100.0>
                                    <div class="table__sortable-header" on:click=move |_| toggle_sort("total")>
                                        "Total" <span>{move || sort_mark("total")}</span>
                                    </div>
                                </TableHeaderCell>
                                <TableHeaderCell resizable=false min_width=140.0>"Actions"</TableHeaderCell>
                            </TableRow>
                        </TableHeader>

                        <TableBody>
                            <For
                                each=move || page.with(|p| p.rows.clone())
                                key=|row| (row.order.id.clone(), row.status)
                                children=move |row| {
                                    let id = row.order.id.clone();
                                    let id_for_open = id.clone();
                                    let id_for_action = id.clone();
                                    let status = row.status;
                                    let overridden = row.is_overridden();
                                    let label = format!("#{}", id);
                                    let customer = row.order.customer.name.clone();
                                    let email = row.order.customer.email.clone();
                                    view! {
                                        <TableRow>
                                            <TableCell>
                                                <TableCellLayout>
                                                    <a href="#" class="table__link"
                                                        on:click=move |e| {
                                                            e.prevent_default();
                                                            open_detail(id_for_open.clone());
                                                        }
                                                    >
                                                        {move || highlight_matches(&label, &search.get())}
                                                    </a>
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>{format_date(&row.order.date)}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout truncate=true>
                                                    <div class="table__primary">{move || highlight_matches(&customer, &search.get())}</div>
                                                    <div class="table__secondary">{move || highlight_matches(&email, &search.get())}</div>
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>
                                                    <OrderStatusBadge status=status />
                                                    {overridden.then(|| view! {
                                                        <span class="table__hint" title="Changed in this browser">"*"</span>
                                                    })}
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>
                                                    <span class="table__money">{format_money(row.order.total)}</span>
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>
                                                    {(status == OrderStatus::Pending).then(|| view! {
                                                        <Button
                                                            appearance=ButtonAppearance::Subtle
                                                            size=ButtonSize::Small
                                                            on_click=move |_| mark_processing(id_for_action.clone())
                                                        >
                                                            "Mark as processing"
                                                        </Button>
                                                    })}
                                                </TableCellLayout>
                                            </TableCell>
                                        </TableRow>
                                    }
                                }
                            />
                        </TableBody>
                    </Table>

                    <Show when=move || page.with(|p| p.rows.is_empty())>
                        <div class="table__empty">"No orders match the current filters"</div>
                    </Show>
                </div>

                <PaginationControls
                    info=Signal::derive(move || page.with(|p| p.pagination))
                    on_page_change=Callback::new(move |new_page: usize| state.update(|s| s.page = new_page))
                />
            </div>
        </div>
    }
}
