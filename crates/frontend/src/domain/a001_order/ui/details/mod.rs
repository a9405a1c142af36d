//! Order details page (MVVM: view_model.rs holds lookup and actions)

pub mod view_model;

use self::view_model::OrderDetailsVm;
use crate::domain::a001_order::model::OrderRow;
use crate::layout::global_context::AppGlobalContext;
use crate::shared::components::ui::badge::OrderStatusBadge;
use crate::shared::detail::DetailState;
use crate::shared::date_utils::{format_datetime, format_money};
use crate::shared::icons::icon;
use contracts::domain::a001_order::{Address, OrderStatus};
use leptos::prelude::*;
use thaw::*;

#[component]
pub fn OrderDetails(id: String, #[prop(into)] on_close: Callback<()>) -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let vm = OrderDetailsVm::new(id, ctx);

    view! {
        <div class="page page--detail">
            <div class="page__header">
                <div class="page__header-left">
                    {icon("orders")}
                    <h2>{move || format!("Order #{}", vm.id.get_value())}</h2>
                    {move || vm.status().get().map(|status| view! { <OrderStatusBadge status=status /> })}
                </div>
                <div class="page__header-right">
                    <Button appearance=ButtonAppearance::Subtle on_click=move |_| vm.copy_id()>
                        {icon("copy")}
                        " Copy ID"
                    </Button>
                    <Button appearance=ButtonAppearance::Secondary on_click=move |_| on_close.run(())>
                        "Close"
                    </Button>
                </div>
            </div>

            <div class="page__content">
                {move || match vm.state.get() {
                    DetailState::NotFound(id) => view! {
                        <div class="detail-not-found">
                            <h3>"Order not found"</h3>
                            <p>{format!("There is no order with ID #{}.", id)}</p>
                        </div>
                    }
                    .into_any(),
                    DetailState::Found(row) => view! { <OrderDetailBody row=row vm=vm /> }.into_any(),
                }}
            </div>
        </div>
    }
}

#[component]
fn OrderDetailBody(row: OrderRow, vm: OrderDetailsVm) -> impl IntoView {
    let tab_button = move |key: &'static str, label: &'static str| {
        view! {
            <Button
                appearance=move || if vm.active_tab.get() == key { ButtonAppearance::Primary } else { ButtonAppearance::Subtle }
                size=ButtonSize::Small
                on_click=move |_| vm.set_tab(key)
            >
                {label}
            </Button>
        }
    };

    let files_label = if row.order.attached_files.is_empty() {
        "Files"
    } else {
        "Files *"
    };

    let general = row.clone();
    let items = row.clone();
    let addresses = row.clone();
    let files = row;

    view! {
        <div class="detail-tabs">
            {tab_button("general", "General")}
            {tab_button("items", "Items")}
            {tab_button("addresses", "Addresses")}
            {tab_button("files", files_label)}
        </div>

        <div class="detail-tab-content">
            {move || match vm.active_tab.get() {
                "items" => items_tab(&items).into_any(),
                "addresses" => addresses_tab(&addresses).into_any(),
                "files" => files_tab(&files).into_any(),
                _ => general_tab(&general, vm).into_any(),
            }}
        </div>
    }
}

fn general_tab(row: &OrderRow, vm: OrderDetailsVm) -> impl IntoView {
    let order = &row.order;
    let current = row.status;
    let seed_status = order.status;

    view! {
        <div class="detail-grid">
            <div class="detail-grid__label">"Customer"</div>
            <div class="detail-grid__value">{order.customer.name.clone()}</div>

            <div class="detail-grid__label">"Email"</div>
            <div class="detail-grid__value">{order.customer.email.clone()}</div>

            <div class="detail-grid__label">"Date"</div>
            <div class="detail-grid__value">{format_datetime(&order.date)}</div>

            <div class="detail-grid__label">"Payment"</div>
            <div class="detail-grid__value">{order.payment_method.clone()}</div>

            <div class="detail-grid__label">"Total"</div>
            <div class="detail-grid__value">
                {format!("{} {}", format_money(order.total), order.currency)}
            </div>

            <div class="detail-grid__label">"Status"</div>
            <div class="detail-grid__value">
                <select
                    class="form__select"
                    prop:value=current.as_str()
                    on:change=move |ev| {
                        match event_target_value(&ev).parse::<OrderStatus>() {
                            Ok(status) if status != current => vm.change_status(status),
                            Ok(_) => {}
                            Err(e) => log::warn!("{}", e),
                        }
                    }
                >
                    {OrderStatus::ALL
                        .iter()
                        .map(|status| view! {
                            <option value=status.as_str() selected=*status == current>
                                {status.label()}
                            </option>
                        })
                        .collect_view()}
                </select>
                {(current != seed_status).then(|| view! {
                    <span class="detail-grid__hint">
                        {format!("originally {}", seed_status.label())}
                    </span>
                })}
            </div>
        </div>

        {(!order.notes.is_empty()).then(|| view! {
            <div class="detail-notes">
                <h4>"Notes"</h4>
                <p>{order.notes.clone()}</p>
            </div>
        })}
    }
}

fn items_tab(row: &OrderRow) -> impl IntoView {
    let order = row.order.clone();
    let items_total = order.items_total();
    let extra = order.total - items_total;

    view! {
        <Table attr:style="width: 100%;">
            <TableHeader>
                <TableRow>
                    <TableHeaderCell>"Product"</TableHeaderCell>
                    <TableHeaderCell>"Category"</TableHeaderCell>
                    <TableHeaderCell>"Qty"</TableHeaderCell>
                    <TableHeaderCell>"Price"</TableHeaderCell>
                    <TableHeaderCell>"Sum"</TableHeaderCell>
                </TableRow>
            </TableHeader>
            <TableBody>
                {order
                    .items
                    .iter()
                    .cloned()
                    .map(|item| {
                        let line_total = item.line_total();
                        view! {
                        <TableRow>
                            <TableCell><TableCellLayout truncate=true>{item.name.clone()}</TableCellLayout></TableCell>
                            <TableCell><TableCellLayout>{item.category.clone()}</TableCellLayout></TableCell>
                            <TableCell><TableCellLayout>{item.quantity}</TableCellLayout></TableCell>
                            <TableCell><TableCellLayout>{format_money(item.price)}</TableCellLayout></TableCell>
                            <TableCell><TableCellLayout>{format_money(line_total)}</TableCellLayout></TableCell>
                        </TableRow>
                    }})
                    .collect_view()}
            </TableBody>
        </Table>
        <div class="detail-totals">
            <div>{format!("Items: {}", format_money(items_total))}</div>
            {(extra.abs() >= 0.005).then(|| view! {
                <div>{format!("Shipping & taxes: {}", format_money(extra))}</div>
            })}
            <div class="detail-totals__grand">{format!("Total: {}", format_money(order.total))}</div>
        </div>
    }
}

fn address_block(title: &'static str, address: &Address) -> impl IntoView {
    let lines = address.lines();
    let phone = address.phone.clone();
    view! {
        <div class="detail-address">
            <h4>{title}</h4>
            {if lines.is_empty() {
                view! { <p class="text-muted">"Not provided"</p> }.into_any()
            } else {
                lines.into_iter().map(|line| view! { <div>{line}</div> }).collect_view().into_any()
            }}
            {phone.map(|p| view! { <div class="detail-address__phone">{p}</div> })}
        </div>
    }
}

fn addresses_tab(row: &OrderRow) -> impl IntoView {
    view! {
        <div class="detail-addresses">
            {address_block("Billing address", &row.order.billing_address)}
            {address_block("Shipping address", &row.order.shipping_address)}
        </div>
    }
}

fn files_tab(row: &OrderRow) -> impl IntoView {
    let files = row.order.attached_files.clone();
    if files.is_empty() {
        return view! { <p class="text-muted">"No attached files"</p> }.into_any();
    }
    view! {
        <ul class="detail-files">
            {files
                .into_iter()
                .map(|file| view! {
                    <li>
                        {icon("paperclip")}
                        <a href=file.url target="_blank" rel="noopener">{file.name}</a>
                        {file.size.map(|s| view! { <span class="text-muted">{format!(" ({})", s)}</span> })}
                    </li>
                })
                .collect_view()}
        </ul>
    }
    .into_any()
}
