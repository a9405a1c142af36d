//! ViewModel for order details

use crate::domain::a001_order::model::OrderRow;
use crate::layout::global_context::{AppGlobalContext, ToastKind};
use crate::shared::app_state::AppState;
use crate::shared::clipboard::copy_to_clipboard;
use crate::shared::detail::DetailState;
use contracts::domain::a001_order::OrderStatus;
use leptos::prelude::*;

pub fn order_detail_state(app: &AppState, id: &str) -> DetailState<OrderRow> {
    match app.order(id) {
        Some(row) => DetailState::Found(row),
        None => {
            log::warn!("Order #{} not found", id);
            DetailState::NotFound(id.to_string())
        }
    }
}

#[derive(Clone, Copy)]
pub struct OrderDetailsVm {
    pub id: StoredValue<String>,
    pub state: Memo<DetailState<OrderRow>>,
    pub active_tab: RwSignal<&'static str>,
    ctx: AppGlobalContext,
}

impl OrderDetailsVm {
    pub fn new(id: String, ctx: AppGlobalContext) -> Self {
        let stored_id = StoredValue::new(id);
        let state = Memo::new(move |_| {
            ctx.track_statuses();
            let id = stored_id.get_value();
            ctx.with_app(|app| order_detail_state(app, &id))
        });

        Self {
            id: stored_id,
            state,
            active_tab: RwSignal::new("general"),
            ctx,
        }
    }

    pub fn set_tab(&self, tab: &'static str) {
        self.active_tab.set(tab);
    }

    pub fn status(&self) -> Signal<Option<OrderStatus>> {
        let state = self.state;
        Signal::derive(move || state.with(|s| s.found().map(|row| row.status)))
    }

    pub fn change_status(&self, status: OrderStatus) {
        let id = self.id.get_value();
        let result = self.ctx.with_app(|app| app.change_order_status(&id, status));
        match result {
            Ok(()) => self.ctx.notify(
                ToastKind::Success,
                format!("Order #{} marked as {}", id, status.label()),
            ),
            Err(e) => self.ctx.notify(ToastKind::Error, e),
        }
    }

    pub fn copy_id(&self) {
        let id = self.id.get_value();
        let ctx = self.ctx;
        copy_to_clipboard(&id, move |result| match result {
            Ok(()) => ctx.notify(ToastKind::Success, "Order ID copied"),
            Err(e) => ctx.notify(ToastKind::Error, e),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::config::DashboardConfig;
    use crate::shared::fixtures::order;
    use crate::shared::seed::SeedData;
    use crate::shared::storage::KeyValueStore;
    use std::sync::Arc;

    #[test]
    fn test_lookup_found_and_not_found() {
        let seed = SeedData {
            orders: vec![order("42", "2024-01-02", OrderStatus::Pending, 20.0)],
            submissions: vec![],
        };
        let app = AppState::new(DashboardConfig::default(), Arc::new(seed), KeyValueStore::memory());
        app.change_order_status("42", OrderStatus::Completed).unwrap();

        match order_detail_state(&app, "42") {
            DetailState::Found(row) => assert_eq!(row.status, OrderStatus::Completed),
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(
            order_detail_state(&app, "nope"),
            DetailState::NotFound("nope".to_string())
        );
    }
}
