use crate::shared::overlay::{OverlayKind, StatusOverlay};
use chrono::NaiveDateTime;
use contracts::domain::a001_order::{Order, OrderStatus};
use contracts::domain::common::parse_timestamp;

/// Заказ из seed вместе с эффективным статусом (overlay поверх seed)
#[derive(Debug, Clone, PartialEq)]
pub struct OrderRow {
    pub order: Order,
    pub status: OrderStatus,
}

impl OrderRow {
    pub fn id(&self) -> &str {
        &self.order.id
    }

    /// Статус изменён пользователем
    pub fn is_overridden(&self) -> bool {
        self.status != self.order.status
    }

    pub fn timestamp(&self) -> Option<NaiveDateTime> {
        parse_timestamp(&self.order.date)
    }
}

/// Merge step: every seed order with its effective status, seed order kept.
pub fn merge_orders(orders: &[Order], overlay: &StatusOverlay) -> Vec<OrderRow> {
    orders
        .iter()
        .map(|order| OrderRow {
            status: overlay.effective_status(OverlayKind::Orders, &order.id, order.status),
            order: order.clone(),
        })
        .collect()
}

pub fn find_order(orders: &[Order], overlay: &StatusOverlay, id: &str) -> Option<OrderRow> {
    orders.iter().find(|o| o.id == id).map(|order| OrderRow {
        status: overlay.effective_status(OverlayKind::Orders, &order.id, order.status),
        order: order.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::fixtures::order;
    use crate::shared::storage::KeyValueStore;

    #[test]
    fn test_overlay_wins_over_seed() {
        let overlay = StatusOverlay::new(KeyValueStore::memory(), "laguna");
        let orders = vec![
            order("41", "2024-01-01", OrderStatus::Completed, 10.0),
            order("42", "2024-01-02", OrderStatus::Pending, 20.0),
        ];
        overlay.set_status(OverlayKind::Orders, "42", "processing");

        let rows = merge_orders(&orders, &overlay);
        assert_eq!(rows[0].status, OrderStatus::Completed);
        assert!(!rows[0].is_overridden());
        assert_eq!(rows[1].status, OrderStatus::Processing);
        assert_eq!(rows[1].order.status, OrderStatus::Pending);
        assert!(rows[1].is_overridden());
    }

    #[test]
    fn test_find_order() {
        let overlay = StatusOverlay::new(KeyValueStore::memory(), "laguna");
        let orders = vec![order("42", "2024-01-02", OrderStatus::Pending, 20.0)];
        overlay.set_status(OverlayKind::Orders, "42", "cancelled");
        let row = find_order(&orders, &overlay, "42").unwrap();
        assert_eq!(row.status, OrderStatus::Cancelled);
        assert_eq!(find_order(&orders, &overlay, "7"), None);
    }
}
