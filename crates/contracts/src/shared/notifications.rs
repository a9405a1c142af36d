use serde::{Deserialize, Serialize};

/// Источник уведомления
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Order,
    Submission,
}

/// Уведомление в ленте. Вычисляется при каждом монтировании,
/// сохраняется только флаг прочтения.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    /// ID исходной сущности (заказа или заявки)
    pub id: String,
    pub kind: NotificationKind,
    pub title: String,
    pub description: String,
    pub date: String,
    pub is_read: bool,
}
