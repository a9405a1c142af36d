use serde::{Deserialize, Serialize};

/// Вид сущности, у которой пользователь может менять статус
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Order,
    Submission,
}

impl EntityKind {
    /// Множественное имя, используется как пространство имён в хранилище
    pub fn plural(&self) -> &'static str {
        match self {
            EntityKind::Order => "orders",
            EntityKind::Submission => "submissions",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            EntityKind::Order => "Order",
            EntityKind::Submission => "Form submission",
        }
    }
}
