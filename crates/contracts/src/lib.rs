//! Общие типы данных дашборда: заказы, заявки с форм, фильтры, KPI.

pub mod domain;
pub mod shared;
pub mod system;
