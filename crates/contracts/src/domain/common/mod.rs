//! Common types shared by all entity kinds

pub mod entity_kind;
pub mod timestamp;

// Re-exports
pub use entity_kind::EntityKind;
pub use timestamp::{parse_record_date, parse_timestamp};
