pub mod filters;
pub mod indicators;
pub mod notifications;
pub mod pagination;
