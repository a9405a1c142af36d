pub mod app_state;
pub mod clipboard;
pub mod components;
pub mod config;
pub mod date_utils;
pub mod detail;
pub mod export;
pub mod icons;
pub mod list_utils;
pub mod overlay;
pub mod seed;
pub mod status_channel;
pub mod storage;

#[cfg(test)]
pub(crate) mod fixtures;
