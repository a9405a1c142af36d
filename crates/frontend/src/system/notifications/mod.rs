pub mod dropdown;
pub mod feed;

pub use dropdown::NotificationsDropdown;
