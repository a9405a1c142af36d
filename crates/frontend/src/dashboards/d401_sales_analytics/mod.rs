pub mod model;
pub mod ui;

pub use ui::dashboard::SalesAnalyticsDashboard;
