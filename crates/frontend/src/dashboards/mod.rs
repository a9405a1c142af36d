pub mod d400_overview;
pub mod d401_sales_analytics;

pub use d400_overview::OverviewDashboard;
pub use d401_sales_analytics::SalesAnalyticsDashboard;
