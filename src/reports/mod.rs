//! Reports module for spendlog
//!
//! The aggregation engine: windowed analytics (monthly rollups, category
//! totals, top categories, investment ROI) and the investment tracker.

pub mod analytics;
pub mod investment;
pub mod window;

pub use analytics::{
    category_totals, monthly_rollup, top_categories, AnalyticsReport, AnalyticsSummary,
    CategoryTotal, InvestmentMetrics, MonthlyBucket, DEFAULT_TOP_CATEGORIES,
};
pub use investment::{InvestmentMonth, InvestmentReport};
pub use window::{AnalyticsWindow, WindowPreset};
