//! Self-scheduling data ingestors feeding the dashboard's display layer.

pub mod dashboard_polling;

pub use dashboard_polling::{DashboardPoller, PollerSettings};
