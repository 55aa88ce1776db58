//! Market data models and derived computations for the FinansMakro dashboard.

pub mod feargreed;
pub mod quotes;
pub mod sectors;
pub mod sentiment;
