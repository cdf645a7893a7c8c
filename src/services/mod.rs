//! Service layer for dashboard generation
//!
//! Services encapsulate building dashboards from the catalog and writing
//! them to disk.

pub mod generator;
pub mod writer;

pub use generator::{GeneratedDashboard, Generator};
pub use writer::DashboardWriter;
