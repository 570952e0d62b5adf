//! CSV export of queue snapshots and simulation records.
//!
//! Writers create (or truncate) the target file and return its path.
//! Writes are not atomic; on failure a partial file may remain.

mod config;
mod writer;

pub use config::ExportConfig;
pub use writer::{export_patients, export_service_record, export_snapshot};
