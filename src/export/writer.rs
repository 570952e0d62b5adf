//! CSV writers.

use super::config::ExportConfig;
use crate::error::ExportError;
use crate::patient::Patient;
use crate::queue::TriageQueue;
use crate::rank::PriorityRule;
use crate::sim::ServiceRecord;
use chrono::Utc;
use std::fs::File;
use std::path::{Path, PathBuf};

const PATIENT_HEADER: [&str; 7] = [
    "id",
    "name",
    "age",
    "severity",
    "urgency",
    "appointment_type",
    "booking_time",
];

fn patient_fields(p: &Patient) -> [String; 7] {
    [
        p.id.to_string(),
        p.name.clone(),
        p.age.to_string(),
        p.severity.to_string(),
        p.urgency.to_string(),
        p.appointment_type.clone(),
        p.booking_time_display(),
    ]
}

fn create(path: &Path) -> Result<csv::Writer<File>, ExportError> {
    Ok(csv::Writer::from_path(path)?)
}

/// Writes patients, in the given order, to `path`.
pub fn export_patients(patients: &[Patient], path: impl AsRef<Path>) -> Result<PathBuf, ExportError> {
    let path = path.as_ref();
    let mut writer = create(path)?;
    writer.write_record(PATIENT_HEADER)?;
    for p in patients {
        writer.write_record(patient_fields(p))?;
    }
    writer.flush()?;
    log::info!("exported {} patients to {}", patients.len(), path.display());
    Ok(path.to_path_buf())
}

/// Writes simulation service records, in serving order, to `path`.
/// Columns are those of [`export_patients`] plus `wait_seconds`.
pub fn export_service_record(
    records: &[ServiceRecord],
    path: impl AsRef<Path>,
) -> Result<PathBuf, ExportError> {
    let path = path.as_ref();
    let mut writer = create(path)?;
    writer.write_record(PATIENT_HEADER.iter().chain(&["wait_seconds"]))?;
    for r in records {
        let fields = patient_fields(&r.patient);
        writer.write_record(fields.iter().chain([&r.wait_seconds.to_string()]))?;
    }
    writer.flush()?;
    log::info!(
        "exported {} service records to {}",
        records.len(),
        path.display()
    );
    Ok(path.to_path_buf())
}

/// Writes the queue's current serving order to a timestamped file in
/// the configured directory.
///
/// Returns `Ok(None)` without creating a file when the queue is empty.
pub fn export_snapshot<R: PriorityRule>(
    queue: &TriageQueue<R>,
    config: &ExportConfig,
) -> Result<Option<PathBuf>, ExportError> {
    config.validate()?;
    let patients = queue.list_snapshot();
    if patients.is_empty() {
        log::debug!("queue empty, snapshot skipped");
        return Ok(None);
    }
    let path = config.snapshot_path(Utc::now().timestamp());
    export_patients(&patients, path).map(Some)
}
