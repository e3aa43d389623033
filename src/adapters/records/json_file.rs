//! Loads a record set from a JSON file on disk. Read-only: nothing is ever
//! written back.

use super::memory::InMemoryRecords;
use crate::domain::DomainError;
use std::path::Path;
use tokio::fs;
use tracing::info;

/// Read, parse and validate the record file at `path`.
pub async fn load_records(path: impl AsRef<Path>) -> Result<InMemoryRecords, DomainError> {
    let path = path.as_ref();
    let json = fs::read_to_string(path)
        .await
        .map_err(|e| DomainError::Records(format!("read {}: {}", path.display(), e)))?;
    let records = InMemoryRecords::from_json_str(&json)?;
    info!(
        path = %path.display(),
        students = records.students.len(),
        assessments = records.assessments.len(),
        content = records.content.len(),
        "records loaded"
    );
    Ok(records)
}
