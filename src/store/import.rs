//! Bulk nationality import.

use serde::{Deserialize, Serialize};
use std::io::Read;
use tracing::{info, warn};

use crate::error::{EngineError, EngineResult};

use super::EmployeeUpdates;

/// Outcome of an import.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportReport {
    /// Rows written.
    pub updated: u32,
    /// One message per row left untouched.
    pub skipped: Vec<String>,
    /// One message per row whose write failed.
    pub errors: Vec<String>,
}

/// Applies an `employee_id,nationality` CSV to the store.
///
/// The first line is a header. Data rows are numbered from 2 in messages,
/// matching what a spreadsheet shows. A row with an empty cell or an
/// unknown employee is skipped; a failed write is recorded and the import
/// carries on.
///
/// # Errors
///
/// Returns [`EngineError::ImportError`] when the CSV itself cannot be read,
/// and [`EngineError::StoreUnavailable`] when existence checks fail.
///
/// # Examples
///
/// ```
/// use staffing_match::config::ProficiencyScale;
/// use staffing_match::store::{import_nationalities, InMemoryStore, StoreSnapshot};
///
/// let store = InMemoryStore::new(StoreSnapshot::default(), ProficiencyScale::default());
/// let csv = "employee_id,nationality\nEMP-404,JP\n,TH\n";
///
/// let report = import_nationalities(&store, csv.as_bytes()).unwrap();
/// assert_eq!(report.updated, 0);
/// assert_eq!(report.skipped, vec!["Row 2: Employee EMP-404 not found", "Row 3: empty value"]);
/// ```
pub fn import_nationalities<S, R>(store: &S, input: R) -> EngineResult<ImportReport>
where
    S: EmployeeUpdates + ?Sized,
    R: Read,
{
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(input);

    reader.headers().map_err(|e| EngineError::ImportError {
        message: format!("unreadable header: {}", e),
    })?;

    let mut report = ImportReport::default();

    for (index, record) in reader.records().enumerate() {
        let row = index + 2;
        let record = record.map_err(|e| EngineError::ImportError {
            message: format!("Row {}: {}", row, e),
        })?;

        let employee_id = record.get(0).unwrap_or_default();
        let nationality = record.get(1).unwrap_or_default();

        if employee_id.is_empty() || nationality.is_empty() {
            report.skipped.push(format!("Row {}: empty value", row));
            continue;
        }

        if !store.employee_exists(employee_id)? {
            report
                .skipped
                .push(format!("Row {}: Employee {} not found", row, employee_id));
            continue;
        }

        match store.set_nationality(employee_id, nationality) {
            Ok(()) => report.updated += 1,
            Err(err) => {
                warn!(row = row, employee_id = %employee_id, error = %err, "Nationality update failed");
                report
                    .errors
                    .push(format!("Row {}: {} -> {}", row, employee_id, err));
            }
        }
    }

    info!(
        updated = report.updated,
        skipped = report.skipped.len(),
        errors = report.errors.len(),
        "Nationality import finished"
    );

    Ok(report)
}
