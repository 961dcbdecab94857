//! CSV extraction step: flat file → [`RawTable`].

use std::path::Path;

use crate::error::PipelineError;
use crate::table::RawTable;

/// Read a CSV file into a [`RawTable`].
///
/// Headers are whitespace-trimmed. A missing file or a record with an
/// inconsistent field count is a [`PipelineError::Parse`] carrying the path;
/// no schema validation happens beyond what the parser enforces.
pub fn read_csv(path: &Path) -> Result<RawTable, PipelineError> {
    let context = path.display().to_string();

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_path(path)
        .map_err(|e| PipelineError::parse(&context, e.to_string()))?;

    let headers = reader
        .headers()
        .map_err(|e| PipelineError::parse(&context, e.to_string()))?
        .clone();

    let mut table = RawTable::new(headers.iter());

    for (line, record) in reader.records().enumerate() {
        let record = record.map_err(|e| PipelineError::parse(&context, e.to_string()))?;
        table
            .push_row(record.iter().map(|s| s.to_string()).collect())
            .map_err(|e| match e {
                PipelineError::Parse { reason, .. } => {
                    PipelineError::parse(format!("{}, record {}", context, line + 1), reason)
                }
                other => other,
            })?;
    }

    Ok(table)
}
