use crate::error::SimulationError;
use crate::shared_data::CrossingRecord;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Writes crossing records as CSV, header first.
pub fn write_crossings<W: Write>(writer: W, records: &[CrossingRecord]) -> Result<(), SimulationError> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(true)
        .from_writer(writer);
    for record in records {
        wtr.serialize(record)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Replaces `path` with the crossing log of this run.
pub fn write_crossings_csv(path: &Path, records: &[CrossingRecord]) -> Result<(), SimulationError> {
    let file = File::create(path)?;
    write_crossings(file, records)?;
    log::info!("Wrote {} crossings to {}", records.len(), path.display());
    Ok(())
}
