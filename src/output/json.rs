use crate::errors::Result;
use crate::output::ImportsReport;
use std::io::Write;

/// Write the report as pretty-printed JSON.
pub fn write_json<W: Write>(writer: &mut W, report: &ImportsReport) -> Result<()> {
    serde_json::to_writer_pretty(&mut *writer, report)?;
    writeln!(writer)?;
    Ok(())
}
