use crate::output::ImportsReport;
use std::io::Write;

/// Write one canonical import path per line.
pub fn write_text<W: Write>(writer: &mut W, report: &ImportsReport) -> std::io::Result<()> {
    for path in &report.imports {
        writeln!(writer, "{path}")?;
    }
    Ok(())
}
