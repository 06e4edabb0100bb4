//! Summary table writer
//!
//! With quoting enabled, fields containing the delimiter, quotes or newlines
//! are quoted. With quoting disabled every field is written raw and joined
//! with commas, as the legacy format did, so an embedded comma shifts the
//! columns of that row. Both modes end every record, the last one included,
//! with a newline; the legacy output had none after the final row.

use crate::model::{SummaryRow, SUMMARY_HEADER};
use crate::{ArtifactError, ArtifactResult};
use csv::{QuoteStyle, Writer, WriterBuilder};
use std::io::Write;
use std::path::Path;

/// Writes the header and one row per summary entry to `path`
pub fn write_summary_csv(path: &Path, rows: &[SummaryRow], quote_fields: bool) -> ArtifactResult<()> {
    let to_error = |source: csv::Error| ArtifactError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let writer = summary_writer(quote_fields).from_path(path).map_err(to_error)?;
    write_rows(writer, rows).map_err(to_error)
}

/// Renders the summary table into a string
pub fn format_summary_csv(rows: &[SummaryRow], quote_fields: bool) -> Result<String, csv::Error> {
    let mut buffer = Vec::new();
    write_rows(summary_writer(quote_fields).from_writer(&mut buffer), rows)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

fn summary_writer(quote_fields: bool) -> WriterBuilder {
    let mut builder = WriterBuilder::new();
    builder.quote_style(if quote_fields {
        QuoteStyle::Necessary
    } else {
        QuoteStyle::Never
    });
    builder
}

fn write_rows<W: Write>(mut writer: Writer<W>, rows: &[SummaryRow]) -> Result<(), csv::Error> {
    writer.write_record(SUMMARY_HEADER)?;
    for row in rows {
        writer.write_record(row.to_fields())?;
    }
    writer.flush()?;
    Ok(())
}
