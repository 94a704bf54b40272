//! CSV export of the scan ledger.
//!
//! Two column schemas are supported, selected at compile time through the
//! marker types [`Brief`] and [`Full`], or at runtime through [`Schema`].
//!
//! # Example
//!
//! ```
//! use jiff::civil::{date, time};
//! use scanner::{barcode::Carrier, export::{self, Schema}, ledger::ScanEvent};
//!
//! let events = [ScanEvent::scan("123456789012", Carrier::Sf, time(9, 30, 0, 0)).unwrap()];
//!
//! let text = export::to_csv(&events, Schema::Brief)?;
//! assert_eq!(text, "时间,快递,处理后\n\"09:30:00\",\"顺丰\",\"SF123456789012\"\n");
//!
//! assert_eq!(export::file_name(date(2025, 3, 7), Schema::Full), "03072025_TrackingNumber_Full.csv");
//! # Ok::<(), scanner::error::ExportError>(())
//! ```

pub mod csv;
mod writer;

use std::io::Write;

use jiff::civil::Date;
use tracing::debug;
pub use writer::ExportWriter;

pub use self::csv::{HEADER_BRIEF, HEADER_FULL};
use crate::{
    error::{ExportError, ExportResult},
    ledger::ScanEvent,
    sink::{Location, Sink},
};

/// Date format used in export file names.
pub const FILE_DATE_FORMAT: &str = "%m%d%Y";

/// Marker type for the brief schema (time, carrier, processed code).
#[derive(Debug, Clone, Copy, Default)]
pub struct Brief;

/// Marker type for the full schema (time, carrier, raw input, processed code).
#[derive(Debug, Clone, Copy, Default)]
pub struct Full;

/// Trait for writing CSV rows of a given schema.
///
/// Implemented by the marker types [`Brief`] and [`Full`].
pub trait ExportSchema {
    /// Writes the header line of this schema.
    fn write_header<W: Write>(writer: &mut ::csv::Writer<W>) -> ExportResult<()>;

    /// Writes a single event as one row.
    fn write_one<W: Write>(writer: &mut ::csv::Writer<W>, event: &ScanEvent) -> ExportResult<()>;
}

impl ExportSchema for Brief {
    fn write_header<W: Write>(writer: &mut ::csv::Writer<W>) -> ExportResult<()> {
        csv::write_header(writer, HEADER_BRIEF)
    }

    fn write_one<W: Write>(writer: &mut ::csv::Writer<W>, event: &ScanEvent) -> ExportResult<()> {
        csv::write_brief(writer, event)
    }
}

impl ExportSchema for Full {
    fn write_header<W: Write>(writer: &mut ::csv::Writer<W>) -> ExportResult<()> {
        csv::write_header(writer, HEADER_FULL)
    }

    fn write_one<W: Write>(writer: &mut ::csv::Writer<W>, event: &ScanEvent) -> ExportResult<()> {
        csv::write_full(writer, event)
    }
}

/// Schema enum for runtime selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Schema {
    /// Time, carrier, processed code.
    #[default]
    Brief,
    /// Time, carrier, raw input, processed code.
    Full,
}

impl Schema {
    /// Picks the schema from the "include original input" flag.
    #[must_use]
    pub const fn from_include_original(include_original: bool) -> Self {
        if include_original { Self::Full } else { Self::Brief }
    }

    #[must_use]
    pub const fn includes_original(&self) -> bool {
        matches!(self, Self::Full)
    }

    /// File name suffix before `.csv`.
    #[must_use]
    pub const fn suffix(&self) -> &'static str {
        match self {
            Self::Brief => "",
            Self::Full => "_Full",
        }
    }
}

/// An encoded export ready to be handed to a [`Sink`][crate::sink::Sink].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    /// `<MMDDYYYY>_TrackingNumber[_Full].csv`
    pub file_name: String,
    /// UTF-8 encoded CSV text.
    pub content: Vec<u8>,
    /// Number of data rows.
    pub records: usize,
}

impl ExportArtifact {
    /// Hands the file to `sink`; the sink's failure is returned unchanged.
    pub fn persist(&self, sink: &impl Sink) -> ExportResult<Location> {
        Ok(sink.persist(&self.file_name, &self.content)?)
    }
}

/// Serializes events into CSV text with the given schema.
///
/// Rows keep the order of `events`. Fails with
/// [`ExportError::EmptyDataset`] when there is nothing to write.
pub fn to_csv<'a>(
    events: impl IntoIterator<Item = &'a ScanEvent>,
    schema: Schema,
) -> ExportResult<String> {
    encode(events, schema).map(|(text, _)| text)
}

/// Encodes events and names the file after `date`.
pub fn export<'a>(
    events: impl IntoIterator<Item = &'a ScanEvent>,
    schema: Schema,
    date: Date,
) -> ExportResult<ExportArtifact> {
    let (text, records) = encode(events, schema)?;
    let file_name = file_name(date, schema);
    debug!(%file_name, records, bytes = text.len(), "export encoded");

    Ok(ExportArtifact { file_name, content: text.into_bytes(), records })
}

/// Export file name: `<MMDDYYYY>_TrackingNumber[_Full].csv`.
#[must_use]
pub fn file_name(date: Date, schema: Schema) -> String {
    format!("{}_TrackingNumber{}.csv", date.strftime(FILE_DATE_FORMAT), schema.suffix())
}

fn encode<'a>(
    events: impl IntoIterator<Item = &'a ScanEvent>,
    schema: Schema,
) -> ExportResult<(String, usize)> {
    let mut events = events.into_iter().peekable();
    if events.peek().is_none() {
        return Err(ExportError::EmptyDataset);
    }

    match schema {
        Schema::Brief => encode_typed::<Brief>(events),
        Schema::Full => encode_typed::<Full>(events),
    }
}

fn encode_typed<'a, S: ExportSchema>(
    events: impl Iterator<Item = &'a ScanEvent>,
) -> ExportResult<(String, usize)> {
    let mut writer = ExportWriter::<_, S>::new(Vec::new())?;
    writer.write_all(events)?;

    let (bytes, records) = writer.finish()?;
    Ok((String::from_utf8(bytes)?, records))
}

#[cfg(test)]
mod tests {
    use jiff::civil::{date, time};

    use super::*;
    use crate::barcode::Carrier;

    fn e1() -> ScanEvent {
        ScanEvent::scan("1Z999AA10123456784", Carrier::Ups, time(10, 0, 1, 0)).unwrap()
    }

    fn e2() -> ScanEvent {
        ScanEvent::scan("FedEx-123456789012", Carrier::FedEx, time(10, 0, 2, 0)).unwrap()
    }

    /// Разбирает CSV обратно, чтобы проверить число и порядок полей.
    fn parse_rows(text: &str) -> Vec<Vec<String>> {
        ::csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(text.as_bytes())
            .records()
            .map(|r| r.unwrap().iter().map(str::to_string).collect())
            .collect()
    }

    #[test]
    fn test_empty_dataset_fails_for_both_schemas() {
        let events: Vec<ScanEvent> = Vec::new();
        for schema in [Schema::Brief, Schema::Full] {
            let result = to_csv(&events, schema);
            assert!(matches!(result, Err(ExportError::EmptyDataset)), "{schema:?}");
        }
    }

    #[test]
    fn test_brief_export_lines_and_order() {
        let text = to_csv(&[e1(), e2()], Schema::Brief).unwrap();

        assert_eq!(text.lines().count(), 3);
        assert!(text.ends_with('\n'));
        assert_eq!(text.lines().next(), Some(HEADER_BRIEF));

        let rows = parse_rows(&text);
        assert_eq!(rows, [
            ["10:00:01", "UPS", "1Z999AA10123456784"],
            ["10:00:02", "FedEx", "123456789012"],
        ]);
        for line in text.lines().skip(1) {
            assert_eq!(line.matches('"').count(), 6);
        }
    }

    #[test]
    fn test_full_export_has_four_fields() {
        let text = to_csv(&[e2()], Schema::Full).unwrap();

        assert_eq!(
            text,
            "时间,快递,原始,处理后\n\"10:00:02\",\"FedEx\",\"FedEx-123456789012\",\"123456789012\"\n"
        );
        assert_eq!(parse_rows(&text), [["10:00:02", "FedEx", "FedEx-123456789012", "123456789012"]]);
    }

    #[test]
    fn test_quotes_in_raw_input_are_not_doubled() {
        let event = ScanEvent::scan("say \"hi\"", Carrier::Generic, time(1, 2, 3, 0)).unwrap();
        let text = to_csv(&[event], Schema::Full).unwrap();

        assert_eq!(
            text,
            "时间,快递,原始,处理后\n\"01:02:03\",\"通用\",\"say \"hi\"\",\"say \"hi\"\"\n"
        );
    }

    #[test]
    fn test_export_artifact() {
        let artifact = export(&[e1(), e2()], Schema::Full, date(2024, 12, 31)).unwrap();

        assert_eq!(artifact.file_name, "12312024_TrackingNumber_Full.csv");
        assert_eq!(artifact.records, 2);
        assert!(artifact.content.starts_with(HEADER_FULL.as_bytes()));
    }

    #[test]
    fn test_file_names() {
        assert_eq!(file_name(date(2025, 1, 2), Schema::Brief), "01022025_TrackingNumber.csv");
        assert_eq!(file_name(date(2025, 1, 2), Schema::Full), "01022025_TrackingNumber_Full.csv");
    }

    #[test]
    fn test_schema_from_flag() {
        assert_eq!(Schema::from_include_original(false), Schema::Brief);
        assert_eq!(Schema::from_include_original(true), Schema::Full);
        assert!(Schema::Full.includes_original());
    }
}
