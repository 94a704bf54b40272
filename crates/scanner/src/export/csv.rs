//! CSV rows for exported scan records.
//!
//! # Format
//!
//! ```csv
//! 时间,快递,处理后
//! "14:30:01","UPS","1Z999AA10123456784"
//! ```
//!
//! The [`Full`][super::Full] schema adds the raw scanner input before the
//! processed code:
//!
//! ```csv
//! 时间,快递,原始,处理后
//! "14:30:01","FedEx","FedEx-123456789012","123456789012"
//! ```
//!
//! The header row is written bare; every data field is wrapped in `"` as is.
//! Quotes inside a field are not escaped. Every line, including the last one,
//! ends with `\n`.

use std::{fmt::Display, io::Write};

use serde::{Serialize, Serializer};

use crate::{barcode::Carrier, error::ExportResult, ledger::ScanEvent};

/// Header of the brief schema: time, carrier, processed code.
pub const HEADER_BRIEF: &str = "时间,快递,处理后";

/// Header of the full schema: time, carrier, raw input, processed code.
pub const HEADER_FULL: &str = "时间,快递,原始,处理后";

#[derive(Serialize)]
struct BriefRow<'a> {
    #[serde(serialize_with = "quoted")]
    time: &'a str,
    #[serde(serialize_with = "quoted")]
    carrier: Carrier,
    #[serde(serialize_with = "quoted")]
    processed: &'a str,
}

#[derive(Serialize)]
struct FullRow<'a> {
    #[serde(serialize_with = "quoted")]
    time: &'a str,
    #[serde(serialize_with = "quoted")]
    carrier: Carrier,
    #[serde(serialize_with = "quoted")]
    original: &'a str,
    #[serde(serialize_with = "quoted")]
    processed: &'a str,
}

impl<'a> From<&'a ScanEvent> for BriefRow<'a> {
    fn from(event: &'a ScanEvent) -> Self {
        Self {
            time: event.timestamp(),
            carrier: event.carrier(),
            processed: event.normalized_code(),
        }
    }
}

impl<'a> From<&'a ScanEvent> for FullRow<'a> {
    fn from(event: &'a ScanEvent) -> Self {
        Self {
            time: event.timestamp(),
            carrier: event.carrier(),
            original: event.raw_input(),
            processed: event.normalized_code(),
        }
    }
}

// The writer never quotes on its own, so the quotes added here are the only ones.
fn quoted<T: Display, S: Serializer>(value: &T, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(&format_args!("\"{value}\""))
}

/// Creates the CSV writer shared by one export.
pub fn writer<W: Write>(inner: W) -> ::csv::Writer<W> {
    ::csv::WriterBuilder::new()
        .has_headers(false)
        .quote_style(::csv::QuoteStyle::Never)
        .terminator(::csv::Terminator::Any(b'\n'))
        .from_writer(inner)
}

/// Writes a header line.
pub fn write_header<W: Write>(writer: &mut ::csv::Writer<W>, header: &str) -> ExportResult<()> {
    writer.write_record(header.split(','))?;
    Ok(())
}

/// Writes one event as a brief-schema row.
pub fn write_brief<W: Write>(
    writer: &mut ::csv::Writer<W>,
    event: &ScanEvent,
) -> ExportResult<()> {
    writer.serialize(BriefRow::from(event))?;
    Ok(())
}

/// Writes one event as a full-schema row.
pub fn write_full<W: Write>(
    writer: &mut ::csv::Writer<W>,
    event: &ScanEvent,
) -> ExportResult<()> {
    writer.serialize(FullRow::from(event))?;
    Ok(())
}
