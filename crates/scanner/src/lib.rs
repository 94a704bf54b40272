//! Ядро сканера курьерских штрихкодов.
//!
//! Крейт проверяет и нормализует штрихкоды по правилам курьерских служб,
//! накапливает принятые сканирования в журнале и выгружает журнал в CSV:
//!
//! - [`barcode`] — службы и правила классификации
//! - [`ledger`] — журнал сканирований и статистика
//! - [`export`] — CSV в двух схемах колонок и имя файла
//! - [`sink`] — сохранение файла в каталог с запасным вариантом
//! - [`session`] — сессия, связывающая всё вместе
//!
//! # Быстрый старт
//!
//! ```
//! use jiff::civil::{date, time};
//! use scanner::prelude::*;
//!
//! let mut session = Session::new(Carrier::FedEx);
//! let event = session.scan_at("FedEx-123456789012", time(16, 20, 0, 0)).unwrap();
//! assert_eq!(event.normalized_code(), "123456789012");
//!
//! let artifact = session.export_on(Schema::Full, date(2025, 11, 3)).unwrap();
//! assert_eq!(artifact.file_name, "11032025_TrackingNumber_Full.csv");
//! assert_eq!(
//!     String::from_utf8(artifact.content).unwrap(),
//!     "时间,快递,原始,处理后\n\"16:20:00\",\"FedEx\",\"FedEx-123456789012\",\"123456789012\"\n"
//! );
//! ```

pub mod barcode;
pub mod error;
pub mod export;
pub mod ledger;
pub mod session;
pub mod sink;

/// Часто используемые типы одним импортом.
pub mod prelude {
    pub use crate::{
        barcode::{Carrier, classify},
        error::{ExportError, PersistError, Rejected},
        export::{Brief, ExportArtifact, ExportSchema, ExportWriter, Full, Schema},
        ledger::{CarrierCounts, Ledger, ScanEvent},
        session::Session,
        sink::{DirectorySink, FallbackSink, Location, Sink},
    };
}
