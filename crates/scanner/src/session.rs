//! Сессия сканирования.
//!
//! [`Session`] владеет журналом и текущей выбранной службой. Создаётся явно и
//! передаётся по ссылке, глобального состояния нет. Все изменяющие вызовы
//! принимают `&mut self`: хост, работающий в нескольких потоках, должен
//! проводить их через одного владельца.

use jiff::{
    Zoned,
    civil::{Date, Time},
};
use tracing::debug;

use crate::{
    barcode::Carrier,
    error::{ExportResult, Rejected},
    export::{self, ExportArtifact, Schema},
    ledger::{Ledger, ScanEvent},
    sink::{Location, Sink},
};

/// Состояние одной сессии: выбранная служба и журнал.
///
/// # Пример
///
/// ```
/// use jiff::civil::{date, time};
/// use scanner::{barcode::Carrier, export::Schema, session::Session};
///
/// let mut session = Session::new(Carrier::Sf);
/// session.scan_at("123456789012", time(9, 0, 0, 0)).unwrap();
/// assert!(session.scan_at("bad", time(9, 0, 1, 0)).is_err());
///
/// session.select_carrier(Carrier::Generic);
/// session.scan_at("bad", time(9, 0, 2, 0)).unwrap();
///
/// assert_eq!(session.ledger().len(), 2);
/// assert_eq!(session.ledger().counts_by_carrier().summary(), "总计: 2 | 顺丰: 1 | 通用: 1");
///
/// let artifact = session.export_on(Schema::Brief, date(2025, 6, 1)).unwrap();
/// assert_eq!(artifact.file_name, "06012025_TrackingNumber.csv");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Session {
    carrier: Carrier,
    ledger: Ledger,
}

impl Session {
    /// Новая пустая сессия с выбранной службой.
    #[must_use]
    pub fn new(carrier: Carrier) -> Self {
        Self { carrier, ledger: Ledger::new() }
    }

    /// Текущая выбранная служба.
    #[must_use]
    pub fn carrier(&self) -> Carrier {
        self.carrier
    }

    /// Меняет службу. Уже принятые записи не переклассифицируются.
    pub fn select_carrier(&mut self, carrier: Carrier) {
        debug!(from = %self.carrier, to = %carrier, "carrier selected");
        self.carrier = carrier;
    }

    #[must_use]
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Классифицирует строку текущей службой и добавляет запись
    /// с локальным временем.
    pub fn scan(&mut self, raw_input: &str) -> Result<&ScanEvent, Rejected> {
        self.scan_at(raw_input, Zoned::now().time())
    }

    /// То же, что [`scan`][Session::scan], с явным временем.
    ///
    /// При отказе журнал не меняется.
    pub fn scan_at(&mut self, raw_input: &str, at: Time) -> Result<&ScanEvent, Rejected> {
        let event = ScanEvent::scan(raw_input, self.carrier, at)?;
        self.ledger.append(event);
        Ok(&self.ledger.events()[self.ledger.len() - 1])
    }

    /// Очищает журнал.
    pub fn clear(&mut self) {
        self.ledger.clear();
    }

    /// Экспорт всего журнала с сегодняшней локальной датой в имени файла.
    pub fn export(&self, schema: Schema) -> ExportResult<ExportArtifact> {
        self.export_on(schema, Zoned::now().date())
    }

    /// Экспорт всего журнала с явной датой.
    pub fn export_on(&self, schema: Schema, date: Date) -> ExportResult<ExportArtifact> {
        export::export(&self.ledger, schema, date)
    }

    /// Экспорт записей одной службы.
    pub fn export_carrier(
        &self,
        carrier: Carrier,
        schema: Schema,
        date: Date,
    ) -> ExportResult<ExportArtifact> {
        export::export(self.ledger.by_carrier(carrier), schema, date)
    }

    /// Экспортирует журнал и передаёт файл в `sink`.
    pub fn save(&self, schema: Schema, sink: &impl Sink) -> ExportResult<Location> {
        self.export(schema)?.persist(sink)
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::{date, time};
    use tempfile::tempdir;

    use super::*;
    use crate::{error::ExportError, export::HEADER_FULL, sink::DirectorySink};

    fn at(second: i8) -> Time {
        time(11, 22, second, 0)
    }

    #[test]
    fn rejection_leaves_ledger_untouched() {
        let mut session = Session::new(Carrier::Ups);
        let err = session.scan_at("bad", at(0)).unwrap_err();

        assert_eq!(err.to_string(), "invalid barcode format for UPS: 'bad'");
        assert!(session.ledger().is_empty());
    }

    #[test]
    fn switching_carrier_keeps_past_events() {
        let mut session = Session::new(Carrier::Yt);
        session.scan_at("0000000000000", at(0)).unwrap();
        session.select_carrier(Carrier::Zto);
        session.scan_at("0000000000000", at(1)).unwrap();

        let codes: Vec<_> = session.ledger().iter().map(ScanEvent::normalized_code).collect();
        assert_eq!(codes, ["YT0000000000000", "ZTO0000000000000"]);
    }

    #[test]
    fn counts_three_ups_one_fedex() {
        let mut session = Session::new(Carrier::Ups);
        for code in ["1Z1", "1Z2", "1Z3"] {
            session.scan_at(code, at(0)).unwrap();
        }
        session.select_carrier(Carrier::FedEx);
        session.scan_at("FedEx-123456789012", at(1)).unwrap();

        let counts = session.ledger().counts_by_carrier();
        assert_eq!(counts.iter().collect::<Vec<_>>(), [(Carrier::Ups, 3), (Carrier::FedEx, 1)]);
    }

    #[test]
    fn clear_behaves_like_fresh_session() {
        let mut session = Session::new(Carrier::Generic);
        session.scan_at("anything", at(0)).unwrap();
        session.clear();

        assert!(session.ledger().counts_by_carrier().is_empty());
        for schema in [Schema::Brief, Schema::Full] {
            assert!(matches!(
                session.export_on(schema, date(2025, 1, 1)),
                Err(ExportError::EmptyDataset)
            ));
        }
    }

    #[test]
    fn export_filtered_by_carrier() {
        let mut session = Session::new(Carrier::Ups);
        session.scan_at("1Z1", at(0)).unwrap();
        session.select_carrier(Carrier::Dhl);
        session.scan_at("1234567890", at(1)).unwrap();

        let artifact = session.export_carrier(Carrier::Dhl, Schema::Brief, date(2025, 1, 1)).unwrap();
        assert_eq!(artifact.records, 1);
        assert!(matches!(
            session.export_carrier(Carrier::Sf, Schema::Brief, date(2025, 1, 1)),
            Err(ExportError::EmptyDataset)
        ));
    }

    #[test]
    fn save_writes_through_sink() {
        let dir = tempdir().unwrap();
        let mut session = Session::new(Carrier::Amazon);
        session.scan("TBA123").unwrap();

        let location = session.save(Schema::Full, &DirectorySink::flat(dir.path())).unwrap();

        let content = std::fs::read_to_string(&location.0).unwrap();
        assert!(content.starts_with(HEADER_FULL));
        assert!(content.contains("\"Amazon\",\"TBA123\",\"TBA123\""));
    }

    #[test]
    fn save_empty_session_writes_nothing() {
        let dir = tempdir().unwrap();
        let session = Session::default();

        let result = session.save(Schema::Brief, &DirectorySink::flat(dir.path()));
        assert!(matches!(result, Err(ExportError::EmptyDataset)));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
