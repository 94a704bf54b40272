//! Журнал принятых сканирований.
//!
//! [`Ledger`] хранит записи в порядке добавления (старые первыми). Обратный
//! порядок для экрана применяется только в [`Ledger::display_lines`], поэтому
//! порядок строк в CSV от него не зависит.

mod event;
mod stats;

pub use event::{ScanEvent, TIME_FORMAT};
pub use stats::{CarrierCounts, SUMMARY_TOP};
use tracing::debug;

use crate::barcode::Carrier;

/// Упорядоченная последовательность записей текущей сессии.
///
/// Дубликаты не отбрасываются: один и тот же код, отсканированный дважды,
/// даёт две записи. Удалить отдельную запись нельзя, только очистить всё.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ledger {
    events: Vec<ScanEvent>,
}

impl Ledger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Добавляет запись в конец журнала.
    pub fn append(&mut self, event: ScanEvent) {
        debug!(
            carrier = %event.carrier(),
            code = event.normalized_code(),
            total = self.events.len() + 1,
            "scan recorded"
        );
        self.events.push(event);
    }

    /// Удаляет все записи. Необратимо.
    pub fn clear(&mut self) {
        debug!(dropped = self.events.len(), "ledger cleared");
        self.events.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Записи в порядке добавления.
    #[must_use]
    pub fn events(&self) -> &[ScanEvent] {
        &self.events
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ScanEvent> {
        self.events.iter()
    }

    /// Записи одной службы в порядке добавления.
    pub fn by_carrier(&self, carrier: Carrier) -> impl Iterator<Item = &ScanEvent> + '_ {
        self.events.iter().filter(move |event| event.carrier() == carrier)
    }

    /// Количество записей по службам.
    #[must_use]
    pub fn counts_by_carrier(&self) -> CarrierCounts {
        CarrierCounts::tally(&self.events)
    }

    /// Строки для экрана, последняя запись первой.
    pub fn display_lines(&self) -> impl Iterator<Item = String> + '_ {
        self.events.iter().rev().map(ScanEvent::display_line)
    }
}

impl<'a> IntoIterator for &'a Ledger {
    type Item = &'a ScanEvent;
    type IntoIter = std::slice::Iter<'a, ScanEvent>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}
