//! Статистика по курьерским службам.

use std::{cmp::Reverse, collections::BTreeMap};

use super::ScanEvent;
use crate::barcode::Carrier;

/// Сколько служб показывается в строке статистики.
pub const SUMMARY_TOP: usize = 5;

/// Количество записей по каждой службе.
///
/// Службы без записей в таблице отсутствуют, [`get`][CarrierCounts::get] для них возвращает `0`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CarrierCounts {
    counts: BTreeMap<Carrier, usize>,
}

impl CarrierCounts {
    /// Подсчитывает записи по службам.
    pub fn tally<'a>(events: impl IntoIterator<Item = &'a ScanEvent>) -> Self {
        let mut counts = BTreeMap::new();
        for event in events {
            *counts.entry(event.carrier()).or_insert(0) += 1;
        }
        Self { counts }
    }

    #[must_use]
    pub fn get(&self, carrier: Carrier) -> usize {
        self.counts.get(&carrier).copied().unwrap_or(0)
    }

    /// Общее число записей.
    #[must_use]
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Пары (служба, количество) в порядке объявления служб.
    pub fn iter(&self) -> impl Iterator<Item = (Carrier, usize)> + '_ {
        self.counts.iter().map(|(carrier, count)| (*carrier, *count))
    }

    /// Строка статистики: `总计: N | служба: k | ...`.
    ///
    /// Показывает не больше [`SUMMARY_TOP`] служб по убыванию количества;
    /// при равенстве раньше идёт служба, объявленная раньше.
    ///
    /// ```
    /// use jiff::civil::time;
    /// use scanner::{barcode::Carrier, ledger::{CarrierCounts, ScanEvent}};
    ///
    /// let at = time(8, 0, 0, 0);
    /// let events = [
    ///     ScanEvent::scan("1234567890", Carrier::Dhl, at).unwrap(),
    ///     ScanEvent::scan("1Z1", Carrier::Ups, at).unwrap(),
    ///     ScanEvent::scan("1Z2", Carrier::Ups, at).unwrap(),
    /// ];
    /// assert_eq!(CarrierCounts::tally(&events).summary(), "总计: 3 | UPS: 2 | DHL: 1");
    /// ```
    #[must_use]
    pub fn summary(&self) -> String {
        let mut ranked: Vec<_> = self.iter().collect();
        ranked.sort_by_key(|&(_, count)| Reverse(count));

        let mut line = format!("总计: {}", self.total());
        for (carrier, count) in ranked.into_iter().take(SUMMARY_TOP) {
            line.push_str(&format!(" | {carrier}: {count}"));
        }
        line
    }
}
