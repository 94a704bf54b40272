//! Запись об одном принятом сканировании.

use jiff::civil::Time;

use crate::{
    barcode::{Carrier, classify},
    error::Rejected,
};

/// Формат отметки времени в записи и в CSV.
pub const TIME_FORMAT: &str = "%H:%M:%S";

/// Одно принятое сканирование.
///
/// Создаётся только из успешной классификации, поэтому
/// [`normalized_code`][ScanEvent::normalized_code] никогда не пуст.
///
/// # Пример
///
/// ```
/// use jiff::civil::time;
/// use scanner::{barcode::Carrier, ledger::ScanEvent};
///
/// let event = ScanEvent::scan(" 123456789012 ", Carrier::Sf, time(9, 5, 0, 0)).unwrap();
/// assert_eq!(event.timestamp(), "09:05:00");
/// assert_eq!(event.raw_input(), " 123456789012 ");
/// assert_eq!(event.normalized_code(), "SF123456789012");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanEvent {
    /// Локальное время сканирования, `HH:MM:SS`.
    timestamp: String,
    /// Служба, выбранная в момент сканирования.
    carrier: Carrier,
    /// Строка в том виде, в каком её прислал сканер или ввёл пользователь.
    raw_input: String,
    /// Результат классификации.
    normalized_code: String,
}

impl ScanEvent {
    /// Классифицирует строку и создаёт запись с отметкой времени `at`.
    ///
    /// Возвращает [`Rejected`], если строка не подходит под правило службы.
    pub fn scan(raw_input: &str, carrier: Carrier, at: Time) -> Result<Self, Rejected> {
        let normalized_code = classify(raw_input, carrier)
            .ok_or_else(|| Rejected { carrier, raw_input: raw_input.to_string() })?;

        Ok(Self {
            timestamp: at.strftime(TIME_FORMAT).to_string(),
            carrier,
            raw_input: raw_input.to_string(),
            normalized_code,
        })
    }

    /// Отметка времени `HH:MM:SS`.
    #[must_use]
    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    #[must_use]
    pub fn carrier(&self) -> Carrier {
        self.carrier
    }

    #[must_use]
    pub fn raw_input(&self) -> &str {
        &self.raw_input
    }

    #[must_use]
    pub fn normalized_code(&self) -> &str {
        &self.normalized_code
    }

    /// Строка для списка на экране: `[HH:MM:SS] служба: код`.
    #[must_use]
    pub fn display_line(&self) -> String {
        format!("[{}] {}: {}", self.timestamp, self.carrier, self.normalized_code)
    }
}
