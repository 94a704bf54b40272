//! Ошибки ядра сканера.
//!
//! Несовпадение штрихкода с правилом — штатный исход и представлено
//! отдельным значением [`Rejected`]. Ошибки экспорта и сохранения
//! собраны в [`ExportError`] и [`PersistError`].

use thiserror::Error;

use crate::barcode::Carrier;

/// Штрихкод не подходит под правило выбранной службы.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid barcode format for {carrier}: '{raw_input}'")]
pub struct Rejected {
    /// Служба, по правилу которой проверялась строка.
    pub carrier: Carrier,
    /// Исходная строка.
    pub raw_input: String,
}

/// Ошибка сохранения файла внешним получателем.
///
/// Причина передаётся наверх без изменений; повторных попыток ядро не делает.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{reason}")]
pub struct PersistError {
    /// Человекочитаемое описание причины.
    pub reason: String,
}

impl PersistError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self { reason: reason.into() }
    }
}

/// Главная ошибка экспорта.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Нет записей для экспорта; файл не создаётся.
    #[error("nothing to export")]
    EmptyDataset,

    /// Ошибка записи строки CSV.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Ошибка ввода/вывода.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Результат не является корректной UTF-8 строкой.
    #[error("Invalid UTF-8 in export: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),

    /// Получатель не смог сохранить файл.
    #[error("export failed: {0}")]
    Persist(#[from] PersistError),
}

/// Удобный alias для Result с ExportError.
pub type ExportResult<T> = Result<T, ExportError>;
