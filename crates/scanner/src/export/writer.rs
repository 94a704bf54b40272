//! Запись одного экспорта в поток.

use std::{io::Write, marker::PhantomData};

use super::{ExportSchema, csv};
use crate::{error::ExportResult, ledger::ScanEvent};

/// Writer одного CSV-экспорта.
///
/// Заголовок схемы `S` пишется при создании, затем по строке на событие.
/// Все строки идут через один [`::csv::Writer`].
///
/// # Пример
///
/// ```
/// use jiff::civil::time;
/// use scanner::{barcode::Carrier, export::{Brief, ExportWriter}, ledger::ScanEvent};
///
/// let event = ScanEvent::scan("1Z999AA10123456784", Carrier::Ups, time(9, 0, 0, 0)).unwrap();
///
/// let mut writer = ExportWriter::<_, Brief>::new(Vec::new())?;
/// writer.write(&event)?;
/// let (output, records) = writer.finish()?;
///
/// assert_eq!(records, 1);
/// assert_eq!(String::from_utf8(output).unwrap(), "时间,快递,处理后\n\"09:00:00\",\"UPS\",\"1Z999AA10123456784\"\n");
/// # Ok::<(), scanner::error::ExportError>(())
/// ```
pub struct ExportWriter<W: Write, S: ExportSchema> {
    inner: ::csv::Writer<W>,
    records: usize,
    _schema: PhantomData<S>,
}

impl<W: Write, S: ExportSchema> ExportWriter<W, S> {
    /// Создаёт writer и сразу пишет заголовок схемы.
    pub fn new(target: W) -> ExportResult<Self> {
        let mut inner = csv::writer(target);
        S::write_header(&mut inner)?;
        Ok(Self { inner, records: 0, _schema: PhantomData })
    }

    /// Записывает одно событие.
    pub fn write(&mut self, event: &ScanEvent) -> ExportResult<()> {
        S::write_one(&mut self.inner, event)?;
        self.records += 1;
        Ok(())
    }

    pub fn write_all<'a>(
        &mut self,
        events: impl IntoIterator<Item = &'a ScanEvent>,
    ) -> ExportResult<()> {
        events.into_iter().try_for_each(|event| self.write(event))
    }

    /// Количество строк данных (без заголовка).
    #[must_use]
    pub fn records(&self) -> usize {
        self.records
    }

    /// Завершает экспорт: возвращает поток и число записанных строк.
    pub fn finish(self) -> ExportResult<(W, usize)> {
        let records = self.records;
        let target = self.inner.into_inner().map_err(|e| e.into_error())?;
        Ok((target, records))
    }
}
