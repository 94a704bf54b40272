//! # e2e-tests - End-to-end тесты CLI инструмента
//!
//! Этот крейт содержит e2e тесты бинарника `courier_scan`.
//!
//! ## Фикстуры
//!
//! Тестовые файлы расположены в `fixtures/`:
//! - `ups_barcodes.txt` — коды UPS, среди них один некорректный
//! - `mixed_session.txt` — сессия с переключением служб и очисткой

use std::path::PathBuf;

/// Получить путь к директории фикстур.
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures")
}

/// Получить путь к фикстуре по имени файла.
pub fn fixture(name: &str) -> PathBuf {
    fixtures_dir().join(name)
}
