//! Сохранение экспортированных файлов.
//!
//! Ядро не знает, куда попадёт файл: оно передаёт имя и байты в [`Sink`] и
//! получает обратно [`Location`]. [`DirectorySink`] пишет в каталог на диске,
//! [`FallbackSink`] пробует основное место и при неудаче запасное.

use std::{
    fmt, fs,
    path::{Path, PathBuf},
};

use tracing::{info, warn};

use crate::error::PersistError;

/// Имя подкаталога приложения внутри каталога назначения.
pub const APP_FOLDER: &str = "快递扫码助手";

/// Где оказался сохранённый файл: путь или URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location(pub String);

impl From<&Path> for Location {
    fn from(path: &Path) -> Self {
        Self(path.display().to_string())
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Получатель экспортированных байтов.
pub trait Sink {
    /// Сохраняет `content` под именем `file_name`.
    fn persist(&self, file_name: &str, content: &[u8]) -> Result<Location, PersistError>;
}

impl<S: Sink + ?Sized> Sink for &S {
    fn persist(&self, file_name: &str, content: &[u8]) -> Result<Location, PersistError> {
        (**self).persist(file_name, content)
    }
}

/// Сохраняет файлы в `<root>/<folder>/`, создавая каталоги при необходимости.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectorySink {
    root: PathBuf,
    folder: Option<String>,
}

impl DirectorySink {
    /// Каталог `root` с подкаталогом [`APP_FOLDER`].
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into(), folder: Some(APP_FOLDER.to_string()) }
    }

    /// Файлы пишутся прямо в `root`.
    pub fn flat(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into(), folder: None }
    }

    /// Каталог, в который попадут файлы.
    #[must_use]
    pub fn target_dir(&self) -> PathBuf {
        match &self.folder {
            Some(folder) => self.root.join(folder),
            None => self.root.clone(),
        }
    }
}

impl Sink for DirectorySink {
    fn persist(&self, file_name: &str, content: &[u8]) -> Result<Location, PersistError> {
        let dir = self.target_dir();
        fs::create_dir_all(&dir).map_err(|e| {
            PersistError::new(format!("cannot create directory {}: {e}", dir.display()))
        })?;

        let path = dir.join(file_name);
        fs::write(&path, content)
            .map_err(|e| PersistError::new(format!("cannot write {}: {e}", path.display())))?;

        info!(path = %path.display(), bytes = content.len(), "export saved");
        Ok(Location::from(path.as_path()))
    }
}

/// Пробует `primary`, при ошибке — `fallback`.
///
/// Если не сработали оба, возвращается ошибка `fallback`.
#[derive(Debug, Clone)]
pub struct FallbackSink<P, F> {
    primary: P,
    fallback: F,
}

impl<P: Sink, F: Sink> FallbackSink<P, F> {
    pub fn new(primary: P, fallback: F) -> Self {
        Self { primary, fallback }
    }
}

impl<P: Sink, F: Sink> Sink for FallbackSink<P, F> {
    fn persist(&self, file_name: &str, content: &[u8]) -> Result<Location, PersistError> {
        self.primary.persist(file_name, content).or_else(|e| {
            warn!(reason = %e, file_name, "primary destination failed, trying fallback");
            self.fallback.persist(file_name, content)
        })
    }
}
