use std::path::PathBuf;

use thiserror::Error;

pub type GeneratorResult<T> = std::result::Result<T, GeneratorError>;

#[derive(Debug, Error)]
pub enum GeneratorError {
    /// Строка входного файла не разбирается
    #[error("{}:{line}: cannot parse '{content}': {reason}", path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        content: String,
        reason: String,
    },

    /// Некорректная конфигурация
    #[error("Config error: {0}")]
    Config(String),

    /// Ошибка ввода/вывода
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Ошибка синтеза или формата ProNMR
    #[error("NMR error: {0}")]
    Nmr(#[from] nmrsim_types::NmrError),

    /// Ошибка записи манифеста
    #[error("Manifest error: {0}")]
    Manifest(#[from] serde_json::Error),
}
