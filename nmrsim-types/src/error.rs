use thiserror::Error;

/// Результат для операций nmrsim
pub type NmrResult<T> = std::result::Result<T, NmrError>;

/// Типы ошибок синтеза и формата ProNMR.
#[derive(Debug, Error)]
pub enum NmrError {
    /// Неправильное ключевое слово в заголовке
    #[error("Invalid key name: {0}")]
    InvalidKeyName(String),

    /// Несовместимая версия формата
    #[error("Unsupported version: found {found}, expected {expected}")]
    UnsupportedVersion { found: u8, expected: u8 },

    /// Нарушение спецификации формата
    #[error("Format violation: {0}")]
    FormatViolation(String),

    /// Нарушение предусловия (ошибка вызывающего кода)
    #[error("Precondition violated: {0}")]
    Precondition(String),

    /// Записано меньше, чем запрошено (точек для данных, байт для заголовка)
    #[error("Short write: expected {expected}, written {written}")]
    ShortWrite { expected: usize, written: usize },

    /// Ошибки ввода/вывода (автоконвертируются из std::io::Error)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl NmrError {
    /// Удобные конструкторы
    pub fn format_violation<S: Into<String>>(s: S) -> Self {
        Self::FormatViolation(s.into())
    }

    pub fn precondition<S: Into<String>>(s: S) -> Self {
        Self::Precondition(s.into())
    }
}
