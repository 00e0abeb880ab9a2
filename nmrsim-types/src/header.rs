/// Заголовок файла ProNMR (фиксированный размер 256 байт, 2 сектора)
#[derive(Debug, Clone, PartialEq)]
pub struct ProNmrHeader {
    /// Ключевое слово (Pascal-строка), должно быть "\x05NMR86"
    pub key_name: [u8; 8],
    /// Версия формата файла
    pub file_version: u8,
    /// Смещения секций в секторах по 128 байт, индекс — [`crate::BlockType`]
    pub offsets: [u8; 8],
    /// Размер набора данных (dwell × 2 для квадратуры)
    pub dataset_size: u16,
    /// Количество собранных точек
    pub points_collected: u16,
    /// Количество компонент в файле
    pub num_records: u16,
    /// Слово состояния, см. [`crate::status`]
    pub status_flags: u16,
    /// Количество накоплений
    pub num_scans: u16,
    /// Частота спектрометра, Гц
    pub spectrometer_freq: f64,
    /// Смещение частоты наблюдения, Гц
    pub obs_offset: f64,
    /// Период дискретизации, с
    pub dwell_period: f64,
    /// Задержка перед регистрацией, с
    pub pre_acq_delay: f32,
    /// Имя файла при сохранении
    pub filename: String,
    /// Имя машины сбора данных
    pub machine_id: String,
    /// Дата в текстовом виде
    pub date_text: String,
    pub comment1: String,
    pub comment2: String,
    /// Переменная задержка (2D)
    pub variable_delay: f32,
    /// Минимальный набор 2D-параметров
    pub in2d: f64,
    pub secondary_freq: f64,
    pub secondary_offset: f64,
}
