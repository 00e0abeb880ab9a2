use std::path::{Path, PathBuf};

use nmrsim_core::{DEFAULT_SPECTROMETER_FREQ, MAX_DATASET_SIZE};
use nmrsim_types::FidLayout;

use crate::{GeneratorError, GeneratorResult};

/// Уровни шума эталонной серии (стандартное отклонение).
pub const DEFAULT_NOISE_LEVELS: [f64; 10] = [0.00, 0.01, 0.02, 0.04, 0.08, 0.16, 0.32, 0.64, 1.28, 2.56];

/// Количество dwell-ов в эталонном FID.
pub const DEFAULT_DWELLS: usize = 1024;

/// Полная конфигурация прогона генератора.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Файл со списком линий
    pub input_path: PathBuf,
    /// Каталог для выходных файлов
    pub output_dir: PathBuf,
    /// Корень имён выходных файлов
    pub output_root: String,
    /// Раскладка FID
    pub layout: FidLayout,
    /// Количество dwell-ов (точек по времени)
    pub dwells: usize,
    /// Уровни шума, по одной паре файлов на уровень
    pub noise_levels: Vec<f64>,
    /// Базовое зерно генератора шума
    pub seed: u64,
    /// Общий сдвиг фазы, градусы
    pub global_phase: f64,
    /// Частота спектрометра для заголовка, Гц
    pub spectrometer_freq_hz: f64,
    /// Куда записать JSON-манифест (None = не писать)
    pub manifest_path: Option<PathBuf>,
}

////////////////////////////////////////////////////////////////////////////////
// Собственные методы
////////////////////////////////////////////////////////////////////////////////

impl GeneratorConfig {
    /// Количество f32 значений в буфере синтеза для выбранной раскладки.
    ///
    /// Последовательная квадратура занимает два значения на dwell.
    pub fn buffer_len(&self) -> usize {
        match self.layout {
            FidLayout::Complex | FidLayout::Single => self.dwells,
            FidLayout::Sequential => self.dwells * 2,
        }
    }

    /// Количество f32 значений в области данных ProNMR.
    pub fn data_points(&self) -> usize {
        self.dwells.saturating_mul(self.layout.values_per_dwell())
    }

    /// Проверяет конфигурацию до того, как на диск попадёт хоть один файл.
    pub fn validate(&self) -> GeneratorResult<()> {
        if self.dwells == 0 {
            return Err(GeneratorError::Config("dwell count must be > 0".to_string()));
        }
        if self.data_points() > MAX_DATASET_SIZE {
            return Err(GeneratorError::Config(format!(
                "{} dwells in '{}' layout need {} points, ProNMR holds at most {MAX_DATASET_SIZE}",
                self.dwells,
                self.layout,
                self.data_points()
            )));
        }
        if self.noise_levels.is_empty() {
            return Err(GeneratorError::Config("no noise levels given".to_string()));
        }
        if let Some(bad) = self.noise_levels.iter().find(|n| !n.is_finite() || **n < 0.0) {
            return Err(GeneratorError::Config(format!("invalid noise level {bad}")));
        }
        if self.output_root.is_empty() {
            return Err(GeneratorError::Config("empty output root".to_string()));
        }

        Ok(())
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from("lines.txt"),
            output_dir: PathBuf::from("data"),
            output_root: "lines".to_string(),
            layout: FidLayout::Complex,
            dwells: DEFAULT_DWELLS,
            noise_levels: DEFAULT_NOISE_LEVELS.to_vec(),
            seed: 1,
            global_phase: 0.0,
            spectrometer_freq_hz: DEFAULT_SPECTROMETER_FREQ,
            manifest_path: None,
        }
    }
}

/// Корень имён по умолчанию: имя входного файла без расширения.
pub fn default_root(input: &Path) -> String {
    input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "fid".to_string())
}

/// Парсит строку частоты в герцы.
///
/// Поддерживает суффиксы: `GHz`, `MHz`, `kHz`, `Hz` (регистронезависимо).
///
/// # Примеры
/// ```
/// use nmrsim_generator::config::parse_freq_hz;
/// assert_eq!(parse_freq_hz("100MHz").unwrap(), 100.0e6);
/// assert_eq!(parse_freq_hz("0.4GHz").unwrap(), 400.0e6);
/// assert_eq!(parse_freq_hz("500000").unwrap(), 500_000.0);
/// ```
pub fn parse_freq_hz(s: &str) -> Result<f64, String> {
    let s = s.trim();
    let lower = s.to_lowercase();

    let (num_str, mult) = if let Some(v) = lower.strip_suffix("ghz") {
        (v.trim(), 1_000_000_000_f64)
    } else if let Some(v) = lower.strip_suffix("mhz") {
        (v.trim(), 1_000_000_f64)
    } else if let Some(v) = lower.strip_suffix("khz") {
        (v.trim(), 1_000_f64)
    } else if let Some(v) = lower.strip_suffix("hz") {
        (v.trim(), 1_f64)
    } else {
        (lower.as_str(), 1_f64)
    };

    let n: f64 = num_str
        .parse()
        .map_err(|e| format!("Invalid frequency value '{s}': {e}"))?;

    if !n.is_finite() || n < 0.0 {
        return Err(format!("Invalid frequency '{s}'"));
    }

    Ok(n * mult)
}

/// Парсит список уровней шума через запятую: `0,0.01,1.28`.
pub fn parse_noise_levels(s: &str) -> Result<Vec<f64>, String> {
    s.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(|t| {
            let v: f64 = t
                .parse()
                .map_err(|e| format!("Invalid noise level '{t}': {e}"))?;
            if !v.is_finite() || v < 0.0 {
                return Err(format!("Noise level must be >= 0, got '{t}'"));
            }
            Ok(v)
        })
        .collect()
}

////////////////////////////////////////////////////////////////////////////////
// Тесты
////////////////////////////////////////////////////////////////////////////////
