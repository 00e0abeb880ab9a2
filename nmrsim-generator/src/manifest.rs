use std::{
    fs::File,
    io::{BufReader, BufWriter, Read, Write},
    path::{Path, PathBuf},
    time::Instant,
};

use nmrsim_types::{AcquisitionParams, FidLayout, SpectralLine};
use serde::Serialize;

use crate::GeneratorResult;

/// Выходной файл и его контрольная сумма.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutputFile {
    pub path: PathBuf,
    pub bytes: u64,
    pub crc32: u32,
}

impl OutputFile {
    /// Описывает уже записанный файл.
    pub fn describe<P: AsRef<Path>>(path: P) -> GeneratorResult<Self> {
        let path = path.as_ref();
        let bytes = std::fs::metadata(path)?.len();
        let crc32 = file_crc32(path)?;

        Ok(Self {
            path: path.to_path_buf(),
            bytes,
            crc32,
        })
    }
}

/// Результат одного уровня шума.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LevelOutput {
    pub noise_level: f64,
    pub seed: u64,
    /// Количество значений f32 в области данных
    pub points: usize,
    pub gnuplot: OutputFile,
    /// Только для комплексной раскладки
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pairs: Option<OutputFile>,
    pub pronmr: OutputFile,
}

/// Манифест прогона: что было сгенерировано и из чего.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunManifest {
    pub generator_version: String,
    pub input: PathBuf,
    pub layout: String,
    pub acquisition: AcquisitionParams,
    pub base_seed: u64,
    pub lines: Vec<SpectralLine>,
    pub levels: Vec<LevelOutput>,
}

impl RunManifest {
    pub fn new(
        input: &Path,
        layout: FidLayout,
        acquisition: AcquisitionParams,
        base_seed: u64,
        lines: &[SpectralLine],
    ) -> Self {
        Self {
            generator_version: env!("CARGO_PKG_VERSION").to_string(),
            input: input.to_path_buf(),
            layout: layout.to_string(),
            acquisition,
            base_seed,
            lines: lines.to_vec(),
            levels: Vec::new(),
        }
    }

    /// Сводка по уже записанным уровням.
    pub fn summary(
        &self,
        started: &Instant,
    ) -> RunSummary {
        let files = self
            .levels
            .iter()
            .map(|l| 2 + usize::from(l.pairs.is_some()))
            .sum();
        let bytes = self
            .levels
            .iter()
            .map(|l| l.gnuplot.bytes + l.pronmr.bytes + l.pairs.as_ref().map_or(0, |p| p.bytes))
            .sum();

        RunSummary {
            duration_secs: started.elapsed().as_secs_f64(),
            levels: self.levels.len(),
            lines: self.lines.len(),
            files_written: files,
            bytes_written: bytes,
        }
    }
}

/// Итог прогона для вывода в лог.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub duration_secs: f64,
    pub levels: usize,
    pub lines: usize,
    pub files_written: usize,
    pub bytes_written: u64,
}

impl std::fmt::Display for RunSummary {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        writeln!(f, "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━")?;
        writeln!(f, "  Duration      : {:.3}s", self.duration_secs)?;
        writeln!(f, "  Lines         : {}", self.lines)?;
        writeln!(f, "  Noise levels  : {}", self.levels)?;
        writeln!(f, "  Files         : {}", self.files_written)?;
        writeln!(
            f,
            "  Bytes written : {:.1} KB",
            self.bytes_written as f64 / 1e3
        )?;
        write!(f, "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━")
    }
}

/// CRC32 содержимого файла.
pub fn file_crc32<P: AsRef<Path>>(path: P) -> GeneratorResult<u32> {
    let mut reader = BufReader::new(File::open(path)?);
    let mut hasher = crc32fast::Hasher::new();
    let mut buf = [0u8; 8192];

    loop {
        let n = reader.read(&mut buf)?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }

    Ok(hasher.finalize())
}

/// Записывает манифест в JSON.
pub fn write_manifest<P: AsRef<Path>>(
    path: P,
    manifest: &RunManifest,
) -> GeneratorResult<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, manifest)?;
    writeln!(writer)?;
    writer.flush()?;

    Ok(())
}
