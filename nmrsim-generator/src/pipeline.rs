use std::{
    path::{Path, PathBuf},
    time::Instant,
};

use log::{debug, info};
use nmrsim_core::{
    derive_seed, export_gnuplot, export_pairs, flatten_complex, FidBuffer, FidBuilder,
    NoiseInjector, ProNmrHeaderExt, ProNmrWriter,
};
use nmrsim_types::{Complex32, FidLayout, ProNmrHeader};

use crate::{GeneratorConfig, GeneratorResult, LevelOutput, LineList, OutputFile, RunManifest};

/// Пути трёх файлов одного уровня шума.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    /// `R-σ.gp`
    pub gnuplot: PathBuf,
    /// `R-σ`
    pub pairs: PathBuf,
    /// `R-σp`
    pub pronmr: PathBuf,
}

/// Имена файлов уровня `level` в каталоге `dir`.
pub fn output_paths(
    dir: &Path,
    root: &str,
    level: f64,
) -> OutputPaths {
    let stem = format!("{root}-{level:.2}");

    OutputPaths {
        gnuplot: dir.join(format!("{stem}.gp")),
        pairs: dir.join(&stem),
        pronmr: dir.join(format!("{stem}p")),
    }
}

/// Буфер синтеза, владеющий выборками.
#[derive(Debug, Clone)]
enum Samples {
    Complex(Vec<Complex32>),
    Real(FidLayout, Vec<f32>),
}

impl Samples {
    fn zeroed(
        layout: FidLayout,
        len: usize,
    ) -> Self {
        match layout {
            FidLayout::Complex => Samples::Complex(vec![Complex32::new(0.0, 0.0); len]),
            other => Samples::Real(other, vec![0.0; len]),
        }
    }

    fn as_buffer(&mut self) -> FidBuffer<'_> {
        match self {
            Samples::Complex(v) => FidBuffer::Complex(v),
            Samples::Real(FidLayout::Sequential, v) => FidBuffer::Sequential(v),
            Samples::Real(_, v) => FidBuffer::Single(v),
        }
    }

    fn add_noise(
        &mut self,
        injector: &mut NoiseInjector,
        std_dev: f64,
    ) -> GeneratorResult<()> {
        match self {
            Samples::Complex(v) => injector.add_noise(v, std_dev)?,
            Samples::Real(_, v) => injector.add_noise(v, std_dev)?,
        }

        Ok(())
    }

    /// Значения в порядке области данных ProNMR.
    fn data_region(&self) -> Vec<f32> {
        match self {
            Samples::Complex(v) => flatten_complex(v),
            Samples::Real(_, v) => v.clone(),
        }
    }
}

/// Генерирует серию файлов: по одному набору на уровень шума.
pub struct GenerationPipeline {
    config: GeneratorConfig,
}

impl GenerationPipeline {
    /// Создаёт пайплайн, проверив конфигурацию.
    pub fn new(config: GeneratorConfig) -> GeneratorResult<Self> {
        config.validate()?;

        Ok(Self { config })
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Запускает генерацию. Первая же ошибка прерывает серию; файлы уже
    /// обработанных уровней остаются на диске.
    pub fn run(
        &self,
        list: &LineList,
    ) -> GeneratorResult<RunManifest> {
        let cfg = &self.config;
        let params = list.acquisition(cfg.dwells, cfg.global_phase);
        let started = Instant::now();

        std::fs::create_dir_all(&cfg.output_dir)?;

        info!(
            "Generating {} FID ({} dwells, {} lines) for {} noise levels",
            cfg.layout,
            cfg.dwells,
            list.lines.len(),
            cfg.noise_levels.len()
        );

        let mut clean = Samples::zeroed(cfg.layout, cfg.buffer_len());
        FidBuilder::from(&params).build(clean.as_buffer(), &list.lines, true)?;

        let mut manifest =
            RunManifest::new(&cfg.input_path, cfg.layout, params, cfg.seed, &list.lines);

        for (index, &level) in cfg.noise_levels.iter().enumerate() {
            let paths = output_paths(&cfg.output_dir, &cfg.output_root, level);
            let mut injector = NoiseInjector::from_seed(derive_seed(cfg.seed, index as u64));

            let mut noisy = clean.clone();
            noisy.add_noise(&mut injector, level)?;

            let pairs = match &noisy {
                Samples::Complex(v) => {
                    export_gnuplot(v, &paths.gnuplot)?;
                    export_pairs(v, &paths.pairs)?;
                    Some(OutputFile::describe(&paths.pairs)?)
                }
                Samples::Real(_, v) => {
                    export_gnuplot(v, &paths.gnuplot)?;
                    None
                }
            };

            let data = noisy.data_region();
            let mut header = ProNmrHeader::for_fid(data.len(), &params, cfg.layout)?;
            header.spectrometer_freq = cfg.spectrometer_freq_hz;

            let writer = ProNmrWriter::create(&paths.pronmr, header)?;
            let stats = writer.write_fid(&data, 1, 1)?;
            debug!(
                "{:?}: {} sectors at offset {}",
                writer.path(),
                stats.sectors_written,
                stats.start_offset_bytes
            );

            info!("  noise {level:.2} -> {:?}", writer.path());

            manifest.levels.push(LevelOutput {
                noise_level: level,
                seed: injector.seed(),
                points: writer.header().dataset_size as usize,
                gnuplot: OutputFile::describe(&paths.gnuplot)?,
                pairs,
                pronmr: OutputFile::describe(&paths.pronmr)?,
            });
        }

        debug!("Run finished in {:.3}s", started.elapsed().as_secs_f64());

        Ok(manifest)
    }
}

#[cfg(test)]
mod tests {
    use nmrsim_core::read_data;
    use nmrsim_types::SpectralLine;

    use super::*;

    fn list() -> LineList {
        LineList {
            dwell_period: 0.001,
            pre_acq_delay: 0.0,
            lines: vec![SpectralLine::new(1.0, 100.0, -5.0, 0.0)],
        }
    }

    fn config(
        dir: &Path,
        layout: FidLayout,
    ) -> GeneratorConfig {
        GeneratorConfig {
            output_dir: dir.to_path_buf(),
            output_root: "t".to_string(),
            layout,
            dwells: 64,
            noise_levels: vec![0.0, 0.5],
            ..Default::default()
        }
    }

    #[test]
    fn test_output_paths_naming() {
        let p = output_paths(Path::new("data"), "lines", 1.28);

        assert_eq!(p.gnuplot, PathBuf::from("data/lines-1.28.gp"));
        assert_eq!(p.pairs, PathBuf::from("data/lines-1.28"));
        assert_eq!(p.pronmr, PathBuf::from("data/lines-1.28p"));

        let p = output_paths(Path::new("d"), "r", 0.0);
        assert_eq!(p.pronmr, PathBuf::from("d/r-0.00p"));
    }

    #[test]
    fn test_complex_run_writes_three_files_per_level() {
        let dir = tempfile::tempdir().unwrap();
        let pipeline = GenerationPipeline::new(config(dir.path(), FidLayout::Complex)).unwrap();

        let manifest = pipeline.run(&list()).unwrap();

        assert_eq!(manifest.levels.len(), 2);
        for level in &manifest.levels {
            assert!(level.gnuplot.path.exists());
            assert!(level.pairs.as_ref().unwrap().path.exists());
            assert_eq!(level.points, 128);
            assert_eq!(level.pronmr.bytes, 256 + 128 * 4);
        }
        assert_ne!(manifest.levels[0].seed, manifest.levels[1].seed);
    }

    #[test]
    fn test_zero_level_matches_noiseless_synthesis() {
        let dir = tempfile::tempdir().unwrap();
        let pipeline = GenerationPipeline::new(config(dir.path(), FidLayout::Single)).unwrap();
        pipeline.run(&list()).unwrap();

        let mut expected = vec![0f32; 64];
        nmrsim_core::make_sin_fid(&mut expected, &list().lines, 0.001, 0.0, 0.0, true).unwrap();

        let paths = output_paths(dir.path(), "t", 0.0);
        let back = read_data(&paths.pronmr, 64, 2, 1).unwrap();
        assert_eq!(back, expected);
        assert!(!paths.pairs.exists(), "no pair dump for real data");
    }

    #[test]
    fn test_sequential_run_doubles_points() {
        let dir = tempfile::tempdir().unwrap();
        let pipeline = GenerationPipeline::new(config(dir.path(), FidLayout::Sequential)).unwrap();

        let manifest = pipeline.run(&list()).unwrap();
        assert!(manifest.levels.iter().all(|l| l.points == 128));

        let h = nmrsim_core::read_header(&manifest.levels[0].pronmr.path).unwrap();
        assert!(h.has_status(nmrsim_types::AQ_SEQ));
    }

    #[test]
    fn test_oversized_dataset_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out");
        let cfg = GeneratorConfig {
            dwells: 20_000,
            noise_levels: vec![0.0],
            ..config(&out, FidLayout::Complex)
        };

        assert!(matches!(
            GenerationPipeline::new(cfg),
            Err(crate::GeneratorError::Config(_))
        ));
        assert!(!out.exists());
        assert!(!output_paths(&out, "t", 0.0).gnuplot.exists());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let cfg = GeneratorConfig {
            noise_levels: vec![-1.0],
            ..Default::default()
        };
        assert!(GenerationPipeline::new(cfg).is_err());
    }
}
