use std::{path::PathBuf, time::Instant};

use clap::Parser;
use log::{error, info};
use nmrsim_generator::{
    default_root, parse_freq_hz, parse_noise_levels, read_line_list, write_manifest,
    GenerationPipeline, GeneratorConfig, DEFAULT_DWELLS,
};
use nmrsim_types::FidLayout;

#[derive(Parser, Debug)]
#[command(
    name = "nmrsim-generator",
    version = env!("CARGO_PKG_VERSION"),
    about = "Generate noisy synthetic NMR FIDs as ProNMR and gnuplot files",
    long_about = None,
)]
struct Cli {
    /// Файл списка линий: `dwell pre_delay`, затем `amp freq damping phase`
    #[arg(short, long)]
    input: PathBuf,
    /// Каталог для выходных файлов
    #[arg(short, long, default_value = "data")]
    output_dir: PathBuf,
    /// Корень имён файлов. По умолчанию: имя входного файла без расширения
    #[arg(short, long)]
    root: Option<String>,
    /// Раскладка FID: sim, seq, sin
    #[arg(short, long, default_value = "sim")]
    mode: String,
    /// Количество dwell-ов
    #[arg(short, long, default_value_t = DEFAULT_DWELLS)]
    points: usize,
    /// Уровни шума через запятую
    #[arg(short, long, default_value = "0,0.01,0.02,0.04,0.08,0.16,0.32,0.64,1.28,2.56")]
    noise: String,
    /// Базовое зерно генератора шума
    #[arg(short, long, default_value_t = 1)]
    seed: u64,
    /// Общий сдвиг фазы, градусы
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    phase: f64,
    /// Частота спектрометра (100MHz, 0.4GHz, 100000000)
    #[arg(long, default_value = "100MHz")]
    spectrometer_freq: String,
    /// Записать JSON-манифест прогона
    #[arg(long)]
    manifest: Option<PathBuf>,
    /// Тихий режим (только ошибки)
    #[arg(short, long)]
    quiet: bool,
}

fn main() {
    let cli = Cli::parse();
    let level = if cli.quiet {
        log::LevelFilter::Error
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::new()
        .filter_level(level)
        .format_target(false)
        .format_timestamp_secs()
        .init();

    let layout: FidLayout = match cli.mode.parse() {
        Ok(l) => l,
        Err(e) => {
            error!("--mode: {e}");
            std::process::exit(1);
        }
    };

    let noise_levels = match parse_noise_levels(&cli.noise) {
        Ok(n) => n,
        Err(e) => {
            error!("--noise: {e}");
            std::process::exit(1);
        }
    };

    let spectrometer_freq_hz = match parse_freq_hz(&cli.spectrometer_freq) {
        Ok(f) => f,
        Err(e) => {
            error!("--spectrometer-freq: {e}");
            std::process::exit(1);
        }
    };

    let config = GeneratorConfig {
        output_root: cli.root.clone().unwrap_or_else(|| default_root(&cli.input)),
        input_path: cli.input.clone(),
        output_dir: cli.output_dir.clone(),
        layout,
        dwells: cli.points,
        noise_levels,
        seed: cli.seed,
        global_phase: cli.phase,
        spectrometer_freq_hz,
        manifest_path: cli.manifest.clone(),
    };

    let list = match read_line_list(&config.input_path) {
        Ok(l) => l,
        Err(e) => {
            error!("Failed to read line list: {e}");
            std::process::exit(1);
        }
    };

    info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    info!("  Input         : {:?}", config.input_path);
    info!("  Lines         : {}", list.lines.len());
    info!("  Dwell         : {} s", list.dwell_period);
    info!("  Pre-acq delay : {} s", list.pre_acq_delay);
    info!("  Layout        : {} ({} dwells)", config.layout, config.dwells);
    info!("  Noise levels  : {:?}", config.noise_levels);
    info!("  Seed          : {}", config.seed);
    info!("  Spectrometer  : {:.3} MHz", config.spectrometer_freq_hz / 1e6);
    info!("  Output        : {:?}/{}-*", config.output_dir, config.output_root);
    info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let manifest_path = config.manifest_path.clone();
    let pipeline = match GenerationPipeline::new(config) {
        Ok(p) => p,
        Err(e) => {
            error!("{e}");
            std::process::exit(1);
        }
    };

    let started = Instant::now();
    let manifest = match pipeline.run(&list) {
        Ok(m) => m,
        Err(e) => {
            error!("Generation failed: {e}");
            std::process::exit(1);
        }
    };

    if let Some(path) = manifest_path {
        if let Err(e) = write_manifest(&path, &manifest) {
            error!("Failed to write manifest {path:?}: {e}");
            std::process::exit(1);
        }
        info!("Manifest: {path:?}");
    }

    info!("\n{}", manifest.summary(&started));
    info!("✓ Generation complete: {:?}", pipeline.config().output_dir);
}
