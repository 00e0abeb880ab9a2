//! Пример: запись ProNMR-файла с синтетическим FID
//!
//! Демонстрирует:
//! - синтез комплексного FID из трёх линий
//! - добавление шума
//! - запись заголовка и данных через ProNmrWriter

use nmrsim_core::{flatten_complex, make_sim_fid, NoiseInjector, ProNmrHeaderExt, ProNmrWriter};
use nmrsim_types::{AcquisitionParams, Complex32, FidLayout, ProNmrHeader, SpectralLine};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Путь можно передать первым аргументом, иначе файл пишется в текущий каталог
    let output_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "test_output-0.05p".to_string());

    // --- Параметры и линии ---
    let params = AcquisitionParams::new(0.001, 0.0, 1024);
    let lines = [
        SpectralLine::new(1.0, 100.0, -5.0, 0.0),
        SpectralLine::new(0.5, -60.0, -12.0, 30.0),
        SpectralLine::new(0.25, 210.0, -3.0, 0.0),
    ];

    // --- Синтез + шум ---
    let mut fid = vec![Complex32::new(0.0, 0.0); params.fid_length];
    make_sim_fid(&mut fid, &lines, params.dwell_period, 0.0, params.pre_acq_delay, true)?;
    NoiseInjector::from_seed(1).add_noise(&mut fid, 0.05)?;

    // --- Файл ---
    let data = flatten_complex(&fid);
    let header = ProNmrHeader::for_fid(data.len(), &params, FidLayout::Complex)?;
    let writer = ProNmrWriter::create(&output_path, header)?;
    let stats = writer.write_fid(&data, 1, 1)?;

    println!("✓ Записано: {output_path}");
    println!("  Lines    : {}", lines.len());
    println!("  Points   : {}", stats.points_written);
    println!("  Sectors  : {}", stats.sectors_written);

    Ok(())
}
