use std::f64::consts::PI;

use nmrsim_core::{
    derive_seed, export_gnuplot, flatten_complex, make_seq_fid, make_sim_fid, make_sin_fid,
    read_data, read_header, NoiseInjector, ProNmrHeaderExt, ProNmrWriter, PRONMR_HEADER_SIZE,
    PRONMR_KEY_NAME,
};
use nmrsim_types::{
    AcquisitionParams, BlockType, Complex32, FidLayout, ProNmrHeader, SpectralLine, AQ_SIM, SHUFF,
};
use tempfile::NamedTempFile;

// ===========================================================================
// Helpers — эталонная конфигурация
// ===========================================================================

const NDWELLS: usize = 1024;

fn reference_params() -> AcquisitionParams {
    AcquisitionParams::new(0.001, 0.0, NDWELLS)
}

fn reference_line() -> SpectralLine {
    SpectralLine::new(1.0, 100.0, -5.0, 0.0)
}

fn noiseless_real() -> Vec<f32> {
    let p = reference_params();
    let mut fid = vec![0f32; p.fid_length];
    make_sin_fid(&mut fid, &[reference_line()], p.dwell_period, 0.0, p.pre_acq_delay, true)
        .unwrap();
    fid
}

// ===========================================================================
// Сценарий 1 — одноканальный FID без шума
// ===========================================================================

#[test]
fn test_reference_fid_first_and_middle_samples() {
    let fid = noiseless_real();

    assert!((fid[0] - 1.0).abs() < 1e-6, "cos(0) = 1, got {}", fid[0]);

    let t = reference_params().sample_time(512);
    let expected = (2.0 * PI * 100.0 * t).cos() * (-5.0 * t).exp();
    assert!(
        (fid[512] as f64 - expected).abs() < 1e-5,
        "fid[512] = {}, expected {expected}",
        fid[512]
    );
}

#[test]
fn test_reference_fid_zero_noise_unchanged() {
    let clean = noiseless_real();
    let mut noisy = clean.clone();

    NoiseInjector::from_seed(derive_seed(1, 0))
        .add_noise(&mut noisy, 0.0)
        .unwrap();

    assert_eq!(
        clean.iter().map(|v| v.to_bits()).collect::<Vec<_>>(),
        noisy.iter().map(|v| v.to_bits()).collect::<Vec<_>>()
    );
}

// ===========================================================================
// Сценарий 2 — тот же FID с шумом 1.28
// ===========================================================================

#[test]
fn test_reference_fid_noise_variance() {
    let sigma = 1.28_f64;
    let clean = noiseless_real();
    let mut noisy = clean.clone();

    NoiseInjector::from_seed(derive_seed(1, 8))
        .add_noise(&mut noisy, sigma)
        .unwrap();

    let residual: Vec<f64> = noisy
        .iter()
        .zip(&clean)
        .map(|(n, c)| (*n - *c) as f64)
        .collect();
    let n = residual.len() as f64;
    let mean = residual.iter().sum::<f64>() / n;
    let var = residual.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / (n - 1.0);

    let expected = sigma * sigma;
    assert!(
        (var - expected).abs() < 0.2 * expected,
        "variance {var}, expected ≈ {expected}"
    );
}

// ===========================================================================
// Файл ProNMR — заголовок + данные
// ===========================================================================

#[test]
fn test_pronmr_file_round_trip() {
    let p = reference_params();
    let mut fid = vec![Complex32::new(0.0, 0.0); p.fid_length];
    make_sim_fid(&mut fid, &[reference_line()], p.dwell_period, 0.0, p.pre_acq_delay, true)
        .unwrap();
    NoiseInjector::from_seed(11).add_noise(&mut fid, 0.01).unwrap();

    let data = flatten_complex(&fid);
    assert_eq!(data.len(), 2 * NDWELLS);

    let tmp = NamedTempFile::new().unwrap();
    let header = ProNmrHeader::for_fid(data.len(), &p, FidLayout::Complex).unwrap();
    let writer = ProNmrWriter::create(tmp.path(), header.clone()).unwrap();
    let stats = writer.write_fid(&data, 1, 1).unwrap();

    assert_eq!(stats.start_offset_bytes, PRONMR_HEADER_SIZE as u64);
    assert_eq!(stats.sectors_written, (2 * NDWELLS / 32) as u64);

    let file_len = std::fs::metadata(tmp.path()).unwrap().len();
    assert_eq!(file_len, (PRONMR_HEADER_SIZE + 2 * NDWELLS * 4) as u64);

    let h = read_header(tmp.path()).unwrap();
    assert_eq!(h, header);
    assert_eq!(h.key_name, PRONMR_KEY_NAME);
    assert_eq!(h.dataset_size as usize, 2 * NDWELLS);
    assert_eq!(h.points_collected as usize, 2 * NDWELLS);
    assert_eq!(h.num_records, 1);
    assert_eq!(h.num_scans, 1);
    assert!(h.has_status(AQ_SIM) && h.has_status(SHUFF));
    assert_eq!(h.block_offset(BlockType::Dat), 2);

    let back = read_data(
        tmp.path(),
        h.dataset_size as usize,
        h.block_offset(BlockType::Dat) as usize,
        1,
    )
    .unwrap();
    assert_eq!(back, data);
}

#[test]
fn test_raw_bytes_of_written_file() {
    let p = reference_params();
    let data: Vec<f32> = (0..64).map(|i| i as f32).collect();

    let tmp = NamedTempFile::new().unwrap();
    let header = ProNmrHeader::for_fid(64, &p, FidLayout::Sequential).unwrap();
    ProNmrWriter::create(tmp.path(), header)
        .unwrap()
        .write_fid(&data, 1, 1)
        .unwrap();

    let raw = std::fs::read(tmp.path()).unwrap();
    assert_eq!(&raw[0..6], b"\x05NMR86");
    assert_eq!(&raw[17..19], &64u16.to_le_bytes());
    assert_eq!(&raw[256..260], &0.0f32.to_le_bytes());
    assert_eq!(&raw[260..264], &1.0f32.to_le_bytes());
    assert_eq!(&raw[raw.len() - 4..], &63.0f32.to_le_bytes());
}

#[test]
fn test_sequential_fid_sign_convention_survives_file() {
    let p = reference_params();
    let line = SpectralLine::new(1.0, 0.0, 0.0, 90.0);
    let mut fid = vec![0f32; 2 * NDWELLS];
    make_seq_fid(&mut fid, &[line], p.dwell_period, 0.0, p.pre_acq_delay, true).unwrap();

    let tmp = NamedTempFile::new().unwrap();
    let header = ProNmrHeader::for_fid(fid.len(), &p, FidLayout::Sequential).unwrap();
    ProNmrWriter::create(tmp.path(), header)
        .unwrap()
        .write_fid(&fid, 1, 1)
        .unwrap();

    let back = read_data(tmp.path(), fid.len(), 2, 1).unwrap();
    assert!(back.iter().skip(1).step_by(2).all(|&v| (v + 1.0).abs() < 1e-6));
}

#[test]
fn test_gnuplot_dump_of_reference_fid() {
    let fid = noiseless_real();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ref-0.00.gp");

    export_gnuplot(&fid, &path).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = text.split('\n').collect();
    // 1024 строки данных + пустая строка + хвост после последнего '\n'
    assert_eq!(lines.len(), NDWELLS + 2);
    assert_eq!(lines[0], "1");
    assert_eq!(lines[NDWELLS], "");
    let v: f32 = lines[512].parse().unwrap();
    assert_eq!(v, fid[512]);
}
