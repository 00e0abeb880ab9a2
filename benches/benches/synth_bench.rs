//! Синтез FID, шум и запись области данных.
//!
//! Запуск: cargo bench -p nmrsim-benchmark

use std::{hint::black_box, io::Cursor};

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use nmrsim_core::{flatten_complex, make_sim_fid, write_data_to, NoiseInjector};
use nmrsim_types::{Complex32, SpectralLine};

fn lines(n: usize) -> Vec<SpectralLine> {
    (0..n)
        .map(|i| SpectralLine::new(1.0 / (i + 1) as f64, 20.0 * i as f64 - 150.0, -3.0, 15.0 * i as f64))
        .collect()
}

fn bench_make_sim_fid(c: &mut Criterion) {
    let mut group = c.benchmark_group("make_sim_fid");

    for &n_lines in &[1usize, 8, 64] {
        let lines = lines(n_lines);
        let mut fid = vec![Complex32::new(0.0, 0.0); 4096];

        group.throughput(Throughput::Elements((fid.len() * n_lines) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n_lines), &lines, |b, lines| {
            b.iter(|| make_sim_fid(black_box(&mut fid), lines, 0.001, 0.0, 0.0, true))
        });
    }

    group.finish();
}

fn bench_add_noise(c: &mut Criterion) {
    let mut group = c.benchmark_group("add_noise");
    let mut fid = vec![Complex32::new(0.0, 0.0); 4096];
    let mut injector = NoiseInjector::from_seed(1);

    group.throughput(Throughput::Elements(fid.len() as u64));
    group.bench_function("complex_4096", |b| {
        b.iter(|| injector.add_noise(black_box(&mut fid), 0.32))
    });

    group.finish();
}

fn bench_write_data(c: &mut Criterion) {
    let mut group = c.benchmark_group("write_data");
    let mut fid = vec![Complex32::new(0.0, 0.0); 8192];
    make_sim_fid(&mut fid, &lines(4), 0.001, 0.0, 0.0, true).unwrap();
    let data = flatten_complex(&fid);

    group.throughput(Throughput::Bytes((data.len() * 4) as u64));
    group.bench_function("cursor_16k_points", |b| {
        b.iter(|| {
            let mut out = Cursor::new(Vec::with_capacity(256 + data.len() * 4));
            write_data_to(&mut out, black_box(&data), 2, 1, 1).unwrap()
        })
    });

    group.finish();
}

criterion_group!(benches, bench_make_sim_fid, bench_add_noise, bench_write_data);
criterion_main!(benches);
