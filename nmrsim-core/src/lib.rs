//! Ядро nmrsim
//!
//! Синтез искусственных FID (сумма затухающих синусоид), добавление
//! гауссова шума и эталонная реализация формата файлов ProNMR.
//!
//! # Быстрый старт
//!
//! ```no_run
//! use nmrsim_core::{
//!     flatten_complex, make_sim_fid, NoiseInjector, ProNmrHeaderExt, ProNmrWriter,
//! };
//! use nmrsim_types::{AcquisitionParams, Complex32, FidLayout, ProNmrHeader, SpectralLine};
//!
//! let params = AcquisitionParams::new(0.001, 0.0, 1024);
//! let lines = [SpectralLine::new(1.0, 100.0, -5.0, 0.0)];
//!
//! let mut fid = vec![Complex32::new(0.0, 0.0); params.fid_length];
//! make_sim_fid(&mut fid, &lines, params.dwell_period, 0.0, params.pre_acq_delay, true)?;
//! NoiseInjector::from_seed(1).add_noise(&mut fid, 0.01)?;
//!
//! let data = flatten_complex(&fid);
//! let header = ProNmrHeader::for_fid(data.len(), &params, FidLayout::Complex)?;
//! let writer = ProNmrWriter::create("signal-0.01p", header)?;
//! writer.write_fid(&data, 1, 1)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod binary;
pub mod format;
pub mod gnuplot;
pub mod noise;
pub mod serialization;
pub mod synth;

pub use binary::*;
pub use format::*;
pub use gnuplot::*;
pub use noise::*;
pub use serialization::*;
pub use synth::*;

/// Версия библиотеки.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
