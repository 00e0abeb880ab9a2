//! Чтение входного списка линий.
//!
//! Формат: первая строка — `dwell pre_delay`, каждая следующая —
//! `amplitude frequency damping phase`. Пустые (или состоящие из пробелов)
//! строки пропускаются и линиями не считаются.

use std::path::{Path, PathBuf};

use log::debug;
use nmrsim_types::{AcquisitionParams, SpectralLine};

use crate::{GeneratorError, GeneratorResult};

/// Содержимое входного файла.
#[derive(Debug, Clone, PartialEq)]
pub struct LineList {
    /// Период дискретизации, с
    pub dwell_period: f64,
    /// Задержка перед регистрацией, с
    pub pre_acq_delay: f64,
    /// Спектральные линии в порядке файла
    pub lines: Vec<SpectralLine>,
}

impl LineList {
    /// Параметры сбора данных для FID из `fid_length` точек.
    pub fn acquisition(
        &self,
        fid_length: usize,
        global_phase: f64,
    ) -> AcquisitionParams {
        AcquisitionParams {
            global_phase,
            ..AcquisitionParams::new(self.dwell_period, self.pre_acq_delay, fid_length)
        }
    }
}

/// Читает и разбирает файл списка линий.
pub fn read_line_list<P: AsRef<Path>>(path: P) -> GeneratorResult<LineList> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)?;
    let list = parse_line_list(path, &text)?;

    debug!("Read {} lines from {:?}", list.lines.len(), path);

    Ok(list)
}

/// Разбирает текст списка линий; `path` нужен только для сообщений об ошибках.
pub fn parse_line_list(
    path: &Path,
    text: &str,
) -> GeneratorResult<LineList> {
    let mut records = text
        .lines()
        .enumerate()
        .map(|(i, l)| (i + 1, l))
        .filter(|(_, l)| !l.trim().is_empty());

    let (first_no, first) = records.next().ok_or_else(|| GeneratorError::Parse {
        path: path.to_path_buf(),
        line: 1,
        content: String::new(),
        reason: "empty input, expected 'dwell pre_delay'".to_string(),
    })?;

    let [dwell_period, pre_acq_delay] = parse_fields::<2>(path, first_no, first)?;

    if dwell_period <= 0.0 {
        return Err(parse_error(
            path,
            first_no,
            first,
            "dwell period must be > 0",
        ));
    }

    let lines = records
        .map(|(no, l)| {
            let [amplitude, frequency, damping, phase] = parse_fields::<4>(path, no, l)?;
            Ok(SpectralLine::new(amplitude, frequency, damping, phase))
        })
        .collect::<GeneratorResult<Vec<_>>>()?;

    Ok(LineList {
        dwell_period,
        pre_acq_delay,
        lines,
    })
}

fn parse_fields<const N: usize>(
    path: &Path,
    line_no: usize,
    line: &str,
) -> GeneratorResult<[f64; N]> {
    let tokens: Vec<&str> = line.split_whitespace().collect();

    if tokens.len() != N {
        return Err(parse_error(
            path,
            line_no,
            line,
            &format!("expected {N} numbers, found {}", tokens.len()),
        ));
    }

    let mut out = [0.0; N];
    for (slot, tok) in out.iter_mut().zip(&tokens) {
        *slot = tok
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| parse_error(path, line_no, line, &format!("'{tok}' is not a number")))?;
    }

    Ok(out)
}

fn parse_error(
    path: &Path,
    line: usize,
    content: &str,
    reason: &str,
) -> GeneratorError {
    GeneratorError::Parse {
        path: PathBuf::from(path),
        line,
        content: content.trim().to_string(),
        reason: reason.to_string(),
    }
}
