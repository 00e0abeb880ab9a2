//! Синтез FID: сумма затухающих синусоид.
//!
//! Все три раскладки (комплексная, последовательная квадратура, один канал)
//! используют одно и то же рекуррентное состояние [`LineRecurrence`]:
//! `decay *= exp(damping·dwell)`, `angle += 2π·frequency·dwell`. Рекуррентность
//! считается в f64, в буфер добавляется уже суженный до f32 вклад.

use std::f64::consts::PI;

use nmrsim_types::{AcquisitionParams, Complex32, FidLayout, NmrError, NmrResult, SpectralLine};

/// Рекуррентное состояние одной спектральной линии.
#[derive(Debug, Clone)]
pub struct LineRecurrence {
    amplitude: f64,
    decay: f64,
    angle: f64,
    decay_step: f64,
    angle_step: f64,
}

impl LineRecurrence {
    /// Начальное состояние в момент первой выборки (`pre_acq_delay`).
    pub fn new(
        line: &SpectralLine,
        dwell_period: f64,
        pre_acq_delay: f64,
    ) -> Self {
        let omega = 2.0 * PI * line.frequency;

        Self {
            amplitude: line.amplitude,
            decay: (line.damping * pre_acq_delay).exp(),
            angle: omega * pre_acq_delay + line.phase.to_radians(),
            decay_step: (line.damping * dwell_period).exp(),
            angle_step: omega * dwell_period,
        }
    }

    /// Текущее значение (re, im) линии.
    #[inline]
    pub fn value(&self) -> (f64, f64) {
        let (sin, cos) = self.angle.sin_cos();
        let a = self.amplitude * self.decay;
        (a * cos, a * sin)
    }

    /// Переход к следующей выборке.
    #[inline]
    pub fn advance(&mut self) {
        self.decay *= self.decay_step;
        self.angle += self.angle_step;
    }
}

/// Изменяемый буфер FID вместе с его раскладкой.
#[derive(Debug)]
pub enum FidBuffer<'a> {
    /// Одновременная квадратура: комплексные пары
    Complex(&'a mut [Complex32]),
    /// Последовательная квадратура: re, -im, re, -im, ...
    Sequential(&'a mut [f32]),
    /// Один канал: только косинус
    Single(&'a mut [f32]),
}

impl FidBuffer<'_> {
    pub fn layout(&self) -> FidLayout {
        match self {
            FidBuffer::Complex(_) => FidLayout::Complex,
            FidBuffer::Sequential(_) => FidLayout::Sequential,
            FidBuffer::Single(_) => FidLayout::Single,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            FidBuffer::Complex(b) => b.len(),
            FidBuffer::Sequential(b) | FidBuffer::Single(b) => b.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Обнуляет буфер.
    pub fn clear(&mut self) {
        match self {
            FidBuffer::Complex(b) => b.fill(Complex32::new(0.0, 0.0)),
            FidBuffer::Sequential(b) | FidBuffer::Single(b) => b.fill(0.0),
        }
    }

    fn check(&self) -> NmrResult<()> {
        if self.is_empty() {
            return Err(NmrError::precondition("FID buffer is empty"));
        }

        if self.layout() == FidLayout::Sequential && self.len() % 2 != 0 {
            return Err(NmrError::Precondition(format!(
                "sequential FID needs an even length, got {}",
                self.len()
            )));
        }

        Ok(())
    }

    /// Добавляет в буфер вклад одной линии.
    ///
    /// Если `zero_first`, буфер сначала обнуляется.
    pub fn add_line(
        &mut self,
        line: &SpectralLine,
        dwell_period: f64,
        pre_acq_delay: f64,
        zero_first: bool,
    ) -> NmrResult<()> {
        self.check()?;

        if zero_first {
            self.clear();
        }

        let mut rec = LineRecurrence::new(line, dwell_period, pre_acq_delay);

        match self {
            FidBuffer::Complex(fid) => {
                for sample in fid.iter_mut() {
                    let (re, im) = rec.value();
                    sample.re += re as f32;
                    sample.im += im as f32;
                    rec.advance();
                }
            }
            FidBuffer::Sequential(fid) => {
                // Мнимый канал инвертирован: так регистрирует прибор.
                for pair in fid.chunks_exact_mut(2) {
                    pair[0] += rec.value().0 as f32;
                    rec.advance();
                    pair[1] -= rec.value().1 as f32;
                    rec.advance();
                }
            }
            FidBuffer::Single(fid) => {
                for sample in fid.iter_mut() {
                    *sample += rec.value().0 as f32;
                    rec.advance();
                }
            }
        }

        Ok(())
    }
}

/// Добавляет линию в комплексный FID (одновременная квадратура).
pub fn add_line_complex(
    fid: &mut [Complex32],
    line: &SpectralLine,
    dwell_period: f64,
    pre_acq_delay: f64,
    zero_first: bool,
) -> NmrResult<()> {
    FidBuffer::Complex(fid).add_line(line, dwell_period, pre_acq_delay, zero_first)
}

/// Добавляет линию в вещественный FID с последовательной квадратурой.
pub fn add_line_seq(
    fid: &mut [f32],
    line: &SpectralLine,
    dwell_period: f64,
    pre_acq_delay: f64,
    zero_first: bool,
) -> NmrResult<()> {
    FidBuffer::Sequential(fid).add_line(line, dwell_period, pre_acq_delay, zero_first)
}

/// Добавляет линию в одноканальный вещественный FID.
pub fn add_line_sin(
    fid: &mut [f32],
    line: &SpectralLine,
    dwell_period: f64,
    pre_acq_delay: f64,
    zero_first: bool,
) -> NmrResult<()> {
    FidBuffer::Single(fid).add_line(line, dwell_period, pre_acq_delay, zero_first)
}

/// Строит полный FID по списку линий.
#[derive(Debug, Clone, Copy)]
pub struct FidBuilder {
    pub dwell_period: f64,
    pub pre_acq_delay: f64,
    /// Сдвиг фазы, добавляемый к фазе каждой линии (градусы)
    pub global_phase: f64,
}

impl FidBuilder {
    pub fn new(
        dwell_period: f64,
        global_phase: f64,
        pre_acq_delay: f64,
    ) -> Self {
        Self {
            dwell_period,
            pre_acq_delay,
            global_phase,
        }
    }

    /// Обнуляет буфер (если `zero_first`) и добавляет все линии по очереди.
    pub fn build(
        &self,
        mut buffer: FidBuffer<'_>,
        lines: &[SpectralLine],
        zero_first: bool,
    ) -> NmrResult<()> {
        buffer.check()?;

        if zero_first {
            buffer.clear();
        }

        for line in lines {
            let shifted = line.with_phase_offset(self.global_phase);
            buffer.add_line(&shifted, self.dwell_period, self.pre_acq_delay, false)?;
        }

        Ok(())
    }
}

impl From<&AcquisitionParams> for FidBuilder {
    fn from(p: &AcquisitionParams) -> Self {
        Self::new(p.dwell_period, p.global_phase, p.pre_acq_delay)
    }
}

/// Комплексный FID (одновременная квадратура) по списку линий.
pub fn make_sim_fid(
    fid: &mut [Complex32],
    lines: &[SpectralLine],
    dwell_period: f64,
    global_phase: f64,
    pre_acq_delay: f64,
    zero_first: bool,
) -> NmrResult<()> {
    FidBuilder::new(dwell_period, global_phase, pre_acq_delay).build(
        FidBuffer::Complex(fid),
        lines,
        zero_first,
    )
}

/// Вещественный FID с последовательной квадратурой по списку линий.
pub fn make_seq_fid(
    fid: &mut [f32],
    lines: &[SpectralLine],
    dwell_period: f64,
    global_phase: f64,
    pre_acq_delay: f64,
    zero_first: bool,
) -> NmrResult<()> {
    FidBuilder::new(dwell_period, global_phase, pre_acq_delay).build(
        FidBuffer::Sequential(fid),
        lines,
        zero_first,
    )
}

/// Одноканальный FID по списку линий.
pub fn make_sin_fid(
    fid: &mut [f32],
    lines: &[SpectralLine],
    dwell_period: f64,
    global_phase: f64,
    pre_acq_delay: f64,
    zero_first: bool,
) -> NmrResult<()> {
    FidBuilder::new(dwell_period, global_phase, pre_acq_delay).build(
        FidBuffer::Single(fid),
        lines,
        zero_first,
    )
}
