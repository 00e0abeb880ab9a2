use serde::Serialize;

/// Одна спектральная линия: затухающая синусоида.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SpectralLine {
    /// Амплитуда (площадь пика, == значение при t = 0)
    pub amplitude: f64,
    /// Частота во вращающейся системе координат, Гц
    pub frequency: f64,
    /// Коэффициент затухания, 1/с (отрицательный = спад)
    pub damping: f64,
    /// Фаза при t = 0, градусы
    pub phase: f64,
}

impl SpectralLine {
    pub fn new(
        amplitude: f64,
        frequency: f64,
        damping: f64,
        phase: f64,
    ) -> Self {
        Self {
            amplitude,
            frequency,
            damping,
            phase,
        }
    }

    /// Та же линия со сдвигом фазы (градусы).
    pub fn with_phase_offset(
        &self,
        offset_deg: f64,
    ) -> Self {
        Self {
            phase: self.phase + offset_deg,
            ..*self
        }
    }
}
