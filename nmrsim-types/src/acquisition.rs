use serde::Serialize;

/// Параметры сбора данных, общие для всего прогона синтеза.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AcquisitionParams {
    /// Период дискретизации (dwell), секунды на выборку
    pub dwell_period: f64,
    /// Задержка перед первой выборкой, секунды
    pub pre_acq_delay: f64,
    /// Количество точек FID (dwell-ов)
    pub fid_length: usize,
    /// Общий сдвиг фазы для всех линий, градусы
    pub global_phase: f64,
}

impl AcquisitionParams {
    pub fn new(
        dwell_period: f64,
        pre_acq_delay: f64,
        fid_length: usize,
    ) -> Self {
        Self {
            dwell_period,
            pre_acq_delay,
            fid_length,
            global_phase: 0.0,
        }
    }

    /// Момент времени выборки `index`, секунды.
    pub fn sample_time(
        &self,
        index: usize,
    ) -> f64 {
        self.pre_acq_delay + index as f64 * self.dwell_period
    }
}

impl Default for AcquisitionParams {
    fn default() -> Self {
        Self::new(0.001, 0.0, 1024)
    }
}
