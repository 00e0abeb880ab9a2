use log::trace;
use nmrsim_types::{Complex32, NmrError, NmrResult};
use rand::{rngs::StdRng, Rng, SeedableRng};

/// Количество равномерных отсчётов на одно гауссово (центральная
/// предельная теорема).
pub const GAUSSIAN_TERMS: u32 = 20;

/// Генератор псевдослучайных отсчётов с явным зерном.
///
/// Каждый уровень шума владеет своим экземпляром, глобального состояния нет.
#[derive(Debug, Clone)]
pub struct RandomDeviate {
    rng: StdRng,
    seed: u64,
}

impl RandomDeviate {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Равномерный отсчёт в замкнутом интервале [0, 1].
    pub fn uniform(&mut self) -> f64 {
        self.rng.gen_range(0.0..=1.0)
    }

    /// Приближённо нормальный отсчёт с заданными средним и дисперсией.
    ///
    /// Сумма [`GAUSSIAN_TERMS`] равномерных отсчётов приводится к среднему 0
    /// и дисперсии 1 (у U[0,1] μ = 1/2, σ² = 1/12), затем масштабируется.
    pub fn gaussian(
        &mut self,
        mean: f64,
        variance: f64,
    ) -> f64 {
        let k = GAUSSIAN_TERMS as f64;
        let mut sum = 0.0;

        for _ in 0..GAUSSIAN_TERMS {
            sum += self.uniform();
        }

        sum -= k / 2.0;
        sum *= (12.0 / k).sqrt();

        mean + variance.sqrt() * sum
    }
}

/// Зерно для уровня шума `index`, производное от базового.
///
/// Разные индексы дают разные потоки, одинаковые — одинаковые.
pub fn derive_seed(
    base_seed: u64,
    index: u64,
) -> u64 {
    // splitmix64
    let mut z = base_seed.wrapping_add(index.wrapping_add(1).wrapping_mul(0x9E37_79B9_7F4A_7C15));
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Выборка, к которой можно добавить гауссов шум.
pub trait NoiseSample {
    /// Добавляет независимый шум с дисперсией `variance` к каждой компоненте.
    fn perturb(
        &mut self,
        rng: &mut RandomDeviate,
        variance: f64,
    );
}

impl NoiseSample for f32 {
    fn perturb(
        &mut self,
        rng: &mut RandomDeviate,
        variance: f64,
    ) {
        *self += rng.gaussian(0.0, variance) as f32;
    }
}

impl NoiseSample for Complex32 {
    fn perturb(
        &mut self,
        rng: &mut RandomDeviate,
        variance: f64,
    ) {
        let re = rng.gaussian(0.0, variance) as f32;
        let im = rng.gaussian(0.0, variance) as f32;
        self.re += re;
        self.im += im;
    }
}

/// Добавляет гауссов шум к буферам FID.
#[derive(Debug, Clone)]
pub struct NoiseInjector {
    rng: RandomDeviate,
}

impl NoiseInjector {
    pub fn new(rng: RandomDeviate) -> Self {
        Self { rng }
    }

    pub fn from_seed(seed: u64) -> Self {
        Self::new(RandomDeviate::new(seed))
    }

    /// Добавляет шум со стандартным отклонением `std_dev` к каждой выборке.
    ///
    /// При `std_dev == 0` буфер не меняется ни на бит.
    pub fn add_noise<S: NoiseSample>(
        &mut self,
        buffer: &mut [S],
        std_dev: f64,
    ) -> NmrResult<()> {
        if !std_dev.is_finite() || std_dev < 0.0 {
            return Err(NmrError::Precondition(format!(
                "noise std dev must be finite and >= 0, got {std_dev}"
            )));
        }

        if std_dev == 0.0 {
            trace!("Zero noise level, buffer left as is");
            return Ok(());
        }

        let variance = std_dev * std_dev;
        for sample in buffer.iter_mut() {
            sample.perturb(&mut self.rng, variance);
        }

        Ok(())
    }

    /// Зерно, которым инициализирован генератор.
    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }
}
