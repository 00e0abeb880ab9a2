use crate::{AQ_SEQ, AQ_SIM, SHUFF};

/// Раскладка выходных каналов при синтезе FID.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FidLayout {
    /// Одновременная квадратура: комплексные пары (re, im)
    Complex,
    /// Последовательная квадратура: re в чётных индексах, -im в нечётных
    Sequential,
    /// Один канал: только косинусная составляющая
    Single,
}

impl FidLayout {
    /// Биты статуса, которые выставляются в заголовке для этой раскладки.
    pub fn status_flags(&self) -> u16 {
        match self {
            FidLayout::Complex => AQ_SIM | SHUFF,
            FidLayout::Sequential => AQ_SEQ,
            FidLayout::Single => 0,
        }
    }

    /// Количество f32 значений области данных на один dwell.
    ///
    /// Последовательная квадратура пишет re и -im в соседние ячейки,
    /// поэтому занимает столько же, сколько комплексная раскладка.
    pub fn values_per_dwell(&self) -> usize {
        match self {
            FidLayout::Complex | FidLayout::Sequential => 2,
            FidLayout::Single => 1,
        }
    }
}

impl std::fmt::Display for FidLayout {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        match self {
            FidLayout::Complex => write!(f, "sim"),
            FidLayout::Sequential => write!(f, "seq"),
            FidLayout::Single => write!(f, "sin"),
        }
    }
}

impl std::str::FromStr for FidLayout {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sim" | "complex" | "simultaneous" => Ok(FidLayout::Complex),
            "seq" | "sequential" => Ok(FidLayout::Sequential),
            "sin" | "single" | "real" => Ok(FidLayout::Single),
            _ => Err(format!("Unknown FID layout: '{s}'. Use: sim, seq, sin")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_fromstr() {
        assert_eq!("sim".parse::<FidLayout>().unwrap(), FidLayout::Complex);
        assert_eq!("SEQ".parse::<FidLayout>().unwrap(), FidLayout::Sequential);
        assert_eq!("sin".parse::<FidLayout>().unwrap(), FidLayout::Single);
        assert!("fft".parse::<FidLayout>().is_err());
    }

    #[test]
    fn test_values_per_dwell() {
        assert_eq!(FidLayout::Complex.values_per_dwell(), 2);
        assert_eq!(FidLayout::Sequential.values_per_dwell(), 2);
        assert_eq!(FidLayout::Single.values_per_dwell(), 1);
    }

    #[test]
    fn test_layout_status_flags() {
        assert_eq!(FidLayout::Complex.status_flags(), 48);
        assert_eq!(FidLayout::Sequential.status_flags(), AQ_SEQ);
        assert_eq!(FidLayout::Single.status_flags(), 0);
    }
}
