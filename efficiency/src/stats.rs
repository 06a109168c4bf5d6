/// z-score for a two-sided 95% normal band
pub const Z_95: f64 = 1.96;

/// Descriptive statistics of a sample.
#[derive(Debug, Clone, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Descriptive {
    pub n: usize,
    pub mean: f64,
    /// Sample standard deviation, `n - 1` in denominator
    pub std_dev: Option<f64>,
    pub min: f64,
    pub max: f64,
}

impl Descriptive {
    /// Returns `None` for an empty sample. Non-finite values are ignored.
    pub fn from_samples(samples: impl IntoIterator<Item = f64>) -> Option<Self> {
        let samples = samples
            .into_iter()
            .filter(|this| this.is_finite())
            .collect::<Vec<_>>();

        if samples.is_empty() {
            return None;
        }

        let n = samples.len();
        let mean = samples.iter().sum::<f64>() / n as f64;

        let std_dev = match n {
            1 => None,
            _ => Some(
                (samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1) as f64).sqrt(),
            ),
        };

        let (min, max) = samples
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), x| {
                (min.min(*x), max.max(*x))
            });

        Some(Self {
            n,
            mean,
            std_dev,
            min,
            max,
        })
    }

    /// Standard error of the mean
    pub fn sem(&self) -> Option<f64> {
        self.std_dev.map(|sd| sd / (self.n as f64).sqrt())
    }

    /// `mean ± 1.96 * sem`
    pub fn ci95(&self) -> Option<(f64, f64)> {
        self.sem()
            .map(|sem| (self.mean - Z_95 * sem, self.mean + Z_95 * sem))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn test_empty() {
        assert_eq!(Descriptive::from_samples([]), None);
        assert_eq!(Descriptive::from_samples([f64::NAN]), None);
    }

    #[test]
    fn test_single() {
        let stats = Descriptive::from_samples([0.15]).unwrap();
        assert_eq!(stats.n, 1);
        assert_eq!(stats.mean, 0.15);
        assert_eq!(stats.std_dev, None);
        assert_eq!(stats.sem(), None);
        assert_eq!(stats.ci95(), None);
        assert_eq!((stats.min, stats.max), (0.15, 0.15));
    }

    #[test]
    fn test_sample() {
        let stats = Descriptive::from_samples([2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();

        assert_eq!(stats.n, 8);
        assert_relative_eq!(stats.mean, 5.0);
        // population sd is 2, sample sd is sqrt(32 / 7)
        assert_relative_eq!(stats.std_dev.unwrap(), (32.0_f64 / 7.0).sqrt(), epsilon = 1e-12);
        assert_eq!((stats.min, stats.max), (2.0, 9.0));

        let sem = stats.sem().unwrap();
        assert_relative_eq!(sem, (32.0_f64 / 7.0).sqrt() / 8.0_f64.sqrt(), epsilon = 1e-12);

        let (lo, hi) = stats.ci95().unwrap();
        assert_relative_eq!(hi - stats.mean, stats.mean - lo, epsilon = 1e-12);
        assert_relative_eq!(hi - lo, 2.0 * Z_95 * sem, epsilon = 1e-12);
    }

    #[test]
    fn test_ignores_non_finite() {
        let stats = Descriptive::from_samples([1.0, f64::NAN, 3.0, f64::INFINITY]).unwrap();
        assert_eq!(stats.n, 2);
        assert_relative_eq!(stats.mean, 2.0);
    }
}
