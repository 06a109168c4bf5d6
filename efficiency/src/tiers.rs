use crate::Measured;

const THRESHOLDS: [f64; 9] = [0.9, 0.8, 0.7, 0.6, 0.5, 0.4, 0.3, 0.2, 0.1];

/// Histogram of how closely wearable readings match ACSM NET kcal/min.
#[derive(Debug, Clone, PartialEq)]
pub struct AgreementTiers {
    /// `(threshold, count in this 10% band, count at or above threshold)`
    tiers: [(f64, usize, usize); THRESHOLDS.len()],
    below: usize,
    total: usize,
}

impl Default for AgreementTiers {
    fn default() -> Self {
        Self {
            tiers: THRESHOLDS.map(|threshold| (threshold, 0, 0)),
            below: 0,
            total: 0,
        }
    }
}

impl AgreementTiers {
    /// Add symmetric agreement `precision` in `0..=1`.
    pub fn record(&mut self, precision: f64) {
        self.total += 1;

        match self
            .tiers
            .iter_mut()
            .find(|(threshold, _, _)| precision >= *threshold)
        {
            Some((_, count, _)) => *count += 1,
            None => self.below += 1,
        }

        for (_, _, count) in self
            .tiers
            .iter_mut()
            .filter(|(threshold, _, _)| precision >= *threshold)
        {
            *count += 1;
        }
    }

    pub fn record_measured(&mut self, measured: &Measured) {
        if let Some(precision) = measured.precision() {
            self.record(precision);
        }
    }

    pub fn tiers(&self) -> impl Iterator<Item = (f64, usize, usize)> + '_ {
        self.tiers.iter().copied()
    }

    pub const fn below(&self) -> usize {
        self.below
    }

    pub const fn total(&self) -> usize {
        self.total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record() {
        let mut tiers = AgreementTiers::default();
        for precision in [0.95, 0.9, 0.85, 0.42, 0.05] {
            tiers.record(precision);
        }

        let tiers_vec = tiers.tiers().collect::<Vec<_>>();

        assert_eq!(tiers_vec[0], (0.9, 2, 2));
        assert_eq!(tiers_vec[1], (0.8, 1, 3));
        assert_eq!(tiers_vec[5], (0.4, 1, 4));
        assert_eq!(tiers_vec[8], (0.1, 0, 4));
        assert_eq!(tiers.below(), 1);
        assert_eq!(tiers.total(), 5);
    }

    #[test]
    fn test_record_measured_without_agreement() {
        let mut tiers = AgreementTiers::default();
        tiers.record_measured(&Measured {
            kcal_min: 3.0,
            metabolic_power_w: 209.34,
            efficiency: Some(0.0),
            agreement: None,
        });

        assert_eq!(tiers.total(), 0);
    }
}
