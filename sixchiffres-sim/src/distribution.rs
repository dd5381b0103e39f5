use rand::Rng;

use sixchiffres_data::{DIGIT_COUNT, Digit};

use crate::error::DistributionError;
use crate::frequency::FrequencyTable;

pub const SUM_TOLERANCE: f64 = 1e-9;

/// Distribution catégorielle sur les chiffres 0..=9, normalisée.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProbabilityVector {
    probs: [f64; DIGIT_COUNT],
}

impl ProbabilityVector {
    pub fn get(&self, digit: Digit) -> f64 {
        self.probs[digit.index()]
    }

    pub fn as_slice(&self) -> &[f64; DIGIT_COUNT] {
        &self.probs
    }

    pub fn iter(&self) -> impl Iterator<Item = (Digit, f64)> + '_ {
        Digit::ALL.iter().map(|&d| (d, self.probs[d.index()]))
    }

    pub fn cumulative(&self) -> CumulativeDistribution {
        CumulativeDistribution::new(self)
    }
}

/// p[d] = freq[d] / total. Refuse un poids total nul plutôt que de produire des NaN.
pub fn build_distribution(table: &FrequencyTable) -> Result<ProbabilityVector, DistributionError> {
    let total = table.total();
    if total == 0 {
        return Err(DistributionError::ZeroWeight);
    }
    let total = total as f64;
    let probs = std::array::from_fn(|i| table.counts()[i] as f64 / total);
    let vector = ProbabilityVector { probs };
    debug_assert!((vector.probs.iter().sum::<f64>() - 1.0).abs() < SUM_TOLERANCE);
    Ok(vector)
}

/// Fonction de répartition sur 10 catégories, pour un tirage par inversion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CumulativeDistribution {
    cdf: [f64; DIGIT_COUNT],
    last: usize,
}

impl CumulativeDistribution {
    fn new(probs: &ProbabilityVector) -> Self {
        let mut cdf = [0.0f64; DIGIT_COUNT];
        let mut acc = 0.0f64;
        let mut last = 0;
        for (i, &p) in probs.probs.iter().enumerate() {
            acc += p;
            cdf[i] = acc;
            if p > 0.0 {
                last = i;
            }
        }
        // Les erreurs d'arrondi ne doivent jamais laisser u hors de la dernière catégorie non nulle.
        for c in &mut cdf[last..] {
            *c = 1.0;
        }
        Self { cdf, last }
    }

    /// Chiffre d'indice i tel que cdf[i-1] <= u < cdf[i]. Une catégorie de
    /// probabilité nulle a une largeur nulle et n'est jamais choisie.
    pub fn pick(&self, u: f64) -> Digit {
        let idx = self.cdf.partition_point(|&c| c <= u).min(self.last);
        Digit::ALL[idx]
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Digit {
        self.pick(rng.random::<f64>())
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    fn digit(v: u8) -> Digit {
        Digit::new(v).unwrap()
    }

    #[test]
    fn test_uniform_counts_give_uniform_vector() {
        let probs = build_distribution(&FrequencyTable::from_counts([100; 10])).unwrap();
        for (_, p) in probs.iter() {
            assert!((p - 0.1).abs() < 1e-12, "p = {p}");
        }
    }

    #[test]
    fn test_sums_to_one() {
        let tables = [
            [1, 2, 3, 4, 5, 6, 7, 8, 9, 10],
            [0, 0, 0, 0, 0, 1, 0, 0, 0, 0],
            [3, 0, 7, 0, 0, 11, 13, 0, 17, 1],
            [999_983, 1, 1, 1, 1, 1, 1, 1, 1, 7],
        ];
        for counts in tables {
            let probs = build_distribution(&FrequencyTable::from_counts(counts)).unwrap();
            let sum: f64 = probs.as_slice().iter().sum();
            assert!((sum - 1.0).abs() < SUM_TOLERANCE, "Sum = {sum} pour {counts:?}");
        }
    }

    #[test]
    fn test_zero_weight_is_error() {
        assert_eq!(
            build_distribution(&FrequencyTable::from_counts([0; 10])),
            Err(DistributionError::ZeroWeight)
        );
    }

    #[test]
    fn test_pick_boundaries() {
        let probs = build_distribution(&FrequencyTable::from_counts([1, 0, 1, 0, 0, 0, 0, 0, 2, 0])).unwrap();
        let cdf = probs.cumulative();
        assert_eq!(cdf.pick(0.0), digit(0));
        assert_eq!(cdf.pick(0.2499), digit(0));
        assert_eq!(cdf.pick(0.25), digit(2));
        assert_eq!(cdf.pick(0.4999), digit(2));
        assert_eq!(cdf.pick(0.5), digit(8));
        assert_eq!(cdf.pick(0.999_999_999), digit(8));
    }

    #[test]
    fn test_zero_probability_never_sampled() {
        let probs = build_distribution(&FrequencyTable::from_counts([0, 3, 0, 0, 1, 0, 0, 0, 0, 0])).unwrap();
        let cdf = probs.cumulative();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..10_000 {
            let d = cdf.sample(&mut rng);
            assert!(d == digit(1) || d == digit(4), "chiffre inattendu {d}");
        }
    }

    #[test]
    fn test_single_digit_distribution() {
        let probs = build_distribution(&FrequencyTable::from_counts([0, 0, 0, 0, 0, 12, 0, 0, 0, 0])).unwrap();
        assert_eq!(probs.get(digit(5)), 1.0);
        let cdf = probs.cumulative();
        let mut rng = StdRng::seed_from_u64(1);
        assert!((0..1_000).all(|_| cdf.sample(&mut rng) == digit(5)));
    }
}
