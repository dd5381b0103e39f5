use std::cmp::Reverse;

use sixchiffres_data::{DIGIT_COUNT, Digit, POSITIONS};

use crate::sampler::SimulationTally;

/// Les six chiffres les plus tirés, dans l'ordre du classement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PredictedSet {
    digits: [Digit; POSITIONS],
}

impl PredictedSet {
    pub fn contains(&self, digit: Digit) -> bool {
        self.digits.contains(&digit)
    }

    pub fn digits(&self) -> &[Digit; POSITIONS] {
        &self.digits
    }
}

impl TryFrom<[u8; POSITIONS]> for PredictedSet {
    type Error = [u8; POSITIONS];

    /// Six chiffres distincts, sinon rend les valeurs telles quelles.
    fn try_from(values: [u8; POSITIONS]) -> Result<Self, Self::Error> {
        let mut digits = [Digit::ALL[0]; POSITIONS];
        for (i, &v) in values.iter().enumerate() {
            let digit = Digit::new(v).ok_or(values)?;
            if digits[..i].contains(&digit) {
                return Err(values);
            }
            digits[i] = digit;
        }
        Ok(Self { digits })
    }
}

/// Ordre total : nombre de tirages décroissant, puis valeur du chiffre croissante.
pub fn rank_digits(tally: &SimulationTally) -> [(Digit, u64); DIGIT_COUNT] {
    let mut ranked = Digit::ALL.map(|d| (d, tally.get(d)));
    ranked.sort_by_key(|&(digit, count)| (Reverse(count), digit));
    ranked
}

pub fn predict_digits(tally: &SimulationTally) -> PredictedSet {
    let ranked = rank_digits(tally);
    PredictedSet {
        digits: std::array::from_fn(|i| ranked[i].0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(set: &PredictedSet) -> Vec<u8> {
        set.digits().iter().map(|d| d.value()).collect()
    }

    #[test]
    fn test_top_six_by_count() {
        let tally = SimulationTally::from_counts([5, 90, 10, 80, 20, 70, 30, 60, 40, 50], 75);
        let predicted = predict_digits(&tally);
        assert_eq!(values(&predicted), vec![1, 3, 5, 7, 9, 8]);
        assert!(!predicted.contains(Digit::new(0).unwrap()));
    }

    #[test]
    fn test_ties_broken_by_digit_value() {
        let tally = SimulationTally::from_counts([7, 7, 9, 7, 7, 9, 7, 7, 7, 7], 12);
        let ranked: Vec<u8> = rank_digits(&tally).iter().map(|(d, _)| d.value()).collect();
        assert_eq!(ranked, vec![2, 5, 0, 1, 3, 4, 6, 7, 8, 9]);
        assert_eq!(values(&predict_digits(&tally)), vec![2, 5, 0, 1, 3, 4]);
    }

    #[test]
    fn test_ranking_deterministic() {
        let tally = SimulationTally::from_counts([3, 3, 3, 3, 3, 3, 3, 3, 3, 3], 5);
        let first = predict_digits(&tally);
        for _ in 0..10 {
            assert_eq!(predict_digits(&tally), first);
        }
        assert_eq!(values(&first), vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_predicted_digits_distinct() {
        let tally = SimulationTally::from_counts([0, 0, 0, 0, 0, 600, 0, 0, 0, 0], 100);
        let mut v = values(&predict_digits(&tally));
        assert_eq!(v[0], 5);
        v.sort();
        v.dedup();
        assert_eq!(v.len(), 6);
    }

    #[test]
    fn test_try_from_values() {
        assert!(PredictedSet::try_from([1, 2, 9, 8, 7, 6]).is_ok());
        assert!(PredictedSet::try_from([1, 2, 9, 8, 7, 7]).is_err());
        assert!(PredictedSet::try_from([1, 2, 9, 8, 7, 10]).is_err());
    }
}
