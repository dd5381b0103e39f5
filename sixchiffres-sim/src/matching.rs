use std::collections::BTreeSet;

use sixchiffres_data::{Digit, POSITIONS};

use crate::error::InvalidGuessError;
use crate::ranking::PredictedSet;

/// Nombre à six chiffres saisi par l'utilisateur, réduit à l'ensemble de ses chiffres distincts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserGuess {
    digits: BTreeSet<Digit>,
}

impl UserGuess {
    pub fn parse(raw: &str) -> Result<Self, InvalidGuessError> {
        let len = raw.chars().count();
        if len != POSITIONS {
            return Err(InvalidGuessError::WrongLength { len });
        }
        let digits = raw
            .chars()
            .enumerate()
            .map(|(position, c)| {
                Digit::from_char(c).ok_or(InvalidGuessError::NonDigit { position, found: c })
            })
            .collect::<Result<BTreeSet<_>, _>>()?;
        Ok(Self { digits })
    }

    pub fn distinct_digits(&self) -> &BTreeSet<Digit> {
        &self.digits
    }

    /// |chiffres distincts de la saisie ∩ chiffres prédits|
    pub fn matches(&self, predicted: &PredictedSet) -> usize {
        self.digits.iter().filter(|&&d| predicted.contains(d)).count()
    }
}

pub fn match_count(raw: &str, predicted: &PredictedSet) -> Result<usize, InvalidGuessError> {
    Ok(UserGuess::parse(raw)?.matches(predicted))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn predicted(values: [u8; POSITIONS]) -> PredictedSet {
        PredictedSet::try_from(values).unwrap()
    }

    #[test]
    fn test_partial_match() {
        // {1,2,3,4,5,6} ∩ {1,2,9,8,7,6} = {1,2,6}
        assert_eq!(match_count("123456", &predicted([1, 2, 9, 8, 7, 6])), Ok(3));
        assert_eq!(match_count("123456", &predicted([1, 2, 3, 4, 9, 8])), Ok(4));
    }

    #[test]
    fn test_zero_match_is_not_an_error() {
        assert_eq!(match_count("000000", &predicted([1, 2, 9, 8, 7, 6])), Ok(0));
    }

    #[test]
    fn test_full_match_any_order() {
        assert_eq!(match_count("678921", &predicted([1, 2, 9, 8, 7, 6])), Ok(6));
    }

    #[test]
    fn test_duplicates_collapse() {
        // Trois chiffres distincts : au plus trois correspondances.
        assert_eq!(match_count("111222", &predicted([1, 2, 3, 4, 5, 6])), Ok(2));
        assert_eq!(match_count("112233", &predicted([1, 2, 3, 4, 5, 6])), Ok(3));
    }

    #[test]
    fn test_non_digit_rejected() {
        assert_eq!(
            match_count("12a456", &predicted([1, 2, 9, 8, 7, 6])),
            Err(InvalidGuessError::NonDigit { position: 2, found: 'a' })
        );
        assert!(match_count("12 456", &predicted([1, 2, 9, 8, 7, 6])).is_err());
        assert!(match_count("-12345", &predicted([1, 2, 9, 8, 7, 6])).is_err());
    }

    #[test]
    fn test_wrong_length_rejected() {
        let p = predicted([1, 2, 9, 8, 7, 6]);
        assert_eq!(match_count("", &p), Err(InvalidGuessError::WrongLength { len: 0 }));
        assert_eq!(match_count("12345", &p), Err(InvalidGuessError::WrongLength { len: 5 }));
        assert_eq!(match_count("1234567", &p), Err(InvalidGuessError::WrongLength { len: 7 }));
    }

    #[test]
    fn test_non_ascii_digits_rejected() {
        let p = predicted([1, 2, 9, 8, 7, 6]);
        assert!(matches!(
            match_count("١٢٣٤٥٦", &p),
            Err(InvalidGuessError::NonDigit { position: 0, .. })
        ));
    }

    #[test]
    fn test_match_bounded_by_distinct_digits() {
        let p = predicted([0, 1, 2, 3, 4, 5]);
        for raw in ["000000", "012345", "999999", "505050", "987654", "102938"] {
            let guess = UserGuess::parse(raw).unwrap();
            let m = guess.matches(&p);
            assert!(m <= guess.distinct_digits().len().min(6), "{raw}: {m}");
        }
    }
}
