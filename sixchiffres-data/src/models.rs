use std::fmt;

use thiserror::Error;

/// Nombre de catégories (chiffres 0 à 9).
pub const DIGIT_COUNT: usize = 10;

/// Nombre de positions tirées par tirage.
pub const POSITIONS: usize = 6;

/// Noms des colonnes de positions dans le CSV historique.
pub const POSITION_COLUMNS: [&str; POSITIONS] =
    ["FirstD", "SecondD", "ThirdD", "FourthD", "FifthD", "SixthD"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Digit(u8);

impl Digit {
    pub const ALL: [Digit; DIGIT_COUNT] = [
        Digit(0),
        Digit(1),
        Digit(2),
        Digit(3),
        Digit(4),
        Digit(5),
        Digit(6),
        Digit(7),
        Digit(8),
        Digit(9),
    ];

    pub fn new(value: u8) -> Option<Self> {
        (value < DIGIT_COUNT as u8).then_some(Digit(value))
    }

    pub fn from_char(c: char) -> Option<Self> {
        c.to_digit(10).map(|d| Digit(d as u8))
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for Digit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("{found} positions au lieu de {expected}", expected = POSITIONS)]
    WrongArity { found: usize },

    #[error("position {position}: {value} n'est pas un chiffre (0-9)")]
    OutOfRange { position: usize, value: i64 },
}

/// Vérifie qu'une ligne porte exactement six chiffres valides.
pub fn validate_digits(values: &[i64]) -> Result<[Digit; POSITIONS], RecordError> {
    if values.len() != POSITIONS {
        return Err(RecordError::WrongArity {
            found: values.len(),
        });
    }
    let mut digits = [Digit(0); POSITIONS];
    for (position, &value) in values.iter().enumerate() {
        digits[position] = u8::try_from(value)
            .ok()
            .and_then(Digit::new)
            .ok_or(RecordError::OutOfRange { position, value })?;
    }
    Ok(digits)
}

/// Un tirage historique : un libellé (index ou date) et six chiffres.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawRecord {
    pub label: String,
    pub digits: [Digit; POSITIONS],
}

impl DrawRecord {
    pub fn new(label: impl Into<String>, digits: [Digit; POSITIONS]) -> Self {
        Self {
            label: label.into(),
            digits,
        }
    }

    pub fn from_values(label: impl Into<String>, values: &[i64]) -> Result<Self, RecordError> {
        Ok(Self::new(label, validate_digits(values)?))
    }
}

/// Historique complet, en lecture seule une fois chargé.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoricalDataset {
    records: Vec<DrawRecord>,
}

impl HistoricalDataset {
    pub fn new(records: Vec<DrawRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[DrawRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DrawRecord> {
        self.records.iter()
    }

    /// Les `n` derniers tirages, dans l'ordre du fichier.
    pub fn last(&self, n: usize) -> &[DrawRecord] {
        let start = self.records.len().saturating_sub(n);
        &self.records[start..]
    }
}

impl<'a> IntoIterator for &'a HistoricalDataset {
    type Item = &'a DrawRecord;
    type IntoIter = std::slice::Iter<'a, DrawRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
