use sixchiffres_data::{DIGIT_COUNT, Digit, HistoricalDataset};

/// Nombre d'apparitions de chaque chiffre sur toutes les positions de l'historique.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: [u64; DIGIT_COUNT],
}

impl FrequencyTable {
    pub fn from_counts(counts: [u64; DIGIT_COUNT]) -> Self {
        Self { counts }
    }

    pub fn get(&self, digit: Digit) -> u64 {
        self.counts[digit.index()]
    }

    pub fn counts(&self) -> &[u64; DIGIT_COUNT] {
        &self.counts
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Les dix chiffres avec leur fréquence, dans l'ordre 0..=9.
    pub fn iter(&self) -> impl Iterator<Item = (Digit, u64)> + '_ {
        Digit::ALL.iter().map(|&d| (d, self.counts[d.index()]))
    }
}

pub fn count_frequencies(dataset: &HistoricalDataset) -> FrequencyTable {
    let mut counts = [0u64; DIGIT_COUNT];
    for record in dataset {
        for digit in record.digits {
            counts[digit.index()] += 1;
        }
    }
    FrequencyTable { counts }
}
