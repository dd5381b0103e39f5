use sixchiffres_data::HistoricalDataset;

use crate::config::SimulationConfig;
use crate::distribution::{ProbabilityVector, build_distribution};
use crate::error::{InvalidGuessError, SimulationError};
use crate::frequency::{FrequencyTable, count_frequencies};
use crate::matching::match_count;
use crate::ranking::{PredictedSet, predict_digits};
use crate::sampler::{CancelToken, SimulationOptions, SimulationTally, resolve_seed, simulate_sharded};

/// Résultat d'une exécution complète. Le jeu prédit reste interne : seul le
/// nombre de correspondances avec une saisie est exposé.
#[derive(Debug, Clone)]
pub struct PredictionRun {
    frequencies: FrequencyTable,
    probabilities: ProbabilityVector,
    tally: SimulationTally,
    seed: u64,
    predicted: PredictedSet,
}

impl PredictionRun {
    pub fn frequencies(&self) -> &FrequencyTable {
        &self.frequencies
    }

    pub fn probabilities(&self) -> &ProbabilityVector {
        &self.probabilities
    }

    pub fn tally(&self) -> &SimulationTally {
        &self.tally
    }

    /// Graine effectivement utilisée, pour rejouer l'exécution.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn evaluate(&self, guess: &str) -> Result<usize, InvalidGuessError> {
        match_count(guess, &self.predicted)
    }

    #[cfg(test)]
    pub(crate) fn predicted(&self) -> &PredictedSet {
        &self.predicted
    }
}

/// historique → fréquences → distribution → simulation → classement.
///
/// Un historique vide échoue en `DistributionError` avant tout tirage.
pub fn run_prediction<F>(
    dataset: &HistoricalDataset,
    config: &SimulationConfig,
    cancel: &CancelToken,
    on_shard: F,
) -> Result<PredictionRun, SimulationError>
where
    F: Fn(u64) + Sync,
{
    let frequencies = count_frequencies(dataset);
    let probabilities = build_distribution(&frequencies)?;
    let seed = resolve_seed(config.seed);
    let options = SimulationOptions {
        simulations: config.simulations,
        seed,
        shard_size: config.shard_size,
    };
    let tally = simulate_sharded(&probabilities, &options, cancel, on_shard)?;
    let predicted = predict_digits(&tally);

    log::info!(
        "{} simulations sur {} tirages (graine {})",
        config.simulations,
        dataset.len(),
        seed
    );

    Ok(PredictionRun {
        frequencies,
        probabilities,
        tally,
        seed,
        predicted,
    })
}
