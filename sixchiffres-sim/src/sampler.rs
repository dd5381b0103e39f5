use std::ops::{Add, AddAssign};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use rayon::prelude::*;

use sixchiffres_data::{DIGIT_COUNT, Digit, POSITIONS};

use crate::distribution::{CumulativeDistribution, ProbabilityVector};
use crate::error::SimulationError;

/// Comptage par chiffre sur l'ensemble des essais simulés.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SimulationTally {
    counts: [u64; DIGIT_COUNT],
    trials: u64,
}

impl SimulationTally {
    pub fn from_counts(counts: [u64; DIGIT_COUNT], trials: u64) -> Self {
        Self { counts, trials }
    }

    pub fn get(&self, digit: Digit) -> u64 {
        self.counts[digit.index()]
    }

    pub fn counts(&self) -> &[u64; DIGIT_COUNT] {
        &self.counts
    }

    pub fn trials(&self) -> u64 {
        self.trials
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }
}

impl AddAssign for SimulationTally {
    fn add_assign(&mut self, other: Self) {
        for (a, b) in self.counts.iter_mut().zip(other.counts) {
            *a += b;
        }
        self.trials += other.trials;
    }
}

impl Add for SimulationTally {
    type Output = Self;

    fn add(mut self, other: Self) -> Self {
        self += other;
        self
    }
}

/// Drapeau d'annulation coopérative, vérifié entre deux lots d'essais.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulationOptions {
    pub simulations: u32,
    pub seed: u64,
    pub shard_size: u32,
}

/// Graine explicite, ou tirée de l'entropie du processus.
pub fn resolve_seed(seed: Option<u64>) -> u64 {
    match seed {
        Some(s) => s,
        None => rand::rng().next_u64(),
    }
}

/// Graine du lot `shard` : mélange splitmix64 de la graine de base et de l'indice.
pub fn shard_seed(seed: u64, shard: u64) -> u64 {
    let mut z = seed ^ shard.wrapping_add(1).wrapping_mul(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

fn run_trials<R: Rng + ?Sized>(cdf: &CumulativeDistribution, trials: u64, rng: &mut R) -> SimulationTally {
    let mut tally = SimulationTally::default();
    for _ in 0..trials {
        // Six tirages indépendants, avec remise.
        for _ in 0..POSITIONS {
            tally.counts[cdf.sample(rng).index()] += 1;
        }
    }
    tally.trials = trials;
    tally
}

/// Simulation séquentielle avec un générateur fourni par l'appelant.
pub fn simulate<R: Rng + ?Sized>(probs: &ProbabilityVector, simulations: u32, rng: &mut R) -> SimulationTally {
    run_trials(&probs.cumulative(), u64::from(simulations), rng)
}

/// Simulation découpée en lots de taille fixe exécutés sur le pool rayon.
///
/// Chaque lot a sa propre graine dérivée de `(seed, indice)` : le résultat ne
/// dépend ni du nombre de threads ni de l'ordre de fusion. `on_shard` reçoit
/// le nombre d'essais de chaque lot terminé.
pub fn simulate_sharded<F>(
    probs: &ProbabilityVector,
    options: &SimulationOptions,
    cancel: &CancelToken,
    on_shard: F,
) -> Result<SimulationTally, SimulationError>
where
    F: Fn(u64) + Sync,
{
    let cdf = probs.cumulative();
    let total = u64::from(options.simulations);
    let shard_size = u64::from(options.shard_size.max(1));
    let shards = total.div_ceil(shard_size);

    log::debug!(
        "simulation: {} essais, {} lots de {}, graine {}",
        total,
        shards,
        shard_size,
        options.seed
    );

    let tally = (0..shards)
        .into_par_iter()
        .map(|shard| {
            if cancel.is_cancelled() {
                return Err(SimulationError::Cancelled);
            }
            let trials = shard_size.min(total - shard * shard_size);
            let mut rng = StdRng::seed_from_u64(shard_seed(options.seed, shard));
            let tally = run_trials(&cdf, trials, &mut rng);
            on_shard(trials);
            Ok(tally)
        })
        .try_reduce(SimulationTally::default, |a, b| Ok(a + b));

    if matches!(tally, Err(SimulationError::Cancelled)) {
        log::warn!("simulation annulée avant la fin des {} essais", total);
    }
    tally
}
