use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DistributionError {
    #[error("poids total nul : aucune distribution définie (historique vide ?)")]
    ZeroWeight,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimulationError {
    #[error(transparent)]
    Distribution(#[from] DistributionError),

    #[error("simulation annulée")]
    Cancelled,
}

/// Saisie utilisateur rejetée. Distincte d'un résultat à zéro correspondance.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidGuessError {
    #[error("{len} caractères au lieu de 6")]
    WrongLength { len: usize },

    #[error("caractère '{found}' en position {position} n'est pas un chiffre")]
    NonDigit { position: usize, found: char },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("nombre de simulations {0} hors limites ({min}-{max})", min = crate::config::MIN_SIMULATIONS, max = crate::config::MAX_SIMULATIONS)]
    SimulationsOutOfRange(u32),

    #[error("nombre de simulations {0} non multiple de {step}", step = crate::config::SIMULATIONS_STEP)]
    SimulationsNotOnStep(u32),

    #[error("taille de lot nulle")]
    ZeroShardSize,

    #[error("fichier de configuration: {0}")]
    Io(#[from] std::io::Error),

    #[error("configuration JSON invalide: {0}")]
    Json(#[from] serde_json::Error),
}
