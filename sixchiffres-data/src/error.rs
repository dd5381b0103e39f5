use std::path::PathBuf;

use thiserror::Error;

/// Échec de chargement du jeu de tirages. Toujours fatal : aucun jeu partiel n'est rendu.
#[derive(Debug, Error)]
pub enum DataLoadError {
    #[error("impossible de lire {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV illisible (ligne {line}): {source}")]
    Csv {
        line: u64,
        #[source]
        source: csv::Error,
    },

    #[error("ligne {line}: colonne '{column}' manquante")]
    MissingColumn { line: u64, column: String },

    #[error("ligne {line}, colonne '{column}': '{value}' n'est pas un entier")]
    NotANumber {
        line: u64,
        column: String,
        value: String,
    },

    #[error("ligne {line}, colonne '{column}': chiffre {value} hors limites (0-9)")]
    DigitOutOfRange {
        line: u64,
        column: String,
        value: i64,
    },
}
