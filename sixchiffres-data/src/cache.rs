use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use crate::error::DataLoadError;
use crate::loader::{LoadOptions, load_csv};
use crate::models::HistoricalDataset;

/// Identité d'une version du fichier source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceFingerprint {
    pub modified: SystemTime,
    pub len: u64,
}

impl SourceFingerprint {
    pub fn of(path: &Path) -> Result<Self, DataLoadError> {
        let io_err = |source| DataLoadError::Io {
            path: path.to_path_buf(),
            source,
        };
        let meta = std::fs::metadata(path).map_err(io_err)?;
        let modified = meta.modified().map_err(io_err)?;
        Ok(Self {
            modified,
            len: meta.len(),
        })
    }
}

#[derive(Debug)]
struct CacheEntry {
    fingerprint: SourceFingerprint,
    dataset: Arc<HistoricalDataset>,
}

/// Cache des historiques chargés, indexé par chemin canonique.
///
/// Une entrée est rechargée dès que la date de modification ou la taille du
/// fichier change. Rien n'est partagé au niveau du processus : le cache
/// appartient à son appelant.
#[derive(Debug, Default)]
pub struct DatasetCache {
    options: LoadOptions,
    entries: HashMap<PathBuf, CacheEntry>,
    loads: u64,
}

impl DatasetCache {
    pub fn new(options: LoadOptions) -> Self {
        Self {
            options,
            entries: HashMap::new(),
            loads: 0,
        }
    }

    pub fn get(&mut self, path: &Path) -> Result<Arc<HistoricalDataset>, DataLoadError> {
        let key = path.canonicalize().map_err(|source| DataLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let fingerprint = SourceFingerprint::of(&key)?;

        if let Some(entry) = self.entries.get(&key) {
            if entry.fingerprint == fingerprint {
                return Ok(Arc::clone(&entry.dataset));
            }
            log::debug!("{:?} modifié depuis le dernier chargement", key);
        }

        // En cas d'échec l'ancienne entrée est retirée : jamais de données périmées.
        self.entries.remove(&key);
        let dataset = Arc::new(load_csv(&key, self.options)?);
        self.loads += 1;
        self.entries.insert(
            key,
            CacheEntry {
                fingerprint,
                dataset: Arc::clone(&dataset),
            },
        );
        Ok(dataset)
    }

    /// Force le prochain `get` à relire le fichier.
    pub fn invalidate(&mut self, path: &Path) {
        let key = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
        self.entries.remove(&key);
    }

    pub fn fingerprint(&self, path: &Path) -> Option<SourceFingerprint> {
        let key = path.canonicalize().ok()?;
        self.entries.get(&key).map(|e| e.fingerprint)
    }

    /// Nombre de lectures effectives du disque depuis la création.
    pub fn loads(&self) -> u64 {
        self.loads
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    const HEADER: &str = "Date,FirstD,SecondD,ThirdD,FourthD,FifthD,SixthD\n";

    fn write_csv(path: &Path, rows: &[&str]) {
        let mut file = std::fs::File::create(path).unwrap();
        file.write_all(HEADER.as_bytes()).unwrap();
        for row in rows {
            writeln!(file, "{row}").unwrap();
        }
    }

    #[test]
    fn test_cache_hit_does_not_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Lottery.csv");
        write_csv(&path, &["a,1,2,3,4,5,6"]);

        let mut cache = DatasetCache::default();
        let first = cache.get(&path).unwrap();
        let second = cache.get(&path).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.loads(), 1);
        assert!(cache.fingerprint(&path).is_some());
    }

    #[test]
    fn test_cache_reloads_when_source_changes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Lottery.csv");
        write_csv(&path, &["a,1,2,3,4,5,6"]);

        let mut cache = DatasetCache::default();
        assert_eq!(cache.get(&path).unwrap().len(), 1);

        // La taille change : l'empreinte diffère même si la date est identique.
        write_csv(&path, &["a,1,2,3,4,5,6", "b,6,5,4,3,2,1"]);
        assert_eq!(cache.get(&path).unwrap().len(), 2);
        assert_eq!(cache.loads(), 2);
    }

    #[test]
    fn test_invalidate_forces_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Lottery.csv");
        write_csv(&path, &["a,1,2,3,4,5,6"]);

        let mut cache = DatasetCache::default();
        cache.get(&path).unwrap();
        cache.invalidate(&path);
        assert!(cache.fingerprint(&path).is_none());
        cache.get(&path).unwrap();
        assert_eq!(cache.loads(), 2);
    }

    #[test]
    fn test_broken_reload_drops_stale_entry() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Lottery.csv");
        write_csv(&path, &["a,1,2,3,4,5,6"]);

        let mut cache = DatasetCache::default();
        cache.get(&path).unwrap();

        write_csv(&path, &["a,1,2,3,4,5,6", "b,1,2,3,4,5,42"]);
        assert!(matches!(
            cache.get(&path),
            Err(DataLoadError::DigitOutOfRange { value: 42, .. })
        ));
        assert!(cache.fingerprint(&path).is_none());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut cache = DatasetCache::default();
        assert!(matches!(
            cache.get(&dir.path().join("absent.csv")),
            Err(DataLoadError::Io { .. })
        ));
    }
}
