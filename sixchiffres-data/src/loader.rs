use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::DataLoadError;
use crate::models::{DrawRecord, HistoricalDataset, POSITION_COLUMNS, POSITIONS, RecordError};

#[derive(Debug, Clone, Copy)]
pub struct LoadOptions {
    pub delimiter: u8,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

/// Emplacement des colonnes utiles dans l'en-tête.
#[derive(Debug, PartialEq)]
struct ColumnLayout {
    label: Option<usize>,
    digits: [usize; POSITIONS],
    names: [String; POSITIONS],
}

impl ColumnLayout {
    /// Colonnes nommées FirstD..SixthD si présentes, sinon colonnes 1 à 6.
    fn from_headers(headers: &csv::StringRecord) -> Self {
        let by_name: Option<Vec<usize>> = POSITION_COLUMNS
            .iter()
            .map(|name| headers.iter().position(|h| h == *name))
            .collect();

        let digits: [usize; POSITIONS] = match by_name {
            Some(found) => std::array::from_fn(|i| found[i]),
            None => std::array::from_fn(|i| i + 1),
        };
        let names = std::array::from_fn(|i| {
            headers
                .get(digits[i])
                .filter(|h| !h.is_empty())
                .map(str::to_string)
                .unwrap_or_else(|| format!("#{}", digits[i]))
        });
        let label = (0..headers.len()).find(|idx| !digits.contains(idx));

        Self {
            label,
            digits,
            names,
        }
    }

    fn parse_record(&self, record: &csv::StringRecord, line: u64) -> Result<DrawRecord, DataLoadError> {
        let mut values = [0i64; POSITIONS];
        for (i, &idx) in self.digits.iter().enumerate() {
            let raw = record.get(idx).ok_or_else(|| DataLoadError::MissingColumn {
                line,
                column: self.names[i].clone(),
            })?;
            values[i] = raw.parse::<i64>().map_err(|_| DataLoadError::NotANumber {
                line,
                column: self.names[i].clone(),
                value: raw.to_string(),
            })?;
        }

        let label = self
            .label
            .and_then(|idx| record.get(idx))
            .map(str::to_string)
            .unwrap_or_else(|| line.to_string());

        DrawRecord::from_values(label, &values).map_err(|e| match e {
            RecordError::OutOfRange { position, value } => DataLoadError::DigitOutOfRange {
                line,
                column: self.names[position].clone(),
                value,
            },
            RecordError::WrongArity { .. } => DataLoadError::MissingColumn {
                line,
                column: self.names[POSITIONS - 1].clone(),
            },
        })
    }
}

/// Lit un historique CSV depuis n'importe quelle source. La première ligne est l'en-tête.
pub fn read_draws<R: Read>(reader: R, options: LoadOptions) -> Result<HistoricalDataset, DataLoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(options.delimiter)
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = reader
        .headers()
        .map_err(|source| DataLoadError::Csv { line: 1, source })?
        .clone();
    let layout = ColumnLayout::from_headers(&headers);

    let mut records = Vec::new();
    for (i, result) in reader.records().enumerate() {
        let fallback_line = i as u64 + 2;
        let record = result.map_err(|source| DataLoadError::Csv {
            line: source
                .position()
                .map(|p| p.line())
                .unwrap_or(fallback_line),
            source,
        })?;
        let line = record.position().map(|p| p.line()).unwrap_or(fallback_line);
        records.push(layout.parse_record(&record, line)?);
    }

    Ok(HistoricalDataset::new(records))
}

pub fn load_csv(path: &Path, options: LoadOptions) -> Result<HistoricalDataset, DataLoadError> {
    let file = File::open(path).map_err(|source| DataLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let dataset = read_draws(file, options)?;
    log::info!("{} tirages chargés depuis {:?}", dataset.len(), path);
    Ok(dataset)
}
