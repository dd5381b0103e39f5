use std::path::Path;

use chrono::{DateTime, Local};
use comfy_table::{Cell, Color, ContentArrangement, Table, presets::UTF8_FULL};
use textplots::Plot;

use sixchiffres_data::DrawRecord;
use sixchiffres_data::cache::SourceFingerprint;
use sixchiffres_sim::InvalidGuessError;
use sixchiffres_sim::config::SimulationConfig;
use sixchiffres_sim::frequency::FrequencyTable;

fn new_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);
    table
}

pub fn display_source_info(path: &Path, fingerprint: &SourceFingerprint, count: usize) {
    let modified: DateTime<Local> = fingerprint.modified.into();
    println!(
        "{} : {} tirages ({} octets, modifié le {})",
        path.display(),
        count,
        fingerprint.len,
        modified.format("%d/%m/%Y %H:%M:%S"),
    );
}

pub fn display_dataset(records: &[DrawRecord]) {
    if records.is_empty() {
        println!("Aucun tirage à afficher.");
        return;
    }

    let mut table = new_table(vec!["Tirage", "1", "2", "3", "4", "5", "6"]);
    for record in records {
        let mut row = vec![record.label.clone()];
        row.extend(record.digits.iter().map(|d| d.to_string()));
        table.add_row(row);
    }
    println!("{table}");
}

pub fn display_frequencies(table: &FrequencyTable) {
    println!("\n📊 Fréquence des chiffres\n");

    let total = table.total();
    if total == 0 {
        println!("Aucun tirage : fréquences toutes nulles.");
        return;
    }

    let max = table.counts().iter().copied().max().unwrap_or(0);
    let mut out = new_table(vec!["Chiffre", "Fréquence", "Part"]);
    for (digit, count) in table.iter() {
        let share = count as f64 / total as f64;
        let cell = Cell::new(count.to_string());
        let cell = if count == max { cell.fg(Color::Green) } else { cell };
        out.add_row(vec![
            Cell::new(digit.to_string()),
            cell,
            Cell::new(format!("{:.2} %", share * 100.0)),
        ]);
    }
    println!("{out}");
    println!("{}", frequency_chart(table));
}

/// Histogramme ASCII : une barre par chiffre.
fn frequency_chart(table: &FrequencyTable) -> String {
    let max = table.counts().iter().copied().max().unwrap_or(0).max(1);
    let mut points: Vec<(f32, f32)> = table.iter().map(|(d, c)| (d.value() as f32, c as f32)).collect();
    points.push((10.0, table.counts()[9] as f32));
    let shape = textplots::Shape::Bars(&points);
    let mut chart = textplots::Chart::new_with_y_range(120, 40, 0.0, 10.0, 0.0, max as f32 * 1.1);
    let plotted = chart.lineplot(&shape);
    // `Display` n'affiche que le canevas : les figures doivent y être tracées avant.
    plotted.figures();
    plotted.to_string()
}

fn match_message(result: Result<usize, InvalidGuessError>) -> String {
    match result {
        Ok(matches) => {
            format!("\n🎯 Vous avez {matches} chiffre(s) en commun avec les chiffres les plus tirés !")
        }
        Err(e) => {
            log::debug!("saisie invalide : {e}");
            "Veuillez saisir un nombre valide à 6 chiffres.".to_string()
        }
    }
}

pub fn display_match_result(result: Result<usize, InvalidGuessError>) {
    println!("{}", match_message(result));
}

pub fn display_config(config: &SimulationConfig) {
    let mut table = new_table(vec!["Paramètre", "Valeur"]);
    table.add_row(vec!["Simulations".to_string(), config.simulations.to_string()]);
    table.add_row(vec![
        "Seed".to_string(),
        config.seed.map_or_else(|| "aléatoire".to_string(), |s| s.to_string()),
    ]);
    table.add_row(vec!["Taille de lot".to_string(), config.shard_size.to_string()]);
    println!("{table}");
}

#[cfg(test)]
mod tests {
    use super::*;

    const BLANK: char = '\u{2800}';

    fn is_drawn(c: char) -> bool {
        ('\u{2801}'..='\u{28FF}').contains(&c)
    }

    #[test]
    fn test_frequency_chart_draws_bars() {
        let table = FrequencyTable::from_counts([3, 9, 1, 0, 4, 4, 2, 7, 5, 8]);
        let chart = frequency_chart(&table);
        assert!(chart.contains(BLANK));
        assert!(chart.chars().any(is_drawn));
    }

    #[test]
    fn test_frequency_chart_single_digit() {
        let mut counts = [0; 10];
        counts[5] = 12;
        let chart = frequency_chart(&FrequencyTable::from_counts(counts));
        assert!(chart.chars().any(is_drawn));
    }

    #[test]
    fn test_match_message() {
        assert!(match_message(Ok(4)).contains("Vous avez 4 chiffre(s)"));
        assert_eq!(
            match_message(Err(InvalidGuessError::WrongLength { len: 10 })),
            "Veuillez saisir un nombre valide à 6 chiffres."
        );
        assert_eq!(
            match_message(Err(InvalidGuessError::NonDigit { position: 2, found: 'a' })),
            "Veuillez saisir un nombre valide à 6 chiffres."
        );
    }
}
