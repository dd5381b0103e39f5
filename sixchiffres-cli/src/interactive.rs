use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use sixchiffres_data::cache::DatasetCache;
use sixchiffres_data::loader::LoadOptions;
use sixchiffres_sim::config::SimulationConfig;
use sixchiffres_sim::frequency::count_frequencies;

use crate::display::{
    display_config, display_dataset, display_frequencies, display_match_result, display_source_info,
};
use crate::{prompt, prompt_guess, run_with_progress};

#[derive(Debug, PartialEq)]
enum InteractiveCommand {
    Data,
    Frequencies,
    Simulations,
    Predict,
    Reload,
    Config,
    Quit,
}

fn parse_command(input: &str) -> Option<InteractiveCommand> {
    match input.trim().to_lowercase().as_str() {
        "1" | "donnees" | "données" | "data" => Some(InteractiveCommand::Data),
        "2" | "frequences" | "fréquences" | "freq" => Some(InteractiveCommand::Frequencies),
        "3" | "simulations" | "sim" => Some(InteractiveCommand::Simulations),
        "4" | "predire" | "prédire" | "predict" | "pred" => Some(InteractiveCommand::Predict),
        "5" | "recharger" | "reload" => Some(InteractiveCommand::Reload),
        "6" | "config" | "cfg" => Some(InteractiveCommand::Config),
        "7" | "quitter" | "quit" | "q" | "exit" => Some(InteractiveCommand::Quit),
        _ => None,
    }
}

fn display_menu() {
    println!();
    println!("── Mode interactif ──");
    println!("  1. donnees     Historique des tirages");
    println!("  2. frequences  Fréquence des chiffres");
    println!("  3. simulations Changer le nombre de simulations");
    println!("  4. predire     Simuler et comparer un nombre");
    println!("  5. recharger   Relire le fichier CSV");
    println!("  6. config      Paramètres courants");
    println!("  7. quitter     Quitter");
    println!();
}

fn prompt_with_default(msg: &str, default: &str) -> Result<String> {
    let input = prompt(&format!("{} [{}] : ", msg, default))?;
    if input.is_empty() {
        Ok(default.to_string())
    } else {
        Ok(input)
    }
}

/// Nouveau nombre de simulations, validé comme le reste de la configuration.
fn parse_simulations(input: &str, current: &SimulationConfig) -> Result<SimulationConfig> {
    let simulations: u32 = input.trim().parse().context("Nombre invalide")?;
    let config = SimulationConfig {
        simulations,
        ..current.clone()
    };
    config.validate()?;
    Ok(config)
}

struct Session {
    file: PathBuf,
    cache: DatasetCache,
    config: SimulationConfig,
}

impl Session {
    fn show_data(&mut self) -> Result<()> {
        let dataset = self.cache.get(&self.file)?;
        if let Some(fingerprint) = self.cache.fingerprint(&self.file) {
            display_source_info(&self.file, &fingerprint, dataset.len());
        }
        let n_str = prompt_with_default("Nombre de tirages à afficher", "20")?;
        let n: usize = n_str.parse().context("Nombre invalide")?;
        display_dataset(dataset.last(n));
        Ok(())
    }

    fn show_frequencies(&mut self) -> Result<()> {
        let dataset = self.cache.get(&self.file)?;
        display_frequencies(&count_frequencies(&dataset));
        Ok(())
    }

    fn change_simulations(&mut self) -> Result<()> {
        let current = self.config.simulations.to_string();
        let input = prompt_with_default("Nombre de simulations (1000-100000, pas de 1000)", &current)?;
        self.config = parse_simulations(&input, &self.config)?;
        println!("Simulations : {}", self.config.simulations);
        Ok(())
    }

    fn predict(&mut self) -> Result<()> {
        let guess = prompt_guess()?;
        let dataset = self.cache.get(&self.file)?;
        let run = run_with_progress(&dataset, &self.config)?;
        display_match_result(run.evaluate(&guess));
        Ok(())
    }

    fn reload(&mut self) -> Result<()> {
        self.cache.invalidate(&self.file);
        let dataset = self.cache.get(&self.file)?;
        println!("{} tirages rechargés.", dataset.len());
        Ok(())
    }
}

pub fn run_interactive(file: &Path, options: LoadOptions, config: SimulationConfig) -> Result<()> {
    println!("Bienvenue dans le mode interactif de sixchiffres !");

    let mut session = Session {
        file: file.to_path_buf(),
        cache: DatasetCache::new(options),
        config,
    };
    // Un fichier illisible dès le départ est fatal.
    session
        .cache
        .get(file)
        .with_context(|| format!("Impossible de charger {:?}", file))?;

    loop {
        display_menu();
        let input = match prompt("> ") {
            Ok(s) => s,
            Err(_) => break, // EOF / Ctrl+D
        };

        if input.is_empty() {
            continue;
        }

        let result = match parse_command(&input) {
            Some(InteractiveCommand::Quit) => {
                println!("Au revoir !");
                break;
            }
            Some(InteractiveCommand::Data) => session.show_data(),
            Some(InteractiveCommand::Frequencies) => session.show_frequencies(),
            Some(InteractiveCommand::Simulations) => session.change_simulations(),
            Some(InteractiveCommand::Predict) => session.predict(),
            Some(InteractiveCommand::Reload) => session.reload(),
            Some(InteractiveCommand::Config) => {
                display_config(&session.config);
                Ok(())
            }
            None => {
                println!("Commande inconnue : '{}'. Tapez un numéro (1-7) ou un nom de commande.", input);
                Ok(())
            }
        };
        if let Err(e) = result {
            println!("Erreur: {e:#}");
        }
    }

    Ok(())
}
