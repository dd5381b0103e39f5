mod display;
mod interactive;

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};

use sixchiffres_data::HistoricalDataset;
use sixchiffres_data::cache::SourceFingerprint;
use sixchiffres_data::loader::{LoadOptions, load_csv};
use sixchiffres_sim::config::{SimulationConfig, load_config, save_config};
use sixchiffres_sim::frequency::count_frequencies;
use sixchiffres_sim::pipeline::{PredictionRun, run_prediction};
use sixchiffres_sim::sampler::CancelToken;

use crate::display::{
    display_config, display_dataset, display_frequencies, display_match_result, display_source_info,
};

#[derive(Parser)]
#[command(name = "sixchiffres", about = "Classement des chiffres par simulation de Monte-Carlo")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Clone)]
struct SourceArgs {
    /// Fichier CSV des tirages historiques
    #[arg(short, long, default_value = "Lottery.csv")]
    file: PathBuf,

    /// Séparateur de colonnes du CSV
    #[arg(short, long, default_value = ",")]
    delimiter: char,
}

impl SourceArgs {
    fn load_options(&self) -> Result<LoadOptions> {
        if !self.delimiter.is_ascii() {
            bail!("Séparateur invalide : '{}' (ASCII attendu)", self.delimiter);
        }
        Ok(LoadOptions {
            delimiter: self.delimiter as u8,
        })
    }
}

#[derive(Subcommand)]
enum Command {
    /// Afficher l'historique des tirages
    Show {
        #[command(flatten)]
        source: SourceArgs,

        /// N'afficher que les N derniers tirages
        #[arg(short, long)]
        last: Option<usize>,
    },

    /// Afficher la fréquence de chaque chiffre
    Freq {
        #[command(flatten)]
        source: SourceArgs,
    },

    /// Simuler puis comparer un nombre à 6 chiffres aux chiffres les plus tirés
    Predict {
        #[command(flatten)]
        source: SourceArgs,

        /// Nombre de simulations (1000-100000, par pas de 1000)
        #[arg(short, long)]
        simulations: Option<u32>,

        /// Nombre à 6 chiffres (demandé si absent)
        #[arg(short, long)]
        guess: Option<String>,

        /// Seed pour la reproductibilité
        #[arg(long)]
        seed: Option<u64>,

        /// Fichier de configuration JSON
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Écrire la configuration par défaut
    Config {
        /// Fichier de sortie (affichage seul si absent)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Mode interactif (REPL)
    Interactive {
        #[command(flatten)]
        source: SourceArgs,

        /// Fichier de configuration JSON
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Show { source, last } => cmd_show(&source, last),
        Command::Freq { source } => cmd_freq(&source),
        Command::Predict {
            source,
            simulations,
            guess,
            seed,
            config,
        } => cmd_predict(&source, simulations, guess, seed, config.as_deref()),
        Command::Config { output } => cmd_config(output.as_deref()),
        Command::Interactive { source, config } => {
            let config = resolve_config(config.as_deref(), None, None)?;
            interactive::run_interactive(&source.file, source.load_options()?, config)
        }
    }
}

fn load_dataset(source: &SourceArgs) -> Result<HistoricalDataset> {
    load_csv(&source.file, source.load_options()?)
        .with_context(|| format!("Impossible de charger {:?}", source.file))
}

/// Fichier de configuration éventuel, puis surcharges de la ligne de commande.
pub(crate) fn resolve_config(
    path: Option<&Path>,
    simulations: Option<u32>,
    seed: Option<u64>,
) -> Result<SimulationConfig> {
    let mut config = match path {
        Some(p) => load_config(p).with_context(|| format!("Configuration {:?}", p))?,
        None => SimulationConfig::default(),
    };
    if let Some(s) = simulations {
        config.simulations = s;
    }
    if seed.is_some() {
        config.seed = seed;
    }
    config.validate()?;
    log::debug!("configuration effective : {:?}", config);
    Ok(config)
}

fn cmd_show(source: &SourceArgs, last: Option<usize>) -> Result<()> {
    let dataset = load_dataset(source)?;
    let fingerprint = SourceFingerprint::of(&source.file)?;
    display_source_info(&source.file, &fingerprint, dataset.len());
    let records = match last {
        Some(n) => dataset.last(n),
        None => dataset.records(),
    };
    display_dataset(records);
    Ok(())
}

fn cmd_freq(source: &SourceArgs) -> Result<()> {
    let dataset = load_dataset(source)?;
    display_frequencies(&count_frequencies(&dataset));
    Ok(())
}

fn cmd_predict(
    source: &SourceArgs,
    simulations: Option<u32>,
    guess: Option<String>,
    seed: Option<u64>,
    config_path: Option<&Path>,
) -> Result<()> {
    let config = resolve_config(config_path, simulations, seed)?;
    let dataset = load_dataset(source)?;
    let guess = match guess {
        Some(g) => g,
        None => prompt_guess()?,
    };

    let run = run_with_progress(&dataset, &config)?;
    display_match_result(run.evaluate(&guess));
    Ok(())
}

fn cmd_config(output: Option<&Path>) -> Result<()> {
    let config = SimulationConfig::default();
    match output {
        Some(path) => {
            save_config(&config, path).with_context(|| format!("Écriture de {:?}", path))?;
            println!("Configuration écrite dans {}", path.display());
        }
        None => display_config(&config),
    }
    Ok(())
}

pub(crate) fn run_with_progress(dataset: &HistoricalDataset, config: &SimulationConfig) -> Result<PredictionRun> {
    let pb = ProgressBar::new(u64::from(config.simulations));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} essais")
            .context("Modèle de barre de progression invalide")?
            .progress_chars("=> "),
    );

    let cancel = CancelToken::new();
    let result = run_prediction(dataset, config, &cancel, |n| pb.inc(n));
    pb.finish_and_clear();
    result.context("Échec de la simulation")
}

/// Lit une ligne et retire uniquement le saut de ligne final.
fn read_line<R: BufRead>(reader: &mut R) -> Result<String> {
    let mut input = String::new();
    let read = reader.read_line(&mut input).context("Erreur de lecture")?;
    if read == 0 {
        bail!("Fin de l'entrée standard");
    }
    Ok(input.trim_end_matches(['\r', '\n']).to_string())
}

fn ask(msg: &str) -> Result<String> {
    print!("{}", msg);
    io::stdout().flush()?;
    read_line(&mut io::stdin().lock())
}

pub(crate) fn prompt(msg: &str) -> Result<String> {
    Ok(ask(msg)?.trim().to_string())
}

/// Saisie du nombre à comparer, gardée telle quelle : elle suit la même
/// validation que `--guess`.
pub(crate) fn prompt_guess() -> Result<String> {
    ask("Entrez un nombre à 6 chiffres (ex: 123456) : ")
}
