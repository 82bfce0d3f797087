use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::warn;

use crate::config::GameConfig;
use crate::console::Console;
use crate::scrabble::{Dictionary, Strategy};

mod config;
mod console;
mod scrabble;
mod utils;

#[derive(Parser)]
#[command(
    name = "lexiduel",
    about = "Greek word game against a computer opponent",
    version
)]
struct Cli {
    /// JSON settings file. Flags below override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Word list, one word per line
    #[arg(short, long)]
    dictionary: Option<PathBuf>,

    /// Computer strategy: MIN, MAX, SMART, FAIL, LEARN or TEACH
    #[arg(short, long)]
    strategy: Option<Strategy>,

    /// Seed for the letter bag
    #[arg(long)]
    seed: Option<u64>,

    /// Let a LEARN computer pick up unknown words spelled by the human
    #[arg(long)]
    learn_from_human: bool,

    /// Write the effective settings to this JSON file before playing
    #[arg(long, value_name = "PATH")]
    save_config: Option<PathBuf>,

    /// Debug logging (RUST_LOG takes precedence)
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter)).init();

    let mut config = match &cli.config {
        Some(path) => GameConfig::from_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => GameConfig::default(),
    };
    if let Some(dictionary) = cli.dictionary {
        config.dictionary = dictionary;
    }
    if let Some(strategy) = cli.strategy {
        config.strategy = strategy;
    }
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }
    config.learn_from_human |= cli.learn_from_human;
    if let Some(path) = &cli.save_config {
        config
            .save(path)
            .with_context(|| format!("failed to save config {}", path.display()))?;
        println!("Settings saved to {}", path.display());
    }

    let dictionary = Dictionary::from_file(&config.dictionary)
        .with_context(|| format!("failed to load dictionary {}", config.dictionary.display()))?;
    println!("Number of Words: {}", dictionary.len());
    if dictionary.is_empty() {
        warn!("{} holds no words, every move will be rejected", config.dictionary.display());
    }

    Console::new(config, dictionary, io::stdin().lock()).run()
}
