use std::io::BufRead;
use std::path::Path;

use anyhow::{Context, Result};
use log::info;

use crate::config::GameConfig;
use crate::scrabble::{Computer, Dictionary, Human, Match, Strategy};

/// Text menu around the match controller. Menu choices and the human's moves
/// are read from the same input.
pub struct Console<R> {
    config: GameConfig,
    dictionary: Dictionary,
    input: R,
    /// Final standings of the last game, one line per player
    standings: Vec<String>,
}

fn strategy_for_choice(choice: &str) -> Strategy {
    match choice {
        "a" => Strategy::Min,
        "b" => Strategy::Max,
        "c" => Strategy::Smart,
        "d" => Strategy::Fail,
        "e" => Strategy::Learn,
        "f" => Strategy::Teach,
        _ => Strategy::Smart,
    }
}

/// Runs the match to its end, then appends the learned words to `store`.
/// The words are saved even when a turn fails, and the turn error is returned after.
fn play_out(game: &mut Match, store: &Path) -> Result<usize> {
    let mut played = Ok(());
    while let Some(player) = game.active() {
        println!("{}", player.describe());
        match game.play_turn() {
            Ok(Some(report)) => println!("{}", report),
            Ok(None) => break,
            Err(e) => {
                played = Err(e);
                break;
            }
        }
    }
    let saved = game
        .finish(store)
        .with_context(|| format!("failed to update {}", store.display()))?;
    played.context("turn failed")?;
    Ok(saved)
}

impl<R: BufRead> Console<R> {
    pub fn new(config: GameConfig, dictionary: Dictionary, input: R) -> Self {
        Self {
            config,
            dictionary,
            input,
            standings: Vec::new(),
        }
    }

    /// Next menu line, trimmed and lowercased. `None` once the input is exhausted
    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line).context("failed to read menu choice")? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_lowercase()))
    }

    pub fn run(&mut self) -> Result<()> {
        loop {
            println!("\n**** SCRABBLE ****");
            println!("------------------------------");
            println!("1: Score");
            println!("2: Settings");
            println!("3: Play");
            println!("q: Quit");
            println!("Choose an option: ");
            let choice = match self.read_line()? {
                Some(c) => c,
                None => break,
            };
            match choice.as_str() {
                "1" => self.show_scores(),
                "2" => self.settings()?,
                "3" => self.play()?,
                "q" => break,
                _ => println!("Invalid option!"),
            }
        }
        println!("Exiting the game.");
        Ok(())
    }

    fn show_scores(&self) {
        if self.standings.is_empty() {
            println!("No scores yet. Start the game first!");
            return;
        }
        println!("\nCurrent Scores:");
        for line in &self.standings {
            println!("{}", line);
        }
    }

    fn settings(&mut self) -> Result<()> {
        println!("\nChoose Computer strategy:");
        println!("a: MIN (plays shortest words first)");
        println!("b: MAX (plays longest words first)");
        println!("c: SMART (plays the highest scoring word)");
        println!("d: FAIL (sometimes plays a worse word)");
        println!("e: LEARN (learns new words from human)");
        println!("f: TEACH (suggests the best word to human)");
        println!("Choose strategy (a-f): ");
        let choice = self.read_line()?.unwrap_or_default();
        self.config.strategy = strategy_for_choice(&choice);
        println!("Strategy selected: {}", self.config.strategy);
        Ok(())
    }

    fn play(&mut self) -> Result<()> {
        let human = Human::new(self.config.human_name.clone(), &mut self.input);
        let computer = Computer::new(self.config.computer_name.clone(), self.config.strategy);
        let mut game = Match::new(
            Box::new(human),
            computer,
            self.config.make_bag(),
            &self.dictionary,
            self.config.match_options(),
        );
        game.start();

        let played = play_out(&mut game, &self.config.dictionary);
        if game.bag().is_empty() {
            println!("No more letters left in the bag.");
        }
        println!("\nGame Over after {} turns!", game.turn());
        let standings = game
            .players()
            .iter()
            .map(|p| p.describe())
            .collect::<Vec<_>>();
        for line in &standings {
            println!("{}", line);
        }
        drop(game);
        self.standings = standings;

        let saved = played?;
        if saved > 0 {
            println!(
                "New words saved to {}: {} words.",
                self.config.dictionary.display(),
                saved
            );
            // Later games should know the new words too
            self.dictionary = Dictionary::from_file(&self.config.dictionary)
                .with_context(|| format!("failed to reload {}", self.config.dictionary.display()))?;
            info!("dictionary reloaded with {} words", self.dictionary.len());
        }
        Ok(())
    }
}
