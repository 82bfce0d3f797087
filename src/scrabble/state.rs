use std::fmt;
use std::path::Path;

use log::{debug, info};
use thiserror::Error;

use super::agent::Computer;
use super::bag::Bag;
use super::dictionary::{Dictionary, DictionaryError, WordOracle};
use super::hand::Hand;
use super::player::{MoveToken, Player};
use super::word_search::{Candidate, Strategy, MIN_ARITY};

/// Tiles a full hand holds
pub const HAND_SIZE: usize = 7;

const HUMAN: usize = 0;
const COMPUTER: usize = 1;

#[derive(Error, Debug)]
pub enum GameError {
    #[error("failed to read the player's move: {0}")]
    Input(#[from] std::io::Error),
    #[error("failed to save learned words: {0}")]
    Dictionary(#[from] DictionaryError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Setup,
    /// Index of the player whose move is expected
    AwaitingMove(usize),
    GameOver,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnOutcome {
    Played { word: String, points: i32 },
    /// Unknown word or not spellable from the hand. Nothing changes
    Invalid { word: String },
    Passed,
    Exchanged,
    Quit,
}

/// What happened on one turn, for whoever displays the game
#[derive(Debug, Clone)]
pub struct TurnReport {
    pub player: String,
    /// Hand after the move was applied
    pub hand: Hand,
    pub score: i32,
    pub outcome: TurnOutcome,
    /// Best word the computer would have played with the human's hand
    pub advice: Option<Candidate>,
    /// Word the computer picked up from the human on this turn
    pub learned: Option<String>,
}

impl fmt::Display for TurnReport {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.outcome {
            TurnOutcome::Played { word, points } => {
                write!(f, "{} played {} (+{})", self.player, word, points)?
            }
            TurnOutcome::Invalid { word } => write!(f, "Invalid word {}!", word)?,
            TurnOutcome::Passed => write!(f, "{} could not find a word and passed.", self.player)?,
            TurnOutcome::Exchanged => write!(f, "{} changed letters.", self.player)?,
            TurnOutcome::Quit => write!(f, "{} quit the game!", self.player)?,
        }
        write!(f, "\n{}: {} (score: {})", self.player, self.hand, self.score)?;
        if let Some(tip) = &self.advice {
            write!(f, "\n(TEACH) The best word would have been: {} (+{})", tip.word, tip.score)?;
        }
        if let Some(word) = &self.learned {
            write!(f, "\n(LEARN) New word learned: {}", word)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct MatchOptions {
    pub hand_size: usize,
    /// Let a LEARN computer absorb words the human plays that it does not know
    pub learn_from_human: bool,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            hand_size: HAND_SIZE,
            learn_from_human: false,
        }
    }
}

/// One game between a human and a computer, human first
pub struct Match<'d> {
    /// Always the human followed by the computer
    players: [Box<dyn Player + 'd>; 2],
    bag: Bag,
    /// Pointer to the shared dictionary to avoid copying it per game
    dictionary: &'d Dictionary,
    options: MatchOptions,
    turn: usize,
    phase: Phase,
}

impl<'d> Match<'d> {
    pub fn new(
        human: Box<dyn Player + 'd>,
        computer: Computer,
        bag: Bag,
        dictionary: &'d Dictionary,
        options: MatchOptions,
    ) -> Self {
        Self {
            players: [human, Box::new(computer)],
            bag,
            dictionary,
            options,
            turn: 0,
            phase: Phase::Setup,
        }
    }

    /// Deals a full hand to both players, human first, and hands the move to the human
    pub fn start(&mut self) {
        for p in self.players.iter_mut() {
            p.seat_mut().hand.fill_from(&mut self.bag, self.options.hand_size);
        }
        self.phase = Phase::AwaitingMove(HUMAN);
        info!(
            "match started with {} strategy, {} tiles left in the bag",
            self.strategy(),
            self.bag.len()
        );
    }

    #[cfg(test)]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[cfg(test)]
    pub fn is_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn turn(&self) -> usize {
        self.turn
    }

    pub fn bag(&self) -> &Bag {
        &self.bag
    }

    pub fn players(&self) -> &[Box<dyn Player + 'd>] {
        &self.players
    }

    /// Player expected to move, if the game is running
    pub fn active(&self) -> Option<&dyn Player> {
        match self.phase {
            Phase::AwaitingMove(i) => Some(self.players[i].as_ref()),
            _ => None,
        }
    }

    pub fn computer(&self) -> Option<&Computer> {
        self.players[COMPUTER].as_computer()
    }

    pub fn strategy(&self) -> Strategy {
        self.computer().map_or(Strategy::default(), |c| c.strategy())
    }

    /// Asks the active player for a move and applies it.
    /// Returns `None` once the game is over.
    pub fn play_turn(&mut self) -> Result<Option<TurnReport>, GameError> {
        let idx = match self.phase {
            Phase::AwaitingMove(i) => i,
            _ => return Ok(None),
        };
        let token = self.players[idx].produce_move(self.dictionary, self.bag.letter_info())?;
        Ok(self.apply_move(token))
    }

    /// Applies a move for the active player and advances the turn
    pub fn apply_move(&mut self, token: MoveToken) -> Option<TurnReport> {
        let idx = match self.phase {
            Phase::AwaitingMove(i) => i,
            _ => return None,
        };
        debug!("turn {}: {} submits {}", self.turn, self.players[idx].seat().name, token);

        let advice = match token {
            MoveToken::Word(_) | MoveToken::Pass
                if idx == HUMAN && self.strategy() == Strategy::Teach =>
            {
                self.advise(idx)
            }
            _ => None,
        };

        let mut learned = None;
        let outcome = match token {
            MoveToken::Quit => TurnOutcome::Quit,
            MoveToken::Pass => TurnOutcome::Passed,
            MoveToken::Exchange => {
                let seat = self.players[idx].seat_mut();
                self.bag.give_back(seat.hand.take_all());
                seat.hand.fill_from(&mut self.bag, self.options.hand_size);
                TurnOutcome::Exchanged
            }
            MoveToken::Word(word) => {
                let known = self.players[idx].vocabulary(self.dictionary).is_valid(&word);
                let seat = self.players[idx].seat_mut();
                if known && seat.hand.remove_word(&word) {
                    let points = self.bag.letter_info().score_word(&word);
                    seat.score += points;
                    seat.hand.fill_from(&mut self.bag, self.options.hand_size);
                    TurnOutcome::Played { word, points }
                } else {
                    if idx == HUMAN && self.absorb(&word) {
                        learned = Some(word.clone());
                    }
                    TurnOutcome::Invalid { word }
                }
            }
        };

        self.turn += 1;
        self.phase = if outcome == TurnOutcome::Quit || self.bag.is_empty() {
            info!("match over after {} turns", self.turn);
            Phase::GameOver
        } else {
            Phase::AwaitingMove((idx + 1) % self.players.len())
        };

        let seat = self.players[idx].seat();
        Some(TurnReport {
            player: seat.name.clone(),
            hand: seat.hand.clone(),
            score: seat.score,
            outcome,
            advice,
            learned,
        })
    }

    /// The computer's best word for the given player's current hand
    fn advise(&self, idx: usize) -> Option<Candidate> {
        let computer = self.computer()?;
        let tiles = self.players[idx].seat().hand.tiles();
        computer.suggest(tiles, self.dictionary, self.bag.letter_info())
    }

    /// Teaches a LEARN computer a word the human spelled from their own hand
    fn absorb(&mut self, word: &str) -> bool {
        if !self.options.learn_from_human || word.chars().count() < MIN_ARITY {
            return false;
        }
        if !self.players[HUMAN].seat().hand.can_spell(word) {
            return false;
        }
        let dictionary = self.dictionary;
        match self.players[COMPUTER].as_computer_mut() {
            Some(c) if c.strategy() == Strategy::Learn && !c.knows(dictionary, word) => c.learn(word),
            _ => false,
        }
    }

    /// Ends the game and appends every word a LEARN computer picked up to `store`.
    /// Returns the number of words written.
    pub fn finish<P: AsRef<Path>>(&mut self, store: P) -> Result<usize, GameError> {
        self.phase = Phase::GameOver;
        let mut written = 0;
        for p in self.players.iter() {
            if let Some(c) = p.as_computer() {
                if c.strategy() == Strategy::Learn && !c.learned_words().is_empty() {
                    written += Dictionary::append_to_file(
                        store.as_ref(),
                        c.learned_words().iter().map(String::as_str),
                    )?;
                }
            }
        }
        if written > 0 {
            info!("saved {} learned words to {}", written, store.as_ref().display());
        }
        Ok(written)
    }
}

impl fmt::Display for Match<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let players = self
            .players
            .iter()
            .map(|p| p.describe())
            .collect::<Vec<_>>()
            .join(" | ");
        write!(
            f,
            "<Game strategy={}, players=[{}], letters_left={}>",
            self.strategy(),
            players,
            self.bag.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scrabble::letters::LetterInfo;
    use crate::scrabble::player::Human;

    const HUMAN_TILES: &str = "ΑΛΦΑΣΤΟ";
    const COMPUTER_TILES: &str = "ΝΕΡΟΚΙΜ";

    fn dictionary() -> Dictionary {
        Dictionary::from_words(["ΑΛΦΑ", "ΦΑ", "ΤΟ", "ΝΕΡΟ"]).unwrap()
    }

    /// Bag that deals the fixed hands above followed by `rest`
    fn ordered_bag(rest: &str) -> Bag {
        let order = HUMAN_TILES
            .chars()
            .chain(COMPUTER_TILES.chars())
            .chain(rest.chars())
            .collect::<Vec<_>>();
        Bag::new_with_order(LetterInfo::greek(), &order)
    }

    fn started<'d>(dict: &'d Dictionary, bag: Bag, strategy: Strategy, options: MatchOptions) -> Match<'d> {
        let human = Human::new("HUMAN", std::io::empty());
        let mut game = Match::new(
            Box::new(human),
            Computer::new("COMPUTER", strategy),
            bag,
            dict,
            options,
        );
        game.start();
        game
    }

    fn total_tiles(game: &Match) -> usize {
        game.bag().len() + game.players().iter().map(|p| p.seat().hand.len()).sum::<usize>()
    }

    #[test]
    fn test_start_deals_human_first() {
        let dict = dictionary();
        let game = started(&dict, ordered_bag("ΒΓΔ"), Strategy::Smart, MatchOptions::default());
        let hands = game
            .players()
            .iter()
            .map(|p| p.seat().hand.to_string())
            .collect::<Vec<_>>();
        assert_eq!(hands, vec![HUMAN_TILES, COMPUTER_TILES]);
        assert_eq!(game.phase(), Phase::AwaitingMove(0));
        assert_eq!(game.active().unwrap().seat().name, "HUMAN");
        assert_eq!(game.bag().len(), 3);
    }

    #[test]
    fn test_valid_word_scores_and_replenishes() {
        let dict = dictionary();
        let mut game = started(&dict, ordered_bag("ΒΓΔΕΖΗΘ"), Strategy::Smart, MatchOptions::default());
        let report = game.apply_move(MoveToken::Word("ΑΛΦΑ".into())).unwrap();
        assert_eq!(
            report.outcome,
            TurnOutcome::Played {
                word: "ΑΛΦΑ".into(),
                points: 13
            }
        );
        assert_eq!(report.score, 13);
        assert_eq!(report.hand.to_string(), "ΣΤΟΒΓΔΕ");
        assert_eq!(game.bag().len(), 3);
        assert_eq!(game.phase(), Phase::AwaitingMove(1));
        assert_eq!(game.turn(), 1);
    }

    #[test]
    fn test_invalid_words_change_nothing() {
        let dict = dictionary();
        let mut game = started(&dict, ordered_bag("ΒΓΔ"), Strategy::Smart, MatchOptions::default());
        // Not in the dictionary
        let report = game.apply_move(MoveToken::Word("ΣΤΑ".into())).unwrap();
        assert_eq!(report.outcome, TurnOutcome::Invalid { word: "ΣΤΑ".into() });
        assert_eq!(report.score, 0);
        assert_eq!(report.hand.to_string(), HUMAN_TILES);
        assert_eq!(game.phase(), Phase::AwaitingMove(1));

        // In the dictionary but the computer holds no Α
        let report = game.apply_move(MoveToken::Word("ΦΑ".into())).unwrap();
        assert_eq!(report.outcome, TurnOutcome::Invalid { word: "ΦΑ".into() });
        assert_eq!(report.hand.to_string(), COMPUTER_TILES);
        assert_eq!(game.bag().len(), 3);
        assert_eq!(game.phase(), Phase::AwaitingMove(0));
    }

    #[test]
    fn test_single_letter_word_scores() {
        let dict = Dictionary::from_words(["Ο", "ΑΛΦΑ"]).unwrap();
        let mut game = started(&dict, ordered_bag("ΒΓΔ"), Strategy::Smart, MatchOptions::default());
        let report = game.apply_move(MoveToken::Word("Ο".into())).unwrap();
        assert_eq!(
            report.outcome,
            TurnOutcome::Played {
                word: "Ο".into(),
                points: 1
            }
        );
        assert_eq!(report.score, 1);
        assert_eq!(report.hand.to_string(), "ΑΛΦΑΣΤΒ");
    }

    #[test]
    fn test_report_shows_hand_and_score() {
        let dict = dictionary();
        let mut game = started(&dict, ordered_bag("ΒΓΔΕΖΗΘ"), Strategy::Teach, MatchOptions::default());
        let report = game.apply_move(MoveToken::Word("ΤΟ".into())).unwrap();
        assert_eq!(
            report.to_string(),
            "HUMAN played ΤΟ (+2)\n\
             HUMAN: ΑΛΦΑΣΒΓ (score: 2)\n\
             (TEACH) The best word would have been: ΑΛΦΑ (+13)"
        );

        let report = game.apply_move(MoveToken::Word("ΦΑ".into())).unwrap();
        assert_eq!(
            report.to_string(),
            "Invalid word ΦΑ!\nCOMPUTER: ΝΕΡΟΚΙΜ (score: 0)"
        );
    }

    #[test]
    fn test_pass_advances_turn() {
        let dict = dictionary();
        let mut game = started(&dict, ordered_bag("ΒΓΔ"), Strategy::Smart, MatchOptions::default());
        let report = game.apply_move(MoveToken::Pass).unwrap();
        assert_eq!(report.outcome, TurnOutcome::Passed);
        assert!(report.advice.is_none());
        assert_eq!(game.phase(), Phase::AwaitingMove(1));
    }

    #[test]
    fn test_exchange_keeps_totals() {
        let dict = dictionary();
        let bag = Bag::with_seed(LetterInfo::greek(), 11);
        let mut game = started(&dict, bag, Strategy::Smart, MatchOptions::default());
        let before = total_tiles(&game);
        let bag_before = game.bag().len();
        assert!(bag_before >= HAND_SIZE);

        let report = game.apply_move(MoveToken::Exchange).unwrap();
        assert_eq!(report.outcome, TurnOutcome::Exchanged);
        assert_eq!(report.hand.len(), HAND_SIZE);
        assert_eq!(report.score, 0);
        assert_eq!(game.bag().len(), bag_before);
        assert_eq!(total_tiles(&game), before);
        assert_eq!(total_tiles(&game), LetterInfo::greek().total());
    }

    #[test]
    fn test_quit_ends_game() {
        let dict = dictionary();
        let mut game = started(&dict, ordered_bag("ΒΓΔ"), Strategy::Smart, MatchOptions::default());
        let report = game.apply_move(MoveToken::Quit).unwrap();
        assert_eq!(report.outcome, TurnOutcome::Quit);
        assert!(game.is_over());
        assert!(game.apply_move(MoveToken::Pass).is_none());
        assert!(game.play_turn().unwrap().is_none());
    }

    #[test]
    fn test_empty_bag_ends_game() {
        let dict = dictionary();
        let mut game = started(&dict, ordered_bag("ΒΓ"), Strategy::Smart, MatchOptions::default());
        let report = game.apply_move(MoveToken::Word("ΤΟ".into())).unwrap();
        assert_eq!(report.hand.len(), HAND_SIZE);
        assert!(game.bag().is_empty());
        assert_eq!(game.phase(), Phase::GameOver);
        assert!(game.active().is_none());
    }

    #[test]
    fn test_turns_alternate() {
        let dict = dictionary();
        let human = Human::new("HUMAN", "ΑΛΦΑ\n".as_bytes());
        let mut game = Match::new(
            Box::new(human),
            Computer::new("COMPUTER", Strategy::Smart),
            ordered_bag("ΒΓΔΕΖΗΘΙΚΛΜΝ"),
            &dict,
            MatchOptions::default(),
        );
        game.start();

        let first = game.play_turn().unwrap().unwrap();
        assert_eq!(first.player, "HUMAN");
        assert_eq!(first.score, 13);

        let second = game.play_turn().unwrap().unwrap();
        assert_eq!(second.player, "COMPUTER");
        assert_eq!(
            second.outcome,
            TurnOutcome::Played {
                word: "ΝΕΡΟ".into(),
                points: 5
            }
        );

        // Input is exhausted, the human quits
        let third = game.play_turn().unwrap().unwrap();
        assert_eq!(third.outcome, TurnOutcome::Quit);
        assert!(game.is_over());
    }

    #[test]
    fn test_teach_advises_human() {
        let dict = dictionary();
        let mut game = started(&dict, ordered_bag("ΒΓΔΕΖΗΘ"), Strategy::Teach, MatchOptions::default());
        let report = game.apply_move(MoveToken::Word("ΤΟ".into())).unwrap();
        assert_eq!(report.score, 2);
        let tip = report.advice.unwrap();
        assert_eq!(tip.word, "ΑΛΦΑ");
        assert_eq!(tip.score, 13);

        // The computer's own moves carry no advice
        let report = game.apply_move(MoveToken::Pass).unwrap();
        assert!(report.advice.is_none());

        // Exchanges are not advised either
        let report = game.apply_move(MoveToken::Exchange).unwrap();
        assert!(report.advice.is_none());
    }

    #[test]
    fn test_learn_is_opt_in() {
        let dict = dictionary();
        let mut game = started(&dict, ordered_bag("ΒΓΔ"), Strategy::Learn, MatchOptions::default());
        let report = game.apply_move(MoveToken::Word("ΣΤΑ".into())).unwrap();
        assert!(report.learned.is_none());
        assert!(game.computer().unwrap().learned_words().is_empty());

        let path = std::env::temp_dir().join(format!("learn_opt_in_{}.txt", std::process::id()));
        assert_eq!(game.finish(&path).unwrap(), 0);
        assert!(!path.exists());
    }

    #[test]
    fn test_learned_words_are_flushed() {
        let dict = dictionary();
        let options = MatchOptions {
            learn_from_human: true,
            ..MatchOptions::default()
        };
        let mut game = started(&dict, ordered_bag("ΒΓΔ"), Strategy::Learn, options);

        let report = game.apply_move(MoveToken::Word("ΣΤΑ".into())).unwrap();
        assert_eq!(report.outcome, TurnOutcome::Invalid { word: "ΣΤΑ".into() });
        assert_eq!(report.learned.as_deref(), Some("ΣΤΑ"));
        assert!(game.computer().unwrap().knows(&dict, "ΣΤΑ"));
        assert!(!dict.contains("ΣΤΑ"));

        game.apply_move(MoveToken::Pass);
        // Not spellable from the human's hand
        let report = game.apply_move(MoveToken::Word("ΨΙ".into())).unwrap();
        assert!(report.learned.is_none());

        let path = std::env::temp_dir().join(format!("learn_flush_{}.txt", std::process::id()));
        let _ = std::fs::remove_file(&path);
        assert_eq!(game.finish(&path).unwrap(), 1);
        let content = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(content, "ΣΤΑ\n");
        assert!(game.is_over());
    }

    #[test]
    fn test_display() {
        let dict = dictionary();
        let game = started(&dict, ordered_bag("ΒΓΔ"), Strategy::Min, MatchOptions::default());
        assert_eq!(
            game.to_string(),
            "<Game strategy=MIN, players=[HUMAN: ΑΛΦΑΣΤΟ (score: 0) | COMPUTER [Computer-MIN]: ΝΕΡΟΚΙΜ (score: 0)], letters_left=3>"
        );
    }
}
