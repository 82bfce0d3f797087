use std::collections::HashSet;
use std::io;

use log::{debug, info};

use super::dictionary::{Dictionary, Vocabulary, WordOracle};
use super::letters::LetterInfo;
use super::player::{MoveToken, Player, Seat};
use super::word_search::{self, Candidate, Strategy};

/// Automated opponent. Every move is delegated to the word search.
pub struct Computer {
    seat: Seat,
    strategy: Strategy,
    /// Private vocabulary merged with the dictionary on every lookup
    learned: HashSet<String>,
}

impl Computer {
    pub fn new<S: Into<String>>(name: S, strategy: Strategy) -> Self {
        Self {
            seat: Seat::new(name),
            strategy,
            learned: HashSet::new(),
        }
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    pub fn learned_words(&self) -> &HashSet<String> {
        &self.learned
    }

    /// Adds a word to the private vocabulary. Returns false if it was already there
    pub fn learn<S: Into<String>>(&mut self, word: S) -> bool {
        let word = word.into();
        let added = self.learned.insert(word.clone());
        if added {
            info!("{} learned {}", self.seat.name, word);
        }
        added
    }

    /// Best scoring word for someone else's hand, as seen through this computer's vocabulary
    pub fn suggest(&self, tiles: &[char], dictionary: &Dictionary, info: &LetterInfo) -> Option<Candidate> {
        let vocab = self.vocabulary(dictionary);
        word_search::find_word(tiles, &vocab, info, Strategy::Teach)
    }

    pub fn knows(&self, dictionary: &Dictionary, word: &str) -> bool {
        self.vocabulary(dictionary).is_valid(word)
    }
}

impl Player for Computer {
    fn seat(&self) -> &Seat {
        &self.seat
    }

    fn seat_mut(&mut self) -> &mut Seat {
        &mut self.seat
    }

    fn produce_move(&mut self, dictionary: &Dictionary, info: &LetterInfo) -> io::Result<MoveToken> {
        let vocab = self.vocabulary(dictionary);
        let found = word_search::find_word(self.seat.hand.tiles(), &vocab, info, self.strategy);
        debug!("{} chose {:?}", self.seat.name, found);
        // Return the default action if nothing in the hand is acceptable
        Ok(found.map_or(MoveToken::Pass, |c| MoveToken::Word(c.word)))
    }

    fn vocabulary<'a>(&'a self, dictionary: &'a Dictionary) -> Vocabulary<'a> {
        Vocabulary::new(dictionary, Some(&self.learned))
    }

    fn as_computer(&self) -> Option<&Computer> {
        Some(self)
    }

    fn as_computer_mut(&mut self) -> Option<&mut Computer> {
        Some(self)
    }

    fn describe(&self) -> String {
        format!(
            "{} [Computer-{}]: {} (score: {})",
            self.seat.name, self.strategy, self.seat.hand, self.seat.score
        )
    }
}
