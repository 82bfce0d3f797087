use std::fmt;
use std::io::{self, BufRead, Write};

use super::agent::Computer;
use super::dictionary::{Dictionary, Vocabulary};
use super::hand::Hand;
use super::letters::LetterInfo;

/// What a player hands to the match controller on its turn
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveToken {
    Word(String),
    /// Return the whole hand to the bag and draw a fresh one
    Exchange,
    Pass,
    Quit,
}

impl MoveToken {
    /// Reads a line typed by a person. An empty line is a pass.
    pub fn parse(input: &str) -> Self {
        let input = input.trim().to_uppercase();
        match input.as_str() {
            "" | "PASS" => Self::Pass,
            "P" => Self::Exchange,
            "Q" => Self::Quit,
            _ => Self::Word(input),
        }
    }
}

impl fmt::Display for MoveToken {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Word(w) => write!(f, "{}", w),
            Self::Exchange => write!(f, "P"),
            Self::Pass => write!(f, "PASS"),
            Self::Quit => write!(f, "Q"),
        }
    }
}

/// State every player carries regardless of who picks its moves
#[derive(Debug, Clone)]
pub struct Seat {
    pub name: String,
    pub hand: Hand,
    /// Only ever grows, by the value of each accepted word
    pub score: i32,
}

impl Seat {
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            hand: Hand::empty(),
            score: 0,
        }
    }
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}: {} (score: {})", self.name, self.hand, self.score)
    }
}

pub trait Player {
    fn seat(&self) -> &Seat;
    fn seat_mut(&mut self) -> &mut Seat;
    /// Picks the move for the current turn. Blocks for as long as the player needs
    fn produce_move(&mut self, dictionary: &Dictionary, info: &LetterInfo) -> io::Result<MoveToken>;

    /// Words this player accepts: the dictionary plus anything it learned
    fn vocabulary<'a>(&'a self, dictionary: &'a Dictionary) -> Vocabulary<'a> {
        Vocabulary::new(dictionary, None)
    }

    fn as_computer(&self) -> Option<&Computer> {
        None
    }

    fn as_computer_mut(&mut self) -> Option<&mut Computer> {
        None
    }

    fn describe(&self) -> String {
        self.seat().to_string()
    }
}

/// Player whose moves are typed in
pub struct Human<R> {
    seat: Seat,
    input: R,
}

impl<R: BufRead> Human<R> {
    pub fn new<S: Into<String>>(name: S, input: R) -> Self {
        Self {
            seat: Seat::new(name),
            input,
        }
    }
}

impl<R: BufRead> Player for Human<R> {
    fn seat(&self) -> &Seat {
        &self.seat
    }

    fn seat_mut(&mut self) -> &mut Seat {
        &mut self.seat
    }

    fn produce_move(&mut self, _dictionary: &Dictionary, _info: &LetterInfo) -> io::Result<MoveToken> {
        print!(
            "{}, enter a word, P to change letters, PASS to skip or Q to quit: ",
            self.seat.name
        );
        io::stdout().flush()?;
        let mut line = String::new();
        // Nobody left to type, end the game
        if self.input.read_line(&mut line)? == 0 {
            return Ok(MoveToken::Quit);
        }
        Ok(MoveToken::parse(&line))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tokens() {
        assert_eq!(MoveToken::parse("q"), MoveToken::Quit);
        assert_eq!(MoveToken::parse(" P\n"), MoveToken::Exchange);
        assert_eq!(MoveToken::parse("pass"), MoveToken::Pass);
        assert_eq!(MoveToken::parse("\n"), MoveToken::Pass);
        assert_eq!(MoveToken::parse("αλφα\n"), MoveToken::Word("ΑΛΦΑ".into()));
    }

    #[test]
    fn test_human_reads_lines() {
        let dict = Dictionary::from_words(["ΑΛΦΑ"]).unwrap();
        let info = LetterInfo::greek();
        let mut human = Human::new("HUMAN", "αλφα\nP\n".as_bytes());
        assert_eq!(
            human.produce_move(&dict, &info).unwrap(),
            MoveToken::Word("ΑΛΦΑ".into())
        );
        assert_eq!(human.produce_move(&dict, &info).unwrap(), MoveToken::Exchange);
        // End of input quits
        assert_eq!(human.produce_move(&dict, &info).unwrap(), MoveToken::Quit);
        assert!(human.as_computer().is_none());
    }

    #[test]
    fn test_describe() {
        let mut human = Human::new("HUMAN", io::empty());
        human.seat_mut().hand = "ΑΒ".chars().collect();
        human.seat_mut().score = 4;
        assert_eq!(human.describe(), "HUMAN: ΑΒ (score: 4)");
    }
}
