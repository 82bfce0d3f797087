use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use itertools::Itertools;
use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::dictionary::WordOracle;
use super::letters::LetterInfo;

/*
    Brute force search over the arrangements of a hand. Hands hold at most seven
    tiles so the whole space is under 14k candidates and every lookup is a single
    set membership test.
*/

/// Shortest playable candidate length
pub const MIN_ARITY: usize = 2;

/// How the computer picks among the acceptable words of its hand
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Strategy {
    /// First hit at the smallest arity
    Min,
    /// First hit at the largest arity
    Max,
    /// Highest scoring word
    #[default]
    Smart,
    /// Second entry of the score ordering
    Fail,
    /// Searches like MIN with its learned words merged in
    Learn,
    /// Plays like SMART and advises the human after each move
    Teach,
}

impl Strategy {
    pub const ALL: [Strategy; 6] = [
        Strategy::Min,
        Strategy::Max,
        Strategy::Smart,
        Strategy::Fail,
        Strategy::Learn,
        Strategy::Teach,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Min => "MIN",
            Self::Max => "MAX",
            Self::Smart => "SMART",
            Self::Fail => "FAIL",
            Self::Learn => "LEARN",
            Self::Teach => "TEACH",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("unknown strategy `{0}`, expected one of MIN, MAX, SMART, FAIL, LEARN, TEACH")]
pub struct UnknownStrategy(pub String);

impl FromStr for Strategy {
    type Err = UnknownStrategy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_uppercase();
        Strategy::ALL
            .iter()
            .copied()
            .find(|st| st.as_str() == upper)
            .ok_or(UnknownStrategy(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub word: String,
    pub score: i32,
}

/// Ordered arrangements without repetition of `arity` positions of a hand,
/// produced in lexicographic order of the position tuples. Repeated letters in
/// different positions yield repeated strings.
fn arrangements(tiles: &[char], arity: usize) -> impl Iterator<Item = String> + '_ {
    tiles
        .iter()
        .copied()
        .permutations(arity)
        .map(|p| p.into_iter().collect::<String>())
}

/// Candidate lengths searched for a hand of `n` tiles
fn arities(n: usize) -> std::ops::RangeInclusive<usize> {
    MIN_ARITY..=n
}

/// Finds a word for the hand following `strategy`. `None` means the player passes.
pub fn find_word<O: WordOracle + ?Sized>(
    tiles: &[char],
    oracle: &O,
    info: &LetterInfo,
    strategy: Strategy,
) -> Option<Candidate> {
    let found = match strategy {
        Strategy::Min | Strategy::Learn => first_hit(tiles, oracle, info, arities(tiles.len())),
        Strategy::Max => first_hit(tiles, oracle, info, arities(tiles.len()).rev()),
        Strategy::Smart | Strategy::Teach => best_word(tiles, oracle, info),
        Strategy::Fail => runner_up(tiles, oracle, info),
    };
    debug!(
        "{} search over {} tiles found {:?}",
        strategy,
        tiles.len(),
        found.as_ref().map(|c| c.word.as_str())
    );
    found
}

/// First acceptable word at the first arity that has one
fn first_hit<O, A>(tiles: &[char], oracle: &O, info: &LetterInfo, arities: A) -> Option<Candidate>
where
    O: WordOracle + ?Sized,
    A: Iterator<Item = usize>,
{
    for arity in arities {
        if let Some(word) = arrangements(tiles, arity).find(|w| oracle.is_valid(w)) {
            let score = info.score_word(&word);
            return Some(Candidate { word, score });
        }
    }
    None
}

/// Every acceptable word of every arity, in enumeration order
fn acceptable<'a, O: WordOracle + ?Sized>(
    tiles: &'a [char],
    oracle: &'a O,
) -> impl Iterator<Item = String> + 'a {
    arities(tiles.len())
        .flat_map(move |arity| arrangements(tiles, arity))
        .filter(move |w| oracle.is_valid(w))
}

/// Strictly highest score wins, ties keep the earliest word
fn best_word<O: WordOracle + ?Sized>(tiles: &[char], oracle: &O, info: &LetterInfo) -> Option<Candidate> {
    let mut best: Option<Candidate> = None;
    for word in acceptable(tiles, oracle) {
        let score = info.score_word(&word);
        if best.as_ref().map_or(true, |b| score > b.score) {
            best = Some(Candidate { word, score });
        }
    }
    best
}

/// Second entry of the distinct (score, word) pairs sorted in descending order,
/// or the only entry when there is just one
fn runner_up<O: WordOracle + ?Sized>(tiles: &[char], oracle: &O, info: &LetterInfo) -> Option<Candidate> {
    let ranked = acceptable(tiles, oracle)
        .map(|w| (info.score_word(&w), w))
        .collect::<BTreeSet<_>>();
    let mut descending = ranked.into_iter().rev();
    let first = descending.next()?;
    let (score, word) = descending.next().unwrap_or(first);
    Some(Candidate { word, score })
}
