use std::collections::HashMap;

/// Greek tile set: (letter, supply in the bag, points)
pub const GREEK_LETTERS: [(char, usize, i32); 24] = [
    ('Α', 12, 1),
    ('Β', 1, 8),
    ('Γ', 2, 4),
    ('Δ', 2, 4),
    ('Ε', 8, 1),
    ('Ζ', 1, 10),
    ('Η', 7, 1),
    ('Θ', 1, 10),
    ('Ι', 8, 1),
    ('Κ', 4, 2),
    ('Λ', 3, 3),
    ('Μ', 3, 3),
    ('Ν', 6, 1),
    ('Ξ', 1, 10),
    ('Ο', 9, 1),
    ('Π', 4, 2),
    ('Ρ', 5, 2),
    ('Σ', 7, 1),
    ('Τ', 8, 1),
    ('Υ', 4, 2),
    ('Φ', 1, 8),
    ('Χ', 1, 8),
    ('Ψ', 1, 10),
    ('Ω', 3, 3),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileSpec {
    /// Number of copies of the letter in a full bag
    pub count: usize,
    /// Points scored each time the letter is played
    pub value: i32,
}

/// Immutable letter table that defines the alphabet of a game
#[derive(Debug, Clone)]
pub struct LetterInfo {
    /// Letters in table order, used when the bag is filled
    alph: Vec<char>,
    tiles: HashMap<char, TileSpec>,
}

impl LetterInfo {
    pub fn new(table: &[(char, usize, i32)]) -> Self {
        let mut alph = Vec::with_capacity(table.len());
        let mut tiles = HashMap::with_capacity(table.len());
        for &(letter, count, value) in table {
            if tiles.insert(letter, TileSpec { count, value }).is_none() {
                alph.push(letter);
            }
        }
        Self { alph, tiles }
    }

    pub fn greek() -> Self {
        Self::new(&GREEK_LETTERS)
    }

    /// Point value of a letter. Letters outside the alphabet are worth nothing
    pub fn value(&self, letter: char) -> i32 {
        self.tiles.get(&letter).map_or(0, |t| t.value)
    }

    pub fn count(&self, letter: char) -> usize {
        self.tiles.get(&letter).map_or(0, |t| t.count)
    }

    /// Number of tiles in a full bag
    pub fn total(&self) -> usize {
        self.tiles.values().map(|t| t.count).sum()
    }

    pub fn letters(&self) -> impl Iterator<Item = char> + '_ {
        self.alph.iter().copied()
    }

    /// Linear score of a word: the sum of its letter values
    pub fn score_word(&self, word: &str) -> i32 {
        word.chars().map(|c| self.value(c)).sum()
    }

    /// Every tile of a full bag, grouped by letter in table order
    pub fn expand(&self) -> Vec<char> {
        let mut distribution = Vec::with_capacity(self.total());
        for letter in self.letters() {
            for _ in 0..self.count(letter) {
                distribution.push(letter);
            }
        }
        distribution
    }
}

impl Default for LetterInfo {
    fn default() -> Self {
        Self::greek()
    }
}
