use std::collections::HashMap;
use std::fmt;

use super::bag::Bag;

/// Tiles held by a single player. Order is kept because the word search
/// enumerates arrangements over positions, not over distinct letters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hand {
    tiles: Vec<char>,
}

impl Hand {
    pub fn new(tiles: Vec<char>) -> Self {
        Self { tiles }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn tiles(&self) -> &[char] {
        &self.tiles
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Histogram count of each letter in the hand
    fn counts(&self) -> HashMap<char, usize> {
        let mut counts = HashMap::with_capacity(self.len());
        for &t in &self.tiles {
            *counts.entry(t).or_insert(0) += 1;
        }
        counts
    }

    /// True if every letter of `word` occurs in the hand at least as often as in the word
    pub fn can_spell(&self, word: &str) -> bool {
        let mut counts = self.counts();
        for c in word.chars() {
            match counts.get_mut(&c) {
                Some(n) if *n > 0 => *n -= 1,
                _ => return false,
            }
        }
        true
    }

    /// Removes one tile per letter of `word`. Leaves the hand untouched and
    /// returns false if the word cannot be spelled.
    pub fn remove_word(&mut self, word: &str) -> bool {
        if !self.can_spell(word) {
            return false;
        }
        for c in word.chars() {
            if let Some(pos) = self.tiles.iter().position(|&t| t == c) {
                self.tiles.remove(pos);
            }
        }
        true
    }

    /// Draws from the bag until the hand holds `size` tiles or the bag is empty.
    /// Returns the number of tiles drawn.
    pub fn fill_from(&mut self, bag: &mut Bag, size: usize) -> usize {
        let missing = size.saturating_sub(self.len());
        let drawn = bag.draw_tiles(missing);
        let n = drawn.len();
        self.tiles.extend(drawn);
        n
    }

    /// Empties the hand, handing the tiles to the caller
    pub fn take_all(&mut self) -> Vec<char> {
        std::mem::take(&mut self.tiles)
    }
}

impl std::iter::FromIterator<char> for Hand {
    fn from_iter<T: IntoIterator<Item = char>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for t in &self.tiles {
            write!(f, "{}", t)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scrabble::letters::LetterInfo;

    #[test]
    fn test_can_spell_respects_multiplicity() {
        let hand: Hand = "ΑΛΦΑ".chars().collect();
        assert!(hand.can_spell("ΑΛΦΑ"));
        assert!(hand.can_spell("ΑΛ"));
        assert!(!hand.can_spell("ΑΑΑ"));
        assert!(!hand.can_spell("ΩΑ"));
    }

    #[test]
    fn test_remove_word() {
        let mut hand: Hand = "ΑΛΦΑΩ".chars().collect();
        assert!(hand.remove_word("ΑΛΑ"));
        assert_eq!(hand.tiles(), &['Φ', 'Ω']);
        assert!(!hand.remove_word("ΦΦ"));
        assert_eq!(hand.len(), 2);
    }

    #[test]
    fn test_fill_from_bag() {
        let mut bag = Bag::new_with_order(LetterInfo::greek(), &['Β', 'Γ', 'Δ']);
        let mut hand: Hand = "ΑΑ".chars().collect();
        assert_eq!(hand.fill_from(&mut bag, 4), 2);
        assert_eq!(hand.to_string(), "ΑΑΒΓ");
        // Bag runs dry before the hand is full
        assert_eq!(hand.fill_from(&mut bag, 7), 1);
        assert_eq!(hand.len(), 5);
        assert!(bag.is_empty());
    }

    #[test]
    fn test_take_all() {
        let mut hand: Hand = "ΑΒ".chars().collect();
        assert_eq!(hand.take_all(), vec!['Α', 'Β']);
        assert!(hand.is_empty());
    }
}
