use log::debug;
use rand::prelude::SliceRandom;
use rand::rngs::StdRng;
use rand::SeedableRng;

use super::letters::LetterInfo;

#[derive(Debug, Clone)]
pub struct Bag {
    /// Supply and score of every letter
    info: LetterInfo,
    /// Source of every shuffle, seedable for reproducible games
    rng: StdRng,
    random: bool,
    /// Tiles still in the bag. Draws pop from the end
    pub distribution: Vec<char>,
}

impl Bag {
    pub fn new(info: LetterInfo, rng: StdRng) -> Bag {
        let mut bag = Bag {
            info,
            rng,
            random: true,
            distribution: Vec::new(),
        };
        bag.initialize();
        bag
    }

    pub fn with_seed(info: LetterInfo, seed: u64) -> Bag {
        Self::new(info, StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy(info: LetterInfo) -> Bag {
        Self::new(info, StdRng::from_entropy())
    }

    /// Bag that never shuffles. `order` lists the tiles in the order they will be drawn
    #[cfg(test)]
    pub fn new_with_order(info: LetterInfo, order: &[char]) -> Bag {
        let mut distribution = order.to_vec();
        distribution.reverse();
        Bag {
            info,
            rng: StdRng::seed_from_u64(0),
            random: false,
            distribution,
        }
    }

    /// Refills the bag with the full tile set and shuffles it
    pub fn initialize(&mut self) {
        self.distribution = self.info.expand();
        self.shuffle();
        debug!("bag initialized with {} tiles", self.distribution.len());
    }

    pub fn letter_info(&self) -> &LetterInfo {
        &self.info
    }

    pub fn len(&self) -> usize {
        self.distribution.len()
    }

    pub fn is_empty(&self) -> bool {
        self.distribution.is_empty()
    }

    /// Removes up to `n` tiles. Returns everything that is left when the bag runs low
    pub fn draw_tiles(&mut self, n: usize) -> Vec<char> {
        let n = n.min(self.distribution.len());
        let mut tiles = Vec::with_capacity(n);
        for _ in 0..n {
            if let Some(tile) = self.distribution.pop() {
                tiles.push(tile);
            }
        }
        debug!("drew {} tiles, {} left", tiles.len(), self.distribution.len());
        tiles
    }

    /// Puts tiles back and reshuffles
    pub fn give_back<I: IntoIterator<Item = char>>(&mut self, letters: I) {
        self.distribution.extend(letters);
        self.shuffle();
    }

    fn shuffle(&mut self) {
        if self.random {
            self.distribution.shuffle(&mut self.rng);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn histogram(tiles: &[char]) -> HashMap<char, usize> {
        let mut counts = HashMap::new();
        for &t in tiles {
            *counts.entry(t).or_insert(0) += 1;
        }
        counts
    }

    #[test]
    fn test_initialize_matches_table() {
        let info = LetterInfo::greek();
        let bag = Bag::with_seed(info.clone(), 7);
        assert_eq!(bag.len(), info.total());
        let counts = histogram(&bag.distribution);
        for letter in info.letters() {
            assert_eq!(counts[&letter], info.count(letter));
        }
    }

    #[test]
    fn test_seeded_bags_are_reproducible() {
        let mut a = Bag::with_seed(LetterInfo::greek(), 42);
        let mut b = Bag::with_seed(LetterInfo::greek(), 42);
        assert_eq!(a.draw_tiles(7), b.draw_tiles(7));
        assert_eq!(a.distribution, b.distribution);
    }

    #[test]
    fn test_draw_depletes() {
        let info = LetterInfo::new(&[('Α', 2, 1), ('Β', 1, 8)]);
        let mut bag = Bag::with_seed(info, 1);
        let tiles = bag.draw_tiles(7);
        assert_eq!(tiles.len(), 3);
        assert!(bag.is_empty());
        assert!(bag.draw_tiles(7).is_empty());
    }

    #[test]
    fn test_draw_then_give_back_restores_multiset() {
        let mut bag = Bag::with_seed(LetterInfo::greek(), 3);
        let before = histogram(&bag.distribution);
        let drawn = bag.draw_tiles(7);
        assert_eq!(drawn.len(), 7);
        assert_eq!(bag.len(), before.values().sum::<usize>() - 7);
        bag.give_back(drawn);
        assert_eq!(histogram(&bag.distribution), before);
    }

    #[test]
    fn test_ordered_bag() {
        let mut bag = Bag::new_with_order(LetterInfo::greek(), &['Α', 'Λ', 'Φ']);
        assert_eq!(bag.draw_tiles(2), vec!['Α', 'Λ']);
        bag.give_back(vec!['Ω']);
        assert_eq!(bag.draw_tiles(5), vec!['Ω', 'Φ']);
    }
}
