use std::collections::HashSet;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use fst::{Set, SetBuilder};
use log::{debug, info};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DictionaryError {
    #[error("failed to access dictionary file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to build word set: {0}")]
    Fst(#[from] fst::Error),
}

/// Anything that can tell whether a word is valid
pub trait WordOracle {
    fn is_valid(&self, word: &str) -> bool;
}

/// Static word list shared by every player of a match. Never mutated after loading.
pub struct Dictionary {
    words: Set<Vec<u8>>,
}

impl Dictionary {
    /// Builds the set from any list of words. Words are trimmed and uppercased,
    /// blank lines are dropped and duplicates are removed.
    pub fn from_words<I, S>(words: I) -> Result<Self, DictionaryError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut words = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_uppercase())
            .filter(|w| !w.is_empty())
            .collect::<Vec<_>>();
        // The fst builder needs keys in byte order without repeats
        words.sort_unstable();
        words.dedup();

        let mut build = SetBuilder::memory();
        build.extend_iter(words)?;
        let words = build.into_set();
        Ok(Self { words })
    }

    /// Reads one word per line
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, DictionaryError> {
        let file = File::open(path.as_ref())?;
        let reader = BufReader::new(file);
        let mut words = Vec::new();
        for line in reader.lines() {
            words.push(line?);
        }
        let dict = Self::from_words(words)?;
        info!(
            "loaded {} words from {}",
            dict.len(),
            path.as_ref().display()
        );
        Ok(dict)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    /// Appends words to a dictionary file, one per line. Existing content is kept
    /// and nothing is deduplicated.
    pub fn append_to_file<'a, P, I>(path: P, words: I) -> Result<usize, DictionaryError>
    where
        P: AsRef<Path>,
        I: IntoIterator<Item = &'a str>,
    {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path.as_ref())?;
        let mut writer = BufWriter::new(file);
        let mut written = 0;
        for w in words {
            writeln!(writer, "{}", w)?;
            written += 1;
        }
        writer.flush()?;
        debug!("appended {} words to {}", written, path.as_ref().display());
        Ok(written)
    }
}

impl WordOracle for Dictionary {
    fn is_valid(&self, word: &str) -> bool {
        self.contains(word)
    }
}

/// The static dictionary seen through one player's eyes: its own learned
/// words are merged in at query time.
#[derive(Clone, Copy)]
pub struct Vocabulary<'a> {
    dictionary: &'a Dictionary,
    learned: Option<&'a HashSet<String>>,
}

impl<'a> Vocabulary<'a> {
    pub fn new(dictionary: &'a Dictionary, learned: Option<&'a HashSet<String>>) -> Self {
        Self {
            dictionary,
            learned,
        }
    }
}

impl WordOracle for Vocabulary<'_> {
    fn is_valid(&self, word: &str) -> bool {
        self.dictionary.contains(word) || self.learned.map_or(false, |l| l.contains(word))
    }
}
