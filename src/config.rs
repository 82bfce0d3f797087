use std::path::{Path, PathBuf};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::scrabble::{Bag, LetterInfo, MatchOptions, Strategy, HAND_SIZE};
use crate::utils::serialization::{self, SerializationError};

/// Settings for a session. Every field has a default so a config file only
/// needs the values it changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Word list, one word per line. Learned words are appended here
    pub dictionary: PathBuf,
    pub strategy: Strategy,
    /// Fixed seed for the bag, random when absent
    pub seed: Option<u64>,
    pub hand_size: usize,
    pub human_name: String,
    pub computer_name: String,
    /// Let a LEARN computer pick up the words the human spells that it does not know
    pub learn_from_human: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            dictionary: PathBuf::from("greek7.txt"),
            strategy: Strategy::default(),
            seed: None,
            hand_size: HAND_SIZE,
            human_name: "HUMAN".into(),
            computer_name: "COMPUTER".into(),
            learn_from_human: false,
        }
    }
}

impl GameConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SerializationError> {
        let config: Self = serialization::load_from_disk(path.as_ref())?;
        debug!("loaded config from {}: {:?}", path.as_ref().display(), config);
        Ok(config)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), SerializationError> {
        serialization::save_to_disk(self, path)
    }

    pub fn match_options(&self) -> MatchOptions {
        MatchOptions {
            hand_size: self.hand_size,
            learn_from_human: self.learn_from_human,
        }
    }

    /// Fresh full bag, seeded when a seed is configured
    pub fn make_bag(&self) -> Bag {
        match self.seed {
            Some(seed) => Bag::with_seed(LetterInfo::greek(), seed),
            None => Bag::from_entropy(LetterInfo::greek()),
        }
    }
}
