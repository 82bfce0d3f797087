pub mod agent;
pub mod bag;
pub mod dictionary;
pub mod hand;
pub mod letters;
pub mod player;
pub mod state;
pub mod word_search;

pub use self::agent::Computer;
pub use self::bag::Bag;
pub use self::dictionary::Dictionary;
pub use self::letters::LetterInfo;
pub use self::player::Human;
pub use self::state::{Match, MatchOptions, HAND_SIZE};
pub use self::word_search::Strategy;
