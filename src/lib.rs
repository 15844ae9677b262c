//! Vocabulary egg hunt for young learners.
//!
//! Players pick a grade and a scene, open eggs to reveal English/Chinese
//! word pairs and practise them in two mini-games: `word-jump` (catch the
//! falling letters in spelling order) and `memory-match` (pair English and
//! Chinese cards). The engines in [`games`] are plain state machines driven
//! by `advance` ticks and click calls; [`ui`] is the crossterm host.

pub mod badges;
pub mod config;
pub mod error;
pub mod games;
pub mod logging;
pub mod progress;
pub mod scene;
pub mod session;
pub mod speech;
pub mod ui;
pub mod words;

pub use badges::{BadgeSet, BadgeSink, SharedBadges};
pub use games::{create_game, GameData, GameError, GameEvent, GameKind, MiniGame};
pub use words::{Grade, Word};
