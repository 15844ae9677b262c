pub mod memory_match;
pub mod ticker;
pub mod word_jump;

use crate::badges::BadgeSink;
use crate::words::Word;
use memory_match::MemoryMatch;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use word_jump::WordJump;

pub struct GameDescriptor
{
    pub name: &'static str,
    pub description: &'static str,
}

pub fn registry() -> Vec<GameDescriptor>
{
    vec![GameDescriptor {
        name: GameKind::WordJump.tag(),
        description: "Catch the falling letters in spelling order",
    },
    GameDescriptor {
        name: GameKind::MemoryMatch.tag(),
        description: "Flip cards to pair English words with Chinese",
    }]
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameKind
{
    WordJump,
    MemoryMatch,
}

impl GameKind
{
    pub fn tag(self) -> &'static str
    {
        match self {
            GameKind::WordJump => "word-jump",
            GameKind::MemoryMatch => "memory-match",
        }
    }
}

impl fmt::Display for GameKind
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        f.write_str(self.tag())
    }
}

impl FromStr for GameKind
{
    type Err = GameError;

    fn from_str(tag: &str) -> Result<Self, Self::Err>
    {
        match tag {
            "word-jump" => Ok(GameKind::WordJump),
            "memory-match" => Ok(GameKind::MemoryMatch),
            other => Err(GameError::UnknownGame(other.to_string())),
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum GameError
{
    #[error("Unknown game type '{0}'")]
    UnknownGame(String),

    #[error("{game} expects {expected}")]
    WrongData
    {
        game: GameKind,
        expected: &'static str,
    },

    #[error("{0} needs at least one word")]
    EmptyDataset(GameKind),
}

#[derive(Clone, Debug)]
pub enum GameData
{
    Word(String),
    Pairs(Vec<Word>),
}

/// Render intents emitted by the engines and drained by the host.
#[derive(Clone, Debug, PartialEq)]
pub enum GameEvent
{
    StartControl(bool),
    ScoreChanged(usize),
    TokenSpawned
    {
        id: u32,
        glyph: char,
        x: f32,
    },
    TokenRemoved(u32),
    DeckDealt(usize),
    TileFlipped(usize),
    TilesHidden(usize, usize),
    TilesMatched(usize, usize),
    MatchProgress
    {
        matched: usize,
        total: usize,
    },
    Finished
    {
        won: bool,
        message: &'static str,
    },
}

pub enum MiniGame
{
    WordJump(WordJump),
    MemoryMatch(MemoryMatch),
}

impl MiniGame
{
    pub fn kind(&self) -> GameKind
    {
        match self {
            MiniGame::WordJump(_) => GameKind::WordJump,
            MiniGame::MemoryMatch(_) => GameKind::MemoryMatch,
        }
    }

    pub fn start(&mut self)
    {
        match self {
            MiniGame::WordJump(game) => game.start(),
            MiniGame::MemoryMatch(game) => game.start(),
        }
    }

    pub fn advance(&mut self, elapsed: Duration)
    {
        match self {
            MiniGame::WordJump(game) => game.advance(elapsed),
            MiniGame::MemoryMatch(game) => game.advance(elapsed),
        }
    }

    pub fn start_enabled(&self) -> bool
    {
        match self {
            MiniGame::WordJump(game) => game.start_enabled(),
            MiniGame::MemoryMatch(game) => game.start_enabled(),
        }
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent>
    {
        match self {
            MiniGame::WordJump(game) => game.drain_events(),
            MiniGame::MemoryMatch(game) => game.drain_events(),
        }
    }
}

/// Builds the mini-game named by `tag`. Nothing is constructed on error.
pub fn create_game(
    tag: &str,
    data: GameData,
    badges: Box<dyn BadgeSink>,
) -> Result<MiniGame, GameError>
{
    let result = tag.parse::<GameKind>().and_then(|kind| build(kind, data, badges));
    if let Err(err) = &result {
        log::error!("cannot create mini-game: {err}");
    }
    result
}

fn build(kind: GameKind, data: GameData, badges: Box<dyn BadgeSink>) -> Result<MiniGame, GameError>
{
    match (kind, data) {
        (GameKind::WordJump, GameData::Word(word)) => {
            let game = WordJump::new(&word, badges).ok_or(GameError::EmptyDataset(kind))?;
            log::info!("word-jump created for '{word}'");
            Ok(MiniGame::WordJump(game))
        }
        (GameKind::MemoryMatch, GameData::Pairs(pairs)) => {
            let count = pairs.len();
            let game = MemoryMatch::new(pairs, badges).ok_or(GameError::EmptyDataset(kind))?;
            log::info!("memory-match created with {count} pairs");
            Ok(MiniGame::MemoryMatch(game))
        }
        (GameKind::WordJump, GameData::Pairs(_)) => Err(GameError::WrongData {
            game: kind,
            expected: "a single word",
        }),
        (GameKind::MemoryMatch, GameData::Word(_)) => Err(GameError::WrongData {
            game: kind,
            expected: "a list of word pairs",
        }),
    }
}
