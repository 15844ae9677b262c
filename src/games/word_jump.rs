use super::GameEvent;
use super::ticker::Ticker;
use crate::badges::{BadgeSink, WORD_MASTER};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;

pub const FALL_INTERVAL: Duration = Duration::from_millis(50);
pub const FALL_STEP: f32 = 2.0;
pub const PLAY_AREA_HEIGHT: f32 = 400.0;
pub const TOKEN_MARGIN: f32 = 50.0;
const MIN_X: f32 = 10.0;
const MAX_X: f32 = 90.0;

const WIN_MESSAGE: &str = "Well done, you spelled the word!";
const LOSE_MESSAGE: &str = "Game over!";

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlayArea
{
    pub height: f32,
    pub margin: f32,
}

impl PlayArea
{
    /// A token strictly below this line has hit the bottom.
    pub fn floor(&self) -> f32
    {
        self.height - self.margin
    }
}

impl Default for PlayArea
{
    fn default() -> Self
    {
        Self {
            height: PLAY_AREA_HEIGHT,
            margin: TOKEN_MARGIN,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpawnPolicy
{
    Single,
    Every(Duration),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Token
{
    pub id: u32,
    pub glyph: char,
    /// Horizontal position, percent of the field width.
    pub x: f32,
    pub y: f32,
}

pub struct WordJump
{
    word: String,
    target: Vec<char>,
    progress: usize,
    tokens: Vec<Token>,
    over: bool,
    start_enabled: bool,
    next_id: u32,
    area: PlayArea,
    spawn: SpawnPolicy,
    fall: Ticker,
    spawn_ticker: Option<Ticker>,
    rng: StdRng,
    badges: Box<dyn BadgeSink>,
    events: Vec<GameEvent>,
}

impl WordJump
{
    pub fn new(word: &str, badges: Box<dyn BadgeSink>) -> Option<Self>
    {
        if word.is_empty() {
            return None;
        }
        Some(Self {
            word: word.to_string(),
            target: word.chars().collect(),
            progress: 0,
            tokens: Vec::new(),
            over: false,
            start_enabled: true,
            next_id: 0,
            area: PlayArea::default(),
            spawn: SpawnPolicy::Single,
            fall: Ticker::new(FALL_INTERVAL),
            spawn_ticker: None,
            rng: StdRng::from_entropy(),
            badges,
            events: Vec::new(),
        })
    }

    pub fn with_rng(mut self, rng: StdRng) -> Self
    {
        self.rng = rng;
        self
    }

    pub fn with_play_area(mut self, area: PlayArea) -> Self
    {
        self.area = area;
        self
    }

    pub fn with_spawn_policy(mut self, spawn: SpawnPolicy) -> Self
    {
        self.spawn = spawn;
        self
    }

    pub fn target_word(&self) -> &str
    {
        &self.word
    }

    pub fn progress(&self) -> usize
    {
        self.progress
    }

    pub fn score(&self) -> usize
    {
        self.progress
    }

    pub fn is_over(&self) -> bool
    {
        self.over
    }

    pub fn start_enabled(&self) -> bool
    {
        self.start_enabled
    }

    pub fn is_running(&self) -> bool
    {
        !self.start_enabled && !self.over
    }

    pub fn tokens(&self) -> &[Token]
    {
        &self.tokens
    }

    pub fn play_area(&self) -> PlayArea
    {
        self.area
    }

    pub fn next_glyph(&self) -> Option<char>
    {
        self.target.get(self.progress).copied()
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent>
    {
        std::mem::take(&mut self.events)
    }

    pub fn start(&mut self)
    {
        if !self.start_enabled {
            return;
        }
        for token in std::mem::take(&mut self.tokens) {
            self.events.push(GameEvent::TokenRemoved(token.id));
        }
        self.progress = 0;
        self.over = false;
        self.start_enabled = false;
        self.fall.reset();
        self.spawn_ticker = match self.spawn {
            SpawnPolicy::Single => None,
            SpawnPolicy::Every(interval) => Some(Ticker::new(interval)),
        };
        self.events.push(GameEvent::StartControl(false));
        self.events.push(GameEvent::ScoreChanged(0));
        log::debug!("word-jump round started for '{}'", self.word);
        self.create_letter();
    }

    pub fn create_letter(&mut self)
    {
        if !self.is_running() {
            return;
        }
        let glyph = self.target[self.rng.gen_range(0..self.target.len())];
        let x = self.rng.gen_range(MIN_X..MAX_X);
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        self.tokens.push(Token { id, glyph, x, y: 0.0 });
        self.events.push(GameEvent::TokenSpawned { id, glyph, x });
    }

    pub fn advance(&mut self, elapsed: Duration)
    {
        if !self.is_running() {
            return;
        }
        let steps = self.fall.advance(elapsed);
        let floor = self.area.floor();
        for _ in 0..steps {
            let mut landed = None;
            for token in &mut self.tokens {
                token.y += FALL_STEP;
                if landed.is_none() && token.y > floor {
                    landed = Some(token.glyph);
                }
            }
            if let Some(glyph) = landed {
                log::debug!("token '{glyph}' reached the bottom");
                self.end_game(false);
                return;
            }
        }

        let spawns = self
            .spawn_ticker
            .as_mut()
            .map_or(0, |ticker| ticker.advance(elapsed));
        for _ in 0..spawns {
            self.create_letter();
        }
    }

    /// Returns `true` when the click advanced the spelling.
    pub fn on_token_clicked(&mut self, id: u32) -> bool
    {
        if !self.is_running() {
            return false;
        }
        let Some(index) = self.tokens.iter().position(|token| token.id == id) else {
            return false;
        };
        if Some(self.tokens[index].glyph) != self.next_glyph() {
            return false;
        }

        self.progress += 1;
        self.events.push(GameEvent::ScoreChanged(self.progress));
        let token = self.tokens.remove(index);
        self.events.push(GameEvent::TokenRemoved(token.id));

        if self.progress == self.target.len() {
            self.end_game(true);
        }
        true
    }

    pub fn end_game(&mut self, won: bool)
    {
        if !self.is_running() {
            return;
        }
        self.over = true;
        self.start_enabled = true;
        self.spawn_ticker = None;
        for token in std::mem::take(&mut self.tokens) {
            self.events.push(GameEvent::TokenRemoved(token.id));
        }
        self.events.push(GameEvent::StartControl(true));
        let message = if won { WIN_MESSAGE } else { LOSE_MESSAGE };
        self.events.push(GameEvent::Finished { won, message });
        log::info!(
            "word-jump '{}' finished: {} ({}/{})",
            self.word,
            if won { "won" } else { "lost" },
            self.progress,
            self.target.len()
        );
        if won {
            self.badges.award(WORD_MASTER);
        }
    }
}

#[cfg(test)]
mod tests
{
    use super::*;
    use crate::badges::SharedBadges;

    fn new_game(word: &str, seed: u64) -> (WordJump, SharedBadges)
    {
        let badges = SharedBadges::default();
        let game = WordJump::new(word, Box::new(badges.clone()))
            .expect("non-empty word")
            .with_rng(StdRng::seed_from_u64(seed));
        (game, badges)
    }

    fn token_with(game: &mut WordJump, glyph: char) -> u32
    {
        for _ in 0..500 {
            if let Some(token) = game.tokens().iter().find(|t| t.glyph == glyph) {
                return token.id;
            }
            game.create_letter();
        }
        panic!("no '{glyph}' token spawned");
    }

    #[test]
    fn start_spawns_exactly_one_token_in_range()
    {
        let (mut game, _) = new_game("bird", 1);
        game.start();
        assert_eq!(game.tokens().len(), 1);
        let token = &game.tokens()[0];
        assert!("bird".contains(token.glyph));
        assert!((MIN_X..MAX_X).contains(&token.x));
        assert_eq!(token.y, 0.0);
        assert!(!game.start_enabled());
    }

    #[test]
    fn single_policy_never_respawns()
    {
        let (mut game, _) = new_game("a", 2);
        game.start();
        let id = game.tokens()[0].id;
        assert!(game.on_token_clicked(id));
        assert!(game.is_over());

        let (mut game, _) = new_game("ab", 3);
        game.start();
        game.advance(Duration::from_secs(1));
        assert_eq!(game.tokens().len(), 1);
    }

    #[test]
    fn tokens_fall_two_units_per_interval()
    {
        let (mut game, _) = new_game("tree", 4);
        game.start();
        game.advance(FALL_INTERVAL * 10);
        assert_eq!(game.tokens()[0].y, 20.0);
        game.advance(Duration::from_millis(25));
        assert_eq!(game.tokens()[0].y, 20.0);
        game.advance(Duration::from_millis(25));
        assert_eq!(game.tokens()[0].y, 22.0);
    }

    #[test]
    fn every_policy_spawns_on_interval()
    {
        let (game, _) = new_game("tree", 5);
        let mut game = game.with_spawn_policy(SpawnPolicy::Every(Duration::from_millis(500)));
        game.start();
        game.advance(Duration::from_millis(1000));
        assert_eq!(game.tokens().len(), 3);
    }

    #[test]
    fn end_game_clears_tokens_and_reenables_start()
    {
        let (mut game, badges) = new_game("tree", 6);
        game.start();
        game.create_letter();
        game.drain_events();
        game.end_game(false);
        assert!(game.tokens().is_empty());
        assert!(game.start_enabled());
        assert!(!badges.contains(WORD_MASTER));
        let events = game.drain_events();
        assert_eq!(events.iter().filter(|e| matches!(e, GameEvent::TokenRemoved(_))).count(), 2);
        assert!(events.contains(&GameEvent::Finished {
            won: false,
            message: LOSE_MESSAGE
        }));
    }

    #[test]
    fn restart_after_loss_resets_progress()
    {
        let (mut game, _) = new_game("ab", 7);
        game.start();
        let id = token_with(&mut game, 'a');
        assert!(game.on_token_clicked(id));
        game.create_letter();
        game.advance(FALL_INTERVAL * 200);
        assert!(game.is_over());
        game.start();
        assert_eq!(game.progress(), 0);
        assert!(!game.is_over());
        assert_eq!(game.tokens().len(), 1);
    }

    #[test]
    fn start_is_ignored_mid_round()
    {
        let (mut game, _) = new_game("ab", 8);
        game.start();
        let id = token_with(&mut game, 'a');
        game.on_token_clicked(id);
        game.start();
        assert_eq!(game.progress(), 1);
    }
}
