use super::GameEvent;
use crate::badges::{BadgeSink, MEMORY_KING};
use crate::words::Word;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;

/// How long two face-up tiles stay visible before they are compared.
pub const MATCH_DELAY: Duration = Duration::from_millis(1000);

const WIN_MESSAGE: &str = "You matched every pair!";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Language
{
    English,
    Chinese,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Tile
{
    pub text: String,
    pub language: Language,
    pub matched: bool,
    pub flipped: bool,
    pub pair_key: Word,
}

impl Tile
{
    fn new(word: &Word, language: Language) -> Self
    {
        let text = match language {
            Language::English => word.english.clone(),
            Language::Chinese => word.chinese.clone(),
        };
        Self {
            text,
            language,
            matched: false,
            flipped: false,
            pair_key: word.clone(),
        }
    }

    pub fn is_face_up(&self) -> bool
    {
        self.flipped || self.matched
    }

    fn pairs_with(&self, other: &Tile) -> bool
    {
        self.pair_key == other.pair_key && self.language != other.language
    }
}

/// Fisher-Yates, back to front.
pub fn shuffle<T>(items: &mut [T], rng: &mut impl Rng)
{
    for i in (1..items.len()).rev() {
        let j = rng.gen_range(0..=i);
        items.swap(i, j);
    }
}

pub fn build_deck(pairs: &[Word]) -> Vec<Tile>
{
    pairs
        .iter()
        .flat_map(|word| [Tile::new(word, Language::English), Tile::new(word, Language::Chinese)])
        .collect()
}

pub struct MemoryMatch
{
    pairs: Vec<Word>,
    tiles: Vec<Tile>,
    selection: Vec<usize>,
    matched_count: usize,
    pending_check: Option<Duration>,
    start_enabled: bool,
    won: bool,
    rng: StdRng,
    badges: Box<dyn BadgeSink>,
    events: Vec<GameEvent>,
}

impl MemoryMatch
{
    pub fn new(pairs: Vec<Word>, badges: Box<dyn BadgeSink>) -> Option<Self>
    {
        if pairs.is_empty() {
            return None;
        }
        Some(Self {
            pairs,
            tiles: Vec::new(),
            selection: Vec::with_capacity(2),
            matched_count: 0,
            pending_check: None,
            start_enabled: true,
            won: false,
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

    pub fn pairs(&self) -> &[Word]
    {
        &self.pairs
    }

    pub fn tiles(&self) -> &[Tile]
    {
        &self.tiles
    }

    pub fn selection(&self) -> &[usize]
    {
        &self.selection
    }

    pub fn matched_count(&self) -> usize
    {
        self.matched_count
    }

    pub fn start_enabled(&self) -> bool
    {
        self.start_enabled
    }

    pub fn is_won(&self) -> bool
    {
        self.won
    }

    pub fn is_check_pending(&self) -> bool
    {
        self.pending_check.is_some()
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
        let mut deck = build_deck(&self.pairs);
        shuffle(&mut deck, &mut self.rng);
        self.tiles = deck;
        self.matched_count = 0;
        self.selection.clear();
        self.pending_check = None;
        self.won = false;
        self.start_enabled = false;
        self.events.push(GameEvent::StartControl(false));
        self.events.push(GameEvent::DeckDealt(self.tiles.len()));
        self.report_progress();
        log::debug!("memory-match dealt {} tiles", self.tiles.len());
    }

    pub fn on_tile_clicked(&mut self, index: usize) -> bool
    {
        if self.selection.len() >= 2 {
            return false;
        }
        let Some(tile) = self.tiles.get_mut(index) else {
            return false;
        };
        if tile.matched || tile.flipped {
            return false;
        }

        tile.flipped = true;
        self.selection.push(index);
        self.events.push(GameEvent::TileFlipped(index));
        if self.selection.len() == 2 {
            self.pending_check = Some(MATCH_DELAY);
        }
        true
    }

    pub fn advance(&mut self, elapsed: Duration)
    {
        let Some(remaining) = self.pending_check else {
            return;
        };
        match remaining.checked_sub(elapsed) {
            Some(left) if !left.is_zero() => self.pending_check = Some(left),
            _ => self.check_match(),
        }
    }

    pub fn check_match(&mut self)
    {
        self.pending_check = None;
        let selection = std::mem::take(&mut self.selection);
        let &[first, second] = selection.as_slice() else {
            return;
        };

        if self.tiles[first].pairs_with(&self.tiles[second]) {
            self.tiles[first].matched = true;
            self.tiles[second].matched = true;
            self.matched_count += 1;
            self.events.push(GameEvent::TilesMatched(first, second));
            self.report_progress();
            if self.matched_count == self.pairs.len() {
                self.end_game();
            }
        } else {
            self.tiles[first].flipped = false;
            self.tiles[second].flipped = false;
            self.events.push(GameEvent::TilesHidden(first, second));
        }
    }

    /// Drops a scheduled comparison and turns the pending tiles back over.
    pub fn cancel_pending(&mut self)
    {
        self.pending_check = None;
        for index in std::mem::take(&mut self.selection) {
            if let Some(tile) = self.tiles.get_mut(index) {
                tile.flipped = false;
            }
        }
    }

    fn report_progress(&mut self)
    {
        self.events.push(GameEvent::MatchProgress {
            matched: self.matched_count,
            total: self.pairs.len(),
        });
    }

    fn end_game(&mut self)
    {
        if self.won {
            return;
        }
        self.won = true;
        self.start_enabled = true;
        self.events.push(GameEvent::StartControl(true));
        self.events.push(GameEvent::Finished {
            won: true,
            message: WIN_MESSAGE,
        });
        log::info!("memory-match won with {} pairs", self.pairs.len());
        self.badges.award(MEMORY_KING);
    }
}

#[cfg(test)]
mod tests
{
    use super::*;
    use crate::badges::SharedBadges;
    use crate::words::Grade;

    fn started(seed: u64) -> (MemoryMatch, SharedBadges)
    {
        let badges = SharedBadges::default();
        let mut game = MemoryMatch::new(Grade::Middle.words(), Box::new(badges.clone()))
            .expect("pairs")
            .with_rng(StdRng::seed_from_u64(seed));
        game.start();
        (game, badges)
    }

    fn partner_of(game: &MemoryMatch, index: usize) -> usize
    {
        let tile = &game.tiles()[index];
        game.tiles()
            .iter()
            .position(|other| other.pair_key == tile.pair_key && other.language != tile.language)
            .expect("every tile has a partner")
    }

    #[test]
    fn third_flip_waits_for_comparison()
    {
        let (mut game, _) = started(1);
        assert!(game.on_tile_clicked(0));
        assert!(game.on_tile_clicked(1));
        assert!(!game.on_tile_clicked(2));
        assert!(!game.tiles()[2].flipped);
        assert!(game.is_check_pending());
    }

    #[test]
    fn same_tile_twice_is_ignored()
    {
        let (mut game, _) = started(2);
        assert!(game.on_tile_clicked(3));
        assert!(!game.on_tile_clicked(3));
        assert_eq!(game.selection(), &[3]);
    }

    #[test]
    fn comparison_runs_after_delay()
    {
        let (mut game, _) = started(3);
        let partner = partner_of(&game, 0);
        game.on_tile_clicked(0);
        game.on_tile_clicked(partner);
        game.advance(Duration::from_millis(999));
        assert_eq!(game.matched_count(), 0);
        game.advance(Duration::from_millis(1));
        assert_eq!(game.matched_count(), 1);
        assert!(game.selection().is_empty());
        assert!(!game.on_tile_clicked(0));
    }

    #[test]
    fn cancel_pending_turns_tiles_back()
    {
        let (mut game, _) = started(4);
        game.on_tile_clicked(0);
        game.on_tile_clicked(1);
        game.cancel_pending();
        assert!(!game.is_check_pending());
        assert!(game.selection().is_empty());
        assert!(!game.tiles()[0].flipped && !game.tiles()[1].flipped);
        game.advance(MATCH_DELAY);
        assert_eq!(game.matched_count(), 0);
    }

    #[test]
    fn shuffle_is_a_permutation()
    {
        let mut items: Vec<u32> = (0..20).collect();
        shuffle(&mut items, &mut StdRng::seed_from_u64(9));
        let mut sorted = items.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..20).collect::<Vec<_>>());
    }

    #[test]
    fn restart_is_blocked_until_won()
    {
        let (mut game, _) = started(5);
        game.on_tile_clicked(0);
        game.start();
        assert!(game.tiles()[0].flipped);
    }
}
