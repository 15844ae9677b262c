// Behaviour of the falling-letter engine driven through its public API.

use egg_hunt_words::badges::{BadgeSink, WORD_MASTER};
use egg_hunt_words::games::word_jump::{PlayArea, WordJump, FALL_INTERVAL};
use egg_hunt_words::games::GameEvent;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Clone, Default)]
struct CountingBadges(Rc<RefCell<Vec<String>>>);

impl CountingBadges
{
    fn count(&self, badge: &str) -> usize
    {
        self.0.borrow().iter().filter(|b| b.as_str() == badge).count()
    }
}

impl BadgeSink for CountingBadges
{
    fn award(&mut self, badge: &str)
    {
        self.0.borrow_mut().push(badge.to_string());
    }
}

fn started(word: &str, seed: u64) -> (WordJump, CountingBadges)
{
    let badges = CountingBadges::default();
    let mut game = WordJump::new(word, Box::new(badges.clone()))
        .expect("non-empty word")
        .with_rng(StdRng::seed_from_u64(seed));
    game.start();
    (game, badges)
}

/// Spawns letters until one carrying `glyph` is airborne.
fn find_or_spawn(game: &mut WordJump, glyph: char) -> u32
{
    for _ in 0..1000 {
        if let Some(token) = game.tokens().iter().find(|t| t.glyph == glyph) {
            return token.id;
        }
        game.create_letter();
    }
    panic!("letter '{glyph}' never spawned");
}

fn spell(game: &mut WordJump, word: &str)
{
    for glyph in word.chars() {
        let id = find_or_spawn(game, glyph);
        assert!(game.on_token_clicked(id), "click on '{glyph}' should score");
    }
}

#[test]
fn spelling_in_order_wins()
{
    for (seed, word) in ["balloon", "tree", "inheritance", "a"].iter().enumerate() {
        let (mut game, badges) = started(word, seed as u64);
        spell(&mut game, word);
        assert!(game.is_over());
        assert_eq!(game.progress(), word.chars().count());
        assert!(game.tokens().is_empty());
        assert_eq!(badges.count(WORD_MASTER), 1);
    }
}

#[test]
fn mismatched_click_is_inert()
{
    let (mut game, _) = started("bird", 3);
    let wrong = find_or_spawn(&mut game, 'r');
    let before = game.tokens().len();
    assert!(!game.on_token_clicked(wrong));
    assert_eq!(game.progress(), 0);
    assert!(!game.is_over());
    assert_eq!(game.tokens().len(), before);

    let right = find_or_spawn(&mut game, 'b');
    assert!(game.on_token_clicked(right));
    assert!(!game.on_token_clicked(wrong));
    assert_eq!(game.progress(), 1);
}

#[test]
fn unknown_token_id_is_ignored()
{
    let (mut game, _) = started("tree", 4);
    assert!(!game.on_token_clicked(9999));
    assert_eq!(game.progress(), 0);
}

#[test]
fn token_crossing_the_floor_loses()
{
    let (mut game, badges) = started("tree", 5);
    let floor_steps = (game.play_area().floor() / 2.0) as u32;
    game.advance(FALL_INTERVAL * floor_steps);
    assert!(!game.is_over());
    game.advance(FALL_INTERVAL);
    assert!(game.is_over());
    assert!(game.start_enabled());
    assert!(game.tokens().is_empty());
    assert_eq!(badges.count(WORD_MASTER), 0);

    let events = game.drain_events();
    assert!(events.iter().any(|e| matches!(e, GameEvent::Finished { won: false, .. })));
}

#[test]
fn no_scoring_or_spawning_after_game_over()
{
    let (mut game, _) = started("tree", 6);
    game.advance(FALL_INTERVAL * 500);
    assert!(game.is_over());
    game.create_letter();
    assert!(game.tokens().is_empty());
    assert!(!game.on_token_clicked(0));
    assert_eq!(game.progress(), 0);
}

#[test]
fn smaller_play_area_ends_sooner()
{
    let badges = CountingBadges::default();
    let mut game = WordJump::new("tree", Box::new(badges))
        .expect("word")
        .with_play_area(PlayArea {
            height: 100.0,
            margin: 20.0,
        });
    game.start();
    game.advance(FALL_INTERVAL * 40);
    assert!(!game.is_over());
    game.advance(FALL_INTERVAL);
    assert!(game.is_over());
}

#[test]
fn word_master_awarded_once_per_playthrough()
{
    let (mut game, badges) = started("ab", 7);
    spell(&mut game, "ab");
    game.end_game(true);
    assert_eq!(badges.count(WORD_MASTER), 1);

    let finished = game
        .drain_events()
        .into_iter()
        .filter(|e| matches!(e, GameEvent::Finished { won: true, .. }))
        .count();
    assert_eq!(finished, 1);

    game.start();
    spell(&mut game, "ab");
    assert_eq!(badges.count(WORD_MASTER), 2);
}
