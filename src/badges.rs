use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;

pub const WORD_MASTER: &str = "word-master";
pub const MEMORY_KING: &str = "memory-king";

pub const KNOWN_BADGES: [(&str, &str); 2] = [(WORD_MASTER, "Word Master"), (MEMORY_KING, "Memory King")];

/// The only capability a mini-game gets on the player's achievements.
pub trait BadgeSink
{
    fn award(&mut self, badge: &str);
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BadgeSet(BTreeSet<String>);

impl BadgeSet
{
    pub fn contains(&self, badge: &str) -> bool
    {
        self.0.contains(badge)
    }

    pub fn len(&self) -> usize
    {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool
    {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str>
    {
        self.0.iter().map(String::as_str)
    }
}

impl BadgeSink for BadgeSet
{
    fn award(&mut self, badge: &str)
    {
        if self.0.insert(badge.to_string()) {
            log::info!("badge earned: {badge}");
        }
    }
}

impl FromIterator<String> for BadgeSet
{
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self
    {
        Self(iter.into_iter().collect())
    }
}

/// Badge set shared between the session and the running mini-game.
#[derive(Clone, Debug, Default)]
pub struct SharedBadges(Rc<RefCell<BadgeSet>>);

impl SharedBadges
{
    pub fn new(badges: BadgeSet) -> Self
    {
        Self(Rc::new(RefCell::new(badges)))
    }

    pub fn contains(&self, badge: &str) -> bool
    {
        self.0.borrow().contains(badge)
    }

    pub fn snapshot(&self) -> BadgeSet
    {
        self.0.borrow().clone()
    }
}

impl BadgeSink for SharedBadges
{
    fn award(&mut self, badge: &str)
    {
        self.0.borrow_mut().award(badge);
    }
}
