use crate::badges::SharedBadges;
use crate::progress::Progress;
use crate::scene::{self, Scene, TOTAL_EGGS};
use crate::words::{Grade, Word};
use std::collections::BTreeSet;

pub const EGG_POINTS: u32 = 10;

/// Egg-hunt state for one player: where they are and what they found.
pub struct Session
{
    grade: Option<Grade>,
    scene: Option<&'static Scene>,
    score: u32,
    found_eggs: BTreeSet<String>,
    badges: SharedBadges,
}

impl Session
{
    pub fn from_progress(progress: Progress) -> Self
    {
        Self {
            grade: None,
            scene: None,
            score: progress.score,
            found_eggs: progress.found_eggs,
            badges: SharedBadges::new(progress.badges),
        }
    }

    pub fn to_progress(&self) -> Progress
    {
        Progress {
            score: self.score,
            found_eggs: self.found_eggs.clone(),
            badges: self.badges.snapshot(),
        }
    }

    pub fn select_grade(&mut self, grade: Grade)
    {
        log::info!("{grade} selected");
        self.grade = Some(grade);
    }

    pub fn select_scene(&mut self, id: &str) -> Option<&'static Scene>
    {
        let found = scene::find_scene(id);
        if let Some(scene) = found {
            log::info!("scene '{}' selected", scene.id);
            self.scene = Some(scene);
        }
        found
    }

    pub fn leave_scene(&mut self)
    {
        self.scene = None;
    }

    pub fn grade(&self) -> Option<Grade>
    {
        self.grade
    }

    pub fn scene(&self) -> Option<&'static Scene>
    {
        self.scene
    }

    pub fn score(&self) -> u32
    {
        self.score
    }

    pub fn badges(&self) -> SharedBadges
    {
        self.badges.clone()
    }

    pub fn found_count(&self) -> usize
    {
        self.found_eggs.len()
    }

    pub fn is_found(&self, index: usize) -> bool
    {
        self.scene
            .is_some_and(|scene| self.found_eggs.contains(&scene::egg_key(scene, index)))
    }

    pub fn progress_percent(&self) -> u32
    {
        let ratio = self.found_eggs.len() as f32 / TOTAL_EGGS as f32;
        (ratio * 100.0).round() as u32
    }

    pub fn current_words(&self) -> Vec<Word>
    {
        self.grade.map(Grade::words).unwrap_or_default()
    }

    /// Opens an egg in the current scene. Eggs already found give nothing.
    pub fn reveal_egg(&mut self, index: usize) -> Option<Word>
    {
        let scene = self.scene?;
        if index >= scene.eggs.len() {
            return None;
        }
        let words = self.current_words();
        if words.is_empty() {
            return None;
        }
        let key = scene::egg_key(scene, index);
        if !self.found_eggs.insert(key) {
            return None;
        }
        self.score = self.score.saturating_add(EGG_POINTS);
        let word = words[index % words.len()].clone();
        log::info!("egg {}-{index} revealed '{}'", scene.id, word.english);
        Some(word)
    }
}
