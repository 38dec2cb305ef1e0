//! Snapshot of the world that quest objectives are checked against

use ahash::AHashMap;

use crate::entity::Character;

#[derive(Debug, Clone, Default)]
pub struct WorldState {
    progress: AHashMap<String, u32>,
    sighted: Vec<String>,
    defeated: Vec<String>,
}

impl WorldState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Progress counters summed over every given character
    pub fn from_characters<'a>(characters: impl IntoIterator<Item = &'a Character>) -> Self {
        let mut state = Self::new();
        for character in characters {
            for (description, count) in &character.quest_progress {
                state.add_progress(description, *count);
            }
        }
        state
    }

    pub fn add_progress(&mut self, description: &str, amount: u32) {
        *self.progress.entry(description.to_string()).or_insert(0) += amount;
    }

    pub fn progress(&self, description: &str) -> u32 {
        self.progress.get(description).copied().unwrap_or(0)
    }

    pub fn sight_ship(&mut self, name: &str) {
        if !self.has_sighted(name) {
            self.sighted.push(name.to_string());
        }
    }

    /// Defeating a ship implies having found it
    pub fn defeat_ship(&mut self, name: &str) {
        self.sight_ship(name);
        if !self.has_defeated(name) {
            self.defeated.push(name.to_string());
        }
    }

    pub fn has_sighted(&self, name: &str) -> bool {
        self.sighted.iter().any(|n| n == name)
    }

    pub fn has_defeated(&self, name: &str) -> bool {
        self.defeated.iter().any(|n| n == name)
    }
}
