//! Combat configuration with documented defaults
//!
//! Values can be loaded from TOML; any field left out keeps its default.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::core::error::{BroadsideError, Result};

/// Configuration for a combat engagement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatConfig {
    // === GRID ===
    /// Number of columns on the combat grid
    pub grid_width: u32,

    /// Number of rows on the combat grid
    ///
    /// Crews larger than `grid_height / 2` wrap around and share rows.
    pub grid_height: u32,

    /// Distance of the second crew's column from the right edge
    ///
    /// The first crew deploys on column 1, the second on `grid_width - crew_spacing`.
    pub crew_spacing: u32,

    // === LOG ===
    /// Lines kept in the player-facing combat log
    pub log_capacity: usize,

    // === CHARACTERS ===
    /// Items a character can carry outside of equipment slots
    pub inventory_capacity: usize,

    // === TURN LOOP ===
    /// Turn limit; an engagement still running after this many turns is a draw
    pub max_turns: u32,

    /// Presentation delay after log-worthy events, in milliseconds
    ///
    /// Handed to the frontend only. Zero in headless and test runs.
    pub pause_ms: u64,

    /// Seed for item scatter and heal rolls. `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            grid_width: 15,
            grid_height: 15,
            crew_spacing: 5,
            log_capacity: 5,
            inventory_capacity: 20,
            max_turns: 500,
            pause_ms: 0,
            seed: None,
        }
    }
}

impl CombatConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Default config with a fixed seed
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }

    /// Parse a config from TOML text and validate it
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: CombatConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Column the first crew deploys on
    pub fn first_crew_column(&self) -> i32 {
        1
    }

    /// Column the second crew deploys on
    pub fn second_crew_column(&self) -> i32 {
        self.grid_width as i32 - self.crew_spacing as i32
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.grid_width == 0 || self.grid_height == 0 {
            return Err(BroadsideError::InvalidConfig(format!(
                "grid must be non-empty (got {}x{})",
                self.grid_width, self.grid_height
            )));
        }

        // Second column must sit right of the first and inside the grid
        let second = self.second_crew_column();
        if second <= self.first_crew_column() || second >= self.grid_width as i32 {
            return Err(BroadsideError::InvalidConfig(format!(
                "crew_spacing ({}) leaves no room for two crews on a grid {} wide",
                self.crew_spacing, self.grid_width
            )));
        }

        if self.log_capacity == 0 {
            return Err(BroadsideError::InvalidConfig(
                "log_capacity must be positive".into(),
            ));
        }

        if self.inventory_capacity == 0 {
            return Err(BroadsideError::InvalidConfig(
                "inventory_capacity must be positive".into(),
            ));
        }

        if self.max_turns == 0 {
            return Err(BroadsideError::InvalidConfig(
                "max_turns must be positive".into(),
            ));
        }

        Ok(())
    }
}
