//! Game context and world setup
//!
//! `GameContext` is built once at process start and passed by reference to
//! everything that needs the quest manager, the rng or the world log.

pub mod setup;

pub use setup::{demo_world, DemoWorld};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::combat::frontend::CombatFrontend;
use crate::combat::log::CombatLog;
use crate::combat::scene::{CombatOutcome, CombatScene};
use crate::core::config::CombatConfig;
use crate::core::types::Side;
use crate::entity::Ship;
use crate::quests::QuestManager;

pub struct GameContext {
    pub config: CombatConfig,
    pub quests: QuestManager,
    pub rng: ChaCha8Rng,
    /// Lines raised outside of combat (quest setup, engagement summaries)
    pub log: CombatLog,
}

impl GameContext {
    pub fn new(config: CombatConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        let log = CombatLog::with_capacity(config.log_capacity);
        Self {
            config,
            quests: QuestManager::new(),
            rng,
            log,
        }
    }

    /// Deliver queued quest notifications to the given crew
    pub fn dispatch_quests(&mut self, crew: &mut Ship) -> usize {
        self.quests.dispatch(crew, &mut self.log)
    }

    /// Fight one engagement; both ships are handed back afterwards with
    /// survivors, the fallen and any undistributed cargo.
    pub fn start_combat(
        &mut self,
        player: &mut Ship,
        opponent: &mut Ship,
        frontend: &mut dyn CombatFrontend,
    ) -> CombatOutcome {
        let rng = ChaCha8Rng::seed_from_u64(self.rng.gen());
        let mut scene = CombatScene::new(
            &self.config,
            std::mem::take(player),
            std::mem::take(opponent),
            rng,
        );
        let outcome = scene.run(frontend, &mut self.quests);
        let turns = scene.turn();
        let [first, second] = scene.into_ships();
        *player = first;
        *opponent = second;

        let summary = match outcome.winner() {
            Some(Side::First) => format!("The {} won after {} turns.", player.name, turns),
            Some(Side::Second) => format!("The {} won after {} turns.", opponent.name, turns),
            None => format!("No victor after {} turns.", turns),
        };
        self.log.push(summary);
        outcome
    }
}
