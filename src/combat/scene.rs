//! Combat scene - the turn loop of one engagement
//!
//! Setup -> Active -> Resolved. One turn runs these steps in order:
//! render, one player intent, one AI decision per other living combatant
//! (first crew, then second), state effects, control reassignment and the
//! termination check. Dead characters are swept after every action.

use std::time::Duration;

use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::combat::ai::{CrewAi, HeuristicAi};
use crate::combat::field::Battlefield;
use crate::combat::frontend::{CombatFrontend, PlayerIntent, SceneView};
use crate::combat::log::CombatLog;
use crate::command::{AttackCommand, CommandController, DefendCommand, HealCommand, MoveCommand};
use crate::core::config::CombatConfig;
use crate::core::types::{CharacterId, Side, Turn};
use crate::entity::Ship;
use crate::quests::{QuestManager, WorldState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CombatOutcome {
    Victory { winner: Side },
    Draw,
}

impl CombatOutcome {
    pub fn winner(&self) -> Option<Side> {
        match self {
            CombatOutcome::Victory { winner } => Some(*winner),
            CombatOutcome::Draw => None,
        }
    }

    /// The crew that was wiped out, if only one was
    pub fn eliminated(&self) -> Option<Side> {
        self.winner().map(|w| w.opposite())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScenePhase {
    Setup,
    Active,
    Resolved(CombatOutcome),
}

pub struct CombatScene {
    field: Battlefield,
    controller: CommandController,
    ai: HeuristicAi,
    config: CombatConfig,
    phase: ScenePhase,
    turn: Turn,
    player_side: Side,
    controlled: Option<CharacterId>,
}

impl CombatScene {
    pub fn new(config: &CombatConfig, first: Ship, second: Ship, rng: ChaCha8Rng) -> Self {
        Self {
            field: Battlefield::new(config, first, second, rng),
            controller: CommandController::new(),
            ai: HeuristicAi::new(),
            config: config.clone(),
            phase: ScenePhase::Setup,
            turn: 0,
            player_side: Side::First,
            controlled: None,
        }
    }

    // ===== ACCESSORS =====

    pub fn field(&self) -> &Battlefield {
        &self.field
    }

    pub fn field_mut(&mut self) -> &mut Battlefield {
        &mut self.field
    }

    pub fn phase(&self) -> ScenePhase {
        self.phase
    }

    pub fn turn(&self) -> Turn {
        self.turn
    }

    pub fn controlled(&self) -> Option<CharacterId> {
        self.controlled
    }

    pub fn player_side(&self) -> Side {
        self.player_side
    }

    pub fn outcome(&self) -> Option<CombatOutcome> {
        match self.phase {
            ScenePhase::Resolved(outcome) => Some(outcome),
            _ => None,
        }
    }

    pub fn into_ships(self) -> [Ship; 2] {
        self.field.into_ships()
    }

    fn view<'a>(&'a self, quests: &'a QuestManager) -> SceneView<'a> {
        SceneView {
            turn: self.turn,
            field: &self.field,
            controlled: self.controlled,
            quests,
        }
    }

    // ===== LIFECYCLE =====

    /// Deploy crews, scatter cargo and pick the controlled character
    pub fn setup(&mut self, quests: &mut QuestManager) {
        if self.phase != ScenePhase::Setup {
            return;
        }
        self.field.deploy(&self.config);
        self.field.scatter_cargo();

        self.controlled = self.field.first_living(Side::First);
        if self.controlled.is_none() {
            // No one left aboard the player's ship; play the other crew
            self.controlled = self.field.first_living(Side::Second);
            self.player_side = Side::Second;
        }
        self.deliver_quest_events(quests);

        self.phase = ScenePhase::Active;
        tracing::info!(
            first = %self.field.ship(Side::First).name,
            second = %self.field.ship(Side::Second).name,
            items = self.field.grid.item_count(),
            "combat started"
        );
        if let Some(outcome) = self.elimination() {
            self.resolve(outcome);
        }
    }

    /// Play turns until resolved, then run the quest pass
    pub fn run(&mut self, frontend: &mut dyn CombatFrontend, quests: &mut QuestManager) -> CombatOutcome {
        self.setup(quests);
        while self.phase == ScenePhase::Active {
            self.play_turn(frontend, quests);
        }
        let outcome = self.outcome().unwrap_or(CombatOutcome::Draw);
        frontend.announce(outcome, &self.view(quests));
        self.settle_quests(quests);
        outcome
    }

    /// One full turn
    pub fn play_turn(&mut self, frontend: &mut dyn CombatFrontend, quests: &mut QuestManager) -> ScenePhase {
        if self.phase != ScenePhase::Active {
            return self.phase;
        }
        self.turn += 1;
        let written_before = self.field.log.written();
        tracing::debug!(turn = self.turn, "turn start");

        frontend.render(&self.view(quests));

        // Player
        if let Some(id) = self.controlled {
            let intent = frontend.read_intent(&self.view(quests));
            self.handle_intent(id, intent, frontend, quests);
            self.field.sweep_dead();
            if let Some(outcome) = self.elimination() {
                self.resolve(outcome);
                return self.phase;
            }
        }

        // AI, first crew then second
        for id in self.field.living_in_order() {
            if Some(id) == self.controlled || !self.field.is_alive(id) {
                continue;
            }
            let decision = self.ai.take_turn(&mut self.field, id);
            tracing::trace!(character = ?id, ?decision, "ai turn");
            self.field.sweep_dead();
        }

        self.field.apply_states();
        self.reassign_control();

        let outcome = self.elimination().or_else(|| {
            (self.turn >= self.config.max_turns).then(|| {
                tracing::warn!(turn = self.turn, "turn limit reached");
                CombatOutcome::Draw
            })
        });
        if let Some(outcome) = outcome {
            self.resolve(outcome);
        }

        if self.field.log.written() > written_before && self.config.pause_ms > 0 {
            frontend.pause(Duration::from_millis(self.config.pause_ms));
        }
        self.phase
    }

    fn handle_intent(
        &mut self,
        id: CharacterId,
        intent: PlayerIntent,
        frontend: &mut dyn CombatFrontend,
        quests: &QuestManager,
    ) {
        match intent {
            PlayerIntent::Move(direction) => {
                let Some(command) = MoveCommand::toward(&self.field, id, direction) else {
                    return;
                };
                if self.controller.execute(Box::new(command), &mut self.field) {
                    self.field.pick_up(id, false);
                }
            }
            PlayerIntent::SwitchStrategy(index) => {
                let Some(character) = self.field.get_mut(id) else {
                    return;
                };
                let line = match character.switch_strategy(index) {
                    Some(strategy) => format!("{} switched to {}.", character.name, strategy.name()),
                    None => format!("No strategy in slot {}.", index + 1),
                };
                self.field.log.push(line);
            }
            PlayerIntent::PerformAction => self.perform_action(id),
            PlayerIntent::Defend => {
                self.controller
                    .execute(Box::new(DefendCommand::new(id)), &mut self.field);
            }
            PlayerIntent::OpenInventory => {
                if let Some((character, log)) = self.field.character_and_log(id) {
                    frontend.open_inventory(character, log);
                }
            }
            PlayerIntent::OpenEquipment => {
                if let Some((character, log)) = self.field.character_and_log(id) {
                    frontend.open_equipment(character, log);
                }
            }
            PlayerIntent::ViewQuests => frontend.view_quests(quests),
            PlayerIntent::Quit => {
                let name = self.field.ship(self.player_side).name.clone();
                self.field.log.push(format!("The {} sounds the retreat!", name));
                self.field.retreat(self.player_side);
                self.controlled = None;
            }
            PlayerIntent::Undo => {
                self.controller.undo_last(&mut self.field);
            }
            PlayerIntent::Redo => {
                self.controller.redo_last(&mut self.field);
            }
            PlayerIntent::Delegate => {
                self.ai.take_turn(&mut self.field, id);
            }
        }
    }

    /// Heal strategy heals oneself; anything else attacks the first enemy in range
    fn perform_action(&mut self, id: CharacterId) {
        let Some(strategy) = self.field.get(id).map(|c| c.strategy) else {
            return;
        };
        if strategy.is_heal() {
            self.controller
                .execute(Box::new(HealCommand::new(id)), &mut self.field);
            return;
        }
        match self.field.find_targets_in_range(id, strategy.range()).first() {
            Some(target) => {
                let command = AttackCommand::new(id, *target);
                self.controller.execute(Box::new(command), &mut self.field);
            }
            None => self.field.log.push("No targets in range!"),
        }
    }

    /// First living character of the player's crew, else of the other crew, else none
    fn reassign_control(&mut self) {
        let Some(current) = self.controlled else {
            return;
        };
        if self.field.is_alive(current) {
            return;
        }
        let next = self
            .field
            .first_living(self.player_side)
            .or_else(|| self.field.first_living(self.player_side.opposite()));
        if let Some(name) = next.and_then(|id| self.field.get(id)).map(|c| c.name.clone()) {
            self.field.log.push(format!("You now control {}.", name));
        }
        tracing::info!(from = ?current, to = ?next, "control reassigned");
        self.controlled = next;
    }

    fn elimination(&self) -> Option<CombatOutcome> {
        let first = self.field.living_count(Side::First) > 0;
        let second = self.field.living_count(Side::Second) > 0;
        match (first, second) {
            (true, true) => None,
            (true, false) => Some(CombatOutcome::Victory { winner: Side::First }),
            (false, true) => Some(CombatOutcome::Victory { winner: Side::Second }),
            (false, false) => Some(CombatOutcome::Draw),
        }
    }

    fn resolve(&mut self, outcome: CombatOutcome) {
        let line = match outcome {
            CombatOutcome::Victory { winner } => {
                format!("The {}'s crew is victorious!", self.field.ship(winner).name)
            }
            CombatOutcome::Draw => "The battle ends in a draw.".to_string(),
        };
        self.field.log.push(line);
        tracing::info!(?outcome, turns = self.turn, "combat resolved");
        self.phase = ScenePhase::Resolved(outcome);
    }

    // ===== QUESTS =====

    /// Check quest progress against the engagement's result and notify observers
    pub fn settle_quests(&mut self, quests: &mut QuestManager) {
        let opponent = self.field.ship(self.player_side.opposite()).name.clone();
        let mut world = WorldState::from_characters(self.field.crew_with_retreated(self.player_side));
        world.sight_ship(&opponent);
        if self.outcome().and_then(|o| o.winner()) == Some(self.player_side) {
            world.defeat_ship(&opponent);
        }
        let completed = quests.update_quests(&world);
        if completed > 0 {
            tracing::info!(completed, "quests completed after combat");
        }
        self.deliver_quest_events(quests);
    }

    fn deliver_quest_events(&mut self, quests: &mut QuestManager) {
        let mut log = std::mem::replace(&mut self.field.log, CombatLog::with_capacity(1));
        quests.dispatch(&mut self.field, &mut log);
        self.field.log = log;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::frontend::ScriptedFrontend;
    use crate::core::types::Direction;
    use crate::entity::{CharacterKind, ShipClass};
    use rand::SeedableRng;

    fn scene(first: usize, second: usize) -> CombatScene {
        let config = CombatConfig::seeded(3);
        let mut a = ShipClass::Galleon.create("Black Pearl");
        let mut b = ShipClass::ManOWar.create("Flying Dutchman");
        for i in 0..first {
            a.add_crew(CharacterKind::Pirate.create(format!("Pearl {}", i)));
        }
        for i in 0..second {
            b.add_crew(CharacterKind::Pirate.create(format!("Dutchman {}", i)));
        }
        CombatScene::new(&config, a, b, ChaCha8Rng::seed_from_u64(3))
    }

    #[test]
    fn test_setup_selects_first_living_player() {
        let mut s = scene(2, 2);
        let mut quests = QuestManager::new();
        s.setup(&mut quests);
        assert_eq!(s.phase(), ScenePhase::Active);
        assert_eq!(s.controlled(), s.field().first_living(Side::First));
    }

    #[test]
    fn test_empty_player_crew_takes_other_side() {
        let mut s = scene(0, 2);
        let mut quests = QuestManager::new();
        s.setup(&mut quests);
        assert_eq!(s.player_side(), Side::Second);
        assert_eq!(
            s.outcome(),
            Some(CombatOutcome::Victory {
                winner: Side::Second
            })
        );
    }

    #[test]
    fn test_quit_resolves_immediately() {
        let mut s = scene(2, 2);
        let mut quests = QuestManager::new();
        let mut frontend = ScriptedFrontend::new([PlayerIntent::Quit]);
        let outcome = s.run(&mut frontend, &mut quests);

        assert_eq!(outcome, CombatOutcome::Victory { winner: Side::Second });
        assert_eq!(s.turn(), 1);
        assert_eq!(frontend.outcome, Some(outcome));
        let [pearl, _] = s.into_ships();
        assert_eq!(pearl.crew.len(), 2);
    }

    #[test]
    fn test_menu_intents_delegate_to_frontend() {
        let mut s = scene(1, 1);
        let mut quests = QuestManager::new();
        s.setup(&mut quests);
        let mut frontend = ScriptedFrontend::new([
            PlayerIntent::OpenInventory,
            PlayerIntent::OpenEquipment,
            PlayerIntent::ViewQuests,
        ]);
        for _ in 0..3 {
            s.play_turn(&mut frontend, &mut quests);
        }
        assert_eq!(frontend.menus_opened.len(), 3);
        assert_eq!(frontend.frames_rendered, 3);
    }

    #[test]
    fn test_player_move_sets_acting_and_undo_restores() {
        let mut s = scene(1, 1);
        let mut quests = QuestManager::new();
        s.setup(&mut quests);
        let me = s.controlled().unwrap();
        let mut frontend = ScriptedFrontend::new([
            PlayerIntent::Move(Direction::Down),
            PlayerIntent::Undo,
        ])
        .with_fallback(PlayerIntent::ViewQuests);

        s.play_turn(&mut frontend, &mut quests);
        assert_eq!(s.field().get(me).unwrap().position.y, 1);
        s.play_turn(&mut frontend, &mut quests);
        assert_eq!(s.field().get(me).unwrap().position.y, 0);
    }

    #[test]
    fn test_autopilot_reaches_resolution() {
        let mut s = scene(3, 3);
        let mut quests = QuestManager::new();
        let mut frontend = ScriptedFrontend::autopilot();
        s.run(&mut frontend, &mut quests);
        assert!(matches!(s.phase(), ScenePhase::Resolved(_)));
        assert!(s.turn() <= CombatConfig::default().max_turns);
    }
}
