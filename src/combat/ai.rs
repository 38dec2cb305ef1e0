//! Opponent decision policy
//!
//! A fixed priority heuristic, no look-ahead:
//! 1. loot the nearest unclaimed item
//! 2. self-heal when below half health
//! 3. attack the nearest enemy with the strategy its distance allows
//! 4. otherwise close the distance

use crate::combat::constants::{HEAL_MP_COST, MAGIC_MP_COST, MAGIC_RANGE, MELEE_RANGE, RANGED_RANGE};
use crate::combat::field::Battlefield;
use crate::combat::strategy::ActionStrategy;
use crate::core::types::{CharacterId, Position};
use crate::entity::Character;

/// What an AI-controlled character did with its turn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AiDecision {
    /// Reached an item cell and picked up what lay there
    PickedUp(usize),
    /// Stepped toward an item without reaching it
    SteppedTowardItem,
    HealedSelf,
    Attacked(ActionStrategy),
    /// Stepped toward the nearest enemy
    Advanced,
    /// Nothing possible: no enemy left, or every move was blocked
    Held,
}

/// Trait for crew AI implementations
pub trait CrewAi {
    /// Decide and apply one turn for `actor`
    fn take_turn(&mut self, field: &mut Battlefield, actor: CharacterId) -> AiDecision;
}

/// The fixed heuristic
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicAi;

impl HeuristicAi {
    pub fn new() -> Self {
        Self
    }
}

impl CrewAi for HeuristicAi {
    fn take_turn(&mut self, field: &mut Battlefield, actor: CharacterId) -> AiDecision {
        if !field.is_alive(actor) {
            return AiDecision::Held;
        }

        if let Some((item_at, _)) = field.nearest_unclaimed_item(actor) {
            step_toward(field, actor, item_at);
            let here = field.get(actor).map(|c| c.position);
            if here == Some(item_at) {
                let picked = field.pick_up(actor, true);
                return AiDecision::PickedUp(picked);
            }
            return AiDecision::SteppedTowardItem;
        }

        let Some(enemy) = field.nearest_enemy(actor) else {
            return AiDecision::Held;
        };
        let (Some(me), Some(them)) = (field.get(actor), field.get(enemy)) else {
            return AiDecision::Held;
        };
        let distance = me.position.distance(&them.position);
        let enemy_at = them.position;
        let wants_heal = should_heal(me);
        let chosen = choose_strategy(me, distance);

        if wants_heal && field.perform_strategy(ActionStrategy::Heal, actor, actor).is_some() {
            return AiDecision::HealedSelf;
        }

        if let Some(strategy) = chosen {
            if let Some(c) = field.get_mut(actor) {
                c.strategy = strategy;
            }
            if field.perform_strategy(strategy, actor, enemy).is_some() {
                return AiDecision::Attacked(strategy);
            }
        }

        if step_toward(field, actor, enemy_at) {
            AiDecision::Advanced
        } else {
            AiDecision::Held
        }
    }
}

/// Below half health, Heal unlocked and affordable
pub fn should_heal(actor: &Character) -> bool {
    actor.health < actor.max_health / 2
        && actor.has_unlocked(ActionStrategy::Heal)
        && actor.magic_points >= HEAL_MP_COST
}

/// Attack strategy for an enemy `distance` away, by priority Melee, Ranged, Magic
pub fn choose_strategy(actor: &Character, distance: u32) -> Option<ActionStrategy> {
    if distance <= MELEE_RANGE && actor.has_unlocked(ActionStrategy::Melee) {
        Some(ActionStrategy::Melee)
    } else if distance <= RANGED_RANGE
        && actor.ammunition > 0
        && actor.has_unlocked(ActionStrategy::Ranged)
    {
        Some(ActionStrategy::Ranged)
    } else if distance <= MAGIC_RANGE
        && actor.magic_points >= MAGIC_MP_COST
        && actor.has_unlocked(ActionStrategy::Magic)
    {
        Some(ActionStrategy::Magic)
    } else {
        None
    }
}

/// One greedy step (x first, else y); refused off-grid or into a living character
pub fn step_toward(field: &mut Battlefield, actor: CharacterId, target: Position) -> bool {
    let Some(from) = field.get(actor).map(|c| c.position) else {
        return false;
    };
    let next = from.step_toward(&target);
    if next == from || !field.grid.in_bounds(next) || field.is_occupied(next, Some(actor)) {
        return false;
    }
    field.relocate(actor, next)
}
