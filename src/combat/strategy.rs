//! Action strategies - the combat action a character performs when prompted
//!
//! A closed set dispatched by `match`. Each strategy is a pure policy:
//! range, cost, precondition and damage formula. `perform` applies it.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::combat::constants::*;
use crate::combat::log::CombatLog;
use crate::entity::{Character, EquipmentSlot};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionStrategy {
    Melee,
    Ranged,
    Magic,
    Heal,
}

/// What a performed strategy did to its target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionEffect {
    /// Health removed from the target
    Damage(u32),
    /// Health restored to the target (after the max-health cap)
    Heal(u32),
}

impl ActionStrategy {
    pub const ALL: [ActionStrategy; 4] = [
        ActionStrategy::Melee,
        ActionStrategy::Ranged,
        ActionStrategy::Magic,
        ActionStrategy::Heal,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ActionStrategy::Melee => "Melee Attack",
            ActionStrategy::Ranged => "Ranged Attack",
            ActionStrategy::Magic => "Magic Attack",
            ActionStrategy::Heal => "Heal",
        }
    }

    /// Manhattan radius the strategy reaches
    pub fn range(&self) -> u32 {
        match self {
            ActionStrategy::Melee => MELEE_RANGE,
            ActionStrategy::Ranged => RANGED_RANGE,
            ActionStrategy::Magic => MAGIC_RANGE,
            ActionStrategy::Heal => HEAL_RANGE,
        }
    }

    pub fn is_heal(&self) -> bool {
        matches!(self, ActionStrategy::Heal)
    }

    /// Does `actor` have the resources, and are both parties in a state, for this action?
    pub fn can_perform(&self, actor: &Character, target: &Character) -> bool {
        match self {
            ActionStrategy::Melee => {
                actor.stamina >= MELEE_STAMINA_COST && actor.is_alive() && target.is_alive()
            }
            ActionStrategy::Ranged => {
                actor.ammunition > 0
                    && actor.stamina >= RANGED_STAMINA_COST
                    && actor.is_alive()
                    && target.is_alive()
            }
            ActionStrategy::Magic => {
                actor.magic_points >= MAGIC_MP_COST && actor.is_alive() && target.is_alive()
            }
            ActionStrategy::Heal => {
                actor.magic_points >= HEAL_MP_COST
                    && target.is_alive()
                    && target.health < target.max_health
            }
        }
    }

    /// Damage this strategy would deal right now.
    ///
    /// Heal deals no damage; its amount is rolled when performed.
    pub fn calculate_damage(&self, actor: &Character) -> u32 {
        match self {
            ActionStrategy::Melee => match actor.equipped_weapon_damage() {
                Some(damage) => damage + actor.strength / MELEE_STRENGTH_DIVISOR,
                None => (actor.strength / MELEE_STRENGTH_DIVISOR).max(1),
            },
            ActionStrategy::Ranged => match actor.equipped_weapon_damage() {
                Some(damage) => damage * 3 / 4 + actor.strength / RANGED_STRENGTH_DIVISOR,
                None => (actor.strength / RANGED_STRENGTH_DIVISOR).max(1),
            },
            ActionStrategy::Magic => {
                let relic_power = actor
                    .equipped(EquipmentSlot::Utility)
                    .and_then(|item| item.relic_power());
                match relic_power {
                    Some(power) => power + actor.magic_points / MAGIC_MP_DIVISOR,
                    None => (actor.magic_points / MAGIC_MP_DIVISOR).max(1),
                }
            }
            ActionStrategy::Heal => 0,
        }
    }

    /// Apply the strategy to another character: resolve, apply to target, pay, log.
    ///
    /// Callers check `can_perform` first.
    pub fn perform<R: Rng + ?Sized>(
        &self,
        actor: &mut Character,
        target: &mut Character,
        rng: &mut R,
        log: &mut CombatLog,
    ) -> ActionEffect {
        let effect = self.resolve(actor, rng);
        let applied = apply_effect(effect, target);
        self.pay(actor);
        log.push(self.describe(&actor.name, &target.name, applied));
        applied
    }

    /// Apply the strategy with the actor as its own target (self-heal)
    pub fn perform_on_self<R: Rng + ?Sized>(
        &self,
        actor: &mut Character,
        rng: &mut R,
        log: &mut CombatLog,
    ) -> ActionEffect {
        let effect = self.resolve(actor, rng);
        let applied = apply_effect(effect, actor);
        self.pay(actor);
        log.push(self.describe(&actor.name, &actor.name, applied));
        applied
    }

    fn resolve<R: Rng + ?Sized>(&self, actor: &Character, rng: &mut R) -> ActionEffect {
        match self {
            ActionStrategy::Heal => ActionEffect::Heal(rng.gen_range(HEAL_ROLL_MIN..HEAL_ROLL_MAX)),
            _ => ActionEffect::Damage(self.calculate_damage(actor)),
        }
    }

    fn pay(&self, actor: &mut Character) {
        match self {
            ActionStrategy::Melee => actor.use_stamina(MELEE_STAMINA_COST),
            ActionStrategy::Ranged => {
                actor.use_stamina(RANGED_STAMINA_COST);
                actor.use_ammunition(RANGED_AMMUNITION_COST);
            }
            ActionStrategy::Magic => actor.use_magic_points(MAGIC_MP_COST),
            ActionStrategy::Heal => actor.use_magic_points(HEAL_MP_COST),
        }
    }

    fn describe(&self, actor: &str, target: &str, effect: ActionEffect) -> String {
        match (self, effect) {
            (_, ActionEffect::Heal(amount)) => {
                format!("{} heals {} for {} health!", actor, target, amount)
            }
            (ActionStrategy::Ranged, ActionEffect::Damage(damage)) => {
                format!("{} shoots {} for {} damage!", actor, target, damage)
            }
            (ActionStrategy::Magic, ActionEffect::Damage(damage)) => {
                format!("{} casts a spell on {} for {} damage!", actor, target, damage)
            }
            (_, ActionEffect::Damage(damage)) => {
                format!("{} strikes {} for {} damage!", actor, target, damage)
            }
        }
    }
}

fn apply_effect(effect: ActionEffect, target: &mut Character) -> ActionEffect {
    match effect {
        ActionEffect::Damage(amount) => ActionEffect::Damage(target.take_damage(amount)),
        ActionEffect::Heal(amount) => ActionEffect::Heal(target.heal(amount)),
    }
}
