use crate::combat::constants::ATTACK_STAMINA_COST;
use crate::combat::field::Battlefield;
use crate::combat::strategy::ActionStrategy;
use crate::command::{refuse, Command, Rejection};
use crate::core::types::CharacterId;

#[derive(Debug, Clone, Copy)]
struct AttackSnapshot {
    target_health: u32,
    attacker_stamina: u32,
}

/// Weapon attack using the attacker's current strategy for damage
///
/// A Heal strategy has no damage formula, so it falls back to Melee.
/// Undo restores health and stamina but leaves a kill credited and a
/// swept target out of its crew.
#[derive(Debug)]
pub struct AttackCommand {
    attacker: CharacterId,
    target: CharacterId,
    before: Option<AttackSnapshot>,
    killed: bool,
}

impl AttackCommand {
    pub fn new(attacker: CharacterId, target: CharacterId) -> Self {
        Self {
            attacker,
            target,
            before: None,
            killed: false,
        }
    }

    /// Did the last execute bring the target down?
    pub fn killed(&self) -> bool {
        self.killed
    }
}

impl Command for AttackCommand {
    fn execute(&mut self, field: &mut Battlefield) -> bool {
        if self.before.is_some() {
            return refuse(field, Rejection::AlreadyExecuted);
        }
        let Some((attacker, target)) = field.pair_mut(self.attacker, self.target) else {
            return refuse(field, Rejection::MissingCharacter);
        };
        let rejection = if !attacker.has_weapon() {
            Some(Rejection::NoWeapon(attacker.name.clone()))
        } else if attacker.stamina < ATTACK_STAMINA_COST {
            Some(Rejection::InsufficientStamina {
                name: attacker.name.clone(),
                have: attacker.stamina,
                need: ATTACK_STAMINA_COST,
            })
        } else if !target.is_alive() {
            Some(Rejection::TargetDown(target.name.clone()))
        } else {
            None
        };
        if let Some(rejection) = rejection {
            return refuse(field, rejection);
        }

        let snapshot = AttackSnapshot {
            target_health: target.health,
            attacker_stamina: attacker.stamina,
        };
        let strategy = match attacker.strategy {
            ActionStrategy::Heal => ActionStrategy::Melee,
            other => other,
        };
        let damage = target.take_damage(strategy.calculate_damage(attacker));
        attacker.use_stamina(ATTACK_STAMINA_COST);

        let mut lines = vec![format!(
            "{} attacks {} ({}) for {} damage!",
            attacker.name,
            target.name,
            strategy.name(),
            damage
        )];
        self.killed = !target.is_alive();
        if self.killed {
            attacker.record_kill(target.kind);
            lines.push(format!("{} has been defeated!", target.name));
        }
        self.before = Some(snapshot);
        for line in lines {
            field.log.push(line);
        }
        true
    }

    fn undo(&mut self, field: &mut Battlefield) -> bool {
        let Some(snapshot) = self.before.take() else {
            return true;
        };
        if let Some((attacker, target)) = field.pair_mut(self.attacker, self.target) {
            target.health = snapshot.target_health;
            attacker.stamina = snapshot.attacker_stamina;
        }
        true
    }

    fn describe(&self) -> String {
        "Attack".to_string()
    }
}
