use crate::combat::constants::{HEAL_COMMAND_DEFAULT_AMOUNT, HEAL_COMMAND_MP_COST};
use crate::combat::field::Battlefield;
use crate::command::{refuse, Command, Rejection};
use crate::core::types::CharacterId;

#[derive(Debug, Clone, Copy)]
struct HealSnapshot {
    healed: u32,
    healer_magic_points: u32,
}

/// Fixed-amount heal paid in magic points, capped at the patient's missing health
#[derive(Debug)]
pub struct HealCommand {
    healer: CharacterId,
    patient: CharacterId,
    amount: u32,
    before: Option<HealSnapshot>,
}

impl HealCommand {
    /// Heal oneself for the default amount
    pub fn new(healer: CharacterId) -> Self {
        Self::on(healer, healer, HEAL_COMMAND_DEFAULT_AMOUNT)
    }

    pub fn on(healer: CharacterId, patient: CharacterId, amount: u32) -> Self {
        Self {
            healer,
            patient,
            amount,
            before: None,
        }
    }

    fn check(&self, field: &Battlefield) -> Result<(), Rejection> {
        if self.before.is_some() {
            return Err(Rejection::AlreadyExecuted);
        }
        let healer = field.get(self.healer).ok_or(Rejection::MissingCharacter)?;
        let patient = field.get(self.patient).ok_or(Rejection::MissingCharacter)?;
        if healer.magic_points < HEAL_COMMAND_MP_COST {
            return Err(Rejection::InsufficientMagic {
                name: healer.name.clone(),
                have: healer.magic_points,
                need: HEAL_COMMAND_MP_COST,
            });
        }
        if !patient.is_alive() {
            return Err(Rejection::TargetDown(patient.name.clone()));
        }
        Ok(())
    }
}

impl Command for HealCommand {
    fn execute(&mut self, field: &mut Battlefield) -> bool {
        if let Err(rejection) = self.check(field) {
            return refuse(field, rejection);
        }

        let Some(healer) = field.get_mut(self.healer) else {
            return refuse(field, Rejection::MissingCharacter);
        };
        let healer_magic_points = healer.magic_points;
        healer.use_magic_points(HEAL_COMMAND_MP_COST);
        let healer_name = healer.name.clone();

        let Some(patient) = field.get_mut(self.patient) else {
            return refuse(field, Rejection::MissingCharacter);
        };
        let healed = patient.heal(self.amount);
        let line = if self.healer == self.patient {
            format!("{} heals for {} health.", healer_name, healed)
        } else {
            format!("{} heals {} for {} health.", healer_name, patient.name, healed)
        };

        self.before = Some(HealSnapshot {
            healed,
            healer_magic_points,
        });
        field.log.push(line);
        true
    }

    fn undo(&mut self, field: &mut Battlefield) -> bool {
        let Some(snapshot) = self.before.take() else {
            return true;
        };
        if let Some(patient) = field.get_mut(self.patient) {
            patient.health = patient.health.saturating_sub(snapshot.healed);
        }
        if let Some(healer) = field.get_mut(self.healer) {
            healer.magic_points = snapshot.healer_magic_points;
        }
        true
    }

    fn describe(&self) -> String {
        format!("Heal ({})", self.amount)
    }
}
