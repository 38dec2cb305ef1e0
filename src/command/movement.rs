use crate::combat::field::Battlefield;
use crate::combat::state::CharacterState;
use crate::command::{refuse, Command, Rejection};
use crate::core::types::{CharacterId, Direction, Position};

#[derive(Debug, Clone, Copy)]
struct MoveSnapshot {
    position: Position,
    state: CharacterState,
}

/// Step a character to a free, in-bounds cell; the mover becomes Acting
#[derive(Debug)]
pub struct MoveCommand {
    actor: CharacterId,
    destination: Position,
    before: Option<MoveSnapshot>,
}

impl MoveCommand {
    pub fn new(actor: CharacterId, destination: Position) -> Self {
        Self {
            actor,
            destination,
            before: None,
        }
    }

    /// One cell from the actor's current position
    pub fn toward(field: &Battlefield, actor: CharacterId, direction: Direction) -> Option<Self> {
        let from = field.get(actor)?.position;
        Some(Self::new(actor, from.step(direction)))
    }

    fn check(&self, field: &Battlefield) -> Result<MoveSnapshot, Rejection> {
        if self.before.is_some() {
            return Err(Rejection::AlreadyExecuted);
        }
        let actor = field.get(self.actor).ok_or(Rejection::MissingCharacter)?;
        if !field.grid.in_bounds(self.destination) {
            return Err(Rejection::OutOfBounds(self.destination));
        }
        if field.is_occupied(self.destination, Some(self.actor)) {
            return Err(Rejection::Occupied(self.destination));
        }
        Ok(MoveSnapshot {
            position: actor.position,
            state: actor.state,
        })
    }
}

impl Command for MoveCommand {
    fn execute(&mut self, field: &mut Battlefield) -> bool {
        let snapshot = match self.check(field) {
            Ok(snapshot) => snapshot,
            Err(rejection) => return refuse(field, rejection),
        };
        if !field.relocate(self.actor, self.destination) {
            return refuse(field, Rejection::OutOfBounds(self.destination));
        }
        if let Some(actor) = field.get_mut(self.actor) {
            actor.state = CharacterState::Acting;
        }
        self.before = Some(snapshot);
        true
    }

    fn undo(&mut self, field: &mut Battlefield) -> bool {
        let Some(snapshot) = self.before else {
            return true;
        };
        if field.is_occupied(snapshot.position, Some(self.actor)) {
            return refuse(field, Rejection::Occupied(snapshot.position));
        }
        field.relocate(self.actor, snapshot.position);
        if let Some(actor) = field.get_mut(self.actor) {
            actor.state = snapshot.state;
        }
        self.before = None;
        true
    }

    fn describe(&self) -> String {
        format!("Move to {}", self.destination)
    }
}
