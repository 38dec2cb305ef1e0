//! Battlefield - the shared state one engagement mutates
//!
//! Owns the grid, both ships (and through them every character), the
//! player-facing log and the engagement's random source. Commands, the AI
//! and the scene all act on it through `&mut Battlefield`.

use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;

use crate::combat::grid::CombatGrid;
use crate::combat::log::CombatLog;
use crate::combat::state::CharacterState;
use crate::combat::strategy::{ActionEffect, ActionStrategy};
use crate::core::config::CombatConfig;
use crate::core::types::{CharacterId, ItemId, Position, Side};
use crate::entity::{Character, EquipmentSlot, Ship};

#[derive(Debug, Clone)]
pub struct Battlefield {
    pub grid: CombatGrid,
    /// Indexed by `Side::index`
    pub ships: [Ship; 2],
    pub log: CombatLog,
    pub rng: ChaCha8Rng,
    /// Crews that left the fight, returned to their ships afterwards
    retreated: [Vec<Character>; 2],
}

impl Battlefield {
    pub fn new(config: &CombatConfig, first: Ship, second: Ship, rng: ChaCha8Rng) -> Self {
        Self {
            grid: CombatGrid::new(config.grid_width, config.grid_height),
            ships: [first, second],
            log: CombatLog::with_capacity(config.log_capacity),
            rng,
            retreated: [Vec::new(), Vec::new()],
        }
    }

    pub fn ship(&self, side: Side) -> &Ship {
        &self.ships[side.index()]
    }

    pub fn ship_mut(&mut self, side: Side) -> &mut Ship {
        &mut self.ships[side.index()]
    }

    /// Hand the ships back once the engagement is over
    pub fn into_ships(self) -> [Ship; 2] {
        let Self {
            mut ships,
            retreated,
            ..
        } = self;
        for (ship, crew) in ships.iter_mut().zip(retreated) {
            ship.crew.extend(crew);
        }
        ships
    }

    /// Pull a whole crew off the grid; it no longer counts as fighting
    pub fn retreat(&mut self, side: Side) {
        let crew = std::mem::take(&mut self.ship_mut(side).crew);
        for c in &crew {
            self.grid.remove(c.id, c.position);
        }
        self.retreated[side.index()].extend(crew);
    }

    /// A side's crew, fallen and retreated characters together
    pub fn crew_with_retreated(&self, side: Side) -> impl Iterator<Item = &Character> {
        self.ship(side)
            .everyone()
            .chain(self.retreated[side.index()].iter())
    }

    /// A character whose crew left the fight
    pub(crate) fn retreated_mut(&mut self, id: CharacterId) -> Option<&mut Character> {
        self.retreated
            .iter_mut()
            .flat_map(|crew| crew.iter_mut())
            .find(|c| c.id == id)
    }

    // ===== SETUP =====

    /// Place each crew on its column, rows `2i mod height`
    pub fn deploy(&mut self, config: &CombatConfig) {
        let columns = [config.first_crew_column(), config.second_crew_column()];
        let height = config.grid_height.max(1) as i32;
        for side in [Side::First, Side::Second] {
            let x = columns[side.index()];
            let placements: Vec<(CharacterId, Position)> = self.ships[side.index()]
                .crew
                .iter_mut()
                .enumerate()
                .map(|(i, c)| {
                    c.position = Position::new(x, (i as i32 * 2) % height);
                    c.inventory_capacity = config.inventory_capacity;
                    (c.id, c.position)
                })
                .collect();
            for (id, pos) in placements {
                self.grid.place(id, pos);
            }
        }
    }

    /// Move both ships' cargo onto random cells holding neither characters nor items
    pub fn scatter_cargo(&mut self) {
        for side in [Side::First, Side::Second] {
            let cargo = std::mem::take(&mut self.ship_mut(side).cargo);
            for item in cargo {
                let free: Vec<Position> = self
                    .grid
                    .positions()
                    .filter(|pos| {
                        self.grid
                            .cell(*pos)
                            .is_some_and(|c| c.characters.is_empty() && c.items.is_empty())
                    })
                    .collect();
                match free.choose(&mut self.rng) {
                    Some(pos) => {
                        tracing::debug!(item = %item.name, position = %pos, "item scattered");
                        self.grid.drop_item(item, *pos);
                    }
                    None => {
                        tracing::warn!(item = %item.name, "no free cell for item, kept in cargo");
                        self.ship_mut(side).cargo.push(item);
                    }
                }
            }
        }
    }

    // ===== LOOKUP =====

    pub fn get(&self, id: CharacterId) -> Option<&Character> {
        self.ships.iter().find_map(|s| s.get(id))
    }

    pub fn get_mut(&mut self, id: CharacterId) -> Option<&mut Character> {
        self.ships.iter_mut().find_map(|s| s.get_mut(id))
    }

    /// Two distinct characters borrowed mutably at once
    pub fn pair_mut(
        &mut self,
        a: CharacterId,
        b: CharacterId,
    ) -> Option<(&mut Character, &mut Character)> {
        if a == b {
            return None;
        }
        let mut first = None;
        let mut second = None;
        for c in self.ships.iter_mut().flat_map(|s| s.everyone_mut()) {
            if c.id == a {
                first = Some(c);
            } else if c.id == b {
                second = Some(c);
            }
        }
        Some((first?, second?))
    }

    pub fn side_of(&self, id: CharacterId) -> Option<Side> {
        [Side::First, Side::Second]
            .into_iter()
            .find(|side| self.ship(*side).contains(id))
    }

    pub fn is_alive(&self, id: CharacterId) -> bool {
        self.get(id).is_some_and(Character::is_alive)
    }

    pub fn first_living(&self, side: Side) -> Option<CharacterId> {
        self.ship(side).first_living().map(|c| c.id)
    }

    pub fn living_count(&self, side: Side) -> usize {
        self.ship(side).living().count()
    }

    /// Living characters in turn order: first crew, then second
    pub fn living_in_order(&self) -> Vec<CharacterId> {
        self.ships
            .iter()
            .flat_map(|s| s.living().map(|c| c.id))
            .collect()
    }

    // ===== SPACE =====

    /// A cell is occupied when a living character other than `except` stands on it
    pub fn is_occupied(&self, pos: Position, except: Option<CharacterId>) -> bool {
        self.grid.cell(pos).is_some_and(|cell| {
            cell.characters
                .iter()
                .any(|id| Some(*id) != except && self.is_alive(*id))
        })
    }

    /// Raw relocation; callers validate the destination
    pub fn relocate(&mut self, id: CharacterId, to: Position) -> bool {
        let Some(from) = self.get(id).map(|c| c.position) else {
            return false;
        };
        if !self.grid.move_character(id, from, to) {
            return false;
        }
        if let Some(c) = self.get_mut(id) {
            c.position = to;
        }
        true
    }

    /// Living enemies of `actor` within `range`, in crew order
    pub fn find_targets_in_range(&self, actor: CharacterId, range: u32) -> Vec<CharacterId> {
        let (Some(me), Some(side)) = (self.get(actor), self.side_of(actor)) else {
            return Vec::new();
        };
        self.ship(side.opposite())
            .living()
            .filter(|c| c.id != actor && me.position.distance(&c.position) <= range)
            .map(|c| c.id)
            .collect()
    }

    /// Nearest living enemy; ties go to the earlier crew member
    pub fn nearest_enemy(&self, actor: CharacterId) -> Option<CharacterId> {
        let me = self.get(actor)?;
        let side = self.side_of(actor)?;
        let mut best: Option<(u32, CharacterId)> = None;
        for enemy in self.ship(side.opposite()).living() {
            let d = me.position.distance(&enemy.position);
            if best.map_or(true, |(bd, _)| d < bd) {
                best = Some((d, enemy.id));
            }
        }
        best.map(|(_, id)| id)
    }

    /// Nearest item whose cell holds no living character besides `actor`
    pub fn nearest_unclaimed_item(&self, actor: CharacterId) -> Option<(Position, ItemId)> {
        let me = self.get(actor)?;
        let mut best: Option<(u32, Position, ItemId)> = None;
        for (pos, item) in self.grid.items() {
            if self.is_occupied(pos, Some(actor)) {
                continue;
            }
            let d = me.position.distance(&pos);
            if best.map_or(true, |(bd, _, _)| d < bd) {
                best = Some((d, pos, item.id));
            }
        }
        best.map(|(_, pos, id)| (pos, id))
    }

    // ===== ITEMS =====

    /// Move every item on the character's cell into its inventory
    ///
    /// Items that do not fit stay on the cell. With `equip_weapons`, picked-up
    /// weapons go straight into the weapon slot.
    pub fn pick_up(&mut self, id: CharacterId, equip_weapons: bool) -> usize {
        let Some(pos) = self.get(id).map(|c| c.position) else {
            return 0;
        };
        let items = self.grid.take_items(pos);
        let mut picked = 0;
        let mut left = Vec::new();
        let mut lines = Vec::new();
        if let Some(character) = self.get_mut(id) {
            for item in items {
                let (item_id, name, is_weapon) = (item.id, item.name.clone(), item.is_weapon());
                match character.add_item(item.clone()) {
                    Ok(()) => {
                        picked += 1;
                        lines.push(format!("{} picked up {}.", character.name, name));
                        if equip_weapons && is_weapon {
                            match character.equip_to(EquipmentSlot::Weapon, item_id) {
                                Ok(()) => lines.push(format!("{} equipped {}.", character.name, name)),
                                Err(e) => lines.push(e.to_string()),
                            }
                        }
                    }
                    Err(e) => {
                        lines.push(e.to_string());
                        left.push(item);
                    }
                }
            }
        } else {
            left = items;
        }
        for item in left {
            self.grid.drop_item(item, pos);
        }
        for line in lines {
            self.log.push(line);
        }
        picked
    }

    // ===== ACTIONS =====

    /// Check and perform `strategy` from `actor` on `target`, crediting a kill
    pub fn perform_strategy(
        &mut self,
        strategy: ActionStrategy,
        actor: CharacterId,
        target: CharacterId,
    ) -> Option<ActionEffect> {
        if actor == target {
            let me = self.get(actor)?;
            if !strategy.can_perform(me, me) {
                return None;
            }
            let Self { ships, log, rng, .. } = self;
            let me = ships.iter_mut().find_map(|s| s.get_mut(actor))?;
            return Some(strategy.perform_on_self(me, rng, log));
        }

        let Self { ships, log, rng, .. } = self;
        let mut attacker = None;
        let mut defender = None;
        for c in ships.iter_mut().flat_map(|s| s.everyone_mut()) {
            if c.id == actor {
                attacker = Some(c);
            } else if c.id == target {
                defender = Some(c);
            }
        }
        let (attacker, defender) = (attacker?, defender?);
        if !strategy.can_perform(attacker, defender) {
            return None;
        }
        let effect = strategy.perform(attacker, defender, rng, log);
        if !defender.is_alive() {
            attacker.record_kill(defender.kind);
            log.push(format!("{} has been defeated!", defender.name));
        }
        Some(effect)
    }

    /// A character and the log together, for menus that report back
    pub fn character_and_log(&mut self, id: CharacterId) -> Option<(&mut Character, &mut CombatLog)> {
        let Self { ships, log, .. } = self;
        let character = ships.iter_mut().find_map(|s| s.get_mut(id))?;
        Some((character, log))
    }

    /// Apply every living character's state effect, first crew first
    pub fn apply_states(&mut self) {
        let Self { ships, log, .. } = self;
        for character in ships
            .iter_mut()
            .flat_map(|s| s.crew.iter_mut())
            .filter(|c| c.is_alive())
        {
            let state: CharacterState = character.state;
            state.on_turn(character, log);
        }
    }

    /// Move the dead off the grid and out of their crews
    pub fn sweep_dead(&mut self) -> Vec<CharacterId> {
        let mut swept = Vec::new();
        for side in [Side::First, Side::Second] {
            for id in self.ship_mut(side).sweep_dead() {
                if let Some(pos) = self.get(id).map(|c| c.position) {
                    self.grid.remove(id, pos);
                }
                tracing::debug!(?side, character = ?id, "removed from crew");
                swept.push(id);
            }
        }
        swept
    }

    /// Every living character sits on exactly the cell its position names
    pub fn positions_consistent(&self) -> bool {
        self.ships.iter().flat_map(|s| s.living()).all(|c| {
            self.grid.in_bounds(c.position) && self.grid.locate(c.id) == Some(c.position)
        })
    }
}
