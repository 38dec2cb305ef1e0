//! Combat grid - a dense rectangle of cells
//!
//! Cells hold character ids and the items lying on them. Occupancy by a
//! *living* character is decided by the battlefield, which knows the vitals.

use serde::{Deserialize, Serialize};

use crate::core::types::{CharacterId, ItemId, Position};
use crate::items::Item;

/// One grid coordinate's contents
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Cell {
    pub characters: Vec<CharacterId>,
    pub items: Vec<Item>,
}

impl Cell {
    pub fn has_items(&self) -> bool {
        !self.items.is_empty()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombatGrid {
    pub width: u32,
    pub height: u32,
    /// Row-major
    cells: Vec<Cell>,
}

impl CombatGrid {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::default(); (width * height) as usize],
        }
    }

    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.y >= 0 && pos.x < self.width as i32 && pos.y < self.height as i32
    }

    fn index(&self, pos: Position) -> Option<usize> {
        self.in_bounds(pos)
            .then(|| pos.y as usize * self.width as usize + pos.x as usize)
    }

    pub fn cell(&self, pos: Position) -> Option<&Cell> {
        self.index(pos).map(|i| &self.cells[i])
    }

    pub fn cell_mut(&mut self, pos: Position) -> Option<&mut Cell> {
        self.index(pos).map(move |i| &mut self.cells[i])
    }

    /// Every in-bounds position, row by row
    pub fn positions(&self) -> impl Iterator<Item = Position> {
        let (w, h) = (self.width as i32, self.height as i32);
        (0..h).flat_map(move |y| (0..w).map(move |x| Position::new(x, y)))
    }

    /// Add a character id to a cell; false when out of bounds
    pub fn place(&mut self, id: CharacterId, pos: Position) -> bool {
        match self.cell_mut(pos) {
            Some(cell) => {
                if !cell.characters.contains(&id) {
                    cell.characters.push(id);
                }
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, id: CharacterId, pos: Position) {
        if let Some(cell) = self.cell_mut(pos) {
            cell.characters.retain(|c| *c != id);
        }
    }

    pub fn move_character(&mut self, id: CharacterId, from: Position, to: Position) -> bool {
        if !self.in_bounds(to) {
            return false;
        }
        self.remove(id, from);
        self.place(id, to)
    }

    /// Cell currently listing `id`, scanning the whole grid
    pub fn locate(&self, id: CharacterId) -> Option<Position> {
        self.positions()
            .find(|pos| self.cell(*pos).is_some_and(|c| c.characters.contains(&id)))
    }

    pub fn drop_item(&mut self, mut item: Item, pos: Position) -> bool {
        match self.cell_mut(pos) {
            Some(cell) => {
                item.position = Some(pos);
                cell.items.push(item);
                true
            }
            None => false,
        }
    }

    /// Lift every item off a cell
    pub fn take_items(&mut self, pos: Position) -> Vec<Item> {
        self.cell_mut(pos)
            .map(|cell| std::mem::take(&mut cell.items))
            .unwrap_or_default()
    }

    pub fn take_item(&mut self, pos: Position, id: ItemId) -> Option<Item> {
        let cell = self.cell_mut(pos)?;
        let index = cell.items.iter().position(|i| i.id == id)?;
        Some(cell.items.remove(index))
    }

    /// All items on the grid with their positions, row by row
    pub fn items(&self) -> impl Iterator<Item = (Position, &Item)> + '_ {
        self.positions().flat_map(move |pos| {
            self.cell(pos)
                .into_iter()
                .flat_map(move |cell| cell.items.iter().map(move |item| (pos, item)))
        })
    }

    pub fn item_count(&self) -> usize {
        self.cells.iter().map(|c| c.items.len()).sum()
    }
}
