//! Presentation and input seam
//!
//! The scene never draws or reads input itself. It hands a `SceneView` to a
//! `CombatFrontend` and gets a `PlayerIntent` back.

use std::collections::VecDeque;
use std::time::Duration;

use crate::combat::field::Battlefield;
use crate::combat::log::CombatLog;
use crate::combat::scene::CombatOutcome;
use crate::core::types::{CharacterId, Direction, Position, Side, Turn};
use crate::entity::Character;
use crate::quests::QuestManager;

/// One player decision for the controlled character
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerIntent {
    Move(Direction),
    /// 0-based index into the character's unlocked strategies
    SwitchStrategy(usize),
    PerformAction,
    Defend,
    OpenInventory,
    OpenEquipment,
    ViewQuests,
    Quit,
    Undo,
    Redo,
    /// Let the AI policy play the controlled character this turn
    Delegate,
}

/// Read-only data a frontend draws from
pub struct SceneView<'a> {
    pub turn: Turn,
    pub field: &'a Battlefield,
    pub controlled: Option<CharacterId>,
    pub quests: &'a QuestManager,
}

impl<'a> SceneView<'a> {
    pub fn controlled_character(&self) -> Option<&'a Character> {
        self.controlled.and_then(|id| self.field.get(id))
    }

    /// Text rows of the grid: `@` controlled, `1`/`2` crews, item symbols, `.` empty
    pub fn grid_rows(&self) -> Vec<String> {
        let grid = &self.field.grid;
        (0..grid.height as i32)
            .map(|y| {
                (0..grid.width as i32)
                    .map(|x| self.symbol_at(Position::new(x, y)))
                    .collect()
            })
            .collect()
    }

    fn symbol_at(&self, pos: Position) -> char {
        let Some(cell) = self.field.grid.cell(pos) else {
            return ' ';
        };
        let living = cell.characters.iter().find(|id| self.field.is_alive(**id));
        match living {
            Some(id) if Some(*id) == self.controlled => '@',
            Some(id) => match self.field.side_of(*id) {
                Some(Side::First) => '1',
                _ => '2',
            },
            None => cell.items.first().map_or('.', |item| item.symbol()),
        }
    }
}

pub trait CombatFrontend {
    /// Draw the current frame
    fn render(&mut self, view: &SceneView<'_>);

    /// Read one intent for the controlled character
    fn read_intent(&mut self, view: &SceneView<'_>) -> PlayerIntent;

    /// Inventory menu for the controlled character
    fn open_inventory(&mut self, _character: &mut Character, _log: &mut CombatLog) {}

    /// Equipment menu for the controlled character
    fn open_equipment(&mut self, _character: &mut Character, _log: &mut CombatLog) {}

    fn view_quests(&mut self, _quests: &QuestManager) {}

    /// Presentation delay; headless frontends skip it
    fn pause(&mut self, _duration: Duration) {}

    /// Final result of the engagement
    fn announce(&mut self, _outcome: CombatOutcome, _view: &SceneView<'_>) {}
}

/// Replays a fixed list of intents, then falls back to one repeated intent
#[derive(Debug, Clone)]
pub struct ScriptedFrontend {
    intents: VecDeque<PlayerIntent>,
    fallback: PlayerIntent,
    pub frames_rendered: usize,
    pub menus_opened: Vec<PlayerIntent>,
    pub outcome: Option<CombatOutcome>,
}

impl ScriptedFrontend {
    pub fn new(intents: impl IntoIterator<Item = PlayerIntent>) -> Self {
        Self {
            intents: intents.into_iter().collect(),
            fallback: PlayerIntent::Delegate,
            frames_rendered: 0,
            menus_opened: Vec::new(),
            outcome: None,
        }
    }

    /// AI plays both crews
    pub fn autopilot() -> Self {
        Self::new([])
    }

    pub fn with_fallback(mut self, fallback: PlayerIntent) -> Self {
        self.fallback = fallback;
        self
    }
}

impl CombatFrontend for ScriptedFrontend {
    fn render(&mut self, _view: &SceneView<'_>) {
        self.frames_rendered += 1;
    }

    fn read_intent(&mut self, _view: &SceneView<'_>) -> PlayerIntent {
        self.intents.pop_front().unwrap_or(self.fallback)
    }

    fn open_inventory(&mut self, _character: &mut Character, _log: &mut CombatLog) {
        self.menus_opened.push(PlayerIntent::OpenInventory);
    }

    fn open_equipment(&mut self, _character: &mut Character, _log: &mut CombatLog) {
        self.menus_opened.push(PlayerIntent::OpenEquipment);
    }

    fn view_quests(&mut self, _quests: &QuestManager) {
        self.menus_opened.push(PlayerIntent::ViewQuests);
    }

    fn announce(&mut self, outcome: CombatOutcome, _view: &SceneView<'_>) {
        self.outcome = Some(outcome);
    }
}
