//! Broadside - Entry Point
//!
//! Sets up the demo world and plays one engagement from the console.
//! An optional first argument names a TOML combat config.

use std::io::{self, BufRead, Write};
use std::time::Duration;

use broadside::combat::{CombatFrontend, CombatLog, CombatOutcome, PlayerIntent, SceneView};
use broadside::core::error::Result;
use broadside::core::types::{Direction, Side};
use broadside::core::CombatConfig;
use broadside::entity::{Character, EquipmentSlot};
use broadside::quests::{QuestManager, QuestState};
use broadside::world::demo_world;

fn main() -> Result<()> {
    // Initialize tracing for logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("broadside=debug")),
        )
        .with_writer(io::stderr)
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => CombatConfig::load(path)?,
        None => CombatConfig::default(),
    };
    config.validate()?;

    tracing::info!("Broadside starting...");
    let mut world = demo_world(config);

    println!("\n=== BROADSIDE ===");
    println!("The {} closes on the {}.", world.player.name, world.opponent.name);
    println!();
    print_help();

    let mut frontend = ConsoleFrontend::new();
    let outcome = world
        .context
        .start_combat(&mut world.player, &mut world.opponent, &mut frontend);

    println!();
    for line in world.context.log.lines() {
        println!("{}", line);
    }
    if outcome.winner() == Some(Side::First) {
        println!(
            "Plunder so far: {} gold, {} reputation",
            world.context.quests.rewards_earned(broadside::quests::RewardKind::Gold),
            world.context.quests.rewards_earned(broadside::quests::RewardKind::Reputation)
        );
    }
    Ok(())
}

fn print_help() {
    println!("Commands:");
    println!("  h/j/k/l      - Move left/down/up/right");
    println!("  1-9          - Switch to unlocked strategy");
    println!("  space / a    - Perform the current strategy");
    println!("  d            - Defend");
    println!("  i / e / o    - Inventory, equipment, quests");
    println!("  u / r        - Undo / redo");
    println!("  q            - Sound the retreat");
    println!("  (empty)      - Let the crew act on its own");
    println!();
}

struct ConsoleFrontend {
    stdin: io::Stdin,
}

impl ConsoleFrontend {
    fn new() -> Self {
        Self { stdin: io::stdin() }
    }

    fn prompt(&mut self, text: &str) -> Option<String> {
        print!("{}", text);
        io::stdout().flush().ok()?;
        let mut input = String::new();
        match self.stdin.lock().read_line(&mut input) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(input.trim_end_matches(['\r', '\n']).to_string()),
        }
    }

    fn prompt_index(&mut self, text: &str, len: usize) -> Option<usize> {
        let choice = self.prompt(text)?;
        let index = choice.trim().parse::<usize>().ok()?;
        (1..=len).contains(&index).then(|| index - 1)
    }
}

fn parse_intent(input: &str) -> Option<PlayerIntent> {
    let intent = match input {
        "" => PlayerIntent::Delegate,
        " " | "a" => PlayerIntent::PerformAction,
        "h" => PlayerIntent::Move(Direction::Left),
        "j" => PlayerIntent::Move(Direction::Down),
        "k" => PlayerIntent::Move(Direction::Up),
        "l" => PlayerIntent::Move(Direction::Right),
        "d" => PlayerIntent::Defend,
        "i" => PlayerIntent::OpenInventory,
        "e" => PlayerIntent::OpenEquipment,
        "o" => PlayerIntent::ViewQuests,
        "u" => PlayerIntent::Undo,
        "r" => PlayerIntent::Redo,
        "q" => PlayerIntent::Quit,
        other => {
            let digit = other.trim().parse::<usize>().ok()?;
            if !(1..=9).contains(&digit) {
                return None;
            }
            PlayerIntent::SwitchStrategy(digit - 1)
        }
    };
    Some(intent)
}

impl CombatFrontend for ConsoleFrontend {
    fn render(&mut self, view: &SceneView<'_>) {
        println!();
        println!("--- Turn {} ---", view.turn);
        for row in view.grid_rows() {
            println!("  {}", row);
        }
        for side in [Side::First, Side::Second] {
            let ship = view.field.ship(side);
            println!("{} ({} standing)", ship.name, ship.living().count());
            for character in ship.living() {
                let marker = if Some(character.id) == view.controlled { '>' } else { ' ' };
                println!(" {} {} at {}", marker, character.status_line(), character.position);
            }
        }
        if let Some(me) = view.controlled_character() {
            let strategies: Vec<String> = me
                .unlocked
                .iter()
                .enumerate()
                .map(|(i, s)| format!("{}:{}", i + 1, s.name()))
                .collect();
            println!("Strategies: {}", strategies.join("  "));
        }
        println!();
        for line in view.field.log.lines() {
            println!("  {}", line);
        }
    }

    fn read_intent(&mut self, _view: &SceneView<'_>) -> PlayerIntent {
        loop {
            let Some(input) = self.prompt("> ") else {
                return PlayerIntent::Quit;
            };
            match parse_intent(&input) {
                Some(intent) => return intent,
                None => println!("Unknown command '{}'.", input.trim()),
            }
        }
    }

    fn open_inventory(&mut self, character: &mut Character, log: &mut CombatLog) {
        println!("{}'s inventory ({}/{}):", character.name, character.inventory.len(), character.inventory_capacity);
        if character.inventory.is_empty() {
            println!("  (empty)");
            return;
        }
        for (i, item) in character.inventory.iter().enumerate() {
            println!("  {}. {}", i + 1, item.describe());
        }
        println!(
            "  ({} weapons, {} relics)",
            character.weapons().count(),
            character.relics().count()
        );
        let len = character.inventory.len();
        let Some(index) = self.prompt_index("Equip which item? (enter to close) ", len) else {
            return;
        };
        let id = character.inventory[index].id;
        match character.equip(id) {
            Ok(slot) => log.push(format!("{} equipped an item to the {:?} slot.", character.name, slot)),
            Err(e) => log.push(e.to_string()),
        }
    }

    fn open_equipment(&mut self, character: &mut Character, log: &mut CombatLog) {
        println!("{}'s equipment:", character.name);
        for (i, slot) in EquipmentSlot::ALL.iter().enumerate() {
            let held = character
                .equipped(*slot)
                .map_or_else(|| "-".to_string(), |item| item.describe());
            println!("  {}. {:?}: {}", i + 1, slot, held);
        }
        let Some(index) = self.prompt_index("Unequip which slot? (enter to close) ", EquipmentSlot::ALL.len()) else {
            return;
        };
        match character.unequip(EquipmentSlot::ALL[index]) {
            Ok(item) => log.push(format!("{} unequipped {}.", character.name, item.name)),
            Err(e) => log.push(e.to_string()),
        }
    }

    fn view_quests(&mut self, quests: &QuestManager) {
        println!("Quests:");
        if quests.quests().is_empty() {
            println!("  (none)");
        }
        for quest in quests.quests() {
            println!("  {} [{:?}] - {}", quest.name, quest.state, quest.description);
            for objective in &quest.objectives {
                let mark = if objective.is_completed() { 'x' } else { ' ' };
                println!("    [{}] {}", mark, objective.description);
            }
            if quest.state == QuestState::InProgress {
                for (kind, amount) in quest.sorted_rewards() {
                    println!("    reward: {} {:?}", amount, kind);
                }
            }
        }
    }

    fn pause(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }

    fn announce(&mut self, outcome: CombatOutcome, view: &SceneView<'_>) {
        println!();
        match outcome.winner() {
            Some(side) => println!("*** {} wins ***", view.field.ship(side).name),
            None => println!("*** Draw ***"),
        }
        if let Some(line) = view.field.log.last() {
            println!("{}", line);
        }
    }
}
