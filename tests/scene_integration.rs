//! Combat scene integration tests
//!
//! Full engagements driven through `CombatScene` with scripted player input.

use broadside::combat::{
    ActionStrategy, CombatOutcome, CombatScene, PlayerIntent, ScenePhase, ScriptedFrontend,
};
use broadside::command::{Command, MoveCommand};
use broadside::core::types::{CharacterId, Side};
use broadside::core::CombatConfig;
use broadside::entity::{Character, CharacterKind, Ship, ShipClass};
use broadside::items::{Item, Rarity, WeaponKind};
use broadside::quests::QuestManager;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Two adjacent columns on a 3x3 grid
fn duel_config() -> CombatConfig {
    CombatConfig {
        grid_width: 3,
        grid_height: 3,
        crew_spacing: 1,
        log_capacity: 20,
        ..CombatConfig::seeded(7)
    }
}

fn armed(mut character: Character, damage: u32) -> Character {
    let blade = Item::weapon("Cutlass", Rarity::Common, damage, WeaponKind::Melee);
    let id = blade.id;
    character.add_item(blade).unwrap();
    character.equip(id).unwrap();
    character
}

/// Melee-armed attacker (strength 10) against an unarmed 15 hp defender that cannot heal
fn duel_scene() -> (CombatScene, CharacterId, CharacterId) {
    let config = duel_config();
    let attacker = armed(CharacterKind::Civilian.create("Will Turner"), 10);
    let mut defender = Character::new("Deckhand", CharacterKind::Civilian, 15, 8);
    defender.magic_points = 0;
    let (a, d) = (attacker.id, defender.id);

    let mut first = ShipClass::Frigate.create("Interceptor");
    first.add_crew(attacker);
    let mut second = ShipClass::Galleon.create("Black Pearl");
    second.add_crew(defender);

    let scene = CombatScene::new(&config, first, second, ChaCha8Rng::seed_from_u64(7));
    (scene, a, d)
}

fn crew(name: &str, class: ShipClass, size: usize) -> Ship {
    let mut ship = class.create(name);
    for i in 0..size {
        ship.add_crew(CharacterKind::Pirate.create(format!("{} {}", name, i)));
    }
    ship
}

#[test]
fn test_melee_duel_two_hits_wins() {
    let (mut scene, attacker, defender) = duel_scene();
    let mut quests = QuestManager::new();
    let mut frontend = ScriptedFrontend::new([PlayerIntent::PerformAction, PlayerIntent::PerformAction]);

    scene.setup(&mut quests);
    assert_eq!(scene.controlled(), Some(attacker));

    // 10 weapon damage + 10 / 4 strength
    scene.play_turn(&mut frontend, &mut quests);
    assert_eq!(scene.field().get(defender).unwrap().health, 3);
    assert_eq!(scene.phase(), ScenePhase::Active);

    scene.play_turn(&mut frontend, &mut quests);
    assert_eq!(
        scene.phase(),
        ScenePhase::Resolved(CombatOutcome::Victory { winner: Side::First })
    );
    assert_eq!(scene.turn(), 2);
    assert!(scene.field().log.contains("Deckhand has been defeated!"));
    assert!(scene.field().log.contains("Interceptor's crew is victorious!"));

    let [first, second] = scene.into_ships();
    assert_eq!(first.crew[0].kills, 1);
    assert!(second.crew.is_empty());
    assert_eq!(second.fallen.len(), 1);
}

#[test]
fn test_defender_strikes_back_between_turns() {
    let (mut scene, attacker, _) = duel_scene();
    let mut quests = QuestManager::new();
    let mut frontend = ScriptedFrontend::new([PlayerIntent::PerformAction]);
    scene.setup(&mut quests);
    scene.play_turn(&mut frontend, &mut quests);

    // Unarmed melee: max(1, 8 / 4)
    let me = scene.field().get(attacker).unwrap();
    assert_eq!(me.health, 78);
}

#[test]
fn test_run_announces_outcome() {
    let (mut scene, _, _) = duel_scene();
    let mut quests = QuestManager::new();
    let mut frontend = ScriptedFrontend::new([PlayerIntent::PerformAction, PlayerIntent::PerformAction]);
    let outcome = scene.run(&mut frontend, &mut quests);
    assert_eq!(outcome.winner(), Some(Side::First));
    assert_eq!(outcome.eliminated(), Some(Side::Second));
    assert_eq!(frontend.outcome, Some(outcome));
}

#[test]
fn test_ranged_without_ammunition_changes_nothing() {
    let (mut scene, attacker, defender) = duel_scene();
    let mut quests = QuestManager::new();
    scene.setup(&mut quests);
    let field = scene.field_mut();
    {
        let me = field.get_mut(attacker).unwrap();
        me.unlock(ActionStrategy::Ranged);
        me.ammunition = 0;
    }
    let before = (
        field.get(attacker).unwrap().stamina,
        field.get(defender).unwrap().health,
    );
    assert!(!ActionStrategy::Ranged.can_perform(field.get(attacker).unwrap(), field.get(defender).unwrap()));
    assert!(field.perform_strategy(ActionStrategy::Ranged, attacker, defender).is_none());
    assert_eq!(
        before,
        (
            field.get(attacker).unwrap().stamina,
            field.get(defender).unwrap().health
        )
    );
}

#[test]
fn test_heal_on_full_health_refused() {
    let c = CharacterKind::Pirate.create("Ragetti");
    assert!(!ActionStrategy::Heal.can_perform(&c, &c));
}

#[test]
fn test_move_into_living_character_refused() {
    let (mut scene, attacker, defender) = duel_scene();
    let mut quests = QuestManager::new();
    scene.setup(&mut quests);
    let field = scene.field_mut();
    let start = field.get(attacker).unwrap().position;
    let blocked = field.get(defender).unwrap().position;

    let mut cmd = MoveCommand::new(attacker, blocked);
    assert!(!cmd.execute(field));
    assert_eq!(field.get(attacker).unwrap().position, start);
    assert!(field.positions_consistent());
}

#[test]
fn test_setup_columns_and_rows() {
    let config = CombatConfig {
        grid_height: 4,
        ..CombatConfig::seeded(2)
    };
    let mut scene = CombatScene::new(
        &config,
        crew("Pearl", ShipClass::Galleon, 3),
        crew("Dutchman", ShipClass::ManOWar, 3),
        ChaCha8Rng::seed_from_u64(2),
    );
    scene.setup(&mut QuestManager::new());

    let rows: Vec<i32> = scene.field().ship(Side::First).crew.iter().map(|c| c.position.y).collect();
    assert_eq!(rows, vec![0, 2, 0]);
    assert!(scene
        .field()
        .ship(Side::First)
        .crew
        .iter()
        .all(|c| c.position.x == 1));
    assert!(scene
        .field()
        .ship(Side::Second)
        .crew
        .iter()
        .all(|c| c.position.x == config.second_crew_column()));
}

#[test]
fn test_dead_controlled_character_hands_over() {
    let config = CombatConfig {
        log_capacity: 20,
        ..CombatConfig::seeded(4)
    };
    let mut scene = CombatScene::new(
        &config,
        crew("Pearl", ShipClass::Galleon, 2),
        crew("Dutchman", ShipClass::ManOWar, 2),
        ChaCha8Rng::seed_from_u64(4),
    );
    let mut quests = QuestManager::new();
    scene.setup(&mut quests);
    let first = scene.controlled().unwrap();
    scene.field_mut().get_mut(first).unwrap().health = 0;

    let mut frontend = ScriptedFrontend::new([PlayerIntent::ViewQuests]);
    scene.play_turn(&mut frontend, &mut quests);

    let next = scene.field().first_living(Side::First);
    assert!(next.is_some());
    assert_eq!(scene.controlled(), next);
    assert!(scene.field().log.contains("You now control Pearl 1."));
    assert_eq!(scene.player_side(), Side::First);
}

#[test]
fn test_turn_limit_is_a_draw() {
    let config = CombatConfig {
        max_turns: 2,
        ..CombatConfig::seeded(8)
    };
    let mut scene = CombatScene::new(
        &config,
        crew("Pearl", ShipClass::Galleon, 1),
        crew("Dutchman", ShipClass::ManOWar, 1),
        ChaCha8Rng::seed_from_u64(8),
    );
    let mut frontend = ScriptedFrontend::new([PlayerIntent::Defend, PlayerIntent::Defend]);
    let outcome = scene.run(&mut frontend, &mut QuestManager::new());

    assert_eq!(outcome, CombatOutcome::Draw);
    assert_eq!(scene.turn(), 2);
    assert!(scene.field().log.contains("The battle ends in a draw."));
}

#[test]
fn test_quit_empties_player_crew() {
    let mut scene = CombatScene::new(
        &CombatConfig::seeded(6),
        crew("Pearl", ShipClass::Galleon, 2),
        crew("Dutchman", ShipClass::ManOWar, 2),
        ChaCha8Rng::seed_from_u64(6),
    );
    let mut frontend = ScriptedFrontend::new([PlayerIntent::Quit]);
    let outcome = scene.run(&mut frontend, &mut QuestManager::new());

    assert_eq!(outcome.winner(), Some(Side::Second));
    assert_eq!(scene.field().living_count(Side::First), 0);
    assert_eq!(scene.controlled(), None);
}

#[test]
fn test_strategy_switch_forces_acting() {
    let (mut scene, attacker, _) = duel_scene();
    let mut quests = QuestManager::new();
    scene.setup(&mut quests);
    let mut frontend = ScriptedFrontend::new([PlayerIntent::SwitchStrategy(1)]);
    scene.play_turn(&mut frontend, &mut quests);

    let me = scene.field().get(attacker).unwrap();
    assert_eq!(me.strategy, ActionStrategy::Heal);
    assert!(scene.field().log.contains("Will Turner switched to Heal."));
}

#[test]
fn test_autopilot_engagements_terminate() {
    for seed in [1, 2, 3] {
        let mut scene = CombatScene::new(
            &CombatConfig::seeded(seed),
            crew("Pearl", ShipClass::Galleon, 3),
            crew("Dutchman", ShipClass::ManOWar, 4),
            ChaCha8Rng::seed_from_u64(seed),
        );
        let mut frontend = ScriptedFrontend::autopilot();
        scene.run(&mut frontend, &mut QuestManager::new());
        assert!(scene.outcome().is_some());
        assert!(scene.field().positions_consistent());
    }
}
