//! Quest integration tests
//!
//! Kills made in combat feed quest progress, which is settled and reported
//! to observing characters once the engagement resolves.

use broadside::combat::{CombatScene, PlayerIntent, ScriptedFrontend};
use broadside::core::types::Side;
use broadside::core::CombatConfig;
use broadside::entity::{Character, CharacterKind, Ship, ShipClass};
use broadside::items::{Item, Rarity, WeaponKind};
use broadside::quests::{catalog, QuestManager, QuestState, RewardKind};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn config() -> CombatConfig {
    CombatConfig {
        grid_width: 3,
        grid_height: 3,
        crew_spacing: 1,
        log_capacity: 30,
        ..CombatConfig::seeded(13)
    }
}

fn captain() -> Character {
    let mut jack = CharacterKind::Pirate.create("Captain Jack Sparrow");
    let blade = Item::weapon("Cutlass", Rarity::Common, 10, WeaponKind::Melee);
    let id = blade.id;
    jack.add_item(blade).unwrap();
    jack.equip(id).unwrap();
    jack
}

fn frail(name: &str, kind: CharacterKind) -> Character {
    let mut c = Character::new(name, kind, 15, 8);
    c.magic_points = 0;
    c
}

fn ships(victim: Character) -> (Ship, Ship) {
    let mut pearl = ShipClass::Galleon.create("Black Pearl");
    pearl.add_crew(captain());
    let mut dutchman = ShipClass::ManOWar.create("Flying Dutchman");
    dutchman.add_crew(victim);
    (pearl, dutchman)
}

#[test]
fn test_victory_completes_hunt_and_ship_battle() {
    let (mut pearl, dutchman) = ships(frail("Koehler", CharacterKind::Pirate));
    let jack = pearl.crew[0].id;

    let mut quests = QuestManager::new();
    let hunt = quests.add_quest(catalog::pirate_hunt(1));
    let battle = quests.add_quest(catalog::ship_battle("Flying Dutchman"));
    quests.register_observer_for_quest(jack, hunt);
    quests.register_observer_for_quest(jack, battle);
    let mut log = broadside::combat::CombatLog::with_capacity(10);
    assert_eq!(quests.dispatch(&mut pearl, &mut log), 2);
    assert_eq!(pearl.crew[0].quests.len(), 2);

    let config = config();
    let mut scene = CombatScene::new(&config, pearl, dutchman, ChaCha8Rng::seed_from_u64(13));
    let mut frontend = ScriptedFrontend::new([PlayerIntent::PerformAction]);
    let outcome = scene.run(&mut frontend, &mut quests);

    assert_eq!(outcome.winner(), Some(Side::First));
    assert_eq!(quests.quest(hunt).unwrap().state, QuestState::Completed);
    assert_eq!(quests.quest(battle).unwrap().state, QuestState::Completed);
    assert_eq!(quests.rewards_earned(RewardKind::Gold), 1500);
    assert_eq!(quests.rewards_earned(RewardKind::Reputation), 70);
    assert_eq!(quests.pending_len(), 0);

    let log = &scene.field().log;
    assert!(log.contains("Captain Jack Sparrow: Objective completed - Defeat 1 pirates"));
    assert!(log.contains("Captain Jack Sparrow: Quest progress updated: Pirate Hunt"));
    assert!(log.contains("Captain Jack Sparrow: Quest completed - Pirate Hunt"));
    assert!(log.contains("Captain Jack Sparrow: Quest completed - Defeat the Flying Dutchman"));

    let jack = scene.field().get(jack).unwrap();
    assert_eq!(jack.progress("Defeat 1 pirates"), 1);
    assert!(jack.tracked_objectives.is_empty());
}

#[test]
fn test_other_kinds_do_not_count_toward_hunt() {
    let (mut pearl, dutchman) = ships(frail("Groves", CharacterKind::EnglishSoldier));
    let jack = pearl.crew[0].id;

    let mut quests = QuestManager::new();
    let hunt = quests.add_quest(catalog::pirate_hunt(1));
    quests.register_observer_for_quest(jack, hunt);
    quests.dispatch(&mut pearl, &mut broadside::combat::CombatLog::new());

    let config = config();
    let mut scene = CombatScene::new(&config, pearl, dutchman, ChaCha8Rng::seed_from_u64(13));
    let mut frontend = ScriptedFrontend::new([PlayerIntent::PerformAction]);
    scene.run(&mut frontend, &mut quests);

    assert_eq!(quests.quest(hunt).unwrap().state, QuestState::InProgress);
    assert_eq!(quests.rewards_earned(RewardKind::Gold), 0);
    let jack = scene.field().get(jack).unwrap();
    assert_eq!(jack.kills, 1);
    assert_eq!(jack.progress("Defeat 1 pirates"), 0);
}

#[test]
fn test_sighting_without_victory_completes_only_locate() {
    let mut pearl = ShipClass::Galleon.create("Black Pearl");
    pearl.add_crew(captain());
    let mut dutchman = ShipClass::ManOWar.create("Flying Dutchman");
    dutchman.add_crew(CharacterKind::Pirate.create("Maccus"));
    let jack = pearl.crew[0].id;

    let mut quests = QuestManager::new();
    quests.register_observer(jack);
    let battle = quests.add_quest(catalog::ship_battle("Flying Dutchman"));

    let mut scene = CombatScene::new(&config(), pearl, dutchman, ChaCha8Rng::seed_from_u64(13));
    let mut frontend = ScriptedFrontend::new([PlayerIntent::Quit]);
    scene.run(&mut frontend, &mut quests);

    let quest = quests.quest(battle).unwrap();
    assert_eq!(quest.state, QuestState::InProgress);
    assert_eq!(quest.completed_objectives(), 1);
    assert!(quest.objectives[0].is_completed());
    assert!(!quest.is_completed());
    // Retreated crews still hear about their quests
    assert!(scene
        .field()
        .log
        .contains("Captain Jack Sparrow: Objective completed - Locate the Flying Dutchman"));
}

#[test]
fn test_retreated_crew_progress_still_settles() {
    let (mut pearl, dutchman) = ships(frail("Koehler", CharacterKind::Pirate));
    pearl.crew[0].quest_progress.insert("Defeat 1 pirates".into(), 1);
    let jack = pearl.crew[0].id;

    let mut quests = QuestManager::new();
    let hunt = quests.add_quest(catalog::pirate_hunt(1));
    quests.register_observer_for_quest(jack, hunt);

    let mut scene = CombatScene::new(&config(), pearl, dutchman, ChaCha8Rng::seed_from_u64(13));
    let mut frontend = ScriptedFrontend::new([PlayerIntent::Quit]);
    let outcome = scene.run(&mut frontend, &mut quests);

    assert_eq!(outcome.winner(), Some(Side::Second));
    assert_eq!(quests.quest(hunt).unwrap().state, QuestState::Completed);
    assert_eq!(quests.rewards_earned(RewardKind::Gold), 500);
    assert!(scene
        .field()
        .log
        .contains("Captain Jack Sparrow: Quest completed - Pirate Hunt"));
}
