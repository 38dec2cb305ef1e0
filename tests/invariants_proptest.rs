//! Property tests for resource bounds, command round trips and targeting

use broadside::combat::{ActionStrategy, Battlefield};
use broadside::command::{AttackCommand, Command, DefendCommand, HealCommand, MoveCommand};
use broadside::core::types::{CharacterId, Direction, Position, Side};
use broadside::core::CombatConfig;
use broadside::entity::{Character, CharacterKind, EquipmentSlot, ShipClass};
use broadside::items::{Item, Rarity, WeaponKind};
use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

const DIRECTIONS: [Direction; 4] = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

fn small_field(seed: u64, per_crew: usize) -> Battlefield {
    let config = CombatConfig {
        grid_width: 6,
        grid_height: 6,
        crew_spacing: 2,
        ..CombatConfig::seeded(seed)
    };
    let mut first = ShipClass::Galleon.create("Black Pearl");
    let mut second = ShipClass::Frigate.create("Dauntless");
    for i in 0..per_crew {
        let mut pirate = CharacterKind::Pirate.create(format!("Pirate {}", i));
        for slot in [EquipmentSlot::Weapon, EquipmentSlot::Defensive] {
            let blade = Item::weapon("Cutlass", Rarity::Common, 10, WeaponKind::Melee);
            let id = blade.id;
            pirate.add_item(blade).unwrap();
            pirate.equip_to(slot, id).unwrap();
        }
        pirate.unlock(ActionStrategy::Ranged);
        pirate.unlock(ActionStrategy::Magic);
        first.add_crew(pirate);
        second.add_crew(CharacterKind::EnglishSoldier.create(format!("Marine {}", i)));
    }
    let mut field = Battlefield::new(&config, first, second, ChaCha8Rng::seed_from_u64(seed));
    field.deploy(&config);
    field
}

fn all_ids(field: &Battlefield) -> Vec<CharacterId> {
    field.ships.iter().flat_map(|s| s.everyone().map(|c| c.id)).collect()
}

fn within_bounds(c: &Character) -> bool {
    c.health <= c.max_health && c.stamina <= c.max_stamina && c.magic_points <= c.max_magic_points
}

proptest! {
    #[test]
    fn prop_resources_stay_within_bounds(
        seed in 0u64..1000,
        ops in prop::collection::vec((0u8..7, 0usize..8, 0usize..8), 1..60),
    ) {
        let mut field = small_field(seed, 2);
        for (op, a, b) in ops {
            let ids = all_ids(&field);
            let actor = ids[a % ids.len()];
            let target = ids[b % ids.len()];
            match op {
                0 => {
                    let strategy = ActionStrategy::ALL[b % ActionStrategy::ALL.len()];
                    field.perform_strategy(strategy, actor, target);
                }
                1 => {
                    AttackCommand::new(actor, target).execute(&mut field);
                }
                2 => {
                    HealCommand::on(actor, target, (b as u32) * 7).execute(&mut field);
                }
                3 => {
                    DefendCommand::new(actor).execute(&mut field);
                }
                4 => {
                    if let Some(mut step) = MoveCommand::toward(&field, actor, DIRECTIONS[b % 4]) {
                        step.execute(&mut field);
                    }
                }
                5 => field.apply_states(),
                _ => {
                    field.sweep_dead();
                }
            }
            for id in all_ids(&field) {
                prop_assert!(within_bounds(field.get(id).unwrap()));
            }
        }
    }

    #[test]
    fn prop_move_round_trip(seed in 0u64..1000, x in -1i32..7, y in -1i32..7, who in 0usize..4) {
        let mut field = small_field(seed, 2);
        let ids = all_ids(&field);
        let actor = ids[who % ids.len()];
        let before = field.get(actor).unwrap().clone();

        let mut step = MoveCommand::new(actor, Position::new(x, y));
        if step.execute(&mut field) {
            prop_assert_eq!(field.get(actor).unwrap().position, Position::new(x, y));
            prop_assert!(step.undo(&mut field));
        }
        let after = field.get(actor).unwrap();
        prop_assert_eq!(after.position, before.position);
        prop_assert_eq!(after.state, before.state);
        prop_assert!(field.positions_consistent());
    }

    #[test]
    fn prop_attack_round_trip(seed in 0u64..1000, health in 1u32..150) {
        let mut field = small_field(seed, 1);
        let attacker = field.ship(Side::First).crew[0].id;
        let target = field.ship(Side::Second).crew[0].id;
        field.get_mut(target).unwrap().health = health;

        let mut attack = AttackCommand::new(attacker, target);
        prop_assert!(attack.execute(&mut field));
        prop_assert!(!attack.execute(&mut field));
        attack.undo(&mut field);

        prop_assert_eq!(field.get(target).unwrap().health, health);
        prop_assert_eq!(field.get(attacker).unwrap().stamina, 100);
    }

    #[test]
    fn prop_targets_are_exactly_living_enemies_in_range(
        seed in 0u64..1000,
        range in 0u32..8,
        moves in prop::collection::vec((0usize..6, 0usize..4), 0..20),
    ) {
        let mut field = small_field(seed, 3);
        for (who, dir) in moves {
            let ids = all_ids(&field);
            if let Some(mut step) = MoveCommand::toward(&field, ids[who % ids.len()], DIRECTIONS[dir]) {
                step.execute(&mut field);
            }
        }
        let actor = field.ship(Side::First).crew[0].id;
        let me = field.get(actor).unwrap().position;

        let mut found = field.find_targets_in_range(actor, range);
        let mut expected: Vec<CharacterId> = field
            .ship(Side::Second)
            .living()
            .filter(|c| c.position.distance(&me) <= range)
            .map(|c| c.id)
            .collect();
        found.sort_by_key(|id| id.0);
        expected.sort_by_key(|id| id.0);
        prop_assert!(!found.contains(&actor));
        prop_assert_eq!(found, expected);
    }
}
