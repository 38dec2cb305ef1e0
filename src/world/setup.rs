//! Demo world: the Black Pearl against the Flying Dutchman

use crate::core::config::CombatConfig;
use crate::entity::{CharacterKind, Ship, ShipClass};
use crate::items::factory::ItemTier;
use crate::quests::catalog;
use crate::world::GameContext;

const DUTCHMAN_CREW: [&str; 6] = [
    "Davy Jones",
    "Bootstrap Bill",
    "Bill Turner",
    "Maccus",
    "Clanker",
    "Victor",
];

pub struct DemoWorld {
    pub context: GameContext,
    pub player: Ship,
    pub opponent: Ship,
}

pub fn demo_world(config: CombatConfig) -> DemoWorld {
    let mut context = GameContext::new(config);

    let mut player = ShipClass::Galleon.create("Black Pearl");
    let captain = CharacterKind::Pirate.create("Captain Jack Sparrow");
    let captain_id = captain.id;
    player.add_crew(captain);
    player.add_crew(CharacterKind::Pirate.create("Crewman Gibbs"));
    player.load(ItemTier::Rare.create_weapon());
    player.load(ItemTier::Mythical.create_relic());

    let mut opponent = ShipClass::ManOWar.create("Flying Dutchman");
    for name in DUTCHMAN_CREW {
        opponent.add_crew(CharacterKind::Pirate.create(name));
    }
    opponent.load(ItemTier::Mythical.create_weapon());
    opponent.load(ItemTier::Rare.create_treasure_map());

    let hunt = context.quests.add_quest(catalog::pirate_hunt(3));
    context.quests.register_observer_for_quest(captain_id, hunt);
    context.dispatch_quests(&mut player);

    tracing::info!(
        player = %player.name,
        opponent = %opponent.name,
        "demo world ready"
    );
    DemoWorld {
        context,
        player,
        opponent,
    }
}
