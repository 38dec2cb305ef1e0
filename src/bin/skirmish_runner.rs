//! Headless Skirmish Runner
//!
//! Plays the demo engagement AI vs AI and prints a summary.

use broadside::combat::{CombatScene, ScenePhase, ScriptedFrontend};
use broadside::core::types::Side;
use broadside::core::CombatConfig;
use broadside::quests::RewardKind;
use broadside::world::demo_world;
use clap::Parser;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

/// Headless Skirmish Runner - AI vs AI crew combat
#[derive(Parser, Debug)]
#[command(name = "skirmish_runner")]
#[command(about = "Run the demo engagement with the AI playing both crews")]
struct Args {
    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Maximum turns before the engagement is called a draw
    #[arg(long)]
    max_turns: Option<u32>,

    /// TOML combat config
    #[arg(long)]
    config: Option<String>,

    /// Output format: json or text
    #[arg(long, default_value = "json")]
    format: String,

    /// Print every combat log line as it is written
    #[arg(long, short = 'v')]
    verbose: bool,
}

#[derive(Serialize)]
struct CrewSummary {
    ship: String,
    survivors: usize,
    fallen: usize,
    kills: u32,
}

#[derive(Serialize)]
struct SkirmishResult {
    outcome: String,
    winner: Option<String>,
    turns: u32,
    crews: Vec<CrewSummary>,
    quests_completed: usize,
    gold: u32,
    reputation: u32,
    seed: u64,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("broadside=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => CombatConfig::load(path).unwrap_or_else(|e| {
            eprintln!("Warning: Failed to load config '{}': {}", path, e);
            eprintln!("Using default config");
            CombatConfig::default()
        }),
        None => CombatConfig::default(),
    };
    if let Some(max_turns) = args.max_turns {
        config.max_turns = max_turns;
    }
    let seed = args.seed.or(config.seed).unwrap_or_else(rand::random);
    config.seed = Some(seed);
    config.pause_ms = 0;
    if let Err(e) = config.validate() {
        eprintln!("Invalid config: {}", e);
        std::process::exit(2);
    }

    let mut world = demo_world(config.clone());
    let player = std::mem::take(&mut world.player);
    let opponent = std::mem::take(&mut world.opponent);
    let mut scene = CombatScene::new(&config, player, opponent, ChaCha8Rng::seed_from_u64(seed));
    let mut frontend = ScriptedFrontend::autopilot();

    scene.setup(&mut world.context.quests);
    while scene.phase() == ScenePhase::Active {
        let written = scene.field().log.written();
        scene.play_turn(&mut frontend, &mut world.context.quests);
        if args.verbose {
            let fresh = (scene.field().log.written() - written).min(scene.field().log.len());
            let skip = scene.field().log.len() - fresh;
            for line in scene.field().log.lines().skip(skip) {
                eprintln!("  [{}] {}", scene.turn(), line);
            }
        }
    }
    scene.settle_quests(&mut world.context.quests);

    let outcome = scene.outcome();
    let turns = scene.turn();
    let winner = outcome
        .and_then(|o| o.winner())
        .map(|side| scene.field().ship(side).name.clone());
    let crews = [Side::First, Side::Second]
        .into_iter()
        .map(|side| {
            let ship = scene.field().ship(side);
            CrewSummary {
                ship: ship.name.clone(),
                survivors: ship.living().count(),
                fallen: ship.fallen.len(),
                kills: ship.everyone().map(|c| c.kills).sum(),
            }
        })
        .collect();

    let quests = &world.context.quests;
    let result = SkirmishResult {
        outcome: outcome.map_or_else(|| "Unresolved".to_string(), |o| format!("{:?}", o)),
        winner,
        turns,
        crews,
        quests_completed: quests
            .quests()
            .iter()
            .filter(|q| q.state == broadside::quests::QuestState::Completed)
            .count(),
        gold: quests.rewards_earned(RewardKind::Gold),
        reputation: quests.rewards_earned(RewardKind::Reputation),
        seed,
    };

    match args.format.as_str() {
        "text" => print_text(&result),
        "json" => print_json(&result),
        _ => {
            eprintln!("Unknown format '{}', defaulting to json", args.format);
            print_json(&result);
        }
    }
}

fn print_json(result: &SkirmishResult) {
    match serde_json::to_string_pretty(result) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize result: {}", e),
    }
}

fn print_text(result: &SkirmishResult) {
    println!("Skirmish Result");
    println!("===============");
    println!("Outcome: {}", result.outcome);
    println!("Winner: {}", result.winner.as_deref().unwrap_or("none"));
    println!("Turns: {}", result.turns);
    for crew in &result.crews {
        println!(
            "  {}: {} standing, {} fallen, {} kills",
            crew.ship, crew.survivors, crew.fallen, crew.kills
        );
    }
    println!();
    println!("Quests completed: {}", result.quests_completed);
    println!("Rewards: {} gold, {} reputation", result.gold, result.reputation);
    println!("Seed: {}", result.seed);
}
