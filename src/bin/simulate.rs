//! Combat balance simulator CLI.
//!
//! Run Monte Carlo fights of one player loadout against one catalog monster.
//!
//! Usage:
//!   cargo run --bin simulate -- --monsters monsters.json --monster goblin [OPTIONS]
//!
//! Examples:
//!   cargo run --bin simulate -- --monsters m.json --monster goblin            # maxed melee
//!   cargo run --bin simulate -- --monsters m.json --monster goblin -n 50 -k 500
//!   cargo run --bin simulate -- --monsters m.json --monster goblin --seed 42 --json

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use rpg_engine::combat::{AttackSetup, AttackType, CombatStats, CombatStyle, EquipmentBonus};
use rpg_engine::core::RulesConfig;
use rpg_engine::encounter::PlayerLoadout;
use rpg_engine::error::{EngineError, Result};
use rpg_engine::monsters::MonsterCatalog;
use rpg_engine::simulator::{run_simulation, SimConfig};

/// Combat balance simulator
#[derive(Parser, Debug)]
#[command(name = "simulate")]
#[command(author, version, about = "Simulate fights against a catalog monster", long_about = None)]
struct Args {
    /// Monster catalog (JSON)
    #[arg(long = "monsters")]
    monsters: PathBuf,

    /// Monster to fight
    #[arg(long = "monster")]
    monster: String,

    /// Rules file (TOML); defaults apply when absent
    #[arg(long = "rules")]
    rules: Option<PathBuf>,

    /// Player loadout (JSON); overrides the level flags below
    #[arg(long = "player")]
    player: Option<PathBuf>,

    /// Number of simulation runs
    #[arg(short = 'n', long = "runs", default_value_t = 100)]
    runs: u32,

    /// Fights per run
    #[arg(short = 'k', long = "kills", default_value_t = 100)]
    kills: u32,

    /// Random seed for reproducibility
    #[arg(short = 's', long = "seed")]
    seed: Option<u64>,

    #[arg(long, default_value_t = 99)]
    attack: u32,
    #[arg(long, default_value_t = 99)]
    strength: u32,
    #[arg(long, default_value_t = 99)]
    defence: u32,
    #[arg(long, default_value_t = 99)]
    ranged: u32,
    #[arg(long, default_value_t = 99)]
    magic: u32,
    #[arg(long, default_value_t = 99)]
    hitpoints: u32,
    #[arg(long, default_value_t = 99)]
    prayer: u32,

    /// Combat style (accurate, aggressive, defensive, controlled, rapid, longrange)
    #[arg(long, default_value = "aggressive")]
    style: CombatStyle,

    /// Attack type (stab, slash, crush, magic, ranged)
    #[arg(long = "attack-type", default_value = "slash")]
    attack_type: AttackType,

    /// Weapon attack interval in ticks
    #[arg(long = "interval", default_value_t = 4)]
    interval: u32,

    /// Also write the report as JSON
    #[arg(long)]
    json: bool,

    /// Verbose output (-v for info, -vv for debug)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    verbose: u8,
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| EngineError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn player_from_args(args: &Args) -> Result<PlayerLoadout> {
    if let Some(path) = &args.player {
        let player: PlayerLoadout = serde_json::from_str(&read(path)?)?;
        info!("Loaded player loadout from {:?}", path);
        return Ok(player);
    }

    let stats = CombatStats::builder()
        .attack(args.attack)
        .strength(args.strength)
        .defence(args.defence)
        .ranged(args.ranged)
        .magic(args.magic)
        .hitpoints(args.hitpoints)
        .prayer(args.prayer)
        .build()?;
    let mut player = PlayerLoadout::new(
        stats,
        EquipmentBonus::default(),
        AttackSetup::new(args.style, args.attack_type),
    );
    player.weapon_interval_ticks = args.interval;
    Ok(player)
}

fn run(args: Args) -> Result<()> {
    let catalog = MonsterCatalog::from_json_str(&read(&args.monsters)?)?;
    let monster = catalog.get(&args.monster)?;
    let rules = match &args.rules {
        Some(path) => RulesConfig::load(path)?,
        None => RulesConfig::default(),
    };
    let player = player_from_args(&args)?;

    let config = SimConfig {
        num_runs: args.runs,
        seed: args.seed,
        kills_per_run: args.kills,
        verbosity: args.verbose,
        ..Default::default()
    };

    println!("╔═══════════════════════════════════════════════════════════════╗");
    println!("║                 COMBAT BALANCE SIMULATOR                      ║");
    println!("╚═══════════════════════════════════════════════════════════════╝");
    println!();
    println!("Configuration:");
    println!("  Monster:        {} (level {})", monster.name, monster.combat_level);
    println!("  Runs:           {}", config.num_runs);
    println!("  Fights / Run:   {}", config.kills_per_run);
    println!("  Style:          {} {}", player.setup.style, player.setup.attack_type);
    if let Some(seed) = config.seed {
        println!("  Seed:           {}", seed);
    }
    println!();
    println!("Running simulation...");
    println!();

    let report = run_simulation(&player, monster, &rules, &config);
    println!("{}", report.to_text());

    if args.json {
        let filename = format!(
            "sim_report_{}.json",
            chrono::Utc::now().format("%Y%m%d_%H%M%S")
        );
        fs::write(&filename, report.to_json()).map_err(|source| EngineError::Io {
            path: PathBuf::from(&filename),
            source,
        })?;
        println!("JSON report saved to: {}", filename);
    }

    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();

    let default_level = match args.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
