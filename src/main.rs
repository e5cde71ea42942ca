//! Anvil CLI - command-line tool for inspecting decoded Arena game data.
//!
//! Loads the game-data directory into an asset table and dumps the decoded
//! tables as text. The per-class side tables normally read out of the game
//! executable are supplied as a JSON file.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

use anvil_assets::{AssetTable, ExeClassData, RandomSource};
use anvil_vfs::DirectoryVfs;

/// Anvil - Arena game data inspection tool
#[derive(Parser)]
#[command(name = "anvil")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print one template text block
    Template {
        /// Game-data directory
        #[arg(short, long, env = "ARENA_DATA")]
        data: PathBuf,

        /// JSON file with the per-class executable tables
        #[arg(short, long, env = "ARENA_EXE_DATA")]
        exe_data: PathBuf,

        /// Template key to look up
        key: String,
    },

    /// List the character-creation questions
    Questions {
        /// Game-data directory
        #[arg(short, long, env = "ARENA_DATA")]
        data: PathBuf,

        /// JSON file with the per-class executable tables
        #[arg(short, long, env = "ARENA_EXE_DATA")]
        exe_data: PathBuf,
    },

    /// List the synthesized character classes
    Classes {
        /// Game-data directory
        #[arg(short, long, env = "ARENA_DATA")]
        data: PathBuf,

        /// JSON file with the per-class executable tables
        #[arg(short, long, env = "ARENA_EXE_DATA")]
        exe_data: PathBuf,
    },

    /// List the dungeon flavor entries
    Dungeons {
        /// Game-data directory
        #[arg(short, long, env = "ARENA_DATA")]
        data: PathBuf,

        /// JSON file with the per-class executable tables
        #[arg(short, long, env = "ARENA_EXE_DATA")]
        exe_data: PathBuf,
    },

    /// List the standard spells
    Spells {
        /// Game-data directory
        #[arg(short, long, env = "ARENA_DATA")]
        data: PathBuf,

        /// JSON file with the per-class executable tables
        #[arg(short, long, env = "ARENA_EXE_DATA")]
        exe_data: PathBuf,
    },

    /// Generate NPC names
    Names {
        /// Game-data directory
        #[arg(short, long, env = "ARENA_DATA")]
        data: PathBuf,

        /// JSON file with the per-class executable tables
        #[arg(short, long, env = "ARENA_EXE_DATA")]
        exe_data: PathBuf,

        /// Race id (0 through 23)
        #[arg(short, long, default_value_t = 0)]
        race: usize,

        /// Generate female names
        #[arg(long)]
        female: bool,

        /// PRNG seed
        #[arg(short, long, default_value_t = 12345)]
        seed: u64,

        /// Number of names to generate
        #[arg(short, long, default_value_t = 10)]
        count: usize,
    },
}

/// Adapts a seeded ChaCha stream to the name generator's random source.
struct ChaChaSource(ChaCha8Rng);

impl RandomSource for ChaChaSource {
    fn next(&mut self) -> u32 {
        self.0.next_u32()
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Template { data, exe_data, key } => {
            let assets = load_assets(&data, &exe_data)?;
            println!("{}", assets.template_text().get(&key)?);
        }
        Commands::Questions { data, exe_data } => {
            cmd_questions(&load_assets(&data, &exe_data)?);
        }
        Commands::Classes { data, exe_data } => {
            cmd_classes(&load_assets(&data, &exe_data)?);
        }
        Commands::Dungeons { data, exe_data } => {
            cmd_dungeons(&load_assets(&data, &exe_data)?);
        }
        Commands::Spells { data, exe_data } => {
            cmd_spells(&load_assets(&data, &exe_data)?);
        }
        Commands::Names {
            data,
            exe_data,
            race,
            female,
            seed,
            count,
        } => {
            cmd_names(&load_assets(&data, &exe_data)?, race, !female, seed, count)?;
        }
    }

    Ok(())
}

fn load_assets(data: &Path, exe_data: &Path) -> Result<AssetTable> {
    let side_data = fs::read(exe_data)
        .with_context(|| format!("failed to read class side data from {}", exe_data.display()))?;
    let side_data: ExeClassData =
        serde_json::from_slice(&side_data).context("failed to parse class side data")?;

    let vfs = DirectoryVfs::new(data);
    let assets = AssetTable::load(&vfs, &side_data)
        .with_context(|| format!("failed to load game data from {}", data.display()))?;

    Ok(assets)
}

fn cmd_questions(assets: &AssetTable) {
    for (index, question) in assets.questions().iter().enumerate() {
        println!("--- Question {} ---", index + 1);
        print!("{}", question.description());
        for choice in question.choices() {
            print!("[{}] {}", choice.category().name(), choice.text());
        }
    }
}

fn cmd_classes(assets: &AssetTable) {
    for class in assets.class_definitions() {
        println!(
            "{} ({}): health die d{}, lockpicking {:.2}, {} weapons, {} shields",
            class.name(),
            class.category().name(),
            class.health_die(),
            class.lockpicking(),
            class.allowed_weapons().len(),
            class.allowed_shields().len(),
        );
    }
}

fn cmd_dungeons(assets: &AssetTable) {
    for dungeon in assets.dungeons() {
        println!("{}", dungeon.title());
        println!("{}", dungeon.description());
        println!();
    }
}

fn cmd_spells(assets: &AssetTable) {
    for (index, spell) in assets.standard_spells().iter().enumerate() {
        if spell.name().is_empty() {
            continue;
        }
        println!(
            "{index:3}  {:<32} cost {:4}  element {}",
            spell.name(),
            spell.cost(),
            spell.element(),
        );
    }
}

fn cmd_names(
    assets: &AssetTable,
    race: usize,
    is_male: bool,
    seed: u64,
    count: usize,
) -> Result<()> {
    let mut random = ChaChaSource(ChaCha8Rng::seed_from_u64(seed));

    for _ in 0..count {
        println!("{}", assets.generate_name(race, is_male, &mut random)?);
    }

    Ok(())
}
