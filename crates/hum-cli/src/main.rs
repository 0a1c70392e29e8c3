//! Command-line driver for the Hum narrative engine.
//!
//! Each invocation loads a save file, runs one command against a
//! `NarrativeEngine`, and writes the save back when the game changed.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use hum_core::{EventKind, TremorIntensity, Voice};

#[derive(Parser)]
#[command(
    name = "hum",
    about = "Hum: drive the narrative engine of a small mining town",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start a new game and write it to a save file
    New {
        /// Save file to create
        file: PathBuf,

        /// RNG seed for weather and manifestations
        #[arg(short, long, default_value = "42")]
        seed: u64,

        /// Overwrite an existing save
        #[arg(short, long)]
        force: bool,
    },

    /// Show the state of a saved game
    Status {
        /// Save file
        file: PathBuf,

        /// Print the raw state as JSON
        #[arg(long)]
        json: bool,

        /// Print one value by dotted path (e.g. narrative.tension)
        #[arg(short, long)]
        get: Option<String>,
    },

    /// Apply one change to a saved game and print the events it caused
    Apply {
        /// Save file
        file: PathBuf,

        /// RNG seed for weather and manifestations
        #[arg(short, long, default_value = "42")]
        seed: u64,

        #[command(subcommand)]
        action: Action,
    },

    /// List the dialogue choices an NPC would offer
    Choices {
        /// Save file
        file: PathBuf,

        /// NPC id
        #[arg(value_parser = commands::parse_npc)]
        npc: String,
    },

    /// Print the dialogue-service context for an NPC as JSON
    Context {
        /// Save file
        file: PathBuf,

        /// NPC id
        #[arg(value_parser = commands::parse_npc)]
        npc: String,
    },

    /// Show the game's event log
    Events {
        /// Save file
        file: PathBuf,

        /// Only events of this kind (e.g. npc:gate_unlock)
        #[arg(short, long)]
        kind: Option<EventKind>,

        /// Show at most this many of the newest events
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },
}

/// A single engine mutation.
#[derive(Subcommand)]
pub enum Action {
    /// Move the player
    Move {
        /// Location id
        #[arg(value_parser = commands::parse_location)]
        location: String,
    },

    /// Change global tension
    Tension {
        /// Amount (may be negative)
        #[arg(allow_negative_numbers = true)]
        delta: i32,

        /// Cause recorded on the event
        #[arg(long, default_value = "cli")]
        source: String,
    },

    /// Change an NPC's relationship with the player
    Relationship {
        /// NPC id
        #[arg(value_parser = commands::parse_npc)]
        npc: String,
        /// Amount (may be negative)
        #[arg(allow_negative_numbers = true)]
        delta: i32,
    },

    /// Change an NPC's stress
    Stress {
        /// NPC id
        #[arg(value_parser = commands::parse_npc)]
        npc: String,
        /// Amount (may be negative)
        #[arg(allow_negative_numbers = true)]
        delta: i32,
    },

    /// Change a voice score
    Voice {
        /// LOGIC, INSTINCT, EMPATHY, or GHOST
        voice: Voice,
        /// Amount (may be negative)
        #[arg(allow_negative_numbers = true)]
        delta: i32,
    },

    /// Shake the town
    Tremor {
        /// light, medium, or heavy
        #[arg(default_value = "light")]
        intensity: TremorIntensity,
    },

    /// Change the entity's activity
    Activity {
        /// Amount (may be negative)
        #[arg(allow_negative_numbers = true)]
        delta: f64,
    },

    /// Set a story flag
    Flag {
        /// Flag name
        name: String,
    },

    /// Advance the clock
    Time {
        /// Hours to advance
        hours: u32,
    },

    /// Open an NPC's next gate
    Gate {
        /// NPC id
        #[arg(value_parser = commands::parse_npc)]
        npc: String,

        /// Ignore the gate rules
        #[arg(long)]
        force: bool,
    },

    /// Enter an act directly
    Act {
        /// Act number (2 or 3)
        act: u8,
    },

    /// Freeze the ending path
    LockEnding,

    /// Start a conversation with an NPC
    Talk {
        /// NPC id
        #[arg(value_parser = commands::parse_npc)]
        npc: String,
    },

    /// Pick a dialogue choice (use `leave` to end the conversation)
    Choose {
        /// NPC id
        #[arg(value_parser = commands::parse_npc)]
        npc: String,
        /// Choice id
        choice: String,
    },

    /// Apply a dialogue-service reply read from a JSON file
    Reply {
        /// NPC id
        #[arg(value_parser = commands::parse_npc)]
        npc: String,
        /// File holding `{ "response": ..., "triggers": [...] }`
        reply: PathBuf,
    },

    /// Mark an active quest completed
    QuestComplete {
        /// Quest id
        id: String,
    },

    /// Mark an active quest failed
    QuestFail {
        /// Quest id
        id: String,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("HUM_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::New { file, seed, force } => commands::new::run(&file, seed, force),
        Commands::Status { file, json, get } => commands::status::run(&file, json, get.as_deref()),
        Commands::Apply { file, seed, action } => commands::apply::run(&file, seed, action),
        Commands::Choices { file, npc } => commands::choices::run(&file, &npc),
        Commands::Context { file, npc } => commands::context::run(&file, &npc),
        Commands::Events { file, kind, limit } => commands::events::run(&file, kind, limit),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
