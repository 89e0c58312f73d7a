//! Local driver for the recipe skill.
//!
//! Provides the `recipod` binary. `intent` resolves one intent from the
//! command line; `invoke` feeds a full voice-platform envelope through the
//! same [`recipod_skill::alexa::dispatch`] the HTTP `/skill` endpoint uses.

use std::io::Read;
use std::process;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use recipod_skill::alexa::{dispatch, SkillRequest};
use recipod_skill::{IntentResolver, Slots};
use recipod_storage::{connect, Collection, DocumentStore, StoreUri};

const RECIPES: &str = "recipes";

/// Recipe skill tools.
#[derive(Parser)]
#[command(name = "recipod", about = "Query the recipe skill against a document store")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a single intent and print its label and text.
    Intent {
        /// Intent name, e.g. GetIngredientsForRecipeIntent.
        name: String,

        /// Store connection string (memory://, sqlite::memory:, sqlite://<path>).
        #[arg(short, long)]
        store: String,

        /// Slot value as key=value. Repeatable.
        #[arg(long = "slot", value_parser = parse_slot)]
        slots: Vec<(String, String)>,
    },
    /// Resolve a request envelope and print the response envelope as JSON.
    Invoke {
        #[arg(short, long)]
        store: String,

        /// Path to the envelope JSON, or `-` for stdin.
        #[arg(short, long)]
        event: String,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Error: failed to start runtime: {}", e);
            process::exit(2);
        }
    };

    let exit_code = match cli.command {
        Commands::Intent { name, store, slots } => {
            runtime.block_on(run_intent(&store, &name, slots.into_iter().collect()))
        }
        Commands::Invoke { store, event } => runtime.block_on(run_invoke(&store, &event)),
    };
    process::exit(exit_code);
}

/// Parses one `key=value` slot argument.
fn parse_slot(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("invalid slot '{}', expected key=value", raw)),
    }
}

fn open_resolver(uri: &str) -> Result<IntentResolver, String> {
    let uri: StoreUri = uri.parse().map_err(|e| format!("{}", e))?;
    let store: Arc<dyn DocumentStore> =
        connect(&uri).map_err(|e| format!("failed to open store '{}': {}", uri, e))?;
    Ok(IntentResolver::new(Collection::new(store, RECIPES)))
}

/// Execute the intent subcommand.
///
/// Returns exit code: 0 = success, 1 = resolver error, 2 = bad store.
async fn run_intent(store_uri: &str, name: &str, slots: Slots) -> i32 {
    let resolver = match open_resolver(store_uri) {
        Ok(r) => r,
        Err(msg) => {
            eprintln!("Error: {}", msg);
            return 2;
        }
    };

    match resolver.resolve(name, &slots).await {
        Ok(response) => {
            println!("{}", response.label);
            println!("{}", response.text);
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

/// Execute the invoke subcommand.
///
/// Returns exit code: 0 = success, 1 = resolver error, 2 = bad store or
/// unreadable envelope.
async fn run_invoke(store_uri: &str, event: &str) -> i32 {
    let request = match read_event(event) {
        Ok(r) => r,
        Err(msg) => {
            eprintln!("Error: {}", msg);
            return 2;
        }
    };
    let resolver = match open_resolver(store_uri) {
        Ok(r) => r,
        Err(msg) => {
            eprintln!("Error: {}", msg);
            return 2;
        }
    };

    match dispatch(&resolver, &request).await {
        Ok(envelope) => {
            let json = serde_json::to_string_pretty(&envelope).unwrap_or_else(|e| {
                format!("{{\"error\": \"failed to serialize response: {}\"}}", e)
            });
            println!("{}", json);
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

fn read_event(event: &str) -> Result<SkillRequest, String> {
    let raw = if event == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .map_err(|e| format!("failed to read stdin: {}", e))?;
        buf
    } else {
        std::fs::read_to_string(event)
            .map_err(|e| format!("failed to read '{}': {}", event, e))?
    };
    serde_json::from_str(&raw).map_err(|e| format!("invalid envelope: {}", e))
}
