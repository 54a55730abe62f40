//! CLI harness for the cross-chain epoch oracle core (§11): reads a
//! payload (or full calldata) from a file or stdin, drives one invocation
//! through [`oracle_core::InvocationDriver`], and can query the resulting
//! entities back out as JSON.

mod calldata;
mod store;

use std::io::Read;
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use oracle_core::{Call, InvocationDriver, NetworkIdScheme};
use oracle_entities::EntityKind;
use oracle_indexer_config::{FromEnv, OracleIndexerConfig};
use oracle_store::EntityStore;

use crate::store::JsonFileEntityStore;

#[derive(Parser)]
#[command(name = "oracle_indexer", about = "Cross-chain epoch oracle CLI harness")]
struct Cli {
    /// Path to the JSON-file-backed entity store. Created if missing.
    #[arg(long, global = true, default_value = "oracle_store.json")]
    store: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Copy, ValueEnum)]
enum InputMode {
    /// The input bytes are the oracle payload itself.
    Payload,
    /// The input bytes are full on-chain calldata; the payload is
    /// extracted per the framing rule in §6.
    Calldata,
}

#[derive(Subcommand)]
enum Command {
    /// Decode and apply one call against the store.
    Process {
        /// File to read the call's bytes from; reads stdin if omitted.
        #[arg(long)]
        input: Option<PathBuf>,
        #[arg(long, value_enum, default_value = "payload")]
        mode: InputMode,
        #[arg(long)]
        tx_hash: String,
        #[arg(long)]
        submitter: String,
        #[arg(long, default_value_t = 0)]
        block_number: u64,
    },
    /// Print the entity at `kind`/`id` as JSON.
    Query { kind: String, id: String },
}

fn parse_entity_kind(raw: &str) -> anyhow::Result<EntityKind> {
    Ok(match raw {
        "GlobalState" | "global-state" => EntityKind::GlobalState,
        "Network" | "network" => EntityKind::Network,
        "Epoch" | "epoch" => EntityKind::Epoch,
        "NetworkEpochBlockNumber" | "nebn" => EntityKind::NetworkEpochBlockNumber,
        "Payload" | "payload" => EntityKind::Payload,
        "MessageBlock" | "message-block" => EntityKind::MessageBlock,
        "Message" | "message" => EntityKind::Message,
        other => anyhow::bail!("unknown entity kind {other:?}"),
    })
}

fn read_input(input: Option<PathBuf>) -> anyhow::Result<Vec<u8>> {
    let mut bytes = Vec::new();
    match input {
        Some(path) => {
            bytes = std::fs::read(path)?;
        }
        None => {
            std::io::stdin().read_to_end(&mut bytes)?;
        }
    }
    Ok(bytes)
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let store = JsonFileEntityStore::open(&cli.store)?;

    match cli.command {
        Command::Process {
            input,
            mode,
            tx_hash,
            submitter,
            block_number,
        } => {
            let raw = read_input(input)?;
            let payload = match mode {
                InputMode::Payload => raw,
                InputMode::Calldata => calldata::extract_payload(&raw)?,
            };

            let config = OracleIndexerConfig::from_env().unwrap_or_else(|err| {
                tracing::warn!("falling back to default config: {err}");
                OracleIndexerConfig::for_tests()
            });
            let scheme: NetworkIdScheme = config.network_id_scheme;
            let driver = InvocationDriver::new(scheme);

            let call = Call {
                tx_hash,
                submitter,
                payload,
                block_number,
            };
            let result = driver.process_call(&store, &call)?;
            store.flush()?;

            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Command::Query { kind, id } => {
            let kind = parse_entity_kind(&kind)?;
            match store.load(kind, &id)? {
                Some(value) => println!("{}", serde_json::to_string_pretty(&value)?),
                None => anyhow::bail!("no {kind:?} entity with id {id:?}"),
            }
        }
    }

    Ok(())
}
