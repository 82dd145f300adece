//! GovCodec CLI: decode DAO governance proposals into executable actions.
//!
//! # Commands
//! ```text
//! govcodec decode          <HEX|PROPOSAL_ID> [--proposals <file>] [--json] [--resolve]
//! govcodec decode-all      --proposals <file> [--json]
//! govcodec inspect         <HEX>
//! govcodec routes          [--json]
//! govcodec selectors
//! govcodec encode-schedule --target <addr> --payload <hex> [--delay <secs>]
//! govcodec test            --fixtures <dir>
//! ```

use alloy_primitives::{Address, B256, U256};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use govcodec_core::{action::Action, config, GovernanceConfig};
use govcodec_evm::{batch, builder, codec, enrich_actions, GovernanceDecoder};
use std::path::{Path, PathBuf};
use std::time::Duration;

mod logging;
mod proposals;

use proposals::ProposalSet;

#[derive(Parser)]
#[command(
    name = "govcodec",
    about = "GovCodec CLI: governance proposal decoder",
    long_about = "
GovCodec CLI: unwrap relay, timelock, retryable-ticket and upgrade-executor
layers of a governance proposal and print the actions it will perform.

ENVIRONMENT VARIABLES:
  GOVCODEC_CONFIG   Routing configuration file (.json / .yaml)
  RUST_LOG          Log filter, e.g. govcodec_evm=trace
",
    version
)]
struct Cli {
    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    log_json: bool,

    /// Routing configuration (defaults to the built-in Arbitrum DAO deployment)
    #[arg(long, global = true, env = "GOVCODEC_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode one proposal into its actions
    Decode {
        /// Calldata hex (0x-prefixed) or a decimal proposal id
        input: String,
        /// Proposal dataset used to look up ids
        #[arg(long)]
        proposals: Option<PathBuf>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
        /// Look up unnamed action signatures on Sourcify and 4byte.directory
        #[arg(long)]
        resolve: bool,
        /// Per-lookup timeout for --resolve
        #[arg(long, default_value_t = 3_000)]
        timeout_ms: u64,
    },

    /// Decode every proposal in a dataset
    #[command(name = "decode-all")]
    DecodeAll {
        #[arg(long)]
        proposals: PathBuf,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Decode a single call with the built-in signature tables
    Inspect {
        /// Calldata hex
        calldata: String,
    },

    /// Show the routing table and satellite chains
    Routes {
        /// Output the configuration as JSON
        #[arg(long)]
        json: bool,
    },

    /// List every built-in signature and its selector
    Selectors,

    /// Build timelock `schedule` calldata for a payload
    #[command(name = "encode-schedule")]
    EncodeSchedule {
        /// Scheduled call target
        #[arg(long)]
        target: Address,
        /// Payload hex for the target
        #[arg(long)]
        payload: String,
        /// Timelock delay in seconds
        #[arg(long, default_value_t = 259_200)]
        delay: u64,
        /// Wei sent with the call
        #[arg(long, default_value_t = 0)]
        value: u64,
    },

    /// Run golden fixture files
    Test {
        /// Directory containing fixture JSON files
        #[arg(long, default_value = "./fixtures")]
        fixtures: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_tracing(&logging::LogConfig::from_flags(cli.verbose, cli.log_json));

    if let Some(path) = &cli.config {
        let config = GovernanceConfig::load(path)
            .with_context(|| format!("cannot load config {}", path.display()))?;
        config::install(config)?;
    }
    let decoder = GovernanceDecoder::from_global_config()?;

    match cli.command {
        Commands::Decode { input, proposals, json, resolve, timeout_ms } => {
            cmd_decode(&decoder, &input, proposals.as_deref(), json, resolve, timeout_ms).await
        }

        Commands::DecodeAll { proposals, json } => cmd_decode_all(&decoder, &proposals, json),

        Commands::Inspect { calldata } => cmd_inspect(&decoder, &calldata),

        Commands::Routes { json } => cmd_routes(&decoder, json),

        Commands::Selectors => cmd_selectors(&decoder),

        Commands::EncodeSchedule { target, payload, delay, value } => {
            cmd_encode_schedule(target, &payload, delay, value)
        }

        Commands::Test { fixtures } => cmd_test::run(&decoder, &fixtures),
    }
}

// ─── Command implementations ─────────────────────────────────────────────────

async fn cmd_decode(
    decoder: &GovernanceDecoder,
    input: &str,
    proposals_path: Option<&Path>,
    as_json: bool,
    resolve: bool,
    timeout_ms: u64,
) -> Result<()> {
    let dataset = proposals_path.map(ProposalSet::load).transpose()?;
    let calldata = proposals::resolve_input(input, dataset.as_ref())?;

    let mut actions = decoder
        .decode_hex(calldata)
        .context("failed to decode proposal")?;

    if resolve {
        let resolver = govcodec_resolver::default_chain(Duration::from_millis(timeout_ms))?;
        actions = enrich_actions(actions, Some(&resolver)).await;
    }

    if as_json {
        println!("{}", serde_json::to_string_pretty(&actions)?);
    } else {
        print_actions(&actions);
    }
    Ok(())
}

fn cmd_decode_all(decoder: &GovernanceDecoder, path: &Path, as_json: bool) -> Result<()> {
    let dataset = ProposalSet::load(path)?;
    let (ids, inputs): (Vec<&str>, Vec<&str>) = dataset.iter().unzip();
    let results = batch::parallel_decode_hex(decoder, &inputs);

    if as_json {
        let report: Vec<serde_json::Value> = ids
            .iter()
            .zip(&results)
            .map(|(id, result)| match result {
                Ok(actions) => serde_json::json!({ "id": id, "actions": actions }),
                Err(e) => serde_json::json!({
                    "id": id,
                    "error": { "kind": format!("{:?}", e.kind()), "message": e.to_string() }
                }),
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let mut failed = 0usize;
    for (id, result) in ids.iter().zip(&results) {
        println!("Proposal {id}");
        match result {
            Ok(actions) => print_actions(actions),
            Err(e) => {
                failed += 1;
                println!("  error: {e}");
            }
        }
        println!();
    }
    println!("{} decoded, {} failed", dataset.len() - failed, failed);
    Ok(())
}

fn cmd_inspect(decoder: &GovernanceDecoder, calldata: &str) -> Result<()> {
    let bytes = codec::parse_hex(calldata)?;
    let call = decoder.describe(&bytes)?;
    println!("Function:  {}", call.function().signature());
    println!("Selector:  {}", call.function().selector());
    println!("Inputs:");
    for (name, value) in call.normalized() {
        println!("  {name}: {value}");
    }
    Ok(())
}

fn cmd_routes(decoder: &GovernanceDecoder, as_json: bool) -> Result<()> {
    if as_json {
        println!("{}", serde_json::to_string_pretty(config::global())?);
        return Ok(());
    }

    let routes = decoder.routes();
    println!("Home chain: {}", routes.home_chain_id());
    println!("\nRoutes:");
    for entry in routes.entries() {
        println!("  {:<44} {}", entry.address.to_checksum(None), entry.role);
    }
    println!("\nChains:");
    for chain in routes.chains() {
        println!("  {chain}");
    }
    Ok(())
}

fn cmd_selectors(decoder: &GovernanceDecoder) -> Result<()> {
    for (layer, registry) in decoder.registries() {
        println!("{layer}:");
        for function in registry.signatures() {
            println!("  {}  {}", function.selector(), function.signature());
        }
    }
    Ok(())
}

fn cmd_encode_schedule(target: Address, payload: &str, delay: u64, value: u64) -> Result<()> {
    let payload = codec::parse_hex(payload).context("invalid payload hex")?;
    let calldata = builder::schedule(
        target,
        U256::from(value),
        &payload,
        B256::ZERO,
        B256::ZERO,
        U256::from(delay),
    );
    println!("0x{}", hex::encode(calldata));
    Ok(())
}

fn print_actions(actions: &[Action]) {
    if actions.is_empty() {
        println!("  (no actions)");
        return;
    }
    println!(
        "  {:<3} {:<12} {:<8} {:<44} {}",
        "#", "TYPE", "CHAIN", "ADDRESS", "CALLDATA"
    );
    for (i, action) in actions.iter().enumerate() {
        println!(
            "  {:<3} {:<12} {:<8} {:<44} 0x{}",
            i,
            action.action_type().to_string(),
            action.chain_id(),
            action.address().to_checksum(None),
            hex::encode(action.call_data())
        );
        if let Some(decoded) = action.decoded_call_data() {
            println!("  {:<3} {:<12} {:<8} {}", "", "", "", decoded);
        }
    }
}
