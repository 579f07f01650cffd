//! auction-rs CLI.
//!
//! Offline driver for the rule engine:
//! - `auction-rs evaluate` - Run a bid request through a rule configuration
//! - `auction-rs validate` - Load, validate, and compile a rule configuration

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use auction_openrtb::BidRequest;
use auction_rs::build::{Registries, build_rules};
use auction_rs::prelude::{AuctionContext, Granularity, RequestRuleContext};

/// auction-rs unified CLI.
#[derive(Parser)]
#[command(
    name = "auction-rs",
    version,
    about = "Rule-based bid-request processing for ad auctions",
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a bid request through a rule configuration.
    Evaluate(EvaluateArgs),

    /// Load, validate, and compile a rule configuration.
    Validate(ValidateArgs),
}

#[derive(Args)]
struct EvaluateArgs {
    /// Rule config file (json/jsonc/yaml/toml)
    #[arg(short, long)]
    config: PathBuf,

    /// Bid request JSON file
    #[arg(short, long)]
    request: PathBuf,

    /// Datacenter to evaluate as
    #[arg(long, default_value = "default")]
    datacenter: String,

    /// Publisher account id
    #[arg(long)]
    account: Option<String>,

    /// Report what would fire without applying actions
    #[arg(long)]
    dry_run: bool,
}

#[derive(Args)]
struct ValidateArgs {
    /// Rule config file (json/jsonc/yaml/toml)
    #[arg(short, long)]
    config: PathBuf,
}

fn main() -> ExitCode {
    init_tracing();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Evaluate(args) => evaluate(args),
        Commands::Validate(args) => validate(args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(io::stderr))
        .init();
}

fn evaluate(args: EvaluateArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = auction_config::load_config(&args.config)?;
    auction_config::validate_config(&config)?;
    let rules = build_rules(&config, &Registries::standard(), args.dry_run)?;

    let request: BidRequest = serde_json::from_str(&std::fs::read_to_string(&args.request)?)?;
    let context = RequestRuleContext::new(
        Arc::new(AuctionContext {
            account_id: args.account,
        }),
        Granularity::Request,
        args.datacenter,
    );

    let result = rules.process(request, &context);

    let output = serde_json::json!({
        "rejected": result.is_reject(),
        "reason": result.rejection().map(|reason| reason.0),
        "altered": result.altered(),
        "request": result.value(),
        "tags": result.tags(),
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn validate(args: ValidateArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = auction_config::load_config(&args.config)?;
    auction_config::validate_config(&config)?;
    // Resolve function names and per-action configs against the
    // registries; this catches everything structural validation cannot.
    let rules = build_rules(&config, &Registries::standard(), false)?;

    println!("OK: {} model(s) compiled", rules.len());
    Ok(())
}
