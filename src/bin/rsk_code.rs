//! # Pending Code Reader
//!
//! Dials an RSK endpoint and prints the code of an account as hex.

use clap::Parser;
use rsk_rpc_compat::utils::{initialize_logger, verbosity_to_level};
use rsk_rpc_compat::{dial, Address, BlockTag, CallContext, TransportConfig};
use std::collections::HashMap;
use std::process::exit;
use std::time::Duration;

/// Prints contract code of an account on an RSK node
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Verbosity level, ranging from 0 (none) to 5 (highest)
    #[arg(short, long, default_value_t = 0)]
    verbose: u8,
    /// HTTP(S) URL of the RSK node
    pub url: String,
    /// Account address, as hex
    pub address: Address,
    /// Block tag: latest, pending, earliest or a block number
    #[arg(short, long, default_value_t = BlockTag::Latest)]
    pub block: BlockTag,
    /// Gives up after this many seconds
    #[arg(short, long)]
    pub timeout: Option<u64>,
    /// Extra HTTP header, as `NAME=VALUE` (can be repeated)
    #[arg(long = "header", value_parser = parse_header)]
    pub headers: Vec<(String, String)>,
}

fn parse_header(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(name, value)| (name.to_owned(), value.to_owned()))
        .ok_or_else(|| format!("Expected NAME=VALUE, got {s}"))
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let Some(level) = verbosity_to_level(args.verbose) else {
        eprintln!(
            "Verbosity level can only be between 0 and 5 (given {})!",
            args.verbose
        );
        exit(1);
    };
    if let Err(e) = initialize_logger(level) {
        eprintln!("Couldn't initialize logger: {e}");
        exit(1);
    }

    let config = TransportConfig {
        headers: args.headers.into_iter().collect::<HashMap<_, _>>(),
        ..Default::default()
    };

    let client = match dial(&args.url, &config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{e}");
            exit(1);
        }
    };

    let ctx = match args.timeout {
        Some(secs) => CallContext::background().with_timeout(Duration::from_secs(secs)),
        None => CallContext::background(),
    };

    match client.code_at(&ctx, &args.address, args.block).await {
        Ok(code) => println!("{code}"),
        Err(e) => {
            eprintln!("{e}");
            exit(1);
        }
    }
}
