//! # Mock RSK Node
//!
//! This binary starts a mock RSK node that serves `eth_getCode` over HTTP.
//! Can be spawned multiple times. Each node has an independent ledger.

use clap::Parser;
use rsk_rpc_compat::rpc::{spawn_rpc_server, NodeOptions};
use rsk_rpc_compat::utils::{initialize_logger, verbosity_to_level};
use rsk_rpc_compat::{Address, Bytes};
use std::process::exit;
use std::time::Duration;

/// Mock RSK node
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Verbosity level, ranging from 0 (none) to 5 (highest)
    #[arg(short, long, default_value_t = 0)]
    verbose: u8,
    /// Optional host address
    #[arg(default_value_t = String::from("127.0.0.1"))]
    pub host: String,
    /// Optional host port (if not given, requests a random port from OS)
    #[arg(default_value_t = 0)]
    pub port: u16,
    /// Delays every response by given milliseconds
    #[arg(long, default_value_t = 0)]
    pub delay_ms: u64,
    /// Answer `0x00` for accounts without code, like RSKJ does
    #[arg(long)]
    pub rskj_empty_code: bool,
    /// Deploys code before starting, as `ADDRESS=CODE` (can be repeated)
    #[arg(long, value_parser = parse_deployment)]
    pub deploy: Vec<(Address, Bytes)>,
}

fn parse_deployment(s: &str) -> Result<(Address, Bytes), String> {
    let (address, code) = s
        .split_once('=')
        .ok_or_else(|| format!("Expected ADDRESS=CODE, got {s}"))?;

    let address = address.parse::<Address>().map_err(|e| format!("{e}"))?;
    let code = code.parse::<Bytes>().map_err(|e| format!("{e}"))?;

    Ok((address, code))
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

    let server = match spawn_rpc_server(NodeOptions {
        host: args.host,
        port: args.port,
        response_delay: Duration::from_millis(args.delay_ms),
        rskj_empty_code: args.rskj_empty_code,
        ledger: None,
    })
    .await
    {
        Ok(s) => s,
        Err(e) => {
            eprintln!("{e}");
            exit(1);
        }
    };

    for (address, code) in args.deploy {
        server.ledger.deploy(address, code);
    }

    println!("Server started at {}", server.url());

    server.handle.stopped().await;
}
