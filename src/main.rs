//! Upstream client pool smoke-test entry point.
//!
//! Loads the request settings the forwarding service would use, builds the pooled client for
//! them and sends one request through it. Useful for checking proxy and timeout settings on a
//! deployment before routing traffic.

use anyhow::Context;
use clap::Parser;
use reqwest::Method;
use std::path::PathBuf;
use tracing::{error, info};
use url::Url;

use upstream_client_pool::{
	bootstrap::{initialize_pool, load_settings},
	utils::{format_error_chain, logging::setup_logging},
};

#[derive(Parser, Debug)]
#[command(name = "upstream-client-pool")]
#[command(about = "Send a request through a pooled upstream client", long_about = None)]
#[command(version)]
struct Args {
	/// Target URL
	url: Url,

	/// HTTP method
	#[arg(short = 'X', long, default_value = "GET")]
	method: Method,

	/// Request settings file (JSON)
	#[arg(short, long, env = "REQUEST_SETTINGS")]
	settings: Option<PathBuf>,

	/// Default log level when RUST_LOG is not set
	#[arg(long, default_value = "info")]
	log_level: String,
}

#[tokio::main]
async fn main() {
	let _ = dotenvy::dotenv();
	let args = Args::parse();
	setup_logging(&args.log_level);

	if let Err(e) = run(args).await {
		error!("{}", format_error_chain(&e));
		std::process::exit(1);
	}
}

async fn run(args: Args) -> anyhow::Result<()> {
	let settings = load_settings(args.settings.as_deref(), |key| std::env::var(key).ok())
		.map_err(|e| anyhow::Error::new(*e))
		.context("Failed to load request settings")?;

	let (pool, config) = initialize_pool(&settings);
	let client = pool
		.get_client(&config)
		.context("Failed to create HTTP client")?;

	info!(
		method = %args.method,
		url = %args.url,
		proxy = ?client.proxy(),
		"sending request"
	);
	let response = client
		.request(args.method, args.url.clone())
		.send()
		.await
		.with_context(|| format!("Request to {} failed", args.url))?;

	info!(
		status = %response.status(),
		version = ?response.version(),
		"received response"
	);
	Ok(())
}
