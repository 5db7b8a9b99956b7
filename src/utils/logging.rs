//! Log output for the smoke-test binary.
//!
//! The pool itself only emits events: a `debug` line per client build keyed by fingerprint,
//! and `warn` lines for a proxy that falls back to the environment or for disabled proxy
//! certificate checks. This module decides where those lines go.
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

/// Installs the global subscriber.
///
/// `RUST_LOG` wins when set, so `RUST_LOG=upstream_client_pool=debug` shows every client
/// build; otherwise `default_level` applies to all targets. Output is one compact line per
/// event on stdout, with level and target and without thread details.
pub fn setup_logging(default_level: &str) {
	let filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

	let subscriber = tracing_subscriber::registry().with(filter).with(
		fmt::layer()
			.with_writer(std::io::stdout)
			.event_format(
				fmt::format()
					.with_level(true)
					.with_target(true)
					.with_thread_ids(false)
					.with_thread_names(false)
					.with_ansi(true)
					.compact(),
			)
			.fmt_fields(fmt::format::PrettyFields::new()),
	);

	// Already installed when a test or embedding process got there first
	let _ = subscriber.try_init();
}
