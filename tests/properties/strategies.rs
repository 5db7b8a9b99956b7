use proptest::prelude::*;
use std::time::Duration;

use upstream_client_pool::models::ClientConfig;

const MAX_SECS: u64 = 3_600;
const MAX_POOL: usize = 1_000;
const MAX_BUFFER: usize = 1 << 20;

/// Durations with an arbitrary sub-second part
pub fn duration_strategy() -> impl Strategy<Value = Duration> {
	(0..MAX_SECS, 0u32..1_000_000_000).prop_map(|(secs, nanos)| Duration::new(secs, nanos))
}

pub fn proxy_url_strategy() -> impl Strategy<Value = String> {
	prop_oneof![
		Just(String::new()),
		"http://[a-z]{1,10}\\.internal:[1-9][0-9]{1,4}".prop_map(|s| s.to_string()),
		"socks5://127\\.0\\.0\\.1:[1-9][0-9]{1,4}".prop_map(|s| s.to_string()),
		"[a-zA-Z0-9%:/|]{0,20}".prop_map(|s| s.to_string()),
	]
}

pub fn client_config_strategy() -> impl Strategy<Value = ClientConfig> {
	(
		(
			duration_strategy(),
			duration_strategy(),
			duration_strategy(),
			duration_strategy(),
			duration_strategy(),
			duration_strategy(),
		),
		(0..MAX_POOL, 0..MAX_POOL, 0..MAX_BUFFER, 0..MAX_BUFFER),
		(any::<bool>(), any::<bool>(), any::<bool>()),
		proxy_url_strategy(),
	)
		.prop_map(
			|(
				(connect, request, idle, header, handshake, expect),
				(max_idle, per_host, write_buf, read_buf),
				(disable_compression, http2, skip_verify),
				proxy_url,
			)| ClientConfig {
				connect_timeout: connect,
				request_timeout: request,
				idle_conn_timeout: idle,
				max_idle_conns: max_idle,
				max_idle_conns_per_host: per_host,
				response_header_timeout: header,
				disable_compression,
				write_buffer_size: write_buf,
				read_buffer_size: read_buf,
				force_attempt_http2: http2,
				tls_handshake_timeout: handshake,
				expect_continue_timeout: expect,
				proxy_url,
				proxy_tls_skip_verify: skip_verify,
			},
		)
}

/// Truncates every duration of `config` to whole seconds
pub fn whole_seconds(config: &ClientConfig) -> ClientConfig {
	let trunc = |d: Duration| Duration::from_secs(d.as_secs());
	ClientConfig {
		connect_timeout: trunc(config.connect_timeout),
		request_timeout: trunc(config.request_timeout),
		idle_conn_timeout: trunc(config.idle_conn_timeout),
		response_header_timeout: trunc(config.response_header_timeout),
		tls_handshake_timeout: trunc(config.tls_handshake_timeout),
		expect_continue_timeout: trunc(config.expect_continue_timeout),
		..config.clone()
	}
}
