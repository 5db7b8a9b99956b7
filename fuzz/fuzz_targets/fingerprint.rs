#![no_main]

use libfuzzer_sys::fuzz_target;
use std::time::Duration;
use upstream_client_pool::{models::ClientConfig, services::http_client::fingerprint};

fn take_u64(data: &mut &[u8]) -> u64 {
	let (head, tail) = data.split_at(data.len().min(8));
	*data = tail;
	let mut buf = [0u8; 8];
	buf[..head.len()].copy_from_slice(head);
	u64::from_le_bytes(buf)
}

fn take_duration(data: &mut &[u8]) -> Duration {
	let raw = take_u64(data);
	Duration::new(raw >> 32, (raw as u32) % 1_000_000_000)
}

fuzz_target!(|data: &[u8]| {
	let mut data = data;
	let flags = take_u64(&mut data);
	let config = ClientConfig {
		connect_timeout: take_duration(&mut data),
		request_timeout: take_duration(&mut data),
		idle_conn_timeout: take_duration(&mut data),
		max_idle_conns: take_u64(&mut data) as usize,
		max_idle_conns_per_host: take_u64(&mut data) as usize,
		response_header_timeout: take_duration(&mut data),
		disable_compression: flags & 1 != 0,
		write_buffer_size: take_u64(&mut data) as usize,
		read_buffer_size: take_u64(&mut data) as usize,
		force_attempt_http2: flags & 2 != 0,
		tls_handshake_timeout: take_duration(&mut data),
		expect_continue_timeout: take_duration(&mut data),
		proxy_url: String::from_utf8_lossy(data).into_owned(),
		proxy_tls_skip_verify: flags & 4 != 0,
	};

	let first = fingerprint(&config);
	assert_eq!(first, fingerprint(&config.clone()));

	let truncated = ClientConfig {
		connect_timeout: Duration::from_secs(config.connect_timeout.as_secs()),
		..config.clone()
	};
	assert_eq!(first, fingerprint(&truncated));
});
