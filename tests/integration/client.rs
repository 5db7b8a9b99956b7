use mockito::Server;
use reqwest::Method;
use std::{
	sync::Arc,
	time::{Duration, Instant},
};
use tokio::{io::AsyncReadExt, net::TcpListener};
use url::Url;

use upstream_client_pool::{
	models::{ClientConfig, RequestSettings},
	services::http_client::{ClientPool, HttpClientError, ProxyMode},
};

/// Accepts connections and reads the request, but never answers
async fn silent_upstream() -> Url {
	let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
	let addr = listener.local_addr().unwrap();
	tokio::spawn(async move {
		let mut held = Vec::new();
		while let Ok((mut socket, _)) = listener.accept().await {
			let mut buf = [0u8; 1024];
			let _ = socket.read(&mut buf).await;
			held.push(socket);
		}
	});
	Url::parse(&format!("http://{}/v1/chat/completions", addr)).unwrap()
}

#[tokio::test]
async fn test_pooled_client_sends_request() {
	let mut server = Server::new_async().await;
	let mock = server
		.mock("POST", "/v1/chat/completions")
		.match_header("authorization", "Bearer sk-test")
		.with_status(200)
		.with_body(r#"{"ok":true}"#)
		.expect(2)
		.create_async()
		.await;

	let pool = ClientPool::new();
	let config = ClientConfig::from(&RequestSettings::default());
	let url = Url::parse(&format!("{}/v1/chat/completions", server.url())).unwrap();

	for _ in 0..2 {
		let client = pool.get_client(&config).unwrap();
		let response = client
			.request(Method::POST, url.clone())
			.bearer_auth("sk-test")
			.body("{}")
			.send()
			.await
			.unwrap();
		assert_eq!(response.status(), 200);
		assert_eq!(response.text().await.unwrap(), r#"{"ok":true}"#);
	}

	mock.assert_async().await;
	assert_eq!(pool.len(), 1);
}

#[tokio::test]
async fn test_execute_prepared_request() {
	let mut server = Server::new_async().await;
	let mock = server
		.mock("GET", "/health")
		.with_status(204)
		.create_async()
		.await;

	let pool = ClientPool::new();
	let client = pool.get_client(&ClientConfig::default()).unwrap();
	let url = Url::parse(&format!("{}/health", server.url())).unwrap();

	let request = client.get(url).build().unwrap();
	let response = client.execute(request).await.unwrap();

	assert_eq!(response.status(), 204);
	assert_eq!(client.request_timeout(), Some(Duration::from_secs(600)));
	mock.assert_async().await;
}

#[tokio::test]
async fn test_pinned_proxy_routes_all_traffic() {
	let mut server = Server::new_async().await;
	let mock = server
		.mock("GET", "/models")
		.with_status(200)
		.expect(0)
		.create_async()
		.await;

	let pool = ClientPool::new();
	let config = ClientConfig {
		// Nothing listens on port 1, so a pinned client can never reach the server
		proxy_url: "http://127.0.0.1:1".to_string(),
		connect_timeout: Duration::from_secs(2),
		..ClientConfig::default()
	};
	let client = pool.get_client(&config).unwrap();
	assert!(matches!(client.proxy(), ProxyMode::Pinned(_)));

	let url = Url::parse(&format!("{}/models", server.url())).unwrap();
	let result = client.get(url).send().await;

	assert!(result.is_err());
	mock.assert_async().await;
}

#[tokio::test]
async fn test_clients_outlive_callers() {
	let pool = Arc::new(ClientPool::new());
	let config = ClientConfig::default();

	let built = {
		let pool = pool.clone();
		let config = config.clone();
		tokio::spawn(async move { pool.get_client(&config).unwrap() })
			.await
			.unwrap()
	};
	drop(built);

	let again = pool.get_client(&config).unwrap();
	assert_eq!(Arc::strong_count(&again), 2);
}

#[tokio::test]
async fn test_response_header_timeout_fires_before_request_timeout() {
	let url = silent_upstream().await;
	let pool = ClientPool::new();
	let config = ClientConfig {
		response_header_timeout: Duration::from_secs(1),
		request_timeout: Duration::from_secs(5),
		..ClientConfig::default()
	};
	let client = pool.get_client(&config).unwrap();

	let started = Instant::now();
	let err = client.get(url.clone()).send().await.unwrap_err();
	let waited = started.elapsed();

	assert!(
		matches!(err, HttpClientError::ResponseHeaderTimeout(_)),
		"unexpected error: {}",
		err
	);
	assert!(err.is_timeout());
	assert!(waited >= Duration::from_secs(1));
	assert!(waited < Duration::from_secs(4), "waited {:?}", waited);

	let request = client.get(url).build().unwrap();
	let err = client.execute(request).await.unwrap_err();
	assert!(matches!(err, HttpClientError::ResponseHeaderTimeout(_)));
}

#[tokio::test]
async fn test_zero_header_timeout_leaves_request_timeout_in_charge() {
	let url = silent_upstream().await;
	let pool = ClientPool::new();
	let config = ClientConfig {
		response_header_timeout: Duration::ZERO,
		request_timeout: Duration::from_secs(1),
		..ClientConfig::default()
	};
	let client = pool.get_client(&config).unwrap();

	let err = client.get(url).send().await.unwrap_err();

	assert!(
		matches!(err, HttpClientError::RequestError(_)),
		"unexpected error: {}",
		err
	);
	assert!(err.is_timeout());
}
