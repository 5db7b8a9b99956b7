use mockall::mock;
use std::sync::atomic::{AtomicUsize, Ordering};

use upstream_client_pool::{
	models::ClientConfig,
	services::http_client::{ClientFactory, HttpClient, HttpClientError, ReqwestClientFactory},
};

mock! {
	pub ClientFactory {}

	impl ClientFactory for ClientFactory {
		fn build(&self, config: &ClientConfig) -> Result<HttpClient, HttpClientError>;
	}
}

/// Real factory that records how many clients it built
#[derive(Default)]
pub struct CountingFactory {
	builds: AtomicUsize,
}

impl CountingFactory {
	pub fn builds(&self) -> usize {
		self.builds.load(Ordering::SeqCst)
	}
}

impl ClientFactory for CountingFactory {
	fn build(&self, config: &ClientConfig) -> Result<HttpClient, HttpClientError> {
		self.builds.fetch_add(1, Ordering::SeqCst);
		ReqwestClientFactory.build(config)
	}
}
