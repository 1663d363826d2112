//! Transport primitives for storefront calls.
//!
//! The module exposes [`StoreHttpClient`] so downstream crates can plug in custom HTTP clients
//! (proxies, recording fakes, alternative TLS stacks) while the verifier keeps ownership of
//! request construction, status handling, and decoding. Requests and responses use the `http`
//! crate types re-exported by `oauth2`.

// std
#[cfg(feature = "reqwest")] use std::{ops::Deref, time::Duration as StdDuration};
// crates.io
use oauth2::{AsyncHttpClient, HttpClientError};
#[cfg(feature = "reqwest")] use oauth2::{HttpRequest, HttpResponse};
#[cfg(feature = "reqwest")] use reqwest::redirect::Policy;
// self
use crate::_prelude::*;
#[cfg(feature = "reqwest")] use crate::error::ConfigError;

/// Per-request timeout applied by [`ReqwestHttpClient::new`].
#[cfg(feature = "reqwest")]
pub const DEFAULT_TIMEOUT: StdDuration = StdDuration::from_secs(10);

/// Abstraction over HTTP transports capable of executing storefront calls.
///
/// The trait is the verifier's only dependency on an HTTP stack. Implementations must be
/// `Send + Sync + 'static` so one transport can be shared by concurrent verifications, and the
/// handles they return must own whatever state their request futures need so those futures stay
/// `Send` while in flight.
///
/// Handles must deliver the full response body; the verifier never streams.
pub trait StoreHttpClient
where
	Self: 'static + Send + Sync,
{
	/// Concrete error emitted by the underlying transport.
	type TransportError: 'static + Send + Sync + StdError;

	/// [`AsyncHttpClient`] handle used for a single outbound call.
	type Handle: for<'c> AsyncHttpClient<
			'c,
			Error = HttpClientError<Self::TransportError>,
			Future: 'c + Send,
		>
		+ 'static
		+ Send
		+ Sync;

	/// Builds a handle for the next outbound call.
	fn handle(&self) -> Self::Handle;
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
///
/// Storefront endpoints answer directly, so redirects are never followed. Clones share the
/// underlying connection pool.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug)]
pub struct ReqwestHttpClient(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestHttpClient {
	/// Builds a client with the [`DEFAULT_TIMEOUT`] per-request timeout.
	pub fn new() -> Result<Self> {
		Self::with_timeout(DEFAULT_TIMEOUT)
	}

	/// Builds a client with a custom per-request timeout.
	pub fn with_timeout(timeout: StdDuration) -> Result<Self> {
		let client = ReqwestClient::builder()
			.timeout(timeout)
			.redirect(Policy::none())
			.build()
			.map_err(ConfigError::from)?;

		Ok(Self(client))
	}

	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestHttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl Deref for ReqwestHttpClient {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl StoreHttpClient for ReqwestHttpClient {
	type Handle = ReqwestHandle;
	type TransportError = ReqwestError;

	fn handle(&self) -> Self::Handle {
		ReqwestHandle(self.0.clone())
	}
}

/// Handle returned by [`ReqwestHttpClient`] that satisfies [`StoreHttpClient`].
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug)]
pub struct ReqwestHandle(ReqwestClient);
#[cfg(feature = "reqwest")]
impl<'c> AsyncHttpClient<'c> for ReqwestHandle {
	type Error = HttpClientError<ReqwestError>;
	type Future = Pin<Box<dyn Future<Output = Result<HttpResponse, Self::Error>> + 'c + Send>>;

	fn call(&'c self, request: HttpRequest) -> Self::Future {
		Box::pin(async move {
			let response =
				self.0.execute(request.try_into().map_err(Box::new)?).await.map_err(Box::new)?;
			let status = response.status();
			let headers = response.headers().to_owned();
			let mut response_new =
				HttpResponse::new(response.bytes().await.map_err(Box::new)?.to_vec());

			*response_new.status_mut() = status;
			*response_new.headers_mut() = headers;

			Ok(response_new)
		})
	}
}
