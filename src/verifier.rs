//! Purchase verification orchestrated as a token exchange followed by a purchase lookup.

mod common;
mod purchase_lookup;
mod token_exchange;

// crates.io
use futures::future::{self, Either};
// self
use crate::{
	_prelude::*,
	auth::Credentials,
	endpoint::{Endpoint, Environment},
	error::ConfigError,
	http::StoreHttpClient,
	obs::{self, VerifyOutcome, VerifySpan},
	purchase::{PurchaseQuery, PurchaseRecord},
	transport::TransportErrorMapper,
};
#[cfg(feature = "reqwest")]
use crate::{http::ReqwestHttpClient, transport::ReqwestTransportErrorMapper};

#[cfg(feature = "reqwest")]
/// Verifier specialized for the crate's default reqwest transport stack.
pub type ReqwestVerifier = Verifier<ReqwestHttpClient, ReqwestTransportErrorMapper>;

/// Verifies in-app purchases against a single storefront environment.
///
/// The verifier owns immutable credentials, the endpoint chosen at construction, and a shared
/// transport. Every [`verify`](Self::verify) call runs its own token exchange and lookup, so one
/// instance can serve concurrent callers without coordination.
pub struct Verifier<C, M>
where
	C: ?Sized + StoreHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	http_client: Arc<C>,
	transport_mapper: Arc<M>,
	endpoint: Endpoint,
	credentials: Credentials,
}
impl<C, M> Verifier<C, M>
where
	C: ?Sized + StoreHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Creates a verifier that reuses the caller-provided transport + mapper pair.
	pub fn with_http_client(
		credentials: Credentials,
		endpoint: Endpoint,
		http_client: impl Into<Arc<C>>,
		mapper: impl Into<Arc<M>>,
	) -> Self {
		Self {
			http_client: http_client.into(),
			transport_mapper: mapper.into(),
			endpoint,
			credentials,
		}
	}

	/// Endpoint every request is sent to.
	pub fn endpoint(&self) -> &Endpoint {
		&self.endpoint
	}

	/// Environment selected at construction.
	pub fn environment(&self) -> Environment {
		self.endpoint.environment()
	}

	/// Client credentials used for the token exchange.
	pub fn credentials(&self) -> &Credentials {
		&self.credentials
	}

	/// Verifies a purchase and returns its authoritative record.
	///
	/// Runs exactly one token exchange and one purchase lookup; nothing is retried or cached.
	/// Dropping the returned future aborts whichever call is in flight.
	pub async fn verify(
		&self,
		package_name: &str,
		product_id: &str,
		purchase_token: &str,
	) -> Result<PurchaseRecord> {
		let environment = self.environment();
		let span = VerifySpan::new(environment);

		obs::record_verify_outcome(environment, VerifyOutcome::Attempt);

		let result = span
			.instrument(async move {
				let query = PurchaseQuery::new(package_name, product_id, purchase_token)
					.map_err(ConfigError::from)?;
				let access_token = self.exchange_token().await?;

				self.lookup_purchase(&access_token, &query).await
			})
			.await;

		match &result {
			Ok(_) => obs::record_verify_outcome(environment, VerifyOutcome::Success),
			Err(_) => obs::record_verify_outcome(environment, VerifyOutcome::Failure),
		}

		result
	}

	/// Same as [`verify`](Self::verify), but gives up with [`Error::Cancelled`] as soon as
	/// `cancel` resolves.
	///
	/// `cancel` can be any signal: a deadline sleep, a shutdown notification, a oneshot receiver.
	pub async fn verify_until<F>(
		&self,
		cancel: F,
		package_name: &str,
		product_id: &str,
		purchase_token: &str,
	) -> Result<PurchaseRecord>
	where
		F: Future<Output = ()>,
	{
		let verify = self.verify(package_name, product_id, purchase_token);

		futures::pin_mut!(verify, cancel);

		match future::select(verify, cancel).await {
			Either::Left((result, _)) => result,
			Either::Right(((), _)) => {
				obs::record_verify_outcome(self.environment(), VerifyOutcome::Cancelled);

				Err(Error::Cancelled)
			},
		}
	}
}
#[cfg(feature = "reqwest")]
impl Verifier<ReqwestHttpClient, ReqwestTransportErrorMapper> {
	/// Creates a verifier for the environment the purchase token routes to.
	///
	/// Tokens containing `SANDBOX` target the sandbox, everything else production. The verifier
	/// provisions its own reqwest transport with the fixed
	/// [`DEFAULT_TIMEOUT`](crate::http::DEFAULT_TIMEOUT) per request.
	pub fn new(
		client_id: impl Into<String>,
		client_secret: impl Into<String>,
		purchase_token: &str,
	) -> Result<Self> {
		Ok(Self::with_http_client(
			Credentials::new(client_id, client_secret),
			Endpoint::for_purchase_token(purchase_token)?,
			ReqwestHttpClient::new()?,
			ReqwestTransportErrorMapper,
		))
	}
}
impl<C, M> Clone for Verifier<C, M>
where
	C: ?Sized + StoreHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	fn clone(&self) -> Self {
		Self {
			http_client: self.http_client.clone(),
			transport_mapper: self.transport_mapper.clone(),
			endpoint: self.endpoint.clone(),
			credentials: self.credentials.clone(),
		}
	}
}
impl<C, M> Debug for Verifier<C, M>
where
	C: ?Sized + StoreHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Verifier")
			.field("endpoint", &self.endpoint)
			.field("credentials", &self.credentials)
			.finish()
	}
}
