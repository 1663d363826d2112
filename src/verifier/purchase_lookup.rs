//! Purchase-detail lookup against
//! `GET {base}/v7/apps/{package}/purchases/inapp/products/{product}/{token}`.

// crates.io
use oauth2::{
	HttpRequest,
	http::{
		Method, Request,
		header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
	},
};
// self
use crate::{
	_prelude::*,
	auth::AccessToken,
	error::ConfigError,
	http::StoreHttpClient,
	obs::VerifyStage,
	purchase::{PurchaseQuery, PurchaseRecord},
	transport::TransportErrorMapper,
	verifier::{Verifier, common::CONTENT_TYPE_JSON},
};

impl<C, M> Verifier<C, M>
where
	C: ?Sized + StoreHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Fetches the purchase record using a freshly issued access token.
	pub(crate) async fn lookup_purchase(
		&self,
		access_token: &AccessToken,
		query: &PurchaseQuery<'_>,
	) -> Result<PurchaseRecord> {
		let request = self.lookup_request(access_token, query)?;

		self.dispatch(VerifyStage::PurchaseLookup, request).await
	}

	fn lookup_request(
		&self,
		access_token: &AccessToken,
		query: &PurchaseQuery<'_>,
	) -> Result<HttpRequest> {
		let url = self.endpoint.join(query.path_segments())?;
		let request = Request::builder()
			.method(Method::GET)
			.uri(url.as_str())
			.header(AUTHORIZATION, access_token.authorization())
			.header(CONTENT_TYPE, CONTENT_TYPE_JSON)
			.header(ACCEPT, CONTENT_TYPE_JSON)
			.body(Vec::new())
			.map_err(ConfigError::from)?;

		Ok(request)
	}
}

#[cfg(all(test, feature = "reqwest"))]
mod tests {
	// self
	use super::*;
	use crate::{auth::Secret, verifier::ReqwestVerifier};

	#[test]
	fn lookup_request_carries_bearer_token_and_encoded_path() {
		let verifier =
			ReqwestVerifier::new("package", "client_secret", "abc123").expect("Verifier should build.");
		let access_token = AccessToken { access_token: Secret::new("tok123"), ..Default::default() };
		let query = PurchaseQuery::new("com.example", "gem_100", "abc+123/x")
			.expect("Query fixture should be valid.");
		let request =
			verifier.lookup_request(&access_token, &query).expect("Lookup request should build.");

		assert_eq!(request.method(), Method::GET);
		assert_eq!(
			request.uri().to_string(),
			"https://apis.onestore.co.kr/v7/apps/com.example/purchases/inapp/products/gem_100/abc+123%2Fx"
		);
		assert_eq!(request.headers()[AUTHORIZATION], "Bearer tok123");
		assert_eq!(request.headers()[CONTENT_TYPE], "application/json");
		assert!(request.body().is_empty());
	}
}
