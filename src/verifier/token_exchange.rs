//! Client-credentials exchange against `POST {base}/v7/oauth/token`.

// crates.io
use oauth2::{
	HttpRequest,
	http::{
		Method, Request,
		header::{ACCEPT, CONTENT_TYPE},
	},
};
// self
use crate::{
	_prelude::*,
	auth::AccessToken,
	error::ConfigError,
	http::StoreHttpClient,
	obs::VerifyStage,
	transport::TransportErrorMapper,
	verifier::{
		Verifier,
		common::{CONTENT_TYPE_FORM, CONTENT_TYPE_JSON},
	},
};

impl<C, M> Verifier<C, M>
where
	C: ?Sized + StoreHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Exchanges the client credentials for a fresh access token.
	pub(crate) async fn exchange_token(&self) -> Result<AccessToken> {
		let request = self.token_request()?;

		self.dispatch(VerifyStage::TokenExchange, request).await
	}

	fn token_request(&self) -> Result<HttpRequest> {
		let url = self.endpoint.join(["v7", "oauth", "token"])?;
		let request = Request::builder()
			.method(Method::POST)
			.uri(url.as_str())
			.header(CONTENT_TYPE, CONTENT_TYPE_FORM)
			.header(ACCEPT, CONTENT_TYPE_JSON)
			.body(self.credentials.grant_form().into_bytes())
			.map_err(ConfigError::from)?;

		Ok(request)
	}
}
