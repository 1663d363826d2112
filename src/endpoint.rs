//! Storefront environments and the base URLs every request is joined onto.
//!
//! ONE store runs two isolated deployments. Test purchases carry the literal `SANDBOX`
//! marker inside their purchase token, so the environment is a pure function of that
//! string and is fixed once a verifier is built.

// self
use crate::{_prelude::*, error::ConfigError};

/// Base URL of the sandbox (test purchase) deployment.
pub const SANDBOX_URL: &str = "https://sbpp.onestore.co.kr";
/// Base URL of the production deployment.
pub const PRODUCTION_URL: &str = "https://apis.onestore.co.kr";
/// Case-sensitive marker that routes a purchase token to the sandbox.
pub const SANDBOX_MARKER: &str = "SANDBOX";

/// Isolated storefront deployments.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Environment {
	/// Test purchases.
	Sandbox,
	/// Real transactions.
	#[default]
	Production,
}
impl Environment {
	/// Selects the environment from the purchase token's shape.
	///
	/// Only an exact, case-sensitive `SANDBOX` substring selects the sandbox; near misses such as
	/// `SANBOX` or `sandbox` stay on production.
	pub fn for_purchase_token(purchase_token: &str) -> Self {
		if purchase_token.contains(SANDBOX_MARKER) { Self::Sandbox } else { Self::Production }
	}

	/// Returns the static base URL for the environment.
	pub const fn base_url(self) -> &'static str {
		match self {
			Environment::Sandbox => SANDBOX_URL,
			Environment::Production => PRODUCTION_URL,
		}
	}

	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			Environment::Sandbox => "sandbox",
			Environment::Production => "production",
		}
	}
}
impl Display for Environment {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Resolved API base for one verifier.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Endpoint {
	environment: Environment,
	base: Url,
}
impl Endpoint {
	/// Builds the endpoint for one of the storefront deployments.
	pub fn new(environment: Environment) -> Result<Self> {
		let base = Url::parse(environment.base_url())
			.map_err(|source| ConfigError::InvalidEndpoint { source })?;

		Self::with_base_url(environment, base)
	}

	/// Builds the endpoint the purchase token routes to.
	pub fn for_purchase_token(purchase_token: &str) -> Result<Self> {
		Self::new(Environment::for_purchase_token(purchase_token))
	}

	/// Overrides the base URL while keeping the environment label (mock servers, gateways).
	pub fn with_base_url(environment: Environment, base: Url) -> Result<Self> {
		if base.cannot_be_a_base() {
			return Err(ConfigError::EndpointNotABase { url: base.to_string() }.into());
		}

		Ok(Self { environment, base })
	}

	/// Environment the endpoint belongs to.
	pub fn environment(&self) -> Environment {
		self.environment
	}

	/// Base URL requests are joined onto.
	pub fn base(&self) -> &Url {
		&self.base
	}

	/// Appends percent-encoded path segments to the base URL.
	pub fn join<'a, I>(&self, segments: I) -> Result<Url>
	where
		I: IntoIterator<Item = &'a str>,
	{
		let mut url = self.base.clone();

		url.path_segments_mut()
			.map_err(|_| ConfigError::EndpointNotABase { url: self.base.to_string() })?
			.pop_if_empty()
			.extend(segments);

		Ok(url)
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn sandbox_marker_is_a_literal_substring() {
		assert_eq!(Environment::for_purchase_token("SANDBOX-123"), Environment::Sandbox);
		assert_eq!(Environment::for_purchase_token("prefix.SANDBOX.suffix"), Environment::Sandbox);
		assert_eq!(Environment::for_purchase_token("abc123"), Environment::Production);
		assert_eq!(Environment::for_purchase_token("SANBOX"), Environment::Production);
		assert_eq!(Environment::for_purchase_token("sandbox-123"), Environment::Production);
		assert_eq!(Environment::for_purchase_token(""), Environment::Production);
		assert_eq!(Environment::default(), Environment::Production);
	}

	#[test]
	fn endpoints_resolve_static_base_urls() {
		let sandbox =
			Endpoint::for_purchase_token("SANDBOX-123").expect("Sandbox endpoint should build.");
		let production =
			Endpoint::for_purchase_token("abc123").expect("Production endpoint should build.");

		assert_eq!(sandbox.environment(), Environment::Sandbox);
		assert_eq!(sandbox.base().as_str(), "https://sbpp.onestore.co.kr/");
		assert_eq!(production.environment(), Environment::Production);
		assert_eq!(production.base().as_str(), "https://apis.onestore.co.kr/");
	}

	#[test]
	fn join_encodes_segments_and_keeps_prefixes() {
		let endpoint = Endpoint::new(Environment::Production).expect("Endpoint should build.");
		let url = endpoint.join(["v7", "oauth", "token"]).expect("Join should succeed.");

		assert_eq!(url.as_str(), "https://apis.onestore.co.kr/v7/oauth/token");

		let gateway = Endpoint::with_base_url(
			Environment::Sandbox,
			Url::parse("http://127.0.0.1:8080/gateway/").expect("Gateway URL should parse."),
		)
		.expect("Gateway endpoint should build.");
		let url = gateway.join(["v7", "apps", "a b", "x/y"]).expect("Join should succeed.");

		assert_eq!(url.as_str(), "http://127.0.0.1:8080/gateway/v7/apps/a%20b/x%2Fy");
	}

	#[test]
	fn rejects_cannot_be_a_base_urls() {
		let url = Url::parse("mailto:iap@example.com").expect("Mailto URL should parse.");
		let err = Endpoint::with_base_url(Environment::Production, url)
			.expect_err("Cannot-be-a-base URLs must be rejected.");

		assert!(matches!(err, Error::Config(ConfigError::EndpointNotABase { .. })));
	}
}
