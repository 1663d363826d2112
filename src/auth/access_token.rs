//! Access token issued by the client-credentials grant.

// self
use crate::{_prelude::*, auth::Secret, purchase::null_as_default};

/// Bearer token returned by `POST /v7/oauth/token`.
///
/// Tokens are fetched fresh for every verification and dropped with it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct AccessToken {
	/// Client identifier echoed by the storefront.
	#[serde(default, deserialize_with = "null_as_default")]
	pub client_id: String,
	/// Token value; callers must avoid logging it.
	#[serde(default, deserialize_with = "null_as_default")]
	pub access_token: Secret,
	/// Token type label (normally `Bearer`).
	#[serde(default, deserialize_with = "null_as_default")]
	pub token_type: String,
	/// Lifetime in seconds.
	#[serde(default, deserialize_with = "null_as_default")]
	pub expires_in: i64,
	/// Granted scope string.
	#[serde(default, deserialize_with = "null_as_default")]
	pub scope: String,
}
impl AccessToken {
	/// Value for the `Authorization` header.
	pub fn authorization(&self) -> String {
		format!("Bearer {}", self.access_token.expose())
	}

	/// Lifetime reported by the storefront.
	pub fn lifetime(&self) -> Duration {
		Duration::seconds(self.expires_in)
	}
}
