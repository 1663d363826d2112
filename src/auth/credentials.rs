//! Client identifier/secret pair used for the client-credentials grant.

// self
use crate::{_prelude::*, auth::Secret};

/// Immutable client credentials issued by the storefront developer console.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
	client_id: String,
	client_secret: Secret,
}
impl Credentials {
	/// Creates a credential pair.
	pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
		Self { client_id: client_id.into(), client_secret: Secret::new(client_secret) }
	}

	/// OAuth client identifier.
	pub fn client_id(&self) -> &str {
		&self.client_id
	}

	/// OAuth client secret.
	pub fn client_secret(&self) -> &Secret {
		&self.client_secret
	}

	/// Encodes the client-credentials grant form body.
	pub(crate) fn grant_form(&self) -> String {
		url::form_urlencoded::Serializer::new(String::new())
			.append_pair("client_id", &self.client_id)
			.append_pair("client_secret", self.client_secret.expose())
			.append_pair("grant_type", "client_credentials")
			.finish()
	}
}
impl Debug for Credentials {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Credentials")
			.field("client_id", &self.client_id)
			.field("client_secret", &self.client_secret)
			.finish()
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn debug_output_redacts_the_secret() {
		let credentials = Credentials::new("package", "hunter2");
		let rendered = format!("{credentials:?}");

		assert!(rendered.contains("package"));
		assert!(!rendered.contains("hunter2"), "Rendered credentials were `{rendered}`.");
		assert!(rendered.contains("<redacted>"));
	}

	#[test]
	fn grant_form_is_url_encoded() {
		let credentials = Credentials::new("my client", "s&cret=");

		assert_eq!(
			credentials.grant_form(),
			"client_id=my+client&client_secret=s%26cret%3D&grant_type=client_credentials"
		);
	}
}
