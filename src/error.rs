//! Verifier error types shared across endpoints, transports, and decoders.

// self
use crate::{_prelude::*, obs::VerifyStage, purchase::EmptyIdentifier};

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical verifier error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Transport failure (DNS, TCP, TLS, timeout).
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// Response body could not be decoded.
	#[error(transparent)]
	Decode(#[from] DecodeError),

	/// Storefront answered with a non-200 status and an error envelope.
	#[error("The {stage} call was rejected with HTTP {status} ({error}).")]
	Api {
		/// Call that was rejected.
		stage: VerifyStage,
		/// HTTP status code returned by the storefront.
		status: u16,
		/// Remote error payload.
		error: ApiError,
	},
	/// The caller's cancellation signal resolved before verification finished.
	#[error("Purchase verification was cancelled before it completed.")]
	Cancelled,
}
impl Error {
	/// Returns the outbound call the failure is attributed to, if any.
	pub fn stage(&self) -> Option<VerifyStage> {
		match self {
			Self::Transport(e) => Some(e.stage()),
			Self::Decode(e) => Some(e.stage),
			Self::Api { stage, .. } => Some(*stage),
			Self::Config(_) | Self::Cancelled => None,
		}
	}

	/// Returns the remote error payload when the storefront rejected a call.
	pub fn api_error(&self) -> Option<&ApiError> {
		match self {
			Self::Api { error, .. } => Some(error),
			_ => None,
		}
	}
}

/// Error payload returned by the storefront in place of a 200 body.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ThisError)]
#[error("code: {code}, message: {message}")]
pub struct ApiError {
	/// Machine-readable error code (for example `INVALID_CLIENT`).
	#[serde(default, deserialize_with = "crate::purchase::null_as_default")]
	pub code: String,
	/// Human-readable error description.
	#[serde(default, deserialize_with = "crate::purchase::null_as_default")]
	pub message: String,
}

/// Wire envelope wrapping [`ApiError`] as `{"error": {...}}`.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ApiErrorEnvelope {
	#[serde(default, deserialize_with = "crate::purchase::null_as_default")]
	pub(crate) error: ApiError,
}

/// Configuration and validation failures raised before any request is sent.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// HTTP request construction failed.
	#[error(transparent)]
	HttpRequest(#[from] oauth2::http::Error),
	/// Endpoint base URL cannot be parsed.
	#[error("Endpoint base URL is invalid.")]
	InvalidEndpoint {
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Endpoint base URL cannot carry path segments.
	#[error("Endpoint `{url}` cannot be used as a base URL.")]
	EndpointNotABase {
		/// Offending URL.
		url: String,
	},
	/// Package name, product id, or purchase token is empty.
	#[error("Purchase query is invalid.")]
	InvalidQuery(#[from] EmptyIdentifier),
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Transport-level failures (network, IO, timeouts).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred during the {stage} call.")]
	Network {
		/// Call in flight.
		stage: VerifyStage,
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// The per-request timeout elapsed.
	#[error("The {stage} call timed out.")]
	Timeout {
		/// Call in flight.
		stage: VerifyStage,
		/// Transport-specific timeout error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred during the {stage} call.")]
	Io {
		/// Call in flight.
		stage: VerifyStage,
		/// IO failure.
		#[source]
		source: std::io::Error,
	},
	/// HTTP client failure without a more specific classification.
	#[error("HTTP client error occurred during the {stage} call: {message}.")]
	Other {
		/// Call in flight.
		stage: VerifyStage,
		/// Client-supplied description.
		message: String,
	},
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(stage: VerifyStage, src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { stage, source: Box::new(src) }
	}

	/// Wraps a transport-specific timeout error.
	pub fn timeout(stage: VerifyStage, src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Timeout { stage, source: Box::new(src) }
	}

	/// Returns the call that was in flight.
	pub fn stage(&self) -> VerifyStage {
		match self {
			Self::Network { stage, .. }
			| Self::Timeout { stage, .. }
			| Self::Io { stage, .. }
			| Self::Other { stage, .. } => *stage,
		}
	}
}

/// Malformed JSON in a success or error body.
///
/// When the body belonged to a non-200 response the status and a bounded body preview are kept,
/// so the remote failure stays diagnosable even though its envelope could not be parsed.
#[derive(Debug, ThisError)]
#[error("The {stage} call returned an undecodable body with HTTP {status} at `{}`.", .source.path())]
pub struct DecodeError {
	/// Call whose body failed to decode.
	pub stage: VerifyStage,
	/// HTTP status code of the response.
	pub status: u16,
	/// Leading part of the raw body, lossily converted to UTF-8.
	pub body_preview: String,
	/// Structured parsing failure.
	#[source]
	pub source: serde_path_to_error::Error<serde_json::Error>,
}
impl DecodeError {
	const BODY_PREVIEW_LIMIT: usize = 512;

	pub(crate) fn new(
		stage: VerifyStage,
		status: u16,
		body: &[u8],
		source: serde_path_to_error::Error<serde_json::Error>,
	) -> Self {
		let preview = &body[..body.len().min(Self::BODY_PREVIEW_LIMIT)];

		Self { stage, status, body_preview: String::from_utf8_lossy(preview).into_owned(), source }
	}

	/// Returns `true` when the body belonged to a non-200 response.
	pub fn is_error_body(&self) -> bool {
		self.status != 200
	}
}
