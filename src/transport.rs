//! Classification of transport failures into verifier [`Error`] values.

// crates.io
use oauth2::HttpClientError;
// self
use crate::{
	_prelude::*,
	error::{ConfigError, TransportError},
	obs::VerifyStage,
};

/// Maps HTTP transport failures into verifier [`Error`] values.
pub trait TransportErrorMapper<E>
where
	Self: 'static + Send + Sync,
	E: 'static + Send + Sync + StdError,
{
	/// Converts an [`HttpClientError`] emitted during `stage` into a verifier error.
	fn map_transport_error(&self, stage: VerifyStage, error: HttpClientError<E>) -> Error;
}

/// Default mapper for reqwest-backed transports.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug, Default)]
pub struct ReqwestTransportErrorMapper;
#[cfg(feature = "reqwest")]
impl TransportErrorMapper<ReqwestError> for ReqwestTransportErrorMapper {
	fn map_transport_error(&self, stage: VerifyStage, err: HttpClientError<ReqwestError>) -> Error {
		match err {
			HttpClientError::Reqwest(inner) => map_reqwest_error(stage, *inner),
			other => map_generic_transport_error(stage, other),
		}
	}
}

/// Shared handling for the transport-agnostic [`HttpClientError`] variants.
///
/// Custom mappers can delegate here after handling their transport-specific variant.
pub fn map_generic_transport_error<E>(stage: VerifyStage, err: HttpClientError<E>) -> Error
where
	E: 'static + Send + Sync + StdError,
{
	match err {
		HttpClientError::Reqwest(inner) => TransportError::network(stage, *inner).into(),
		HttpClientError::Http(inner) => ConfigError::from(inner).into(),
		HttpClientError::Io(source) => TransportError::Io { stage, source }.into(),
		HttpClientError::Other(message) => TransportError::Other { stage, message }.into(),
		_ => TransportError::Other { stage, message: "unrecognized HTTP client failure".into() }
			.into(),
	}
}

#[cfg(feature = "reqwest")]
fn map_reqwest_error(stage: VerifyStage, err: ReqwestError) -> Error {
	if err.is_builder() {
		return ConfigError::from(err).into();
	}
	if err.is_timeout() {
		return TransportError::timeout(stage, err).into();
	}

	TransportError::network(stage, err).into()
}
