//! Shared dispatch + decoding for both outbound calls.

// crates.io
use oauth2::{AsyncHttpClient, HttpRequest, HttpResponse, http::StatusCode};
use serde::de::DeserializeOwned;
// self
use crate::{
	_prelude::*,
	error::{ApiErrorEnvelope, DecodeError},
	http::StoreHttpClient,
	obs::{self, VerifyOutcome, VerifySpan, VerifyStage},
	transport::TransportErrorMapper,
	verifier::Verifier,
};

pub(crate) const CONTENT_TYPE_FORM: &str = "application/x-www-form-urlencoded";
pub(crate) const CONTENT_TYPE_JSON: &str = "application/json";

impl<C, M> Verifier<C, M>
where
	C: ?Sized + StoreHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Sends one request and decodes its body as `T`, or as the error envelope on non-200.
	pub(crate) async fn dispatch<T>(&self, stage: VerifyStage, request: HttpRequest) -> Result<T>
	where
		T: DeserializeOwned,
	{
		obs::record_request_outcome(stage, VerifyOutcome::Attempt);

		let result = VerifySpan::request(stage)
			.instrument(async {
				let handle = self.http_client.handle();
				let response = handle
					.call(request)
					.await
					.map_err(|e| self.transport_mapper.map_transport_error(stage, e))?;

				decode_response(stage, response)
			})
			.await;

		match &result {
			Ok(_) => obs::record_request_outcome(stage, VerifyOutcome::Success),
			Err(_) => obs::record_request_outcome(stage, VerifyOutcome::Failure),
		}

		result
	}
}

/// Decodes a fully buffered response.
///
/// Only an exact `200 OK` counts as success. Any other status is decoded as the
/// `{"error": {"code", "message"}}` envelope; if that fails, the [`DecodeError`] wins.
pub(crate) fn decode_response<T>(stage: VerifyStage, response: HttpResponse) -> Result<T>
where
	T: DeserializeOwned,
{
	let status = response.status();
	let body = response.into_body();

	if status != StatusCode::OK {
		let envelope: ApiErrorEnvelope = decode_body(stage, status, &body)?;

		return Err(Error::Api { stage, status: status.as_u16(), error: envelope.error });
	}

	Ok(decode_body(stage, status, &body)?)
}

fn decode_body<T>(stage: VerifyStage, status: StatusCode, body: &[u8]) -> Result<T, DecodeError>
where
	T: DeserializeOwned,
{
	let mut de = serde_json::Deserializer::from_slice(body);

	serde_path_to_error::deserialize(&mut de)
		.map_err(|source| DecodeError::new(stage, status.as_u16(), body, source))
}
