// self
use crate::{_prelude::*, endpoint::Environment, obs::VerifyStage};

/// Type alias that resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub type InstrumentedVerify<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedVerify<F> = F;

/// A span builder used by the verifier.
#[derive(Clone, Debug)]
pub struct VerifySpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl VerifySpan {
	/// Creates a span covering a whole verification against `environment`.
	pub fn new(environment: Environment) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!("onestore_iap.verify", environment = environment.as_str());

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = environment;

			Self {}
		}
	}

	/// Creates a span covering one outbound call.
	pub fn request(stage: VerifyStage) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::debug_span!("onestore_iap.request", stage = stage.as_str());

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = stage;

			Self {}
		}
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedVerify<Fut>
	where
		Fut: Future,
	{
		#[cfg(feature = "tracing")]
		{
			use tracing::Instrument;

			fut.instrument(self.span.clone())
		}
		#[cfg(not(feature = "tracing"))]
		{
			fut
		}
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[tokio::test]
	async fn instrument_wraps_future() {
		let span = VerifySpan::new(Environment::Sandbox);
		let value = span.instrument(async { 42 }).await;

		assert_eq!(value, 42);

		let value = VerifySpan::request(VerifyStage::TokenExchange).instrument(async { 7 }).await;

		assert_eq!(value, 7);
	}
}
