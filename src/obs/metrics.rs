// self
use crate::{
	endpoint::Environment,
	obs::{VerifyOutcome, VerifyStage},
};

/// Records a verification outcome via the global metrics recorder (when enabled).
pub fn record_verify_outcome(environment: Environment, outcome: VerifyOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"onestore_iap_verify_total",
			"environment" => environment.as_str(),
			"outcome" => outcome.as_str()
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (environment, outcome);
	}
}

/// Records the outcome of a single outbound call (when enabled).
pub fn record_request_outcome(stage: VerifyStage, outcome: VerifyOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"onestore_iap_request_total",
			"stage" => stage.as_str(),
			"outcome" => outcome.as_str()
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (stage, outcome);
	}
}
