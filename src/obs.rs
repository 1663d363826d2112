//! Optional observability helpers for purchase verification.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `onestore_iap.verify` (field `environment`)
//!   around every verification and `onestore_iap.request` (field `stage`) around each outbound
//!   call.
//! - Enable `metrics` to increment the `onestore_iap_verify_total` counter, labeled by
//!   `environment` + `outcome`, and the `onestore_iap_request_total` counter, labeled by `stage` +
//!   `outcome`.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Outbound calls issued during a single verification.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VerifyStage {
	/// `POST /v7/oauth/token` client-credentials exchange.
	TokenExchange,
	/// `GET /v7/apps/{package}/purchases/inapp/products/{product}/{token}` lookup.
	PurchaseLookup,
}
impl VerifyStage {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			VerifyStage::TokenExchange => "token_exchange",
			VerifyStage::PurchaseLookup => "purchase_lookup",
		}
	}
}
impl Display for VerifyStage {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VerifyOutcome {
	/// Entry to a verifier helper.
	Attempt,
	/// Successful completion.
	Success,
	/// Failure propagated back to the caller.
	Failure,
	/// The caller's cancellation signal fired first.
	Cancelled,
}
impl VerifyOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			VerifyOutcome::Attempt => "attempt",
			VerifyOutcome::Success => "success",
			VerifyOutcome::Failure => "failure",
			VerifyOutcome::Cancelled => "cancelled",
		}
	}
}
impl Display for VerifyOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
