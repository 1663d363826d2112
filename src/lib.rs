//! ONE store in-app purchase verification: exchange client credentials for a bearer token,
//! fetch the authoritative purchase record, and surface remote failures as typed errors.
//!
//! ```no_run
//! # async fn run() -> onestore_iap::error::Result<()> {
//! use onestore_iap::verifier::Verifier;
//!
//! let token = "SANDBOX-0f1e2d3c";
//! let verifier = Verifier::new("client-id", "client-secret", token)?;
//! let record = verifier.verify("com.example.game", "gem_pack_100", token).await?;
//!
//! assert!(record.is_purchased());
//! # Ok(())
//! # }
//! ```

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod endpoint;
pub mod error;
pub mod http;
pub mod obs;
pub mod purchase;
pub mod transport;
pub mod verifier;

mod _prelude {
	pub use std::{
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		str::FromStr,
		sync::Arc,
	};

	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

pub use oauth2;
#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(test)] use {color_eyre as _, httpmock as _};
