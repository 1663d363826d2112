//! Purchase lookup inputs and the authoritative purchase record.

pub mod query;
pub mod record;

pub use query::*;
pub use record::*;

// crates.io
use serde::Deserializer;
// self
use crate::_prelude::*;

/// Decodes `null` as the field's default value, matching the storefront's loosely typed payloads.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
	D: Deserializer<'de>,
	T: Default + Deserialize<'de>,
{
	Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
