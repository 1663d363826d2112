//! Purchase record returned by the purchase-detail endpoint.

// self
use crate::{_prelude::*, purchase::null_as_default};

/// Integer-coded state field. Values outside the documented set decode into `Unknown` so a
/// newer storefront state never fails the lookup.
macro_rules! def_state {
	(
		$(#[$meta:meta])*
		$name:ident {
			$($(#[$variant_meta:meta])* $variant:ident = $value:literal,)+
		}
	) => {
		$(#[$meta])*
		#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
		#[serde(from = "i32", into = "i32")]
		pub enum $name {
			$($(#[$variant_meta])* $variant,)+
			/// Value not documented by the storefront, kept as received.
			Unknown(i32),
		}
		impl Default for $name {
			fn default() -> Self {
				Self::from(0)
			}
		}
		impl From<i32> for $name {
			fn from(value: i32) -> Self {
				match value {
					$($value => Self::$variant,)+
					other => Self::Unknown(other),
				}
			}
		}
		impl From<$name> for i32 {
			fn from(value: $name) -> Self {
				match value {
					$($name::$variant => $value,)+
					$name::Unknown(other) => other,
				}
			}
		}
	};
}

def_state! {
	/// Consumption status of the purchased product.
	ConsumptionState {
		/// Not consumed yet.
		NotConsumed = 0,
		/// Consumed.
		Consumed = 1,
	}
}

def_state! {
	/// Purchase state of the order.
	PurchaseState {
		/// Purchase completed.
		Purchased = 0,
		/// Purchase canceled.
		Canceled = 1,
	}
}

def_state! {
	/// Acknowledgement state of the in-app product.
	AcknowledgeState {
		/// Yet to be acknowledged.
		Unacknowledged = 0,
		/// Acknowledged.
		Acknowledged = 1,
	}
}

/// Authoritative purchase record for a package/product/purchase-token triple.
///
/// Decoding is permissive: unknown fields are ignored and missing or `null` fields fall back to
/// their zero value.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseRecord {
	/// Consumption status.
	#[serde(default, deserialize_with = "null_as_default")]
	pub consumption_state: ConsumptionState,
	/// Payment identifier supplied by the developer at purchase time.
	#[serde(default, deserialize_with = "null_as_default")]
	pub developer_payload: String,
	/// Purchase status.
	#[serde(default, deserialize_with = "null_as_default")]
	pub purchase_state: PurchaseState,
	/// Purchase time in milliseconds since the Unix epoch.
	#[serde(rename = "purchaseTime", default, deserialize_with = "null_as_default")]
	pub purchase_time_millis: i64,
	/// Storefront purchase identifier.
	#[serde(default, deserialize_with = "null_as_default")]
	pub purchase_id: String,
	/// Acknowledgement status.
	#[serde(default, deserialize_with = "null_as_default")]
	pub acknowledge_state: AcknowledgeState,
	/// Purchased quantity.
	#[serde(default, deserialize_with = "null_as_default")]
	pub quantity: i32,
}
impl PurchaseRecord {
	/// Whether the order completed and was not canceled.
	pub fn is_purchased(&self) -> bool {
		self.purchase_state == PurchaseState::Purchased
	}

	/// Whether the product has been consumed.
	pub fn is_consumed(&self) -> bool {
		self.consumption_state == ConsumptionState::Consumed
	}

	/// Whether the purchase has been acknowledged.
	pub fn is_acknowledged(&self) -> bool {
		self.acknowledge_state == AcknowledgeState::Acknowledged
	}

	/// Purchase instant, or `None` when the timestamp is outside the supported range.
	pub fn purchased_at(&self) -> Option<OffsetDateTime> {
		let nanos = i128::from(self.purchase_time_millis) * 1_000_000;

		OffsetDateTime::from_unix_timestamp_nanos(nanos).ok()
	}
}
