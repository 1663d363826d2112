//! Identifiers for the purchase-detail lookup.

// self
use crate::_prelude::*;

/// Error returned when a lookup identifier would leave an empty path segment.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
#[error("The {field} must not be empty.")]
pub struct EmptyIdentifier {
	/// Name of the offending identifier.
	pub field: &'static str,
}

/// Package/product/purchase-token triple identifying one purchase.
///
/// Identifiers are passed through as-is and percent-encoded when joined onto the endpoint, so
/// spaces, slashes, and other reserved characters reach the storefront intact.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PurchaseQuery<'a> {
	/// Package the product was sold in.
	pub package_name: &'a str,
	/// Purchased product.
	pub product_id: &'a str,
	/// Token identifying the transaction.
	pub purchase_token: &'a str,
}
impl<'a> PurchaseQuery<'a> {
	/// Bundles the three lookup identifiers, rejecting empty ones.
	pub fn new(
		package_name: &'a str,
		product_id: &'a str,
		purchase_token: &'a str,
	) -> Result<Self, EmptyIdentifier> {
		let fields = [
			("package name", package_name),
			("product id", product_id),
			("purchase token", purchase_token),
		];

		if let Some((field, _)) = fields.into_iter().find(|(_, value)| value.is_empty()) {
			return Err(EmptyIdentifier { field });
		}

		Ok(Self { package_name, product_id, purchase_token })
	}

	/// Path segments below the API base: `v7/apps/{package}/purchases/inapp/products/{product}/{token}`.
	pub(crate) fn path_segments(&self) -> [&'a str; 8] {
		[
			"v7",
			"apps",
			self.package_name,
			"purchases",
			"inapp",
			"products",
			self.product_id,
			self.purchase_token,
		]
	}
}
