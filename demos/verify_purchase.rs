//! Demonstrates verifying a sandbox purchase with the default reqwest transport against a local
//! mock of the ONE store token and purchase endpoints.

// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
// self
use onestore_iap::{
	auth::Credentials,
	endpoint::{Endpoint, Environment},
	http::ReqwestHttpClient,
	reqwest::Client,
	transport::ReqwestTransportErrorMapper,
	url::Url,
	verifier::ReqwestVerifier,
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let purchase_token = "SANDBOX-demo-0001";
	let server = MockServer::start_async().await;
	let token_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/v7/oauth/token");
			then.status(200).header("content-type", "application/json").body(
				"{\"access_token\":\"demo-access\",\"token_type\":\"Bearer\",\"expires_in\":3600}",
			);
		})
		.await;
	let lookup_mock = server
		.mock_async(|when, then| {
			when.method(GET)
				.path(format!(
					"/v7/apps/com.example.game/purchases/inapp/products/gem_pack_100/{purchase_token}"
				))
				.header("authorization", "Bearer demo-access");
			then.status(200).header("content-type", "application/json").body(
				"{\"purchaseState\":0,\"purchaseId\":\"GPA.demo\",\"consumptionState\":0,\"acknowledgeState\":1,\"quantity\":1,\"purchaseTime\":1700000000000}",
			);
		})
		.await;
	let endpoint = Endpoint::with_base_url(
		Environment::for_purchase_token(purchase_token),
		Url::parse(&server.base_url())?,
	)?;
	let http_client = ReqwestHttpClient::with_client(
		Client::builder()
			.danger_accept_invalid_certs(true)
			.danger_accept_invalid_hostnames(true)
			.build()?,
	);
	let verifier = ReqwestVerifier::with_http_client(
		Credentials::new("demo-client", "super-secret"),
		endpoint,
		http_client,
		ReqwestTransportErrorMapper,
	);
	let record = verifier.verify("com.example.game", "gem_pack_100", purchase_token).await?;

	println!(
		"Purchase {} is purchased: {}, consumed: {}, acknowledged: {}.",
		record.purchase_id,
		record.is_purchased(),
		record.is_consumed(),
		record.is_acknowledged()
	);

	if let Some(purchased_at) = record.purchased_at() {
		println!("Purchased at {purchased_at}.");
	}

	token_mock.assert_async().await;
	lookup_mock.assert_async().await;

	Ok(())
}
