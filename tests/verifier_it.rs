// std
use std::time::{Duration, Instant};
// crates.io
use httpmock::prelude::*;
// self
use onestore_iap::{
	auth::Credentials,
	endpoint::{Endpoint, Environment},
	error::{Error, TransportError},
	http::{DEFAULT_TIMEOUT, ReqwestHttpClient},
	obs::VerifyStage,
	purchase::{AcknowledgeState, ConsumptionState, PurchaseState},
	reqwest::Client,
	transport::ReqwestTransportErrorMapper,
	url::Url,
	verifier::{ReqwestVerifier, Verifier},
};

const CLIENT_ID: &str = "package";
const CLIENT_SECRET: &str = "client_secret";
const PACKAGE: &str = "com.example.game";
const TOKEN_OK: &str =
	"{\"access_token\":\"tok123\",\"token_type\":\"Bearer\",\"expires_in\":3600}";
const LOOKUP_OK: &str = "{\"purchaseState\":0,\"purchaseId\":\"GPA.abc\",\"consumptionState\":1,\"acknowledgeState\":1,\"quantity\":1,\"purchaseTime\":1700000000000}";

fn build_verifier(server: &MockServer, timeout: Duration) -> ReqwestVerifier {
	let base = Url::parse(&server.base_url()).expect("Mock server URL should parse successfully.");
	let endpoint = Endpoint::with_base_url(Environment::Sandbox, base)
		.expect("Mock endpoint should build successfully.");
	let client = Client::builder()
		.danger_accept_invalid_certs(true)
		.danger_accept_invalid_hostnames(true)
		.timeout(timeout)
		.build()
		.expect("Failed to build insecure Reqwest client for tests.");

	ReqwestVerifier::with_http_client(
		Credentials::new(CLIENT_ID, CLIENT_SECRET),
		endpoint,
		ReqwestHttpClient::with_client(client),
		ReqwestTransportErrorMapper,
	)
}

fn lookup_path(product_id: &str, purchase_token: &str) -> String {
	format!("/v7/apps/{PACKAGE}/purchases/inapp/products/{product_id}/{purchase_token}")
}

#[test]
fn new_selects_environment_from_purchase_token() {
	let sandbox = Verifier::new(CLIENT_ID, CLIENT_SECRET, "SANDBOX-123")
		.expect("Sandbox verifier should build.");
	let production =
		Verifier::new(CLIENT_ID, CLIENT_SECRET, "abc123").expect("Production verifier should build.");
	let misspelled =
		Verifier::new(CLIENT_ID, CLIENT_SECRET, "SANBOX").expect("Misspelled verifier should build.");

	assert_eq!(sandbox.environment(), Environment::Sandbox);
	assert_eq!(sandbox.endpoint().base().as_str(), "https://sbpp.onestore.co.kr/");
	assert_eq!(production.environment(), Environment::Production);
	assert_eq!(production.endpoint().base().as_str(), "https://apis.onestore.co.kr/");
	assert_eq!(misspelled.environment(), Environment::Production);
}

#[tokio::test]
async fn verify_returns_record_using_bearer_token() {
	let server = MockServer::start_async().await;
	let verifier = build_verifier(&server, DEFAULT_TIMEOUT);
	let token_mock = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/v7/oauth/token")
				.header("content-type", "application/x-www-form-urlencoded");
			then.status(200).header("content-type", "application/json").body(TOKEN_OK);
		})
		.await;
	let lookup_mock = server
		.mock_async(|when, then| {
			when.method(GET)
				.path(lookup_path("gem_100", "SANDBOX-123"))
				.header("authorization", "Bearer tok123")
				.header("content-type", "application/json");
			then.status(200).header("content-type", "application/json").body(LOOKUP_OK);
		})
		.await;
	let record = verifier
		.verify(PACKAGE, "gem_100", "SANDBOX-123")
		.await
		.expect("Verification against healthy mocks should succeed.");

	assert_eq!(record.purchase_state, PurchaseState::Purchased);
	assert_eq!(record.purchase_id, "GPA.abc");
	assert_eq!(record.consumption_state, ConsumptionState::Consumed);
	assert_eq!(record.acknowledge_state, AcknowledgeState::Acknowledged);
	assert_eq!(record.quantity, 1);
	assert_eq!(record.purchase_time_millis, 1_700_000_000_000);

	token_mock.assert_async().await;
	lookup_mock.assert_async().await;
}

#[tokio::test]
async fn token_rejection_reports_remote_error_and_skips_lookup() {
	let server = MockServer::start_async().await;
	let verifier = build_verifier(&server, DEFAULT_TIMEOUT);
	let token_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/v7/oauth/token");
			then.status(400)
				.header("content-type", "application/json")
				.body("{\"error\":{\"code\":\"INVALID_CLIENT\",\"message\":\"bad creds\"}}");
		})
		.await;
	let lookup_mock = server
		.mock_async(|when, then| {
			when.method(GET).path(lookup_path("gem_100", "tok-1"));
			then.status(200).body(LOOKUP_OK);
		})
		.await;
	let err = verifier
		.verify(PACKAGE, "gem_100", "tok-1")
		.await
		.expect_err("Rejected credentials should surface to the caller.");
	let rendered = err.to_string();

	assert!(rendered.contains("INVALID_CLIENT"), "Rendered error was `{rendered}`.");
	assert!(rendered.contains("bad creds"), "Rendered error was `{rendered}`.");
	assert!(matches!(err, Error::Api { stage: VerifyStage::TokenExchange, status: 400, .. }));

	token_mock.assert_async().await;
	lookup_mock.assert_calls_async(0).await;
}

#[tokio::test]
async fn lookup_rejection_reports_remote_error() {
	let server = MockServer::start_async().await;
	let verifier = build_verifier(&server, DEFAULT_TIMEOUT);
	let _token_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/v7/oauth/token");
			then.status(200).body(TOKEN_OK);
		})
		.await;
	let _lookup_mock = server
		.mock_async(|when, then| {
			when.method(GET).path(lookup_path("gem_100", "tok-404"));
			then.status(404).body(
				"{\"error\":{\"code\":\"RESULT_NOT_FOUND\",\"message\":\"purchase not found\"}}",
			);
		})
		.await;
	let err = verifier
		.verify(PACKAGE, "gem_100", "tok-404")
		.await
		.expect_err("Unknown purchases should surface to the caller.");
	let api_error = err.api_error().expect("Lookup rejection should carry the remote payload.");

	assert_eq!(api_error.code, "RESULT_NOT_FOUND");
	assert_eq!(api_error.message, "purchase not found");
	assert_eq!(err.stage(), Some(VerifyStage::PurchaseLookup));
}

#[tokio::test]
async fn malformed_error_body_surfaces_decode_error() {
	let server = MockServer::start_async().await;
	let verifier = build_verifier(&server, DEFAULT_TIMEOUT);
	let _token_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/v7/oauth/token");
			then.status(503).header("content-type", "text/html").body("<h1>maintenance</h1>");
		})
		.await;
	let err = verifier
		.verify(PACKAGE, "gem_100", "tok-1")
		.await
		.expect_err("Undecodable error bodies should surface to the caller.");

	match err {
		Error::Decode(decode) => {
			assert_eq!(decode.stage, VerifyStage::TokenExchange);
			assert_eq!(decode.status, 503);
			assert_eq!(decode.body_preview, "<h1>maintenance</h1>");
		},
		other => panic!("Unexpected error variant: {other:?}."),
	}
}

#[tokio::test]
async fn every_verification_reauthenticates() {
	let server = MockServer::start_async().await;
	let verifier = build_verifier(&server, DEFAULT_TIMEOUT);
	let token_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/v7/oauth/token");
			then.status(200).body(TOKEN_OK);
		})
		.await;
	let lookup_mock = server
		.mock_async(|when, then| {
			when.method(GET).path(lookup_path("gem_100", "tok-1"));
			then.status(200).body(LOOKUP_OK);
		})
		.await;

	for _ in 0..2 {
		verifier
			.verify(PACKAGE, "gem_100", "tok-1")
			.await
			.expect("Repeated verification should succeed.");
	}

	token_mock.assert_calls_async(2).await;
	lookup_mock.assert_calls_async(2).await;
}

#[tokio::test]
async fn cancellation_returns_before_the_request_timeout() {
	let server = MockServer::start_async().await;
	let verifier = build_verifier(&server, DEFAULT_TIMEOUT);
	let _token_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/v7/oauth/token");
			then.status(200).body(TOKEN_OK).delay(Duration::from_secs(5));
		})
		.await;
	let started = Instant::now();
	let err = verifier
		.verify_until(tokio::time::sleep(Duration::from_millis(100)), PACKAGE, "gem_100", "tok-1")
		.await
		.expect_err("Cancelled verification should fail.");

	assert!(matches!(err, Error::Cancelled));
	assert!(started.elapsed() < Duration::from_secs(3), "Cancellation must not wait for the mock.");
}

#[tokio::test]
async fn cancellation_aborts_an_in_flight_lookup() {
	let server = MockServer::start_async().await;
	let verifier = build_verifier(&server, DEFAULT_TIMEOUT);
	let token_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/v7/oauth/token");
			then.status(200).body(TOKEN_OK);
		})
		.await;
	let lookup_mock = server
		.mock_async(|when, then| {
			when.method(GET).path(lookup_path("gem_100", "tok-slow"));
			then.status(200).body(LOOKUP_OK).delay(Duration::from_secs(5));
		})
		.await;
	let started = Instant::now();
	let err = verifier
		.verify_until(
			tokio::time::sleep(Duration::from_millis(500)),
			PACKAGE,
			"gem_100",
			"tok-slow",
		)
		.await
		.expect_err("Cancelled verification should fail.");

	assert!(matches!(err, Error::Cancelled));
	assert!(started.elapsed() < Duration::from_secs(3), "Cancellation must not wait for the mock.");

	token_mock.assert_async().await;
	lookup_mock.assert_async().await;
}

#[tokio::test]
async fn request_timeout_surfaces_as_transport_error() {
	let server = MockServer::start_async().await;
	let verifier = build_verifier(&server, Duration::from_millis(200));
	let _token_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/v7/oauth/token");
			then.status(200).body(TOKEN_OK).delay(Duration::from_secs(2));
		})
		.await;
	let err = verifier
		.verify(PACKAGE, "gem_100", "tok-1")
		.await
		.expect_err("Slow token endpoints should time out.");

	assert!(
		matches!(err, Error::Transport(TransportError::Timeout { stage: VerifyStage::TokenExchange, .. })),
		"Unexpected error: {err:?}."
	);
}

#[tokio::test]
async fn unreachable_endpoint_surfaces_as_transport_error() {
	let endpoint = Endpoint::with_base_url(
		Environment::Production,
		Url::parse("http://127.0.0.1:1").expect("Closed-port URL should parse."),
	)
	.expect("Closed-port endpoint should build.");
	let verifier = ReqwestVerifier::with_http_client(
		Credentials::new(CLIENT_ID, CLIENT_SECRET),
		endpoint,
		ReqwestHttpClient::new().expect("Default client should build."),
		ReqwestTransportErrorMapper,
	);
	let err = verifier
		.verify(PACKAGE, "gem_100", "tok-1")
		.await
		.expect_err("Closed ports should fail to connect.");

	assert!(matches!(err, Error::Transport(_)), "Unexpected error: {err:?}.");
	assert_eq!(err.stage(), Some(VerifyStage::TokenExchange));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_verifications_do_not_cross_contaminate() {
	const PRODUCTS: usize = 8;

	let server = MockServer::start_async().await;
	let verifier = build_verifier(&server, DEFAULT_TIMEOUT);
	let token_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/v7/oauth/token");
			then.status(200).body(TOKEN_OK);
		})
		.await;
	let mut lookup_mocks = Vec::with_capacity(PRODUCTS);

	for i in 0..PRODUCTS {
		let mock = server
			.mock_async(|when, then| {
				when.method(GET).path(lookup_path(&format!("gem_{i}"), "tok-shared"));
				then.status(200).body(format!(
					"{{\"purchaseId\":\"GPA.{i}\",\"quantity\":{i},\"purchaseState\":{}}}",
					i % 2
				));
			})
			.await;

		lookup_mocks.push(mock);
	}

	let tasks = (0..PRODUCTS)
		.map(|i| {
			let verifier = verifier.clone();

			tokio::spawn(async move {
				verifier.verify(PACKAGE, &format!("gem_{i}"), "tok-shared").await
			})
		})
		.collect::<Vec<_>>();

	for (i, task) in tasks.into_iter().enumerate() {
		let record = task
			.await
			.expect("Verification task should not panic.")
			.expect("Concurrent verification should succeed.");
		let expected_state =
			if i % 2 == 0 { PurchaseState::Purchased } else { PurchaseState::Canceled };

		assert_eq!(record.purchase_id, format!("GPA.{i}"));
		assert_eq!(record.quantity, i as i32);
		assert_eq!(record.purchase_state, expected_state);
	}

	token_mock.assert_calls_async(PRODUCTS).await;

	for mock in lookup_mocks {
		mock.assert_async().await;
	}
}
