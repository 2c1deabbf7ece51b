#![cfg(feature = "reqwest")]

// crates.io
use httpmock::prelude::*;
// self
use oauth2_connect::{
	http::{HttpTransport, Method, ReqwestTransport, TransportRequest},
	url::Url,
};

fn url(value: &str) -> Url {
	Url::parse(value).expect("Test URL should parse successfully.")
}

#[tokio::test]
async fn round_trips_success_responses() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/token")
				.header("content-type", "application/x-www-form-urlencoded")
				.body("grant_type=authorization_code&code=c1");
			then.status(200)
				.header("content-type", "application/json")
				.body(r#"{"access_token":"a1"}"#);
		})
		.await;
	let transport = ReqwestTransport::default();
	let response = transport
		.execute(TransportRequest {
			method: Method::Post,
			url: url(&server.url("/token")),
			headers: vec![(
				"Content-Type".to_owned(),
				"application/x-www-form-urlencoded".to_owned(),
			)],
			body: Some("grant_type=authorization_code&code=c1".to_owned()),
		})
		.await
		.expect("Mocked token endpoint should respond.");

	mock.assert_async().await;

	assert_eq!(response.status, 200);
	assert!(response.is_success());
	assert_eq!(response.body, br#"{"access_token":"a1"}"#.to_vec());
}

#[tokio::test]
async fn passes_non_success_statuses_through() {
	let server = MockServer::start_async().await;
	let _mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/user");
			then.status(503).body("upstream unavailable");
		})
		.await;
	let transport = ReqwestTransport::default();
	let response = transport
		.execute(TransportRequest {
			method: Method::Get,
			url: url(&server.url("/user")),
			headers: Vec::new(),
			body: None,
		})
		.await
		.expect("Statuses are data for the transport, not failures.");

	assert_eq!(response.status, 503);
	assert!(!response.is_success());
}

#[tokio::test]
async fn surfaces_connect_failures_as_transport_errors() {
	let transport = ReqwestTransport::default();
	let error = transport
		.execute(TransportRequest {
			method: Method::Get,
			url: url("http://127.0.0.1:9/unreachable"),
			headers: Vec::new(),
			body: None,
		})
		.await
		.expect_err("Nothing listens on the discard port.");

	assert!(!error.to_string().is_empty());
}
