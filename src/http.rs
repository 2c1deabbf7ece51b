//! Transport primitives shared by every provider adapter.
//!
//! [`HttpTransport`] is the crate's only dependency on an HTTP stack: implementations
//! execute one request and resolve with whatever response arrived, leaving status
//! handling to the adapters' shared error translation point. The default
//! [`ReqwestTransport`] sits behind the `reqwest` feature; callers can plug any
//! conforming client through the adapters' `with_transport` constructors.

// crates.io
use serde::de::DeserializeOwned;
use url::form_urlencoded;
// self
use crate::{
	_prelude::*,
	obs::{self, FlowKind, FlowSpan},
};

/// Boxed error surfaced by transports.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;
/// Future returned by [`HttpTransport::execute`].
pub type TransportFuture<'a> =
	Pin<Box<dyn Future<Output = std::result::Result<TransportResponse, BoxError>> + 'a + Send>>;

/// HTTP methods issued by the adapters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
	/// `GET`.
	Get,
	/// `POST`.
	Post,
}
impl Method {
	/// Returns a stable method label.
	pub const fn as_str(self) -> &'static str {
		match self {
			Method::Get => "GET",
			Method::Post => "POST",
		}
	}
}
impl Display for Method {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// One outbound HTTP request handed to a transport.
#[derive(Clone, Debug)]
pub struct TransportRequest {
	/// HTTP method.
	pub method: Method,
	/// Absolute request URL.
	pub url: Url,
	/// Header name/value pairs, applied in order.
	pub headers: Vec<(String, String)>,
	/// Request body, when present.
	pub body: Option<String>,
}
impl TransportRequest {
	/// Returns the first header value matching `name`, compared case-insensitively.
	pub fn header(&self, name: &str) -> Option<&str> {
		self.headers
			.iter()
			.find(|(candidate, _)| candidate.eq_ignore_ascii_case(name))
			.map(|(_, value)| value.as_str())
	}
}

/// Raw response produced by a transport.
#[derive(Clone, Debug)]
pub struct TransportResponse {
	/// HTTP status code.
	pub status: u16,
	/// Response body bytes.
	pub body: Vec<u8>,
}
impl TransportResponse {
	/// Returns true for 2xx statuses.
	pub fn is_success(&self) -> bool {
		(200..300).contains(&self.status)
	}
}

/// Abstraction over HTTP stacks capable of executing adapter requests.
///
/// Implementations resolve with `Ok` for any response that arrived regardless of its
/// status code and with `Err` only for transport-level failures (DNS, TCP, TLS,
/// timeout). Implementations must be `Send + Sync` so adapters can be shared across
/// tasks behind `Arc<dyn HttpTransport>`.
pub trait HttpTransport
where
	Self: Send + Sync,
{
	/// Executes one HTTP request.
	fn execute(&self, request: TransportRequest) -> TransportFuture<'_>;
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
///
/// Timeouts, redirects, proxies, and TLS configuration belong to the wrapped client;
/// the adapters impose none of their own.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug, Default)]
pub struct ReqwestTransport(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestTransport {
	/// Wraps an existing [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}
}
#[cfg(feature = "reqwest")]
impl HttpTransport for ReqwestTransport {
	fn execute(&self, request: TransportRequest) -> TransportFuture<'_> {
		let client = self.0.clone();

		Box::pin(async move {
			let method = match request.method {
				Method::Get => reqwest::Method::GET,
				Method::Post => reqwest::Method::POST,
			};
			let mut builder = client.request(method, request.url);

			for (name, value) in &request.headers {
				builder = builder.header(name.as_str(), value.as_str());
			}
			if let Some(body) = request.body {
				builder = builder.body(body);
			}

			let response = builder.send().await.map_err(BoxError::from)?;
			let status = response.status().as_u16();
			let body = response.bytes().await.map_err(BoxError::from)?.to_vec();

			Ok(TransportResponse { status, body })
		})
	}
}

/// Shared request helper funneling every provider call through one error translation
/// point.
///
/// Transport failures, non-2xx statuses, and undecodable bodies all fold into
/// [`Error::Request`]; raw transport error types never leak past this boundary.
#[derive(Clone)]
pub(crate) struct ApiClient {
	transport: Arc<dyn HttpTransport>,
}
impl ApiClient {
	pub(crate) fn new(transport: Arc<dyn HttpTransport>) -> Self {
		Self { transport }
	}

	/// POSTs a form-urlencoded body to `url` and decodes the JSON response.
	pub(crate) async fn post_form<T>(
		&self,
		kind: FlowKind,
		url: Url,
		form: &[(&str, &str)],
	) -> Result<T>
	where
		T: DeserializeOwned,
	{
		let request = TransportRequest {
			method: Method::Post,
			url,
			headers: vec![
				("Content-Type".into(), "application/x-www-form-urlencoded".into()),
				("Accept".into(), "application/json".into()),
			],
			body: Some(form_urlencode(form)),
		};

		self.json(kind, request).await
	}

	/// GETs `url` with the provided headers and decodes the JSON response.
	pub(crate) async fn get_json<T>(
		&self,
		kind: FlowKind,
		url: Url,
		headers: Vec<(String, String)>,
	) -> Result<T>
	where
		T: DeserializeOwned,
	{
		let request = TransportRequest { method: Method::Get, url, headers, body: None };

		self.json(kind, request).await
	}

	async fn json<T>(&self, kind: FlowKind, request: TransportRequest) -> Result<T>
	where
		T: DeserializeOwned,
	{
		let response = self.send(kind, request).await?;
		let mut deserializer = serde_json::Deserializer::from_slice(&response.body);

		serde_path_to_error::deserialize(&mut deserializer)
			.map_err(|e| Error::request(e.to_string()))
	}

	async fn send(&self, kind: FlowKind, request: TransportRequest) -> Result<TransportResponse> {
		let span = FlowSpan::new(kind, request.method.as_str());
		let response = match span.instrument(self.transport.execute(request)).await {
			Ok(response) => response,
			Err(e) => {
				obs::flow_failure(kind, None);

				return Err(Error::request(e.to_string()));
			},
		};

		if !response.is_success() {
			obs::flow_failure(kind, Some(response.status));

			return Err(Error::request(format!(
				"Request failed with status code {}",
				response.status
			)));
		}

		Ok(response)
	}
}

/// Serializes key/value pairs as `application/x-www-form-urlencoded` text.
///
/// Spaces become `+` and reserved characters are percent-encoded, matching standard
/// query-string escaping. Pair order is preserved because it is observable in login
/// URLs.
pub fn form_urlencode(pairs: &[(&str, &str)]) -> String {
	let mut serializer = form_urlencoded::Serializer::new(String::new());

	for (key, value) in pairs {
		serializer.append_pair(key, value);
	}

	serializer.finish()
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::_preludet::MockTransport;

	#[derive(Debug, Deserialize, PartialEq, Eq)]
	struct Payload {
		value: String,
	}

	fn url(value: &str) -> Url {
		Url::parse(value).expect("Test URL should parse successfully.")
	}

	#[test]
	fn form_urlencode_matches_query_string_escaping() {
		let encoded = form_urlencode(&[
			("scope", "user:email"),
			("redirect_uri", "https://cb"),
			("state", "a b"),
		]);

		assert_eq!(encoded, "scope=user%3Aemail&redirect_uri=https%3A%2F%2Fcb&state=a+b");
	}

	#[tokio::test]
	async fn post_form_sends_urlencoded_body_and_decodes_json() {
		let transport = Arc::new(MockTransport::default().with_json(200, r#"{"value":"ok"}"#));
		let handle: Arc<dyn HttpTransport> = transport.clone();
		let client = ApiClient::new(handle);
		let decoded: Payload = client
			.post_form(FlowKind::Exchange, url("https://example.com/token"), &[("code", "c1")])
			.await
			.expect("Scripted exchange should succeed.");

		assert_eq!(decoded, Payload { value: "ok".into() });

		let requests = transport.requests();

		assert_eq!(requests.len(), 1);
		assert_eq!(requests[0].method, Method::Post);
		assert_eq!(requests[0].header("content-type"), Some("application/x-www-form-urlencoded"));
		assert_eq!(requests[0].header("accept"), Some("application/json"));
		assert_eq!(requests[0].body.as_deref(), Some("code=c1"));
	}

	#[tokio::test]
	async fn non_success_status_wraps_into_request_error() {
		let transport = Arc::new(MockTransport::default().with_json(502, "bad gateway"));
		let handle: Arc<dyn HttpTransport> = transport.clone();
		let client = ApiClient::new(handle);
		let error = client
			.get_json::<Payload>(FlowKind::Userinfo, url("https://example.com/user"), Vec::new())
			.await
			.expect_err("Non-2xx statuses must fail.");

		assert!(error.to_string().contains("Request failed with status code 502"));
	}

	#[tokio::test]
	async fn transport_failure_wraps_into_request_error() {
		let transport = Arc::new(MockTransport::default().with_failure("connection reset by peer"));
		let handle: Arc<dyn HttpTransport> = transport.clone();
		let client = ApiClient::new(handle);
		let error = client
			.get_json::<Payload>(FlowKind::Userinfo, url("https://example.com/user"), Vec::new())
			.await
			.expect_err("Transport failures must surface.");

		assert!(error.to_string().starts_with("Failed to make a request:"));
		assert!(error.to_string().contains("connection reset by peer"));
	}

	#[tokio::test]
	async fn undecodable_body_wraps_into_request_error() {
		let transport = Arc::new(MockTransport::default().with_json(200, "not json"));
		let handle: Arc<dyn HttpTransport> = transport.clone();
		let client = ApiClient::new(handle);
		let error = client
			.get_json::<Payload>(FlowKind::Userinfo, url("https://example.com/user"), Vec::new())
			.await
			.expect_err("Undecodable bodies must fail.");

		assert!(error.to_string().starts_with("Failed to make a request:"));
	}
}
