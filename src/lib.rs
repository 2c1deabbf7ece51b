//! Rust's OAuth 2.0 sign-in connectors—Auth0, GitHub, and Google Authorization Code
//! adapters behind one capability trait with pluggable transports.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod error;
pub mod http;
pub mod obs;
pub mod provider;
#[cfg(any(test, feature = "test"))]
pub mod _preludet {
	//! Scripted transport and convenience re-exports for tests; enabled via `cfg(test)` or the
	//! `test` crate feature.

	pub use crate::_prelude::*;

	// std
	use std::{collections::VecDeque, sync::Mutex};
	// self
	use crate::http::{HttpTransport, TransportFuture, TransportRequest, TransportResponse};

	/// Scripted outcome replayed by [`MockTransport`] for one request.
	#[derive(Clone, Debug)]
	pub enum MockOutcome {
		/// Resolves the call with the queued status and body.
		Respond(TransportResponse),
		/// Fails the call with the queued transport error text.
		Fail(String),
	}

	/// Scripted transport that replays queued outcomes and records every dispatched request.
	///
	/// Outcomes are consumed front-to-back, one per [`execute`](HttpTransport::execute)
	/// call; running past the script fails the call so tests notice unexpected requests.
	#[derive(Debug, Default)]
	pub struct MockTransport {
		outcomes: Mutex<VecDeque<MockOutcome>>,
		requests: Mutex<Vec<TransportRequest>>,
	}
	impl MockTransport {
		/// Queues a JSON response with the provided status code.
		pub fn with_json(self, status: u16, body: &str) -> Self {
			self.outcomes
				.lock()
				.expect("Mock outcome queue should not be poisoned.")
				.push_back(MockOutcome::Respond(TransportResponse {
					status,
					body: body.as_bytes().to_vec(),
				}));

			self
		}

		/// Queues a transport-level failure carrying the provided message.
		pub fn with_failure(self, message: &str) -> Self {
			self.outcomes
				.lock()
				.expect("Mock outcome queue should not be poisoned.")
				.push_back(MockOutcome::Fail(message.to_owned()));

			self
		}

		/// Requests dispatched through this transport so far.
		pub fn requests(&self) -> Vec<TransportRequest> {
			self.requests.lock().expect("Mock request log should not be poisoned.").clone()
		}

		/// Number of requests dispatched through this transport.
		pub fn request_count(&self) -> usize {
			self.requests.lock().expect("Mock request log should not be poisoned.").len()
		}
	}
	impl HttpTransport for MockTransport {
		fn execute(&self, request: TransportRequest) -> TransportFuture<'_> {
			self.requests.lock().expect("Mock request log should not be poisoned.").push(request);

			let outcome = self
				.outcomes
				.lock()
				.expect("Mock outcome queue should not be poisoned.")
				.pop_front();

			Box::pin(async move {
				match outcome {
					Some(MockOutcome::Respond(response)) => Ok(response),
					Some(MockOutcome::Fail(message)) => Err(message.into()),
					None => Err("mock transport has no scripted response left".into()),
				}
			})
		}
	}
}

mod _prelude {
	pub use std::{
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		sync::Arc,
	};

	pub use async_lock::Mutex as AsyncMutex;
	#[cfg(feature = "reqwest")]
	pub use reqwest::Client as ReqwestClient;
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use serde_json;
pub use url;
#[cfg(test)] use httpmock as _;
