//! Adapter-level error types shared across providers.

// self
use crate::_prelude::*;

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Canonical adapter error exposed by public APIs.
///
/// Every transport failure, non-success provider status, and undecodable response body
/// folds into the single [`Request`](Self::Request) kind, so raw transport error types
/// never cross the adapter boundary. The message embeds the upstream failure's text.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Outbound call to a provider endpoint failed.
	#[error("Failed to make a request: {message}")]
	Request {
		/// Upstream failure text (transport error, HTTP status, or decode failure).
		message: String,
	},
}
impl Error {
	/// Wraps an upstream failure's text into [`Error::Request`].
	pub fn request(message: impl Into<String>) -> Self {
		Self::Request { message: message.into() }
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn request_error_embeds_upstream_text() {
		let error = Error::request("connection reset by peer");

		assert_eq!(error.to_string(), "Failed to make a request: connection reset by peer");
	}
}
