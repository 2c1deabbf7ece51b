//! Token endpoint response modeling.

// self
use crate::_prelude::*;

/// Access/refresh token bundle returned by a provider's token endpoint.
///
/// Fields mirror the wire body verbatim; optional fields stay `None` when a provider
/// omits them, and unknown provider extras are ignored.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenSet {
	/// Access token issued by the provider.
	pub access_token: String,
	/// Token type reported by the provider, usually `bearer`.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub token_type: Option<String>,
	/// Access token lifetime in seconds.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub expires_in: Option<u64>,
	/// Refresh token, when the provider issued or rotated one.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub refresh_token: Option<String>,
	/// Granted scope string, when reported.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub scope: Option<String>,
}
impl TokenSet {
	/// Carries the caller's refresh token forward when the response omitted one.
	///
	/// Providers commonly reuse the original refresh token indefinitely instead of
	/// rotating it on every refresh grant.
	pub fn or_refresh_token(mut self, prior: &str) -> Self {
		if self.refresh_token.is_none() {
			self.refresh_token = Some(prior.to_owned());
		}

		self
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn refresh_token_carries_forward_when_absent() {
		let tokens = TokenSet { access_token: "a1".into(), ..Default::default() };
		let tokens = tokens.or_refresh_token("prior");

		assert_eq!(tokens.refresh_token.as_deref(), Some("prior"));
	}

	#[test]
	fn rotated_refresh_token_wins_over_prior() {
		let tokens = TokenSet {
			access_token: "a1".into(),
			refresh_token: Some("rotated".into()),
			..Default::default()
		};
		let tokens = tokens.or_refresh_token("prior");

		assert_eq!(tokens.refresh_token.as_deref(), Some("rotated"));
	}

	#[test]
	fn minimal_body_deserializes_with_optional_fields_absent() {
		let tokens: TokenSet = serde_json::from_str(r#"{"access_token":"a1","extra":"ignored"}"#)
			.expect("Minimal token body should deserialize.");

		assert_eq!(tokens.access_token, "a1");
		assert_eq!(tokens.token_type, None);
		assert_eq!(tokens.expires_in, None);
		assert_eq!(tokens.refresh_token, None);
		assert_eq!(tokens.scope, None);
	}
}
