//! Normalized user profile modeling.

// self
use crate::_prelude::*;

/// Normalized identity fields extracted from a provider's userinfo response.
///
/// Field presence varies per provider; the accessor helpers substitute safe defaults
/// for fields legitimately absent from an otherwise successful response.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
	/// Provider-scoped subject identifier.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub id: Option<String>,
	/// Primary email address.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub email: Option<String>,
	/// Whether the provider reports the email as verified.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub email_verified: Option<bool>,
	/// Display name.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
}
impl UserProfile {
	/// Subject identifier, or an empty string when absent.
	pub fn id_or_default(&self) -> String {
		self.id.clone().unwrap_or_default()
	}

	/// Email address, or an empty string when absent.
	pub fn email_or_default(&self) -> String {
		self.email.clone().unwrap_or_default()
	}

	/// Verified flag, defaulting to `false` when the provider omitted it.
	pub fn is_email_verified(&self) -> bool {
		self.email_verified.unwrap_or_default()
	}

	/// Display name, or an empty string when absent.
	pub fn name_or_default(&self) -> String {
		self.name.clone().unwrap_or_default()
	}
}

/// Standard OIDC userinfo claims shared by the Auth0 and Google adapters.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct OidcUserinfo {
	/// Subject identifier claim.
	#[serde(default)]
	pub sub: Option<String>,
	/// Primary email claim.
	#[serde(default)]
	pub email: Option<String>,
	/// Email verification claim.
	#[serde(default)]
	pub email_verified: Option<bool>,
	/// Display name claim.
	#[serde(default)]
	pub name: Option<String>,
}
impl From<OidcUserinfo> for UserProfile {
	fn from(claims: OidcUserinfo) -> Self {
		Self {
			id: claims.sub,
			email: claims.email,
			email_verified: claims.email_verified,
			name: claims.name,
		}
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn accessors_substitute_safe_defaults() {
		let profile = UserProfile::default();

		assert_eq!(profile.id_or_default(), "");
		assert_eq!(profile.email_or_default(), "");
		assert!(!profile.is_email_verified());
		assert_eq!(profile.name_or_default(), "");
	}

	#[test]
	fn oidc_claims_normalize_sub_into_id() {
		let claims: OidcUserinfo = serde_json::from_str(
			r#"{"sub":"auth0|42","email":"user@example.com","email_verified":true,"name":"User"}"#,
		)
		.expect("OIDC claims should deserialize.");
		let profile = UserProfile::from(claims);

		assert_eq!(profile.id.as_deref(), Some("auth0|42"));
		assert_eq!(profile.email.as_deref(), Some("user@example.com"));
		assert_eq!(profile.email_verified, Some(true));
		assert_eq!(profile.name.as_deref(), Some("User"));
	}
}
