//! Provider capability trait and the three conforming adapters.
//!
//! `auth0`, `github`, and `google` each implement [`OAuth2Provider`] over the same
//! four-step Authorization Code flow, differing only in endpoint URLs, default
//! scopes, and user-field naming. Adapters share no runtime state; callers compose
//! against the trait (`Arc<dyn OAuth2Provider>`) to swap providers at runtime.

pub mod auth0;
pub mod github;
pub mod google;

pub use auth0::Auth0;
pub use github::Github;
pub use google::Google;

// self
use crate::{
	_prelude::*,
	auth::{TokenSet, UserProfile},
};

/// Boxed future returned by [`OAuth2Provider`] operations.
pub type ProviderFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T>> + 'a + Send>>;

/// Immutable client credentials supplied at adapter construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Credentials {
	/// OAuth application (client) identifier.
	pub client_id: String,
	/// OAuth application (client) secret.
	pub client_secret: String,
	/// Redirect URI registered with the provider, kept opaque.
	pub redirect_uri: String,
}
impl Credentials {
	/// Bundles the application credentials.
	pub fn new(
		client_id: impl Into<String>,
		client_secret: impl Into<String>,
		redirect_uri: impl Into<String>,
	) -> Self {
		Self {
			client_id: client_id.into(),
			client_secret: client_secret.into(),
			redirect_uri: redirect_uri.into(),
		}
	}
}

/// Capability contract shared by every provider adapter.
///
/// The trait is object-safe so callers can hold `Arc<dyn OAuth2Provider>` and select
/// providers at runtime. The four projection methods have provided implementations
/// that delegate to [`user`](Self::user) and never issue requests of their own; they
/// substitute a safe default only when a field is absent from a successful response
/// and propagate failures unchanged.
pub trait OAuth2Provider
where
	Self: Send + Sync,
{
	/// Fixed provider identifier (`auth0`, `github`, or `google`).
	fn name(&self) -> &'static str;

	/// Builds the absolute authorization URL to redirect the user-agent to.
	///
	/// Pure string construction from constructor state; no network call. Query
	/// parameter values are form-urlencoded.
	fn login_url(&self) -> String;

	/// Exchanges an authorization code for a token set.
	///
	/// Issues exactly one `POST` to the provider's token endpoint with an
	/// `authorization_code` grant; the returned set mirrors the response body
	/// field-for-field.
	fn exchange_code<'a>(&'a self, code: &'a str) -> ProviderFuture<'a, TokenSet>;

	/// Exchanges a refresh token for a fresh token set.
	///
	/// When the provider's response omits a new refresh token, the returned set
	/// carries the caller-supplied one forward.
	fn refresh_tokens<'a>(&'a self, refresh_token: &'a str) -> ProviderFuture<'a, TokenSet>;

	/// Fetches the normalized user profile, memoizing it for the instance lifetime.
	///
	/// Concurrent first calls on one instance are serialized; nothing is memoized on
	/// failure.
	fn user<'a>(&'a self, access_token: &'a str) -> ProviderFuture<'a, UserProfile>;

	/// Subject identifier, or an empty string when the provider omitted it.
	fn user_id<'a>(&'a self, access_token: &'a str) -> ProviderFuture<'a, String> {
		Box::pin(async move { Ok(self.user(access_token).await?.id_or_default()) })
	}

	/// Email address, or an empty string when the provider omitted it.
	fn user_email<'a>(&'a self, access_token: &'a str) -> ProviderFuture<'a, String> {
		Box::pin(async move { Ok(self.user(access_token).await?.email_or_default()) })
	}

	/// Email verification flag, defaulting to `false` when the provider omitted it.
	fn is_email_verified<'a>(&'a self, access_token: &'a str) -> ProviderFuture<'a, bool> {
		Box::pin(async move { Ok(self.user(access_token).await?.is_email_verified()) })
	}

	/// Display name, or an empty string when the provider omitted it.
	fn user_name<'a>(&'a self, access_token: &'a str) -> ProviderFuture<'a, String> {
		Box::pin(async move { Ok(self.user(access_token).await?.name_or_default()) })
	}
}

/// Parses an endpoint URL, folding failures into the uniform request error.
pub(crate) fn parse_endpoint(endpoint: &str) -> Result<Url> {
	Url::parse(endpoint).map_err(|e| Error::request(e.to_string()))
}
