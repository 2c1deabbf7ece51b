//! Google adapter using the v3 userinfo endpoint.

// self
use crate::{
	_prelude::*,
	auth::{OidcUserinfo, ScopeList, StateValue, TokenSet, UserProfile},
	http::{ApiClient, HttpTransport, form_urlencode},
	obs::FlowKind,
	provider::{self, Credentials, OAuth2Provider, ProviderFuture},
};

const AUTHORIZE_ENDPOINT: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const TOKEN_ENDPOINT: &str = "https://oauth2.googleapis.com/token";
const USERINFO_ENDPOINT: &str = "https://www.googleapis.com/oauth2/v3/userinfo";

const DEFAULT_SCOPES: &[&str] = &[
	"https://www.googleapis.com/auth/userinfo.email",
	"https://www.googleapis.com/auth/userinfo.profile",
	"openid",
];

/// Google Authorization Code adapter.
///
/// Code exchanges send an empty `scope` form field (Google ignores it there), and
/// userinfo calls pass the access token as an `access_token` query parameter instead
/// of an `Authorization` header. The profile maps OIDC claims (`sub` as the
/// identifier).
pub struct Google {
	credentials: Credentials,
	scopes: ScopeList,
	state: StateValue,
	api: ApiClient,
	user: AsyncMutex<Option<UserProfile>>,
}
impl Google {
	/// Creates an adapter backed by the default reqwest transport.
	///
	/// An empty `scopes` list requests the provider defaults (userinfo email +
	/// profile and `openid`).
	#[cfg(feature = "reqwest")]
	pub fn new(
		client_id: impl Into<String>,
		client_secret: impl Into<String>,
		redirect_uri: impl Into<String>,
		scopes: Vec<String>,
		state: impl Into<StateValue>,
	) -> Self {
		Self::with_transport(
			client_id,
			client_secret,
			redirect_uri,
			scopes,
			state,
			Arc::new(crate::http::ReqwestTransport::default()),
		)
	}

	/// Creates an adapter that reuses a caller-provided transport.
	pub fn with_transport(
		client_id: impl Into<String>,
		client_secret: impl Into<String>,
		redirect_uri: impl Into<String>,
		scopes: Vec<String>,
		state: impl Into<StateValue>,
		transport: Arc<dyn HttpTransport>,
	) -> Self {
		Self {
			credentials: Credentials::new(client_id, client_secret, redirect_uri),
			scopes: ScopeList::new(scopes).or_default(DEFAULT_SCOPES),
			state: state.into(),
			api: ApiClient::new(transport),
			user: AsyncMutex::new(None),
		}
	}
}
impl Debug for Google {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Google")
			.field("client_id", &self.credentials.client_id)
			.field("scopes", &self.scopes)
			.finish()
	}
}
impl OAuth2Provider for Google {
	fn name(&self) -> &'static str {
		"google"
	}

	fn login_url(&self) -> String {
		let state = self.state.to_query_value();
		let scope = self.scopes.join();
		let query = form_urlencode(&[
			("client_id", &self.credentials.client_id),
			("redirect_uri", &self.credentials.redirect_uri),
			("scope", &scope),
			("state", &state),
			("response_type", "code"),
		]);

		format!("{AUTHORIZE_ENDPOINT}?{query}")
	}

	fn exchange_code<'a>(&'a self, code: &'a str) -> ProviderFuture<'a, TokenSet> {
		Box::pin(async move {
			let url = provider::parse_endpoint(TOKEN_ENDPOINT)?;

			self.api
				.post_form(FlowKind::Exchange, url, &[
					("code", code),
					("client_id", &self.credentials.client_id),
					("client_secret", &self.credentials.client_secret),
					("redirect_uri", &self.credentials.redirect_uri),
					("scope", ""),
					("grant_type", "authorization_code"),
				])
				.await
		})
	}

	fn refresh_tokens<'a>(&'a self, refresh_token: &'a str) -> ProviderFuture<'a, TokenSet> {
		Box::pin(async move {
			let url = provider::parse_endpoint(TOKEN_ENDPOINT)?;
			let tokens: TokenSet = self
				.api
				.post_form(FlowKind::Refresh, url, &[
					("refresh_token", refresh_token),
					("client_id", &self.credentials.client_id),
					("client_secret", &self.credentials.client_secret),
					("grant_type", "refresh_token"),
				])
				.await?;

			Ok(tokens.or_refresh_token(refresh_token))
		})
	}

	fn user<'a>(&'a self, access_token: &'a str) -> ProviderFuture<'a, UserProfile> {
		Box::pin(async move {
			let mut cached = self.user.lock().await;

			if let Some(profile) = cached.as_ref() {
				return Ok(profile.clone());
			}

			let mut url = provider::parse_endpoint(USERINFO_ENDPOINT)?;

			url.query_pairs_mut().append_pair("access_token", access_token);

			let claims: OidcUserinfo =
				self.api.get_json(FlowKind::Userinfo, url, Vec::new()).await?;
			let profile = UserProfile::from(claims);

			*cached = Some(profile.clone());

			Ok(profile)
		})
	}
}
