//! Auth0 adapter scoped to one tenant domain.

// self
use crate::{
	_prelude::*,
	auth::{OidcUserinfo, ScopeList, StateValue, TokenSet, UserProfile},
	http::{ApiClient, HttpTransport, form_urlencode},
	obs::FlowKind,
	provider::{self, Credentials, OAuth2Provider, ProviderFuture},
};

const DEFAULT_SCOPES: &[&str] = &["openid", "profile", "email", "offline_access"];

/// Auth0 Authorization Code adapter.
///
/// Endpoints derive from the tenant domain supplied at construction:
/// `https://{domain}/authorize`, `https://{domain}/oauth/token`, and
/// `https://{domain}/userinfo`. Userinfo calls authenticate with a standard
/// `Bearer` header, and the profile maps OIDC claims (`sub` as the identifier).
pub struct Auth0 {
	credentials: Credentials,
	domain: String,
	scopes: ScopeList,
	state: StateValue,
	api: ApiClient,
	user: AsyncMutex<Option<UserProfile>>,
}
impl Auth0 {
	/// Creates an adapter backed by the default reqwest transport.
	///
	/// An empty `scopes` list requests the provider defaults
	/// (`openid profile email offline_access`).
	#[cfg(feature = "reqwest")]
	pub fn new(
		client_id: impl Into<String>,
		client_secret: impl Into<String>,
		redirect_uri: impl Into<String>,
		domain: impl Into<String>,
		scopes: Vec<String>,
		state: impl Into<StateValue>,
	) -> Self {
		Self::with_transport(
			client_id,
			client_secret,
			redirect_uri,
			domain,
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
		domain: impl Into<String>,
		scopes: Vec<String>,
		state: impl Into<StateValue>,
		transport: Arc<dyn HttpTransport>,
	) -> Self {
		Self {
			credentials: Credentials::new(client_id, client_secret, redirect_uri),
			domain: domain.into(),
			scopes: ScopeList::new(scopes).or_default(DEFAULT_SCOPES),
			state: state.into(),
			api: ApiClient::new(transport),
			user: AsyncMutex::new(None),
		}
	}

	fn endpoint(&self, path: &str) -> String {
		format!("https://{}{path}", self.domain)
	}
}
impl Debug for Auth0 {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Auth0")
			.field("client_id", &self.credentials.client_id)
			.field("domain", &self.domain)
			.field("scopes", &self.scopes)
			.finish()
	}
}
impl OAuth2Provider for Auth0 {
	fn name(&self) -> &'static str {
		"auth0"
	}

	fn login_url(&self) -> String {
		let state = self.state.to_query_value();
		let scope = self.scopes.join();
		let query = form_urlencode(&[
			("client_id", &self.credentials.client_id),
			("redirect_uri", &self.credentials.redirect_uri),
			("state", &state),
			("scope", &scope),
			("response_type", "code"),
		]);

		format!("{}?{query}", self.endpoint("/authorize"))
	}

	fn exchange_code<'a>(&'a self, code: &'a str) -> ProviderFuture<'a, TokenSet> {
		Box::pin(async move {
			let url = provider::parse_endpoint(&self.endpoint("/oauth/token"))?;
			let scope = self.scopes.join();

			self.api
				.post_form(FlowKind::Exchange, url, &[
					("code", code),
					("client_id", &self.credentials.client_id),
					("client_secret", &self.credentials.client_secret),
					("redirect_uri", &self.credentials.redirect_uri),
					("scope", &scope),
					("grant_type", "authorization_code"),
				])
				.await
		})
	}

	fn refresh_tokens<'a>(&'a self, refresh_token: &'a str) -> ProviderFuture<'a, TokenSet> {
		Box::pin(async move {
			let url = provider::parse_endpoint(&self.endpoint("/oauth/token"))?;
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

			let url = provider::parse_endpoint(&self.endpoint("/userinfo"))?;
			let headers = vec![("Authorization".to_owned(), format!("Bearer {access_token}"))];
			let claims: OidcUserinfo = self.api.get_json(FlowKind::Userinfo, url, headers).await?;
			let profile = UserProfile::from(claims);

			*cached = Some(profile.clone());

			Ok(profile)
		})
	}
}
