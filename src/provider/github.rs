//! GitHub adapter, including the secondary verified-email lookup.

// self
use crate::{
	_prelude::*,
	auth::{ScopeList, StateValue, TokenSet, UserProfile},
	http::{ApiClient, HttpTransport, form_urlencode},
	obs::FlowKind,
	provider::{self, Credentials, OAuth2Provider, ProviderFuture},
};

const AUTHORIZE_ENDPOINT: &str = "https://github.com/login/oauth/authorize";
const TOKEN_ENDPOINT: &str = "https://github.com/login/oauth/access_token";
const USER_ENDPOINT: &str = "https://api.github.com/user";
const USER_EMAILS_ENDPOINT: &str = "https://api.github.com/user/emails";

const DEFAULT_SCOPES: &[&str] = &["user:email"];

/// GitHub Authorization Code adapter.
///
/// GitHub departs from the standard flow in three ways: the login URL omits
/// `response_type`, userinfo calls authenticate with the `token` header scheme, and
/// the profile requires a second call to `/user/emails` because the primary profile
/// does not carry a verification flag. The first registered email marked verified
/// overrides the primary email/verified fields; with none, the primary fields stand.
pub struct Github {
	credentials: Credentials,
	scopes: ScopeList,
	state: StateValue,
	api: ApiClient,
	user: AsyncMutex<Option<UserProfile>>,
}
impl Github {
	/// Creates an adapter backed by the default reqwest transport.
	///
	/// An empty `scopes` list requests the provider default (`user:email`).
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

	fn auth_header(access_token: &str) -> Vec<(String, String)> {
		vec![("Authorization".to_owned(), format!("token {access_token}"))]
	}
}
impl Debug for Github {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Github")
			.field("client_id", &self.credentials.client_id)
			.field("scopes", &self.scopes)
			.finish()
	}
}
impl OAuth2Provider for Github {
	fn name(&self) -> &'static str {
		"github"
	}

	fn login_url(&self) -> String {
		let state = self.state.to_query_value();
		let scope = self.scopes.join();
		let query = form_urlencode(&[
			("client_id", &self.credentials.client_id),
			("redirect_uri", &self.credentials.redirect_uri),
			("scope", &scope),
			("state", &state),
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

			let account: GithubAccount = self
				.api
				.get_json(
					FlowKind::Userinfo,
					provider::parse_endpoint(USER_ENDPOINT)?,
					Self::auth_header(access_token),
				)
				.await?;
			let emails: Vec<GithubEmail> = self
				.api
				.get_json(
					FlowKind::Userinfo,
					provider::parse_endpoint(USER_EMAILS_ENDPOINT)?,
					Self::auth_header(access_token),
				)
				.await?;
			let mut profile = UserProfile::from(account);

			if let Some(verified) = emails.into_iter().find(|entry| entry.verified) {
				profile.email = Some(verified.email);
				profile.email_verified = Some(true);
			}

			*cached = Some(profile.clone());

			Ok(profile)
		})
	}
}

/// Primary `/user` response; GitHub exposes a numeric account id and no verification
/// flag there.
#[derive(Debug, Deserialize)]
struct GithubAccount {
	#[serde(default)]
	id: Option<u64>,
	#[serde(default)]
	email: Option<String>,
	#[serde(default)]
	name: Option<String>,
}
impl From<GithubAccount> for UserProfile {
	fn from(account: GithubAccount) -> Self {
		Self {
			id: account.id.map(|id| id.to_string()),
			email: account.email,
			email_verified: None,
			name: account.name,
		}
	}
}

/// One entry of the `/user/emails` listing.
#[derive(Debug, Deserialize)]
struct GithubEmail {
	email: String,
	#[serde(default)]
	verified: bool,
}
