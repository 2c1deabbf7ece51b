//! Scope modeling helpers shared by the adapters.

// self
use crate::_prelude::*;

/// Ordered list of requested OAuth scopes.
///
/// Order is preserved exactly as supplied because it is observable in the login URL.
/// An empty caller-supplied list is replaced with the provider's default set at
/// construction time via [`or_default`](Self::or_default).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScopeList(Vec<String>);
impl ScopeList {
	/// Creates a scope list preserving the caller's ordering.
	pub fn new<I, S>(scopes: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self(scopes.into_iter().map(Into::into).collect())
	}

	/// Substitutes the provider default set when the caller supplied no scopes.
	pub fn or_default(self, defaults: &[&str]) -> Self {
		if self.0.is_empty() { Self::new(defaults.iter().copied()) } else { self }
	}

	/// Returns true when no scopes are present.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Space-joined serialization used in URL and form parameters.
	pub fn join(&self) -> String {
		self.0.join(" ")
	}

	/// Returns the underlying slice of scope strings.
	pub fn as_slice(&self) -> &[String] {
		&self.0
	}
}
impl Display for ScopeList {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(&self.join())
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn scopes_preserve_caller_ordering() {
		let scopes = ScopeList::new(["profile", "openid", "email"]);

		assert_eq!(scopes.join(), "profile openid email");
		assert_eq!(scopes.as_slice(), ["profile", "openid", "email"]);
	}

	#[test]
	fn empty_list_substitutes_defaults() {
		let scopes = ScopeList::new(Vec::<String>::new()).or_default(&["user:email"]);

		assert_eq!(scopes.join(), "user:email");
	}

	#[test]
	fn supplied_list_overrides_defaults() {
		let scopes = ScopeList::new(["read:org"]).or_default(&["user:email"]);

		assert_eq!(scopes.join(), "read:org");
	}
}
