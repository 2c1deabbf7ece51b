//! Anti-forgery state plumbing.

// crates.io
use serde_json::Value;
// self
use crate::_prelude::*;

/// Opaque anti-forgery value round-tripped through the authorization redirect.
///
/// The adapter never inspects or validates the value; it only serializes it as JSON
/// text into the `state` query parameter of the login URL. Detecting forged callbacks
/// with it is the caller's responsibility. An absent value serializes as the literal
/// string `undefined`, which is part of the observable login-URL contract.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StateValue(Option<Value>);
impl StateValue {
	const ABSENT: &'static str = "undefined";

	/// Wraps a caller-supplied JSON value.
	pub fn new(value: Value) -> Self {
		Self(Some(value))
	}

	/// State that was never supplied.
	pub fn absent() -> Self {
		Self(None)
	}

	/// Serializes the value for the `state` query parameter.
	pub fn to_query_value(&self) -> String {
		match &self.0 {
			Some(value) => value.to_string(),
			None => Self::ABSENT.to_owned(),
		}
	}
}
impl From<Value> for StateValue {
	fn from(value: Value) -> Self {
		Self(Some(value))
	}
}
impl From<Option<Value>> for StateValue {
	fn from(value: Option<Value>) -> Self {
		Self(value)
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use serde_json::json;
	// self
	use super::*;

	#[test]
	fn absent_state_serializes_as_undefined() {
		assert_eq!(StateValue::absent().to_query_value(), "undefined");
		assert_eq!(StateValue::from(None::<Value>).to_query_value(), "undefined");
	}

	#[test]
	fn object_state_serializes_as_json_text() {
		let state = StateValue::new(json!({ "nonce": "n1" }));

		assert_eq!(state.to_query_value(), r#"{"nonce":"n1"}"#);
	}

	#[test]
	fn string_state_keeps_json_quoting() {
		let state = StateValue::from(json!("plain"));

		assert_eq!(state.to_query_value(), r#""plain""#);
	}
}
