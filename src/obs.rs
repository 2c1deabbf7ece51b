//! Optional observability helpers for adapter flows.
//!
//! Enable the `tracing` feature to emit structured spans named `oauth2_connect.flow`
//! with `flow` (operation) and `method` fields around every outbound provider request,
//! plus warn-level events for failed flows. Without the feature every helper compiles
//! to a no-op.

// self
use crate::_prelude::*;

/// Outbound flow kinds observed by the adapters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FlowKind {
	/// Authorization code exchange against the token endpoint.
	Exchange,
	/// Refresh token grant against the token endpoint.
	Refresh,
	/// Userinfo retrieval.
	Userinfo,
}
impl FlowKind {
	/// Returns a stable label suitable for span fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			FlowKind::Exchange => "exchange",
			FlowKind::Refresh => "refresh",
			FlowKind::Userinfo => "userinfo",
		}
	}
}
impl Display for FlowKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Type alias that resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub type InstrumentedFlow<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedFlow<F> = F;

/// A span builder used around outbound provider requests.
#[derive(Clone, Debug)]
pub struct FlowSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl FlowSpan {
	/// Creates a new span tagged with the provided flow kind + HTTP method.
	pub fn new(kind: FlowKind, method: &'static str) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!("oauth2_connect.flow", flow = kind.as_str(), method);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (kind, method);

			Self {}
		}
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedFlow<Fut>
	where
		Fut: Future,
	{
		#[cfg(feature = "tracing")]
		{
			use tracing::Instrument;

			fut.instrument(self.span.clone())
		}
		#[cfg(not(feature = "tracing"))]
		{
			fut
		}
	}
}

/// Records a failed flow, with the HTTP status when one arrived.
pub fn flow_failure(kind: FlowKind, status: Option<u16>) {
	#[cfg(feature = "tracing")]
	tracing::warn!(flow = kind.as_str(), status, "Provider request failed.");
	#[cfg(not(feature = "tracing"))]
	let _ = (kind, status);
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn flow_kind_labels_are_stable() {
		assert_eq!(FlowKind::Exchange.as_str(), "exchange");
		assert_eq!(FlowKind::Refresh.as_str(), "refresh");
		assert_eq!(FlowKind::Userinfo.as_str(), "userinfo");
	}

	#[tokio::test]
	async fn instrument_wraps_future() {
		let span = FlowSpan::new(FlowKind::Userinfo, "GET");
		let value = span.instrument(async { 42 }).await;

		assert_eq!(value, 42);
	}
}
