//! Error types for routing.
//!
//! A path that matches nothing and a route superseded by a nested one are not
//! errors; they are reported through [`RouteOutcome`](crate::RouteOutcome).

/// Error type for typed parameter extraction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
	/// The matched route declares no parameter with this name.
	#[error("Missing parameter: {0}")]
	Missing(String),
	/// Failed to parse a parameter value.
	#[error("Failed to parse parameter '{param}' value '{raw_value}' as {param_type}: {reason}")]
	ParseError {
		/// Parameter name.
		param: String,
		/// Expected type name.
		param_type: &'static str,
		/// Raw string value that failed to parse.
		raw_value: String,
		/// Error message from parsing.
		reason: String,
	},
}

/// Error raised by a view-model factory or by a view-model callback.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ViewError {
	/// The factory could not build a view-model.
	#[error("View-model construction failed: {0}")]
	Construction(String),
	/// `args_changed` or `before_leave` failed.
	#[error("View-model callback failed: {0}")]
	Callback(String),
}

/// Error type for router operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouterError {
	/// A view-model failed; the previously active view is left in place.
	#[error(transparent)]
	View(#[from] ViewError),
	/// Not-found fallbacks nested deeper than the configured limit.
	#[error("Not-found fallback loop while routing {path} (depth {depth})")]
	FallbackLoop {
		/// Path whose fallback tripped the limit.
		path: String,
		/// Nesting depth reached.
		depth: usize,
	},
	/// `navigate` was called on a router with no location attached.
	#[error("No location attached to the router")]
	NoLocation,
	/// The environment refused to change its location.
	#[error("Navigation failed: {0}")]
	NavigationFailed(String),
	/// Path parameter extraction failed.
	#[error("Path extraction error: {0}")]
	PathExtraction(#[from] PathError),
}
