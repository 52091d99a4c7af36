//! # Sentier
//!
//! A client-side fragment router.
//!
//! Sentier maps `/`-separated paths made of literal and `:name` parameter
//! segments to views, rebuilds or updates the view-model bound to the active
//! route, and follows the location as it changes.
//!
//! ## Crates
//!
//! - [`core`]: the [`Signal`](core::Signal) observable that publishes router state
//! - [`conf`]: [`RouterSettings`](conf::RouterSettings) from defaults, TOML and `SENTIER_*` variables
//! - [`router`]: normalization, the route trie, matching, dispatch and navigation
//!
//! ## Quick Example
//!
//! ```rust
//! use sentier::prelude::*;
//! use serde_json::json;
//! use std::rc::Rc;
//!
//! let settings = RouterSettings::load(None).unwrap();
//! let router = Router::with_settings(settings)
//! 	.with_route("/", RouteSpec::fixed("home", json!({ "title": "Home" })))
//! 	.with_route("/posts/:slug", RouteSpec::fixed("post", json!({})))
//! 	.with_route("", RouteSpec::fixed("not-found", json!({})));
//!
//! let location = MemoryLocation::from_url("https://example.com/#/posts/hello");
//! let listener = NavigationListener::new(router.clone(), Rc::new(location.clone()));
//! listener.start().unwrap();
//! assert_eq!(router.active_view().get().unwrap().name, "post");
//!
//! location.set_url("https://example.com/#/nowhere");
//! location.dispatch_pending();
//! assert_eq!(router.active_view().get().unwrap().name, "not-found");
//! assert_eq!(router.visible_path().get(), "/nowhere");
//! ```

pub use sentier_conf as conf;
pub use sentier_core as core;
pub use sentier_router as router;

pub use sentier_conf::{RouterSettings, SettingsError};
pub use sentier_core::Signal;
pub use sentier_router::{
	ActiveView, Location, MemoryLocation, NavigationListener, NotFoundHandler, RouteArgs,
	RouteOutcome, RouteSpec, Router, RouterError, ViewCapabilities, ViewData, ViewError,
	ViewFactory, ViewModel,
};

/// Prelude module for convenient imports
pub mod prelude {
	pub use crate::{RouterSettings, SettingsError, Signal};
	pub use sentier_router::prelude::*;
}

#[cfg(test)]
mod tests {
	use super::prelude::*;
	use rstest::rstest;
	use serde_json::json;

	#[rstest]
	fn test_settings_reach_router() {
		let settings = RouterSettings {
			param_sigil: '$',
			..RouterSettings::default()
		};
		let router = Router::with_settings(settings)
			.with_route("/tags/$tag", RouteSpec::fixed("tag", json!({})));

		let matched = router.match_path("/tags/rust").into_match().unwrap();
		assert_eq!(matched.args().get("tag"), Some("rust"));
		assert_eq!(router.settings().param_sigil, '$');
	}

	#[rstest]
	fn test_undecoded_params() {
		let settings = RouterSettings {
			decode_params: false,
			..RouterSettings::default()
		};
		let router = Router::with_settings(settings)
			.with_route("/q/:term", RouteSpec::fixed("search", json!({})));

		let matched = router.match_path("/q/a%20b").into_match().unwrap();
		assert_eq!(matched.param_values, vec!["a%20b"]);
	}
}
