//! Client-side fragment router.
//!
//! Routes are registered as patterns made of literal segments and `:name`
//! parameter segments. A [`Router`] matches paths against them, builds
//! view-models through [`ViewFactory`] and publishes the resulting
//! [`ActiveView`] through a [`Signal`](sentier_core::Signal). A
//! [`NavigationListener`] keeps the router in step with a [`Location`].
//!
//! ## Matching
//!
//! A literal segment wins over a parameter at the same depth. Matching never
//! backtracks: once a literal segment is taken, the parameter branch at that
//! depth is not tried again.
//!
//! ## Example
//!
//! ```
//! use sentier_router::prelude::*;
//! use serde_json::json;
//! use std::rc::Rc;
//!
//! struct UserPage {
//! 	id: u64,
//! }
//!
//! impl ViewModel for UserPage {}
//!
//! let users = ViewFactory::new(|args, _router| {
//! 	let id = args
//! 		.param::<u64>("id")
//! 		.map_err(|e| ViewError::Construction(e.to_string()))?;
//! 	Ok(UserPage { id })
//! });
//!
//! let router = Router::new()
//! 	.with_route("/", RouteSpec::fixed("home", json!({})))
//! 	.with_route("/users/:id", RouteSpec::factory("user", users));
//!
//! let location = MemoryLocation::new("/users/7");
//! let listener = NavigationListener::new(router.clone(), Rc::new(location.clone()));
//! listener.start().unwrap();
//!
//! let view = router.active_view().get().unwrap();
//! assert_eq!(view.model().unwrap().downcast_ref::<UserPage>().unwrap().id, 7);
//!
//! listener.navigate("/").unwrap();
//! location.dispatch_pending();
//! assert_eq!(router.active_view().get().unwrap().name, "home");
//! ```

pub mod args;
pub mod dispatcher;
pub mod error;
pub mod history;
pub mod listener;
pub mod matcher;
pub mod path;
pub mod trie;
pub mod view;

pub use args::RouteArgs;
pub use dispatcher::{RouteOutcome, Router, WeakRouter};
pub use error::{PathError, RouterError, ViewError};
pub use history::{Location, MemoryLocation};
pub use listener::NavigationListener;
pub use matcher::{MatchResult, Matcher, RouteMatch, match_path};
pub use path::{fragment, normalize};
pub use trie::{PARAM_SIGIL, RouteEntry, RouteTrie, TrieNode};
pub use view::{
	ActiveView, FactoryId, NotFoundHandler, RouteSpec, ViewCapabilities, ViewData, ViewFactory,
	ViewModel, ViewSource,
};

/// Re-exports for applications.
pub mod prelude {
	pub use crate::{
		ActiveView, Location, MemoryLocation, NavigationListener, NotFoundHandler, RouteArgs,
		RouteOutcome, RouteSpec, Router, RouterError, ViewCapabilities, ViewData, ViewError,
		ViewFactory, ViewModel,
	};
}
