//! Route dispatcher.
//!
//! [`Router`] owns the route trie and the active view. Routing is synchronous
//! and may re-enter: a view-model factory receives the router and can route or
//! navigate while it is being built. Every call to [`Router::route`] and
//! [`Router::not_found`] advances an epoch counter; a route whose factory
//! observed a nested route discards its own result.

use crate::error::{RouterError, ViewError};
use crate::history::Location;
use crate::matcher::{MatchResult, Matcher};
use crate::path::normalize;
use crate::trie::RouteTrie;
use crate::view::{
	ActiveView, FactoryId, NotFoundHandler, RouteSpec, ViewData, ViewModel, ViewSource,
};
use sentier_conf::RouterSettings;
use sentier_core::Signal;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

/// How a call to [`Router::route`] ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteOutcome {
	/// A new view was published.
	Activated,
	/// The live view-model was handed the new arguments.
	Updated,
	/// Nothing matched; the not-found handler or the root fallback ran.
	NotFound,
	/// The view-model factory routed again; the nested route won.
	Superseded,
}

impl RouteOutcome {
	/// Whether the path was routed to a registered view.
	pub fn is_success(self) -> bool {
		matches!(self, Self::Activated | Self::Updated)
	}
}

struct Inner {
	trie: RefCell<RouteTrie>,
	not_found: RefCell<Option<NotFoundHandler>>,
	epoch: Cell<u64>,
	fallback_depth: Cell<usize>,
	settings: RouterSettings,
	matcher: Matcher,
	active_view: Signal<Option<ActiveView>>,
	current_path: Signal<String>,
	visible_path: Signal<String>,
	location: RefCell<Option<Rc<dyn Location>>>,
}

/// Client-side router.
///
/// Cloning yields another handle to the same router.
///
/// # Examples
///
/// ```
/// use sentier_router::{RouteSpec, Router};
/// use serde_json::json;
///
/// let router = Router::new()
/// 	.with_route("/", RouteSpec::fixed("home", json!({})))
/// 	.with_route("/users/:id", RouteSpec::fixed("user", json!({})));
///
/// assert!(router.route("/users/42").unwrap().is_success());
/// assert_eq!(router.active_view().get().unwrap().name, "user");
/// ```
#[derive(Clone)]
pub struct Router {
	inner: Rc<Inner>,
}

/// Non-owning handle to a [`Router`].
#[derive(Clone)]
pub struct WeakRouter(Weak<Inner>);

impl WeakRouter {
	/// The router, if it is still alive.
	pub fn upgrade(&self) -> Option<Router> {
		self.0.upgrade().map(|inner| Router { inner })
	}
}

impl Default for Router {
	fn default() -> Self {
		Self::new()
	}
}

impl Router {
	/// Creates a router with default settings.
	pub fn new() -> Self {
		Self::with_settings(RouterSettings::default())
	}

	/// Creates a router with the given settings.
	pub fn with_settings(settings: RouterSettings) -> Self {
		let matcher = Matcher::new().decode_params(settings.decode_params);
		Self {
			inner: Rc::new(Inner {
				trie: RefCell::new(RouteTrie::with_sigil(settings.param_sigil)),
				not_found: RefCell::new(None),
				epoch: Cell::new(0),
				fallback_depth: Cell::new(0),
				settings,
				matcher,
				active_view: Signal::new(None),
				current_path: Signal::new(String::new()),
				visible_path: Signal::new(String::new()),
				location: RefCell::new(None),
			}),
		}
	}

	/// Register a route.
	pub fn with_route(self, pattern: &str, spec: RouteSpec) -> Self {
		self.add(pattern, spec);
		self
	}

	/// Register every `(pattern, spec)` pair.
	pub fn with_routes<I, P>(self, routes: I) -> Self
	where
		I: IntoIterator<Item = (P, RouteSpec)>,
		P: AsRef<str>,
	{
		for (pattern, spec) in routes {
			self.add(pattern.as_ref(), spec);
		}
		self
	}

	/// Set the not-found handler.
	pub fn with_not_found(self, handler: NotFoundHandler) -> Self {
		self.set_not_found(handler);
		self
	}

	/// Register a route.
	///
	/// The empty pattern registers `spec.template` as the not-found template
	/// instead. A pattern normalizing to an already registered one replaces it.
	pub fn add(&self, pattern: &str, spec: RouteSpec) {
		if pattern.is_empty() {
			self.set_not_found(NotFoundHandler::Template(spec.template));
			return;
		}

		let replaced = self.inner.trie.borrow_mut().insert(pattern, spec);
		if let Some(replaced) = replaced {
			tracing::debug!(pattern = %replaced.pattern(), "replaced existing route");
		}
	}

	/// Replace the not-found handler.
	pub fn set_not_found(&self, handler: NotFoundHandler) {
		tracing::trace!(handler = ?handler, "registering not-found handler");
		*self.inner.not_found.borrow_mut() = Some(handler);
	}

	/// Match `path` without routing.
	pub fn match_path(&self, path: &str) -> MatchResult {
		self.inner.matcher.match_path(&self.inner.trie.borrow(), path)
	}

	/// Route to `path`.
	///
	/// # Errors
	///
	/// View-model failures propagate; the previously active view stays in
	/// place. A not-found fallback nested deeper than
	/// [`RouterSettings::max_fallback_depth`] reports
	/// [`RouterError::FallbackLoop`].
	pub fn route(&self, path: &str) -> Result<RouteOutcome, RouterError> {
		let epoch0 = self.inner.epoch.get();
		self.inner.epoch.set(epoch0 + 1);

		let path = normalize(path);
		let matched = self.match_path(&path);
		self.inner.current_path.set(path.clone());

		let Some(matched) = matched.into_match() else {
			tracing::debug!(path = %path, "no route matched");
			self.not_found(&path)?;
			return Ok(RouteOutcome::NotFound);
		};
		tracing::debug!(path = %path, pattern = %matched.entry.pattern(), "route matched");

		let args = matched.args();
		let entry = matched.entry;
		let view = match entry.source() {
			ViewSource::Factory(factory) => {
				if let Some(model) = self.reusable_model(factory.id()) {
					tracing::debug!(path = %path, "updating live view-model");
					model.args_changed(&args)?;
					return Ok(RouteOutcome::Updated);
				}

				let model = factory.build(&args, self)?;
				if self.inner.epoch.get() != epoch0 + 1 {
					tracing::debug!(path = %path, "route superseded during view-model construction");
					return Ok(RouteOutcome::Superseded);
				}
				ActiveView::from_factory(entry.template().to_string(), model, factory.id())
			}
			ViewSource::Static(value) => {
				ActiveView::new(entry.template(), ViewData::Static(value.clone()))
			}
		};

		self.leave_current()?;
		self.inner.active_view.set(Some(view));
		Ok(RouteOutcome::Activated)
	}

	/// Show the not-found view for `path`.
	///
	/// Without a handler this routes to the configured root path.
	pub fn not_found(&self, path: &str) -> Result<(), RouterError> {
		self.inner.epoch.set(self.inner.epoch.get() + 1);

		let handler = self.inner.not_found.borrow().clone();
		match handler {
			Some(handler) => {
				tracing::debug!(path = %path, "showing not-found view");
				self.inner.active_view.set(Some(handler.view_for(path)));
				Ok(())
			}
			None => self.fall_back(path),
		}
	}

	fn fall_back(&self, path: &str) -> Result<(), RouterError> {
		let depth = self.inner.fallback_depth.get() + 1;
		let max = self.inner.settings.max_fallback_depth;
		if max != 0 && depth > max {
			tracing::warn!(path = %path, depth, "not-found fallback loop");
			return Err(RouterError::FallbackLoop {
				path: path.to_string(),
				depth,
			});
		}

		let root = &self.inner.settings.root_path;
		tracing::debug!(path = %path, fallback = %root, "no not-found handler, falling back");
		self.inner.fallback_depth.set(depth);
		let result = self.route(root);
		self.inner.fallback_depth.set(depth - 1);
		result.map(|_| ())
	}

	fn reusable_model(&self, factory: FactoryId) -> Option<Rc<dyn ViewModel>> {
		let model = self.inner.active_view.with(|view| {
			let view = view.as_ref()?;
			if view.factory_id() != Some(factory) {
				return None;
			}
			view.model().cloned()
		})?;
		model.capabilities().args_changed.then_some(model)
	}

	fn leave_current(&self) -> Result<(), ViewError> {
		let previous = self
			.inner
			.active_view
			.with(|view| view.as_ref().and_then(|view| view.model().cloned()));
		if let Some(model) = previous
			&& model.capabilities().before_leave
		{
			model.before_leave()?;
		}
		Ok(())
	}

	/// Ask the attached location to change to `path`.
	///
	/// The router itself reacts only once the location reports the change.
	pub fn navigate(&self, path: &str) -> Result<(), RouterError> {
		let location = self
			.inner
			.location
			.borrow()
			.clone()
			.ok_or(RouterError::NoLocation)?;
		tracing::debug!(path = %path, "navigating");
		location.set_path(path)
	}

	/// Attach the environment used by [`navigate`](Self::navigate).
	pub fn attach_location(&self, location: Rc<dyn Location>) {
		*self.inner.location.borrow_mut() = Some(location);
	}

	/// A non-owning handle to this router.
	pub fn downgrade(&self) -> WeakRouter {
		WeakRouter(Rc::downgrade(&self.inner))
	}

	/// Routing attempts so far, including not-found handling.
	pub fn epoch(&self) -> u64 {
		self.inner.epoch.get()
	}

	/// The active view.
	pub fn active_view(&self) -> Signal<Option<ActiveView>> {
		self.inner.active_view.clone()
	}

	/// The last routed path, matched or not.
	pub fn current_path(&self) -> Signal<String> {
		self.inner.current_path.clone()
	}

	/// The path shown in the address bar.
	pub fn visible_path(&self) -> Signal<String> {
		self.inner.visible_path.clone()
	}

	pub fn settings(&self) -> &RouterSettings {
		&self.inner.settings
	}

	/// Number of registered routes.
	pub fn route_count(&self) -> usize {
		self.inner.trie.borrow().len()
	}
}

impl fmt::Debug for Router {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Router")
			.field("routes", &self.route_count())
			.field("epoch", &self.epoch())
			.field("current_path", &self.inner.current_path.get())
			.finish_non_exhaustive()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::args::RouteArgs;
	use crate::view::{ViewCapabilities, ViewFactory};
	use rstest::rstest;
	use serde_json::json;

	#[derive(Default)]
	struct Counter {
		updates: Cell<usize>,
		leaves: Cell<usize>,
	}

	impl ViewModel for Counter {
		fn capabilities(&self) -> ViewCapabilities {
			ViewCapabilities::ALL
		}

		fn args_changed(&self, _args: &RouteArgs) -> Result<(), ViewError> {
			self.updates.set(self.updates.get() + 1);
			Ok(())
		}

		fn before_leave(&self) -> Result<(), ViewError> {
			self.leaves.set(self.leaves.get() + 1);
			Ok(())
		}
	}

	fn fixed(template: &str) -> RouteSpec {
		RouteSpec::fixed(template, json!({ "page": template }))
	}

	fn active_name(router: &Router) -> Option<String> {
		router.active_view().get().map(|view| view.name)
	}

	#[rstest]
	fn test_route_static() {
		let router = Router::new().with_route("/about", fixed("about"));

		assert_eq!(router.route("about/").unwrap(), RouteOutcome::Activated);
		let view = router.active_view().get().unwrap();
		assert_eq!(view.name, "about");
		assert_eq!(view.static_data(), Some(&json!({ "page": "about" })));
		assert_eq!(router.current_path().get(), "/about");
	}

	#[rstest]
	fn test_epoch_counts_route_and_not_found() {
		let router = Router::new()
			.with_route("/", fixed("home"))
			.with_not_found(NotFoundHandler::Template("404".to_string()));

		router.route("/").unwrap();
		assert_eq!(router.epoch(), 1);
		router.route("/missing").unwrap();
		assert_eq!(router.epoch(), 3);
	}

	#[rstest]
	fn test_empty_pattern_registers_not_found_template() {
		let router = Router::new().with_route("", fixed("missing"));

		assert_eq!(router.route("/x").unwrap(), RouteOutcome::NotFound);
		assert_eq!(router.route_count(), 0);
		let view = router.active_view().get().unwrap();
		assert_eq!(view.name, "missing");
		assert_eq!(view.static_data(), Some(&json!({ "path": "/x" })));
	}

	#[rstest]
	fn test_current_path_set_when_unmatched() {
		let router = Router::new()
			.with_route("/", fixed("home"))
			.with_not_found(NotFoundHandler::Template("404".to_string()));

		router.route("/nowhere/").unwrap();
		assert_eq!(router.current_path().get(), "/nowhere");
	}

	#[rstest]
	fn test_reuse_updates_same_instance() {
		let built = Rc::new(Cell::new(0));
		let counter = built.clone();
		let factory = ViewFactory::new(move |_, _| {
			counter.set(counter.get() + 1);
			Ok(Counter::default())
		});
		let router = Router::new().with_route("/item/:id", RouteSpec::factory("item", factory));

		assert_eq!(router.route("/item/1").unwrap(), RouteOutcome::Activated);
		assert_eq!(router.route("/item/2").unwrap(), RouteOutcome::Updated);
		assert_eq!(built.get(), 1);

		let view = router.active_view().get().unwrap();
		let model = view.model().unwrap().downcast_ref::<Counter>().unwrap();
		assert_eq!(model.updates.get(), 1);
		assert_eq!(model.leaves.get(), 0);
	}

	#[rstest]
	fn test_before_leave_on_replacement() {
		let factory = ViewFactory::new(|_, _| Ok(Counter::default()));
		let router = Router::new()
			.with_route("/a", RouteSpec::factory("a", factory))
			.with_route("/b", fixed("b"));

		router.route("/a").unwrap();
		let first = router.active_view().get().unwrap();
		router.route("/b").unwrap();

		let model = first.model().unwrap().downcast_ref::<Counter>().unwrap();
		assert_eq!(model.leaves.get(), 1);
		assert_eq!(active_name(&router).as_deref(), Some("b"));
	}

	#[rstest]
	fn test_construction_failure_keeps_previous_view() {
		let factory = ViewFactory::new(|_, _| {
			Err::<Counter, _>(ViewError::Construction("nope".to_string()))
		});
		let router = Router::new()
			.with_route("/", fixed("home"))
			.with_route("/broken", RouteSpec::factory("broken", factory));

		router.route("/").unwrap();
		let err = router.route("/broken").unwrap_err();
		assert_eq!(err, RouterError::View(ViewError::Construction("nope".to_string())));
		assert_eq!(active_name(&router).as_deref(), Some("home"));
	}

	#[rstest]
	fn test_fallback_to_root() {
		let router = Router::new().with_route("/", fixed("home"));

		assert_eq!(router.route("/missing").unwrap(), RouteOutcome::NotFound);
		assert_eq!(active_name(&router).as_deref(), Some("home"));
		assert_eq!(router.current_path().get(), "/");
	}

	#[rstest]
	#[case(1)]
	#[case(8)]
	fn test_fallback_loop_is_reported(#[case] max_fallback_depth: usize) {
		let settings = RouterSettings {
			max_fallback_depth,
			..RouterSettings::default()
		};
		let router = Router::with_settings(settings).with_route("/only", fixed("only"));

		let err = router.route("/missing").unwrap_err();
		assert_eq!(
			err,
			RouterError::FallbackLoop {
				path: "/".to_string(),
				depth: max_fallback_depth + 1,
			}
		);
		assert!(router.active_view().get().is_none());
	}

	#[rstest]
	fn test_custom_root_path() {
		let settings = RouterSettings {
			root_path: "/home".to_string(),
			..RouterSettings::default()
		};
		let router = Router::with_settings(settings).with_route("/home", fixed("home"));

		router.route("/missing").unwrap();
		assert_eq!(active_name(&router).as_deref(), Some("home"));
	}

	#[rstest]
	fn test_navigate_without_location() {
		assert_eq!(Router::new().navigate("/a"), Err(RouterError::NoLocation));
	}

	#[rstest]
	fn test_weak_router() {
		let router = Router::new();
		let weak = router.downgrade();
		assert!(weak.upgrade().is_some());
		drop(router);
		assert!(weak.upgrade().is_none());
	}

	#[rstest]
	fn test_outcome_success() {
		assert!(RouteOutcome::Activated.is_success());
		assert!(RouteOutcome::Updated.is_success());
		assert!(!RouteOutcome::NotFound.is_success());
		assert!(!RouteOutcome::Superseded.is_success());
	}
}
