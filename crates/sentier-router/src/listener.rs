//! Navigation listener.
//!
//! Connects a [`Location`] to a [`Router`]: every location change is normalized
//! and routed, and the normalized path is published as the visible path whether
//! or not it matched.

use crate::dispatcher::{RouteOutcome, Router};
use crate::error::RouterError;
use crate::history::Location;
use crate::path::normalize;
use std::cell::Cell;
use std::rc::Rc;

/// Drives a [`Router`] from a [`Location`].
pub struct NavigationListener {
	router: Router,
	location: Rc<dyn Location>,
	started: Cell<bool>,
}

impl NavigationListener {
	/// Attach `location` to `router`.
	pub fn new(router: Router, location: Rc<dyn Location>) -> Self {
		router.attach_location(location.clone());
		Self {
			router,
			location,
			started: Cell::new(false),
		}
	}

	/// Subscribe to location changes and route the current location.
	///
	/// Calling this again only re-routes the current location.
	pub fn start(&self) -> Result<RouteOutcome, RouterError> {
		if !self.started.replace(true) {
			let router = self.router.downgrade();
			let location = Rc::downgrade(&self.location);
			self.location.subscribe(Rc::new(move || {
				let (Some(router), Some(location)) = (router.upgrade(), location.upgrade()) else {
					return;
				};
				if let Err(err) = sync(&router, location.as_ref()) {
					tracing::warn!(error = %err, "routing after location change failed");
				}
			}));
			tracing::debug!("navigation listener started");
		}
		self.on_external_change()
	}

	/// Route the current location.
	pub fn on_external_change(&self) -> Result<RouteOutcome, RouterError> {
		sync(&self.router, self.location.as_ref())
	}

	/// Change the location; routing follows its change notification.
	pub fn navigate(&self, path: &str) -> Result<(), RouterError> {
		self.router.navigate(path)
	}

	pub fn router(&self) -> &Router {
		&self.router
	}

	pub fn location(&self) -> &Rc<dyn Location> {
		&self.location
	}
}

fn sync(router: &Router, location: &dyn Location) -> Result<RouteOutcome, RouterError> {
	let path = normalize(&location.current_path());
	let outcome = router.route(&path);
	router.visible_path().set(path);
	outcome
}
