//! The environment's location.
//!
//! A [`Location`] exposes the current path, a way to change it, and a change
//! notification. [`MemoryLocation`] keeps everything in memory and delivers
//! notifications only when [`MemoryLocation::dispatch_pending`] is called, the
//! way a browser fires `hashchange` after the script that changed the hash has
//! returned.

use crate::error::RouterError;
use crate::path::fragment;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

/// Source of the current path.
pub trait Location {
	/// The current path, not normalized.
	fn current_path(&self) -> String;

	/// Change the current path.
	///
	/// Listeners are notified later, not from within this call.
	fn set_path(&self, path: &str) -> Result<(), RouterError>;

	/// Call `callback` after every change of the current path.
	fn subscribe(&self, callback: Rc<dyn Fn()>);
}

#[derive(Default)]
struct MemoryInner {
	path: RefCell<String>,
	listeners: RefCell<Vec<Rc<dyn Fn()>>>,
	pending: Cell<usize>,
	history: RefCell<Vec<String>>,
}

/// In-memory [`Location`].
///
/// Clones share state.
#[derive(Clone, Default)]
pub struct MemoryLocation {
	inner: Rc<MemoryInner>,
}

impl MemoryLocation {
	/// Creates a location at `path`.
	pub fn new(path: impl Into<String>) -> Self {
		let path = path.into();
		let location = Self::default();
		location.inner.history.borrow_mut().push(path.clone());
		*location.inner.path.borrow_mut() = path;
		location
	}

	/// Creates a location from a full URL, keeping its fragment.
	pub fn from_url(url: &str) -> Self {
		Self::new(fragment(url))
	}

	/// Change the location to the fragment of `url`.
	pub fn set_url(&self, url: &str) {
		self.change(fragment(url));
	}

	/// Deliver queued change notifications.
	///
	/// Notifications queued by listeners are delivered too. Returns how many
	/// were delivered.
	pub fn dispatch_pending(&self) -> usize {
		let mut delivered = 0;
		while self.inner.pending.get() > 0 {
			self.inner.pending.set(self.inner.pending.get() - 1);
			let listeners = self.inner.listeners.borrow().clone();
			for listener in listeners {
				listener();
			}
			delivered += 1;
		}
		delivered
	}

	/// Number of undelivered notifications.
	pub fn pending(&self) -> usize {
		self.inner.pending.get()
	}

	/// Every path this location has held, oldest first.
	pub fn history(&self) -> Vec<String> {
		self.inner.history.borrow().clone()
	}

	fn change(&self, path: &str) {
		if *self.inner.path.borrow() == path {
			return;
		}
		*self.inner.path.borrow_mut() = path.to_string();
		self.inner.history.borrow_mut().push(path.to_string());
		self.inner.pending.set(self.inner.pending.get() + 1);
	}
}

impl Location for MemoryLocation {
	fn current_path(&self) -> String {
		self.inner.path.borrow().clone()
	}

	fn set_path(&self, path: &str) -> Result<(), RouterError> {
		self.change(path);
		Ok(())
	}

	fn subscribe(&self, callback: Rc<dyn Fn()>) {
		self.inner.listeners.borrow_mut().push(callback);
	}
}

impl fmt::Debug for MemoryLocation {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("MemoryLocation")
			.field("path", &*self.inner.path.borrow())
			.field("pending", &self.inner.pending.get())
			.field("listeners", &self.inner.listeners.borrow().len())
			.finish()
	}
}
