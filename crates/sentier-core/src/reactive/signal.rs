//! Signal - Observable Value Cell
//!
//! `Signal<T>` holds a value and notifies subscribers whenever it is replaced or
//! updated. The router uses it for every value the rendering layer observes.
//!
//! ## Key Features
//!
//! - **Shared state**: every clone of a signal reads and writes the same value.
//! - **Change notification**: `set()` and `update()` call each subscriber, in
//!   registration order, after the new value is stored.
//! - **Re-entrant**: no borrow is held while subscribers run, so a subscriber may
//!   read the signal, write it again, or subscribe another callback.
//!
//! ## Example
//!
//! ```
//! use sentier_core::reactive::Signal;
//!
//! let count = Signal::new(0);
//! count.set(42);
//! assert_eq!(count.get(), 42);
//!
//! count.update(|n| *n += 1);
//! assert_eq!(count.get(), 43);
//! ```

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

/// Handle returned by [`Signal::subscribe`], used to remove the subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber<T> = Rc<dyn Fn(&T)>;

struct Shared<T> {
	value: RefCell<T>,
	subscribers: RefCell<Vec<(SubscriptionId, Subscriber<T>)>>,
	next_id: Cell<u64>,
}

/// An observable value.
///
/// ## Cloning
///
/// `Signal<T>` is a reference-counted handle. Clones share both the value and the
/// subscriber list.
pub struct Signal<T: 'static> {
	shared: Rc<Shared<T>>,
}

impl<T: 'static> Clone for Signal<T> {
	fn clone(&self) -> Self {
		Self {
			shared: Rc::clone(&self.shared),
		}
	}
}

impl<T: Default + 'static> Default for Signal<T> {
	fn default() -> Self {
		Self::new(T::default())
	}
}

impl<T: 'static> Signal<T> {
	/// Create a new Signal with the given initial value
	pub fn new(value: T) -> Self {
		Self {
			shared: Rc::new(Shared {
				value: RefCell::new(value),
				subscribers: RefCell::new(Vec::new()),
				next_id: Cell::new(0),
			}),
		}
	}

	/// Get a clone of the current value
	pub fn get(&self) -> T
	where
		T: Clone,
	{
		self.shared.value.borrow().clone()
	}

	/// Run `f` against a borrow of the current value
	///
	/// Useful for values that are expensive to clone.
	pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
		f(&self.shared.value.borrow())
	}

	/// Replace the value and notify subscribers
	pub fn set(&self, value: T)
	where
		T: Clone,
	{
		*self.shared.value.borrow_mut() = value;
		self.notify();
	}

	/// Mutate the value in place and notify subscribers once
	pub fn update<F>(&self, f: F)
	where
		F: FnOnce(&mut T),
		T: Clone,
	{
		f(&mut self.shared.value.borrow_mut());
		self.notify();
	}

	/// Register a callback invoked with the new value after every change
	pub fn subscribe<F>(&self, f: F) -> SubscriptionId
	where
		F: Fn(&T) + 'static,
	{
		let id = SubscriptionId(self.shared.next_id.get());
		self.shared.next_id.set(id.0 + 1);
		self.shared.subscribers.borrow_mut().push((id, Rc::new(f)));
		id
	}

	/// Remove a subscription. Returns `false` if it was already removed.
	pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
		let mut subscribers = self.shared.subscribers.borrow_mut();
		let before = subscribers.len();
		subscribers.retain(|(sub_id, _)| *sub_id != id);
		subscribers.len() != before
	}

	/// Number of live subscriptions
	pub fn subscriber_count(&self) -> usize {
		self.shared.subscribers.borrow().len()
	}

	/// Whether two handles refer to the same signal
	pub fn ptr_eq(&self, other: &Self) -> bool {
		Rc::ptr_eq(&self.shared, &other.shared)
	}

	fn notify(&self)
	where
		T: Clone,
	{
		// Snapshot both lists so subscribers are free to touch the signal.
		let subscribers: Vec<Subscriber<T>> = self
			.shared
			.subscribers
			.borrow()
			.iter()
			.map(|(_, f)| Rc::clone(f))
			.collect();
		if subscribers.is_empty() {
			return;
		}
		let value = self.get();
		for subscriber in subscribers {
			subscriber(&value);
		}
	}
}

impl<T: fmt::Debug + 'static> fmt::Debug for Signal<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Signal")
			.field("value", &*self.shared.value.borrow())
			.field("subscribers", &self.subscriber_count())
			.finish()
	}
}
