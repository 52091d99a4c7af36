//! Reactive primitives.
//!
//! The router runs on a single thread of control, so observables share their
//! state through `Rc<RefCell<_>>` instead of locks.

mod signal;

pub use signal::{Signal, SubscriptionId};
