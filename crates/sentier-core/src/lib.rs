//! Core primitives for sentier.
//!
//! This crate holds the pieces shared by every other sentier crate. At the moment
//! that is the observable [`Signal`](reactive::Signal) through which the router
//! publishes its active view and paths to the rendering layer.

pub mod reactive;

pub use reactive::{Signal, SubscriptionId};
