//! View-models, route specs and the active view.
//!
//! A route resolves either to static data or to a [`ViewFactory`] that builds a
//! fresh [`ViewModel`] from the route arguments. View-models opt into the
//! router's lifecycle callbacks through [`ViewCapabilities`].

use crate::args::RouteArgs;
use crate::dispatcher::Router;
use crate::error::ViewError;
use serde_json::Value;
use std::any::Any;
use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Lifecycle callbacks a view-model implements.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewCapabilities {
	/// Wants [`ViewModel::args_changed`] instead of being rebuilt when the
	/// router lands on a route served by the same factory.
	pub args_changed: bool,
	/// Wants [`ViewModel::before_leave`] before being replaced.
	pub before_leave: bool,
}

impl ViewCapabilities {
	/// No callbacks.
	pub const NONE: Self = Self {
		args_changed: false,
		before_leave: false,
	};
	/// Every callback.
	pub const ALL: Self = Self {
		args_changed: true,
		before_leave: true,
	};
}

/// A live view-model bound to the active route.
///
/// Callbacks take `&self`; view-models keep mutable state behind `Cell` or
/// `RefCell`. A callback may route or navigate again.
pub trait ViewModel: Any {
	/// Callbacks this view-model wants to receive.
	fn capabilities(&self) -> ViewCapabilities {
		ViewCapabilities::NONE
	}

	/// The router matched another path served by the same factory.
	fn args_changed(&self, _args: &RouteArgs) -> Result<(), ViewError> {
		Ok(())
	}

	/// This view-model is about to be replaced.
	fn before_leave(&self) -> Result<(), ViewError> {
		Ok(())
	}
}

impl dyn ViewModel {
	/// Downcast to the concrete view-model type.
	pub fn downcast_ref<T: ViewModel>(&self) -> Option<&T> {
		(self as &dyn Any).downcast_ref::<T>()
	}
}

/// Identity of a [`ViewFactory`], shared by all of its clones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FactoryId(u64);

impl FactoryId {
	fn next() -> Self {
		static NEXT: AtomicU64 = AtomicU64::new(1);
		Self(NEXT.fetch_add(1, Ordering::Relaxed))
	}
}

type BuildFn = dyn Fn(&RouteArgs, &Router) -> Result<Rc<dyn ViewModel>, ViewError>;

/// Builds view-models for a route.
///
/// Two routes registered with clones of the same factory share its identity,
/// so moving between them reuses the live view-model when it supports
/// `args_changed`.
#[derive(Clone)]
pub struct ViewFactory {
	id: FactoryId,
	build: Rc<BuildFn>,
}

impl ViewFactory {
	/// Wrap a constructor.
	///
	/// The constructor receives the router so it can route or navigate while it
	/// runs; a route started that way supersedes the one being constructed.
	pub fn new<F, V>(build: F) -> Self
	where
		F: Fn(&RouteArgs, &Router) -> Result<V, ViewError> + 'static,
		V: ViewModel,
	{
		Self {
			id: FactoryId::next(),
			build: Rc::new(move |args, router| {
				build(args, router).map(|vm| Rc::new(vm) as Rc<dyn ViewModel>)
			}),
		}
	}

	/// Identity of this factory.
	pub fn id(&self) -> FactoryId {
		self.id
	}

	pub(crate) fn build(
		&self,
		args: &RouteArgs,
		router: &Router,
	) -> Result<Rc<dyn ViewModel>, ViewError> {
		(self.build)(args, router)
	}
}

impl fmt::Debug for ViewFactory {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ViewFactory").field("id", &self.id).finish()
	}
}

/// What a route renders.
#[derive(Debug, Clone)]
pub enum ViewSource {
	/// Build a view-model per activation.
	Factory(ViewFactory),
	/// Hand the same data to the template every time.
	Static(Value),
}

/// A route registration: the data source plus the template that renders it.
#[derive(Debug, Clone)]
pub struct RouteSpec {
	/// Data source.
	pub data: ViewSource,
	/// Template identifier.
	pub template: String,
}

impl RouteSpec {
	/// A route rendered by view-models from `factory`.
	pub fn factory(template: impl Into<String>, factory: ViewFactory) -> Self {
		Self {
			data: ViewSource::Factory(factory),
			template: template.into(),
		}
	}

	/// A route rendered from static data.
	pub fn fixed(template: impl Into<String>, data: Value) -> Self {
		Self {
			data: ViewSource::Static(data),
			template: template.into(),
		}
	}
}

/// Data bound to the active template.
#[derive(Clone)]
pub enum ViewData {
	/// A live view-model.
	Model(Rc<dyn ViewModel>),
	/// Static data.
	Static(Value),
}

impl fmt::Debug for ViewData {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Model(_) => f.write_str("Model(..)"),
			Self::Static(value) => f.debug_tuple("Static").field(value).finish(),
		}
	}
}

/// The template/data pair currently presented to the rendering layer.
#[derive(Debug, Clone)]
pub struct ActiveView {
	/// Template identifier.
	pub name: String,
	/// Data bound to the template.
	pub data: ViewData,
	factory: Option<FactoryId>,
}

impl ActiveView {
	/// A view not produced by a factory.
	pub fn new(name: impl Into<String>, data: ViewData) -> Self {
		Self {
			name: name.into(),
			data,
			factory: None,
		}
	}

	pub(crate) fn from_factory(name: String, model: Rc<dyn ViewModel>, factory: FactoryId) -> Self {
		Self {
			name,
			data: ViewData::Model(model),
			factory: Some(factory),
		}
	}

	/// The live view-model, if any.
	pub fn model(&self) -> Option<&Rc<dyn ViewModel>> {
		match &self.data {
			ViewData::Model(model) => Some(model),
			ViewData::Static(_) => None,
		}
	}

	/// The static data, if any.
	pub fn static_data(&self) -> Option<&Value> {
		match &self.data {
			ViewData::Static(value) => Some(value),
			ViewData::Model(_) => None,
		}
	}

	/// The factory that built the view-model, if any.
	pub fn factory_id(&self) -> Option<FactoryId> {
		self.factory
	}
}

type RenderFn = dyn Fn(&str) -> ActiveView;

/// What to show when no route matches.
#[derive(Clone)]
pub enum NotFoundHandler {
	/// Render this template with `{"path": <path>}` as data.
	Template(String),
	/// Build the view from the unmatched path.
	Render(Rc<RenderFn>),
}

impl NotFoundHandler {
	/// A handler computing the view from the unmatched path.
	pub fn render<F>(f: F) -> Self
	where
		F: Fn(&str) -> ActiveView + 'static,
	{
		Self::Render(Rc::new(f))
	}

	pub(crate) fn view_for(&self, path: &str) -> ActiveView {
		match self {
			Self::Template(name) => {
				ActiveView::new(name.clone(), ViewData::Static(serde_json::json!({ "path": path })))
			}
			Self::Render(f) => f(path),
		}
	}
}

impl fmt::Debug for NotFoundHandler {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Template(name) => f.debug_tuple("Template").field(name).finish(),
			Self::Render(_) => f.write_str("Render(..)"),
		}
	}
}
