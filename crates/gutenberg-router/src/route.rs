//! Route definitions.
//!
//! A [`RouteDefinition`] names a path pattern and the payloads a layout
//! renders into its named areas. Area and width values are either literal
//! or computed from the match context when the route is resolved.

use gutenberg_urls::{Params, Query, RouteTable};
use indexmap::IndexMap;
use std::fmt;
use std::sync::Arc;

/// Inputs available to computed area and width values.
#[derive(Debug, Clone, Copy)]
pub struct RouteContext<'a> {
	/// Query without the reserved path key.
	pub query: &'a Query,
	/// Parameters bound by the route pattern.
	pub params: &'a Params,
}

/// Computes a value from the match context.
pub type ComputeFn<T> = Arc<dyn Fn(&RouteContext<'_>) -> T + Send + Sync>;

/// A literal value or a function of the match context.
pub enum AreaValue<T> {
	/// Passed through unchanged.
	Literal(T),
	/// Evaluated on every resolution.
	Computed(ComputeFn<T>),
}

impl<T> AreaValue<T> {
	/// Wraps a function of the match context.
	pub fn computed<F>(f: F) -> Self
	where
		F: Fn(&RouteContext<'_>) -> T + Send + Sync + 'static,
	{
		Self::Computed(Arc::new(f))
	}

	/// Returns whether this value is evaluated at resolution time.
	pub fn is_computed(&self) -> bool {
		matches!(self, Self::Computed(_))
	}
}

impl<T: Clone> AreaValue<T> {
	/// Produces the render-ready value for `context`.
	pub fn resolve(&self, context: &RouteContext<'_>) -> T {
		match self {
			Self::Literal(value) => value.clone(),
			Self::Computed(f) => f(context),
		}
	}
}

impl<T> From<T> for AreaValue<T> {
	fn from(value: T) -> Self {
		Self::Literal(value)
	}
}

impl<T: Clone> Clone for AreaValue<T> {
	fn clone(&self) -> Self {
		match self {
			Self::Literal(value) => Self::Literal(value.clone()),
			Self::Computed(f) => Self::Computed(Arc::clone(f)),
		}
	}
}

impl<T: fmt::Debug> fmt::Debug for AreaValue<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Literal(value) => f.debug_tuple("Literal").field(value).finish(),
			Self::Computed(_) => f.write_str("Computed(..)"),
		}
	}
}

/// A named route.
///
/// `A` is the area payload type: whatever the host layout renders.
///
/// # Example
///
/// ```
/// use gutenberg_router::RouteDefinition;
///
/// let route: RouteDefinition<&str> = RouteDefinition::new("post", "/post/:postId")
/// 	.area("sidebar", "navigation")
/// 	.computed_area("content", |ctx| {
/// 		if ctx.params.get("postId").is_some() { "editor" } else { "list" }
/// 	})
/// 	.width("content", 380);
///
/// assert_eq!(route.name(), "post");
/// assert_eq!(route.areas().len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct RouteDefinition<A> {
	name: String,
	path: String,
	areas: IndexMap<String, AreaValue<A>>,
	widths: IndexMap<String, AreaValue<u32>>,
}

impl<A> RouteDefinition<A> {
	/// Creates a route without areas.
	pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			path: path.into(),
			areas: IndexMap::new(),
			widths: IndexMap::new(),
		}
	}

	/// Sets an area to a literal value.
	pub fn area(mut self, name: impl Into<String>, value: impl Into<A>) -> Self {
		self.areas
			.insert(name.into(), AreaValue::Literal(value.into()));
		self
	}

	/// Sets an area to a value computed at resolution time.
	pub fn computed_area<F>(mut self, name: impl Into<String>, f: F) -> Self
	where
		F: Fn(&RouteContext<'_>) -> A + Send + Sync + 'static,
	{
		self.areas.insert(name.into(), AreaValue::computed(f));
		self
	}

	/// Sets a literal width hint for an area.
	pub fn width(mut self, name: impl Into<String>, width: u32) -> Self {
		self.widths.insert(name.into(), AreaValue::Literal(width));
		self
	}

	/// Sets a width hint computed at resolution time.
	pub fn computed_width<F>(mut self, name: impl Into<String>, f: F) -> Self
	where
		F: Fn(&RouteContext<'_>) -> u32 + Send + Sync + 'static,
	{
		self.widths.insert(name.into(), AreaValue::computed(f));
		self
	}

	/// Returns the route name.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Returns the route pattern, e.g. `/post/:id`.
	pub fn path(&self) -> &str {
		&self.path
	}

	/// Returns the area payloads, literal or computed.
	pub fn areas(&self) -> &IndexMap<String, AreaValue<A>> {
		&self.areas
	}

	/// Returns the width hints, literal or computed.
	pub fn widths(&self) -> &IndexMap<String, AreaValue<u32>> {
		&self.widths
	}
}

/// Builds the route table from definitions in caller order.
///
/// A definition with a malformed pattern is skipped with a warning, so it
/// only ever shows up as a path that matches nothing.
pub fn build_route_table<A, I>(routes: I) -> RouteTable<RouteDefinition<A>>
where
	I: IntoIterator<Item = RouteDefinition<A>>,
{
	let mut table = RouteTable::new();
	for route in routes {
		let name = route.name.clone();
		let path = route.path.clone();
		if let Err(error) = table.add(name.as_str(), &path, route) {
			tracing::warn!(route = %name, pattern = %path, %error, "skipping route with malformed pattern");
		}
	}
	tracing::debug!(routes = table.len(), "route table built");
	table
}
