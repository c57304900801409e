//! Static router configuration.

use crate::settings::{
	DEFAULT_MATCH_CACHE_CAPACITY, DEFAULT_PATH_KEY, DEFAULT_WIDE_VIEWPORT_MIN_WIDTH,
	RouterSettings,
};
use gutenberg_urls::{Query, serialize_query, split_path_and_query};
use std::fmt;
use std::sync::Arc;

/// Where a navigation is going, before it becomes a query string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationTarget {
	/// Route path, e.g. `/post/7`.
	pub path: String,
	/// Sibling query entries.
	pub query: Query,
}

impl NavigationTarget {
	/// Splits a raw path such as `/pages?postType=page`.
	pub fn parse(raw: &str) -> Self {
		let split = split_path_and_query(raw);
		Self {
			path: split.path,
			query: split.query,
		}
	}

	/// Builds the full document query: the path under `path_key` first,
	/// then the sibling entries.
	///
	/// A sibling entry named `path_key` overrides the path.
	pub fn to_query(&self, path_key: &str) -> Query {
		let mut query = Query::with_capacity(self.query.len() + 1);
		query.insert(path_key.to_string(), self.path.clone());
		for (key, value) in &self.query {
			query.insert(key.clone(), value.clone());
		}
		query
	}

	/// Serializes [`to_query`](Self::to_query) without the leading `?`.
	pub fn to_search(&self, path_key: &str) -> String {
		serialize_query(&self.to_query(path_key))
	}
}

/// Hook applied to every navigation target before it is committed.
///
/// Hosts use it to carry cross-cutting query entries (a preview flag, a
/// locale) across navigations. It must always return a usable target.
pub type BeforeNavigate = Arc<dyn Fn(NavigationTarget) -> NavigationTarget + Send + Sync>;

/// Configuration shared by everything under one router root.
#[derive(Clone)]
pub struct RouterConfig {
	/// Reserved query key holding the route path.
	pub path_key: String,
	/// Optional navigation interceptor.
	pub before_navigate: Option<BeforeNavigate>,
	/// Minimum viewport width for animated navigations.
	pub wide_viewport_min_width: u32,
	/// Number of resolved matches kept by the matcher.
	pub match_cache_capacity: usize,
}

impl fmt::Debug for RouterConfig {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("RouterConfig")
			.field("path_key", &self.path_key)
			.field("before_navigate", &self.before_navigate.is_some())
			.field("wide_viewport_min_width", &self.wide_viewport_min_width)
			.field("match_cache_capacity", &self.match_cache_capacity)
			.finish()
	}
}

impl Default for RouterConfig {
	fn default() -> Self {
		Self {
			path_key: DEFAULT_PATH_KEY.to_string(),
			before_navigate: None,
			wide_viewport_min_width: DEFAULT_WIDE_VIEWPORT_MIN_WIDTH,
			match_cache_capacity: DEFAULT_MATCH_CACHE_CAPACITY,
		}
	}
}

impl RouterConfig {
	/// Takes the data fields from `settings`, without a hook.
	pub fn from_settings(settings: &RouterSettings) -> Self {
		Self {
			path_key: settings.path_key.clone(),
			before_navigate: None,
			wide_viewport_min_width: settings.wide_viewport_min_width,
			match_cache_capacity: settings.match_cache_capacity,
		}
	}

	/// Sets the query key that carries the route path.
	pub fn with_path_key(mut self, path_key: impl Into<String>) -> Self {
		self.path_key = path_key.into();
		self
	}

	/// Installs the navigation interceptor.
	pub fn with_before_navigate<F>(mut self, hook: F) -> Self
	where
		F: Fn(NavigationTarget) -> NavigationTarget + Send + Sync + 'static,
	{
		self.before_navigate = Some(Arc::new(hook));
		self
	}

	/// Sets the narrowest viewport, in CSS pixels, that animates navigations.
	pub fn with_wide_viewport_min_width(mut self, width: u32) -> Self {
		self.wide_viewport_min_width = width;
		self
	}

	/// Splits `raw` and runs it through the interceptor, if any.
	pub fn resolve_target(&self, raw: &str) -> NavigationTarget {
		let target = NavigationTarget::parse(raw);
		match &self.before_navigate {
			Some(hook) => hook(target),
			None => target,
		}
	}
}
