//! Location to route resolution.

use crate::error::RouterError;
use crate::location::Location;
use crate::route::{RouteContext, RouteDefinition};
use gutenberg_urls::{Params, Query, RouteTable, TableId, add_query_args};
use indexmap::IndexMap;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;
use std::thread::ThreadId;

/// Route name of the match produced when no route accepts the path.
pub const NOT_FOUND_ROUTE: &str = "not-found";

/// A resolved routing decision.
///
/// Every area and width is render-ready: computed values have already been
/// evaluated against this match's query and params.
#[derive(Debug, Clone, PartialEq)]
pub struct Match<A> {
	/// Matched route name, or [`NOT_FOUND_ROUTE`].
	pub name: String,
	/// Route path with the remaining query appended.
	pub path: String,
	/// Parameters bound by the pattern; empty when nothing matched.
	pub params: Params,
	/// Query without the reserved path key.
	pub query: Query,
	/// Resolved area payloads.
	pub areas: IndexMap<String, A>,
	/// Resolved width hints.
	pub widths: IndexMap<String, u32>,
}

impl<A> Match<A> {
	/// Returns whether no route accepted the path.
	pub fn is_not_found(&self) -> bool {
		self.name == NOT_FOUND_ROUTE
	}

	/// Returns the resolved payload of area `name`.
	pub fn area(&self, name: &str) -> Option<&A> {
		self.areas.get(name)
	}

	/// Returns the resolved width hint of area `name`.
	pub fn width(&self, name: &str) -> Option<u32> {
		self.widths.get(name).copied()
	}
}

/// Resolves `location` against `table` without caching.
///
/// The route path is read from the `path_key` query entry (defaulting to
/// `/`); every other entry becomes [`Match::query`].
pub fn match_route<A: Clone>(
	location: &Location,
	table: &RouteTable<RouteDefinition<A>>,
	path_key: &str,
) -> Match<A> {
	let raw_path = location
		.query
		.get(path_key)
		.map(String::as_str)
		.unwrap_or("/");
	let query: Query = location
		.query
		.iter()
		.filter(|(key, _)| key.as_str() != path_key)
		.map(|(key, value)| (key.clone(), value.clone()))
		.collect();
	let path = add_query_args(raw_path, &query);

	let Some(resolved) = table.resolve(raw_path) else {
		tracing::debug!(path = %raw_path, "no route matched");
		return Match {
			name: NOT_FOUND_ROUTE.to_string(),
			path,
			params: Params::new(),
			query,
			areas: IndexMap::new(),
			widths: IndexMap::new(),
		};
	};

	let context = RouteContext {
		query: &query,
		params: &resolved.params,
	};
	let areas = resolved
		.route
		.areas()
		.iter()
		.map(|(name, value)| (name.clone(), value.resolve(&context)))
		.collect();
	let widths = resolved
		.route
		.widths()
		.iter()
		.map(|(name, value)| (name.clone(), value.resolve(&context)))
		.collect();

	tracing::trace!(route = resolved.name, path = %raw_path, "route matched");
	Match {
		name: resolved.name.to_string(),
		path,
		params: resolved.params,
		query,
		areas,
		widths,
	}
}

struct CacheEntry<A> {
	query: Arc<Query>,
	path_key: String,
	matched: Arc<Match<A>>,
}

impl<A> CacheEntry<A> {
	fn is_for(&self, location: &Location, path_key: &str) -> bool {
		Arc::ptr_eq(&self.query, &location.query) && self.path_key == path_key
	}
}

/// A resolution in progress: query identity, path key and resolving thread.
type InFlight = (usize, String, ThreadId);

/// A route table with memoized resolution.
///
/// Results are cached per `(query identity, path key)`. Each [`Location`]
/// snapshot carries its own `Arc<Query>`, so the cache hits exactly when
/// the same snapshot is matched again. Entries hold their query alive,
/// which keeps the identity from being reused while cached.
///
/// Computed areas and widths run with no lock held.
pub struct Matcher<A> {
	table: Arc<RouteTable<RouteDefinition<A>>>,
	cache: Mutex<VecDeque<CacheEntry<A>>>,
	in_flight: Mutex<Vec<InFlight>>,
	capacity: usize,
}

impl<A> std::fmt::Debug for Matcher<A> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Matcher")
			.field("table", &self.table.id())
			.field("routes", &self.table.len())
			.field("cached", &self.cache.lock().len())
			.finish()
	}
}

impl<A: Clone> Matcher<A> {
	/// Creates a matcher keeping up to `capacity` results.
	pub fn new(table: Arc<RouteTable<RouteDefinition<A>>>, capacity: usize) -> Self {
		Self {
			table,
			cache: Mutex::new(VecDeque::new()),
			in_flight: Mutex::new(Vec::new()),
			capacity: capacity.max(1),
		}
	}

	/// Resolves `location`, reusing the previous result for the same
	/// snapshot.
	///
	/// # Panics
	///
	/// Panics when a computed area or width resolves the same snapshot
	/// again while it is being matched. Use [`try_resolve`](Self::try_resolve)
	/// to get the error instead.
	pub fn resolve(&self, location: &Location, path_key: &str) -> Arc<Match<A>> {
		self.try_resolve(location, path_key)
			.unwrap_or_else(|error| panic!("{}", error))
	}

	/// Resolves `location`, reusing the previous result for the same
	/// snapshot.
	///
	/// # Errors
	///
	/// Returns [`RouterError::ReentrantMatch`] when called from a computed
	/// area or width of the resolution it would wait on.
	pub fn try_resolve(
		&self,
		location: &Location,
		path_key: &str,
	) -> Result<Arc<Match<A>>, RouterError> {
		if let Some(matched) = self.cached(location, path_key) {
			return Ok(matched);
		}

		let marker: InFlight = (
			Arc::as_ptr(&location.query) as usize,
			path_key.to_string(),
			std::thread::current().id(),
		);
		{
			let mut in_flight = self.in_flight.lock();
			if in_flight.contains(&marker) {
				tracing::warn!(search = %location.search, "route resolution re-entered");
				return Err(RouterError::ReentrantMatch(location.search.clone()));
			}
			in_flight.push(marker.clone());
		}
		let _done = scopeguard::guard(marker, |marker| {
			self.in_flight.lock().retain(|entry| *entry != marker);
		});

		let matched = Arc::new(match_route(location, &self.table, path_key));

		let mut cache = self.cache.lock();
		// Another thread may have finished the same snapshot meanwhile.
		if let Some(entry) = cache.iter().find(|entry| entry.is_for(location, path_key)) {
			return Ok(Arc::clone(&entry.matched));
		}
		if cache.len() >= self.capacity {
			cache.pop_front();
		}
		cache.push_back(CacheEntry {
			query: Arc::clone(&location.query),
			path_key: path_key.to_string(),
			matched: Arc::clone(&matched),
		});
		Ok(matched)
	}

	fn cached(&self, location: &Location, path_key: &str) -> Option<Arc<Match<A>>> {
		self.cache
			.lock()
			.iter()
			.find(|entry| entry.is_for(location, path_key))
			.map(|entry| Arc::clone(&entry.matched))
	}

	/// Returns the route table this matcher resolves against.
	pub fn table(&self) -> &Arc<RouteTable<RouteDefinition<A>>> {
		&self.table
	}

	/// Returns the identity of the table this matcher resolves against.
	pub fn table_id(&self) -> TableId {
		self.table.id()
	}

	/// Drops every cached result.
	pub fn clear(&self) {
		self.cache.lock().clear();
	}
}
