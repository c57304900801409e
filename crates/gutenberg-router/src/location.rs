//! Subscribable current location.
//!
//! [`LocationStore`] turns the platform's history entry into a parsed
//! [`Location`] and lets any number of subscribers follow it. Reads are
//! memoized per history entry: as long as the platform has not moved, every
//! [`get_snapshot`](LocationStore::get_snapshot) returns the same `Arc`.

use crate::error::RouterError;
use crate::history::{History, ListenerId, LocationKey, PlatformLocation};
use crate::settings::DEFAULT_LOCATION_CACHE_CAPACITY;
use gutenberg_urls::{Query, parse_query};
use parking_lot::Mutex;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

/// The current URL, parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
	/// Document path, always starting with `/`.
	pub path: String,
	/// Raw query string, including the leading `?` when non-empty.
	pub search: String,
	/// `search`, parsed. Shared so identity can serve as a cache key.
	pub query: Arc<Query>,
	/// Opaque state pushed with the history entry.
	pub state: Option<Value>,
}

impl Location {
	/// Parses a platform entry.
	pub fn from_platform(platform: &PlatformLocation) -> Self {
		let path = if platform.pathname.starts_with('/') {
			platform.pathname.clone()
		} else {
			format!("/{}", platform.pathname)
		};

		Self {
			path,
			search: platform.search.clone(),
			query: Arc::new(parse_query(&platform.search)),
			state: platform.state.clone(),
		}
	}
}

type Listener = Arc<dyn Fn() + Send + Sync>;

#[derive(Default)]
struct Listeners {
	next_id: AtomicU64,
	entries: Mutex<Vec<(u64, Listener)>>,
}

impl Listeners {
	fn add(&self, listener: Listener) -> u64 {
		let id = self.next_id.fetch_add(1, Ordering::Relaxed);
		self.entries.lock().push((id, listener));
		id
	}

	fn remove(&self, id: u64) {
		self.entries.lock().retain(|(entry_id, _)| *entry_id != id);
	}

	fn notify(&self) {
		// Snapshot first: listeners may subscribe or unsubscribe while running.
		let snapshot: Vec<Listener> = self
			.entries
			.lock()
			.iter()
			.map(|(_, listener)| Arc::clone(listener))
			.collect();

		tracing::trace!(listeners = snapshot.len(), "location changed");
		for listener in snapshot {
			listener();
		}
	}
}

/// Handle for a [`LocationStore`] subscription.
///
/// Dropping the handle unsubscribes. Call [`forget`](Self::forget) to keep
/// the listener for the lifetime of the store.
#[must_use = "dropping a Subscription unsubscribes its listener"]
pub struct Subscription {
	id: u64,
	listeners: Weak<Listeners>,
	active: bool,
}

impl std::fmt::Debug for Subscription {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Subscription")
			.field("id", &self.id)
			.field("active", &self.active)
			.finish()
	}
}

impl Subscription {
	/// Removes the listener.
	pub fn unsubscribe(mut self) {
		self.detach();
	}

	/// Keeps the listener registered for the lifetime of the store.
	pub fn forget(mut self) {
		self.active = false;
	}

	fn detach(&mut self) {
		if !self.active {
			return;
		}
		self.active = false;
		if let Some(listeners) = self.listeners.upgrade() {
			listeners.remove(self.id);
		}
	}
}

impl Drop for Subscription {
	fn drop(&mut self) {
		self.detach();
	}
}

/// The single owner of "where the document currently is".
///
/// One store is created per document, wrapping its [`History`]. Every
/// committed navigation (a push, a back, or a change the platform makes on
/// its own, such as the browser back button) notifies each subscriber
/// exactly once, after the new entry is readable through
/// [`get_snapshot`](Self::get_snapshot).
pub struct LocationStore {
	history: Arc<dyn History>,
	history_listener: Mutex<Option<ListenerId>>,
	cache: Mutex<VecDeque<(LocationKey, Arc<Location>)>>,
	capacity: usize,
	listeners: Arc<Listeners>,
}

impl std::fmt::Debug for LocationStore {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("LocationStore")
			.field("cached", &self.cache.lock().len())
			.field("capacity", &self.capacity)
			.field("listeners", &self.listener_count())
			.finish()
	}
}

impl LocationStore {
	/// Creates a store with the default cache capacity.
	pub fn new(history: Arc<dyn History>) -> Self {
		Self::with_capacity(history, DEFAULT_LOCATION_CACHE_CAPACITY)
	}

	/// Creates a store keeping up to `capacity` parsed locations.
	pub fn with_capacity(history: Arc<dyn History>, capacity: usize) -> Self {
		let listeners = Arc::new(Listeners::default());
		let weak = Arc::downgrade(&listeners);
		let history_listener = history.listen(Arc::new(move || {
			if let Some(listeners) = weak.upgrade() {
				listeners.notify();
			}
		}));

		Self {
			history,
			history_listener: Mutex::new(Some(history_listener)),
			cache: Mutex::new(VecDeque::new()),
			capacity: capacity.max(1),
			listeners,
		}
	}

	/// Returns the current location.
	///
	/// Repeated reads of the same history entry return the same `Arc`.
	pub fn get_snapshot(&self) -> Arc<Location> {
		let platform = self.history.location();
		let mut cache = self.cache.lock();

		if let Some((_, location)) = cache.iter().find(|(key, _)| *key == platform.key) {
			return Arc::clone(location);
		}

		let location = Arc::new(Location::from_platform(&platform));
		if cache.len() >= self.capacity {
			cache.pop_front();
		}
		cache.push_back((platform.key, Arc::clone(&location)));
		location
	}

	/// Registers `listener` for committed navigations.
	pub fn subscribe<F>(&self, listener: F) -> Subscription
	where
		F: Fn() + Send + Sync + 'static,
	{
		let id = self.listeners.add(Arc::new(listener));
		Subscription {
			id,
			listeners: Arc::downgrade(&self.listeners),
			active: true,
		}
	}

	/// Commits a new entry with the given query string.
	///
	/// # Errors
	///
	/// Propagates the platform's refusal to push.
	pub fn push(&self, search: &str, state: Option<Value>) -> Result<(), RouterError> {
		tracing::debug!(search, "pushing location");
		self.history.push(search, state)
	}

	/// Asks the platform to go back one entry.
	///
	/// # Errors
	///
	/// Propagates the platform's refusal to navigate.
	pub fn back(&self) -> Result<(), RouterError> {
		tracing::debug!("going back");
		self.history.back()
	}

	/// Stops following the history, removes every listener and clears the
	/// cache.
	pub fn teardown(&self) {
		self.detach_history();
		self.listeners.entries.lock().clear();
		self.cache.lock().clear();
	}

	/// Returns the number of registered listeners.
	pub fn listener_count(&self) -> usize {
		self.listeners.entries.lock().len()
	}

	/// Returns the wrapped history.
	pub fn history(&self) -> &Arc<dyn History> {
		&self.history
	}

	fn detach_history(&self) {
		if let Some(id) = self.history_listener.lock().take() {
			self.history.unlisten(id);
		}
	}
}

impl Drop for LocationStore {
	fn drop(&mut self) {
		self.detach_history();
	}
}
