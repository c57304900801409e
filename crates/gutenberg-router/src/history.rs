//! Platform history abstraction.
//!
//! [`History`] is the navigation primitive the
//! [`LocationStore`](crate::LocationStore) wraps. The router only ever
//! changes the query string of the current document, so pushing takes a
//! search string and keeps the pathname.
//!
//! [`MemoryHistory`] keeps the stack in memory with browser semantics. It
//! backs server-side rendering, headless hosts and tests; the wasm32
//! `BrowserHistory` wraps `window.history`.

use crate::error::RouterError;
use parking_lot::Mutex;
use serde_json::Value;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_LOCATION_KEY: AtomicU64 = AtomicU64::new(1);

/// Identity of one committed history entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LocationKey(u64);

impl LocationKey {
	/// Allocates a fresh, process-unique key.
	pub fn next() -> Self {
		Self(NEXT_LOCATION_KEY.fetch_add(1, Ordering::Relaxed))
	}

	/// Returns the raw key value.
	pub fn value(&self) -> u64 {
		self.0
	}
}

/// A history entry as the platform reports it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformLocation {
	/// Identity of this entry.
	pub key: LocationKey,
	/// Document path, e.g. `/wp-admin/site-editor.php`.
	pub pathname: String,
	/// Query string including the leading `?`, or empty.
	pub search: String,
	/// Opaque state pushed with the entry.
	pub state: Option<Value>,
}

impl PlatformLocation {
	/// Creates an entry with a fresh key.
	pub fn new(pathname: impl Into<String>, search: &str, state: Option<Value>) -> Self {
		Self {
			key: LocationKey::next(),
			pathname: pathname.into(),
			search: normalize_search(search),
			state,
		}
	}

	/// Parses an entry from a path-and-query URL such as `/admin.php?p=%2F`.
	pub fn from_url(url: &str) -> Self {
		let url = url.split('#').next().unwrap_or(url);
		match url.split_once('?') {
			Some((pathname, search)) => Self::new(pathname, search, None),
			None => Self::new(url, "", None),
		}
	}

	/// Returns the path-and-query form of this entry.
	pub fn href(&self) -> String {
		format!("{}{}", self.pathname, self.search)
	}
}

/// Adds the leading `?` to a non-empty search string.
pub(crate) fn normalize_search(search: &str) -> String {
	let trimmed = search.strip_prefix('?').unwrap_or(search);
	if trimmed.is_empty() {
		String::new()
	} else {
		format!("?{}", trimmed)
	}
}

/// Callback invoked after the platform committed a location change.
pub type HistoryListener = Arc<dyn Fn() + Send + Sync>;

/// Handle of a listener registered through [`History::listen`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Listener bookkeeping for [`History`] implementations.
///
/// Listeners run in registration order, from a snapshot taken before the
/// first one runs, with no lock held.
#[derive(Default)]
pub struct HistoryListeners {
	next_id: AtomicU64,
	entries: Mutex<Vec<(ListenerId, HistoryListener)>>,
}

impl std::fmt::Debug for HistoryListeners {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("HistoryListeners")
			.field("len", &self.len())
			.finish()
	}
}

impl HistoryListeners {
	/// Registers `listener`.
	pub fn add(&self, listener: HistoryListener) -> ListenerId {
		let id = ListenerId(self.next_id.fetch_add(1, Ordering::Relaxed));
		self.entries.lock().push((id, listener));
		id
	}

	/// Removes the listener registered as `id`. Unknown ids are ignored.
	pub fn remove(&self, id: ListenerId) {
		self.entries.lock().retain(|(entry_id, _)| *entry_id != id);
	}

	/// Runs every registered listener.
	pub fn notify(&self) {
		let listeners: Vec<HistoryListener> = self
			.entries
			.lock()
			.iter()
			.map(|(_, listener)| Arc::clone(listener))
			.collect();
		for listener in listeners {
			listener();
		}
	}

	/// Returns the number of registered listeners.
	pub fn len(&self) -> usize {
		self.entries.lock().len()
	}

	/// Returns whether no listener is registered.
	pub fn is_empty(&self) -> bool {
		self.entries.lock().is_empty()
	}
}

/// The platform navigation primitive.
pub trait History: Send + Sync {
	/// Returns the current entry.
	///
	/// Implementations return the same `Arc` for as long as the entry is
	/// current.
	fn location(&self) -> Arc<PlatformLocation>;

	/// Commits a new entry with the current pathname and the given search.
	///
	/// Listeners run once the new entry is observable through
	/// [`location`](Self::location).
	fn push(&self, search: &str, state: Option<Value>) -> Result<(), RouterError>;

	/// Goes back one entry.
	///
	/// Listeners run whenever the platform reports the change, which may
	/// be after this call returns.
	fn back(&self) -> Result<(), RouterError>;

	/// Registers a listener for committed location changes.
	fn listen(&self, listener: HistoryListener) -> ListenerId;

	/// Removes a listener registered through [`listen`](Self::listen).
	fn unlisten(&self, id: ListenerId);
}

#[derive(Debug)]
struct MemoryStack {
	entries: Vec<Arc<PlatformLocation>>,
	index: usize,
}

/// In-memory history stack.
///
/// `push` drops any forward entries, and `back`/`forward` at the edge of
/// the stack do nothing, like a browser tab.
///
/// # Example
///
/// ```
/// use gutenberg_router::{History, MemoryHistory};
///
/// let history = MemoryHistory::new("/wp-admin/site-editor.php");
/// history.push("p=%2Fpages", None).unwrap();
/// assert_eq!(history.location().search, "?p=%2Fpages");
///
/// history.back().unwrap();
/// assert_eq!(history.location().search, "");
/// ```
pub struct MemoryHistory {
	stack: Mutex<MemoryStack>,
	listeners: HistoryListeners,
}

impl std::fmt::Debug for MemoryHistory {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let stack = self.stack.lock();
		f.debug_struct("MemoryHistory")
			.field("entries", &stack.entries.len())
			.field("index", &stack.index)
			.field("listeners", &self.listeners.len())
			.finish()
	}
}

impl MemoryHistory {
	/// Creates a history with one entry for `initial_url`.
	pub fn new(initial_url: &str) -> Self {
		Self {
			stack: Mutex::new(MemoryStack {
				entries: vec![Arc::new(PlatformLocation::from_url(initial_url))],
				index: 0,
			}),
			listeners: HistoryListeners::default(),
		}
	}

	/// Goes forward one entry.
	pub fn forward(&self) -> Result<(), RouterError> {
		self.go(1)
	}

	/// Moves `delta` entries through the stack.
	///
	/// A move past either end of the stack is ignored and notifies nobody.
	pub fn go(&self, delta: isize) -> Result<(), RouterError> {
		let moved = {
			let mut stack = self.stack.lock();
			let target = stack.index as isize + delta;
			if delta != 0 && target >= 0 && (target as usize) < stack.entries.len() {
				stack.index = target as usize;
				true
			} else {
				false
			}
		};

		if moved {
			tracing::trace!(delta, "memory history moved");
			self.notify();
		}
		Ok(())
	}

	/// Returns the number of entries in the stack.
	pub fn len(&self) -> usize {
		self.stack.lock().entries.len()
	}

	/// Returns whether the stack is empty, which never happens.
	pub fn is_empty(&self) -> bool {
		self.stack.lock().entries.is_empty()
	}

	/// Returns the index of the current entry.
	pub fn index(&self) -> usize {
		self.stack.lock().index
	}

	/// Returns the number of registered listeners.
	pub fn listener_count(&self) -> usize {
		self.listeners.len()
	}

	fn notify(&self) {
		self.listeners.notify();
	}
}

impl History for MemoryHistory {
	fn location(&self) -> Arc<PlatformLocation> {
		let stack = self.stack.lock();
		Arc::clone(&stack.entries[stack.index])
	}

	fn push(&self, search: &str, state: Option<Value>) -> Result<(), RouterError> {
		{
			let mut stack = self.stack.lock();
			let pathname = stack.entries[stack.index].pathname.clone();
			let next = stack.index + 1;
			stack.entries.truncate(next);
			stack
				.entries
				.push(Arc::new(PlatformLocation::new(pathname, search, state)));
			stack.index = next;
		}
		self.notify();
		Ok(())
	}

	fn back(&self) -> Result<(), RouterError> {
		self.go(-1)
	}

	fn listen(&self, listener: HistoryListener) -> ListenerId {
		self.listeners.add(listener)
	}

	fn unlisten(&self, id: ListenerId) {
		self.listeners.remove(id);
	}
}
