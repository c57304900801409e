//! Build-once route table with specificity-ordered resolution.

use crate::error::PatternError;
use crate::pattern::{Params, PathPattern, Specificity};
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_TABLE_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of a [`RouteTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TableId(u64);

#[derive(Debug)]
struct Entry<R> {
	name: String,
	pattern: PathPattern,
	specificity: Specificity,
	payload: R,
}

/// The result of resolving a path against a [`RouteTable`].
#[derive(Debug, PartialEq)]
pub struct ResolvedRoute<'a, R> {
	/// Name the route was registered under.
	pub name: &'a str,
	/// Payload registered with the route.
	pub route: &'a R,
	/// Parameter bindings extracted from the path.
	pub params: Params,
}

/// An ordered collection of named route patterns.
///
/// Resolution picks the matching pattern with the highest
/// [`Specificity`](crate::Specificity); among equally specific patterns the
/// one registered first wins. There is no removal: a table is filled once
/// and then only read.
#[derive(Debug)]
pub struct RouteTable<R> {
	id: TableId,
	entries: Vec<Entry<R>>,
}

impl<R> Default for RouteTable<R> {
	fn default() -> Self {
		Self::new()
	}
}

impl<R> RouteTable<R> {
	/// Creates an empty table with a fresh identity.
	pub fn new() -> Self {
		Self {
			id: TableId(NEXT_TABLE_ID.fetch_add(1, Ordering::Relaxed)),
			entries: Vec::new(),
		}
	}

	/// Returns the identity of this table.
	pub fn id(&self) -> TableId {
		self.id
	}

	/// Registers `payload` under `name` with the given path pattern.
	///
	/// # Errors
	///
	/// Returns [`PatternError`] when the pattern does not compile; the
	/// table is left unchanged in that case.
	pub fn add(
		&mut self,
		name: impl Into<String>,
		pattern: &str,
		payload: R,
	) -> Result<(), PatternError> {
		let pattern = PathPattern::new(pattern)?;
		let name = name.into();
		tracing::trace!(route = %name, pattern = %pattern, "registered route");
		self.entries.push(Entry {
			name,
			specificity: pattern.specificity(),
			pattern,
			payload,
		});
		Ok(())
	}

	/// Resolves `path` to the most specific registered route.
	pub fn resolve(&self, path: &str) -> Option<ResolvedRoute<'_, R>> {
		let mut best: Option<(&Entry<R>, Params)> = None;

		for entry in &self.entries {
			let Some(params) = entry.pattern.matches(path) else {
				continue;
			};
			let better = match &best {
				None => true,
				Some((current, _)) => entry.specificity > current.specificity,
			};
			if better {
				best = Some((entry, params));
			}
		}

		best.map(|(entry, params)| ResolvedRoute {
			name: &entry.name,
			route: &entry.payload,
			params,
		})
	}

	/// Builds a path for the named route.
	///
	/// Returns `None` when the name is unknown or a parameter is missing.
	pub fn reverse(&self, name: &str, params: &Params) -> Option<String> {
		self.entries
			.iter()
			.find(|entry| entry.name == name)
			.and_then(|entry| entry.pattern.reverse(params))
	}

	/// Returns the payload registered under `name`.
	pub fn get(&self, name: &str) -> Option<&R> {
		self.entries
			.iter()
			.find(|entry| entry.name == name)
			.map(|entry| &entry.payload)
	}

	/// Returns the registered names in registration order.
	pub fn names(&self) -> impl Iterator<Item = &str> {
		self.entries.iter().map(|entry| entry.name.as_str())
	}

	/// Returns the number of registered routes.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Returns whether no route is registered.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}
