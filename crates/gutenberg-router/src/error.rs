//! Error types for routing, navigation and view transitions.

use thiserror::Error;

/// Errors that can occur while routing or navigating.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouterError {
	/// A router context was read outside of a provider scope.
	///
	/// This is an integration bug: the reading code is not rendered
	/// beneath a [`RouterProvider`](crate::RouterProvider).
	#[error("{0} read outside of a RouterProvider scope")]
	MissingProvider(&'static str),

	/// The platform history rejected a navigation.
	#[error("navigation failed: {0}")]
	NavigationFailed(String),

	/// The platform history is unavailable.
	#[error("history unavailable: {0}")]
	HistoryUnavailable(String),

	/// A computed area or width resolved the location it is part of.
	#[error("route resolution re-entered while matching {0:?}")]
	ReentrantMatch(String),
}

/// Outcome of a view transition that did not finish normally.
///
/// A failed transition never fails the navigation it wraps; the router
/// only logs it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
	/// The platform cannot run view transitions.
	#[error("view transitions are not supported")]
	Unsupported,

	/// The platform aborted or skipped the transition.
	#[error("view transition aborted: {0}")]
	Aborted(String),
}
