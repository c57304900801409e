//! View transition capability.
//!
//! Animated navigations need three things from the host document: its
//! viewport width, a way to toggle a class on the root element, and the
//! view transition API itself. [`TransitionPlatform`] puts all three behind
//! one interface so navigation logic never checks for the API inline.
//! [`NoViewTransitions`] is the fallback for hosts without it.

use crate::error::TransitionError;
use futures::future::{FutureExt, LocalBoxFuture};
use std::future::Future;

/// DOM update run by the platform inside a view transition.
pub type UpdateCallback = Box<dyn FnOnce() + Send>;

/// A started view transition.
///
/// `finished` settles once the animation is over, successfully or not.
/// Browser promises are not `Send`, so neither is this future.
pub struct ViewTransition {
	finished: LocalBoxFuture<'static, Result<(), TransitionError>>,
}

impl std::fmt::Debug for ViewTransition {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("ViewTransition").finish_non_exhaustive()
	}
}

impl ViewTransition {
	/// Wraps the platform's completion signal.
	pub fn new<F>(finished: F) -> Self
	where
		F: Future<Output = Result<(), TransitionError>> + 'static,
	{
		Self {
			finished: finished.boxed_local(),
		}
	}

	/// A transition that has already settled with `outcome`.
	pub fn settled(outcome: Result<(), TransitionError>) -> Self {
		Self::new(futures::future::ready(outcome))
	}

	/// Waits for the transition to settle.
	pub async fn finished(self) -> Result<(), TransitionError> {
		self.finished.await
	}
}

/// Host document capabilities used by animated navigations.
pub trait TransitionPlatform: Send + Sync {
	/// Current viewport width in CSS pixels.
	fn viewport_width(&self) -> u32;

	/// Whether [`start_view_transition`](Self::start_view_transition) is
	/// available.
	fn supports_view_transitions(&self) -> bool;

	/// Adds a class to the document root element.
	fn add_root_class(&self, class: &str);

	/// Removes a class from the document root element.
	fn remove_root_class(&self, class: &str);

	/// Starts a view transition that runs `update` to change the DOM.
	///
	/// # Errors
	///
	/// Returns [`TransitionError`] when the transition cannot start. The
	/// update must not have run in that case.
	fn start_view_transition(&self, update: UpdateCallback)
	-> Result<ViewTransition, TransitionError>;
}

/// Platform without view transitions.
///
/// Navigations through it always take the plain path.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoViewTransitions;

impl TransitionPlatform for NoViewTransitions {
	fn viewport_width(&self) -> u32 {
		0
	}

	fn supports_view_transitions(&self) -> bool {
		false
	}

	fn add_root_class(&self, _class: &str) {}

	fn remove_root_class(&self, _class: &str) {}

	fn start_view_transition(
		&self,
		_update: UpdateCallback,
	) -> Result<ViewTransition, TransitionError> {
		Err(TransitionError::Unsupported)
	}
}
