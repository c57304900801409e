//! Navigation controller.
//!
//! [`Navigator`] turns a raw path into a committed history entry. The path
//! is split, passed through the `beforeNavigate` hook, stored under the
//! reserved query key and pushed. On wide viewports that support it, the
//! push runs inside a view transition with a caller-chosen class on the
//! document root.

use crate::config::RouterConfig;
use crate::error::RouterError;
use crate::link::Link;
use crate::location::LocationStore;
use crate::transition::{NoViewTransitions, TransitionPlatform};
use parking_lot::Mutex;
use serde_json::Value;
use std::sync::Arc;

/// Per-navigation options.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NavigationOptions {
	/// Root class applied during a view transition. `None` or an empty
	/// class navigates without one.
	pub transition: Option<String>,
	/// Opaque state stored with the history entry.
	pub state: Option<Value>,
}

impl NavigationOptions {
	/// Sets the root class applied during the view transition.
	pub fn with_transition(mut self, class: impl Into<String>) -> Self {
		self.transition = Some(class.into());
		self
	}

	/// Sets the opaque state stored with the new entry.
	pub fn with_state(mut self, state: Value) -> Self {
		self.state = Some(state);
		self
	}
}

type PendingPush = Arc<Mutex<Option<(String, Option<Value>)>>>;

/// Cloneable handle performing navigations for one router root.
#[derive(Clone)]
pub struct Navigator {
	store: Arc<LocationStore>,
	config: Arc<RouterConfig>,
	platform: Arc<dyn TransitionPlatform>,
}

impl std::fmt::Debug for Navigator {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Navigator")
			.field("config", &self.config)
			.finish_non_exhaustive()
	}
}

impl Navigator {
	/// Creates a navigator that never animates.
	pub fn new(store: Arc<LocationStore>, config: Arc<RouterConfig>) -> Self {
		Self::with_platform(store, config, Arc::new(NoViewTransitions))
	}

	/// Creates a navigator on top of a host transition platform.
	pub fn with_platform(
		store: Arc<LocationStore>,
		config: Arc<RouterConfig>,
		platform: Arc<dyn TransitionPlatform>,
	) -> Self {
		Self {
			store,
			config,
			platform,
		}
	}

	/// Navigates to `raw_path`, which may carry its own query string.
	///
	/// Resolves once the new entry is committed and, for animated
	/// navigations, once the transition has settled. The root class is
	/// removed whether the transition finishes or fails. A failed
	/// transition does not fail the navigation.
	///
	/// # Errors
	///
	/// Returns the history's error when the push is refused.
	pub async fn navigate(
		&self,
		raw_path: &str,
		options: NavigationOptions,
	) -> Result<(), RouterError> {
		let target = self.config.resolve_target(raw_path);
		let search = target.to_search(&self.config.path_key);
		let NavigationOptions { transition, state } = options;

		match transition.filter(|class| !class.is_empty()) {
			Some(class) if self.can_animate() => {
				tracing::debug!(path = %target.path, %class, "navigating with view transition");
				self.push_in_transition(search, state, class).await
			}
			_ => {
				tracing::debug!(path = %target.path, "navigating");
				self.store.push(&search, state)
			}
		}
	}

	/// Goes back one history entry.
	///
	/// Subscribers hear about it once the platform reports the change.
	///
	/// # Errors
	///
	/// Returns the history's error when it refuses to navigate.
	pub fn back(&self) -> Result<(), RouterError> {
		self.store.back()
	}

	/// Creates a link to `to`.
	pub fn link(&self, to: impl Into<String>, options: NavigationOptions) -> Link {
		Link::new(self.clone(), to.into(), options)
	}

	/// Returns the router configuration.
	pub fn config(&self) -> &Arc<RouterConfig> {
		&self.config
	}

	/// Returns the location store navigations are pushed to.
	pub fn store(&self) -> &Arc<LocationStore> {
		&self.store
	}

	fn can_animate(&self) -> bool {
		self.platform.viewport_width() >= self.config.wide_viewport_min_width
			&& self.platform.supports_view_transitions()
	}

	async fn push_in_transition(
		&self,
		search: String,
		state: Option<Value>,
		class: String,
	) -> Result<(), RouterError> {
		self.platform.add_root_class(&class);
		let platform = Arc::clone(&self.platform);
		let _cleanup = scopeguard::guard(class, move |class| {
			platform.remove_root_class(&class);
		});

		let pending: PendingPush = Arc::new(Mutex::new(Some((search, state))));
		let outcome: Arc<Mutex<Option<Result<(), RouterError>>>> = Arc::new(Mutex::new(None));

		let update = {
			let store = Arc::clone(&self.store);
			let pending = Arc::clone(&pending);
			let outcome = Arc::clone(&outcome);
			Box::new(move || {
				let next = pending.lock().take();
				if let Some((search, state)) = next {
					*outcome.lock() = Some(store.push(&search, state));
				}
			})
		};

		match self.platform.start_view_transition(update) {
			Ok(transition) => {
				if let Err(error) = transition.finished().await {
					tracing::warn!(%error, "view transition did not finish");
				}
			}
			Err(error) => {
				tracing::debug!(%error, "view transition did not start");
			}
		}

		let unrun = pending.lock().take();
		if let Some((search, state)) = unrun {
			tracing::warn!("view transition settled without running its update");
			return self.store.push(&search, state);
		}

		outcome.lock().take().unwrap_or(Ok(()))
	}
}
