//! Scoped router context.
//!
//! A [`RouterProvider`] makes two values readable by everything that runs
//! inside its [`scope`](RouterProvider::scope):
//!
//! - the static configuration, through a [`Navigator`]
//! - the current [`Match`], through a [`RouterState`]
//!
//! Scopes nest and the innermost provider wins. Reading a router context
//! where no provider is in scope is an integration bug: [`use_match`],
//! [`use_navigator`] and [`use_router_config`] panic, and the `try_*`
//! variants return [`RouterError::MissingProvider`].
//!
//! Context is per thread, like the rendering loop that reads it.

use crate::config::RouterConfig;
use crate::error::RouterError;
use crate::location::{Location, LocationStore, Subscription};
use crate::matcher::{Match, Matcher};
use crate::navigation::Navigator;
use crate::route::{RouteDefinition, build_route_table};
use crate::transition::{NoViewTransitions, TransitionPlatform};
use gutenberg_urls::Params;
use std::any::Any;
use std::cell::RefCell;
use std::sync::Arc;

thread_local! {
	static CONTEXT_STACK: RefCell<Vec<Box<dyn Any>>> = const { RefCell::new(Vec::new()) };
}

/// Runs `f` with `value` readable through [`use_context`].
///
/// The value is removed when `f` returns or unwinds.
pub fn provide_context<T, R, F>(value: T, f: F) -> R
where
	T: Clone + 'static,
	F: FnOnce() -> R,
{
	CONTEXT_STACK.with(|stack| stack.borrow_mut().push(Box::new(value)));
	let _scope = scopeguard::guard((), |()| {
		CONTEXT_STACK.with(|stack| {
			stack.borrow_mut().pop();
		});
	});
	f()
}

/// Reads the innermost provided value of type `T`.
///
/// Returns `None` outside of any [`provide_context`] scope for `T`.
pub fn use_context<T: Clone + 'static>() -> Option<T> {
	CONTEXT_STACK.with(|stack| {
		stack
			.borrow()
			.iter()
			.rev()
			.find_map(|value| value.downcast_ref::<T>())
			.cloned()
	})
}

/// The match slice of the router context.
///
/// The match is derived from the latest store snapshot on every read, so
/// it changes together with each committed navigation.
pub struct RouterState<A> {
	store: Arc<LocationStore>,
	matcher: Arc<Matcher<A>>,
	path_key: Arc<str>,
}

impl<A> Clone for RouterState<A> {
	fn clone(&self) -> Self {
		Self {
			store: Arc::clone(&self.store),
			matcher: Arc::clone(&self.matcher),
			path_key: Arc::clone(&self.path_key),
		}
	}
}

impl<A> std::fmt::Debug for RouterState<A> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("RouterState")
			.field("path_key", &self.path_key)
			.field("matcher", &self.matcher)
			.finish_non_exhaustive()
	}
}

impl<A: Clone> RouterState<A> {
	/// Returns the match for the current location.
	///
	/// # Panics
	///
	/// Panics when called from a computed area or width of the match it
	/// would return.
	pub fn current_match(&self) -> Arc<Match<A>> {
		self.matcher.resolve(&self.store.get_snapshot(), &self.path_key)
	}

	/// Returns the match for the current location.
	///
	/// # Errors
	///
	/// Returns [`RouterError::ReentrantMatch`] when called from a computed
	/// area or width of the match it would return.
	pub fn try_current_match(&self) -> Result<Arc<Match<A>>, RouterError> {
		self.matcher
			.try_resolve(&self.store.get_snapshot(), &self.path_key)
	}

	/// Returns the current location snapshot.
	pub fn location(&self) -> Arc<Location> {
		self.store.get_snapshot()
	}

	/// Calls `listener` after every committed navigation.
	pub fn subscribe<F>(&self, listener: F) -> Subscription
	where
		F: Fn() + Send + Sync + 'static,
	{
		self.store.subscribe(listener)
	}
}

/// The router root.
///
/// Owns the route table (through its matcher), the configuration and a
/// handle on the document's [`LocationStore`].
///
/// # Example
///
/// ```
/// use gutenberg_router::{
/// 	LocationStore, MemoryHistory, RouteDefinition, RouterConfig, RouterProvider, use_match,
/// };
/// use std::sync::Arc;
///
/// let history = Arc::new(MemoryHistory::new("/wp-admin/site-editor.php?p=%2Fpost%2F7"));
/// let store = Arc::new(LocationStore::new(history));
/// let provider = RouterProvider::new(
/// 	vec![RouteDefinition::<String>::new("post", "/post/:id").area("content", "editor")],
/// 	store,
/// 	RouterConfig::default(),
/// );
///
/// let name = provider.scope(|| use_match::<String>().name.clone());
/// assert_eq!(name, "post");
/// ```
pub struct RouterProvider<A> {
	state: RouterState<A>,
	navigator: Navigator,
}

impl<A> std::fmt::Debug for RouterProvider<A> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("RouterProvider")
			.field("state", &self.state)
			.field("navigator", &self.navigator)
			.finish()
	}
}

impl<A: Clone + 'static> RouterProvider<A> {
	/// Creates a provider whose navigations never animate.
	pub fn new<I>(routes: I, store: Arc<LocationStore>, config: RouterConfig) -> Self
	where
		I: IntoIterator<Item = RouteDefinition<A>>,
	{
		Self::with_platform(routes, store, config, Arc::new(NoViewTransitions))
	}

	/// Creates a provider on top of a host transition platform.
	pub fn with_platform<I>(
		routes: I,
		store: Arc<LocationStore>,
		config: RouterConfig,
		platform: Arc<dyn TransitionPlatform>,
	) -> Self
	where
		I: IntoIterator<Item = RouteDefinition<A>>,
	{
		let table = Arc::new(build_route_table(routes));
		let matcher = Arc::new(Matcher::new(table, config.match_cache_capacity));
		let path_key: Arc<str> = Arc::from(config.path_key.as_str());
		let navigator = Navigator::with_platform(Arc::clone(&store), Arc::new(config), platform);

		Self {
			state: RouterState {
				store,
				matcher,
				path_key,
			},
			navigator,
		}
	}

	/// Runs `f` with this router's context in scope.
	pub fn scope<R, F>(&self, f: F) -> R
	where
		F: FnOnce() -> R,
	{
		provide_context(self.navigator.clone(), || {
			provide_context(self.state.clone(), f)
		})
	}

	/// Returns the navigator handed to scoped readers.
	pub fn navigator(&self) -> &Navigator {
		&self.navigator
	}

	/// Returns the match slice of this router's context.
	pub fn state(&self) -> &RouterState<A> {
		&self.state
	}

	/// Returns the match for the current location.
	pub fn current_match(&self) -> Arc<Match<A>> {
		self.state.current_match()
	}

	/// Builds the route path of the named route.
	///
	/// Returns `None` for an unknown name or a missing parameter.
	pub fn path_for(&self, name: &str, params: &Params) -> Option<String> {
		self.state.matcher.table().reverse(name, params)
	}
}

/// Reads the router state of the innermost provider.
///
/// # Errors
///
/// Returns [`RouterError::MissingProvider`] outside of a provider scope.
pub fn try_use_router_state<A: Clone + 'static>() -> Result<RouterState<A>, RouterError> {
	use_context::<RouterState<A>>().ok_or(RouterError::MissingProvider("match context"))
}

/// Reads the current match.
///
/// # Errors
///
/// Returns [`RouterError::MissingProvider`] outside of a provider scope,
/// and [`RouterError::ReentrantMatch`] from a computed area or width of
/// the current match.
pub fn try_use_match<A: Clone + 'static>() -> Result<Arc<Match<A>>, RouterError> {
	try_use_router_state::<A>().and_then(|state| state.try_current_match())
}

/// Reads the current match.
///
/// # Panics
///
/// Panics outside of a provider scope, or from a computed area or width
/// of the current match.
pub fn use_match<A: Clone + 'static>() -> Arc<Match<A>> {
	try_use_match::<A>().unwrap_or_else(|error| panic!("{}", error))
}

/// Reads the navigator of the innermost provider.
///
/// # Errors
///
/// Returns [`RouterError::MissingProvider`] outside of a provider scope.
pub fn try_use_navigator() -> Result<Navigator, RouterError> {
	use_context::<Navigator>().ok_or(RouterError::MissingProvider("router config context"))
}

/// Reads the navigator of the innermost provider.
///
/// # Panics
///
/// Panics outside of a provider scope.
pub fn use_navigator() -> Navigator {
	try_use_navigator().unwrap_or_else(|error| panic!("{}", error))
}

/// Reads the static configuration of the innermost provider.
///
/// # Panics
///
/// Panics outside of a provider scope.
pub fn use_router_config() -> Arc<RouterConfig> {
	Arc::clone(use_navigator().config())
}
