//! Query-string router for the site editor.
//!
//! The whole routing state of the editor lives in one query string entry
//! (the *path key*, `p` by default) on a single server-rendered document.
//! This crate keeps that entry, the history stack and the rendered layout
//! in agreement:
//!
//! - **History**: [`History`] is the platform primitive. [`MemoryHistory`]
//!   backs tests and headless hosts; `BrowserHistory` wraps
//!   `window.history` on wasm32.
//! - **Location store**: [`LocationStore`] parses the current entry into a
//!   [`Location`], memoized per entry, and notifies subscribers once per
//!   committed navigation.
//! - **Routes**: [`RouteDefinition`] names a pattern and its area payloads,
//!   literal or computed ([`AreaValue`]).
//! - **Matching**: [`match_route`] and the memoizing [`Matcher`] turn a
//!   location into a render-ready [`Match`].
//! - **Navigation**: [`Navigator`] commits navigations, optionally inside a
//!   view transition provided by a [`TransitionPlatform`]. [`Link`] pairs
//!   an `href` with the navigation it performs.
//! - **Context**: [`RouterProvider`] scopes the current match and the
//!   configuration; [`use_match`] and [`use_navigator`] read them.
//!
//! # Quick Start
//!
//! ```rust
//! use gutenberg_router::{
//! 	LocationStore, MemoryHistory, NavigationOptions, RouteDefinition, RouterConfig,
//! 	RouterProvider,
//! };
//! use std::sync::Arc;
//!
//! # futures::executor::block_on(async {
//! let history = Arc::new(MemoryHistory::new("/wp-admin/site-editor.php"));
//! let store = Arc::new(LocationStore::new(history));
//!
//! let provider = RouterProvider::new(
//! 	vec![
//! 		RouteDefinition::<String>::new("home", "/").area("content", "dashboard"),
//! 		RouteDefinition::new("post", "/post/:id")
//! 			.computed_area("content", |ctx| format!("post-{}", ctx.params["id"])),
//! 	],
//! 	store,
//! 	RouterConfig::default(),
//! );
//!
//! provider
//! 	.navigator()
//! 	.navigate("/post/7", NavigationOptions::default())
//! 	.await
//! 	.unwrap();
//!
//! let matched = provider.current_match();
//! assert_eq!(matched.name, "post");
//! assert_eq!(matched.area("content").map(String::as_str), Some("post-7"));
//! # });
//! ```

pub mod config;
pub mod context;
pub mod error;
pub mod history;
pub mod link;
pub mod location;
pub mod matcher;
pub mod navigation;
pub mod route;
pub mod settings;
pub mod transition;

#[cfg(target_arch = "wasm32")]
pub mod browser;

pub use config::{BeforeNavigate, NavigationTarget, RouterConfig};
pub use context::{
	RouterProvider, RouterState, provide_context, try_use_match, try_use_navigator,
	try_use_router_state, use_context, use_match, use_navigator, use_router_config,
};
pub use error::{RouterError, TransitionError};
pub use history::{
	History, HistoryListener, HistoryListeners, ListenerId, LocationKey, MemoryHistory,
	PlatformLocation,
};
pub use link::Link;
pub use location::{Location, LocationStore, Subscription};
pub use matcher::{Match, Matcher, NOT_FOUND_ROUTE, match_route};
pub use navigation::{NavigationOptions, Navigator};
pub use route::{AreaValue, ComputeFn, RouteContext, RouteDefinition, build_route_table};
pub use settings::{RouterSettings, SettingsError};
pub use transition::{NoViewTransitions, TransitionPlatform, UpdateCallback, ViewTransition};

#[cfg(target_arch = "wasm32")]
pub use browser::{BrowserHistory, BrowserTransitions};

/// Result type for router operations.
pub type Result<T> = std::result::Result<T, RouterError>;
