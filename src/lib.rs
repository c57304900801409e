//! # Gutenberg
//!
//! Client-side router for the block editor's site editing screens.
//!
//! The site editor is a single server-rendered admin page. Every screen it
//! shows is addressed by one query string entry (the *path key*, `p` by
//! default) plus sibling query entries, e.g.
//! `/wp-admin/site-editor.php?p=%2Fpage%2F12&canvas=edit`. This crate keeps
//! that URL, the browser history and the rendered layout in agreement.
//!
//! ## Feature Flags
//!
//! - `full` (default) - Everything below
//! - `urls` - Query codec, route patterns and route table ([`urls`])
//! - `router` - Location store, matching, navigation and context ([`router`])
//!
//! ## Quick Example
//!
//! ```rust
//! use gutenberg::prelude::*;
//! use std::sync::Arc;
//!
//! let store = Arc::new(LocationStore::new(Arc::new(MemoryHistory::new(
//! 	"/wp-admin/site-editor.php?p=%2Fpage%2F12",
//! ))));
//! let provider = RouterProvider::new(
//! 	vec![
//! 		RouteDefinition::<String>::new("pages", "/page").area("content", "pages-list"),
//! 		RouteDefinition::new("page-item", "/page/:postId")
//! 			.computed_area("preview", |ctx| format!("page-{}", ctx.params["postId"])),
//! 	],
//! 	store,
//! 	RouterConfig::default(),
//! );
//!
//! let preview = provider.scope(|| use_match::<String>().area("preview").cloned());
//! assert_eq!(preview.as_deref(), Some("page-12"));
//! ```

#[cfg(feature = "urls")]
pub mod urls;

#[cfg(feature = "router")]
pub mod router;

#[cfg(feature = "urls")]
pub use gutenberg_urls::{PatternError, Query, RouteTable, parse_query, serialize_query};

#[cfg(feature = "router")]
pub use gutenberg_router::{
	Link, Location, LocationStore, Match, MemoryHistory, NavigationOptions, Navigator,
	RouteDefinition, RouterConfig, RouterError, RouterProvider, RouterSettings,
};

/// Convenience re-exports for applications.
pub mod prelude {
	// URL plumbing
	#[cfg(feature = "urls")]
	pub use crate::urls::{
		Params, PathAndQuery, Query, RouteTable, add_query_args, get_query_args, parse_query,
		serialize_query, split_path_and_query,
	};

	#[cfg(feature = "router")]
	pub use crate::router::{
		AreaValue, History, Link, Location, LocationStore, Match, MemoryHistory,
		NOT_FOUND_ROUTE, NavigationOptions, NavigationTarget, Navigator, NoViewTransitions,
		PlatformLocation, RouteContext, RouteDefinition, RouterConfig, RouterError,
		RouterProvider, RouterState, Subscription, TransitionPlatform, build_route_table,
		match_route, try_use_match, try_use_navigator, use_match, use_navigator,
		use_router_config,
	};
}
