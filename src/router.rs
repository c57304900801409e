//! Query-string router
//!
//! This module provides access to gutenberg-router:
//!
//! - **Location Store**: subscribable, memoized view of the history entry
//! - **Matching**: route resolution into render-ready area payloads
//! - **Navigation**: pushes gated behind optional view transitions
//! - **Context**: scoped access to the current match and navigator
//!
//! ## Example
//!
//! ```rust
//! use gutenberg::router::{LocationStore, MemoryHistory, RouteDefinition, RouterConfig, RouterProvider};
//! use std::sync::Arc;
//!
//! let store = Arc::new(LocationStore::new(Arc::new(MemoryHistory::new(
//! 	"/wp-admin/site-editor.php?p=%2Fstyles",
//! ))));
//! let provider = RouterProvider::new(
//! 	vec![RouteDefinition::<String>::new("styles", "/styles").area("sidebar", "global-styles")],
//! 	store,
//! 	RouterConfig::default(),
//! );
//!
//! assert_eq!(provider.current_match().name, "styles");
//! ```

// Re-export all gutenberg-router functionality
pub use gutenberg_router::*;
