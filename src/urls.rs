//! URL plumbing: query codec, route patterns and the route table
//!
//! This module provides access to gutenberg-urls, the part of the router
//! that works on plain strings and knows nothing about history.
//!
//! ## Example
//!
//! ```rust
//! use gutenberg::urls::{Query, add_query_args, split_path_and_query};
//!
//! let split = split_path_and_query("/page?layout=list");
//! assert_eq!(split.path, "/page");
//!
//! let mut args = Query::new();
//! args.insert("canvas".to_string(), "edit".to_string());
//! assert_eq!(add_query_args("/page/7", &args), "/page/7?canvas=edit");
//! ```

// Re-export all gutenberg-urls functionality
pub use gutenberg_urls::*;
