//! URL plumbing for the editor router.
//!
//! This crate holds the parts of routing that know nothing about history
//! or rendering:
//!
//! - **Query codec**: [`parse_query`], [`serialize_query`],
//!   [`split_path_and_query`] and [`add_query_args`] convert between query
//!   strings and ordered key-value maps.
//! - **Patterns**: [`PathPattern`] compiles `/post/:postId` style patterns
//!   into anchored regular expressions.
//! - **Route table**: [`RouteTable`] resolves a path to the most specific
//!   registered pattern.
//!
//! # Quick Start
//!
//! ```rust
//! use gutenberg_urls::{RouteTable, parse_query};
//!
//! let mut table = RouteTable::new();
//! table.add("post", "/post/:postId", ()).unwrap();
//! table.add("post-new", "/post/new", ()).unwrap();
//!
//! let query = parse_query("?p=%2Fpost%2Fnew");
//! let resolved = table.resolve(&query["p"]).unwrap();
//! assert_eq!(resolved.name, "post-new");
//! ```

pub mod error;
pub mod pattern;
pub mod query;
pub mod table;

pub use error::PatternError;
pub use pattern::{Params, PathPattern, Segment, Specificity, normalize_path};
pub use query::{
	PathAndQuery, Query, QueryError, add_query_args, get_query_args, parse_query,
	parse_query_as, serialize_pairs, serialize_query, split_path_and_query,
};
pub use table::{ResolvedRoute, RouteTable, TableId};
