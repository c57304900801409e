//! Query string codec.
//!
//! The router addresses all of its state through the query string of one
//! fixed document URL, so this module is the only place where URLs are
//! taken apart and put back together. Values are never coerced: every key
//! and every value is a `String`.

use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use thiserror::Error;
use url::form_urlencoded;

/// A parsed query string, in order of first appearance.
pub type Query = IndexMap<String, String>;

/// Error raised when a query string cannot be deserialized into a typed value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failed to deserialize query string: {0}")]
pub struct QueryError(String);

/// A path split from its embedded query arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathAndQuery {
	/// Normalized path, always starting with `/`.
	pub path: String,
	/// Query arguments that were embedded in the raw path.
	pub query: Query,
}

impl Default for PathAndQuery {
	fn default() -> Self {
		Self {
			path: "/".to_string(),
			query: Query::new(),
		}
	}
}

/// Parses a query string into key-value pairs.
///
/// A leading `?` is ignored, `+` decodes to a space, and a key that
/// appears more than once keeps its last value.
///
/// # Example
///
/// ```
/// use gutenberg_urls::parse_query;
///
/// let query = parse_query("?p=%2Fpost%2F7&canvas=edit");
/// assert_eq!(query.get("p").map(String::as_str), Some("/post/7"));
/// assert_eq!(query.get("canvas").map(String::as_str), Some("edit"));
/// ```
pub fn parse_query(search: &str) -> Query {
	let search = search.strip_prefix('?').unwrap_or(search);
	let mut query = Query::new();
	for (key, value) in form_urlencoded::parse(search.as_bytes()) {
		query.insert(key.into_owned(), value.into_owned());
	}
	query
}

/// Deserializes a query string into a typed value.
///
/// # Errors
///
/// Returns [`QueryError`] when the pairs do not fit `T`.
pub fn parse_query_as<T: DeserializeOwned>(search: &str) -> Result<T, QueryError> {
	let search = search.strip_prefix('?').unwrap_or(search);
	serde_urlencoded::from_str(search).map_err(|e| QueryError(e.to_string()))
}

/// Serializes a query into a query string, without a leading `?`.
pub fn serialize_query(query: &Query) -> String {
	serialize_pairs(query.iter().map(|(k, v)| (k.as_str(), Some(v.as_str()))))
}

/// Serializes optional pairs into a query string, omitting `None` values.
///
/// ```
/// use gutenberg_urls::serialize_pairs;
///
/// let search = serialize_pairs([("p", Some("/pages")), ("canvas", None)]);
/// assert_eq!(search, "p=%2Fpages");
/// ```
pub fn serialize_pairs<'a, I>(pairs: I) -> String
where
	I: IntoIterator<Item = (&'a str, Option<&'a str>)>,
{
	let mut serializer = form_urlencoded::Serializer::new(String::new());
	for (key, value) in pairs {
		if let Some(value) = value {
			serializer.append_pair(key, value);
		}
	}
	serializer.finish()
}

/// Splits a path-like string into its normalized path and embedded query.
///
/// Everything before the first `?` or `#` is the path. It is made absolute
/// and its `.` and `..` segments are resolved, but it is otherwise kept
/// byte for byte: nothing is percent-encoded, and empty segments (`//`)
/// survive. A fragment is dropped.
///
/// ```
/// use gutenberg_urls::split_path_and_query;
///
/// let split = split_path_and_query("/foo?x=1");
/// assert_eq!(split.path, "/foo");
/// assert_eq!(split.query.get("x").map(String::as_str), Some("1"));
///
/// assert_eq!(split_path_and_query("/post/a b").path, "/post/a b");
/// ```
pub fn split_path_and_query(raw: &str) -> PathAndQuery {
	let without_fragment = raw.split('#').next().unwrap_or(raw);
	let (path, search) = match without_fragment.split_once('?') {
		Some((path, search)) => (path, Some(search)),
		None => (without_fragment, None),
	};

	PathAndQuery {
		path: resolve_dot_segments(path),
		query: search.map(parse_query).unwrap_or_default(),
	}
}

/// Makes `path` absolute and removes its dot segments.
///
/// A `..` above the root stays at the root. A trailing `.` or `..` leaves
/// a trailing slash, as a browser would.
fn resolve_dot_segments(path: &str) -> String {
	let relative = path.strip_prefix('/').unwrap_or(path);
	let segments: Vec<&str> = relative.split('/').collect();
	let last = segments.len() - 1;

	let mut resolved: Vec<&str> = Vec::with_capacity(segments.len());
	for (index, segment) in segments.into_iter().enumerate() {
		match segment {
			"." => {
				if index == last {
					resolved.push("");
				}
			}
			".." => {
				resolved.pop();
				if index == last {
					resolved.push("");
				}
			}
			segment => resolved.push(segment),
		}
	}

	format!("/{}", resolved.join("/"))
}

/// Returns the query arguments embedded in a URL.
pub fn get_query_args(url: &str) -> Query {
	let without_fragment = url.split('#').next().unwrap_or(url);
	match without_fragment.split_once('?') {
		Some((_, search)) => parse_query(search),
		None => Query::new(),
	}
}

/// Appends query arguments to a URL.
///
/// Arguments already present on the URL are kept unless `args` overrides
/// them. When `args` is empty the URL is returned unchanged.
///
/// ```
/// use gutenberg_urls::{Query, add_query_args};
///
/// let mut args = Query::new();
/// args.insert("postType".to_string(), "page".to_string());
/// assert_eq!(add_query_args("/pages", &args), "/pages?postType=page");
/// assert_eq!(add_query_args("/pages", &Query::new()), "/pages");
/// ```
pub fn add_query_args(url: &str, args: &Query) -> String {
	if args.is_empty() {
		return url.to_string();
	}

	let (base, mut merged) = match url.split_once('?') {
		Some((base, search)) => (base, parse_query(search)),
		None => (url, Query::new()),
	};
	for (key, value) in args {
		merged.insert(key.clone(), value.clone());
	}

	format!("{}?{}", base, serialize_query(&merged))
}
