//! Error types for route pattern compilation.

use thiserror::Error;

/// Errors that can occur while compiling a route pattern.
///
/// A route table treats every one of these as "this pattern never
/// matches"; the error is only surfaced to callers that register patterns
/// directly through [`RouteTable::add`](crate::RouteTable::add).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
	/// The pattern string exceeds the maximum allowed length.
	#[error("pattern length {length} exceeds maximum allowed length of {max} bytes")]
	TooLong {
		/// Length of the rejected pattern in bytes.
		length: usize,
		/// Maximum allowed length in bytes.
		max: usize,
	},

	/// The pattern has more path segments than allowed.
	#[error("pattern has {count} path segments, exceeding maximum of {max}")]
	TooManySegments {
		/// Number of segments in the rejected pattern.
		count: usize,
		/// Maximum allowed number of segments.
		max: usize,
	},

	/// A `:` or `*` marker is not followed by a parameter name.
	#[error("empty parameter name in pattern '{0}'")]
	EmptyParameterName(String),

	/// The same parameter name appears twice in one pattern.
	#[error("duplicate parameter '{name}' in pattern '{pattern}'")]
	DuplicateParameter {
		/// The repeated parameter name.
		name: String,
		/// The pattern it was found in.
		pattern: String,
	},

	/// The compiled regular expression was rejected.
	#[error("failed to compile pattern regex: {0}")]
	InvalidRegex(String),
}

impl From<regex::Error> for PatternError {
	fn from(err: regex::Error) -> Self {
		Self::InvalidRegex(err.to_string())
	}
}
