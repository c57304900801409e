//! Route pattern compilation and matching.
//!
//! Patterns are written the way the editor screens declare them:
//!
//! - `/pages` - literal segments only
//! - `/post/:postId` - a named parameter capturing one non-empty segment
//! - `/files/*rest` - a wildcard capturing the remainder of the path,
//!   separators included
//!
//! A pattern compiles to an anchored regular expression with one named
//! capture group per parameter.

use crate::error::PatternError;
use indexmap::IndexMap;
use std::cmp::Ordering;

/// Parameter bindings extracted from a matched path, in pattern order.
pub type Params = IndexMap<String, String>;

/// Maximum allowed length for a pattern string in bytes.
const MAX_PATTERN_LENGTH: usize = 1024;

/// Maximum allowed number of path segments in a pattern.
const MAX_PATH_SEGMENTS: usize = 32;

/// Maximum allowed size for a compiled pattern regex (in bytes).
const MAX_REGEX_SIZE: usize = 1 << 20; // 1 MiB

/// One segment of a compiled pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
	/// Literal text matched exactly.
	Static(String),
	/// `:name`, one non-empty segment.
	Param(String),
	/// `*name`, the rest of the path.
	Wildcard(String),
}

impl Segment {
	fn rank(&self) -> u8 {
		match self {
			Self::Static(_) => 3,
			Self::Param(_) => 2,
			Self::Wildcard(_) => 1,
		}
	}
}

/// How specific a pattern is, used to order overlapping matches.
///
/// Segments are compared left to right; at the first difference a static
/// segment outranks a parameter, which outranks a wildcard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Specificity(Vec<u8>);

impl PartialOrd for Specificity {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		Some(self.cmp(other))
	}
}

impl Ord for Specificity {
	fn cmp(&self, other: &Self) -> Ordering {
		self.0.cmp(&other.0)
	}
}

/// A compiled route pattern.
#[derive(Debug, Clone)]
pub struct PathPattern {
	/// The original pattern string.
	pattern: String,
	/// Compiled regex pattern.
	regex: regex::Regex,
	/// Parsed segments, root excluded.
	segments: Vec<Segment>,
	/// Parameter names in order.
	param_names: Vec<String>,
}

impl PathPattern {
	/// Compiles a pattern string.
	///
	/// # Errors
	///
	/// Returns [`PatternError`] if:
	/// - the pattern exceeds 1024 bytes or 32 segments
	/// - a `:` or `*` marker has no name, or a name repeats
	/// - the regex engine rejects the result (for example a parameter name
	///   that is not a valid capture group name)
	pub fn new(pattern: &str) -> Result<Self, PatternError> {
		if pattern.len() > MAX_PATTERN_LENGTH {
			return Err(PatternError::TooLong {
				length: pattern.len(),
				max: MAX_PATTERN_LENGTH,
			});
		}

		let segment_count = pattern.split('/').count();
		if segment_count > MAX_PATH_SEGMENTS {
			return Err(PatternError::TooManySegments {
				count: segment_count,
				max: MAX_PATH_SEGMENTS,
			});
		}

		let segments = Self::parse_segments(pattern)?;
		let param_names: Vec<String> = segments
			.iter()
			.filter_map(|segment| match segment {
				Segment::Param(name) | Segment::Wildcard(name) => Some(name.clone()),
				Segment::Static(_) => None,
			})
			.collect();

		for (i, name) in param_names.iter().enumerate() {
			if param_names[..i].contains(name) {
				return Err(PatternError::DuplicateParameter {
					name: name.clone(),
					pattern: pattern.to_string(),
				});
			}
		}

		let regex = regex::RegexBuilder::new(&Self::compile_regex(&segments))
			.size_limit(MAX_REGEX_SIZE)
			.build()?;

		Ok(Self {
			pattern: pattern.to_string(),
			regex,
			segments,
			param_names,
		})
	}

	fn parse_segments(pattern: &str) -> Result<Vec<Segment>, PatternError> {
		let normalized = normalize_path(pattern);
		if normalized == "/" {
			return Ok(Vec::new());
		}

		normalized[1..]
			.split('/')
			.map(|raw| {
				if let Some(name) = raw.strip_prefix(':') {
					if name.is_empty() {
						return Err(PatternError::EmptyParameterName(pattern.to_string()));
					}
					Ok(Segment::Param(name.to_string()))
				} else if let Some(name) = raw.strip_prefix('*') {
					if name.is_empty() {
						return Err(PatternError::EmptyParameterName(pattern.to_string()));
					}
					Ok(Segment::Wildcard(name.to_string()))
				} else {
					Ok(Segment::Static(raw.to_string()))
				}
			})
			.collect()
	}

	fn compile_regex(segments: &[Segment]) -> String {
		if segments.is_empty() {
			return "^/$".to_string();
		}

		let mut regex_str = String::from("^");
		for segment in segments {
			regex_str.push('/');
			match segment {
				Segment::Static(text) => regex_str.push_str(&regex::escape(text)),
				Segment::Param(name) => regex_str.push_str(&format!("(?P<{}>[^/]+)", name)),
				Segment::Wildcard(name) => regex_str.push_str(&format!("(?P<{}>.+)", name)),
			}
		}
		regex_str.push('$');
		regex_str
	}

	/// Returns the original pattern string.
	pub fn pattern(&self) -> &str {
		&self.pattern
	}

	/// Returns the parsed segments.
	pub fn segments(&self) -> &[Segment] {
		&self.segments
	}

	/// Returns the parameter names in pattern order.
	pub fn param_names(&self) -> &[String] {
		&self.param_names
	}

	/// Returns whether this pattern has no parameters.
	pub fn is_exact(&self) -> bool {
		self.param_names.is_empty()
	}

	/// Returns the precedence of this pattern among overlapping matches.
	pub fn specificity(&self) -> Specificity {
		Specificity(self.segments.iter().map(Segment::rank).collect())
	}

	/// Attempts to match a path, returning the parameter bindings.
	pub fn matches(&self, path: &str) -> Option<Params> {
		let path = normalize_path(path);
		self.regex.captures(&path).map(|caps| {
			self.param_names
				.iter()
				.filter_map(|name| {
					caps.name(name)
						.map(|m| (name.clone(), m.as_str().to_string()))
				})
				.collect()
		})
	}

	/// Checks if this pattern would match the given path.
	pub fn is_match(&self, path: &str) -> bool {
		self.regex.is_match(&normalize_path(path))
	}

	/// Builds a path from this pattern with the given parameters.
	///
	/// Returns `None` when a parameter is missing.
	pub fn reverse(&self, params: &Params) -> Option<String> {
		if self.segments.is_empty() {
			return Some("/".to_string());
		}

		let mut path = String::new();
		for segment in &self.segments {
			path.push('/');
			match segment {
				Segment::Static(text) => path.push_str(text),
				Segment::Param(name) | Segment::Wildcard(name) => path.push_str(params.get(name)?),
			}
		}
		Some(path)
	}
}

impl PartialEq for PathPattern {
	fn eq(&self, other: &Self) -> bool {
		self.pattern == other.pattern
	}
}

impl Eq for PathPattern {}

impl std::fmt::Display for PathPattern {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.pattern)
	}
}

/// Normalizes a path for matching: leading slash added, trailing slash
/// dropped (the root stays `/`).
pub fn normalize_path(path: &str) -> String {
	let trimmed = path.trim_end_matches('/');
	if trimmed.is_empty() {
		"/".to_string()
	} else if trimmed.starts_with('/') {
		trimmed.to_string()
	} else {
		format!("/{}", trimmed)
	}
}
