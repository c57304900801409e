//! Router settings.
//!
//! Settings are plain data that can be embedded in an application's
//! configuration file. Everything that is not data (the `beforeNavigate`
//! hook) is added when the settings become a
//! [`RouterConfig`](crate::RouterConfig).
//!
//! ```toml
//! path_key = "p"
//! wide_viewport_min_width = 782
//! location_cache_capacity = 16
//! match_cache_capacity = 32
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default reserved query key that carries the route path.
pub const DEFAULT_PATH_KEY: &str = "p";

/// Viewport width (in CSS pixels) from which navigations may animate.
pub const DEFAULT_WIDE_VIEWPORT_MIN_WIDTH: u32 = 782;

/// Default number of memoized locations.
pub const DEFAULT_LOCATION_CACHE_CAPACITY: usize = 16;

/// Default number of memoized matches.
pub const DEFAULT_MATCH_CACHE_CAPACITY: usize = 32;

/// Errors raised while loading router settings.
#[derive(Debug, Error)]
pub enum SettingsError {
	/// The TOML source could not be parsed.
	#[error("failed to parse router settings: {0}")]
	Parse(#[from] toml::de::Error),

	/// A field holds a value the router cannot work with.
	#[error("invalid router setting `{field}`: {reason}")]
	Invalid {
		/// Name of the offending field.
		field: &'static str,
		/// Why the value was rejected.
		reason: &'static str,
	},
}

/// Router settings, with a default for every field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouterSettings {
	/// Reserved query key holding the route path.
	pub path_key: String,
	/// Minimum viewport width for animated navigations.
	pub wide_viewport_min_width: u32,
	/// Number of parsed locations kept by the location store.
	pub location_cache_capacity: usize,
	/// Number of resolved matches kept by the matcher.
	pub match_cache_capacity: usize,
}

impl Default for RouterSettings {
	fn default() -> Self {
		Self {
			path_key: DEFAULT_PATH_KEY.to_string(),
			wide_viewport_min_width: DEFAULT_WIDE_VIEWPORT_MIN_WIDTH,
			location_cache_capacity: DEFAULT_LOCATION_CACHE_CAPACITY,
			match_cache_capacity: DEFAULT_MATCH_CACHE_CAPACITY,
		}
	}
}

impl RouterSettings {
	/// Parses and validates settings from a TOML document.
	///
	/// # Errors
	///
	/// Returns [`SettingsError`] when the document does not parse or a
	/// value fails [`validate`](Self::validate).
	pub fn from_toml_str(source: &str) -> Result<Self, SettingsError> {
		let settings: Self = toml::from_str(source)?;
		settings.validate()?;
		Ok(settings)
	}

	/// Checks that every value is usable.
	///
	/// # Errors
	///
	/// Returns [`SettingsError::Invalid`] for an empty path key or a zero
	/// cache capacity.
	pub fn validate(&self) -> Result<(), SettingsError> {
		if self.path_key.is_empty() {
			return Err(SettingsError::Invalid {
				field: "path_key",
				reason: "must not be empty",
			});
		}
		if self.location_cache_capacity == 0 {
			return Err(SettingsError::Invalid {
				field: "location_cache_capacity",
				reason: "must be at least 1",
			});
		}
		if self.match_cache_capacity == 0 {
			return Err(SettingsError::Invalid {
				field: "match_cache_capacity",
				reason: "must be at least 1",
			});
		}
		Ok(())
	}
}
