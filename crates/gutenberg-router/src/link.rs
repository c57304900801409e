//! Navigation links.
//!
//! A [`Link`] pairs the URL an anchor should display with the navigation
//! it performs when activated, so a plain click can be intercepted while
//! "open in new tab" still gets a real URL.

use crate::error::RouterError;
use crate::navigation::{NavigationOptions, Navigator};

/// A prepared navigation to one raw path.
#[derive(Debug, Clone)]
pub struct Link {
	to: String,
	href: String,
	options: NavigationOptions,
	navigator: Navigator,
}

impl Link {
	pub(crate) fn new(navigator: Navigator, to: String, options: NavigationOptions) -> Self {
		let config = navigator.config();
		let target = config.resolve_target(&to);
		let pathname = navigator.store().get_snapshot().path.clone();
		let href = format!("{}?{}", pathname, target.to_search(&config.path_key));

		Self {
			to,
			href,
			options,
			navigator,
		}
	}

	/// Document URL of the destination, with the `beforeNavigate` hook
	/// applied.
	pub fn href(&self) -> &str {
		&self.href
	}

	/// Raw path as given by the caller.
	pub fn to(&self) -> &str {
		&self.to
	}

	/// Options applied on activation.
	pub fn options(&self) -> &NavigationOptions {
		&self.options
	}

	/// Performs the navigation.
	///
	/// # Errors
	///
	/// See [`Navigator::navigate`].
	pub async fn activate(&self) -> Result<(), RouterError> {
		self.navigator
			.navigate(&self.to, self.options.clone())
			.await
	}
}
