//! Browser bindings (wasm32 only).
//!
//! [`BrowserHistory`] wraps `window.history` and its `popstate` event.
//! [`BrowserTransitions`] exposes `document.startViewTransition` and the
//! root element's class list. Neither keeps a JavaScript object: every call
//! looks up the window again, which keeps both types `Send + Sync` on the
//! single-threaded wasm target.

use crate::error::{RouterError, TransitionError};
use crate::history::{
	History, HistoryListener, HistoryListeners, ListenerId, PlatformLocation, normalize_search,
};
use crate::transition::{TransitionPlatform, UpdateCallback, ViewTransition};
use parking_lot::Mutex;
use serde_json::Value;
use std::sync::Arc;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

fn window() -> Result<web_sys::Window, RouterError> {
	web_sys::window().ok_or_else(|| RouterError::HistoryUnavailable("no window".to_string()))
}

fn js_error(value: JsValue) -> String {
	value
		.as_string()
		.unwrap_or_else(|| format!("{:?}", value))
}

fn state_to_js(state: Option<&Value>) -> JsValue {
	state
		.and_then(|value| serde_json::to_string(value).ok())
		.and_then(|json| js_sys::JSON::parse(&json).ok())
		.unwrap_or(JsValue::NULL)
}

fn state_from_js(state: JsValue) -> Option<Value> {
	if state.is_null() || state.is_undefined() {
		return None;
	}
	let json = js_sys::JSON::stringify(&state).ok()?.as_string()?;
	serde_json::from_str(&json).ok()
}

#[derive(Default)]
struct Shared {
	current: Mutex<Option<Arc<PlatformLocation>>>,
	listeners: HistoryListeners,
}

impl Shared {
	fn invalidate_and_notify(&self) {
		*self.current.lock() = None;
		self.listeners.notify();
	}
}

/// `window.history` as a [`History`].
pub struct BrowserHistory {
	shared: Arc<Shared>,
}

impl std::fmt::Debug for BrowserHistory {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("BrowserHistory")
			.field("listeners", &self.shared.listeners.len())
			.finish()
	}
}

impl BrowserHistory {
	/// Binds to the current window and starts listening for `popstate`.
	///
	/// # Errors
	///
	/// Returns [`RouterError::HistoryUnavailable`] outside of a browser.
	pub fn new() -> Result<Self, RouterError> {
		let window = window()?;
		let shared = Arc::new(Shared::default());

		let popstate_shared = Arc::clone(&shared);
		let closure = Closure::wrap(Box::new(move |_event: web_sys::Event| {
			tracing::trace!("popstate");
			popstate_shared.invalidate_and_notify();
		}) as Box<dyn FnMut(_)>);
		window
			.add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref())
			.map_err(|err| RouterError::HistoryUnavailable(js_error(err)))?;
		// The listener lives as long as the page.
		closure.forget();

		Ok(Self { shared })
	}

	fn read_location() -> Result<PlatformLocation, RouterError> {
		let window = window()?;
		let location = window.location();
		let pathname = location
			.pathname()
			.map_err(|err| RouterError::HistoryUnavailable(js_error(err)))?;
		let search = location
			.search()
			.map_err(|err| RouterError::HistoryUnavailable(js_error(err)))?;
		let state = window
			.history()
			.ok()
			.and_then(|history| history.state().ok())
			.and_then(state_from_js);
		Ok(PlatformLocation::new(pathname, &search, state))
	}
}

impl History for BrowserHistory {
	fn location(&self) -> Arc<PlatformLocation> {
		let mut current = self.shared.current.lock();
		if let Some(location) = current.as_ref() {
			return Arc::clone(location);
		}

		let location = Arc::new(Self::read_location().unwrap_or_else(|error| {
			tracing::warn!(%error, "cannot read window location");
			PlatformLocation::new("/", "", None)
		}));
		*current = Some(Arc::clone(&location));
		location
	}

	fn push(&self, search: &str, state: Option<Value>) -> Result<(), RouterError> {
		let window = window()?;
		let pathname = window
			.location()
			.pathname()
			.map_err(|err| RouterError::HistoryUnavailable(js_error(err)))?;
		let url = format!("{}{}", pathname, normalize_search(search));
		window
			.history()
			.map_err(|err| RouterError::HistoryUnavailable(js_error(err)))?
			.push_state_with_url(&state_to_js(state.as_ref()), "", Some(&url))
			.map_err(|err| RouterError::NavigationFailed(js_error(err)))?;

		self.shared.invalidate_and_notify();
		Ok(())
	}

	fn back(&self) -> Result<(), RouterError> {
		window()?
			.history()
			.map_err(|err| RouterError::HistoryUnavailable(js_error(err)))?
			.back()
			.map_err(|err| RouterError::NavigationFailed(js_error(err)))
	}

	fn listen(&self, listener: HistoryListener) -> ListenerId {
		self.shared.listeners.add(listener)
	}

	fn unlisten(&self, id: ListenerId) {
		self.shared.listeners.remove(id);
	}
}

/// The browser document as a [`TransitionPlatform`].
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserTransitions;

impl BrowserTransitions {
	fn document() -> Option<web_sys::Document> {
		web_sys::window().and_then(|window| window.document())
	}

	fn root_class_list() -> Option<web_sys::DomTokenList> {
		Self::document()
			.and_then(|document| document.document_element())
			.map(|root| root.class_list())
	}
}

impl TransitionPlatform for BrowserTransitions {
	fn viewport_width(&self) -> u32 {
		web_sys::window()
			.and_then(|window| window.inner_width().ok())
			.and_then(|width| width.as_f64())
			.map(|width| width as u32)
			.unwrap_or(0)
	}

	fn supports_view_transitions(&self) -> bool {
		Self::document()
			.map(|document| {
				js_sys::Reflect::has(&document, &JsValue::from_str("startViewTransition"))
					.unwrap_or(false)
			})
			.unwrap_or(false)
	}

	fn add_root_class(&self, class: &str) {
		if let Some(classes) = Self::root_class_list() {
			if let Err(err) = classes.add_1(class) {
				tracing::warn!(class, error = %js_error(err), "cannot add root class");
			}
		}
	}

	fn remove_root_class(&self, class: &str) {
		if let Some(classes) = Self::root_class_list() {
			if let Err(err) = classes.remove_1(class) {
				tracing::warn!(class, error = %js_error(err), "cannot remove root class");
			}
		}
	}

	fn start_view_transition(
		&self,
		update: UpdateCallback,
	) -> Result<ViewTransition, TransitionError> {
		let document = Self::document().ok_or(TransitionError::Unsupported)?;
		let start = js_sys::Reflect::get(&document, &JsValue::from_str("startViewTransition"))
			.ok()
			.and_then(|value| value.dyn_into::<js_sys::Function>().ok())
			.ok_or(TransitionError::Unsupported)?;

		let callback = Closure::once_into_js(move || update());
		let transition = start
			.call1(&document, &callback)
			.map_err(|err| TransitionError::Aborted(js_error(err)))?;
		let finished = js_sys::Reflect::get(&transition, &JsValue::from_str("finished"))
			.ok()
			.and_then(|value| value.dyn_into::<js_sys::Promise>().ok())
			.ok_or_else(|| TransitionError::Aborted("missing finished promise".to_string()))?;

		Ok(ViewTransition::new(async move {
			JsFuture::from(finished)
				.await
				.map(|_| ())
				.map_err(|err| TransitionError::Aborted(js_error(err)))
		}))
	}
}
