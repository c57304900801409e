//! Shared fixtures for the router integration tests.
//!
//! - [`RecordingPlatform`]: a scriptable [`TransitionPlatform`] that records
//!   every root class change and transition
//! - [`RefusingHistory`]: a [`History`] whose pushes fail, like a sandboxed
//!   frame
//! - [`site_editor_routes`]: a route list shaped like the site editor's

use gutenberg_router::{
	History, HistoryListener, ListenerId, MemoryHistory, PlatformLocation, RouteDefinition, RouterError,
	TransitionError, TransitionPlatform, UpdateCallback, ViewTransition,
};
use parking_lot::Mutex;
use serde_json::Value;
use std::sync::Arc;

/// Document URL every fixture starts from.
pub const SITE_EDITOR_URL: &str = "/wp-admin/site-editor.php";

/// How a [`RecordingPlatform`] settles the transitions it starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransitionScript {
	/// Runs the update, then `finished` resolves.
	Finish,
	/// Runs the update, then `finished` rejects with the given reason.
	Reject(String),
	/// Refuses to start.
	RefuseToStart,
	/// `finished` resolves without the update ever running.
	SkipUpdate,
	/// Runs the update, then `finished` never settles.
	Hang,
}

/// Scriptable transition platform.
#[derive(Debug)]
pub struct RecordingPlatform {
	width: u32,
	supported: bool,
	script: TransitionScript,
	root_classes: Mutex<Vec<String>>,
	events: Mutex<Vec<String>>,
}

impl RecordingPlatform {
	/// A wide viewport with view transitions.
	pub fn wide() -> Self {
		Self::new(1280, true, TransitionScript::Finish)
	}

	pub fn new(width: u32, supported: bool, script: TransitionScript) -> Self {
		Self {
			width,
			supported,
			script,
			root_classes: Mutex::new(Vec::new()),
			events: Mutex::new(Vec::new()),
		}
	}

	pub fn with_script(mut self, script: TransitionScript) -> Self {
		self.script = script;
		self
	}

	/// Classes currently on the document root.
	pub fn root_classes(&self) -> Vec<String> {
		self.root_classes.lock().clone()
	}

	/// Everything the router asked of the platform, in order.
	pub fn events(&self) -> Vec<String> {
		self.events.lock().clone()
	}

	fn record(&self, event: String) {
		self.events.lock().push(event);
	}
}

impl TransitionPlatform for RecordingPlatform {
	fn viewport_width(&self) -> u32 {
		self.width
	}

	fn supports_view_transitions(&self) -> bool {
		self.supported
	}

	fn add_root_class(&self, class: &str) {
		self.record(format!("add:{}", class));
		self.root_classes.lock().push(class.to_string());
	}

	fn remove_root_class(&self, class: &str) {
		self.record(format!("remove:{}", class));
		self.root_classes.lock().retain(|existing| existing != class);
	}

	fn start_view_transition(
		&self,
		update: UpdateCallback,
	) -> Result<ViewTransition, TransitionError> {
		self.record("start".to_string());
		let run = |update: UpdateCallback| {
			self.record(format!("update:{}", self.root_classes().join(" ")));
			update();
		};

		match &self.script {
			TransitionScript::Finish => {
				run(update);
				Ok(ViewTransition::settled(Ok(())))
			}
			TransitionScript::Reject(reason) => {
				run(update);
				Ok(ViewTransition::settled(Err(TransitionError::Aborted(
					reason.clone(),
				))))
			}
			TransitionScript::RefuseToStart => Err(TransitionError::Aborted(
				"InvalidStateError".to_string(),
			)),
			TransitionScript::SkipUpdate => Ok(ViewTransition::settled(Ok(()))),
			TransitionScript::Hang => {
				run(update);
				Ok(ViewTransition::new(futures::future::pending()))
			}
		}
	}
}

/// A history that refuses every push.
#[derive(Debug)]
pub struct RefusingHistory {
	inner: MemoryHistory,
}

impl RefusingHistory {
	pub fn new(initial_url: &str) -> Self {
		Self {
			inner: MemoryHistory::new(initial_url),
		}
	}
}

impl History for RefusingHistory {
	fn location(&self) -> Arc<PlatformLocation> {
		self.inner.location()
	}

	fn push(&self, _search: &str, _state: Option<Value>) -> Result<(), RouterError> {
		Err(RouterError::NavigationFailed("SecurityError".to_string()))
	}

	fn back(&self) -> Result<(), RouterError> {
		self.inner.back()
	}

	fn listen(&self, listener: HistoryListener) -> ListenerId {
		self.inner.listen(listener)
	}

	fn unlisten(&self, id: ListenerId) {
		self.inner.unlisten(id);
	}
}

/// Routes shaped like the site editor's, with string area payloads.
pub fn site_editor_routes() -> Vec<RouteDefinition<String>> {
	vec![
		RouteDefinition::new("home", "/")
			.area("sidebar", "navigation")
			.area("preview", "site")
			.area("mobile", "navigation"),
		RouteDefinition::new("pages", "/page")
			.area("sidebar", "pages")
			.computed_area("content", |ctx| {
				match ctx.query.get("layout").map(String::as_str) {
					Some("list") => "pages-list".to_string(),
					_ => "pages-grid".to_string(),
				}
			})
			.computed_width("content", |ctx| {
				if ctx.query.get("layout").map(String::as_str) == Some("list") {
					380
				} else {
					0
				}
			}),
		RouteDefinition::new("page-item", "/page/:postId")
			.area("sidebar", "page")
			.computed_area("preview", |ctx| format!("page-{}", ctx.params["postId"])),
		RouteDefinition::new("templates", "/template")
			.area("sidebar", "templates")
			.area("content", "templates-list"),
		RouteDefinition::new("styles", "/styles")
			.area("sidebar", "global-styles")
			.area("preview", "style-book"),
		RouteDefinition::new("wp-template-item", "/wp_template/*postId")
			.area("sidebar", "template")
			.computed_area("preview", |ctx| format!("template-{}", ctx.params["postId"])),
	]
}
