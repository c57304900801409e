//! View transition gating and root class cleanup
//!
//! A navigation animates only on a wide viewport whose platform supports
//! view transitions, and only when a non-empty class is requested. Once
//! started, the class is removed from the document root on every outcome:
//! finished, rejected, refused, skipped, or dropped mid-flight.

use futures::FutureExt;
use gutenberg_integration_tests::{
	RecordingPlatform, RefusingHistory, SITE_EDITOR_URL, TransitionScript,
};
use gutenberg_router::{
	History, LocationStore, MemoryHistory, NavigationOptions, Navigator, RouterConfig,
	RouterError, TransitionPlatform,
};
use rstest::rstest;
use std::sync::Arc;

const CLASS: &str = "canvas-mode-edit-transition";

fn navigator_with(
	history: Arc<dyn History>,
	platform: Arc<RecordingPlatform>,
) -> (Navigator, Arc<LocationStore>) {
	let store = Arc::new(LocationStore::new(history));
	let navigator = Navigator::with_platform(
		Arc::clone(&store),
		Arc::new(RouterConfig::default()),
		platform as Arc<dyn TransitionPlatform>,
	);
	(navigator, store)
}

fn navigator(platform: Arc<RecordingPlatform>) -> (Navigator, Arc<LocationStore>) {
	navigator_with(Arc::new(MemoryHistory::new(SITE_EDITOR_URL)), platform)
}

fn animated() -> NavigationOptions {
	NavigationOptions::default().with_transition(CLASS)
}

fn current_path(store: &LocationStore) -> Option<String> {
	store.get_snapshot().query.get("p").cloned()
}

// ============================================================================
// Gating
// ============================================================================

#[rstest]
#[case::narrow_viewport(RecordingPlatform::new(781, true, TransitionScript::Finish), Some(CLASS))]
#[case::unsupported(RecordingPlatform::new(1280, false, TransitionScript::Finish), Some(CLASS))]
#[case::empty_class(RecordingPlatform::wide(), Some(""))]
#[case::no_class(RecordingPlatform::wide(), None)]
#[tokio::test]
async fn test_plain_navigation_when_gate_closed(
	#[case] platform: RecordingPlatform,
	#[case] class: Option<&str>,
) {
	// Arrange
	let platform = Arc::new(platform);
	let (navigator, store) = navigator(Arc::clone(&platform));
	let options = NavigationOptions {
		transition: class.map(str::to_string),
		state: None,
	};

	// Act
	navigator.navigate("/page", options).await.unwrap();

	// Assert
	assert!(platform.events().is_empty());
	assert_eq!(current_path(&store).as_deref(), Some("/page"));
}

#[rstest]
#[tokio::test]
async fn test_breakpoint_is_inclusive() {
	let platform = Arc::new(RecordingPlatform::new(782, true, TransitionScript::Finish));
	let (navigator, _store) = navigator(Arc::clone(&platform));

	navigator.navigate("/page", animated()).await.unwrap();

	assert!(platform.events().contains(&"start".to_string()));
}

#[rstest]
#[tokio::test]
async fn test_configured_breakpoint() {
	// Arrange
	let platform = Arc::new(RecordingPlatform::new(900, true, TransitionScript::Finish));
	let store = Arc::new(LocationStore::new(Arc::new(MemoryHistory::new(SITE_EDITOR_URL))));
	let navigator = Navigator::with_platform(
		store,
		Arc::new(RouterConfig::default().with_wide_viewport_min_width(1024)),
		Arc::clone(&platform) as Arc<dyn TransitionPlatform>,
	);

	// Act
	navigator.navigate("/page", animated()).await.unwrap();

	// Assert
	assert!(platform.events().is_empty());
}

// ============================================================================
// Transition lifecycle
// ============================================================================

#[rstest]
#[tokio::test]
async fn test_push_runs_inside_transition_with_class() {
	// Arrange
	let platform = Arc::new(RecordingPlatform::wide());
	let (navigator, store) = navigator(Arc::clone(&platform));

	// Act
	navigator.navigate("/styles", animated()).await.unwrap();

	// Assert
	assert_eq!(
		platform.events(),
		vec![
			format!("add:{}", CLASS),
			"start".to_string(),
			format!("update:{}", CLASS),
			format!("remove:{}", CLASS),
		]
	);
	assert!(platform.root_classes().is_empty());
	assert_eq!(current_path(&store).as_deref(), Some("/styles"));
}

#[rstest]
#[tokio::test]
async fn test_class_removed_when_finished_rejects() {
	// Arrange
	let platform = Arc::new(
		RecordingPlatform::wide().with_script(TransitionScript::Reject("AbortError".to_string())),
	);
	let (navigator, store) = navigator(Arc::clone(&platform));

	// Act
	let result = navigator.navigate("/template", animated()).await;

	// Assert
	assert!(result.is_ok());
	assert!(platform.root_classes().is_empty());
	assert_eq!(platform.events().last(), Some(&format!("remove:{}", CLASS)));
	assert_eq!(current_path(&store).as_deref(), Some("/template"));
}

#[rstest]
#[tokio::test]
async fn test_refused_transition_falls_back_to_plain_push() {
	let platform =
		Arc::new(RecordingPlatform::wide().with_script(TransitionScript::RefuseToStart));
	let (navigator, store) = navigator(Arc::clone(&platform));

	navigator.navigate("/page/12", animated()).await.unwrap();

	assert!(platform.root_classes().is_empty());
	assert_eq!(current_path(&store).as_deref(), Some("/page/12"));
}

#[rstest]
#[tokio::test]
async fn test_skipped_update_still_commits() {
	let platform = Arc::new(RecordingPlatform::wide().with_script(TransitionScript::SkipUpdate));
	let (navigator, store) = navigator(Arc::clone(&platform));

	navigator.navigate("/page", animated()).await.unwrap();

	assert!(!platform.events().iter().any(|event| event.starts_with("update:")));
	assert!(platform.root_classes().is_empty());
	assert_eq!(current_path(&store).as_deref(), Some("/page"));
}

#[rstest]
fn test_class_removed_when_navigation_dropped() {
	// Arrange
	let platform = Arc::new(RecordingPlatform::wide().with_script(TransitionScript::Hang));
	let (navigator, store) = navigator(Arc::clone(&platform));

	// Act: poll once, then drop the pending navigation
	let outcome = navigator.navigate("/page", animated()).now_or_never();

	// Assert
	assert!(outcome.is_none());
	assert!(platform.root_classes().is_empty());
	assert_eq!(current_path(&store).as_deref(), Some("/page"));
}

// ============================================================================
// Push failures
// ============================================================================

#[rstest]
#[case::plain(NavigationOptions::default())]
#[case::animated(animated())]
#[tokio::test]
async fn test_push_failure_propagates(#[case] options: NavigationOptions) {
	// Arrange
	let platform = Arc::new(RecordingPlatform::wide());
	let (navigator, store) = navigator_with(
		Arc::new(RefusingHistory::new(SITE_EDITOR_URL)),
		Arc::clone(&platform),
	);

	// Act
	let result = navigator.navigate("/page", options).await;

	// Assert
	assert_eq!(
		result,
		Err(RouterError::NavigationFailed("SecurityError".to_string()))
	);
	assert!(platform.root_classes().is_empty());
	assert_eq!(current_path(&store), None);
}
