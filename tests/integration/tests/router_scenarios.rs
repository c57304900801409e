//! End-to-end routing scenarios
//!
//! - Scenario match from a raw location
//! - Not-found fallback and idempotent, memoized matching
//! - Commit ordering as seen by subscribers
//! - `beforeNavigate` overrides
//! - Back navigation through the subscribe channel
//! - Context reads through the facade prelude

use gutenberg::prelude::*;
use gutenberg_integration_tests::{SITE_EDITOR_URL, site_editor_routes};
use parking_lot::Mutex;
use rstest::{fixture, rstest};
use std::sync::Arc;

fn location(search: &str) -> Location {
	Location::from_platform(&PlatformLocation::new(SITE_EDITOR_URL, search, None))
}

#[fixture]
fn store() -> Arc<LocationStore> {
	Arc::new(LocationStore::new(Arc::new(MemoryHistory::new(
		SITE_EDITOR_URL,
	))))
}

#[fixture]
fn provider(store: Arc<LocationStore>) -> RouterProvider<String> {
	RouterProvider::new(site_editor_routes(), store, RouterConfig::default())
}

// ============================================================================
// Matching
// ============================================================================

#[rstest]
fn test_home_and_post_scenario() {
	// Arrange
	let table = build_route_table(vec![
		RouteDefinition::<String>::new("home", "/")
			.area("sidebar", "S")
			.area("content", "C"),
		RouteDefinition::new("post", "/post/:id")
			.computed_area("content", |ctx| format!("post-{}", ctx.params["id"])),
	]);

	// Act
	let matched = match_route(&location("p=%2Fpost%2F7"), &table, "p");

	// Assert
	assert_eq!(matched.name, "post");
	assert_eq!(matched.params.get("id").map(String::as_str), Some("7"));
	assert_eq!(matched.areas.len(), 1);
	assert_eq!(matched.area("content").map(String::as_str), Some("post-7"));
	assert!(matched.query.is_empty());
	assert_eq!(matched.path, "/post/7");
}

#[rstest]
#[case("p=%2Fpage", "pages", Some("pages-grid"), Some(0))]
#[case("p=%2Fpage&layout=list", "pages", Some("pages-list"), Some(380))]
#[case("p=%2Fpage%2F12", "page-item", None, None)]
#[case("", "home", None, None)]
fn test_site_editor_routes(
	#[case] search: &str,
	#[case] name: &str,
	#[case] content: Option<&str>,
	#[case] content_width: Option<u32>,
) {
	let table = build_route_table(site_editor_routes());

	let matched = match_route(&location(search), &table, "p");

	assert_eq!(matched.name, name);
	assert_eq!(matched.area("content").map(String::as_str), content);
	assert_eq!(matched.width("content"), content_width);
}

#[rstest]
fn test_wildcard_route_keeps_slashes() {
	let table = build_route_table(site_editor_routes());

	let matched = match_route(
		&location("p=%2Fwp_template%2Ftwentytwentyfive%2F%2Fsingle"),
		&table,
		"p",
	);

	assert_eq!(matched.name, "wp-template-item");
	assert_eq!(
		matched.area("preview").map(String::as_str),
		Some("template-twentytwentyfive//single")
	);
}

#[rstest]
fn test_not_found_keeps_sibling_query() {
	// Arrange
	let table = build_route_table(site_editor_routes());

	// Act
	let matched = match_route(&location("p=%2Fnowhere&canvas=edit&postType=page"), &table, "p");

	// Assert
	assert!(matched.is_not_found());
	assert!(matched.areas.is_empty());
	assert!(matched.widths.is_empty());
	assert!(matched.params.is_empty());
	let keys: Vec<&str> = matched.query.keys().map(String::as_str).collect();
	assert_eq!(keys, vec!["canvas", "postType"]);
	assert_eq!(matched.path, "/nowhere?canvas=edit&postType=page");
}

#[rstest]
fn test_matching_is_idempotent(provider: RouterProvider<String>) {
	let first = provider.current_match();
	let second = provider.current_match();

	assert!(Arc::ptr_eq(&first, &second));
	assert_eq!(
		*first,
		match_route(&provider.state().location(), &build_route_table(site_editor_routes()), "p")
	);
}

// ============================================================================
// Navigation
// ============================================================================

#[rstest]
#[tokio::test]
async fn test_subscriber_observes_committed_location(store: Arc<LocationStore>) {
	// Arrange
	let navigator = Navigator::new(Arc::clone(&store), Arc::new(RouterConfig::default()));
	let observed = Arc::new(Mutex::new(Vec::new()));
	let reader = Arc::clone(&store);
	let sink = Arc::clone(&observed);
	let _subscription = store.subscribe(move || {
		let location = reader.get_snapshot();
		sink.lock().push((
			location.query.get("p").cloned(),
			location.query.get("x").cloned(),
		));
	});

	// Act
	navigator
		.navigate("/foo?x=1", NavigationOptions::default())
		.await
		.unwrap();

	// Assert
	let location = store.get_snapshot();
	assert_eq!(location.query.get("p").map(String::as_str), Some("/foo"));
	assert_eq!(location.query.get("x").map(String::as_str), Some("1"));
	assert_eq!(
		*observed.lock(),
		vec![(Some("/foo".to_string()), Some("1".to_string()))]
	);
}

#[rstest]
#[tokio::test]
async fn test_before_navigate_adds_locale(store: Arc<LocationStore>) {
	// Arrange
	let config = RouterConfig::default().with_before_navigate(|mut target| {
		target.query.insert("locale".to_string(), "en".to_string());
		target
	});
	let provider = RouterProvider::new(site_editor_routes(), Arc::clone(&store), config);

	// Act
	provider
		.navigator()
		.navigate("/x", NavigationOptions::default())
		.await
		.unwrap();

	// Assert
	let location = store.get_snapshot();
	assert_eq!(location.query.get("locale").map(String::as_str), Some("en"));
	assert_eq!(location.query.get("p").map(String::as_str), Some("/x"));
	assert!(provider.current_match().is_not_found());
	assert_eq!(
		provider.current_match().query.get("locale").map(String::as_str),
		Some("en")
	);
}

#[rstest]
#[tokio::test]
async fn test_before_navigate_can_rewrite_path(store: Arc<LocationStore>) {
	let config = RouterConfig::default().with_before_navigate(|target| {
		if target.path == "/legacy-pages" {
			NavigationTarget {
				path: "/page".to_string(),
				query: target.query,
			}
		} else {
			target
		}
	});
	let provider = RouterProvider::new(site_editor_routes(), store, config);

	provider
		.navigator()
		.navigate("/legacy-pages?layout=list", NavigationOptions::default())
		.await
		.unwrap();

	let matched = provider.current_match();
	assert_eq!(matched.name, "pages");
	assert_eq!(matched.path, "/page?layout=list");
}

#[rstest]
#[tokio::test]
async fn test_back_notifies_and_restores_match(provider: RouterProvider<String>) {
	// Arrange
	let navigator = provider.navigator().clone();
	navigator
		.navigate("/page/3", NavigationOptions::default())
		.await
		.unwrap();
	let notified = Arc::new(Mutex::new(0usize));
	let counter = Arc::clone(&notified);
	let _subscription = provider.state().subscribe(move || *counter.lock() += 1);

	// Act
	navigator.back().unwrap();

	// Assert
	assert_eq!(*notified.lock(), 1);
	assert_eq!(provider.current_match().name, "home");
}

#[rstest]
#[case("/page/a b", "a b")]
#[case("/page/héllo", "héllo")]
#[tokio::test]
async fn test_navigated_params_match_loaded_params(
	#[case] path: &str,
	#[case] post_id: &str,
	provider: RouterProvider<String>,
) {
	// Arrange
	let table = build_route_table(site_editor_routes());
	let mut loaded_query = gutenberg::urls::Query::new();
	loaded_query.insert("p".to_string(), path.to_string());
	let loaded = match_route(
		&location(&gutenberg::urls::serialize_query(&loaded_query)),
		&table,
		"p",
	);

	// Act
	provider
		.navigator()
		.navigate(path, NavigationOptions::default())
		.await
		.unwrap();

	// Assert
	let navigated = provider.current_match();
	assert_eq!(
		provider.state().location().query.get("p").map(String::as_str),
		Some(path)
	);
	assert_eq!(navigated.name, "page-item");
	assert_eq!(navigated.params.get("postId").map(String::as_str), Some(post_id));
	assert_eq!(navigated.params, loaded.params);
	assert_eq!(navigated.path, path);
}

#[rstest]
fn test_link_href_encodes_path_once(provider: RouterProvider<String>) {
	let link = provider
		.navigator()
		.link("/page/a b", NavigationOptions::default());

	assert_eq!(link.href(), format!("{}?p=%2Fpage%2Fa+b", SITE_EDITOR_URL));
}

#[rstest]
#[tokio::test]
async fn test_navigation_state_is_stored(provider: RouterProvider<String>) {
	let options = NavigationOptions::default().with_state(serde_json::json!({ "focusSidebar": true }));

	provider.navigator().navigate("/styles", options).await.unwrap();

	assert_eq!(
		provider.state().location().state,
		Some(serde_json::json!({ "focusSidebar": true }))
	);
}

// ============================================================================
// Context
// ============================================================================

#[rstest]
#[tokio::test]
async fn test_context_readers_follow_navigation(provider: RouterProvider<String>) {
	// Arrange
	let navigator = provider.scope(use_navigator);

	// Act
	navigator
		.navigate("/page/12", NavigationOptions::default())
		.await
		.unwrap();

	// Assert
	let (name, preview) = provider.scope(|| {
		let matched = use_match::<String>();
		(matched.name.clone(), matched.area("preview").cloned())
	});
	assert_eq!(name, "page-item");
	assert_eq!(preview.as_deref(), Some("page-12"));
}

#[rstest]
fn test_link_inside_scope(provider: RouterProvider<String>) {
	let href = provider.scope(|| {
		use_navigator()
			.link("/page?layout=list", NavigationOptions::default())
			.href()
			.to_string()
	});

	assert_eq!(href, format!("{}?p=%2Fpage&layout=list", SITE_EDITOR_URL));
}

#[rstest]
fn test_reads_outside_provider_fail() {
	assert_eq!(
		try_use_match::<String>().unwrap_err(),
		RouterError::MissingProvider("match context")
	);
	assert!(try_use_navigator().is_err());
}
