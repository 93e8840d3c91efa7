//! Route files driving a router end to end

use hash_router::*;
use pretty_assertions::assert_eq;
use serde_json::json;

const ROUTES: &str = r#"
[router]
initial_location = "https://app.test/"

[[route]]
name = "layout"
match = "^/"

[[route]]
name = "main"
match = '^/main[/]?(?:\?.*)?$'
push_url = "/#/main"
group = "section"

[[route]]
name = "main1"
base = "/main"
match = '^/1[/]?$'
push_url = "/#/main/1"
group = "section"

[[route]]
name = "legacy"
match = "^/old$"
reroute = "main1"
"#;

fn router() -> Router {
    let file: RoutesFile = ROUTES.parse().unwrap();
    let mut router = Router::new(MemoryHistory::new(file.router.initial_location.clone()));
    router.register(file.into_routes()).unwrap();
    router
}

#[test]
fn test_initial_location_resolved_on_register() {
    let router = router();
    assert_eq!(router.location(), "https://app.test/");
    assert_eq!(router.active().names(), vec!["layout"]);
}

#[test]
fn test_file_order_decides_group_writer() {
    let mut router = router();
    router.update_location("https://app.test/#/main").unwrap();
    assert_eq!(router.active().names(), vec!["layout", "main", "section"]);

    router.update_location("https://app.test/#/main/1").unwrap();
    let active = router.active();
    assert_eq!(active.names(), vec!["layout", "main1", "section"]);
    assert_eq!(active.get("section").unwrap().args, Vec::<String>::new());
}

#[test]
fn test_reroute_from_file() {
    let mut router = router();
    router.push("/#/old").unwrap();

    assert_eq!(router.location(), "https://app.test/#/main/1");
    assert!(router.active().contains("main1"));
}

#[test]
fn test_payload_navigation() {
    let mut router = router();
    let target =
        replace_hash_query_data("https://app.test/#/main", "main", &json!({"tab": "posts"}))
            .unwrap();
    router.replace(&target).unwrap();

    assert_eq!(
        router.active().get("main").unwrap().search,
        json!({"tab": "posts"})
    );
    assert_eq!(router.history().entries().len(), 1);
}
