#![allow(clippy::unwrap_used)]
// End-to-end tests for `Site` against a wiremock backend.

use std::sync::Arc;

use pretty_assertions::assert_eq;
use serde_json::json;
use tokio::sync::mpsc::UnboundedReceiver;
use url::Url;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use agency_core::{
    ApplicationStatus, BlogPost, ChannelNotifier, Command, ContactMessage, ContactRequest,
    CoreError, FetchOutcome, FilterState, ItemId, JobApplication, ListQuery, PortfolioItem,
    PortfolioRequest, ReadStatus, RemoteStatus, Site, SiteConfig, Toast, ToastLevel,
};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, Site, UnboundedReceiver<Toast>) {
    let server = MockServer::start().await;
    let backend = Url::parse(&server.uri()).unwrap();
    let public = Url::parse("https://studio.example").unwrap();
    let (notifier, toasts) = ChannelNotifier::new();
    let site = Site::new(SiteConfig::new(backend, public), Arc::new(notifier)).unwrap();
    (server, site, toasts)
}

fn blog_json(count: usize) -> serde_json::Value {
    let posts: Vec<_> = (1..=count)
        .map(|i| {
            let category = if i % 3 == 0 { "Web Development" } else { "Branding" };
            json!({ "_id": format!("b{i}"), "title": format!("Post {i}"), "category": category })
        })
        .collect();
    json!(posts)
}

async fn mount_list(server: &MockServer, collection: &str, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(format!("/api/{collection}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

fn ids<T: agency_core::CollectionItem>(items: &[&T]) -> Vec<String> {
    items.iter().map(|item| item.id().to_string()).collect()
}

// ── Fetch ───────────────────────────────────────────────────────────

#[tokio::test]
async fn test_load_blog_view_filters_and_pages() {
    let (server, site, _toasts) = setup().await;
    mount_list(&server, "blogs", blog_json(8)).await;

    let mut view = site.blog_view(&ListQuery::default());
    assert!(view.is_loading());
    assert_eq!(site.load(&mut view).await, FetchOutcome::Applied);

    assert_eq!(view.status(), &RemoteStatus::Ready);
    assert_eq!(view.len(), 8);
    assert_eq!(view.total_pages(), Some(2));
    assert_eq!(view.visible().len(), 6);

    assert!(view.go_to_page(2));
    assert_eq!(ids(&view.visible()), vec!["b7", "b8"]);

    assert!(view.select_label("Web Development"));
    assert_eq!(view.pager().page(), Some(1));
    assert_eq!(ids(&view.visible()), vec!["b3", "b6"]);
}

#[tokio::test]
async fn test_load_failure_sets_error_message() {
    let (server, site, _toasts) = setup().await;
    Mock::given(method("GET"))
        .and(path("/api/portfolio"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "message": "db down" })))
        .mount(&server)
        .await;

    let mut view = site.portfolio_view();
    site.load(&mut view).await;

    assert_eq!(view.status(), &RemoteStatus::Error("db down".into()));
    assert!(view.is_empty());
}

#[tokio::test]
async fn test_unreachable_backend_uses_generic_message() {
    let backend = Url::parse("http://127.0.0.1:9").unwrap();
    let public = Url::parse("https://studio.example").unwrap();
    let (notifier, _toasts) = ChannelNotifier::new();
    let site = Site::new(SiteConfig::new(backend, public), Arc::new(notifier)).unwrap();

    let mut view = site.admin_view::<ContactMessage>();
    site.load(&mut view).await;

    assert_eq!(
        view.status(),
        &RemoteStatus::Error(
            "Could not reach the server. Check your connection and try again.".into()
        )
    );
}

#[tokio::test]
async fn test_portfolio_reveal_after_load() {
    let (server, site, _toasts) = setup().await;
    let items: Vec<_> = (0..10)
        .map(|i| json!({ "id": format!("p{i}"), "title": format!("Work {i}"), "category": "Web" }))
        .collect();
    mount_list(&server, "portfolio", json!(items)).await;

    let mut view = site.portfolio_view();
    site.load(&mut view).await;
    assert_eq!(view.visible().len(), 6);
    assert!(view.has_more());
    assert!(view.load_more());
    assert_eq!(view.visible().len(), 10);
    assert!(!view.has_more());
}

#[tokio::test]
async fn test_refresh_reloads_collection() {
    let (server, site, _toasts) = setup().await;
    mount_list(&server, "services", json!([{ "_id": "s1", "title": "SEO" }])).await;

    let mut view = site.admin_view();
    site.load(&mut view).await;
    let outcome = site.refresh(&mut view).await;
    assert_eq!(outcome, Some(FetchOutcome::Applied));
    let services: Vec<&agency_core::Service> = view.visible();
    assert_eq!(services[0].title, "SEO");
}

// ── Deletes ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_delete_removes_item_and_toasts() {
    let (server, site, mut toasts) = setup().await;
    mount_list(&server, "blogs", blog_json(3)).await;
    Mock::given(method("DELETE"))
        .and(path("/api/blogs/b2"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let mut view = site.blog_view(&ListQuery::default());
    site.load(&mut view).await;

    let id = ItemId::new("b2");
    site.delete(&mut view, &id).await.unwrap();

    assert_eq!(ids(&view.visible()), vec!["b1", "b3"]);
    assert!(!view.is_busy(&id));
    let toast = toasts.recv().await.unwrap();
    assert_eq!(toast.level, ToastLevel::Success);
    assert_eq!(toast.message, "Blog post deleted");
}

#[tokio::test]
async fn test_delete_failure_keeps_item() {
    let (server, site, mut toasts) = setup().await;
    mount_list(&server, "applications", json!([{ "_id": "a1", "name": "Grace" }])).await;
    Mock::given(method("DELETE"))
        .and(path("/api/applications/a1"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({ "error": "Forbidden" })))
        .mount(&server)
        .await;

    let mut view = site.admin_view::<JobApplication>();
    site.load(&mut view).await;

    let id = ItemId::new("a1");
    let err = site.delete(&mut view, &id).await.unwrap_err();
    assert!(matches!(err, CoreError::Unauthorized { .. }));
    assert_eq!(view.len(), 1);
    assert!(!view.is_busy(&id));

    let toast = toasts.recv().await.unwrap();
    assert_eq!(toast.level, ToastLevel::Error);
    assert_eq!(toast.message, "Forbidden");
}

// ── Status changes ──────────────────────────────────────────────────

#[tokio::test]
async fn test_contact_status_prefers_server_value() {
    let (server, site, _toasts) = setup().await;
    mount_list(&server, "contacts", json!([{ "_id": "m1", "name": "Ada" }])).await;
    Mock::given(method("PATCH"))
        .and(path("/api/contacts/m1/status"))
        .and(body_json(json!({ "status": "read" })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "data": { "_id": "m1", "status": "read" } })),
        )
        .mount(&server)
        .await;

    let mut view = site.admin_view::<ContactMessage>();
    site.load(&mut view).await;
    assert_eq!(view.get(&"m1".into()).unwrap().status, ReadStatus::Unread);

    let applied = site
        .set_contact_status(&mut view, &"m1".into(), ReadStatus::Read)
        .await
        .unwrap();
    assert_eq!(applied, ReadStatus::Read);
    assert_eq!(view.get(&"m1".into()).unwrap().status, ReadStatus::Read);
}

#[tokio::test]
async fn test_application_status_falls_back_to_requested() {
    let (server, site, mut toasts) = setup().await;
    mount_list(&server, "applications", json!([{ "_id": "a1", "name": "Grace" }])).await;
    Mock::given(method("PATCH"))
        .and(path("/api/applications/a1/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
        .mount(&server)
        .await;

    let mut view = site.admin_view::<JobApplication>();
    site.load(&mut view).await;

    let applied = site
        .set_application_status(&mut view, &"a1".into(), ApplicationStatus::Shortlisted)
        .await
        .unwrap();
    assert_eq!(applied, ApplicationStatus::Shortlisted);
    assert_eq!(
        view.get(&"a1".into()).unwrap().status,
        ApplicationStatus::Shortlisted
    );
    assert_eq!(toasts.recv().await.unwrap().message, "Status set to shortlisted");
}

// ── Forms ───────────────────────────────────────────────────────────

#[tokio::test]
async fn test_invalid_contact_form_sends_nothing() {
    let (server, site, mut toasts) = setup().await;
    Mock::given(method("POST"))
        .and(path("/api/contacts"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let request = ContactRequest {
        name: "Ada".into(),
        email: "not-an-email".into(),
        message: "Hello".into(),
        ..ContactRequest::default()
    };
    let err = site.execute(Command::SubmitContact(request)).await.unwrap_err();
    assert!(matches!(err, CoreError::ValidationFailed { .. }));
    assert_eq!(toasts.recv().await.unwrap().level, ToastLevel::Error);
}

#[tokio::test]
async fn test_save_refetches_collection() {
    let (server, site, _toasts) = setup().await;
    Mock::given(method("POST"))
        .and(path("/api/portfolio"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "message": "Created" })))
        .expect(1)
        .mount(&server)
        .await;
    mount_list(
        &server,
        "portfolio",
        json!([{ "_id": "p1", "title": "New site", "category": "Web" }]),
    )
    .await;

    let mut view = site.portfolio_view();
    let request = PortfolioRequest {
        title: "New site".into(),
        category: "Web".into(),
        description: Some("Marketing site".into()),
        ..PortfolioRequest::default()
    };
    let outcome = site
        .save(&mut view, Command::CreatePortfolioItem(request))
        .await
        .unwrap();

    assert_eq!(outcome.message(), "Created");
    let items: Vec<&PortfolioItem> = view.visible();
    assert_eq!(items[0].title, "New site");
}

// ── Addresses ───────────────────────────────────────────────────────

#[tokio::test]
async fn test_blog_address_and_seeded_view() {
    let (_server, site, _toasts) = setup().await;
    let query = ListQuery::parse::<BlogPost>("category=Branding&page=2");

    let view = site.blog_view(&query);
    assert_eq!(view.filter(), &FilterState::Label("Branding".into()));
    assert_eq!(view.pager().page(), Some(2));

    let address = site.blog_address(&query).unwrap();
    assert_eq!(
        address.as_str(),
        "https://studio.example/blog?category=Branding&page=2"
    );
}
