#![allow(clippy::unwrap_used)]
// Integration tests for `ApiClient` using wiremock.

use std::io::Write;

use pretty_assertions::assert_eq;
use serde_json::json;
use url::Url;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use agency_api::{
    ApiClient, ApplicationSubmission, BlogPostForm, ContactSubmission, Error, RawRecord, Relation,
    TransportConfig,
};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, ApiClient) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&server.uri()).unwrap();
    let client = ApiClient::with_client(reqwest::Client::new(), base_url, "/api").unwrap();
    (server, client)
}

// ── Listing ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_list_blogs_bare_array() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/blogs"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "_id": "b1",
                "title": "Shipping fast",
                "category": {"_id": "c1", "name": "Web Development"},
                "author": "Dana",
                "readTime": "4 min read",
                "createdAt": "2026-01-02T10:00:00Z"
            },
            {
                "id": 2,
                "title": "Brand voice",
                "category": "Branding",
                "author": {"name": "Lee"}
            }
        ])))
        .mount(&server)
        .await;

    let posts = client.list_blogs().await.unwrap();
    assert_eq!(posts.len(), 2);
    assert_eq!(posts[0].raw_id(), Some("b1"));
    assert_eq!(
        posts[0].category,
        Some(Relation::Record {
            id: Some("c1".into()),
            name: Some("Web Development".into())
        })
    );
    assert_eq!(posts[0].read_time, Some(4));
    assert_eq!(posts[1].raw_id(), Some("2"));
    assert_eq!(posts[1].category, Some(Relation::Name("Branding".into())));
}

#[tokio::test]
async fn test_list_portfolio_data_envelope_skips_non_objects() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/portfolio"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": [
                {"_id": "p1", "title": "Atlas", "technologies": ["Rust", "React"]},
                "garbage",
                42,
                {"_id": "p2", "title": "Nimbus", "technologies": "Figma, Webflow"}
            ]
        })))
        .mount(&server)
        .await;

    let items = client.list_portfolio().await.unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].technologies, vec!["Rust", "React"]);
    assert_eq!(items[1].technologies, vec!["Figma", "Webflow"]);
}

#[tokio::test]
async fn test_list_rejects_unknown_envelope() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/services"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"services": []})))
        .mount(&server)
        .await;

    let result = client.list_services().await;
    assert!(
        matches!(result, Err(Error::Deserialization { .. })),
        "expected Deserialization error, got: {result:?}"
    );
}

#[tokio::test]
async fn test_list_non_json_body_is_deserialization_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/contacts"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let err = client.list_contacts().await.unwrap_err();
    match err {
        Error::Deserialization { message, body } => {
            assert!(message.contains("body preview"));
            assert_eq!(body, "<html>maintenance</html>");
        }
        other => panic!("expected Deserialization error, got: {other:?}"),
    }
}

// ── Error extraction ────────────────────────────────────────────────

#[tokio::test]
async fn test_http_error_uses_json_message() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/api/blogs/b1"))
        .respond_with(
            ResponseTemplate::new(403).set_body_json(json!({"message": "Admin access required"})),
        )
        .mount(&server)
        .await;

    let err = client.delete_blog("b1").await.unwrap_err();
    assert!(err.is_unauthorized());
    assert_eq!(err.to_string(), "Admin access required");
}

#[tokio::test]
async fn test_http_error_uses_error_field() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/applications"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({"error": "Bad filter"})))
        .mount(&server)
        .await;

    let err = client.list_applications().await.unwrap_err();
    assert_eq!(err.status(), Some(400));
    assert_eq!(err.to_string(), "Bad filter");
}

#[tokio::test]
async fn test_http_error_without_json_falls_back_to_status() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/blogs"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&server)
        .await;

    let err = client.list_blogs().await.unwrap_err();
    assert!(err.is_transient());
    assert_eq!(err.to_string(), "HTTP status 502");
}

#[tokio::test]
async fn test_transport_failure() {
    // Discard port; nothing listens there.
    let base_url = Url::parse("http://127.0.0.1:9").unwrap();
    let client = ApiClient::with_client(reqwest::Client::new(), base_url, "/api").unwrap();
    let err = client.list_blogs().await.unwrap_err();
    assert!(matches!(err, Error::Transport(_)), "got: {err:?}");
    assert!(err.is_transient());
}

// ── Mutations ───────────────────────────────────────────────────────

#[tokio::test]
async fn test_delete_with_empty_body_is_success() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/api/contacts/m1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let ack = client.delete_contact("m1").await.unwrap();
    assert_eq!(ack.message, None);
}

#[tokio::test]
async fn test_set_contact_status_returns_wrapped_record() {
    let (server, client) = setup().await;

    Mock::given(method("PATCH"))
        .and(path("/api/contacts/m1/status"))
        .and(body_json(json!({"status": "read"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "updated",
            "data": {"_id": "m1", "isRead": true}
        })))
        .mount(&server)
        .await;

    let record = client.set_contact_status("m1", "read").await.unwrap().unwrap();
    assert_eq!(record.raw_id(), Some("m1"));
    assert_eq!(record.is_read, Some(true));
}

#[tokio::test]
async fn test_set_application_status_bare_record() {
    let (server, client) = setup().await;

    Mock::given(method("PATCH"))
        .and(path("/api/applications/a9/status"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"_id": "a9", "status": "Shortlisted"})),
        )
        .mount(&server)
        .await;

    let record = client
        .set_application_status("a9", "shortlisted")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(record.status.as_deref(), Some("Shortlisted"));
}

#[tokio::test]
async fn test_status_patch_with_unparsable_body_yields_none() {
    let (server, client) = setup().await;

    Mock::given(method("PATCH"))
        .and(path("/api/applications/a9/status"))
        .respond_with(ResponseTemplate::new(200).set_body_string("OK"))
        .mount(&server)
        .await;

    let record = client.set_application_status("a9", "hired").await.unwrap();
    assert!(record.is_none());
}

#[tokio::test]
async fn test_create_blog_json_without_image() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/blogs"))
        .and(body_json(json!({
            "title": "Hello",
            "content": "<p>Body</p>",
            "category": "Technology",
            "tags": ["intro"]
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"message": "Created"})))
        .expect(1)
        .mount(&server)
        .await;

    let form = BlogPostForm {
        title: "Hello".into(),
        content: "<p>Body</p>".into(),
        category: "Technology".into(),
        tags: vec!["intro".into()],
        ..BlogPostForm::default()
    };
    let ack = client.create_blog(&form).await.unwrap();
    assert_eq!(ack.message.as_deref(), Some("Created"));
}

#[tokio::test]
async fn test_submit_application_is_multipart() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/applications"))
        .and(header_contains_multipart())
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"message": "Received"})))
        .expect(1)
        .mount(&server)
        .await;

    let mut resume = tempfile::Builder::new().suffix(".pdf").tempfile().unwrap();
    resume.write_all(b"%PDF-1.4 fake").unwrap();

    let form = ApplicationSubmission {
        name: "Sam Rivera".into(),
        email: "sam@example.com".into(),
        position: "Frontend Engineer".into(),
        resume: Some(resume.path().to_path_buf()),
        ..ApplicationSubmission::default()
    };
    let ack = client.submit_application(&form).await.unwrap();
    assert_eq!(ack.message.as_deref(), Some("Received"));
}

#[tokio::test]
async fn test_missing_attachment_is_reported() {
    let (_server, client) = setup().await;

    let form = ApplicationSubmission {
        name: "Sam".into(),
        email: "sam@example.com".into(),
        position: "Designer".into(),
        resume: Some("/nonexistent/resume.pdf".into()),
        ..ApplicationSubmission::default()
    };
    let err = client.submit_application(&form).await.unwrap_err();
    assert!(matches!(err, Error::Attachment { .. }), "got: {err:?}");
}

#[tokio::test]
async fn test_submit_contact_non_json_success() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/contacts"))
        .respond_with(ResponseTemplate::new(200).set_body_string("thanks!"))
        .mount(&server)
        .await;

    let form = ContactSubmission {
        name: "Ada".into(),
        email: "ada@example.com".into(),
        message: "Need a website".into(),
        ..ContactSubmission::default()
    };
    let ack = client.submit_contact(&form).await.unwrap();
    assert_eq!(ack.message, None);
}

// ── Auth header ─────────────────────────────────────────────────────

#[tokio::test]
async fn test_admin_token_sent_as_bearer() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/contacts"))
        .and(header("authorization", "Bearer s3cret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let token: secrecy::SecretString = "s3cret".to_string().into();
    let client = ApiClient::new(
        &server.uri(),
        "/api",
        Some(&token),
        &TransportConfig::default(),
    )
    .unwrap();
    assert!(client.list_contacts().await.unwrap().is_empty());
}

fn header_contains_multipart() -> impl wiremock::Match {
    |req: &wiremock::Request| {
        req.headers
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.starts_with("multipart/form-data"))
    }
}
