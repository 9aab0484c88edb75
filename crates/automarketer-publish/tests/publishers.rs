//! Publisher contract tests against a local mock HTTP server.

use automarketer_core::Platform;
use automarketer_publish::{
    Media, PeakHours, PlatformPublisher, PostScheduler, PublishConfig, PublishError,
    PublishRequest, Publisher, SchedulerError,
};
use chrono::{TimeZone, Utc};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn configured(server: &MockServer) -> PublishConfig {
    PublishConfig::builder()
        .base_url_for_all(server.uri())
        .request_timeout(Duration::from_millis(500))
        .ayrshare_api_key("ayr-key")
        .blogger("google-key", "blog-42")
        .brevo_api_key("brevo-key")
        .sender("Acme", "news@acme.test")
        .build()
        .unwrap()
}

fn publisher_for(server: &MockServer) -> PlatformPublisher {
    PlatformPublisher::from_config(&configured(server)).unwrap()
}

// =============================================================================
// Ayrshare
// =============================================================================

#[tokio::test]
async fn test_ayrshare_posts_with_bearer_auth() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/post"))
        .and(header("authorization", "Bearer ayr-key"))
        .and(body_partial_json(json!({
            "post": "Spring sale starts now",
            "platforms": ["linkedin"],
            "mediaUrls": ["https://img.test/a.png"],
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "id": "post-1",
            "postIds": [{ "platform": "linkedin", "postUrl": "https://linkedin.test/p/1" }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let request = PublishRequest::new(Platform::LinkedIn, "Spring sale starts now")
        .with_media(Media::image("https://img.test/a.png"));
    let receipt = publisher_for(&server).publish(&request).await.unwrap();

    assert_eq!(receipt.publisher, "Ayrshare");
    assert_eq!(receipt.post_id.as_deref(), Some("post-1"));
    assert_eq!(receipt.url.as_deref(), Some("https://linkedin.test/p/1"));
}

#[tokio::test]
async fn test_ayrshare_failure_uses_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/post"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({ "status": "error", "message": "Duplicate post" })),
        )
        .mount(&server)
        .await;

    let err = publisher_for(&server)
        .publish(&PublishRequest::new(Platform::Twitter, "Same again"))
        .await
        .unwrap_err();

    match err {
        PublishError::Rejected {
            publisher,
            status,
            message,
        } => {
            assert_eq!(publisher, "Ayrshare");
            assert_eq!(status, 400);
            assert_eq!(message, "Duplicate post");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_ayrshare_accepted_202_is_not_success() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/post"))
        .respond_with(ResponseTemplate::new(202).set_body_json(json!({ "message": "queued" })))
        .mount(&server)
        .await;

    let err = publisher_for(&server)
        .publish(&PublishRequest::new(Platform::Facebook, "Hello"))
        .await
        .unwrap_err();
    assert!(matches!(err, PublishError::Rejected { status: 202, .. }));
}

#[tokio::test]
async fn test_ayrshare_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/post"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
        .mount(&server)
        .await;

    let err = publisher_for(&server)
        .publish(&PublishRequest::new(Platform::Twitter, "Slow"))
        .await
        .unwrap_err();
    assert!(matches!(err, PublishError::Timeout(_)));
    assert!(err.is_retryable());
}

// =============================================================================
// Blogger
// =============================================================================

#[tokio::test]
async fn test_blogger_posts_html_with_key() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/blogger/v3/blogs/blog-42/posts/"))
        .and(query_param("key", "google-key"))
        .and(query_param("isDraft", "false"))
        .and(body_partial_json(json!({
            "kind": "blogger#post",
            "blog": { "id": "blog-42" },
            "title": "AutoMarketer Post",
            "content": "First line<br>Second line",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "987",
            "url": "https://acme.blogspot.test/2026/06/post.html"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let receipt = publisher_for(&server)
        .publish(&PublishRequest::new(Platform::Blog, "First line\nSecond line"))
        .await
        .unwrap();
    assert_eq!(receipt.post_id.as_deref(), Some("987"));
    assert_eq!(
        receipt.url.as_deref(),
        Some("https://acme.blogspot.test/2026/06/post.html")
    );
}

#[tokio::test]
async fn test_blogger_error_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(403).set_body_json(json!({ "error": { "code": 403, "message": "Forbidden blog" } })),
        )
        .mount(&server)
        .await;

    let err = publisher_for(&server)
        .publish(&PublishRequest::new(Platform::Blog, "Body").with_title("Title"))
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Blogger rejected the post (403): Forbidden blog");
}

#[tokio::test]
async fn test_blogger_scheduled_post_carries_publish_date() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/blogger/v3/blogs/blog-42/posts/"))
        .and(body_partial_json(json!({
            "title": "Autumn menu",
            "published": "2026-06-03T09:00:00Z",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "988" })))
        .expect(1)
        .mount(&server)
        .await;

    let at = Utc.with_ymd_and_hms(2026, 6, 3, 9, 0, 0).unwrap();
    let receipt = publisher_for(&server)
        .publish(
            &PublishRequest::new(Platform::Blog, "Coming soon")
                .with_title("Autumn menu")
                .scheduled_at(at),
        )
        .await
        .unwrap();
    assert_eq!(receipt.scheduled_at, Some(at));
}

// =============================================================================
// Brevo
// =============================================================================

#[tokio::test]
async fn test_brevo_sends_email() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/smtp/email"))
        .and(header("api-key", "brevo-key"))
        .and(body_partial_json(json!({
            "sender": { "name": "Acme", "email": "news@acme.test" },
            "to": [{ "email": "fan@example.test" }],
            "subject": "June news",
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "messageId": "<abc@brevo>" })))
        .expect(1)
        .mount(&server)
        .await;

    let request = PublishRequest::new(Platform::Email, "Hi there")
        .with_recipient("fan@example.test")
        .with_subject("June news");
    let receipt = publisher_for(&server).publish(&request).await.unwrap();
    assert_eq!(receipt.post_id.as_deref(), Some("<abc@brevo>"));
}

// =============================================================================
// Routing and scheduling
// =============================================================================

#[tokio::test]
async fn test_unconfigured_publishers() {
    let publisher = PlatformPublisher::from_config(&PublishConfig::default()).unwrap();
    for (platform, name) in [
        (Platform::Twitter, "Ayrshare"),
        (Platform::Blog, "Blogger"),
        (Platform::Email, "Brevo"),
    ] {
        let err = publisher
            .publish(&PublishRequest::new(platform, "content"))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), format!("{name} is not configured"));
    }
}

#[tokio::test]
async fn test_scheduled_post_sends_scheduled_date() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/post"))
        .and(body_partial_json(json!({
            "platforms": ["twitter"],
            "scheduledDate": "2026-06-01T17:00:00Z",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "s-1" })))
        .expect(1)
        .mount(&server)
        .await;

    let now = Utc.with_ymd_and_hms(2026, 6, 1, 11, 20, 0).unwrap();
    let scheduler = PostScheduler::new(Arc::new(publisher_for(&server)), PeakHours::default())
        .with_clock(Arc::new(move || now));

    let post = scheduler
        .schedule_post("Evening update", &[Platform::Twitter], &Media::default(), None)
        .await
        .unwrap();
    assert_eq!(
        post.scheduled_time,
        Utc.with_ymd_and_hms(2026, 6, 1, 17, 0, 0).unwrap()
    );
}

#[tokio::test]
async fn test_scheduling_skips_platforms_that_cannot_schedule() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/blogger/v3/blogs/blog-42/posts/"))
        .and(body_partial_json(json!({ "published": "2026-06-03T11:20:00Z" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "989" })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/smtp/email"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "messageId": "<x>" })))
        .expect(0)
        .mount(&server)
        .await;

    let now = Utc.with_ymd_and_hms(2026, 6, 1, 11, 20, 0).unwrap();
    let scheduler = PostScheduler::new(Arc::new(publisher_for(&server)), PeakHours::default())
        .with_clock(Arc::new(move || now));

    let post = scheduler
        .schedule_post(
            "Weekend tasting",
            &[Platform::Blog, Platform::Email],
            &Media::default(),
            Some(48.0),
        )
        .await
        .unwrap();
    assert_eq!(post.platforms, vec![Platform::Blog]);

    let err = scheduler
        .schedule_post("Weekend tasting", &[Platform::Email], &Media::default(), Some(48.0))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        SchedulerError::Publish(PublishError::SchedulingUnsupported("Brevo"))
    ));
    assert_eq!(scheduler.queue().await.len(), 1);
}

#[tokio::test]
async fn test_post_now_email_without_recipient_fails_per_platform() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/post"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "n-1" })))
        .mount(&server)
        .await;

    let scheduler = PostScheduler::new(Arc::new(publisher_for(&server)), PeakHours::default());
    let batch = scheduler
        .post_now(
            "Now live",
            &[Platform::Instagram, Platform::Email],
            &Media::default(),
            None,
        )
        .await
        .unwrap();

    assert!(!batch.success);
    assert_eq!(batch.succeeded(), 1);
    assert_eq!(batch.results[1].error.as_deref(), Some("Email requires a recipient"));

    assert!(matches!(
        scheduler.post_now("x", &[], &Media::default(), None).await,
        Err(SchedulerError::InvalidSchedule(_))
    ));
}

#[test]
fn test_peak_hours_load_falls_back_on_garbage() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("peaks.json");

    assert_eq!(PeakHours::load(&path), PeakHours::default());

    std::fs::write(&path, "not json").unwrap();
    assert_eq!(PeakHours::load(&path), PeakHours::default());

    std::fs::write(&path, r#"{"TikTok": [20, 19, 19], "twitter": [25]}"#).unwrap();
    let loaded = PeakHours::load(&path);
    assert_eq!(loaded.hours(&Platform::TikTok), &[19, 20]);
    // Entries with out-of-range hours are dropped.
    assert!(loaded.hours(&Platform::Twitter).is_empty());
}
