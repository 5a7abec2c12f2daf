use std::time::Duration;

use pitwall::app_state::AppState;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Drain settlements until the in-flight request settles.
async fn settled(app: &mut AppState) {
    for _ in 0..200 {
        app.process_backend_messages();
        if !app.loading {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("request never settled");
}

#[tokio::test]
async fn test_empty_driver_name_is_rejected_without_network_call() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate-radio"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut app = AppState::new(server.uri());
    app.situation.insert_str("tyres overheating");

    app.submit();

    assert_eq!(app.error.as_deref(), Some("Please enter a driver name"));
    assert!(!app.loading);
    assert!(app.exchange.is_none());

    // Give a stray request time to arrive before the mock verifies on drop.
    tokio::time::sleep(Duration::from_millis(50)).await;
}

#[tokio::test]
async fn test_whitespace_situation_is_rejected_without_network_call() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate-radio"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut app = AppState::new(server.uri());
    app.driver_name.insert_str("Lewis Hamilton");
    app.situation.insert_str("   ");

    app.submit();

    assert_eq!(app.error.as_deref(), Some("Please enter a situation"));
    assert!(!app.loading);

    tokio::time::sleep(Duration::from_millis(50)).await;
}

#[tokio::test]
async fn test_successful_submission_stores_exchange() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate-radio"))
        // Values must arrive pre-trimmed.
        .and(body_json(json!({
            "driverName": "Lewis Hamilton",
            "situation": "safety car restart"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "exchange": "Driver: ok\nEngineer: roger"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut app = AppState::new(server.uri());
    app.driver_name.insert_str("  Lewis Hamilton  ");
    app.situation.insert_str("safety car restart");

    app.submit();

    // Loading holds from submission start until settlement, with prior
    // error and exchange cleared.
    assert!(app.loading);
    assert!(app.error.is_none());
    assert!(app.exchange.is_none());

    settled(&mut app).await;

    assert_eq!(app.exchange.as_deref(), Some("Driver: ok\nEngineer: roger"));
    assert!(app.error.is_none());
    assert!(!app.loading);
}

#[tokio::test]
async fn test_backend_detail_becomes_error_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate-radio"))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({"detail": "rate limited"})))
        .mount(&server)
        .await;

    let mut app = AppState::new(server.uri());
    app.driver_name.insert_str("Lewis");
    app.situation.insert_str("box box");

    app.submit();
    settled(&mut app).await;

    assert_eq!(app.error.as_deref(), Some("rate limited"));
    assert!(app.exchange.is_none());
    assert!(!app.loading);
}

#[tokio::test]
async fn test_resubmission_clears_previous_validation_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate-radio"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"exchange": "Driver: ok"})))
        .mount(&server)
        .await;

    let mut app = AppState::new(server.uri());
    app.submit();
    assert_eq!(app.error.as_deref(), Some("Please enter a driver name"));

    app.driver_name.insert_str("Lewis");
    app.situation.insert_str("box box");
    app.submit();

    assert!(app.error.is_none());
    settled(&mut app).await;
    assert_eq!(app.exchange.as_deref(), Some("Driver: ok"));
}

#[tokio::test]
async fn test_stale_settlement_is_discarded() {
    let slow = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate-radio"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(300))
                .set_body_json(json!({"exchange": "stale result"})),
        )
        .mount(&slow)
        .await;

    let fast = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate-radio"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"exchange": "fresh result"})))
        .mount(&fast)
        .await;

    let mut app = AppState::new(slow.uri());
    app.driver_name.insert_str("Lewis");
    app.situation.insert_str("box box");

    app.submit();
    assert!(app.loading);

    // Resubmit against the fast backend while the first request is still in
    // flight.
    app.backend_url = fast.uri();
    app.submit();

    settled(&mut app).await;
    assert_eq!(app.exchange.as_deref(), Some("fresh result"));

    // Wait out the slow response; it must not overwrite the fresh one.
    tokio::time::sleep(Duration::from_millis(400)).await;
    app.process_backend_messages();

    assert_eq!(app.exchange.as_deref(), Some("fresh result"));
    assert!(!app.loading);
}
