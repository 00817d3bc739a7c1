use std::time::Duration;

use axum::{Router, http::StatusCode, routing::post};
use portfolio::{
    ContactRelay,
    client::{
        ContactClient, ContactForm, DEFAULT_REJECTED_MESSAGE, DEFAULT_SENT_MESSAGE,
        SubmitStatus,
    },
};
use portfolio_contact::ContactSubmission;

mod helpers;

fn client(addr: std::net::SocketAddr) -> ContactClient {
    ContactClient::new(
        format!("http://{addr}/api/send-contact"),
        Duration::from_secs(5),
    )
    .unwrap()
}

fn ana() -> ContactForm {
    ContactForm::new(ContactSubmission::new("Ana", "ana@x.com", "Hi", "Line1\nLine2"))
}

#[tokio::test]
async fn test_sent_message_clears_form() {
    let (relay, mailer) = helpers::recording_relay();
    let app = helpers::test_app(relay);
    let addr = helpers::spawn(app.router.clone()).await;

    let mut form = ana();
    let mut seen = Vec::new();
    let status = client(addr)
        .submit(&mut form, |status| seen.push(status.to_string()))
        .await;

    assert_eq!(status, SubmitStatus::Sent("Email sent successfully!".to_string()));
    assert_eq!(seen, vec!["Sending…", "Email sent successfully!"]);
    assert_eq!(form.fields, ContactSubmission::default());
    assert_eq!(form.status, Some(status));

    let sent = mailer.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].reply_to.as_deref(), Some("ana@x.com"));
}

#[tokio::test]
async fn test_soft_success_is_shown_as_sent() {
    let app = helpers::test_app(ContactRelay::without_transport());
    let addr = helpers::spawn(app.router.clone()).await;

    let mut form = ana();
    let status = client(addr).submit(&mut form, |_| {}).await;

    assert!(status.is_sent());
    assert!(status.to_string().contains("email not sent"));
    assert!(!form.fields.is_complete());
}

#[tokio::test]
async fn test_server_failure_keeps_fields() {
    let (relay, _mailer) = helpers::failing_relay();
    let app = helpers::test_app(relay);
    let addr = helpers::spawn(app.router.clone()).await;

    let mut form = ana();
    let before = form.fields.clone();
    let status = client(addr).submit(&mut form, |_| {}).await;

    assert_eq!(status, SubmitStatus::Rejected("Server error.".to_string()));
    assert_eq!(form.fields, before);
}

#[tokio::test]
async fn test_defaults_when_server_sends_no_message() {
    let router = Router::new()
        .route(
            "/api/send-contact",
            post(|| async { axum::Json(serde_json::json!({"success": true})) }),
        );
    let addr = helpers::spawn(router).await;

    let mut form = ana();
    let status = client(addr).submit(&mut form, |_| {}).await;
    assert_eq!(status, SubmitStatus::Sent(DEFAULT_SENT_MESSAGE.to_string()));

    let router = Router::new().route(
        "/api/send-contact",
        post(|| async { (StatusCode::BAD_GATEWAY, "upstream unavailable") }),
    );
    let addr = helpers::spawn(router).await;

    let mut form = ana();
    let status = client(addr).submit(&mut form, |_| {}).await;
    assert_eq!(status, SubmitStatus::Rejected(DEFAULT_REJECTED_MESSAGE.to_string()));
    assert!(form.fields.is_complete());
}

#[tokio::test]
async fn test_success_false_with_ok_status_is_rejected() {
    let router = Router::new().route(
        "/api/send-contact",
        post(|| async {
            axum::Json(serde_json::json!({"success": false, "message": "Try again"}))
        }),
    );
    let addr = helpers::spawn(router).await;

    let mut form = ana();
    let status = client(addr).submit(&mut form, |_| {}).await;

    assert_eq!(status, SubmitStatus::Rejected("Try again".to_string()));
    assert!(form.fields.is_complete());
}

#[tokio::test]
async fn test_unreachable_relay_is_network_error() {
    let addr = helpers::closed_addr().await;

    let mut form = ana();
    let before = form.fields.clone();
    let status = client(addr).submit(&mut form, |_| {}).await;

    assert_eq!(status, SubmitStatus::NetworkError);
    assert_eq!(
        status.to_string(),
        "Network error, please try again later."
    );
    assert_eq!(form.fields, before);
}

#[tokio::test]
async fn test_incomplete_form_reports_once() {
    let (relay, mailer) = helpers::recording_relay();
    let app = helpers::test_app(relay);
    let addr = helpers::spawn(app.router.clone()).await;

    let mut form = ana();
    form.set(portfolio_contact::Field::Subject, "");

    let mut seen = Vec::new();
    let status = client(addr)
        .submit(&mut form, |status| seen.push(status.clone()))
        .await;

    assert_eq!(status, SubmitStatus::Incomplete);
    assert_eq!(seen, vec![SubmitStatus::Incomplete]);
    assert!(mailer.sent().is_empty());
}
