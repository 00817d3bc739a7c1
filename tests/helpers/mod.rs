//! Shared fixtures: mailer doubles, an in-process router, and a bound server.

#![allow(dead_code)]

use std::{
    net::SocketAddr,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use axum::Router;
use portfolio::{AppState, ContactRelay, router};
use portfolio_notification::{Email, MailError, Mailer};
use temp_dir::TempDir;

pub const FROM: &str = "site@example.com";
pub const TO: &str = "owner@example.com";

/// Accepts every message and keeps a copy.
#[derive(Clone, Default)]
pub struct RecordingMailer {
    sent: Arc<Mutex<Vec<Email>>>,
}

impl RecordingMailer {
    pub fn sent(&self) -> Vec<Email> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, email: &Email) -> Result<String, MailError> {
        let mut sent = self.sent.lock().unwrap();
        sent.push(email.clone());

        Ok(format!("<test-{}@example.com>", sent.len()))
    }
}

/// Rejects every message with an error carrying internal detail.
#[derive(Clone, Default)]
pub struct FailingMailer {
    attempts: Arc<Mutex<usize>>,
}

pub const FAILURE_DETAIL: &str = "535 auth failed for secret-user";

impl FailingMailer {
    pub fn attempts(&self) -> usize {
        *self.attempts.lock().unwrap()
    }
}

#[async_trait]
impl Mailer for FailingMailer {
    async fn send(&self, _email: &Email) -> Result<String, MailError> {
        *self.attempts.lock().unwrap() += 1;

        Err(MailError::InvalidAddress(FAILURE_DETAIL.to_string()))
    }
}

pub fn recording_relay() -> (ContactRelay, RecordingMailer) {
    let mailer = RecordingMailer::default();
    let relay = ContactRelay::new(Arc::new(mailer.clone()), FROM, TO);

    (relay, mailer)
}

pub fn failing_relay() -> (ContactRelay, FailingMailer) {
    let mailer = FailingMailer::default();
    let relay = ContactRelay::new(Arc::new(mailer.clone()), FROM, TO);

    (relay, mailer)
}

/// Router over a throwaway public directory containing `index.html`.
pub struct TestApp {
    pub router: Router,
    pub public_dir: TempDir,
}

pub fn test_app(relay: ContactRelay) -> TestApp {
    let public_dir = TempDir::new().unwrap();
    std::fs::write(
        public_dir.child("index.html"),
        "<!doctype html><title>Portfolio</title>",
    )
    .unwrap();
    std::fs::write(public_dir.child("app.css"), "body { margin: 0 }").unwrap();

    let router = router(AppState { relay }, public_dir.path());

    TestApp { router, public_dir }
}

/// Serve `router` on an ephemeral local port.
pub async fn spawn(router: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    addr
}

/// An address nothing is listening on.
pub async fn closed_addr() -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    addr
}
