#![allow(dead_code)]

use std::collections::VecDeque;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;
use xguard::{Transport, TransportError, TransportResponse};

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub url: String,
    pub body: Value,
    pub headers: Vec<(String, String)>,
}

/// Scripted transport. Queued responses are served first; once the queue is
/// empty every request succeeds with `{"token": "token-<n>"}`.
#[derive(Default)]
pub struct MockTransport {
    responses: Mutex<VecDeque<Result<TransportResponse, TransportError>>>,
    delay: Duration,
    requests: Mutex<Vec<RecordedRequest>>,
    cookies: Mutex<Vec<(String, String, String)>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every request sleeps this long before answering.
    pub fn with_delay(delay: Duration) -> Self {
        Self {
            delay,
            ..Self::default()
        }
    }

    pub fn push_response(&self, response: Result<TransportResponse, TransportError>) {
        self.responses.lock().push_back(response);
    }

    pub fn push_json(&self, status: u16, body: &str) {
        self.push_response(Ok(TransportResponse::new(status, body)));
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().len()
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().clone()
    }

    pub fn cookies(&self) -> Vec<(String, String, String)> {
        self.cookies.lock().clone()
    }
}

#[async_trait]
impl Transport for MockTransport {
    fn set_cookie(&self, name: &str, value: &str, domain: &str) {
        self.cookies
            .lock()
            .push((name.to_string(), value.to_string(), domain.to_string()));
    }

    async fn post_json(
        &self,
        url: &str,
        body: &Value,
        headers: &[(String, String)],
    ) -> Result<TransportResponse, TransportError> {
        let n = {
            let mut requests = self.requests.lock();
            requests.push(RecordedRequest {
                url: url.to_string(),
                body: body.clone(),
                headers: headers.to_vec(),
            });
            requests.len()
        };

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let scripted = self.responses.lock().pop_front();
        scripted.unwrap_or_else(|| {
            Ok(TransportResponse::new(
                200,
                format!(r#"{{"token":"token-{n}"}}"#),
            ))
        })
    }
}
