// tests/common/mod.rs

#![allow(dead_code)]

use async_trait::async_trait;
use eklase_core::{Endpoints, HttpClient, HttpResponse, Result};
use std::sync::{Arc, Mutex};

pub const DIARY_HTML: &str = include_str!("../fixtures/diary.html");
pub const DIARY_WEEK_HTML: &str = include_str!("../fixtures/diary_week.html");
pub const PROFILES_HTML: &str = include_str!("../fixtures/profiles.html");
pub const LESSON_TIMES_HTML: &str = include_str!("../fixtures/lesson_times.html");

pub const TEST_BASE_URL: &str = "http://portal.test";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

/// A request the session sent through the mock.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub url: String,
    pub params: Vec<(String, String)>,
}

impl RecordedRequest {
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

#[derive(Default)]
struct MockState {
    routes: Vec<(Method, String, HttpResponse)>,
    requests: Vec<RecordedRequest>,
}

/// Scripted [`HttpClient`]: answers each route with the last response registered
/// for it, and 404 for anything else.
#[derive(Clone, Default)]
pub struct MockHttpClient {
    state: Arc<Mutex<MockState>>,
}

impl MockHttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_get(&self, url: &str, status: u16, body: &str) -> &Self {
        self.route(Method::Get, url, status, body)
    }

    pub fn on_post(&self, url: &str, status: u16, body: &str) -> &Self {
        self.route(Method::Post, url, status, body)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.lock().unwrap().requests.clone()
    }

    pub fn requests_to(&self, url: &str) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|request| request.url == url)
            .collect()
    }

    fn route(&self, method: Method, url: &str, status: u16, body: &str) -> &Self {
        self.state
            .lock()
            .unwrap()
            .routes
            .push((method, url.to_string(), HttpResponse::new(status, body)));
        self
    }

    fn answer(&self, method: Method, url: &str, params: &[(&str, &str)]) -> HttpResponse {
        let mut state = self.state.lock().unwrap();
        state.requests.push(RecordedRequest {
            method: method.clone(),
            url: url.to_string(),
            params: params
                .iter()
                .map(|(key, value)| (key.to_string(), value.to_string()))
                .collect(),
        });

        state
            .routes
            .iter()
            .rev()
            .find(|(m, u, _)| *m == method && u == url)
            .map(|(_, _, response)| response.clone())
            .unwrap_or_else(|| HttpResponse::new(404, "not found"))
    }
}

#[async_trait]
impl HttpClient for MockHttpClient {
    async fn get(&self, url: &str, query: &[(&str, &str)]) -> Result<HttpResponse> {
        Ok(self.answer(Method::Get, url, query))
    }

    async fn post_form(&self, url: &str, form: &[(&str, &str)]) -> Result<HttpResponse> {
        Ok(self.answer(Method::Post, url, form))
    }
}

pub fn test_endpoints() -> Endpoints {
    Endpoints::with_base_url(TEST_BASE_URL)
}

/// A mock answering every portal page with the fixtures and accepting logins.
pub fn portal_mock() -> MockHttpClient {
    let endpoints = test_endpoints();
    let mock = MockHttpClient::new();
    mock.on_post(&endpoints.login, 200, "<html>home</html>")
        .on_post(&endpoints.switcher, 302, "")
        .on_get(&endpoints.profile_selector, 200, PROFILES_HTML)
        .on_get(&endpoints.diary, 200, DIARY_HTML)
        .on_get(&endpoints.lesson_times, 200, LESSON_TIMES_HTML);
    mock
}

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
