#![allow(dead_code)]

use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use axum::{
    body::Body,
    http::{header, Method, Request},
    response::Response,
    routing::{get, post},
    Json, Router,
};
use campaign_quiz::{
    models::QuestionBank,
    names, router,
    services::campaign::{CampaignService, HttpCampaignApi},
    AppState,
};
use serde_json::Value;
use tokio::net::TcpListener;

/// Stand-in for the campaign backend, serving canned envelopes.
pub struct FakeBackend {
    pub origin: String,
    pub leads: Arc<Mutex<Vec<Value>>>,
}

impl FakeBackend {
    pub fn lead_count(&self) -> usize {
        self.leads.lock().unwrap().len()
    }
}

pub async fn spawn_backend(count: Value, submit: Value) -> FakeBackend {
    let leads = Arc::new(Mutex::new(Vec::new()));
    let recorded = Arc::clone(&leads);
    let base = format!("/api/{}", names::DEFAULT_API_NAMESPACE);

    let app = Router::new()
        .route(
            &format!("{base}/count"),
            get(move || {
                let count = count.clone();
                async move { Json(count) }
            }),
        )
        .route(
            &base,
            post(move |Json(lead): Json<Value>| {
                let recorded = Arc::clone(&recorded);
                let submit = submit.clone();
                async move {
                    recorded.lock().unwrap().push(lead);
                    Json(submit)
                }
            }),
        );

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind fake backend");
    let addr = listener.local_addr().expect("fake backend address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("fake backend crashed");
    });

    FakeBackend {
        origin: format!("http://{addr}"),
        leads,
    }
}

/// An origin nothing listens on.
pub async fn unreachable_origin() -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind probe listener");
    let addr = listener.local_addr().expect("probe address");
    drop(listener);
    format!("http://{addr}")
}

pub fn api(origin: &str) -> HttpCampaignApi {
    HttpCampaignApi::new(origin, names::DEFAULT_API_NAMESPACE, Duration::from_secs(5))
        .expect("http client should build")
}

pub fn app(origin: &str) -> Router {
    let bank = QuestionBank::embedded().expect("embedded question bank");
    router(AppState::new(CampaignService::new(api(origin)), bank, false))
}

pub fn get_request(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut req = Request::builder().method(Method::GET).uri(uri);
    if let Some(cookie) = cookie {
        req = req.header(header::COOKIE, cookie);
    }
    req.body(Body::empty()).expect("request build should succeed")
}

pub fn htmx_post(uri: &str, form: &str, cookie: Option<&str>) -> Request<Body> {
    let mut req = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("HX-Request", "true")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        req = req.header(header::COOKIE, cookie);
    }
    req.body(Body::from(form.to_string()))
        .expect("request build should succeed")
}

pub async fn body_text(resp: Response) -> String {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("body should be readable");
    String::from_utf8(bytes.to_vec()).expect("body should be utf-8")
}

/// `name=value` pair for a cookie set by the response, ready for a `Cookie` header.
pub fn set_cookie(resp: &Response, name: &str) -> Option<String> {
    let prefix = format!("{name}=");
    resp.headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .filter(|v| v.starts_with(&prefix))
        .map(|v| v.split(';').next().unwrap_or_default().to_string())
        .find(|pair| pair.len() > prefix.len())
}

pub fn header_value(resp: &Response, name: &str) -> Option<String> {
    resp.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}
