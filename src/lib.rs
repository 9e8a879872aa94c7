rust_i18n::i18n!("locales", fallback = "zh-CN");

pub mod extractors;
pub mod handlers;
pub mod models;
pub mod names;
pub mod quiz;
pub mod rejections;
pub mod services;
pub mod statics;
pub mod utils;
pub mod views;

use std::sync::Arc;

use axum::{
    extract::Request,
    http::{Method, StatusCode},
    middleware,
    response::{IntoResponse, Response},
    Router,
};

use crate::{
    models::QuestionBank,
    services::{campaign::CampaignService, handoff::OutcomeChannel, sessions::QuizSessions},
};

#[derive(Clone)]
pub struct AppState {
    pub campaign: CampaignService,
    pub bank: Arc<QuestionBank>,
    pub quizzes: QuizSessions,
    pub outcomes: OutcomeChannel,
    pub secure_cookies: bool,
}

impl AppState {
    pub fn new(campaign: CampaignService, bank: QuestionBank, secure_cookies: bool) -> Self {
        Self {
            campaign,
            bank: Arc::new(bank),
            quizzes: QuizSessions::default(),
            outcomes: OutcomeChannel::default(),
            secure_cookies,
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(handlers::homepage::routes())
        .merge(handlers::quiz::routes())
        .merge(handlers::result::routes())
        .merge(handlers::form::routes())
        .layer(middleware::from_fn(csrf_check))
        .nest("/static", statics::routes())
        .with_state(state)
}

/// State-changing requests are only accepted from htmx, which a cross-site
/// form cannot imitate.
async fn csrf_check(req: Request, next: middleware::Next) -> Response {
    let state_changing =
        [Method::POST, Method::PUT, Method::PATCH, Method::DELETE].contains(req.method());

    if state_changing && !extractors::is_htmx_request(req.headers()) {
        tracing::warn!("rejected {} {} without HX-Request", req.method(), req.uri());
        return (StatusCode::FORBIDDEN, "CSRF check failed").into_response();
    }

    next.run(req).await
}
