use axum::{
    extract::{Form, State},
    http::{header::SET_COOKIE, HeaderMap, HeaderValue},
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use rust_i18n::t;
use serde::Deserialize;

use crate::{
    extractors::{IsHtmx, Locale},
    names,
    rejections::{AppError, ResultExt},
    utils, views, AppState,
};

use crate::views::homepage as homepage_views;

const LOCALE_COOKIE_MAX_AGE_SECS: u64 = 60 * 60 * 24 * 365;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(homepage))
        .route("/quota", get(quota))
        .route("/set-locale", post(set_locale))
}

async fn homepage(IsHtmx(is_htmx): IsHtmx, Locale(locale): Locale) -> maud::Markup {
    views::render(
        is_htmx,
        &t!("home.title", locale = &locale),
        homepage_views::landing(&locale),
        &locale,
    )
}

/// Fetched once per landing page load. The returned button carries the
/// decision; clicking it does not fetch again.
async fn quota(State(state): State<AppState>, Locale(locale): Locale) -> maud::Markup {
    let quota = state.campaign.fetch_quota().await;
    homepage_views::call_to_action(&quota, &locale)
}

#[derive(Deserialize)]
struct SetLocaleBody {
    locale: String,
}

async fn set_locale(
    State(state): State<AppState>,
    Form(body): Form<SetLocaleBody>,
) -> Result<impl IntoResponse, AppError> {
    let locale = crate::extractors::match_supported_locale(&body.locale)
        .unwrap_or(names::DEFAULT_LOCALE);
    let cookie = utils::cookie(
        names::LOCALE_COOKIE_NAME,
        locale,
        LOCALE_COOKIE_MAX_AGE_SECS,
        state.secure_cookies,
    )
    .reject("could not build locale cookie")?;
    let mut headers = HeaderMap::new();
    headers.insert(SET_COOKIE, cookie);
    headers.insert("HX-Refresh", HeaderValue::from_static("true"));

    Ok((headers, ""))
}
