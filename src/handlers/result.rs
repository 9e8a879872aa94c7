use axum::{
    extract::State,
    http::{header::SET_COOKIE, HeaderMap},
    response::{IntoResponse, Redirect, Response},
    routing::get,
    Router,
};
use axum_extra::extract::CookieJar;
use rust_i18n::t;

use crate::{
    extractors::{IsHtmx, Locale},
    names,
    rejections::{AppError, ResultExt},
    utils, views,
    views::result as result_views,
    AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new().route("/result", get(result))
}

/// Shows the outcome handed over by `/quiz/submit`. The outcome is consumed
/// here, so a reload or a direct visit finds nothing and goes back home.
async fn result(
    State(state): State<AppState>,
    jar: CookieJar,
    IsHtmx(is_htmx): IsHtmx,
    Locale(locale): Locale,
) -> Result<Response, AppError> {
    let outcome = jar
        .get(names::OUTCOME_COOKIE_NAME)
        .and_then(|c| state.outcomes.take(c.value()));

    let clear = utils::clear_cookie(names::OUTCOME_COOKIE_NAME, state.secure_cookies)
        .reject("could not build clear-outcome cookie")?;
    let mut headers = HeaderMap::new();
    headers.insert(SET_COOKIE, clear);

    let Some(outcome) = outcome else {
        tracing::debug!("no quiz outcome to show, redirecting home");
        return Ok((headers, Redirect::to(names::HOME_URL)).into_response());
    };

    let page = views::render(
        is_htmx,
        &t!("result.title", locale = &locale),
        result_views::result(&outcome, &state.bank, &locale),
        &locale,
    );

    Ok((headers, page).into_response())
}
