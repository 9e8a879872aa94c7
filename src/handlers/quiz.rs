use axum::{
    extract::{Form, State},
    http::{header::SET_COOKIE, HeaderMap, HeaderValue},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use axum_extra::extract::CookieJar;
use rust_i18n::t;
use serde::Deserialize;

use crate::{
    extractors::{IsHtmx, Locale},
    names,
    quiz::{QuizFlow, QuizOutcome},
    rejections::{AppError, ResultExt},
    utils, views,
    views::quiz as quiz_views,
    AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/quiz", get(start_quiz))
        .route("/quiz/select", post(select_answer))
        .route("/quiz/next", post(next_question))
        .route("/quiz/prev", post(previous_question))
        .route("/quiz/submit", post(submit_quiz))
}

fn question_page(state: &AppState, flow: &QuizFlow, locale: &str) -> Result<maud::Markup, AppError> {
    let question = state
        .bank
        .get(flow.current())
        .ok_or(AppError::Internal("current question is outside the bank"))?;

    Ok(quiz_views::question(
        quiz_views::QuestionData { question, flow },
        locale,
    ))
}

/// The visitor has no live quiz; reload `/quiz` to start over.
fn restart() -> Response {
    let mut headers = HeaderMap::new();
    headers.insert("HX-Redirect", HeaderValue::from_static(names::QUIZ_URL));
    (headers, "").into_response()
}

fn session_token(jar: &CookieJar) -> Option<String> {
    jar.get(names::QUIZ_SESSION_COOKIE_NAME)
        .map(|c| c.value().to_string())
}

/// Every visit starts a fresh attempt, like remounting the quiz page.
async fn start_quiz(
    State(state): State<AppState>,
    jar: CookieJar,
    IsHtmx(is_htmx): IsHtmx,
    Locale(locale): Locale,
) -> Result<Response, AppError> {
    if let Some(previous) = session_token(&jar) {
        state.quizzes.discard(&previous);
    }

    let flow = QuizFlow::new(state.bank.len());
    let page = views::render(
        is_htmx,
        &t!("quiz.title", locale = &locale),
        question_page(&state, &flow, &locale)?,
        &locale,
    );

    let token = state.quizzes.start(flow);
    tracing::info!("started quiz session {token}");

    let cookie = utils::cookie(
        names::QUIZ_SESSION_COOKIE_NAME,
        &token,
        names::QUIZ_SESSION_TTL_SECS,
        state.secure_cookies,
    )
    .reject("could not build quiz session cookie")?;
    let mut headers = HeaderMap::new();
    headers.insert(SET_COOKIE, cookie);

    Ok((headers, page).into_response())
}

/// Applies `action` to the visitor's quiz and re-renders the current question.
fn apply(
    state: &AppState,
    jar: &CookieJar,
    locale: &str,
    action: impl FnOnce(&mut QuizFlow),
) -> Result<Response, AppError> {
    let flow = session_token(jar).and_then(|token| {
        state.quizzes.update(&token, |flow| {
            action(flow);
            flow.clone()
        })
    });

    match flow {
        Some(flow) => Ok(question_page(state, &flow, locale)?.into_response()),
        None => Ok(restart()),
    }
}

#[derive(Deserialize)]
struct SelectAnswerBody {
    index: usize,
    label: String,
}

async fn select_answer(
    State(state): State<AppState>,
    jar: CookieJar,
    Locale(locale): Locale,
    Form(body): Form<SelectAnswerBody>,
) -> Result<Response, AppError> {
    let mut chars = body.label.chars();
    let label = match (chars.next(), chars.next()) {
        (Some(label), None) => label,
        _ => return Err(AppError::Input("option label must be a single character")),
    };

    let question = state
        .bank
        .get(body.index)
        .ok_or(AppError::Input("unknown question"))?;
    if !question.has_label(label) {
        return Err(AppError::Input("unknown option"));
    }

    apply(&state, &jar, &locale, |flow| {
        if let Err(e) = flow.select(body.index, label) {
            tracing::warn!("could not record answer: {e}");
        }
    })
}

async fn next_question(
    State(state): State<AppState>,
    jar: CookieJar,
    Locale(locale): Locale,
) -> Result<Response, AppError> {
    apply(&state, &jar, &locale, |flow| {
        if let Err(e) = flow.advance() {
            tracing::debug!("cannot advance: {e}");
        }
    })
}

async fn previous_question(
    State(state): State<AppState>,
    jar: CookieJar,
    Locale(locale): Locale,
) -> Result<Response, AppError> {
    apply(&state, &jar, &locale, QuizFlow::retreat)
}

async fn submit_quiz(
    State(state): State<AppState>,
    jar: CookieJar,
    IsHtmx(is_htmx): IsHtmx,
    Locale(locale): Locale,
) -> Result<Response, AppError> {
    let Some(token) = session_token(&jar) else {
        return Ok(restart());
    };

    let submitted = state
        .quizzes
        .update(&token, |flow| (flow.submit(&state.bank), flow.clone()));

    match submitted {
        None => Ok(restart()),
        Some((Err(e), flow)) => {
            tracing::debug!("cannot submit quiz: {e}");
            Ok(question_page(&state, &flow, &locale)?.into_response())
        }
        Some((Ok(outcome), _)) => {
            state.quizzes.discard(&token);
            hand_off(&state, outcome, is_htmx)
        }
    }
}

/// Stores the outcome for a single read by `/result` and sends the browser there.
fn hand_off(state: &AppState, outcome: QuizOutcome, is_htmx: bool) -> Result<Response, AppError> {
    tracing::info!(
        success = outcome.success,
        wrong = outcome.wrong_indices.len(),
        "quiz submitted"
    );
    let handoff = state.outcomes.put(outcome);

    let outcome_cookie = utils::cookie(
        names::OUTCOME_COOKIE_NAME,
        &handoff,
        names::OUTCOME_TTL_SECS,
        state.secure_cookies,
    )
    .reject("could not build outcome cookie")?;
    let clear_session = utils::clear_cookie(names::QUIZ_SESSION_COOKIE_NAME, state.secure_cookies)
        .reject("could not build clear-session cookie")?;

    let mut headers = HeaderMap::new();
    headers.insert(SET_COOKIE, outcome_cookie);
    headers.append(SET_COOKIE, clear_session);

    if is_htmx {
        headers.insert("HX-Redirect", HeaderValue::from_static(names::RESULT_URL));
        Ok((headers, "").into_response())
    } else {
        Ok((headers, axum::response::Redirect::to(names::RESULT_URL)).into_response())
    }
}
