use axum::{
    extract::{Form, State},
    routing::get,
    Router,
};
use rust_i18n::t;

use crate::{
    extractors::{IsHtmx, Locale},
    services::lead::LeadForm,
    views,
    views::form as form_views,
    AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new().route("/form", get(form_page).post(submit_form))
}

async fn form_page(IsHtmx(is_htmx): IsHtmx, Locale(locale): Locale) -> maud::Markup {
    views::render(
        is_htmx,
        &t!("form.title", locale = &locale),
        form_views::lead_form(&LeadForm::default(), None, &locale),
        &locale,
    )
}

/// One request per click: the submit button is disabled by htmx while this
/// handler runs.
async fn submit_form(
    State(state): State<AppState>,
    Locale(locale): Locale,
    Form(body): Form<LeadForm>,
) -> maud::Markup {
    let outcome = state.campaign.submit_lead(&body).await;
    views::titled(
        &t!("form.title", locale = &locale),
        form_views::lead_form(&body, Some(&outcome), &locale),
        &locale,
    )
}
