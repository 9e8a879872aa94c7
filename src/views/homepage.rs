use maud::{html, Markup};
use rust_i18n::t;

use crate::{names, services::campaign::QuotaCount, views::components};

const QUOTA_DIALOG_ID: &str = "quota-dialog";

pub fn landing(locale: &str) -> Markup {
    html! {
        section.landing-hero {
            h1 { (t!("home.headline", locale = locale)) }
            p { (t!("home.intro", locale = locale)) }

            // Replaced by the call to action once the quota has been fetched.
            div #cta hx-get=(names::QUOTA_URL) hx-trigger="load" hx-swap="outerHTML" {
                button.cta disabled aria-busy="true" {
                    (t!("home.loading", locale = locale))
                }
            }
        }

        article.tips {
            header { strong { (t!("home.tips_title", locale = locale)) } }
            p { (t!("home.tips_body", locale = locale)) }
            p.limit {
                (t!("home.limit", total = names::TOTAL_QUOTA, locale = locale))
            }
        }
    }
}

/// Primary action, decided from the quota fetched for this render. An
/// exhausted quota only ever opens the dialog.
pub fn call_to_action(quota: &QuotaCount, locale: &str) -> Markup {
    html! {
        div #cta {
            @if quota.is_exhausted() {
                button.cta type="button"
                       onclick=(format!("document.getElementById('{QUOTA_DIALOG_ID}').showModal()")) {
                    (t!("home.start", locale = locale))
                }
                (components::dialog(
                    QUOTA_DIALOG_ID,
                    false,
                    html! {
                        h3 { (t!("home.exhausted_title", locale = locale)) }
                        p { (t!("home.exhausted_body", locale = locale)) }
                    },
                    components::close_dialog_button(
                        QUOTA_DIALOG_ID,
                        &t!("home.acknowledge", locale = locale),
                    ),
                ))
            } @else {
                (components::nav_link(
                    names::QUIZ_URL,
                    "cta",
                    html! { (t!("home.start", locale = locale)) },
                ))
            }
            p.remaining {
                (t!("home.remaining", remaining = quota.remaining, total = quota.total, locale = locale))
            }
        }
    }
}
