use maud::{html, Markup};
use rust_i18n::t;

use crate::{
    models::PICKUP_SITES,
    names,
    services::lead::{FieldErrors, LeadField, LeadForm, SubmitOutcome},
    views::components,
};

const FEEDBACK_DIALOG_ID: &str = "submit-dialog";

fn field_error(errors: &FieldErrors, field: LeadField, locale: &str) -> Markup {
    html! {
        @if let Some(msg) = errors.message(field, locale) {
            small.field-error { (msg) }
        }
    }
}

/// The lead form, re-rendered after each submission together with at most
/// one feedback surface: field errors, the success dialog, or a single
/// failure dialog.
pub fn lead_form(values: &LeadForm, outcome: Option<&SubmitOutcome>, locale: &str) -> Markup {
    let no_errors = FieldErrors::default();
    let errors = match outcome {
        Some(SubmitOutcome::Invalid(errors)) => errors,
        _ => &no_errors,
    };

    html! {
        h2 { (t!("form.title", locale = locale)) }
        form hx-post=(names::FORM_URL)
             hx-target="main"
             hx-swap="innerHTML"
             hx-disabled-elt="find button[type='submit']" {
            label {
                (t!("form.name", locale = locale))
                input name="name"
                      type="text"
                      autocomplete="name"
                      value=(values.name)
                      placeholder=(t!("form.name_placeholder", locale = locale))
                      aria-invalid=[errors.get(LeadField::Name).map(|_| "true")];
                (field_error(errors, LeadField::Name, locale))
            }
            label {
                (t!("form.phone", locale = locale))
                input name="phone"
                      type="tel"
                      inputmode="numeric"
                      maxlength="11"
                      value=(values.phone)
                      placeholder=(t!("form.phone_placeholder", locale = locale))
                      aria-invalid=[errors.get(LeadField::Phone).map(|_| "true")];
                (field_error(errors, LeadField::Phone, locale))
            }
            label {
                (t!("form.site", locale = locale))
                select name="site" aria-invalid=[errors.get(LeadField::Site).map(|_| "true")] {
                    option value="" selected[values.site.is_empty()] disabled {
                        (t!("form.site_placeholder", locale = locale))
                    }
                    @for site in PICKUP_SITES {
                        option value=(site) selected[values.site == *site] { (site) }
                    }
                }
                (field_error(errors, LeadField::Site, locale))
            }
            button type="submit" { (t!("form.submit", locale = locale)) }
        }

        @match outcome {
            Some(SubmitOutcome::Accepted) => {
                (components::dialog(
                    FEEDBACK_DIALOG_ID,
                    true,
                    html! { h3 { (t!("form.success", locale = locale)) } },
                    html! {
                        a href=(names::HOME_URL) role="button" { (t!("form.confirm", locale = locale)) }
                    },
                ))
            }
            Some(SubmitOutcome::Failed(failure)) => {
                (components::dialog(
                    FEEDBACK_DIALOG_ID,
                    true,
                    html! { p { (failure.message(locale)) } },
                    components::close_dialog_button(
                        FEEDBACK_DIALOG_ID,
                        &t!("form.acknowledge", locale = locale),
                    ),
                ))
            }
            _ => {}
        }
    }
}
