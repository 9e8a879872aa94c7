use maud::{html, Markup};
use rust_i18n::t;

use crate::{models::QuestionBank, names, quiz::QuizOutcome, views::components};

pub fn result(outcome: &QuizOutcome, bank: &QuestionBank, locale: &str) -> Markup {
    html! {
        @if outcome.success {
            h2.success { (t!("result.success_title", locale = locale)) }
            p { (t!("result.success_subtitle", locale = locale)) }
            div.result-actions {
                (components::nav_link(names::FORM_URL, "", html! { (t!("result.to_form", locale = locale)) }))
                a href=(names::HOME_URL) { (t!("result.home", locale = locale)) }
            }
        } @else {
            h2 { (t!("result.failure_title", locale = locale)) }
            p { (t!("result.failure_subtitle", locale = locale)) }

            // Already in bank order.
            @for idx in &outcome.wrong_indices {
                @if let Some(q) = bank.get(*idx) {
                    article.wrong-answer {
                        h4 { (q.question) }
                        p { (t!("result.correct_answer", locale = locale)) (q.answer) }
                        p { (t!("result.explanation", locale = locale)) (q.explanation) }
                    }
                }
            }

            div.result-actions {
                a href=(names::QUIZ_URL) role="button" { (t!("result.retry", locale = locale)) }
                a href=(names::HOME_URL) role="button" class="outline" { (t!("result.home", locale = locale)) }
            }
        }
    }
}
