use maud::{html, Markup};
use rust_i18n::t;

use crate::{models::Question, names, quiz::QuizFlow};

pub struct QuestionData<'a> {
    pub question: &'a Question,
    pub flow: &'a QuizFlow,
}

pub fn question(data: QuestionData<'_>, locale: &str) -> Markup {
    let flow = data.flow;
    let index = flow.current();
    let selected = flow.current_answer();
    let index_vals = format!(r#"{{"index": {index}}}"#);

    html! {
        article.quiz {
            p.progress {
                (t!("quiz.progress", current = index + 1, total = flow.total(), locale = locale))
            }

            h3 { (data.question.question) }

            fieldset {
                @for opt in &data.question.options {
                    label.option {
                        input type="radio"
                              name="label"
                              value=(opt.label)
                              checked[selected == Some(opt.label)]
                              hx-post=(names::SELECT_ANSWER_URL)
                              hx-vals=(index_vals)
                              hx-target="main"
                              hx-swap="innerHTML";
                        (opt.text)
                    }
                }
            }

            @if let Some(err) = flow.error() {
                p.alert role="alert" { (err.message(locale)) }
            }

            div.quiz-nav {
                @if !flow.is_first() {
                    button.secondary type="button"
                           hx-post=(names::PREVIOUS_QUESTION_URL)
                           hx-target="main"
                           hx-swap="innerHTML" {
                        (t!("quiz.previous", locale = locale))
                    }
                }
                @if flow.is_last() {
                    button type="button"
                           hx-post=(names::SUBMIT_QUIZ_URL)
                           hx-target="main"
                           hx-swap="innerHTML"
                           hx-disabled-elt="this"
                           disabled[selected.is_none()] {
                        (t!("quiz.submit", locale = locale))
                    }
                } @else {
                    button type="button"
                           hx-post=(names::NEXT_QUESTION_URL)
                           hx-target="main"
                           hx-swap="innerHTML"
                           disabled[selected.is_none()] {
                        (t!("quiz.next", locale = locale))
                    }
                }
            }
        }
        p.quiz-home {
            a href=(names::HOME_URL) { (t!("quiz.home", locale = locale)) }
        }
    }
}
