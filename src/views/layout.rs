use maud::{html, Markup, DOCTYPE};
use rust_i18n::t;

use crate::{names, utils};

const HTMX_SRC: &str = "https://unpkg.com/htmx.org@2.0.4";
const HTMX_INTEGRITY: &str =
    "sha384-HGfztofotfshcF7+8n44JQL2oJmowVChPTg48S+jvZoztPfvwD79OC/LTtG6dMp+";

fn css() -> Markup {
    html! {
        link rel="stylesheet" href="/static/base.css";
        link rel="stylesheet" href="/static/index.css";
    }
}

/// htmx is pinned to one release and checked against its published hash.
fn js() -> Markup {
    html! {
        script src=(HTMX_SRC) integrity=(HTMX_INTEGRITY) crossorigin="anonymous" {}
    }
}

fn icon() -> Markup {
    html! {
        link rel="icon" href="/static/img/icon.svg" type="image/svg+xml" {}
    }
}

fn locale_switcher(locale: &str) -> Markup {
    html! {
        ul {
            @for lang in names::SUPPORTED_LOCALES {
                li."secondary" {
                    @if *lang == locale {
                        strong { (t!("app.language", locale = *lang)) }
                    } @else {
                        a href="#"
                          hx-post=(names::SET_LOCALE_URL)
                          hx-vals=(format!(r#"{{"locale": "{lang}"}}"#)) {
                            (t!("app.language", locale = *lang))
                        }
                    }
                }
            }
        }
    }
}

fn header(locale: &str) -> Markup {
    html! {
        header {
            nav {
                ul {
                    li."secondary" {
                        a href=(names::HOME_URL) {
                            strong { (t!("app.title", locale = locale)) }
                        }
                    }
                }
                (locale_switcher(locale))
            }
        }
    }
}

fn footer() -> Markup {
    html! {
        footer {
            small."secondary" { "v" (utils::VERSION) }
        }
    }
}

fn main(body: Markup) -> Markup {
    html! {
        main { (body) }
    }
}

pub fn page(title: &str, body: Markup, locale: &str) -> Markup {
    html! {
        (DOCTYPE)
        html lang=(locale) {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                meta name="color-scheme" content="light";

                (css())
                (js())
                (icon())

                title { (format!("{title} - {}", t!("app.title", locale = locale))) }
            }

            body."container" {
                (header(locale))
                (main(body))
                (footer())
            }
        }
    }
}

pub fn titled(title: &str, body: Markup, locale: &str) -> Markup {
    html! {
        title { (title) " - " (t!("app.title", locale = locale)) }
        (body)
    }
}

/// Full page for normal navigation, bare fragment for htmx swaps.
pub fn render(is_htmx: bool, title: &str, body: Markup, locale: &str) -> Markup {
    if is_htmx {
        titled(title, body, locale)
    } else {
        page(title, body, locale)
    }
}
