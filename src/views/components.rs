use maud::{html, Markup};

/// htmx navigation link with href fallback + hx-get for in-page swap.
pub fn nav_link(href: &str, class: &str, body: Markup) -> Markup {
    html! {
        a href=(href)
          role="button"
          class=(class)
          hx-get=(href)
          hx-target="main"
          hx-push-url="true"
          hx-swap="innerHTML" {
            (body)
        }
    }
}

/// Modal that can only be dismissed through its single action.
pub fn dialog(id: &str, open: bool, body: Markup, action: Markup) -> Markup {
    html! {
        dialog id=(id) open[open] {
            article {
                (body)
                footer { (action) }
            }
        }
    }
}

pub fn close_dialog_button(id: &str, label: &str) -> Markup {
    html! {
        button type="button"
               onclick=(format!("document.getElementById('{id}').close()")) {
            (label)
        }
    }
}
