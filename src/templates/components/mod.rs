use maud::{html, Markup};

pub mod email_cta;
pub mod error;
pub mod filter_panel;
pub mod listing_card;

pub use email_cta::email_sign_in_form;
pub use error::html_error_response;
pub use filter_panel::filter_panel;
pub use listing_card::listing_card;

/// Only absolute http(s) URLs become links; anything else renders as text.
pub fn safe_href(raw: &str) -> Option<String> {
    let parsed = url::Url::parse(raw.trim()).ok()?;
    matches!(parsed.scheme(), "http" | "https").then(|| parsed.to_string())
}

pub fn notice(message: &str) -> Markup {
    html! {
        p class="notice" role="alert" { (message) }
    }
}

pub fn focus_tags(labels: &[&str]) -> Markup {
    html! {
        ul class="tags" {
            @for label in labels {
                li class="tag" { (label) }
            }
        }
    }
}
