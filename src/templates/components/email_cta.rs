use maud::{html, Markup};

/// Email sign-in form for the add workflow.
pub fn email_sign_in_form() -> Markup {
    html! {
        div class="email-cta-wrapper" {
            form method="post" action="/auth/sign-in" class="email-cta" {
                label for="email" { "Enter your email to add a new listing" }
                input
                    type="email"
                    id="email"
                    name="email"
                    placeholder="you@domain.org"
                    autocomplete="email"
                    required;

                button type="submit" class="primary" { "Continue" }

                p class="microcopy" {
                    "Only emails on the editors list can add listings. Browsing needs no sign-in."
                }
            }
        }
    }
}
