use maud::{html, Markup, DOCTYPE};

pub const SITE_TITLE: &str = "Volunteer Opportunities";

/// Page chrome. `signed_in` is the allow-listed email of this session, if any.
pub fn desktop_layout(title: &str, signed_in: Option<&str>, head_extra: Markup, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) " · " (SITE_TITLE) }
                link rel="stylesheet" href="/static/main.css";
                (head_extra)
            }
            body {
              header class="site-header" {
                  svg
                      xmlns="http://www.w3.org/2000/svg"
                      width="24"
                      height="24"
                      viewBox="0 0 24 24"
                      fill="none"
                      stroke="#2f6b3a"
                      stroke-width="2"
                      stroke-linecap="round"
                      stroke-linejoin="round"
                      class="icon icon-tabler icon-tabler-leaf"
                  {
                      path stroke="none" d="M0 0h24v24H0z" fill="none" {}
                      path d="M5 21c.5 -4.5 2.5 -8 7 -10" {}
                      path d="M9 18c6.218 0 10.5 -3.288 11 -12v-2h-4.014c-9 0 -11.986 4 -12 9c0 1 0 3 2 5h3z" {}
                  }
                  h3 { (SITE_TITLE) }
                  nav {
                      ul {
                          li { a href="/" { "Cards" } }
                          li { a href="/map" { "Map" } }
                          li { a href="/manage" { "Manage" } }
                          li { a href="/add" { "Add" } }
                      }
                  }

                  @if let Some(email) = signed_in {
                      form method="post" action="/auth/sign-out" class="inline" {
                          span class="muted" { (email) " " }
                          button type="submit" class="link" { "Sign out" }
                      }
                  }
              }
                (content)
            }
        }
    }
}
