use crate::domain::Listing;
use crate::templates::components::{focus_tags, safe_href};
use maud::{html, Markup};

pub fn listing_card(listing: &Listing) -> Markup {
    let website = listing.org_url.as_deref().and_then(safe_href);
    let volunteer = listing.volunteer_listing.as_deref().and_then(safe_href);

    html! {
        article class="card" {
            h2 { (listing.organization) }
            p class="muted" {
                @if !listing.city.is_empty() { (listing.city) ", " }
                (listing.county) " County · " (listing.region)
            }
            @if !listing.about.is_empty() {
                div class="card-body" {
                    p { (listing.about) }
                }
            }
            (focus_tags(&listing.focus_labels()))
            @if website.is_some() || volunteer.is_some() {
                p class="links" {
                    @if let Some(href) = &website {
                        a href=(href) target="_blank" rel="noopener noreferrer" { "Website" }
                    }
                    @if let Some(href) = &volunteer {
                        " "
                        a href=(href) target="_blank" rel="noopener noreferrer" { "Volunteer" }
                    }
                }
            }
        }
    }
}
