use super::browse::{browse_layout, BrowseVm};
use crate::templates::components::listing_card;
use maud::{html, Markup};

pub fn cards_page(vm: &BrowseVm) -> Markup {
    browse_layout(
        "Volunteer Opportunities",
        "/",
        vm,
        html! {},
        html! {
            @if vm.rows.is_empty() {
                p class="empty" { "No organizations match these filters." }
            } @else {
                div class="cards" {
                    @for listing in &vm.rows {
                        (listing_card(listing))
                    }
                }
            }
        },
    )
}
