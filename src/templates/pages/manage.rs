use super::browse::{browse_layout, BrowseVm};
use crate::domain::StableId;
use maud::{html, Markup};

/// The delete awaiting confirmation in this session.
#[derive(Debug, Clone)]
pub struct PendingDelete {
    pub id: StableId,
    /// `None` once the row is gone from the table.
    pub organization: Option<String>,
}

fn confirm_forms(suffix: &str) -> Markup {
    html! {
        form method="post" action=(format!("/manage/confirm{suffix}")) class="inline" {
            button type="submit" class="danger" { "Confirm delete" }
        }
        form method="post" action=(format!("/manage/cancel{suffix}")) class="inline" {
            button type="submit" { "Cancel" }
        }
    }
}

pub fn manage_page(vm: &BrowseVm, pending: Option<&PendingDelete>) -> Markup {
    let suffix = vm.query_suffix();
    let pending_id = pending.map(|p| p.id);
    let pending_hidden = pending.is_some_and(|p| !vm.rows.iter().any(|l| l.stable_id == p.id));

    browse_layout(
        "Manage listings",
        "/manage",
        vm,
        html! {},
        html! {
            @if let Some(p) = pending.filter(|_| pending_hidden) {
                div class="notice" {
                    @match &p.organization {
                        Some(org) => { "Delete " strong { (org) } "? It is hidden by the current filter. " },
                        None => { "The listing pending deletion no longer exists. " },
                    }
                    (confirm_forms(&suffix))
                }
            }

            table class="manage" {
                thead {
                    tr {
                        th { "Organization" }
                        th { "City" }
                        th { "County" }
                        th { "Region" }
                        th { "Focus areas" }
                        th {}
                    }
                }
                tbody {
                    @for listing in &vm.rows {
                        @let is_pending = pending_id == Some(listing.stable_id);
                        tr class=[is_pending.then_some("pending")] {
                            td { (listing.organization) }
                            td { (listing.city) }
                            td { (listing.county) }
                            td { (listing.region) }
                            td { (listing.focus_labels().join(" | ")) }
                            td {
                                @if is_pending {
                                    (confirm_forms(&suffix))
                                } @else {
                                    form
                                        method="post"
                                        action=(format!("/manage/delete/{}{suffix}", listing.stable_id))
                                        class="inline"
                                    {
                                        button type="submit" { "Delete" }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        },
    )
}
