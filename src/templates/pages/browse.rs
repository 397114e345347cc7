use crate::domain::{distinct_values, Column, FilterSet, Listing};
use crate::templates::components::filter_panel;
use crate::templates::desktop_layout;
use maud::{html, Markup};

/// Columns offered as multi-selects, populated from the data.
pub const SELECT_COLUMNS: [Column; 2] = [Column::Region, Column::County];

/// What every filterable page renders from.
pub struct BrowseVm<'a> {
    pub signed_in: Option<&'a str>,
    pub filters: &'a FilterSet,
    pub rows: Vec<&'a Listing>,
    pub total: usize,
    pub options: Vec<(Column, Vec<String>)>,
}

impl<'a> BrowseVm<'a> {
    pub fn new(all: &'a [Listing], filters: &'a FilterSet, signed_in: Option<&'a str>) -> Self {
        Self {
            signed_in,
            filters,
            rows: crate::domain::apply(all, filters),
            total: all.len(),
            options: SELECT_COLUMNS
                .into_iter()
                .map(|c| (c, distinct_values(all, c)))
                .collect(),
        }
    }

    /// `?a=b` for the active filter, or an empty string.
    pub fn query_suffix(&self) -> String {
        let query = self.filters.to_query();
        if query.is_empty() {
            query
        } else {
            format!("?{query}")
        }
    }
}

/// Sidebar + results frame shared by the cards, map and manage pages.
pub fn browse_layout(
    title: &str,
    path: &str,
    vm: &BrowseVm,
    head_extra: Markup,
    content: Markup,
) -> Markup {
    let suffix = vm.query_suffix();
    desktop_layout(
        title,
        vm.signed_in,
        head_extra,
        html! {
            div class="browse" {
                (filter_panel(path, vm.filters, &vm.options))
                main class="results" {
                    div class="results-header" {
                        h1 { (title) }
                        p class="count" {
                            "Showing " strong { (vm.rows.len()) } " of " (vm.total) " organizations"
                        }
                        p class="exports" {
                            a href=(format!("/export.csv{suffix}")) { "Download CSV" }
                            " · "
                            a href=(format!("/export.xlsx{suffix}")) { "Download XLSX" }
                        }
                    }
                    (content)
                }
            }
        },
    )
}
