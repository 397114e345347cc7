use crate::domain::{Column, FilterSet, FocusArea};
use maud::{html, Markup};

const TEXT_COLUMNS: [(Column, &str); 3] = [
    (Column::Organization, "Organization"),
    (Column::City, "City"),
    (Column::About, "About"),
];

fn column_label(column: Column) -> &'static str {
    match column {
        Column::Organization => "Organization",
        Column::OrgUrl => "Website",
        Column::VolunteerListing => "Volunteer listing",
        Column::Region => "Region",
        Column::County => "County",
        Column::City => "City",
        Column::About => "About",
    }
}

/// Sidebar filter form. Submits by GET back to `action` so the filter lives in the URL.
pub fn filter_panel(action: &str, filters: &FilterSet, options: &[(Column, Vec<String>)]) -> Markup {
    html! {
        aside class="filters" {
            form method="get" action=(action) {
                h2 { "Filter" }

                @for (column, label) in TEXT_COLUMNS {
                    label for=(format!("q_{}", column.field())) { (label) " contains" }
                    input
                        type="text"
                        id=(format!("q_{}", column.field()))
                        name=(format!("q_{}", column.field()))
                        value=(filters.text_for(column));
                }

                @for (column, values) in options {
                    label for=(column.field()) { (column_label(*column)) }
                    select id=(column.field()) name=(column.field()) multiple size="5" {
                        @for value in values {
                            option value=(value) selected[filters.is_selected(*column, value)] { (value) }
                        }
                    }
                }

                fieldset {
                    legend { "Focus areas" }
                    @for area in FocusArea::ALL {
                        label class="check" {
                            input
                                type="checkbox"
                                name=(area.field())
                                value="on"
                                checked[filters.is_required(area)];
                            " " (area.label())
                        }
                    }
                }

                div class="actions" {
                    button type="submit" class="primary" { "Apply" }
                    a href=(action) { "Clear" }
                }
            }
        }
    }
}
