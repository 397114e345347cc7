use crate::domain::{FocusArea, Region, MAX_ABOUT_CHARS};
use crate::forms::ListingForm;
use crate::geos::WISCONSIN_COUNTIES;
use crate::templates::components::{email_sign_in_form, notice};
use crate::templates::desktop_layout;
use maud::{html, Markup};

pub fn sign_in_page(message: Option<&str>) -> Markup {
    desktop_layout(
        "Sign in",
        None,
        html! {},
        html! {
            main class="container narrow" {
                h1 { "Sign in to add a listing" }
                @if let Some(message) = message {
                    (notice(message))
                }
                (email_sign_in_form())
            }
        },
    )
}

pub fn add_page(email: &str, form: &ListingForm, message: Option<&str>) -> Markup {
    desktop_layout(
        "Add a listing",
        Some(email),
        html! {},
        html! {
            main class="container narrow" {
                h1 { "Add a listing" }
                @if let Some(message) = message {
                    (notice(message))
                }

                form method="post" action="/add" class="listing-form" {
                    label for="organization" { "Organization" }
                    input type="text" id="organization" name="organization" value=(form.organization) required;

                    label for="org_url" { "Website" }
                    input type="url" id="org_url" name="org_url" value=(form.org_url) placeholder="https://";

                    label for="volunteer_listing" { "Volunteer listing" }
                    input
                        type="url"
                        id="volunteer_listing"
                        name="volunteer_listing"
                        value=(form.volunteer_listing)
                        placeholder="https://";

                    label for="region" { "Region" }
                    select id="region" name="region" required {
                        @for region in Region::ALL {
                            option value=(region.as_str()) selected[form.region == region.as_str()] { (region) }
                        }
                    }

                    label for="county" { "County" }
                    select id="county" name="county" required {
                        @for county in WISCONSIN_COUNTIES {
                            option value=(county) selected[form.county == *county] { (county) }
                        }
                    }

                    label for="city" { "City" }
                    input type="text" id="city" name="city" value=(form.city);

                    label for="about" { "About (up to " (MAX_ABOUT_CHARS) " characters)" }
                    textarea id="about" name="about" rows="5" maxlength=(MAX_ABOUT_CHARS) { (form.about) }

                    fieldset {
                        legend { "Focus areas" }
                        @for area in FocusArea::ALL {
                            label class="check" {
                                input
                                    type="checkbox"
                                    name=(area.field())
                                    value="on"
                                    checked[form.focus_areas.contains(&area)];
                                " " (area.label())
                            }
                        }
                    }

                    button type="submit" class="primary" { "Add listing" }
                }
            }
        },
    )
}
