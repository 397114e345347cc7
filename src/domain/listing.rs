// src/domain/listing.rs

use crate::geos::is_known_county;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Identity assigned when a listing is created. Never reused, never renumbered.
pub type StableId = u64;

pub const MAX_ABOUT_CHARS: usize = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Region {
    South,
    Southeast,
    North,
    Northeast,
}

impl Region {
    pub const ALL: [Region; 4] = [
        Region::South,
        Region::Southeast,
        Region::North,
        Region::Northeast,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Region::South => "South",
            Region::Southeast => "Southeast",
            Region::North => "North",
            Region::Northeast => "Northeast",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Region {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Region::ALL
            .into_iter()
            .find(|r| r.as_str() == s.trim())
            .ok_or_else(|| format!("unknown region '{s}'"))
    }
}

/// The fixed set of boolean tag columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FocusArea {
    Stewardship,
    Education,
    CitizenScience,
    Wildlife,
    Plants,
    Birds,
    LandUse,
}

impl FocusArea {
    pub const ALL: [FocusArea; 7] = [
        FocusArea::Stewardship,
        FocusArea::Education,
        FocusArea::CitizenScience,
        FocusArea::Wildlife,
        FocusArea::Plants,
        FocusArea::Birds,
        FocusArea::LandUse,
    ];

    /// Header name in the table file.
    pub fn column(&self) -> &'static str {
        match self {
            FocusArea::Stewardship => "Stewardship",
            FocusArea::Education => "Education",
            FocusArea::CitizenScience => "CitizenScience",
            FocusArea::Wildlife => "Wildlife",
            FocusArea::Plants => "Plants",
            FocusArea::Birds => "Birds",
            FocusArea::LandUse => "LandUse",
        }
    }

    /// Older table files spelled two of the headers with a space.
    pub fn legacy_column(&self) -> Option<&'static str> {
        match self {
            FocusArea::CitizenScience => Some("Citizen Science"),
            FocusArea::LandUse => Some("Land Use"),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        self.legacy_column().unwrap_or_else(|| self.column())
    }

    /// Form / query-string field name.
    pub fn field(&self) -> &'static str {
        match self {
            FocusArea::Stewardship => "stewardship",
            FocusArea::Education => "education",
            FocusArea::CitizenScience => "citizen_science",
            FocusArea::Wildlife => "wildlife",
            FocusArea::Plants => "plants",
            FocusArea::Birds => "birds",
            FocusArea::LandUse => "land_use",
        }
    }

    pub fn from_field(field: &str) -> Option<FocusArea> {
        FocusArea::ALL.into_iter().find(|a| a.field() == field)
    }
}

/// Text-valued columns a predicate can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Column {
    Organization,
    OrgUrl,
    VolunteerListing,
    Region,
    County,
    City,
    About,
}

impl Column {
    pub const ALL: [Column; 7] = [
        Column::Organization,
        Column::OrgUrl,
        Column::VolunteerListing,
        Column::Region,
        Column::County,
        Column::City,
        Column::About,
    ];

    pub fn field(&self) -> &'static str {
        match self {
            Column::Organization => "organization",
            Column::OrgUrl => "org_url",
            Column::VolunteerListing => "volunteer_listing",
            Column::Region => "region",
            Column::County => "county",
            Column::City => "city",
            Column::About => "about",
        }
    }

    pub fn from_field(field: &str) -> Option<Column> {
        Column::ALL.into_iter().find(|c| c.field() == field)
    }
}

/// Latitude and longitude travel together so a row can never hold just one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Listing {
    pub stable_id: StableId,
    pub organization: String,
    pub org_url: Option<String>,
    pub volunteer_listing: Option<String>,
    pub region: Region,
    pub county: String,
    pub city: String,
    pub about: String,
    pub focus_areas: BTreeSet<FocusArea>,
    pub coordinates: Option<Coordinates>,
}

impl Listing {
    pub fn has(&self, area: FocusArea) -> bool {
        self.focus_areas.contains(&area)
    }

    pub fn column_value(&self, column: Column) -> Option<&str> {
        match column {
            Column::Organization => Some(&self.organization),
            Column::OrgUrl => self.org_url.as_deref(),
            Column::VolunteerListing => self.volunteer_listing.as_deref(),
            Column::Region => Some(self.region.as_str()),
            Column::County => Some(&self.county),
            Column::City => Some(&self.city),
            Column::About => Some(&self.about),
        }
    }

    /// Labels of the tags set on this listing, in column order.
    pub fn focus_labels(&self) -> Vec<&'static str> {
        self.focus_areas.iter().map(|a| a.label()).collect()
    }
}

/// A listing as submitted by the add form, before identity and geocoding.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingDraft {
    pub organization: String,
    pub org_url: Option<String>,
    pub volunteer_listing: Option<String>,
    pub region: Region,
    pub county: String,
    pub city: String,
    pub about: String,
    pub focus_areas: BTreeSet<FocusArea>,
}

impl ListingDraft {
    pub fn validate(&self) -> Result<(), String> {
        if self.organization.trim().is_empty() {
            return Err("Organization is required".into());
        }
        if !is_known_county(&self.county) {
            return Err(format!("'{}' is not a Wisconsin county", self.county));
        }
        let about_len = self.about.chars().count();
        if about_len > MAX_ABOUT_CHARS {
            return Err(format!(
                "About is {about_len} characters, the limit is {MAX_ABOUT_CHARS}"
            ));
        }
        Ok(())
    }

    pub fn into_listing(self, stable_id: StableId, coordinates: Option<Coordinates>) -> Listing {
        Listing {
            stable_id,
            organization: self.organization,
            org_url: self.org_url,
            volunteer_listing: self.volunteer_listing,
            region: self.region,
            county: self.county,
            city: self.city,
            about: self.about,
            focus_areas: self.focus_areas,
            coordinates,
        }
    }
}
