// src/forms.rs
use crate::domain::{FocusArea, ListingDraft, Region};
use crate::errors::ServerError;
use astra::Request;
use std::collections::BTreeSet;
use std::io::Read;

const MAX_FORM_BYTES: u64 = 64 * 1024;

pub type Pairs = Vec<(String, String)>;

pub fn parse_query(req: &Request) -> Pairs {
    decode(req.uri().query().unwrap_or(""))
}

/// Read an `application/x-www-form-urlencoded` body.
pub fn read_form(req: Request) -> Result<Pairs, ServerError> {
    let mut body = req.into_body();
    let mut raw = String::new();
    body.reader()
        .take(MAX_FORM_BYTES)
        .read_to_string(&mut raw)
        .map_err(|e| ServerError::BadRequest(format!("unreadable form body: {e}")))?;
    Ok(decode(&raw))
}

pub fn decode(raw: &str) -> Pairs {
    url::form_urlencoded::parse(raw.as_bytes())
        .into_owned()
        .collect()
}

pub fn field<'a>(pairs: &'a Pairs, name: &str) -> Option<&'a str> {
    pairs
        .iter()
        .find(|(k, _)| k == name)
        .map(|(_, v)| v.as_str())
}

/// Raw add-form values, kept as typed so the form can be re-shown on error.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListingForm {
    pub organization: String,
    pub org_url: String,
    pub volunteer_listing: String,
    pub region: String,
    pub county: String,
    pub city: String,
    pub about: String,
    pub focus_areas: BTreeSet<FocusArea>,
}

impl ListingForm {
    pub fn from_pairs(pairs: &Pairs) -> Self {
        let text = |name: &str| field(pairs, name).unwrap_or("").trim().to_string();
        Self {
            organization: text("organization"),
            org_url: text("org_url"),
            volunteer_listing: text("volunteer_listing"),
            region: text("region"),
            county: text("county"),
            city: text("city"),
            about: text("about"),
            focus_areas: pairs
                .iter()
                .filter(|(_, v)| v == "on")
                .filter_map(|(k, _)| FocusArea::from_field(k))
                .collect(),
        }
    }

    pub fn to_draft(&self) -> Result<ListingDraft, String> {
        let region = self.region.parse::<Region>()?;
        let optional = |s: &str| (!s.is_empty()).then(|| s.to_string());

        let draft = ListingDraft {
            organization: self.organization.clone(),
            org_url: optional(&self.org_url),
            volunteer_listing: optional(&self.volunteer_listing),
            region,
            county: self.county.clone(),
            city: self.city.clone(),
            about: self.about.clone(),
            focus_areas: self.focus_areas.clone(),
        };
        draft.validate()?;
        Ok(draft)
    }
}
