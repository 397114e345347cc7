// src/db/table_file.rs
//
// CSV layout of the listings table. One header row, one row per listing,
// booleans as True/False, absent optionals as empty cells.

use crate::db::directory::StoreError;
use crate::domain::{Coordinates, FocusArea, Listing, ListingDraft, Region, StableId};
use std::collections::{BTreeSet, HashMap};
use std::io::{Read, Write};

pub const STABLE_ID_COLUMN: &str = "StableId";
const LEGACY_ID_COLUMN: &str = "OriginalIndex";

const LEADING_COLUMNS: [&str; 7] = [
    "Organization",
    "OrgURL",
    "VolunteerListing",
    "Region",
    "County",
    "City",
    "About",
];
const COORDINATE_COLUMNS: [&str; 2] = ["latitude", "longitude"];

/// A row as found on disk. Files written before stable identity existed
/// have no id, and the store assigns one.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredRow {
    pub stable_id: Option<StableId>,
    pub draft: ListingDraft,
    pub coordinates: Option<Coordinates>,
}

pub fn header(with_stable_id: bool) -> Vec<&'static str> {
    let mut cols: Vec<&'static str> = LEADING_COLUMNS.to_vec();
    cols.extend(FocusArea::ALL.iter().map(|a| a.column()));
    cols.extend(COORDINATE_COLUMNS);
    if with_stable_id {
        cols.push(STABLE_ID_COLUMN);
    }
    cols
}

/// Write rows in table order. Exports leave the id column out.
pub fn write_rows<'a, W, I>(writer: W, rows: I, with_stable_id: bool) -> Result<(), StoreError>
where
    W: Write,
    I: IntoIterator<Item = &'a Listing>,
{
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(header(with_stable_id))?;

    for listing in rows {
        let mut record: Vec<String> = vec![
            listing.organization.clone(),
            listing.org_url.clone().unwrap_or_default(),
            listing.volunteer_listing.clone().unwrap_or_default(),
            listing.region.to_string(),
            listing.county.clone(),
            listing.city.clone(),
            listing.about.clone(),
        ];
        record.extend(
            FocusArea::ALL
                .iter()
                .map(|a| bool_cell(listing.has(*a)).to_string()),
        );
        match listing.coordinates {
            Some(c) => {
                record.push(c.latitude.to_string());
                record.push(c.longitude.to_string());
            }
            None => {
                record.push(String::new());
                record.push(String::new());
            }
        }
        if with_stable_id {
            record.push(listing.stable_id.to_string());
        }
        wtr.write_record(&record)?;
    }

    wtr.flush()?;
    Ok(())
}

pub fn read_rows<R: Read>(reader: R) -> Result<Vec<StoredRow>, StoreError> {
    let mut rdr = csv::Reader::from_reader(reader);
    let headers = rdr
        .headers()?
        .iter()
        .enumerate()
        .map(|(i, h)| (h.trim().to_string(), i))
        .collect::<HashMap<_, _>>();

    let find = |name: &str| headers.get(name).copied();
    let organization_idx = find("Organization")
        .ok_or_else(|| StoreError::Corrupt("table file has no Organization column".into()))?;
    let id_idx = find(STABLE_ID_COLUMN).or_else(|| find(LEGACY_ID_COLUMN));
    let focus_idx: Vec<(FocusArea, Option<usize>)> = FocusArea::ALL
        .iter()
        .map(|a| (*a, find(a.column()).or_else(|| a.legacy_column().and_then(find))))
        .collect();

    let mut rows = Vec::new();
    for (n, record) in rdr.records().enumerate() {
        let record = record?;
        // header is line 1
        let line = n + 2;
        // Text cells are kept verbatim; only typed cells are trimmed before parsing.
        let text = |idx: Option<usize>| idx.and_then(|i| record.get(i)).unwrap_or("");
        let cell = |idx: Option<usize>| text(idx).trim();

        let region = match cell(find("Region")) {
            "" => return Err(StoreError::Corrupt(format!("line {line}: missing Region"))),
            raw => raw
                .parse::<Region>()
                .map_err(|e| StoreError::Corrupt(format!("line {line}: {e}")))?,
        };

        let mut focus_areas = BTreeSet::new();
        for (area, idx) in &focus_idx {
            let raw = cell(*idx);
            let set = parse_bool(raw).ok_or_else(|| {
                StoreError::Corrupt(format!("line {line}: '{raw}' is not a boolean"))
            })?;
            if set {
                focus_areas.insert(*area);
            }
        }

        let coordinates = parse_coordinates(
            cell(find(COORDINATE_COLUMNS[0])),
            cell(find(COORDINATE_COLUMNS[1])),
            line,
        )?;

        let stable_id = match cell(id_idx) {
            "" => None,
            raw => Some(parse_id(raw).ok_or_else(|| {
                StoreError::Corrupt(format!("line {line}: '{raw}' is not a valid id"))
            })?),
        };

        rows.push(StoredRow {
            stable_id,
            draft: ListingDraft {
                organization: text(Some(organization_idx)).to_string(),
                org_url: optional(text(find("OrgURL"))),
                volunteer_listing: optional(text(find("VolunteerListing"))),
                region,
                county: text(find("County")).to_string(),
                city: text(find("City")).to_string(),
                about: text(find("About")).to_string(),
                focus_areas,
            },
            coordinates,
        });
    }

    Ok(rows)
}

fn bool_cell(value: bool) -> &'static str {
    if value {
        "True"
    } else {
        "False"
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw {
        "True" | "true" | "TRUE" | "1" | "1.0" => Some(true),
        "False" | "false" | "FALSE" | "0" | "0.0" | "" => Some(false),
        _ => None,
    }
}

fn optional(raw: &str) -> Option<String> {
    (!raw.is_empty()).then(|| raw.to_string())
}

/// Spreadsheet tools sometimes write integer columns as `3.0`.
/// Floats outside the id range are rejected rather than saturated.
fn parse_id(raw: &str) -> Option<StableId> {
    raw.parse::<StableId>().ok().or_else(|| {
        let f = raw.parse::<f64>().ok()?;
        // 2^64 is exactly representable as f64; anything at or above it does not fit.
        let in_range = f >= 0.0 && f < StableId::MAX as f64;
        (in_range && f.fract() == 0.0).then_some(f as StableId)
    })
}

fn parse_coordinates(lat: &str, lon: &str, line: usize) -> Result<Option<Coordinates>, StoreError> {
    let parse = |raw: &str, name: &str| {
        raw.parse::<f64>()
            .map_err(|_| StoreError::Corrupt(format!("line {line}: bad {name} '{raw}'")))
    };

    match (lat.is_empty(), lon.is_empty()) {
        (true, true) => Ok(None),
        (false, false) => Ok(Some(Coordinates {
            latitude: parse(lat, "latitude")?,
            longitude: parse(lon, "longitude")?,
        })),
        _ => {
            log::warn!("line {line}: only one coordinate present, dropping both");
            Ok(None)
        }
    }
}
