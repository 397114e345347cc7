// src/db/directory.rs
use crate::db::table_file::{self, StoredRow};
use crate::domain::{Coordinates, Listing, ListingDraft, StableId};
use crate::geocoder::Geocoder;
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("an organization named '{0}' already exists")]
    DuplicateKey(String),
    #[error("no listing with id {0}")]
    NotFound(StableId),
    #[error("invalid listing: {0}")]
    InvalidDraft(String),
    #[error("table file is corrupt: {0}")]
    Corrupt(String),
    #[error("table file I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("table file CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Owner of the canonical listing table and its file.
///
/// Every successful `insert` and `delete` rewrites the whole file before
/// returning. A failed mutation leaves both memory and disk as they were.
pub struct DirectoryStore {
    path: PathBuf,
    state_name: String,
    geocoder: Arc<dyn Geocoder>,
    listings: Vec<Listing>,
    organizations: HashSet<String>,
    /// Lowest id that may still be handed out by this store.
    next_id: StableId,
}

impl DirectoryStore {
    /// Load the table at `path`; a missing file is an empty table.
    ///
    /// Rows without an id get one in file order, continuing after the
    /// largest id present, and the migrated table is written back.
    pub fn load(
        path: impl Into<PathBuf>,
        state_name: impl Into<String>,
        geocoder: Box<dyn Geocoder>,
    ) -> Result<Self, StoreError> {
        let path = path.into();
        let rows = if path.exists() {
            let file = File::open(&path)?;
            table_file::read_rows(BufReader::new(file))?
        } else {
            log::info!("{} not found, starting with an empty table", path.display());
            Vec::new()
        };

        let (listings, migrated) = assign_missing_ids(rows)?;

        let mut organizations = HashSet::with_capacity(listings.len());
        for listing in &listings {
            if !organizations.insert(listing.organization.clone()) {
                return Err(StoreError::Corrupt(format!(
                    "organization '{}' appears more than once",
                    listing.organization
                )));
            }
        }

        let store = Self {
            next_id: next_after(&listings)?,
            path,
            state_name: state_name.into(),
            geocoder: Arc::from(geocoder),
            listings,
            organizations,
        };

        if migrated > 0 {
            log::info!(
                "assigned ids to {migrated} listing(s) in {}",
                store.path.display()
            );
            store.persist()?;
        }

        log::info!(
            "loaded {} listing(s) from {}",
            store.listings.len(),
            store.path.display()
        );
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn listings(&self) -> &[Listing] {
        &self.listings
    }

    pub fn len(&self) -> usize {
        self.listings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }

    pub fn get(&self, id: StableId) -> Option<&Listing> {
        self.listings.iter().find(|l| l.stable_id == id)
    }

    /// Case-sensitive exact match on organization name.
    pub fn exists(&self, organization: &str) -> bool {
        self.organizations.contains(organization)
    }

    pub fn state_name(&self) -> &str {
        &self.state_name
    }

    /// Shared handle so callers can geocode without holding the store.
    pub fn geocoder(&self) -> Arc<dyn Geocoder> {
        Arc::clone(&self.geocoder)
    }

    /// Validation and the duplicate check, without touching the table.
    pub fn check_draft(&self, draft: &ListingDraft) -> Result<(), StoreError> {
        draft.validate().map_err(StoreError::InvalidDraft)?;
        if self.exists(&draft.organization) {
            return Err(StoreError::DuplicateKey(draft.organization.clone()));
        }
        Ok(())
    }

    pub fn insert(&mut self, draft: ListingDraft) -> Result<Listing, StoreError> {
        self.check_draft(&draft)?;
        let coordinates = locate(self.geocoder.as_ref(), &draft, &self.state_name);
        self.insert_located(draft, coordinates)
    }

    /// Insert with coordinates already looked up. Checks the draft again,
    /// since the table may have changed while the caller was geocoding.
    pub fn insert_located(
        &mut self,
        draft: ListingDraft,
        coordinates: Option<Coordinates>,
    ) -> Result<Listing, StoreError> {
        self.check_draft(&draft)?;

        let stable_id = self.next_id.max(next_after(&self.listings)?);
        let following = stable_id
            .checked_add(1)
            .ok_or_else(|| StoreError::Corrupt("listing ids are exhausted".into()))?;
        let listing = draft.into_listing(stable_id, coordinates);

        self.listings.push(listing.clone());
        if let Err(e) = self.persist() {
            self.listings.pop();
            return Err(e);
        }

        self.organizations.insert(listing.organization.clone());
        self.next_id = following;
        log::info!(
            "added listing {} '{}'",
            listing.stable_id,
            listing.organization
        );
        Ok(listing)
    }

    /// Remove the listing with this id. Other ids are left untouched.
    pub fn delete(&mut self, id: StableId) -> Result<Listing, StoreError> {
        let pos = self
            .listings
            .iter()
            .position(|l| l.stable_id == id)
            .ok_or(StoreError::NotFound(id))?;

        let removed = self.listings.remove(pos);
        if let Err(e) = self.persist() {
            self.listings.insert(pos, removed);
            return Err(e);
        }

        self.organizations.remove(&removed.organization);
        log::info!("deleted listing {} '{}'", id, removed.organization);
        Ok(removed)
    }

    /// Write the full table next to the target and rename it into place,
    /// so readers never observe a half-written file.
    pub fn persist(&self) -> Result<(), StoreError> {
        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };

        let mut tmp = NamedTempFile::new_in(dir)?;
        table_file::write_rows(BufWriter::new(tmp.as_file_mut()), &self.listings, true)?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| StoreError::Io(e.error))?;
        Ok(())
    }
}

/// Look up a draft's place. A miss is logged and the listing goes in unmapped.
pub fn locate(geocoder: &dyn Geocoder, draft: &ListingDraft, state_name: &str) -> Option<Coordinates> {
    let coordinates = geocoder.geocode(&draft.city, &draft.county, state_name);
    if coordinates.is_none() {
        log::warn!(
            "no coordinates for '{}' ({}, {}); adding without a map marker",
            draft.organization,
            draft.city,
            draft.county
        );
    }
    coordinates
}

fn id_after(id: StableId) -> Result<StableId, StoreError> {
    id.checked_add(1)
        .ok_or_else(|| StoreError::Corrupt(format!("id {id} leaves no room for new listings")))
}

fn next_after(listings: &[Listing]) -> Result<StableId, StoreError> {
    match listings.iter().map(|l| l.stable_id).max() {
        Some(max) => id_after(max),
        None => Ok(0),
    }
}

/// Give id-less rows the next free ids in file order. Returns how many were assigned.
fn assign_missing_ids(rows: Vec<StoredRow>) -> Result<(Vec<Listing>, usize), StoreError> {
    let mut seen = HashSet::new();
    for id in rows.iter().filter_map(|r| r.stable_id) {
        if !seen.insert(id) {
            return Err(StoreError::Corrupt(format!("id {id} appears more than once")));
        }
    }

    let mut next = match seen.iter().max() {
        Some(max) => id_after(*max)?,
        None => 0,
    };
    let mut migrated = 0;
    let mut listings = Vec::with_capacity(rows.len());
    for row in rows {
        let id = match row.stable_id {
            Some(id) => id,
            None => {
                migrated += 1;
                let id = next;
                next = id_after(id)?;
                id
            }
        };
        listings.push(row.draft.into_listing(id, row.coordinates));
    }

    Ok((listings, migrated))
}
