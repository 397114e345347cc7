use crate::db::table_file;
use crate::domain::Listing;
use crate::errors::ServerError;

/// Filtered rows in the table-file layout, minus the id column.
pub fn export_listings_csv(listings: &[&Listing]) -> Result<Vec<u8>, ServerError> {
    let mut buffer = Vec::new();
    table_file::write_rows(&mut buffer, listings.iter().copied(), false)?;
    Ok(buffer)
}
