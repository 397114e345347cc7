use crate::db::table_file;
use crate::domain::{FocusArea, Listing};
use crate::errors::ServerError;
use rust_xlsxwriter::{Workbook, Worksheet};

/// Filtered rows as a single-sheet workbook, same columns as the CSV export.
pub fn export_listings_xlsx(listings: &[&Listing]) -> Result<Vec<u8>, ServerError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    for (col, header) in table_file::header(false).iter().enumerate() {
        worksheet
            .write_string(0, col as u16, *header)
            .map_err(|e| {
                ServerError::XlsxError(format!("Failed to write header '{}': {}", header, e))
            })?;
    }

    for (i, listing) in listings.iter().enumerate() {
        write_listing(worksheet, (i + 1) as u32, listing)?;
    }

    workbook
        .save_to_buffer()
        .map_err(|e| ServerError::XlsxError(format!("Failed to save workbook: {}", e)))
}

fn write_listing(sheet: &mut Worksheet, row: u32, listing: &Listing) -> Result<(), ServerError> {
    let text = [
        listing.organization.as_str(),
        listing.org_url.as_deref().unwrap_or(""),
        listing.volunteer_listing.as_deref().unwrap_or(""),
        listing.region.as_str(),
        listing.county.as_str(),
        listing.city.as_str(),
        listing.about.as_str(),
    ];
    for (col, value) in text.iter().enumerate() {
        sheet
            .write_string(row, col as u16, *value)
            .map_err(|e| ServerError::XlsxError(format!("Failed to write row {row}: {e}")))?;
    }

    let mut col = text.len() as u16;
    for area in FocusArea::ALL {
        sheet
            .write_boolean(row, col, listing.has(area))
            .map_err(|e| ServerError::XlsxError(format!("Failed to write {}: {e}", area.column())))?;
        col += 1;
    }

    if let Some(c) = listing.coordinates {
        sheet
            .write_number(row, col, c.latitude)
            .map_err(|e| ServerError::XlsxError(format!("Failed to write latitude: {e}")))?;
        sheet
            .write_number(row, col + 1, c.longitude)
            .map_err(|e| ServerError::XlsxError(format!("Failed to write longitude: {e}")))?;
    }

    Ok(())
}
