//! Spreadsheet export for scraped business listings.
//!
//! Writes listings as CSV with one header row and one row per listing.
//! The final column is a `=HYPERLINK(...)` formula linking back to a map
//! search for the listing, which spreadsheet applications render as a
//! clickable "View Map" link when the file is opened.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use localpack_core::Listing;

/// Column headers, in output order.
pub const HEADERS: [&str; 8] = [
    "Name",
    "Category",
    "No. Of Reviews",
    "Stars",
    "Phone Number",
    "Address",
    "Place Website",
    "Map Link",
];

/// Characters left unescaped by JavaScript's `encodeURIComponent`, which is
/// what spreadsheet map links have historically used. Stricter escaping here
/// would still produce working links but churn every existing export.
const MAP_QUERY: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to write export file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to serialize CSV row: {0}")]
    Csv(#[from] csv::Error),
}

/// Writes `listings` as CSV to `writer`.
///
/// # Errors
///
/// Returns [`ExportError`] when the underlying writer fails or a row
/// cannot be serialized.
pub fn write_spreadsheet<W: Write>(listings: &[Listing], writer: W) -> Result<(), ExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(HEADERS)?;

    for listing in listings {
        csv_writer.write_record([
            listing.title.as_str(),
            listing.category.as_str(),
            &listing.reviews.to_string(),
            &listing.stars.to_string(),
            listing.phone.as_str(),
            listing.address.as_str(),
            listing.website.as_str(),
            &map_link_formula(listing),
        ])?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Writes `listings` as CSV to the file at `path`, creating or truncating it.
///
/// # Errors
///
/// Returns [`ExportError::Io`] when the file cannot be created or written.
pub fn export_to_file(listings: &[Listing], path: &Path) -> Result<(), ExportError> {
    let file = File::create(path)?;
    write_spreadsheet(listings, BufWriter::new(file))
}

/// Builds the `=HYPERLINK(...)` formula for the map-link column.
///
/// The search term is unconditionally `title + ' ' + address`, so places
/// with generic names still resolve to the right pin; an empty address
/// leaves a trailing `%20`, matching the established link format.
fn map_link_formula(listing: &Listing) -> String {
    let term = format!("{} {}", listing.title, listing.address);
    let encoded = utf8_percent_encode(&term, MAP_QUERY).to_string();
    format!("=HYPERLINK(\"http://google.com/search?q={encoded}\",\"View Map\")")
}
