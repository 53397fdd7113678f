//! Bulk export/import file handling.
//!
//! The export format is a pretty-printed JSON array of markers, downloaded
//! as `video-markers-<date>.json`. Import accepts any JSON array of
//! marker-shaped objects; incoming ids are discarded and replaced with
//! freshly generated ones so a re-import can never collide with existing
//! rows.

use chrono::NaiveDate;
use serde::Deserialize;
use vidmark_types::{Marker, NewMarker};

use crate::error::ClientError;
use crate::generate_id;

/// One entry of an import file. `id` and `created` are intentionally not
/// read: the server assigns `created` and the importer assigns fresh ids.
#[derive(Debug, Deserialize)]
struct ImportEntry {
    #[serde(default)]
    title: Option<String>,
    url: String,
    seconds: i64,
    #[serde(default)]
    note: Option<String>,
}

/// Serializes the marker list as an indented JSON document.
pub fn export_json(markers: &[Marker]) -> Result<String, ClientError> {
    Ok(serde_json::to_string_pretty(markers)?)
}

/// The download name for an export created on `date`.
pub fn export_file_name(date: NaiveDate) -> String {
    format!("video-markers-{}.json", date.format("%Y-%m-%d"))
}

/// Parses an import file into create payloads, one per entry in file order,
/// each with a freshly generated id.
pub fn parse_import(contents: &str) -> Result<Vec<NewMarker>, ClientError> {
    let entries: Vec<ImportEntry> = serde_json::from_str(contents)?;
    Ok(entries
        .into_iter()
        .map(|entry| NewMarker {
            id: generate_id(),
            title: entry.title,
            url: entry.url,
            seconds: entry.seconds,
            note: entry.note,
        })
        .collect())
}
