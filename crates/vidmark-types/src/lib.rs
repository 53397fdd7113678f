//! Shared types for the vidmark workspace.
//!
//! A marker is the sole entity in the system: a timestamped annotation
//! (title, video URL, offset in whole seconds, note) recorded against a
//! video URL. Every other crate depends on this one and nothing else inside
//! the workspace, which keeps the dependency graph acyclic.

use serde::{Deserialize, Serialize};

/// A persisted video marker as returned by the store and the HTTP API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Marker {
    /// Opaque client-generated identifier. Unique and immutable once created.
    pub id: String,
    /// Optional display label.
    pub title: Option<String>,
    /// Source URL of the video.
    pub url: String,
    /// Offset into the video, in whole seconds. Never negative.
    pub seconds: i64,
    /// Optional free-text note.
    pub note: Option<String>,
    /// Server-assigned creation timestamp (ISO 8601, UTC). Updates never
    /// touch this field.
    pub created: String,
}

/// Payload for creating a marker. `created` is assigned by the database.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewMarker {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    pub url: String,
    pub seconds: i64,
    #[serde(default)]
    pub note: Option<String>,
}

/// Replacement values for an update. `id` and `created` are immutable and
/// therefore absent here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MarkerFields {
    #[serde(default)]
    pub title: Option<String>,
    pub url: String,
    pub seconds: i64,
    #[serde(default)]
    pub note: Option<String>,
}

impl From<&Marker> for MarkerFields {
    fn from(marker: &Marker) -> Self {
        Self {
            title: marker.title.clone(),
            url: marker.url.clone(),
            seconds: marker.seconds,
            note: marker.note.clone(),
        }
    }
}
