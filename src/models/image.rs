//! View-model for one entry of the gallery page.

use serde::Serialize;

/// An object in the bucket paired with a time-limited URL to fetch it.
///
/// Built fresh on every listing request and dropped once the page is rendered.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct ImageRecord {
    /// Display name; this is the object key verbatim.
    pub name: String,

    /// Presigned GET URL for the object.
    pub url: String,
}
