//! Data shapes for the gallery.
//!
//! Nothing here is persisted by the service itself: the object store owns
//! every byte, and these types live for a single request.

pub mod image;
pub mod upload;
