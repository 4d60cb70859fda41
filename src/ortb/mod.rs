//! OpenRTB 2.x payload models.
//!
//! These are treated as opaque structured payloads by the rest of the
//! crate: unknown extension data rides along in each object's `ext`
//! field and survives a round-trip untouched unless a transform
//! explicitly overwrites it.

mod request;
mod response;

pub use request::*;
pub use response::*;
