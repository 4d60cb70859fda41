//! Deadline-aware HTTP egress shared by every adapter.

mod client;

pub use client::{BidderClient, MAX_RESPONSE_BYTES};
