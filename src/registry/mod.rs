//! Adapter registries: the append-only static set of compiled-in
//! bidders and the store-backed dynamic set that hot reloads.

mod dynamic;
mod metrics;
mod static_registry;

pub use dynamic::DynamicRegistry;
pub use metrics::{MetricsSnapshot, RegistryMetrics};
pub use static_registry::{RegisteredBidder, RegistryError, StaticRegistry};
