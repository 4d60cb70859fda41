//! Server-side core of the TNE Catalyst real-time bidding gateway.
//!
//! For each incoming OpenRTB bid opportunity the hosting orchestrator
//! resolves adapters from the registries, calls
//! [`Adapter::make_requests`](adapter::Adapter), dispatches the
//! produced requests through the shared [`transport::BidderClient`],
//! and feeds each response back through `make_bids` to collect typed
//! bids. Compiled-in bidders live in [`bidders`]; store-driven ones are
//! materialized by the [`registry::DynamicRegistry`] from declarative
//! [`config::BidderConfig`] documents and hot reload in place.
//!
//! Typical startup wiring:
//!
//! ```no_run
//! use catalyst::registry::{DynamicRegistry, StaticRegistry};
//! use catalyst::store::RedisStore;
//! use catalyst::transport::BidderClient;
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! # async fn boot() -> Result<(), anyhow::Error> {
//! let statics = StaticRegistry::new();
//! catalyst::bidders::register_all(&statics)?;
//!
//! let store = Arc::new(RedisStore::connect("redis://127.0.0.1/").await?);
//! let dynamics = Arc::new(DynamicRegistry::new(store, Duration::from_secs(30)));
//!
//! let client = Arc::new(BidderClient::new()?);
//!
//! // initial refresh failure is fatal; afterwards the loop owns itself
//! let refresher = dynamics.clone();
//! tokio::spawn(async move { refresher.start().await });
//! # Ok(())
//! # }
//! ```

pub mod adapter;
pub mod bidders;
pub mod config;
pub mod ortb;
pub mod registry;
pub mod store;
pub mod transport;

pub use adapter::error::{AdapterError, ErrorCode};
pub use adapter::generic::GenericAdapter;
pub use adapter::{Adapter, BidType, BidderInfo, BidderResponse, RequestData, ResponseData};
pub use config::BidderConfig;
pub use registry::{DynamicRegistry, StaticRegistry};
pub use store::ConfigStore;
pub use transport::BidderClient;
