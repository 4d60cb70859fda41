//! Compiled-in adapter variants.
//!
//! Each variant declares its code, endpoint and capabilities and knows
//! how to register itself. [`register_all`] is the single assembly
//! point the hosting process calls before serving traffic; a failure
//! here means a duplicate code slipped in at build time and the process
//! should not start.

pub mod admesh;
pub mod adpulse;
pub mod bidcore;
pub mod bidstorm;
pub mod mediafuse;
pub mod northbeam;
pub mod pixelwave;
pub mod quantumads;
pub mod rtbnova;
pub mod skyreach;
pub mod trafficlane;
pub mod velocityx;

use crate::registry::{RegistryError, StaticRegistry};

pub fn register_all(registry: &StaticRegistry) -> Result<(), RegistryError> {
    admesh::register(registry)?;
    adpulse::register(registry)?;
    bidcore::register(registry)?;
    bidstorm::register(registry)?;
    mediafuse::register(registry)?;
    northbeam::register(registry)?;
    pixelwave::register(registry)?;
    quantumads::register(registry)?;
    rtbnova::register(registry)?;
    skyreach::register(registry)?;
    trafficlane::register(registry)?;
    velocityx::register(registry)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_all_is_conflict_free() {
        let registry = StaticRegistry::new();
        register_all(&registry).unwrap();
        assert_eq!(registry.len(), 12);
    }

    #[test]
    fn test_double_bootstrap_fails() {
        let registry = StaticRegistry::new();
        register_all(&registry).unwrap();
        assert!(register_all(&registry).is_err());
    }

    #[test]
    fn test_every_variant_exports_an_endpoint() {
        let registry = StaticRegistry::new();
        register_all(&registry).unwrap();

        for code in registry.codes() {
            let entry = registry.lookup(&code).unwrap();
            assert!(
                entry.info.endpoint.starts_with("https://"),
                "{code} must declare an https endpoint"
            );
            assert!(entry.info.site.is_some() || entry.info.app.is_some());
        }
    }
}
