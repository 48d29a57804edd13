//! Callwatch configuration.

use crate::constants::DEFAULT_LOOKUP_TIMEOUT;
use alloy::primitives::ChainId;
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, time::Duration};
use url::Url;

/// Configuration for the confirmation tracker.
///
/// Chain-specific parameters are supplied externally; the tracker does not
/// discover them itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackerConfig {
    /// Timeout applied to each individual receipt lookup.
    ///
    /// A timed-out lookup mutates nothing; the transaction stays eligible on
    /// the next qualifying block.
    #[serde(with = "crate::serde::duration")]
    pub lookup_timeout: Duration,
    /// Block explorer base URL per chain, used for notification links.
    #[serde(with = "crate::serde::hash_map")]
    pub explorer_urls: HashMap<ChainId, Url>,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self { lookup_timeout: DEFAULT_LOOKUP_TIMEOUT, explorer_urls: HashMap::default() }
    }
}

impl TrackerConfig {
    /// Sets the per-lookup timeout.
    pub fn with_lookup_timeout(mut self, timeout: Duration) -> Self {
        self.lookup_timeout = timeout;
        self
    }

    /// Registers a block explorer for a chain.
    pub fn with_explorer(mut self, chain_id: ChainId, url: Url) -> Self {
        self.explorer_urls.insert(chain_id, url);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrips_through_serde() {
        let config = TrackerConfig::default()
            .with_lookup_timeout(Duration::from_secs(3))
            .with_explorer(56, "https://bscscan.com/".parse().unwrap());

        let json = serde_json::to_string(&config).unwrap();
        let decoded: TrackerConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(decoded.lookup_timeout, Duration::from_secs(3));
        assert_eq!(decoded.explorer_urls[&56].as_str(), "https://bscscan.com/");
    }
}
