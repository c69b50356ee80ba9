//! Engine configuration
//!
//! Caller-configurable limits. The terrain scan limit exists because a
//! very large region is the only latency-sensitive path in the engine;
//! requests above the limit are rejected outright, never truncated.

use serde::{Deserialize, Serialize};

/// Limits applied by the placement driver.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Maximum region volume (in cells) a terrain query may scan.
    pub max_scan_volume: u64,
    /// Maximum per-axis extent of a structure bounding box.
    pub max_structure_extent: i32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            // 256 x 256 x 256
            max_scan_volume: 16_777_216,
            max_structure_extent: 256,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: EngineConfig = serde_json::from_str(r#"{"max_scan_volume": 1000}"#).unwrap();
        assert_eq!(config.max_scan_volume, 1000);
        assert_eq!(config.max_structure_extent, EngineConfig::default().max_structure_extent);
    }

    #[test]
    fn test_roundtrip() {
        let config = EngineConfig { max_scan_volume: 42, max_structure_extent: 7 };
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(serde_json::from_str::<EngineConfig>(&json).unwrap(), config);
    }
}
