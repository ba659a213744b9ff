//! Cache Statistics Module
//!
//! On-demand snapshot of what the store currently holds, grouped by key prefix.

use std::collections::BTreeMap;

use serde::Serialize;

// == Cache Stats Snapshot ==
/// Derived view of the store's keys; never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStatsSnapshot {
    /// False when no store is configured
    pub enabled: bool,
    /// Number of live keys
    pub total_keys: usize,
    /// Live key count per leading `prefix:` segment
    pub keys_by_prefix: BTreeMap<String, usize>,
}

impl CacheStatsSnapshot {
    // == Disabled ==
    /// Snapshot reported when the cache runs in passthrough mode.
    pub fn disabled() -> Self {
        Self::default()
    }

    // == From Keys ==
    /// Builds a snapshot by grouping keys on their first `:`.
    ///
    /// A key without a delimiter is counted under its full text.
    pub fn from_keys<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut keys_by_prefix = BTreeMap::new();
        let mut total_keys = 0;

        for key in keys {
            *keys_by_prefix
                .entry(key_prefix(key.as_ref()).to_string())
                .or_insert(0) += 1;
            total_keys += 1;
        }

        Self {
            enabled: true,
            total_keys,
            keys_by_prefix,
        }
    }

    // == Prefix Count ==
    /// Number of keys under `prefix`, zero if none.
    pub fn count_for(&self, prefix: &str) -> usize {
        self.keys_by_prefix.get(prefix).copied().unwrap_or(0)
    }
}

/// Leading segment of a key up to the first `:`.
pub fn key_prefix(key: &str) -> &str {
    key.split_once(':').map_or(key, |(prefix, _)| prefix)
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_snapshot() {
        let stats = CacheStatsSnapshot::disabled();
        assert!(!stats.enabled);
        assert_eq!(stats.total_keys, 0);
        assert!(stats.keys_by_prefix.is_empty());
    }

    #[test]
    fn test_groups_by_first_segment() {
        let stats =
            CacheStatsSnapshot::from_keys(["fixtures:today", "fixtures:tomorrow", "stats:x"]);

        assert!(stats.enabled);
        assert_eq!(stats.total_keys, 3);
        assert_eq!(stats.count_for("fixtures"), 2);
        assert_eq!(stats.count_for("stats"), 1);
        assert_eq!(stats.count_for("team"), 0);
    }

    #[test]
    fn test_only_first_delimiter_counts() {
        let stats = CacheStatsSnapshot::from_keys(["team:7:squad", "team:7", "plain"]);

        assert_eq!(stats.count_for("team"), 2);
        assert_eq!(stats.count_for("plain"), 1);
        assert_eq!(stats.keys_by_prefix.len(), 2);
    }

    #[test]
    fn test_empty_store_is_enabled_with_zero_keys() {
        let stats = CacheStatsSnapshot::from_keys(Vec::<String>::new());
        assert!(stats.enabled);
        assert_eq!(stats.total_keys, 0);
    }

    #[test]
    fn test_serializes_camel_case() {
        let stats = CacheStatsSnapshot::from_keys(["moments:9"]);
        let json = serde_json::to_value(&stats).unwrap();

        assert_eq!(json["enabled"], true);
        assert_eq!(json["totalKeys"], 1);
        assert_eq!(json["keysByPrefix"]["moments"], 1);
    }

    #[test]
    fn test_key_prefix() {
        assert_eq!(key_prefix("match:42"), "match");
        assert_eq!(key_prefix(":leading"), "");
        assert_eq!(key_prefix("bare"), "bare");
    }
}
