use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Cache eviction policy
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum CachePolicy {
    /// Least Recently Used
    #[default]
    Lru,
    /// Least Frequently Used, ties broken by recency
    Lfu,
}

/// Errors raised while sizing or selecting a cache.
///
/// These are fatal: a cache that fails to configure must never be handed
/// out, so callers surface them at startup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CacheConfigError {
    #[error("Unknown cache eviction policy: {0} (expected LRU or LFU)")]
    UnknownPolicy(String),

    #[error("Invalid cache capacity: {0} (must be a positive integer)")]
    InvalidCapacity(usize),
}

impl CachePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Lru => "lru",
            Self::Lfu => "lfu",
        }
    }
}

impl fmt::Display for CachePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CachePolicy {
    type Err = CacheConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lru" => Ok(Self::Lru),
            "lfu" => Ok(Self::Lfu),
            _ => Err(CacheConfigError::UnknownPolicy(s.to_string())),
        }
    }
}

impl TryFrom<String> for CachePolicy {
    type Error = CacheConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Reject non-positive capacities
pub fn validate_capacity(capacity: usize) -> Result<usize, CacheConfigError> {
    if capacity == 0 {
        return Err(CacheConfigError::InvalidCapacity(capacity));
    }
    Ok(capacity)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_policy_case_insensitive() {
        assert_eq!("LRU".parse::<CachePolicy>().unwrap(), CachePolicy::Lru);
        assert_eq!("lfu".parse::<CachePolicy>().unwrap(), CachePolicy::Lfu);
        assert_eq!(" Lfu ".parse::<CachePolicy>().unwrap(), CachePolicy::Lfu);
    }

    #[test]
    fn test_parse_unknown_policy() {
        let err = "arc".parse::<CachePolicy>().unwrap_err();
        assert_eq!(err, CacheConfigError::UnknownPolicy("arc".to_string()));
    }

    #[test]
    fn test_policy_yaml_roundtrip() {
        let policy: CachePolicy = serde_yaml::from_str("LFU").unwrap();
        assert_eq!(policy, CachePolicy::Lfu);
        assert_eq!(serde_yaml::to_string(&policy).unwrap().trim(), "lfu");

        assert!(serde_yaml::from_str::<CachePolicy>("fifo").is_err());
    }

    #[test]
    fn test_validate_capacity() {
        assert_eq!(validate_capacity(1), Ok(1));
        assert_eq!(
            validate_capacity(0),
            Err(CacheConfigError::InvalidCapacity(0))
        );
    }
}
