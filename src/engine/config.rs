//! Engine configuration.

use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;

/// Tunables for an engine instance.
///
/// Deserializable so embedding applications can keep it alongside their own
/// settings.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Maximum number of dispatch records retained. `None` keeps them all.
    pub history_capacity: Option<NonZeroUsize>,
}

impl EngineConfig {
    /// Bound the history to the most recent `capacity` records.
    pub fn with_history_capacity(mut self, capacity: NonZeroUsize) -> Self {
        self.history_capacity = Some(capacity);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_history_is_unbounded() {
        assert_eq!(EngineConfig::default().history_capacity, None);
    }

    #[test]
    fn missing_fields_use_defaults() {
        let config: EngineConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, EngineConfig::default());

        let config: EngineConfig = serde_json::from_str(r#"{"history_capacity": 32}"#).unwrap();
        let capacity = NonZeroUsize::new(32).unwrap();
        assert_eq!(config, EngineConfig::default().with_history_capacity(capacity));
    }

    #[test]
    fn zero_history_capacity_fails_to_load() {
        let result = serde_json::from_str::<EngineConfig>(r#"{"history_capacity": 0}"#);
        assert!(result.is_err());
    }
}
