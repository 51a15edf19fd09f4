//! Configuration for the registry and engine.

/// Configuration for how documents are partitioned at load time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryConfig {
    /// Identifier path prefix that routes a definition to the nonrandom partition.
    pub reserved_prefix: String,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            reserved_prefix: "nonrandom/".to_string(),
        }
    }
}

impl RegistryConfig {
    /// Set the path prefix reserved for identifier-only outcomes.
    pub fn with_reserved_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.reserved_prefix = prefix.into();
        self
    }
}

/// Configuration for an [`crate::OutcomeEngine`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Seed for the engine's selection RNG.
    pub seed: u64,
    /// Registry partitioning rules.
    pub registry: RegistryConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            registry: RegistryConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Set the selection RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the registry configuration.
    pub fn with_registry(mut self, registry: RegistryConfig) -> Self {
        self.registry = registry;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let cfg = EngineConfig::default();
        assert_eq!(cfg.seed, 42);
        assert_eq!(cfg.registry.reserved_prefix, "nonrandom/");
    }

    #[test]
    fn builder_chain() {
        let cfg = EngineConfig::default()
            .with_seed(7)
            .with_registry(RegistryConfig::default().with_reserved_prefix("fixed/"));
        assert_eq!(cfg.seed, 7);
        assert_eq!(cfg.registry.reserved_prefix, "fixed/");
    }
}
