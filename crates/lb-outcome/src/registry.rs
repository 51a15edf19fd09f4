//! The partitioned outcome registry.
//!
//! Definitions live in an immutable [`RegistrySnapshot`] behind an [`Arc`].
//! Reloading builds a fresh snapshot and swaps the reference; nothing mutates
//! a snapshot once it is installed.

use std::collections::BTreeMap;
use std::sync::Arc;

use lb_core::Identifier;
use rand::Rng;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::config::RegistryConfig;
use crate::definition::OutcomeDefinition;
use crate::error::{OutcomeError, OutcomeResult, Partition};
use crate::selector::WeightLadder;

/// A definition that failed to decode and was left out of the registry.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedDefinition {
    /// Identifier of the rejected document.
    pub id: Identifier,
    /// Why it was rejected.
    pub error: OutcomeError,
}

/// Summary of a load.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadReport {
    /// Definitions in the random partition.
    pub random: usize,
    /// Definitions in the nonrandom partition.
    pub nonrandom: usize,
    /// Documents that failed to decode.
    pub skipped: Vec<SkippedDefinition>,
}

/// One immutable generation of loaded definitions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegistrySnapshot {
    random: BTreeMap<Identifier, Arc<OutcomeDefinition>>,
    nonrandom: BTreeMap<Identifier, Arc<OutcomeDefinition>>,
}

impl RegistrySnapshot {
    /// Decode documents into a snapshot.
    ///
    /// Identifiers whose path starts with the configured reserved prefix go to
    /// the nonrandom partition. Documents that fail to decode are logged and
    /// reported, and the rest still load. A repeated identifier replaces the
    /// earlier document.
    pub fn decode<I>(documents: I, config: &RegistryConfig) -> (Self, LoadReport)
    where
        I: IntoIterator<Item = (Identifier, Value)>,
    {
        let mut snapshot = Self::default();
        let mut skipped = Vec::new();

        for (id, raw) in documents {
            match OutcomeDefinition::decode(id.clone(), raw) {
                Ok(def) => {
                    let partition = if id.path().starts_with(&config.reserved_prefix) {
                        Partition::Nonrandom
                    } else {
                        Partition::Random
                    };
                    info!(id = %id, kind = %def.kind, %partition, "loaded outcome");
                    let target = match partition {
                        Partition::Random => &mut snapshot.random,
                        Partition::Nonrandom => &mut snapshot.nonrandom,
                    };
                    target.insert(id, Arc::new(def));
                }
                Err(error) => {
                    warn!(id = %id, %error, "skipping outcome");
                    skipped.push(SkippedDefinition { id, error });
                }
            }
        }

        let report = LoadReport {
            random: snapshot.random.len(),
            nonrandom: snapshot.nonrandom.len(),
            skipped,
        };
        (snapshot, report)
    }

    /// Definitions eligible for random draws, in encounter order.
    pub fn random(&self) -> impl Iterator<Item = &Arc<OutcomeDefinition>> {
        self.random.values()
    }

    /// Definitions reachable only by identifier.
    pub fn nonrandom(&self) -> impl Iterator<Item = &Arc<OutcomeDefinition>> {
        self.nonrandom.values()
    }

    /// Find a definition, checking the nonrandom partition first.
    pub fn get(&self, id: &Identifier) -> Option<&Arc<OutcomeDefinition>> {
        self.nonrandom.get(id).or_else(|| self.random.get(id))
    }

    /// Total definitions across both partitions.
    pub fn total(&self) -> usize {
        self.random.len() + self.nonrandom.len()
    }
}

/// Holds the active snapshot and answers lookup and selection queries.
#[derive(Debug, Clone, Default)]
pub struct OutcomeRegistry {
    snapshot: Arc<RegistrySnapshot>,
    config: RegistryConfig,
}

impl OutcomeRegistry {
    /// Create an empty registry.
    pub fn new(config: RegistryConfig) -> Self {
        Self {
            snapshot: Arc::default(),
            config,
        }
    }

    /// The partitioning rules in use.
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Replace both partitions with freshly decoded documents.
    pub fn load_definitions<I>(&mut self, documents: I) -> LoadReport
    where
        I: IntoIterator<Item = (Identifier, Value)>,
    {
        let (snapshot, report) = RegistrySnapshot::decode(documents, &self.config);
        self.install(snapshot);
        info!(
            random = report.random,
            nonrandom = report.nonrandom,
            skipped = report.skipped.len(),
            "outcome registry reloaded"
        );
        report
    }

    /// Swap in a snapshot built elsewhere.
    pub fn install(&mut self, snapshot: impl Into<Arc<RegistrySnapshot>>) {
        self.snapshot = snapshot.into();
    }

    /// The active snapshot. Holders keep seeing it across later reloads.
    pub fn snapshot(&self) -> Arc<RegistrySnapshot> {
        Arc::clone(&self.snapshot)
    }

    /// Draw a definition from the random partition, biased by `bias`.
    pub fn select_random(
        &self,
        rng: &mut impl Rng,
        bias: i32,
    ) -> OutcomeResult<Arc<OutcomeDefinition>> {
        if self.snapshot.random.is_empty() {
            return Err(OutcomeError::RegistryEmpty(Some(Partition::Random)));
        }
        self.select_with_draw(bias, rng.random::<f64>())
    }

    /// Select with an explicit uniform draw in `[0, 1)`.
    pub fn select_with_draw(&self, bias: i32, draw: f64) -> OutcomeResult<Arc<OutcomeDefinition>> {
        let snapshot = &self.snapshot;
        let ladder = WeightLadder::for_definitions(snapshot.random().map(Arc::as_ref), bias);
        let index = ladder
            .pick(draw)
            .ok_or(OutcomeError::RegistryEmpty(Some(Partition::Random)))?;
        let def = snapshot
            .random()
            .nth(index)
            .ok_or(OutcomeError::RegistryEmpty(Some(Partition::Random)))?;
        debug!(id = %def.id, bias, draw, total = ladder.total(), "selected outcome");
        Ok(Arc::clone(def))
    }

    /// Find a definition by identifier, nonrandom partition first.
    pub fn lookup(&self, id: &Identifier) -> OutcomeResult<Arc<OutcomeDefinition>> {
        let snapshot = &self.snapshot;
        if snapshot.total() == 0 {
            return Err(OutcomeError::RegistryEmpty(None));
        }
        snapshot
            .get(id)
            .cloned()
            .ok_or_else(|| OutcomeError::UnknownIdentifier(id.clone()))
    }

    /// Identifiers eligible for random draws, in encounter order.
    pub fn random_ids(&self) -> Vec<Identifier> {
        self.snapshot.random.keys().cloned().collect()
    }

    /// Identifiers reachable only by lookup.
    pub fn nonrandom_ids(&self) -> Vec<Identifier> {
        self.snapshot.nonrandom.keys().cloned().collect()
    }

    /// Number of definitions in the random partition.
    pub fn len(&self) -> usize {
        self.snapshot.random.len()
    }

    /// Whether the random partition is empty.
    pub fn is_empty(&self) -> bool {
        self.snapshot.random.is_empty()
    }

    /// Each random definition's share of the total weight under `bias`.
    pub fn selection_weights(&self, bias: i32) -> Vec<(Identifier, f64)> {
        let snapshot = &self.snapshot;
        let ladder = WeightLadder::for_definitions(snapshot.random().map(Arc::as_ref), bias);
        snapshot
            .random
            .keys()
            .cloned()
            .zip(ladder.shares())
            .collect()
    }
}
