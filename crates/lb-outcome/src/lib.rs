//! Outcome registry, luck-weighted selection, and tick-based delay scheduling.
//!
//! A content pack defines named outcomes as JSON documents. The
//! [`OutcomeRegistry`] splits them into a random partition (eligible for
//! luck-weighted draws) and a nonrandom partition (reachable by identifier
//! only). A drawn or looked-up [`OutcomeDefinition`] is resolved against a
//! [`lb_core::Context`] into a concrete [`Outcome`], which is either executed
//! on the [`Host`] right away or handed to the [`DelayScheduler`].
//!
//! [`OutcomeEngine`] bundles all of this behind the API a host calls.

/// Configuration types for the registry and engine.
pub mod config;
/// Raw outcome definitions and their load-time decoding.
pub mod definition;
/// The engine facade used by hosts.
pub mod engine;
/// Error types for the outcome crate.
pub mod error;
/// The interface through which outcomes act on the host.
pub mod host;
mod json;
/// Resolved outcomes and their execution.
pub mod outcome;
/// The partitioned outcome registry.
pub mod registry;
/// Tick-based delay scheduling.
pub mod scheduler;
/// Luck-biased weighted selection.
pub mod selector;

/// Re-exports of [`config::EngineConfig`] and [`config::RegistryConfig`].
pub use config::{EngineConfig, RegistryConfig};
/// Re-exports of [`definition::OutcomeDefinition`] and [`definition::OutcomeType`].
pub use definition::{OutcomeDefinition, OutcomeType};
/// Re-exports of [`engine::OutcomeEngine`] and [`engine::Triggered`].
pub use engine::{OutcomeEngine, Triggered};
/// Re-exports of [`error::OutcomeError`], [`error::OutcomeResult`] and [`error::Partition`].
pub use error::{OutcomeError, OutcomeResult, Partition};
/// Re-exports of the host interface and the recording host.
pub use host::{Host, HostEvent, RecordingHost};
/// Re-exports of the resolved outcome types.
pub use outcome::{
    EffectOutcome, Outcome, OutcomeBase, OutcomeKind, SoundEmission, SoundEvent, SoundOutcome,
    StatusEffect,
};
/// Re-exports of the registry types.
pub use registry::{LoadReport, OutcomeRegistry, RegistrySnapshot, SkippedDefinition};
/// Re-exports of the scheduler types.
pub use scheduler::{DelayScheduler, PendingInvocation, Ticket};
/// Re-export of [`selector::WeightLadder`].
pub use selector::WeightLadder;
