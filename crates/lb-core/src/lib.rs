//! Core types for Luckbox: identifiers, positions, actors, and the execution context.
//!
//! Everything an outcome needs to know about the host at resolution or
//! execution time is carried by a [`Context`]. The host builds one per
//! triggering action; this crate never constructs one on its own.

/// The per-invocation runtime context and the acting entity snapshot.
pub mod context;
/// Error types used throughout the crate.
pub mod error;
/// Namespaced identifiers (`namespace:path`).
pub mod identifier;
/// Block and continuous positions.
pub mod position;

/// Re-export context types.
pub use context::{Actor, Context};
/// Re-export error types.
pub use error::{CoreError, CoreResult};
/// Re-export identifier type.
pub use identifier::Identifier;
/// Re-export position types.
pub use position::{BlockPos, Vec3};
