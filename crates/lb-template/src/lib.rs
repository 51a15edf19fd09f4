//! Template evaluator for Luckbox outcome definitions.
//!
//! Definitions are authored as JSON whose string values may contain
//! `{param}` placeholders, inline arithmetic (`{blockPosY}+3`) and a handful
//! of random functions (`randomBetween(1,5)`). [`resolve`] turns such a raw
//! string into a concrete one using values drawn from a [`lb_core::Context`].
//!
//! Resolution runs in a fixed order:
//!
//! 1. function calls are evaluated innermost first, each argument resolved
//!    through steps 2-4 beforehand;
//! 2. `{name}` placeholders are replaced from the string, real and integer
//!    parameter tables, in that precedence;
//! 3. quotes around bare numeric literals are dropped;
//! 4. flat arithmetic chains are evaluated with standard precedence and
//!    replaced by their decimal result.

/// Error types for template resolution.
pub mod error;
/// Arithmetic lexer, parser and evaluator.
pub mod expr;
/// Named template functions (`random`, `randomBetween`, `randomVelocity`).
pub mod functions;
/// Context-derived parameter tables.
pub mod params;
/// The resolution pipeline.
pub mod template;

/// Re-export error types.
pub use error::{TemplateError, TemplateResult};
/// Re-export the arithmetic evaluator.
pub use expr::evaluate;
/// Re-export the resolution entry point.
pub use template::resolve;
