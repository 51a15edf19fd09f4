//! Resolved outcomes.
//!
//! [`Outcome::resolve`] runs every string in a definition's document through
//! the template evaluator, then decodes the concrete values into the shared
//! [`OutcomeBase`] and a type-specific [`OutcomeKind`] payload.

mod effect;
mod sound;

pub use effect::{EffectOutcome, StatusEffect};
pub use sound::{SoundEmission, SoundEvent, SoundOutcome};

use lb_core::{Context, Identifier, Vec3};
use serde_json::{Map, Value};
use tracing::debug;

use crate::definition::{OutcomeDefinition, OutcomeType};
use crate::error::{OutcomeError, OutcomeResult};
use crate::host::Host;
use crate::json;

/// Fields every outcome type shares, after resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct OutcomeBase {
    /// Resolved luck.
    pub luck: i32,
    /// Resolved chance.
    pub chance: f64,
    /// Ticks to wait before executing; 0 runs immediately.
    pub delay: u32,
    /// Where the outcome happens; the context block centre when `None`.
    pub pos: Option<Vec3>,
}

/// Type-specific payload.
#[derive(Debug, Clone, PartialEq)]
pub enum OutcomeKind {
    /// Status effect on the actor.
    Effect(EffectOutcome),
    /// Sound at a position.
    Sound(SoundOutcome),
}

/// A fully resolved outcome, ready to execute.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    /// Identifier of the definition it came from.
    pub id: Identifier,
    /// Shared fields.
    pub base: OutcomeBase,
    /// Type-specific payload.
    pub kind: OutcomeKind,
}

impl Outcome {
    /// Resolve `def` against `ctx`.
    ///
    /// Every string in the document is resolved as its own template, visiting
    /// object fields in key order, so substituted text never changes the
    /// document's structure.
    pub fn resolve(def: &OutcomeDefinition, ctx: &mut Context) -> OutcomeResult<Self> {
        let Value::Object(object) = resolve_value(&def.raw, ctx)? else {
            return Err(OutcomeError::malformed(&def.id, "expected a JSON object"));
        };

        let base = decode_base(&def.id, &object)?;
        let kind = match def.kind {
            OutcomeType::Effect => OutcomeKind::Effect(EffectOutcome::decode(&def.id, &object)?),
            OutcomeType::Sound => OutcomeKind::Sound(SoundOutcome::decode(&def.id, &object)?),
        };
        debug!(id = %def.id, delay = base.delay, "resolved outcome");
        Ok(Self {
            id: def.id.clone(),
            base,
            kind,
        })
    }

    /// The outcome's type.
    pub fn outcome_type(&self) -> OutcomeType {
        match self.kind {
            OutcomeKind::Effect(_) => OutcomeType::Effect,
            OutcomeKind::Sound(_) => OutcomeType::Sound,
        }
    }

    /// Where the outcome happens under `ctx`.
    pub fn position(&self, ctx: &Context) -> Vec3 {
        self.base.pos.unwrap_or_else(|| ctx.center())
    }

    /// Perform the outcome's side effects on `host`.
    pub fn execute(&self, ctx: &mut Context, host: &mut dyn Host) {
        debug!(id = %self.id, kind = %self.outcome_type(), "executing outcome");
        match &self.kind {
            OutcomeKind::Effect(effect) => effect.execute(ctx, host),
            OutcomeKind::Sound(sound) => {
                let pos = self.position(ctx);
                sound.execute(pos, ctx, host);
            }
        }
    }
}

/// Resolve each string leaf. A leaf that resolves to a plain decimal literal
/// becomes a JSON number; object keys are left as written.
fn resolve_value(value: &Value, ctx: &mut Context) -> OutcomeResult<Value> {
    Ok(match value {
        Value::String(raw) => {
            let resolved = lb_template::resolve(raw, ctx)?;
            json::number_literal(&resolved).unwrap_or(Value::String(resolved))
        }
        Value::Array(items) => Value::Array(
            items
                .iter()
                .map(|item| resolve_value(item, ctx))
                .collect::<OutcomeResult<_>>()?,
        ),
        Value::Object(fields) => Value::Object(
            fields
                .iter()
                .map(|(key, item)| Ok((key.clone(), resolve_value(item, ctx)?)))
                .collect::<OutcomeResult<_>>()?,
        ),
        other => other.clone(),
    })
}

fn decode_base(id: &Identifier, object: &Map<String, Value>) -> OutcomeResult<OutcomeBase> {
    let delay = match object.get("delay") {
        None | Some(Value::Null) => 0,
        Some(v) => json::as_u32(v)
            .ok_or_else(|| OutcomeError::malformed(id, "'delay' must be a non-negative integer"))?,
    };
    let pos = match object.get("pos") {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(
            Vec3::parse(s).map_err(|e| OutcomeError::malformed(id, format!("'pos': {e}")))?,
        ),
        Some(Value::Array(items)) => {
            let coords: Option<Vec<f64>> = items.iter().map(json::as_f64).collect();
            match coords.as_deref() {
                Some(&[x, y, z]) => Some(Vec3::new(x, y, z)),
                _ => return Err(OutcomeError::malformed(id, "'pos' must have three numbers")),
            }
        }
        Some(_) => return Err(OutcomeError::malformed(id, "invalid 'pos'")),
    };
    Ok(OutcomeBase {
        luck: object
            .get("luck")
            .and_then(json::as_i32)
            .unwrap_or(OutcomeDefinition::DEFAULT_LUCK),
        chance: object
            .get("chance")
            .and_then(json::as_f64)
            .unwrap_or(OutcomeDefinition::DEFAULT_CHANCE),
        delay,
        pos,
    })
}
