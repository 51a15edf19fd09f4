use lb_core::{Context, Identifier};
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{OutcomeError, OutcomeResult};
use crate::host::Host;
use crate::json;

/// A status effect instance as the host should apply it.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusEffect {
    /// Effect registry id.
    pub id: Identifier,
    /// Duration in ticks.
    pub duration: i32,
    /// Level minus one.
    pub amplifier: i32,
    /// Whether the effect counts as ambient (beacon-like).
    pub ambient: bool,
    /// Whether particles are shown.
    pub show_particles: bool,
    /// Whether the HUD icon is shown.
    pub show_icon: bool,
}

impl StatusEffect {
    /// Duration used when none is given.
    pub const DEFAULT_DURATION: i32 = 1;

    /// An effect with default duration and flags.
    pub fn new(id: Identifier) -> Self {
        Self {
            id,
            duration: Self::DEFAULT_DURATION,
            amplifier: 0,
            ambient: false,
            show_particles: true,
            show_icon: true,
        }
    }

    pub(crate) fn decode(outcome: &Identifier, object: &Map<String, Value>) -> OutcomeResult<Self> {
        let id = match object.get("id") {
            Some(Value::String(s)) => Identifier::parse(s)
                .map_err(|e| OutcomeError::malformed(outcome, format!("status effect id: {e}")))?,
            _ => return Err(OutcomeError::malformed(outcome, "status effect needs a string 'id'")),
        };
        let int = |key: &str, default: i32| -> OutcomeResult<i32> {
            match object.get(key) {
                None => Ok(default),
                Some(v) => json::as_i32(v).ok_or_else(|| {
                    OutcomeError::malformed(outcome, format!("status effect '{key}' must be an integer"))
                }),
            }
        };
        let flag = |key: &str, default: bool| -> OutcomeResult<bool> {
            match object.get(key) {
                None => Ok(default),
                Some(v) => json::as_bool(v).ok_or_else(|| {
                    OutcomeError::malformed(outcome, format!("status effect '{key}' must be a boolean"))
                }),
            }
        };
        Ok(Self {
            id,
            duration: int("duration", Self::DEFAULT_DURATION)?,
            amplifier: int("amplifier", 0)?,
            ambient: flag("ambient", false)?,
            show_particles: flag("show_particles", true)?,
            show_icon: flag("show_icon", true)?,
        })
    }
}

/// Applies a status effect to the acting entity.
#[derive(Debug, Clone, PartialEq)]
pub struct EffectOutcome {
    /// The effect to apply.
    pub status_effect: StatusEffect,
}

impl EffectOutcome {
    pub(crate) fn decode(id: &Identifier, object: &Map<String, Value>) -> OutcomeResult<Self> {
        match object.get("status_effect") {
            Some(Value::Object(effect)) => Ok(Self {
                status_effect: StatusEffect::decode(id, effect)?,
            }),
            _ => Err(OutcomeError::malformed(id, "missing 'status_effect'")),
        }
    }

    pub(crate) fn execute(&self, ctx: &Context, host: &mut dyn Host) {
        match &ctx.actor {
            Some(actor) => host.apply_status_effect(actor, &self.status_effect),
            None => debug!(effect = %self.status_effect.id, "no actor to receive effect"),
        }
    }
}
