use lb_core::{Context, Identifier, Vec3};
use rand::Rng;
use serde_json::{Map, Value};

use crate::error::{OutcomeError, OutcomeResult};
use crate::host::Host;
use crate::json;

/// A sound event reference, optionally with a fixed audible range.
#[derive(Debug, Clone, PartialEq)]
pub struct SoundEvent {
    /// Sound registry id.
    pub id: Identifier,
    /// Fixed audible range in blocks; volume-derived when absent.
    pub range: Option<f64>,
}

impl SoundEvent {
    /// Base audible distance of a sound at volume 1.
    pub const BASE_RANGE: f64 = 16.0;

    /// How far this sound carries at `volume`.
    pub fn audible_range(&self, volume: f64) -> f64 {
        self.range
            .unwrap_or_else(|| Self::BASE_RANGE * volume.max(1.0))
    }

    fn decode(outcome: &Identifier, value: &Value) -> OutcomeResult<Self> {
        let parse_id = |s: &str| {
            Identifier::parse(s)
                .map_err(|e| OutcomeError::malformed(outcome, format!("sound id: {e}")))
        };
        match value {
            Value::String(s) => Ok(Self {
                id: parse_id(s)?,
                range: None,
            }),
            Value::Object(event) => {
                let Some(Value::String(s)) = event.get("sound_id") else {
                    return Err(OutcomeError::malformed(outcome, "sound event needs a string 'sound_id'"));
                };
                let range = match event.get("range") {
                    None | Some(Value::Null) => None,
                    Some(v) => Some(json::as_f64(v).ok_or_else(|| {
                        OutcomeError::malformed(outcome, "sound event 'range' must be a number")
                    })?),
                };
                Ok(Self {
                    id: parse_id(s)?,
                    range,
                })
            }
            _ => Err(OutcomeError::malformed(outcome, "invalid 'sound_event'")),
        }
    }
}

/// Plays a sound at the outcome position.
#[derive(Debug, Clone, PartialEq)]
pub struct SoundOutcome {
    /// What to play.
    pub sound_event: SoundEvent,
    /// Volume; 1.0 when not given.
    pub volume: f64,
    /// Pitch; 1.0 when not given.
    pub pitch: f64,
}

/// A concrete sound request handed to the host.
#[derive(Debug, Clone, PartialEq)]
pub struct SoundEmission {
    /// Sound registry id.
    pub sound: Identifier,
    /// Where it plays.
    pub pos: Vec3,
    /// Volume.
    pub volume: f64,
    /// Pitch.
    pub pitch: f64,
    /// Listeners farther than this many blocks do not hear it.
    pub range: f64,
    /// Per-emission seed for client-side variation.
    pub seed: i64,
}

impl SoundEmission {
    /// Whether a listener at `listener` is within range.
    pub fn audible_at(&self, listener: Vec3) -> bool {
        self.pos.squared_distance_to(listener) <= self.range * self.range
    }
}

impl SoundOutcome {
    pub(crate) fn decode(id: &Identifier, object: &Map<String, Value>) -> OutcomeResult<Self> {
        let sound_event = match object.get("sound_event") {
            Some(value) => SoundEvent::decode(id, value)?,
            None => return Err(OutcomeError::malformed(id, "missing 'sound_event'")),
        };
        let real = |key: &str| -> OutcomeResult<f64> {
            match object.get(key) {
                None => Ok(1.0),
                Some(v) => json::as_f64(v)
                    .ok_or_else(|| OutcomeError::malformed(id, format!("'{key}' must be a number"))),
            }
        };
        Ok(Self {
            sound_event,
            volume: real("volume")?,
            pitch: real("pitch")?,
        })
    }

    pub(crate) fn execute(&self, pos: Vec3, ctx: &mut Context, host: &mut dyn Host) {
        let emission = SoundEmission {
            sound: self.sound_event.id.clone(),
            pos,
            volume: self.volume,
            pitch: self.pitch,
            range: self.sound_event.audible_range(self.volume),
            seed: ctx.rng.random(),
        };
        host.play_sound(&emission);
    }
}
