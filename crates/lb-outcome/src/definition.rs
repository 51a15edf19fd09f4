//! Raw outcome definitions.
//!
//! A definition keeps its document verbatim for later template resolution and
//! pre-decodes only what selection and partitioning need: the type tag and
//! the numeric `luck`, `chance` and `delay` fields.

use std::fmt;

use lb_core::Identifier;
use serde_json::{Map, Value};

use crate::error::{OutcomeError, OutcomeResult};
use crate::json;

/// The outcome types this engine knows how to execute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutcomeType {
    /// Applies a status effect to the acting entity.
    Effect,
    /// Plays a sound at a position.
    Sound,
}

impl OutcomeType {
    /// Parse a `type` tag. Namespaced tags (`luckbox:sound`) are accepted.
    pub fn parse(tag: &str) -> Option<Self> {
        let name = tag.rsplit_once(':').map_or(tag, |(_, name)| name);
        match name {
            "effect" => Some(Self::Effect),
            "sound" => Some(Self::Sound),
            _ => None,
        }
    }

    /// The canonical tag for this type.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Effect => "effect",
            Self::Sound => "sound",
        }
    }
}

impl fmt::Display for OutcomeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An unresolved outcome definition as loaded from a content pack.
///
/// Numeric fields that are missing or unparseable (including ones written as
/// templates) decode to `None`; selection then uses the documented defaults
/// via [`OutcomeDefinition::luck`] and [`OutcomeDefinition::chance`].
#[derive(Debug, Clone, PartialEq)]
pub struct OutcomeDefinition {
    /// Unique identifier.
    pub id: Identifier,
    /// Raw luck, if present and numeric.
    pub luck: Option<i32>,
    /// Raw chance, if present and numeric.
    pub chance: Option<f64>,
    /// Raw delay in ticks, if present and a non-negative integer.
    pub delay: Option<u32>,
    /// Raw position expression, if any.
    pub pos: Option<String>,
    /// The outcome type.
    pub kind: OutcomeType,
    /// The full document, templates unresolved.
    pub raw: Value,
}

impl OutcomeDefinition {
    /// Luck used when a definition has none: 0.
    pub const DEFAULT_LUCK: i32 = 0;
    /// Chance used when a definition has none: 1.0.
    pub const DEFAULT_CHANCE: f64 = 1.0;

    /// Decode a document, checking that the payload its type requires is present.
    pub fn decode(id: Identifier, raw: Value) -> OutcomeResult<Self> {
        let Value::Object(object) = &raw else {
            return Err(OutcomeError::malformed(&id, "expected a JSON object"));
        };

        let kind = match object.get("type") {
            Some(Value::String(tag)) => OutcomeType::parse(tag)
                .ok_or_else(|| OutcomeError::malformed(&id, format!("unknown type '{tag}'")))?,
            Some(_) => return Err(OutcomeError::malformed(&id, "'type' must be a string")),
            None => return Err(OutcomeError::malformed(&id, "missing 'type'")),
        };
        check_payload(&id, kind, object)?;

        let pos = match object.get("pos") {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s.clone()),
            Some(Value::Array(items)) if items.len() == 3 => Some(
                items
                    .iter()
                    .map(|v| match v {
                        Value::String(s) => s.clone(),
                        other => other.to_string(),
                    })
                    .collect::<Vec<_>>()
                    .join(","),
            ),
            Some(_) => {
                return Err(OutcomeError::malformed(
                    &id,
                    "'pos' must be an \"x,y,z\" string or a 3-element array",
                ));
            }
        };

        Ok(Self {
            luck: object.get("luck").and_then(json::as_i32),
            chance: object.get("chance").and_then(json::as_f64),
            delay: object.get("delay").and_then(json::as_u32),
            pos,
            kind,
            id,
            raw,
        })
    }

    /// Luck, or [`Self::DEFAULT_LUCK`].
    pub fn luck(&self) -> i32 {
        self.luck.unwrap_or(Self::DEFAULT_LUCK)
    }

    /// Chance, or [`Self::DEFAULT_CHANCE`]. May be zero or negative; the
    /// selector treats such values as 1.0.
    pub fn chance(&self) -> f64 {
        self.chance.unwrap_or(Self::DEFAULT_CHANCE)
    }
}

fn check_payload(id: &Identifier, kind: OutcomeType, object: &Map<String, Value>) -> OutcomeResult<()> {
    match kind {
        OutcomeType::Effect => match object.get("status_effect") {
            Some(Value::Object(effect)) if effect.contains_key("id") => Ok(()),
            Some(Value::Object(_)) => Err(OutcomeError::malformed(id, "'status_effect' is missing 'id'")),
            Some(_) => Err(OutcomeError::malformed(id, "'status_effect' must be an object")),
            None => Err(OutcomeError::malformed(id, "missing 'status_effect'")),
        },
        OutcomeType::Sound => match object.get("sound_event") {
            Some(Value::String(_)) => Ok(()),
            Some(Value::Object(event)) if event.contains_key("sound_id") => Ok(()),
            Some(_) => Err(OutcomeError::malformed(
                id,
                "'sound_event' must be an id or an object with 'sound_id'",
            )),
            None => Err(OutcomeError::malformed(id, "missing 'sound_event'")),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn id(s: &str) -> Identifier {
        Identifier::parse(s).unwrap()
    }

    #[test]
    fn parse_type_tags() {
        assert_eq!(OutcomeType::parse("sound"), Some(OutcomeType::Sound));
        assert_eq!(OutcomeType::parse("luckbox:effect"), Some(OutcomeType::Effect));
        assert_eq!(OutcomeType::parse("explosion"), None);
    }

    #[test]
    fn decode_full_definition() {
        let def = OutcomeDefinition::decode(
            id("luckbox:thunder"),
            json!({
                "type": "sound",
                "luck": -2,
                "chance": 0.5,
                "delay": 20,
                "pos": "{blockX},{blockY}+3,{blockZ}",
                "sound_event": "minecraft:entity.lightning_bolt.thunder"
            }),
        )
        .unwrap();
        assert_eq!(def.kind, OutcomeType::Sound);
        assert_eq!(def.luck, Some(-2));
        assert_eq!(def.chance, Some(0.5));
        assert_eq!(def.delay, Some(20));
        assert_eq!(def.pos.as_deref(), Some("{blockX},{blockY}+3,{blockZ}"));
    }

    #[test]
    fn defaults_when_fields_missing_or_bad() {
        let def = OutcomeDefinition::decode(
            id("luckbox:quiet"),
            json!({
                "type": "sound",
                "luck": "lots",
                "delay": "randomBetween(1,5)",
                "sound_event": "minecraft:block.note_block.bell"
            }),
        )
        .unwrap();
        assert_eq!(def.luck, None);
        assert_eq!(def.luck(), 0);
        assert_eq!(def.chance(), 1.0);
        assert_eq!(def.delay, None);
        assert_eq!(def.pos, None);
    }

    #[test]
    fn numeric_strings_are_accepted() {
        let def = OutcomeDefinition::decode(
            id("luckbox:lucky"),
            json!({"type": "sound", "luck": "3", "chance": "2.5", "sound_event": "a"}),
        )
        .unwrap();
        assert_eq!(def.luck(), 3);
        assert_eq!(def.chance(), 2.5);
    }

    #[test]
    fn array_position() {
        let def = OutcomeDefinition::decode(
            id("luckbox:here"),
            json!({"type": "sound", "pos": [1, "{blockY}", 3.5], "sound_event": "a"}),
        )
        .unwrap();
        assert_eq!(def.pos.as_deref(), Some("1,{blockY},3.5"));
    }

    #[test]
    fn rejects_malformed() {
        let cases = [
            json!([1, 2, 3]),
            json!({"luck": 1}),
            json!({"type": 5}),
            json!({"type": "explosion"}),
            json!({"type": "effect"}),
            json!({"type": "effect", "status_effect": "speed"}),
            json!({"type": "effect", "status_effect": {"duration": 20}}),
            json!({"type": "sound"}),
            json!({"type": "sound", "sound_event": {"range": 3}}),
            json!({"type": "sound", "sound_event": "a", "pos": [1, 2]}),
        ];
        for raw in cases {
            let err = OutcomeDefinition::decode(id("luckbox:bad"), raw.clone()).unwrap_err();
            assert!(
                matches!(err, OutcomeError::MalformedDefinition { .. }),
                "{raw} should be malformed"
            );
        }
    }
}
