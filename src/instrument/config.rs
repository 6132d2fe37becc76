//! Instrument bundles read from JSON.
//!
//! ```json
//! {
//!   "notes": { "a": "0 2 4", "b": "5 7 9" },
//!   "synth": [{ "scale": "C:major" }, { "sound": "piano" }],
//!   "effects": [{ "delay": 0.3 }, { "gain": 0.8 }]
//! }
//! ```
//!
//! `synth` and `effects` are lists of operations. An operation is the bare
//! string `"note"` or a single-entry object: `scale` and `sound` take a
//! name, any other key becomes a control call with that key as its name.
//! `scale` and `sound` may also be given at the top level as plain names.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Deserialize;
use serde_json::Value;

use super::{Bundle, NoteSource};
use crate::error::ConfigurationError;
use crate::pattern::{is_js_identifier, ControlValue, Op, PartMap, Pattern, Transform};

/// Raw bundle file, before validation
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BundleConfig {
    #[serde(default)]
    pub notes: Option<Value>,
    #[serde(default)]
    pub synth: Option<Vec<OpSpec>>,
    #[serde(default)]
    pub effects: Option<Vec<OpSpec>>,
    #[serde(default)]
    pub scale: Option<String>,
    #[serde(default)]
    pub sound: Option<String>,
}

/// One operation as written in a bundle file
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum OpSpec {
    Bare(String),
    Call(BTreeMap<String, ControlValue>),
}

impl OpSpec {
    fn to_op(&self, field: &'static str) -> Result<Op, ConfigurationError> {
        match self {
            OpSpec::Bare(name) if name == "note" => Ok(Op::Note),
            OpSpec::Bare(name) => Err(ConfigurationError::InvalidOp {
                field,
                reason: format!("'{name}' needs an argument, write {{\"{name}\": ...}}"),
            }),
            OpSpec::Call(call) => {
                let mut entries = call.iter();
                let (name, value) = match (entries.next(), entries.next()) {
                    (Some(entry), None) => entry,
                    _ => {
                        return Err(ConfigurationError::InvalidOp {
                            field,
                            reason: format!(
                                "expected exactly one operation per entry, found {}",
                                call.len()
                            ),
                        })
                    }
                };
                match (name.as_str(), value) {
                    ("scale", ControlValue::Text(scale)) => Ok(Op::Scale(scale.clone())),
                    ("sound", ControlValue::Text(sound)) => Ok(Op::Sound(sound.clone())),
                    ("scale" | "sound", ControlValue::Number(_)) => {
                        Err(ConfigurationError::InvalidOp {
                            field,
                            reason: format!("'{name}' takes a name, not a number"),
                        })
                    }
                    _ if !is_js_identifier(name) => Err(ConfigurationError::InvalidOp {
                        field,
                        reason: format!("'{name}' is not a valid control name"),
                    }),
                    _ if !value.is_valid() => Err(ConfigurationError::InvalidOp {
                        field,
                        reason: format!("'{name}' needs a finite number"),
                    }),
                    _ => Ok(Op::Control {
                        name: name.clone(),
                        value: value.clone(),
                    }),
                }
            }
        }
    }
}

fn ops_transform(
    specs: Option<Vec<OpSpec>>,
    field: &'static str,
) -> Result<Option<Transform<Pattern>>, ConfigurationError> {
    let Some(specs) = specs else {
        return Ok(None);
    };
    let ops = specs
        .iter()
        .map(|spec| spec.to_op(field))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Some(Arc::new(move |p: Pattern| {
        ops.iter().cloned().fold(p, Pattern::apply)
    })))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

impl BundleConfig {
    pub fn from_json(text: &str) -> Result<Bundle<Pattern>, ConfigurationError> {
        let config: BundleConfig = serde_json::from_str(text)?;
        config.into_bundle()
    }

    pub fn from_value(value: Value) -> Result<Bundle<Pattern>, ConfigurationError> {
        let config: BundleConfig = serde_json::from_value(value)?;
        config.into_bundle()
    }

    /// Validate the raw file and turn it into a loadable bundle
    pub fn into_bundle(self) -> Result<Bundle<Pattern>, ConfigurationError> {
        let notes = match self.notes {
            None | Some(Value::Null) => return Err(ConfigurationError::MissingNotes),
            Some(Value::Object(map)) => map,
            Some(other) => {
                return Err(ConfigurationError::NotesNotMapping {
                    found: json_kind(&other),
                })
            }
        };

        let mut parts = PartMap::new();
        for (name, value) in notes {
            let source = match value {
                Value::String(text) => NoteSource::Text(text),
                other => {
                    return Err(ConfigurationError::InvalidPart {
                        reason: format!("expected a note string, found {}", json_kind(&other)),
                        part: name,
                    })
                }
            };
            parts.insert(name, source);
        }

        Ok(Bundle {
            notes: parts,
            synth: ops_transform(self.synth, "synth")?,
            effects: ops_transform(self.effects, "effects")?,
            scale: self.scale,
            sound: self.sound,
        })
    }
}
