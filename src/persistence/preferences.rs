//! Encoding and decoding of the preferences document.
//!
//! The document is a JSON object keyed by option name. Only options flagged
//! as preferences whose value differs from the default are written.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::error::{CmdError, Result};
use crate::options::OptionRegistry;
use crate::value::format_float;

/// Serializes the preference options that differ from their defaults.
///
/// Each included option's save hook runs first and may abort the whole
/// operation. Keys are sorted by name and the output is indented with tabs.
pub fn serialize(options: &mut OptionRegistry) -> Result<Vec<u8>> {
    let mut document = BTreeMap::new();

    for index in 0..options.table().len() {
        let Some(def) = options.table().at(index) else {
            continue;
        };
        if !def.is_preference() || !def.differs_from_default() {
            continue;
        }
        let name = def.name.clone();

        options
            .fire_save(index)
            .map_err(|source| CmdError::SaveHook {
                option: name.clone(),
                source,
            })?;

        let Some(def) = options.table().lookup(&name) else {
            continue;
        };
        let Some(value) = def.value.native_value() else {
            return Err(CmdError::preferences(format!(
                "option {name} has no JSON form for value {}",
                def.value.to_text()
            )));
        };
        document.insert(name, value);
    }

    debug!("Serializing {} preference(s)", document.len());

    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"\t");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    document.serialize(&mut serializer)?;
    Ok(buf)
}

/// Applies a preferences document to the registered options.
///
/// Unknown keys and object values are ignored. `null` resets an option, an
/// array replaces it element by element, any other value is parsed from its
/// text form.
pub fn deserialize(options: &mut OptionRegistry, bytes: &[u8]) -> Result<()> {
    let document: serde_json::Map<String, Value> = serde_json::from_slice(bytes)?;
    let mut applied = 0usize;

    for index in 0..options.table().len() {
        let Some(name) = options.table().at(index).map(|d| d.name.clone()) else {
            continue;
        };
        let Some(value) = document.get(&name) else {
            continue;
        };

        match value {
            Value::Null => {
                if let Some(def) = options.table_mut().get_mut(index) {
                    def.value.reset();
                }
            }
            Value::Object(_) => {
                debug!("Skipping object value for preference {}", name);
                continue;
            }
            Value::Array(items) => {
                let Some(def) = options.table_mut().get_mut(index) else {
                    continue;
                };
                def.value.reset();
                for item in items {
                    let Value::String(text) = item else {
                        return Err(CmdError::preferences(format!(
                            "option {name} expects an array of strings, found {item}"
                        )));
                    };
                    def.value
                        .parse_from(text)
                        .map_err(|source| CmdError::InvalidValue {
                            option: name.clone(),
                            value: text.clone(),
                            source,
                        })?;
                }
                options.fire_change(index);
            }
            scalar => {
                let text = scalar_text(scalar);
                let Some(def) = options.table_mut().get_mut(index) else {
                    continue;
                };
                def.value
                    .parse_from(&text)
                    .map_err(|source| CmdError::InvalidValue {
                        option: name.clone(),
                        value: text.clone(),
                        source,
                    })?;
                options.fire_change(index);
            }
        }
        applied += 1;
    }

    info!("Loaded {} preference(s)", applied);
    Ok(())
}

/// Text form of a JSON scalar, with strings unquoted.
///
/// Whole numbers written with a fraction or exponent, like `1000.0` or
/// `1e3`, lose it so that integer options accept them.
fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) if !n.is_i64() && !n.is_u64() => match n.as_f64() {
            Some(f) if f.fract() == 0.0 && f.abs() < 1e18 => format!("{}", f as i64),
            Some(f) => format_float(f),
            None => n.to_string(),
        },
        other => other.to_string(),
    }
}
