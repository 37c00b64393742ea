//! Record codec
//!
//! Records are stored as JSON objects with a `version` field next to
//! the record fields. Records written before alpha existed have neither
//! `version` nor `alpha`; they decode as version 1 with an opaque alpha.

use serde_json::Value;
use thiserror::Error;

use crate::record::{SceneRecord, SCHEMA_VERSION};

const VERSION_KEY: &str = "version";

/// Codec errors
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Malformed record: {0}")]
    Malformed(String),

    #[error("Unsupported record version {found} (supported up to {supported})")]
    UnsupportedVersion { found: u32, supported: u32 },
}

pub type CodecResult<T> = Result<T, CodecError>;

/// Encode a record at the current schema version
pub fn encode(record: &SceneRecord) -> CodecResult<String> {
    let mut value = serde_json::to_value(record)?;
    match &mut value {
        Value::Object(fields) => {
            fields.insert(VERSION_KEY.to_string(), Value::from(SCHEMA_VERSION));
        }
        _ => return Err(CodecError::Malformed("record is not an object".to_string())),
    }
    Ok(serde_json::to_string(&value)?)
}

/// Decode a record written by this or any earlier schema version
pub fn decode(input: &str) -> CodecResult<SceneRecord> {
    let value: Value = serde_json::from_str(input)?;
    let version = record_version(&value)?;

    if version > SCHEMA_VERSION {
        return Err(CodecError::UnsupportedVersion {
            found: version,
            supported: SCHEMA_VERSION,
        });
    }

    Ok(serde_json::from_value(value)?)
}

/// Schema version of an encoded record (absent means 1)
pub fn record_version(value: &Value) -> CodecResult<u32> {
    match value.get(VERSION_KEY) {
        None => Ok(1),
        Some(v) => v
            .as_u64()
            .and_then(|v| u32::try_from(v).ok())
            .ok_or_else(|| CodecError::Malformed(format!("bad version: {}", v))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{Rgb, OPAQUE};
    use crate::material::{MaterialMode, Shading, Substance};
    use crate::shape::SelectionShape;

    fn sample() -> SceneRecord {
        SceneRecord::new("harbour")
            .with_shape(SelectionShape::CircleXy)
            .with_material(MaterialMode::new(Substance::Fluid, Shading::Noise))
            .with_color(Rgb::new(12, 34, 56).with_alpha(78))
            .with_grid(false)
    }

    #[test]
    fn test_encode_carries_version() {
        let json = encode(&sample()).unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(record_version(&value).unwrap(), SCHEMA_VERSION);
        assert_eq!(value["selection_shape"], "circle_xy");
    }

    #[test]
    fn test_decode_restores_every_field() {
        let record = sample();
        let decoded = decode(&encode(&record).unwrap()).unwrap();
        assert_eq!(decoded, record);
    }

    #[test]
    fn test_legacy_record_without_alpha() {
        let legacy = r#"{
            "name": "old",
            "selection_shape": "cube",
            "material_mode": { "substance": "solid", "shading": "noise" },
            "color": { "r": 255, "g": 0, "b": 0 },
            "grid_visible": true
        }"#;

        let record = decode(legacy).unwrap();
        assert_eq!(record.name, "old");
        assert_eq!(record.alpha, OPAQUE);
        assert_eq!(record.color, Rgb::new(255, 0, 0));
    }

    #[test]
    fn test_newer_version_rejected() {
        let future = r#"{
            "version": 99,
            "name": "future",
            "selection_shape": "cube",
            "material_mode": { "substance": "solid", "shading": "noise" },
            "color": { "r": 0, "g": 0, "b": 0 },
            "alpha": 0,
            "grid_visible": true
        }"#;

        assert!(matches!(
            decode(future),
            Err(CodecError::UnsupportedVersion { found: 99, .. })
        ));
    }

    #[test]
    fn test_out_of_range_channel_rejected() {
        let bad = r#"{
            "name": "bad",
            "selection_shape": "cube",
            "material_mode": { "substance": "solid", "shading": "noise" },
            "color": { "r": 300, "g": 0, "b": 0 },
            "grid_visible": true
        }"#;

        assert!(matches!(decode(bad), Err(CodecError::Json(_))));
    }

    #[test]
    fn test_malformed_version_rejected() {
        let bad = r#"{ "version": "two", "name": "x" }"#;
        assert!(matches!(decode(bad), Err(CodecError::Malformed(_))));
    }
}
