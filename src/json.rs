//! The JSON form of a [`RecordList`].
//!
//! ```json
//! {
//!   "audioOffset": 0,
//!   "records": [
//!     { "type": "timing", "timing": 0, "bpm": 120.0, "beatsPerLine": 4.0 },
//!     { "type": "tap", "timing": 500, "track": 1 }
//!   ]
//! }
//! ```

use thiserror::Error;

use crate::chart::record::{Record, RecordList};

/// An error on reading or writing JSON, with the path of the failing value.
#[derive(Debug, Error)]
#[error("invalid chart JSON at `{path}`: {source}")]
pub struct JsonError {
    /// Path of the failing value, like `records[3]`.
    pub path: String,
    /// The underlying error.
    #[source]
    pub source: serde_json::Error,
}

impl From<serde_path_to_error::Error<serde_json::Error>> for JsonError {
    fn from(error: serde_path_to_error::Error<serde_json::Error>) -> Self {
        Self {
            path: error.path().to_string(),
            source: error.into_inner(),
        }
    }
}

/// Reads a record list from JSON.
///
/// # Errors
///
/// Returns a [`JsonError`] pointing at the first value that does not fit the record layout.
pub fn from_json_str(source: &str) -> Result<RecordList, JsonError> {
    let deserializer = &mut serde_json::Deserializer::from_str(source);
    let records = serde_path_to_error::deserialize(deserializer)?;
    Ok(records)
}

/// Writes a record list as pretty-printed JSON.
///
/// # Errors
///
/// Returns a [`JsonError`] pointing at the first NaN or infinite number. JSON has no such
/// numbers and `serde_json` would silently write them as `null`.
pub fn to_json_string(records: &RecordList) -> Result<String, JsonError> {
    let non_finite = records.records.iter().enumerate().find_map(|(index, record)| {
        float_fields(record)
            .into_iter()
            .find(|(_, value)| !value.is_finite())
            .map(|(field, value)| (index, field, value))
    });
    if let Some((index, field, value)) = non_finite {
        return Err(JsonError {
            path: format!("records[{index}].{field}"),
            source: serde::ser::Error::custom(format_args!("{value} is not a JSON number")),
        });
    }
    serde_json::to_string_pretty(records).map_err(|source| JsonError {
        path: String::new(),
        source,
    })
}

/// Floating-point fields of a record with their JSON names.
fn float_fields(record: &Record) -> Vec<(&'static str, f64)> {
    match record {
        &Record::Timing {
            bpm,
            beats_per_line,
            ..
        } => vec![("bpm", bpm), ("beatsPerLine", beats_per_line)],
        &Record::Arc {
            x_start,
            x_end,
            y_start,
            y_end,
            ..
        } => vec![
            ("xStart", x_start),
            ("xEnd", x_end),
            ("yStart", y_start),
            ("yEnd", y_end),
        ],
        &Record::Camera {
            move_x,
            move_y,
            move_z,
            rotate_x,
            rotate_y,
            rotate_z,
            ..
        } => vec![
            ("moveX", move_x),
            ("moveY", move_y),
            ("moveZ", move_z),
            ("rotateX", rotate_x),
            ("rotateY", rotate_y),
            ("rotateZ", rotate_z),
        ],
        Record::Tap { .. } | Record::Hold { .. } | Record::SceneControl { .. } => Vec::new(),
    }
}
