use arc_chart::json::{from_json_str, to_json_string};
use arc_chart::prelude::*;
use pretty_assertions::assert_eq;

use super::sample_document;

#[test]
fn json_round_trip() {
    let records = sample_document().serialize(SortMode::ByTime);
    let json = to_json_string(&records).unwrap();
    assert_eq!(from_json_str(&json).unwrap(), records);
}

#[test]
fn reads_camel_case_records() {
    let json = r#"{
        "audioOffset": 20,
        "records": [
            { "type": "timing", "timing": 0, "bpm": 120.0, "beatsPerLine": 4.0 },
            { "type": "hold", "timing": 500, "endTiming": 1000, "track": 4 },
            {
                "type": "arc", "timing": 0, "endTiming": 500,
                "xStart": 0.0, "xEnd": 1.0, "yStart": 1.0, "yEnd": 1.0,
                "lineType": "s", "color": 0, "isVoid": true
            },
            { "type": "scene_control", "timing": 800, "kind": "trackhide" }
        ]
    }"#;
    let records = from_json_str(json).unwrap();
    assert_eq!(records.audio_offset, 20);
    assert_eq!(
        records.records[1],
        Record::Hold {
            timing: 500,
            end_timing: 1000,
            track: 4,
        }
    );
    assert!(matches!(&records.records[2], Record::Arc { arc_taps, .. } if arc_taps.is_empty()));
    assert_eq!(
        records.records[3],
        Record::SceneControl {
            timing: 800,
            kind: "trackhide".to_string(),
            params: vec![],
        }
    );
}

#[test]
fn missing_audio_offset_defaults_to_zero() {
    let records = from_json_str(r#"{ "records": [] }"#).unwrap();
    assert_eq!(records, RecordList::default());
}

#[test]
fn error_points_at_the_record() {
    let json = r#"{
        "records": [
            { "type": "tap", "timing": 0, "track": 1 },
            { "type": "tap", "timing": "soon", "track": 1 }
        ]
    }"#;
    let error = from_json_str(json).unwrap_err();
    assert!(error.path.starts_with("records[1]"), "path: {}", error.path);
}
