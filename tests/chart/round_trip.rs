use arc_chart::prelude::*;
use pretty_assertions::assert_eq;

use super::sample_document;

#[test]
fn serialize_import_is_idempotent() {
    let document = sample_document();
    for mode in [SortMode::ByTime, SortMode::ByType] {
        let exported = document.serialize(mode);
        let ImportOutput {
            document: reimported,
            warnings,
        } = ChartDocument::import(&exported).unwrap();
        assert_eq!(warnings, vec![]);
        assert_eq!(reimported.serialize(mode), exported, "{mode:?}");
    }
}

#[test]
fn sample_collections() {
    let document = sample_document();
    assert_eq!(document.audio_offset, -150);
    assert_eq!(document.timeline().len(), 3);
    assert_eq!(document.taps().len(), 5);
    assert_eq!(document.holds().len(), 2);
    assert_eq!(document.arcs().len(), 9);
    assert_eq!(document.cameras().len(), 2);
    assert_eq!(document.scene_controls().len(), 2);
    assert_eq!(document.event_count(), 23);
    assert_eq!(document.last_event_timing(), 6976);
}

#[test]
fn by_time_orders_coincident_events_by_kind() {
    let records = sample_document().serialize(SortMode::ByTime).records;
    assert!(
        records
            .windows(2)
            .all(|pair| pair[0].timing() <= pair[1].timing())
    );
    // The timing point at 3488 comes before the hold starting there.
    let at_3488: Vec<_> = records
        .iter()
        .filter(|record| record.timing() == 3488)
        .collect();
    assert!(matches!(at_3488[0], Record::Timing { .. }));
    assert!(matches!(at_3488[1], Record::Hold { .. }));
}

#[test]
fn by_type_groups_kinds() {
    let records = sample_document().serialize(SortMode::ByType).records;
    let timing_points: Vec<_> = records
        .iter()
        .take(3)
        .map(|record| match record {
            Record::Timing { timing, .. } => *timing,
            other => panic!("expected a timing record, got {other:?}"),
        })
        .collect();
    assert_eq!(timing_points, vec![0, 3488, 6976]);
    assert!(matches!(records[3], Record::Tap { timing: 348, .. }));
    assert!(matches!(
        records.last(),
        Some(Record::SceneControl { timing: 6000, .. })
    ));
}

#[test]
fn arc_with_arc_taps_is_always_void() {
    let records = RecordList {
        audio_offset: 0,
        records: vec![Record::Arc {
            timing: 1000,
            end_timing: 2000,
            x_start: 0.0,
            x_end: 1.0,
            y_start: 1.0,
            y_end: 1.0,
            line_type: "s".to_string(),
            color: 0,
            is_void: false,
            arc_taps: vec![ArcTapRecord { timing: 1000 }, ArcTapRecord { timing: 1500 }],
        }],
    };
    let ImportOutput { document, .. } = ChartDocument::import(&records).unwrap();
    let arc = document.arcs().iter().next().unwrap();
    assert!(arc.is_void);
    assert_eq!(arc.arc_taps(), &[ArcTap::new(1000), ArcTap::new(1500)]);

    let Record::Arc {
        is_void, arc_taps, ..
    } = &document.serialize(SortMode::ByTime).records[0]
    else {
        panic!("expected an arc record");
    };
    assert!(*is_void);
    assert_eq!(
        arc_taps,
        &vec![ArcTapRecord { timing: 1000 }, ArcTapRecord { timing: 1500 }]
    );
}

#[test]
fn arc_tap_outside_arc_fails_import() {
    let records = RecordList {
        audio_offset: 0,
        records: vec![Record::Arc {
            timing: 1000,
            end_timing: 2000,
            x_start: 0.0,
            x_end: 1.0,
            y_start: 1.0,
            y_end: 1.0,
            line_type: "s".to_string(),
            color: 0,
            is_void: true,
            arc_taps: vec![ArcTapRecord { timing: 2001 }],
        }],
    };
    assert_eq!(
        ChartDocument::import(&records),
        Err(ChartError::ArcTapOutOfRange {
            arc_timing: 1000,
            arc_end_timing: 2000,
            arc_tap_timing: 2001,
        })
    );
}

#[test]
fn unknown_scene_control_exports_as_unknown() {
    let records = RecordList {
        audio_offset: 0,
        records: vec![Record::SceneControl {
            timing: 500,
            kind: "redline".to_string(),
            params: vec!["1.00".to_string(), "0".to_string()],
        }],
    };
    let ImportOutput { document, warnings } = ChartDocument::import(&records).unwrap();
    assert_eq!(warnings.len(), 1);
    assert_eq!(
        document.serialize(SortMode::ByTime).records,
        vec![Record::SceneControl {
            timing: 500,
            kind: "unknown".to_string(),
            params: vec![],
        }]
    );
}
