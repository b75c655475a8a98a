//! Tests for `arc_chart::session::ChartSession`, driven the way a host drives it per frame.

use arc_chart::prelude::*;
use pretty_assertions::assert_eq;

/// Allowed absolute error of floating-point positions and times.
const POSITION_EPSILON: f64 = 1e-6;

#[track_caller]
fn assert_close(expected: f64, actual: f64, msg: &str) {
    let diff = (expected - actual).abs();
    assert!(
        diff < POSITION_EPSILON,
        "{msg}: expected {expected:.6}, got {actual:.6}, diff {diff:.9} (allowed: {POSITION_EPSILON})",
    );
}

/// 100 BPM, 4 beats per line, a tap at 10000 to set the length.
fn session() -> ChartSession {
    let mut document = ChartDocument::new(0);
    document.add_event(TimingPoint::new(0, 100.0, 4.0)).unwrap();
    document
        .add_event(Tap {
            timing: 10000,
            track: 1,
        })
        .unwrap();
    ChartSession::new(document, TimingConfig::default())
}

#[test]
fn beat_lines_follow_the_playhead() {
    let mut session = session();
    assert_eq!(session.beat_lines(), &[0.0, 2400.0, 4800.0, 7200.0, 9600.0]);

    session.tick(0);
    assert_close(100000.0 / 30.0, session.render_window().latest, "latest");
    assert_eq!(
        session.visible_beat_lines().collect::<Vec<_>>(),
        vec![
            VisibleBeatLine {
                timing: 0.0,
                position: 0.0,
            },
            VisibleBeatLine {
                timing: 2400.0,
                position: 72000.0,
            },
        ]
    );

    session.tick(3000);
    assert_eq!(
        session.visible_beat_lines().collect::<Vec<_>>(),
        vec![VisibleBeatLine {
            timing: 4800.0,
            position: 54000.0,
        }]
    );
}

#[test]
fn audio_offset_shifts_the_playback_domain() {
    let mut session = session();
    session.set_audio_offset(600);
    session.tick(0);

    // The 600ms before the first point scroll at its BPM.
    assert_eq!(session.position_from_current(600), 18000.0);
    assert_eq!(session.timing_at_position(0, 18000.0), 600);
    assert_close(0.0, session.render_window().earliest, "earliest");
    assert_close(100000.0 / 30.0, session.render_window().latest, "latest");
    assert_eq!(
        session.visible_beat_lines().collect::<Vec<_>>(),
        vec![
            VisibleBeatLine {
                timing: 0.0,
                position: 18000.0,
            },
            VisibleBeatLine {
                timing: 2400.0,
                position: 90000.0,
            },
        ]
    );
}

#[test]
fn config_changes_apply_immediately() {
    let mut session = session();
    session.tick(1000);
    assert_eq!(session.current_speed(), 1.0);

    session.set_base_bpm(50.0);
    assert_eq!(session.current_speed(), 2.0);
    assert_eq!(session.position_from_current(2000), 60000.0);

    session.set_velocity(15);
    assert_eq!(session.position_from_current(2000), 30000.0);
    assert_close(1000.0 + 100000.0 / 30.0, session.render_window().latest, "latest");
}

#[test]
fn bpm_change_updates_speed_and_grid() {
    let mut session = session();
    session.tick(5000);
    let id = session.add_event(TimingPoint::new(4000, 200.0, 4.0)).unwrap();
    assert_eq!(session.current_speed(), 2.0);
    assert_eq!(session.bpm_at(5000), 200.0);
    // 2400 from the first point, then 1200 per line from 4000.
    assert_eq!(
        session.beat_lines(),
        &[0.0, 2400.0, 4000.0, 5200.0, 6400.0, 7600.0, 8800.0]
    );

    assert!(matches!(session.remove_event(id), Some(Event::Timing(_))));
    assert_eq!(session.current_speed(), 1.0);
    assert_eq!(session.beat_lines().len(), 5);
}

#[test]
fn length_bounds_the_grid() {
    let mut session = session();
    session.set_length(5000);
    assert_eq!(session.length(), 5000);
    assert_eq!(session.beat_lines(), &[0.0, 2400.0, 4800.0]);
}

#[test]
fn import_replaces_the_chart() {
    let mut session = session();
    session.tick(500);
    let records = arc_chart::aff::parse(
        "AudioOffset:0\n-\ntiming(0,120.00,4.00);\narc(0,4000,0.00,1.00,s,1.00,1.00,0,none,false);\n",
    )
    .unwrap();
    let warnings = session.import(&records).unwrap();
    assert_eq!(warnings, vec![]);
    assert_eq!(session.length(), 4000);
    assert_eq!(session.playhead(), 500);
    assert_eq!(session.current_speed(), 1.2);
    assert_eq!(session.beat_lines(), &[0.0, 2000.0]);
    assert_eq!(session.serialize(SortMode::ByTime), records);

    let (arc, _) = session.document().arcs().iter_with_ids().next().unwrap();
    assert_eq!(
        session.judge_timings(arc, false).unwrap().first(),
        Some(&0)
    );
    assert_eq!(
        session.judge_timings(arc, true).unwrap().first(),
        Some(&250)
    );
}

#[test]
fn failed_import_keeps_the_chart() {
    let mut session = session();
    let before = session.serialize(SortMode::ByTime);
    let records = RecordList {
        audio_offset: 0,
        records: vec![Record::Hold {
            timing: 100,
            end_timing: 0,
            track: 1,
        }],
    };
    assert_eq!(
        session.import(&records),
        Err(ChartError::InvertedLongNote {
            timing: 100,
            end_timing: 0,
        })
    );
    assert_eq!(session.serialize(SortMode::ByTime), before);
}

#[test]
fn arc_taps_through_the_session() {
    let mut session = session();
    let arc = session.add_event(Arc::new(1000, 2000).with_void(true)).unwrap();
    assert_eq!(session.add_arc_tap(arc, ArcTap::new(1500)), Ok(0));
    assert_eq!(session.judge_timings(arc, true), Ok(vec![]));
    assert_eq!(session.remove_arc_tap(arc, 0), Ok(ArcTap::new(1500)));
    assert_eq!(
        session.judge_timings(EventId::new(1000), true),
        Err(ChartError::EventNotFound(EventId::new(1000)))
    );
}

#[test]
fn cleared_session_is_unbounded_and_still() {
    let mut session = session();
    session.tick(2000);
    session.clear();
    assert_eq!(session.current_speed(), 0.0);
    assert_eq!(session.render_window(), RenderWindow::default());
    assert!(session.should_try_render(-1_000_000));
    assert_eq!(session.visible_beat_lines().count(), 0);

    session.add_timing_point(TimingPoint::new(0, 100.0, 4.0));
    assert_eq!(session.current_speed(), 1.0);
    assert_eq!(session.beat_lines().len(), 5);
}
