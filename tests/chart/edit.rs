use arc_chart::prelude::*;
use pretty_assertions::assert_eq;

use super::sample_document;

#[test]
fn ids_are_unique_and_stable() {
    let mut document = sample_document();
    let ids: Vec<_> = document
        .timeline()
        .iter_with_ids()
        .map(|(id, _)| id)
        .chain(document.taps().iter_with_ids().map(|(id, _)| id))
        .chain(document.arcs().iter_with_ids().map(|(id, _)| id))
        .collect();
    assert!(ids.iter().enumerate().all(|(i, id)| !ids[..i].contains(id)));

    let (hold_id, hold) = document.holds().iter_with_ids().next().unwrap();
    let hold = *hold;
    let (tap_id, _) = document.taps().iter_with_ids().next().unwrap();
    assert_eq!(document.remove_event(tap_id).map(|event| event.kind()), Some(EventKind::Tap));
    assert_eq!(document.event(hold_id), Some(EventRef::Hold(&hold)));

    let new_id = document.add_event(Tap { timing: 0, track: 1 }).unwrap();
    assert!(!ids.contains(&new_id));
}

#[test]
fn timing_points_stay_sorted() {
    let mut document = sample_document();
    document.add_event(TimingPoint::new(2000, 150.0, 4.0)).unwrap();
    document.add_timing_point(TimingPoint::new(-500, 172.0, 4.0));
    let timings: Vec<_> = document
        .timeline()
        .points()
        .iter()
        .map(|point| point.timing)
        .collect();
    assert_eq!(timings, vec![-500, 0, 2000, 3488, 6976]);
    assert_eq!(document.clear_timing_points(), 5);
    assert!(document.timeline().is_empty());
}

#[test]
fn arc_taps_link_to_floor_taps() {
    let document = sample_document();
    let arc = document
        .arcs()
        .iter()
        .find(|arc| !arc.arc_taps().is_empty())
        .unwrap();
    let linked: Vec<_> = arc
        .arc_taps()
        .iter()
        .flat_map(|&arc_tap| document.taps_linked_to(arc_tap))
        .collect();
    assert_eq!(linked, vec![&Tap { timing: 3313, track: 2 }]);
}

#[test]
fn arc_tap_edits_keep_the_arc_valid() {
    let mut document = sample_document();
    let (arc_id, _) = document
        .arcs()
        .iter_with_ids()
        .find(|(_, arc)| !arc.arc_taps().is_empty())
        .unwrap();

    assert_eq!(document.add_arc_tap(arc_id, ArcTap::new(3200)), Ok(3));
    assert_eq!(
        document.add_arc_tap(arc_id, ArcTap::new(3500)),
        Err(ChartError::ArcTapOutOfRange {
            arc_timing: 3139,
            arc_end_timing: 3488,
            arc_tap_timing: 3500,
        })
    );
    assert_eq!(document.remove_arc_tap(arc_id, 0), Ok(ArcTap::new(3139)));
    assert_eq!(
        document.remove_arc_tap(arc_id, 9),
        Err(ChartError::ArcTapIndexOutOfBounds { index: 9, len: 3 })
    );
}

#[test]
fn sample_long_note_judges() {
    let document = sample_document();
    let timeline = document.timeline();
    // 172 BPM: a judge every 60000 / 172 / 2 ms, 3.99 of them over 697 ms.
    let interval = 60000.0 / 172.0 / 2.0;
    let hold = document.holds().iter().next().unwrap();
    let expected: Vec<i32> = (1i32..3)
        .map(|n| (1046.0 + f64::from(n) * interval) as i32)
        .collect();
    assert_eq!(hold.judge_timings(timeline), expected);
}
