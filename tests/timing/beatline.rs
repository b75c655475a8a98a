use arc_chart::prelude::*;
use pretty_assertions::assert_eq;

use super::changing_timeline;

#[test]
fn zero_bpm_point_is_a_single_marker() {
    let timeline = TimingTimeline::from_points([
        TimingPoint::new(0, 120.0, 4.0),
        TimingPoint::new(1000, 0.0, 4.0),
        TimingPoint::new(3000, 120.0, 4.0),
    ]);
    let lines = BeatGridGenerator::new(&timeline).with_length(5000).generate();
    assert_eq!(lines, vec![0.0, 1000.0, 3000.0]);
}

#[test]
fn runs_stop_at_the_next_point() {
    let timeline = changing_timeline();
    let lines = BeatGridGenerator::new(&timeline).with_length(5000).generate();
    // 2400ms at 100 BPM, 1200ms at 200 BPM, 2400ms at 50 BPM with 2 beats per line.
    assert_eq!(lines, vec![0.0, 1000.0, 2200.0, 3000.0]);
}

#[test]
fn back_fill_is_ascending_and_bounded_by_offset() {
    let timeline = TimingTimeline::from_points([TimingPoint::new(0, 240.0, 1.0)]);
    let lines = BeatGridGenerator::new(&timeline)
        .with_audio_offset(600)
        .with_length(500)
        .generate();
    assert_eq!(lines, vec![-500.0, -250.0, 0.0, 250.0]);
    assert!(lines.windows(2).all(|pair| pair[0] < pair[1]));
}

#[test]
fn negative_offset_disables_back_fill() {
    let timeline = TimingTimeline::from_points([TimingPoint::new(0, 240.0, 1.0)]);
    let lines = BeatGridGenerator::new(&timeline)
        .with_audio_offset(-100)
        .with_length(500)
        .generate();
    assert_eq!(lines, vec![0.0, 250.0]);
}

#[test]
fn negative_bpm_uses_its_magnitude() {
    let timeline = TimingTimeline::from_points([TimingPoint::new(0, -120.0, 1.0)]);
    let lines = BeatGridGenerator::new(&timeline).with_length(1600).generate();
    assert_eq!(lines, vec![0.0, 500.0, 1000.0, 1500.0]);
}
