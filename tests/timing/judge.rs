use arc_chart::prelude::*;
use pretty_assertions::assert_eq;

fn at_bpm(bpm: f64) -> TimingTimeline {
    TimingTimeline::from_points([TimingPoint::new(0, bpm, 4.0)])
}

#[test]
fn hold_at_120_bpm() {
    let timeline = at_bpm(120.0);
    let hold = Hold {
        timing: 0,
        end_timing: 2000,
        track: 1,
    };
    let judges = hold.judge_timings(&timeline);
    assert_eq!(judges, vec![250, 500, 750, 1000, 1250, 1500, 1750]);
    assert!(judges.windows(2).all(|pair| pair[1] - pair[0] == 250));
    assert!(judges.iter().all(|&judge| 0 < judge && judge < 2000));
}

#[test]
fn arc_head_flag() {
    let timeline = at_bpm(120.0);
    let arc = Arc::new(0, 1000);
    assert_eq!(arc.judge_timings(&timeline, true), vec![250, 500, 750]);
    assert_eq!(arc.judge_timings(&timeline, false), vec![0, 250, 500, 750]);
}

#[test]
fn void_and_zero_length_arcs_are_not_judged() {
    let timeline = at_bpm(120.0);
    assert_eq!(
        Arc::new(0, 1000).with_void(true).judge_timings(&timeline, true),
        Vec::<i32>::new()
    );
    assert_eq!(Arc::new(500, 500).judge_timings(&timeline, false), Vec::<i32>::new());
}

#[test]
fn short_hold_is_judged_at_midpoint() {
    let timeline = at_bpm(120.0);
    let hold = Hold {
        timing: 100,
        end_timing: 400,
        track: 2,
    };
    assert_eq!(hold.judge_timings(&timeline), vec![250]);
}

#[test]
fn fast_bpm_uses_whole_beats() {
    let timeline = at_bpm(256.0);
    let calculator = JudgeTimingCalculator::new(&timeline);
    let interval = 60000.0 / 256.0;
    assert_eq!(calculator.interval_at(0), Some(interval));
    let judges = calculator.judge_timings(0, 1000, true);
    let expected: Vec<i32> = (1i32..4).map(|n| (f64::from(n) * interval) as i32).collect();
    assert_eq!(judges, expected);
}

#[test]
fn malformed_timeline_yields_nothing() {
    let timeline = at_bpm(0.0);
    let hold = Hold {
        timing: 0,
        end_timing: 2000,
        track: 1,
    };
    assert_eq!(hold.judge_timings(&timeline), Vec::<i32>::new());
    assert_eq!(
        hold.judge_timings(&TimingTimeline::new()),
        Vec::<i32>::new()
    );
}
