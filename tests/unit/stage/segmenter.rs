use super::*;
use crate::stage::definition::StageConfig;

fn p(v: f64) -> Progress {
    Progress::new(v).unwrap()
}

fn four() -> StageSegmenter {
    StageSegmenter::new(&StageConfig::even(4).stages).unwrap()
}

#[test]
fn even_stages_resolve_expected_indices() {
    let seg = four();
    let s = seg.segment(p(0.26));
    assert_eq!(s.stage_index, 1);
    assert!((s.local_progress - 0.04).abs() < 1e-9);

    assert_eq!(
        seg.segment(p(0.0)),
        StageLocalState {
            stage_index: 0,
            local_progress: 0.0
        }
    );
    assert_eq!(
        seg.segment(p(1.0)),
        StageLocalState {
            stage_index: 3,
            local_progress: 1.0
        }
    );
}

#[test]
fn boundaries_belong_to_the_next_stage() {
    let seg = four();
    let s = seg.segment(p(0.5));
    assert_eq!(s.stage_index, 2);
    assert_eq!(s.local_progress, 0.0);
}

#[test]
fn every_sample_is_in_range() {
    let seg = four();
    for i in 0..=1000 {
        let s = seg.segment(p(f64::from(i) / 1000.0));
        assert!(s.stage_index < seg.len());
        assert!((0.0..=1.0).contains(&s.local_progress));
    }
}

#[test]
fn single_stage_always_resolves_to_zero() {
    let seg = StageSegmenter::new(&StageConfig::even(1).stages).unwrap();
    for v in [0.0, 0.3, 1.0] {
        let s = seg.segment(p(v));
        assert_eq!(s.stage_index, 0);
        assert_eq!(s.local_progress, v);
    }
}

#[test]
fn uneven_stages_use_their_own_widths() {
    let cfg = StageConfig::builder()
        .stage(0.1, |s| s)
        .stage(0.9, |s| s)
        .stage(1.0, |s| s)
        .build()
        .unwrap();
    let seg = StageSegmenter::new(&cfg.stages).unwrap();
    let s = seg.segment(p(0.5));
    assert_eq!(s.stage_index, 1);
    assert!((s.local_progress - 0.5).abs() < 1e-9);
    assert!((seg.global_progress(&s).get() - 0.5).abs() < 1e-9);
}

#[test]
fn one_shot_segment_validates() {
    assert!(segment(p(0.5), &[]).is_err());
    let s = segment(p(0.75), &StageConfig::even(2).stages).unwrap();
    assert_eq!(s.stage_index, 1);
    assert_eq!(s.local_progress, 0.5);
}
