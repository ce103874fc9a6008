use super::*;
use crate::{
    animation::curve::Curve, interp::engine::ParamCurve, transition::scheduler::TransitionPhase,
};

fn four() -> Orchestrator {
    Orchestrator::new(StageConfig::even(4)).unwrap()
}

#[test]
fn example_progress_values_resolve_expected_stages() {
    let mut o = four();
    let s = o.tick(0.26);
    assert_eq!(s.stage_index(), 1);
    assert!((s.local_progress() - 0.04).abs() < 1e-9);

    let s = o.tick(0.0);
    assert_eq!((s.stage_index(), s.local_progress()), (0, 0.0));
    let s = o.tick(1.0);
    assert_eq!((s.stage_index(), s.local_progress()), (3, 1.0));
    let s = o.tick(-0.5);
    assert_eq!((s.stage_index(), s.local_progress()), (0, 0.0));
}

#[test]
fn first_tick_enters_initial_stage() {
    let mut o = four();
    o.tick(0.6);
    assert_eq!(o.events(), [TransitionEvent::Enter(2)]);
    o.tick(0.65);
    assert!(o.events().is_empty());
}

#[test]
fn non_finite_input_reemits_previous_state() {
    let mut o = four();
    let before = o.tick(0.3);
    let after = o.tick(f64::NAN);
    assert!(Arc::ptr_eq(&before, &after));
    assert!(o.events().is_empty());
    assert!(o.last_report().is_empty());
    o.tick(f64::INFINITY);
    assert_eq!(o.progress().get(), 0.3);
}

#[test]
fn non_finite_first_tick_starts_at_zero() {
    let mut o = four();
    let s = o.tick(f64::NAN);
    assert_eq!(s.stage_index(), 0);
    assert_eq!(s.progress(), Progress::ZERO);
}

#[test]
fn repeated_tick_is_structurally_equal() {
    let mut o = four();
    let a = o.tick(0.49);
    let b = o.tick(0.49);
    assert_eq!(a, b);
    assert!(o.events().is_empty());
}

#[test]
fn periodic_curves_follow_the_supplied_clock() {
    let mut cfg = StageConfig::even(1);
    cfg.stages[0].curves.insert(
        "breath".to_owned(),
        ParamCurve::scalar(Curve::periodic(Curve::constant(0.0), 1.0, 4.0)),
    );
    let mut o = Orchestrator::new(cfg).unwrap();
    let a = o.tick_at(0.5, 0.0);
    let b = o.tick_at(0.5, 1.0);
    assert_eq!(a.params().scalar("breath"), Some(0.0));
    assert!((b.params().scalar("breath").unwrap() - 1.0).abs() < 1e-12);

    let c = o.tick(0.5);
    assert_eq!(b, c);
    assert_eq!(o.time_secs(), 1.0);
}

#[test]
fn crossfade_reported_near_boundary() {
    let mut o = Orchestrator::new(StageConfig::even(2)).unwrap();
    o.tick(0.3);
    let s = o.tick(0.51);
    assert!(matches!(
        s.phase(),
        TransitionPhase::CrossFade { from: 0, to: 1, .. }
    ));
    assert_eq!(o.tick(0.8).phase(), TransitionPhase::Steady);
}

#[test]
fn crossfade_can_be_disabled() {
    let opts = OrchestratorOpts {
        crossfade: false,
        ..OrchestratorOpts::default()
    };
    let mut o = Orchestrator::with_opts(StageConfig::even(2), opts).unwrap();
    o.tick(0.49);
    assert_eq!(o.tick(0.51).phase(), TransitionPhase::Steady);
}

#[test]
fn dispose_all_exits_and_restarts() {
    let mut o = four();
    o.tick(0.24);
    assert_eq!(o.lifecycle().resident_count(), 2);

    let report = o.dispose_all();
    assert_eq!(report.disposed.len(), 2);
    assert_eq!(o.events(), [TransitionEvent::Exit(0)]);
    assert_eq!(o.lifecycle().resident_count(), 0);
    assert!(o.last_state().is_none());

    o.tick(0.24);
    assert_eq!(o.events(), [TransitionEvent::Enter(0)]);
}

#[test]
fn current_handle_resolves_to_stage_resource() {
    let mut o = four();
    let s = o.tick(0.9);
    let current = s.resources().current;
    assert_eq!(current.stage, 3);
    assert!(o.lifecycle().is_live(current.handle));
    assert_eq!(o.lifecycle().stage_of(current.handle), Some(3));
}

#[test]
fn invalid_config_fails_construction() {
    let mut cfg = StageConfig::even(3);
    cfg.stages[1].end = cfg.stages[1].start;
    assert!(Orchestrator::new(cfg).is_err());
    assert!(Orchestrator::from_json_str("{ \"stages\": [] }").is_err());
}

#[test]
fn tick_input_converts_scroll_offsets() {
    let mut o = four();
    let s = o.tick_input(ProgressInput::Scroll {
        offset: 750.0,
        max_offset: 1000.0,
    });
    assert_eq!(s.stage_index(), 3);
    assert_eq!(s.progress().get(), 0.75);
}
