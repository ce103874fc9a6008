use super::*;

#[test]
fn update_clamps_and_holds_through_non_finite() {
    let mut src = ProgressSource::default();
    assert_eq!(src.update(0.4).get(), 0.4);
    assert_eq!(src.update(f64::NAN).get(), 0.4);
    assert_eq!(src.update(f64::INFINITY).get(), 0.4);
    assert_eq!(src.update(-2.0), Progress::ZERO);
    assert_eq!(src.update(9.0), Progress::ONE);
}

#[test]
fn update_changed_reports_only_changes() {
    let mut src = ProgressSource::default();
    assert!(src.update_changed(0.0).is_none());
    assert_eq!(src.update_changed(0.3).map(Progress::get), Some(0.3));
    assert!(src.update_changed(0.3).is_none());
    assert!(src.update_changed(f64::NAN).is_none());
}

#[test]
fn scroll_input_divides_by_extent() {
    let mut src = ProgressSource::default();
    let p = src.apply(ProgressInput::Scroll {
        offset: 250.0,
        max_offset: 1000.0,
    });
    assert_eq!(p.get(), 0.25);

    // A page that cannot scroll leaves progress where it was.
    let p = src.apply(ProgressInput::Scroll {
        offset: 0.0,
        max_offset: 0.0,
    });
    assert_eq!(p.get(), 0.25);
}

#[test]
fn drag_input_is_relative() {
    let mut src = ProgressSource::new(Progress::new(0.5).unwrap());
    let p = src.apply(ProgressInput::Drag {
        delta: -100.0,
        extent: 400.0,
    });
    assert_eq!(p.get(), 0.25);
    let p = src.apply(ProgressInput::Drag {
        delta: -1000.0,
        extent: 400.0,
    });
    assert_eq!(p, Progress::ZERO);
}

#[test]
fn autoplay_holds_or_loops() {
    let mut src = ProgressSource::default();
    let held = src.apply(ProgressInput::Autoplay {
        elapsed_secs: 15.0,
        duration_secs: 10.0,
        looping: false,
    });
    assert_eq!(held, Progress::ONE);

    let looped = src.apply(ProgressInput::Autoplay {
        elapsed_secs: 12.5,
        duration_secs: 10.0,
        looping: true,
    });
    assert!((looped.get() - 0.25).abs() < 1e-12);

    let bad = src.apply(ProgressInput::Autoplay {
        elapsed_secs: 1.0,
        duration_secs: 0.0,
        looping: true,
    });
    assert_eq!(bad, looped);
}

#[test]
fn section_progress_spans_range() {
    assert_eq!(section_progress(0, 1), Progress::ZERO);
    assert_eq!(section_progress(0, 5), Progress::ZERO);
    assert_eq!(section_progress(2, 5).get(), 0.5);
    assert_eq!(section_progress(4, 5), Progress::ONE);
    assert_eq!(section_progress(9, 5), Progress::ONE);
}
