use super::*;
use crate::animation::curve::Curve;

#[test]
fn builder_produces_contiguous_stages() {
    let cfg = StageConfig::builder()
        .hysteresis(0.01)
        .stage(0.3, |s| s.resource(ResourceSpec::new("mesh")))
        .stage(0.7, |s| s)
        .stage(1.0, |s| {
            s.curve("distortion", ParamCurve::scalar(Curve::linear(0.3, 0.5)))
        })
        .build()
        .unwrap();

    assert_eq!(cfg.hysteresis, 0.01);
    assert_eq!(cfg.len(), 3);
    assert_eq!(cfg.stages[1].start, 0.3);
    assert_eq!(cfg.stages[1].end, 0.7);
    assert_eq!(cfg.stages[0].resource.kind, "mesh");
    assert!(cfg.stages[2].curves.contains_key("distortion"));
}

#[test]
fn builder_rejects_short_cover() {
    let err = StageConfig::builder().stage(0.5, |s| s).build().unwrap_err();
    assert!(err.to_string().contains("[0, 1]"));
}

#[test]
fn builder_rejects_duplicate_curve_names() {
    let err = StageConfig::builder()
        .stage(1.0, |s| {
            s.curve("a", ParamCurve::scalar(Curve::constant(0.0)))
                .curve("a", ParamCurve::scalar(Curve::constant(1.0)))
        })
        .build()
        .unwrap_err();
    assert!(err.to_string().contains("twice"));
}

#[test]
fn builder_rejects_zero_width_stage() {
    let err = StageConfig::builder()
        .stage(0.5, |s| s)
        .stage(0.5, |s| s)
        .stage(1.0, |s| s)
        .build()
        .unwrap_err();
    assert!(err.to_string().contains("zero-width"));
}

#[test]
fn builder_rejects_discontinuous_keyframes() {
    use crate::animation::curve::CurveKey;
    use crate::animation::ease::Ease;

    let key = |at: f64, value: f64| CurveKey {
        at,
        value,
        ease: Ease::Linear,
    };
    let err = StageConfig::builder()
        .stage(1.0, |s| {
            s.curve(
                "distortion",
                ParamCurve::scalar(Curve::Keyframes {
                    keys: vec![key(0.0, 0.0), key(0.5, 0.0), key(0.5, 10.0), key(1.0, 10.0)],
                }),
            )
        })
        .build()
        .unwrap_err();
    assert!(matches!(err, ScrollstageError::Configuration(_)));
    assert!(err.to_string().contains("curve 'distortion'"));
}
