use super::*;
use serde_json::json;

fn close(a: ColorDef, b: ColorDef) -> bool {
    (a.r - b.r).abs() < 1e-3
        && (a.g - b.g).abs() < 1e-3
        && (a.b - b.b).abs() < 1e-3
        && (a.a - b.a).abs() < 1e-3
}

#[test]
fn parses_hex_rgb_and_rgba() {
    let c: ColorDef = serde_json::from_value(json!("#ff0000")).unwrap();
    assert_eq!(c, ColorDef::rgba(1.0, 0.0, 0.0, 1.0));

    let c: ColorDef = serde_json::from_value(json!("#0000ff80")).unwrap();
    assert!((c.b - 1.0).abs() < 1e-9);
    assert!((c.a - (128.0 / 255.0)).abs() < 1e-9);

    assert!(ColorDef::hex("#12345").is_err());
    assert!(ColorDef::hex("#zz0000").is_err());
}

#[test]
fn parses_object_array_and_hsla() {
    let c: ColorDef = serde_json::from_value(json!({"r": 0.25, "g": 0.5, "b": 0.75})).unwrap();
    assert_eq!(c, ColorDef::rgba(0.25, 0.5, 0.75, 1.0));

    let c: ColorDef = serde_json::from_value(json!([0.25, 0.5, 0.75, 0.9])).unwrap();
    assert_eq!(c, ColorDef::rgba(0.25, 0.5, 0.75, 0.9));

    let c: ColorDef = serde_json::from_value(json!({"h": 120.0, "s": 1.0, "l": 0.5})).unwrap();
    assert!(close(c, ColorDef::rgba(0.0, 1.0, 0.0, 1.0)));
}

#[test]
fn oklab_round_trip_is_near_identity() {
    let c = ColorDef::hex("#6366f1").unwrap();
    let back = ColorDef::from_oklab(c.to_oklab(), c.a);
    assert!(close(c, back));
}

#[test]
fn oklab_midpoint_is_brighter_than_raw_rgb_midpoint() {
    // Red -> green through raw RGB goes muddy; OKLab keeps lightness up.
    let red = ColorDef::rgba(1.0, 0.0, 0.0, 1.0);
    let green = ColorDef::rgba(0.0, 1.0, 0.0, 1.0);
    let mid = red.mix_oklab(green, 0.5);
    let raw_mid_l = ColorDef::rgba(0.5, 0.5, 0.0, 1.0).to_oklab()[0];
    assert!(mid.to_oklab()[0] > raw_mid_l);
}

#[test]
fn ramp_hits_stops_and_clamps_outside() {
    let a = ColorDef::hex("#000000").unwrap();
    let b = ColorDef::hex("#ffffff").unwrap();
    let c = ColorDef::hex("#ff0000").unwrap();
    let ramp = ColorRamp::even([a, b, c]);
    ramp.validate().unwrap();

    assert_eq!(ramp.stops[1].at, 0.5);
    assert_eq!(ramp.sample(0.0), a);
    assert_eq!(ramp.sample(0.5), b);
    assert_eq!(ramp.sample(1.0), c);
    assert_eq!(ramp.sample(-1.0), a);
    assert_eq!(ramp.sample(2.0), c);
}

#[test]
fn ramp_validation_rejects_bad_stops() {
    assert!(ColorRamp { stops: vec![] }.validate().is_err());
    let red = ColorDef::rgba(1.0, 0.0, 0.0, 1.0);
    let unsorted = ColorRamp {
        stops: vec![
            ColorStop { at: 0.9, color: red },
            ColorStop { at: 0.1, color: red },
        ],
    };
    assert!(unsorted.validate().is_err());

    let blue = ColorDef::rgba(0.0, 0.0, 1.0, 1.0);
    let step = ColorRamp {
        stops: vec![
            ColorStop { at: 0.0, color: red },
            ColorStop { at: 0.5, color: red },
            ColorStop { at: 0.5, color: blue },
            ColorStop { at: 1.0, color: blue },
        ],
    };
    let err = step.validate().unwrap_err();
    assert!(matches!(err, ScrollstageError::Configuration(_)));

    let hold = ColorRamp {
        stops: vec![
            ColorStop { at: 0.0, color: red },
            ColorStop { at: 0.5, color: blue },
            ColorStop { at: 0.5, color: blue },
            ColorStop { at: 1.0, color: blue },
        ],
    };
    hold.validate().unwrap();
}

#[test]
fn hex_output_round_trips() {
    let c = ColorDef::hex("#0ea5e9").unwrap();
    assert_eq!(c.to_hex(), "#0ea5e9ff");
}
