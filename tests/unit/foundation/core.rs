use super::*;

#[test]
fn progress_clamps_out_of_range() {
    assert_eq!(Progress::new(-0.5).unwrap(), Progress::ZERO);
    assert_eq!(Progress::new(7.0).unwrap(), Progress::ONE);
    assert_eq!(Progress::new(0.25).unwrap().get(), 0.25);
}

#[test]
fn progress_rejects_non_finite() {
    assert!(Progress::new(f64::NAN).is_none());
    assert!(Progress::new(f64::INFINITY).is_none());
    assert!(Progress::new(f64::NEG_INFINITY).is_none());
    let fallback = Progress::new(0.4).unwrap();
    assert_eq!(Progress::new_or(f64::NAN, fallback), fallback);
}

#[test]
fn progress_serde_clamps_on_load() {
    let p: Progress = serde_json::from_str("1.5").unwrap();
    assert_eq!(p, Progress::ONE);
    assert_eq!(serde_json::to_string(&p).unwrap(), "1.0");
}

#[test]
fn vec3_lerp_midpoint() {
    let a = Vec3::new(0.0, 2.0, -4.0);
    let b = Vec3::new(10.0, 4.0, 4.0);
    assert_eq!(a.lerp(b, 0.5), Vec3::new(5.0, 3.0, 0.0));
    assert!(!Vec3::new(f64::NAN, 0.0, 0.0).is_finite());
}
