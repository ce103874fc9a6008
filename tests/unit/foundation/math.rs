use super::*;

#[test]
fn fnv_is_stable_across_split_writes() {
    let mut a = Fnv1a64::new_default();
    a.write_bytes(b"stage");
    let mut b = Fnv1a64::new_default();
    b.write_u8(b's');
    b.write_bytes(b"tage");
    assert_eq!(a.finish(), b.finish());
}

#[test]
fn fnv_str_is_length_prefixed() {
    let mut a = Fnv1a64::new_default();
    a.write_str("ab");
    a.write_str("c");
    let mut b = Fnv1a64::new_default();
    b.write_str("a");
    b.write_str("bc");
    assert_ne!(a.finish(), b.finish());
}

#[test]
fn inverse_lerp_clamps_and_handles_degenerate_span() {
    assert_eq!(inverse_lerp_clamped(0.0, 2.0, 1.0), 0.5);
    assert_eq!(inverse_lerp_clamped(0.0, 2.0, 5.0), 1.0);
    assert_eq!(inverse_lerp_clamped(1.0, 1.0, 1.0), 0.0);
    assert_eq!(lerp(2.0, 4.0, 0.25), 2.5);
}
