use super::*;

#[test]
fn half_extent_is_vector_constant_in_pixels() {
    assert_eq!(gradient_half_extent(), 819.2);
}

#[test]
fn scale_linear_keeps_translation() {
    let m = Affine::new([1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    assert_eq!(
        scale_linear(m, 0.5).as_coeffs(),
        [0.5, 1.0, 1.5, 2.0, 5.0, 6.0]
    );
}

#[test]
fn ramp_percent_spans_zero_to_hundred() {
    assert_eq!(ramp_percent(0), 0.0);
    assert_eq!(ramp_percent(255), 100.0);
    let mid = ramp_percent(128);
    assert!(mid > 50.0 && mid < 50.3);
}

#[test]
fn unit_fraction_endpoints() {
    assert_eq!(unit_fraction(0), 0.0);
    assert_eq!(unit_fraction(255), 1.0);
}
