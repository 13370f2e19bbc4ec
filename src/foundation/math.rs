use crate::foundation::core::Affine;

/// Half-extent of the canonical gradient square in authoring units (twips).
pub(crate) const GRADIENT_VECTOR_CONSTANT: f64 = 16384.0;

/// Authoring units per output pixel.
pub(crate) const TWIPS_PER_PIXEL: f64 = 20.0;

/// Canonical gradient half-extent in output pixels (`16384 / 20`).
pub(crate) fn gradient_half_extent() -> f64 {
    GRADIENT_VECTOR_CONSTANT / TWIPS_PER_PIXEL
}

/// Scale the linear part (`a, b, c, d`) of `m` by `s`, keeping the translation.
pub(crate) fn scale_linear(m: Affine, s: f64) -> Affine {
    let [a, b, c, d, tx, ty] = m.as_coeffs();
    Affine::new([a * s, b * s, c * s, d * s, tx, ty])
}

/// Map an 8-bit ramp position (`0..=255`) into the `0..=100` percent domain.
pub(crate) fn ramp_percent(position: u8) -> f64 {
    f64::from(position) * 100.0 / 255.0
}

/// Map an 8-bit value (`0..=255`) into `0..=1`.
pub(crate) fn unit_fraction(v: u8) -> f64 {
    f64::from(v) / 255.0
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
