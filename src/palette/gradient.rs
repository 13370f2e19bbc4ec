use crate::foundation::core::{Affine, Point};
use crate::foundation::math::{gradient_half_extent, scale_linear};
use crate::host::shape::{ColorPoint, SpreadMode, ramp_stops};
use crate::model::resource::{LinearGradient, RadialGradient};

/// Linear gradient endpoints: the canonical `(-h, 0)` and `(h, 0)` points mapped through `matrix`,
/// with `h = 16384 / 20`.
pub(crate) fn linear_gradient(
    spread: SpreadMode,
    matrix: Affine,
    ramp: &[ColorPoint],
) -> LinearGradient {
    let h = gradient_half_extent();
    let p1 = matrix * Point::new(-h, 0.0);
    let p2 = matrix * Point::new(h, 0.0);
    LinearGradient {
        spread,
        x1: p1.x,
        y1: p1.y,
        x2: p2.x,
        y2: p2.y,
        stops: ramp_stops(ramp),
    }
}

/// Radial gradient circle.
///
/// The radius is the distance between the mapped origin and the mapped `(h, 0)`. The focal point
/// sits `focal / 255` of that radius from the center, against the matrix's rotation. The gradient
/// transform is `matrix` with its linear part normalized by `h / r`.
pub(crate) fn radial_gradient(
    spread: SpreadMode,
    matrix: Affine,
    focal_point: i16,
    ramp: &[ColorPoint],
) -> RadialGradient {
    let h = gradient_half_extent();
    let p1 = matrix * Point::ZERO;
    let p2 = matrix * Point::new(h, 0.0);
    let xd = p1.x - p2.x;
    let yd = p1.y - p2.y;
    let r = xd.hypot(yd);
    let angle = yd.atan2(xd);
    let ratio = f64::from(focal_point) / 255.0;

    let transform = if r > f64::EPSILON {
        scale_linear(matrix, h / r)
    } else {
        tracing::warn!("degenerate radial gradient matrix");
        matrix
    };

    RadialGradient {
        spread,
        cx: 0.0,
        cy: 0.0,
        r,
        fx: -r * ratio * angle.cos(),
        fy: -r * ratio * angle.sin(),
        transform,
        stops: ramp_stops(ramp),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/palette/gradient.rs"]
mod tests;
