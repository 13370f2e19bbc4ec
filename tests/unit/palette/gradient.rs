use super::*;
use crate::foundation::core::{Color, fmt_num};

fn ramp() -> Vec<ColorPoint> {
    vec![
        ColorPoint {
            pos: 0,
            color: Color::WHITE,
        },
        ColorPoint {
            pos: 255,
            color: Color::BLACK,
        },
    ]
}

#[test]
fn identity_linear_gradient_uses_canonical_endpoints() {
    let g = linear_gradient(SpreadMode::Pad, Affine::IDENTITY, &ramp());
    assert_eq!(fmt_num(g.x1), "-819.2");
    assert_eq!(fmt_num(g.y1), "0");
    assert_eq!(fmt_num(g.x2), "819.2");
    assert_eq!(fmt_num(g.y2), "0");

    let offsets: Vec<_> = g.stops.iter().map(|s| fmt_num(s.offset)).collect();
    assert_eq!(offsets, vec!["0", "100"]);
    assert_eq!(g.stops[0].color, Color::WHITE);
}

#[test]
fn linear_gradient_follows_matrix() {
    let m = Affine::translate((10.0, 20.0)) * Affine::scale(0.1);
    let g = linear_gradient(SpreadMode::Reflect, m, &ramp());
    assert!((g.x1 - (10.0 - 81.92)).abs() < 1e-9);
    assert!((g.x2 - (10.0 + 81.92)).abs() < 1e-9);
    assert!((g.y1 - 20.0).abs() < 1e-9);
    assert_eq!(g.spread, SpreadMode::Reflect);
}

#[test]
fn stop_offsets_stay_in_percent_domain_and_ordered() {
    let ramp: Vec<_> = [0u8, 17, 128, 200, 255]
        .into_iter()
        .map(|pos| ColorPoint {
            pos,
            color: Color::rgba(1, 2, 3, pos),
        })
        .collect();
    let g = linear_gradient(SpreadMode::Pad, Affine::IDENTITY, &ramp);
    for w in g.stops.windows(2) {
        assert!(w[0].offset <= w[1].offset);
    }
    for s in &g.stops {
        assert!((0.0..=100.0).contains(&s.offset));
        assert!((0.0..=1.0).contains(&s.opacity));
    }
}

#[test]
fn radial_gradient_radius_and_focal_point() {
    let m = Affine::scale(0.5);
    let g = radial_gradient(SpreadMode::Pad, m, 255, &ramp());
    assert!((g.r - 409.6).abs() < 1e-9);
    // Mapped (h, 0) lies at +x, so the focal point moves toward +x by the full radius.
    assert!((g.fx - 409.6).abs() < 1e-9);
    assert!(g.fy.abs() < 1e-9);
    assert_eq!(g.cx, 0.0);
    assert_eq!(g.cy, 0.0);
    // The normalized transform maps the radius back onto the canonical extent.
    let [a, b, c, d, _, _] = g.transform.as_coeffs();
    assert!((a - 1.0).abs() < 1e-9 && b.abs() < 1e-9 && c.abs() < 1e-9 && (d - 1.0).abs() < 1e-9);
}

#[test]
fn radial_gradient_keeps_translation() {
    let m = Affine::translate((30.0, 40.0)) * Affine::scale(0.25);
    let g = radial_gradient(SpreadMode::Repeat, m, 0, &ramp());
    let [.., tx, ty] = g.transform.as_coeffs();
    assert_eq!((tx, ty), (30.0, 40.0));
    assert!(g.fx.abs() < 1e-9 && g.fy.abs() < 1e-9);
}

#[test]
fn degenerate_radial_matrix_does_not_panic() {
    let g = radial_gradient(SpreadMode::Pad, Affine::scale(0.0), 10, &ramp());
    assert_eq!(g.r, 0.0);
    assert!(g.transform.as_coeffs().iter().all(|v| v.is_finite()));
}
