use kurbo::{Cap, CubicBez, Join, Stroke, StrokeOpts};
use smallvec::{SmallVec, smallvec};

use crate::foundation::core::{BezPath, PathEl, Point};
use crate::foundation::error::{PublishError, PublishResult};
use crate::host::shape::{
    CapStyle, EdgePath, FilledRegion, JoinStyle, Segment, Shape, ShapeService, StrokeStyle,
};

/// [`ShapeService`] that outlines strokes with `kurbo::stroke`.
///
/// Cubic segments of the outline are approximated by quadratics so the result stays within the
/// line/quad edge model.
#[derive(Clone, Copy, Debug)]
pub struct OutlineShapeService {
    tolerance: f64,
}

impl Default for OutlineShapeService {
    fn default() -> Self {
        Self { tolerance: 0.1 }
    }
}

impl ShapeService for OutlineShapeService {
    fn convert_stroke_to_fill(&self, shape: &Shape) -> PublishResult<Shape> {
        let mut regions = Vec::new();
        for group in &shape.stroke_groups {
            let stroke = match kurbo_stroke(&group.style, self.tolerance) {
                Ok(stroke) => stroke,
                Err(e) if e.is_recoverable() => {
                    tracing::warn!(error = %e, "stroke group skipped");
                    continue;
                }
                Err(e) => return Err(e),
            };
            for contour in &group.paths {
                let mut path = BezPath::new();
                contour.append_to(&mut path);
                let outline = kurbo::stroke(path, &stroke, &StrokeOpts::default(), self.tolerance);
                let mut contours = split_contours(&outline, self.tolerance).into_iter();
                let Some(boundary) = contours.next() else {
                    continue;
                };
                regions.push(FilledRegion {
                    fill: group.style.base().fill.clone(),
                    boundary: Some(boundary),
                    holes: contours.collect(),
                });
            }
        }
        Ok(Shape {
            regions,
            stroke_groups: Vec::new(),
        })
    }
}

/// Dash and gap lengths of `style` at stroke width `width`; empty for continuous strokes.
fn dash_array(style: &StrokeStyle, width: f64) -> SmallVec<[f64; 4]> {
    match style {
        StrokeStyle::Dashed { pattern, .. } => {
            let mut dashes: SmallVec<[f64; 4]> = smallvec![pattern.dash1, pattern.gap1];
            if let (Some(d2), Some(g2)) = (pattern.dash2, pattern.gap2) {
                dashes.extend([d2, g2]);
            }
            dashes
        }
        StrokeStyle::Dotted { dot_space, .. } => smallvec![width * 0.01, dot_space + width],
        _ => SmallVec::new(),
    }
}

/// A dash pattern kurbo can walk: finite non-negative lengths whose period reaches `min_period`.
fn dashes_usable(dashes: &[f64], min_period: f64) -> bool {
    dashes.iter().all(|d| d.is_finite() && *d >= 0.0) && dashes.iter().sum::<f64>() >= min_period
}

fn kurbo_stroke(style: &StrokeStyle, min_period: f64) -> PublishResult<Stroke> {
    let base = style.base();
    let mut width = base.thickness.max(0.1);
    if let StrokeStyle::Solid {
        variable_width: Some(profile),
        ..
    } = style
    {
        let widest = profile
            .iter()
            .map(|p| p.left.max(p.right))
            .fold(1.0_f64, f64::max);
        width *= widest;
    }
    if !width.is_finite() {
        return Err(PublishError::geometry_missing(format!(
            "stroke width {width} cannot be outlined"
        )));
    }

    let cap = match base.cap {
        CapStyle::None => Cap::Butt,
        CapStyle::Round => Cap::Round,
        CapStyle::Square => Cap::Square,
    };
    let mut stroke = Stroke::new(width).with_caps(cap);
    stroke = match base.join {
        JoinStyle::Round => stroke.with_join(Join::Round),
        JoinStyle::Bevel => stroke.with_join(Join::Bevel),
        JoinStyle::Miter { limit } => stroke.with_join(Join::Miter).with_miter_limit(limit),
    };

    let dashes = dash_array(style, width);
    if dashes.is_empty() {
        return Ok(stroke);
    }
    if !dashes_usable(&dashes, min_period) {
        return Err(PublishError::geometry_missing(format!(
            "dash pattern {dashes:?} has no usable period"
        )));
    }
    if matches!(style, StrokeStyle::Dotted { .. }) {
        stroke = stroke.with_caps(Cap::Round);
    }
    Ok(stroke.with_dashes(0.0, dashes))
}

/// Split an outline into line/quad contours, closing each one explicitly.
fn split_contours(outline: &BezPath, tolerance: f64) -> Vec<EdgePath> {
    let mut out = Vec::new();
    let mut edges: Vec<Segment> = Vec::new();
    let mut start = Point::ZERO;
    let mut cur = Point::ZERO;

    let mut flush = |edges: &mut Vec<Segment>, start: Point, cur: Point| {
        if edges.is_empty() {
            return;
        }
        if cur != start {
            edges.push(Segment::Line {
                from: cur,
                to: start,
            });
        }
        out.push(EdgePath::new(std::mem::take(edges)));
    };

    for el in outline.elements() {
        match *el {
            PathEl::MoveTo(p) => {
                flush(&mut edges, start, cur);
                start = p;
                cur = p;
            }
            PathEl::LineTo(p) => {
                edges.push(Segment::Line { from: cur, to: p });
                cur = p;
            }
            PathEl::QuadTo(c, p) => {
                edges.push(Segment::Quad {
                    from: cur,
                    control: c,
                    to: p,
                });
                cur = p;
            }
            PathEl::CurveTo(c1, c2, p) => {
                let cubic = CubicBez::new(cur, c1, c2, p);
                for (_, _, q) in cubic.to_quads(tolerance) {
                    edges.push(Segment::Quad {
                        from: q.p0,
                        control: q.p1,
                        to: q.p2,
                    });
                }
                cur = p;
            }
            PathEl::ClosePath => {
                flush(&mut edges, start, cur);
                cur = start;
            }
        }
    }
    flush(&mut edges, start, cur);
    out
}

#[cfg(test)]
#[path = "../../tests/unit/host/outline.rs"]
mod tests;
