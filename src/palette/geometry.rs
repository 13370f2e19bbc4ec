//! Geometry/style export: filled regions, holes and strokes into path records.

use crate::foundation::core::BezPath;
use crate::foundation::error::PublishResult;
use crate::foundation::math::{TWIPS_PER_PIXEL, scale_linear};
use crate::host::shape::{FilledRegion, FillStyle, Shape, StrokeBase, StrokeGroup};
use crate::model::resource::{BitmapPattern, Paint, PathKind, PathRecord, StrokeAttrs};
use crate::palette::gradient::{linear_gradient, radial_gradient};
use crate::palette::{ExportServices, ResourcePalette};

/// Thinnest stroke the player draws.
const MIN_STROKE_WIDTH: f64 = 0.1;

/// Boundary followed by its holes, each starting with a move-to.
///
/// `None` when the region has no boundary geometry.
pub(crate) fn region_path(region: &FilledRegion) -> Option<BezPath> {
    let boundary = region.boundary.as_ref().filter(|b| !b.edges.is_empty())?;
    let mut path = BezPath::new();
    boundary.append_to(&mut path);
    for hole in &region.holes {
        hole.append_to(&mut path);
    }
    Some(path)
}

pub(crate) fn stroke_attrs(base: &StrokeBase) -> StrokeAttrs {
    StrokeAttrs {
        width: base.thickness.max(MIN_STROKE_WIDTH),
        cap: base.cap,
        join: base.join,
        scale_type: base.scale_type,
        hinting: base.hinting,
    }
}

impl ResourcePalette {
    /// Export every path of `shape`: fills first, then strokes or their outlined fallback.
    pub(crate) fn export_shape_paths(
        &mut self,
        shape: &Shape,
        services: &mut ExportServices<'_>,
    ) -> PublishResult<Vec<PathRecord>> {
        let mut paths = self.export_fill_regions(&shape.regions, services)?;

        if shape.stroke_groups.is_empty() {
            return Ok(paths);
        }
        if !shape.has_outlined_strokes() {
            paths.extend(self.export_strokes(&shape.stroke_groups, services)?);
            return Ok(paths);
        }

        let Some(outliner) = services.shapes else {
            tracing::warn!("stroke-to-fill service unavailable; strokes skipped");
            return Ok(paths);
        };
        match outliner.convert_stroke_to_fill(shape) {
            Ok(outlined) => {
                paths.extend(self.export_fill_regions(&outlined.regions, services)?);
            }
            Err(e) if e.is_recoverable() => {
                tracing::warn!(error = %e, "stroke-to-fill failed; strokes skipped");
            }
            Err(e) => return Err(e),
        }
        Ok(paths)
    }

    fn export_fill_regions(
        &mut self,
        regions: &[FilledRegion],
        services: &mut ExportServices<'_>,
    ) -> PublishResult<Vec<PathRecord>> {
        let mut out = Vec::with_capacity(regions.len());
        for (i, region) in regions.iter().enumerate() {
            let Some(path) = region_path(region) else {
                tracing::warn!(region = i, "filled region without boundary skipped");
                continue;
            };
            let paint = self.export_fill_style(&region.fill, services)?;
            out.push(PathRecord {
                kind: PathKind::Fill,
                path,
                paint,
                stroke: None,
            });
        }
        Ok(out)
    }

    fn export_strokes(
        &mut self,
        groups: &[StrokeGroup],
        services: &mut ExportServices<'_>,
    ) -> PublishResult<Vec<PathRecord>> {
        let mut out = Vec::new();
        for group in groups {
            let base = group.style.base();
            let paint = self.export_fill_style(&base.fill, services)?;
            let attrs = stroke_attrs(base);
            for contour in &group.paths {
                if contour.edges.is_empty() {
                    continue;
                }
                let mut path = BezPath::new();
                contour.append_to(&mut path);
                out.push(PathRecord {
                    kind: PathKind::Stroke,
                    path,
                    paint: paint.clone(),
                    stroke: Some(attrs.clone()),
                });
            }
        }
        Ok(out)
    }

    /// Resolve a fill style into a paint. Bitmap fills materialize their image on first use.
    pub(crate) fn export_fill_style(
        &mut self,
        style: &FillStyle,
        services: &mut ExportServices<'_>,
    ) -> PublishResult<Paint> {
        Ok(match style {
            FillStyle::Solid { color } => Paint::Solid {
                color: *color,
                opacity: color.opacity(),
            },
            FillStyle::LinearGradient {
                spread,
                matrix,
                ramp,
            } => Paint::Linear(linear_gradient(*spread, *matrix, ramp)),
            FillStyle::RadialGradient {
                spread,
                matrix,
                focal_point,
                ramp,
            } => Paint::Radial(radial_gradient(*spread, *matrix, *focal_point, ramp)),
            FillStyle::Bitmap {
                clipped,
                matrix,
                item,
            } => {
                let path = self.media.bitmap(item, services)?;
                self.names.insert(item.name.clone());
                Paint::Pattern(BitmapPattern {
                    clipped: *clipped,
                    width: item.width,
                    height: item.height,
                    transform: scale_linear(*matrix, 1.0 / TWIPS_PER_PIXEL),
                    path,
                })
            }
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/palette/geometry.rs"]
mod tests;
