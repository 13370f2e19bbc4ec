//! Shape geometry and style descriptions supplied by the authoring host.
//!
//! Every style family is a closed enum; exporters match on it once.

use smallvec::SmallVec;

use crate::foundation::core::{Affine, BezPath, Color, Point};
use crate::foundation::math::{ramp_percent, unit_fraction};
use crate::host::media::MediaItem;

/// One edge of a region boundary, in output pixels.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Segment {
    /// Straight edge.
    Line {
        /// Start point.
        from: Point,
        /// End point.
        to: Point,
    },
    /// Quadratic Bezier edge.
    Quad {
        /// Start anchor.
        from: Point,
        /// Control point.
        control: Point,
        /// End anchor.
        to: Point,
    },
}

impl Segment {
    /// Start point of the edge.
    pub fn start(&self) -> Point {
        match *self {
            Segment::Line { from, .. } | Segment::Quad { from, .. } => from,
        }
    }

    /// End point of the edge.
    pub fn end(&self) -> Point {
        match *self {
            Segment::Line { to, .. } | Segment::Quad { to, .. } => to,
        }
    }
}

/// Ordered edge list forming one contour.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct EdgePath {
    /// Edges in drawing order.
    pub edges: Vec<Segment>,
}

impl EdgePath {
    /// Build an edge path.
    pub fn new(edges: Vec<Segment>) -> Self {
        Self { edges }
    }

    /// Closed polygon through `points` made of line edges.
    pub fn polygon(points: &[Point]) -> Self {
        let edges = points
            .iter()
            .zip(points.iter().cycle().skip(1))
            .map(|(&from, &to)| Segment::Line { from, to })
            .collect();
        Self { edges }
    }

    /// Append this contour to `path`.
    ///
    /// A move-to starts the contour and is repeated wherever an edge does not begin at the end
    /// of the previous one.
    pub fn append_to(&self, path: &mut BezPath) {
        let mut cursor: Option<Point> = None;
        for edge in &self.edges {
            if cursor != Some(edge.start()) {
                path.move_to(edge.start());
            }
            match *edge {
                Segment::Line { to, .. } => path.line_to(to),
                Segment::Quad { control, to, .. } => path.quad_to(control, to),
            }
            cursor = Some(edge.end());
        }
    }

    /// Open polyline through `points` made of line edges.
    pub fn polyline(points: &[Point]) -> Self {
        let edges = points
            .windows(2)
            .map(|w| Segment::Line {
                from: w[0],
                to: w[1],
            })
            .collect();
        Self { edges }
    }
}

/// Gradient spread behavior past the ramp ends.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpreadMode {
    /// Extend the end colors.
    #[default]
    Pad,
    /// Mirror the ramp.
    Reflect,
    /// Repeat the ramp.
    Repeat,
}

impl SpreadMode {
    /// Attribute value used by generated markup.
    pub fn as_str(self) -> &'static str {
        match self {
            SpreadMode::Pad => "pad",
            SpreadMode::Reflect => "reflect",
            SpreadMode::Repeat => "repeat",
        }
    }
}

/// One point of a host color ramp.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ColorPoint {
    /// Ramp position in `0..=255`.
    pub pos: u8,
    /// Color at this position.
    pub color: Color,
}

impl ColorPoint {
    /// Exported stop: position in percent, alpha as opacity.
    pub fn to_stop(self) -> GradientStop {
        GradientStop {
            offset: ramp_percent(self.pos),
            color: self.color,
            opacity: unit_fraction(self.color.a),
        }
    }
}

/// Host color ramp; gradients rarely carry more than a handful of points.
pub type ColorRamp = SmallVec<[ColorPoint; 4]>;

/// Exported gradient stop.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GradientStop {
    /// Offset in the `0..=100` percent domain.
    pub offset: f64,
    /// Stop color; alpha is carried by `opacity`.
    pub color: Color,
    /// Opacity in `0..=1`.
    pub opacity: f64,
}

/// Convert a host ramp into exported stops, keeping the ramp order.
pub fn ramp_stops(ramp: &[ColorPoint]) -> SmallVec<[GradientStop; 4]> {
    ramp.iter().map(|p| p.to_stop()).collect()
}

/// Fill style of a region or of a stroke's paint.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FillStyle {
    /// Flat color.
    Solid {
        /// Fill color including alpha.
        color: Color,
    },
    /// Linear gradient over the canonical gradient square.
    LinearGradient {
        /// Spread mode.
        #[serde(default)]
        spread: SpreadMode,
        /// Gradient matrix, in output pixels.
        #[serde(default)]
        matrix: Affine,
        /// Color ramp.
        ramp: ColorRamp,
    },
    /// Radial gradient over the canonical gradient square.
    RadialGradient {
        /// Spread mode.
        #[serde(default)]
        spread: SpreadMode,
        /// Gradient matrix, in output pixels.
        #[serde(default)]
        matrix: Affine,
        /// Focal point offset in `-255..=255` along the gradient axis.
        #[serde(default)]
        focal_point: i16,
        /// Color ramp.
        ramp: ColorRamp,
    },
    /// Bitmap pattern fill.
    Bitmap {
        /// `true` when the bitmap is clipped rather than tiled.
        #[serde(default)]
        clipped: bool,
        /// Bitmap matrix in authoring units.
        #[serde(default)]
        matrix: Affine,
        /// Library item providing the pixels.
        item: MediaItem,
    },
}

/// Stroke end cap.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CapStyle {
    /// No cap.
    None,
    /// Round cap.
    #[default]
    Round,
    /// Square cap.
    Square,
}

impl CapStyle {
    /// Markup `stroke-linecap` value.
    pub fn as_str(self) -> &'static str {
        match self {
            CapStyle::None => "butt",
            CapStyle::Round => "round",
            CapStyle::Square => "square",
        }
    }
}

/// Stroke corner join.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum JoinStyle {
    /// Round join.
    #[default]
    Round,
    /// Bevel join.
    Bevel,
    /// Miter join with a miter limit.
    Miter {
        /// Miter limit ratio.
        limit: f64,
    },
}

impl JoinStyle {
    /// Markup `stroke-linejoin` value.
    pub fn as_str(self) -> &'static str {
        match self {
            JoinStyle::Round => "round",
            JoinStyle::Bevel => "bevel",
            JoinStyle::Miter { .. } => "miter",
        }
    }

    /// Miter limit, only for miter joins.
    pub fn miter_limit(self) -> Option<f64> {
        match self {
            JoinStyle::Miter { limit } => Some(limit),
            _ => None,
        }
    }
}

/// How stroke thickness reacts to object scaling.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrokeScaleType {
    /// Scale with the object.
    #[default]
    Normal,
    /// Scale horizontally only.
    Horizontal,
    /// Scale vertically only.
    Vertical,
    /// Never scale.
    None,
}

impl StrokeScaleType {
    /// Markup `vector-effect` value; only strokes that never scale need one.
    pub fn vector_effect(self) -> Option<&'static str> {
        match self {
            StrokeScaleType::None => Some("non-scaling-stroke"),
            StrokeScaleType::Normal | StrokeScaleType::Horizontal | StrokeScaleType::Vertical => {
                None
            }
        }
    }
}

/// One control point of a variable-width stroke profile.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct WidthPoint {
    /// Position along the stroke in `0..=1`.
    pub position: f64,
    /// Width multiplier on the left side.
    pub left: f64,
    /// Width multiplier on the right side.
    pub right: f64,
}

/// Parameters every stroke kind shares.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StrokeBase {
    /// Stroke thickness in pixels.
    pub thickness: f64,
    /// Paint of the stroke.
    pub fill: FillStyle,
    /// End cap.
    #[serde(default)]
    pub cap: CapStyle,
    /// Corner join.
    #[serde(default)]
    pub join: JoinStyle,
    /// Scale behavior.
    #[serde(default)]
    pub scale_type: StrokeScaleType,
    /// Stroke hinting.
    #[serde(default)]
    pub hinting: bool,
}

/// Dash pattern of a dashed stroke.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DashPattern {
    /// First dash length.
    pub dash1: f64,
    /// First gap length.
    pub gap1: f64,
    /// Optional second dash length.
    #[serde(default)]
    pub dash2: Option<f64>,
    /// Optional second gap length.
    #[serde(default)]
    pub gap2: Option<f64>,
}

/// Stroke style of a stroke group.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StrokeStyle {
    /// Plain stroke, optionally with a variable width profile.
    Solid {
        /// Shared stroke parameters.
        #[serde(flatten)]
        base: StrokeBase,
        /// Variable width profile; present means the width varies along the stroke.
        #[serde(default)]
        variable_width: Option<Vec<WidthPoint>>,
    },
    /// Dashed stroke.
    Dashed {
        /// Shared stroke parameters.
        #[serde(flatten)]
        base: StrokeBase,
        /// Dash pattern.
        pattern: DashPattern,
    },
    /// Dotted stroke.
    Dotted {
        /// Shared stroke parameters.
        #[serde(flatten)]
        base: StrokeBase,
        /// Spacing between dots.
        dot_space: f64,
    },
    /// Hatched stroke.
    Hatched {
        /// Shared stroke parameters.
        #[serde(flatten)]
        base: StrokeBase,
    },
    /// Ragged stroke.
    Ragged {
        /// Shared stroke parameters.
        #[serde(flatten)]
        base: StrokeBase,
    },
    /// Stippled stroke.
    Stipple {
        /// Shared stroke parameters.
        #[serde(flatten)]
        base: StrokeBase,
    },
}

impl StrokeStyle {
    /// Shared parameters of any stroke kind.
    pub fn base(&self) -> &StrokeBase {
        match self {
            StrokeStyle::Solid { base, .. }
            | StrokeStyle::Dashed { base, .. }
            | StrokeStyle::Dotted { base, .. }
            | StrokeStyle::Hatched { base }
            | StrokeStyle::Ragged { base }
            | StrokeStyle::Stipple { base } => base,
        }
    }

    /// `true` when markup stroke attributes cannot express this stroke.
    ///
    /// Non-solid kinds and solid strokes with a variable width profile qualify.
    pub fn needs_outline(&self) -> bool {
        match self {
            StrokeStyle::Solid { variable_width, .. } => variable_width.is_some(),
            _ => true,
        }
    }
}

/// A filled region: one boundary contour plus zero or more holes.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FilledRegion {
    /// Region paint.
    pub fill: FillStyle,
    /// Outer contour; may be missing on malformed shapes.
    #[serde(default)]
    pub boundary: Option<EdgePath>,
    /// Hole contours.
    #[serde(default)]
    pub holes: Vec<EdgePath>,
}

/// Paths sharing one stroke style.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StrokeGroup {
    /// Stroke style.
    pub style: StrokeStyle,
    /// Stroked contours.
    pub paths: Vec<EdgePath>,
}

/// Vector shape geometry.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Shape {
    /// Filled regions in paint order.
    #[serde(default)]
    pub regions: Vec<FilledRegion>,
    /// Stroke groups painted above the fills.
    #[serde(default)]
    pub stroke_groups: Vec<StrokeGroup>,
}

impl Shape {
    /// `true` when any stroke group needs the stroke-to-fill fallback.
    pub fn has_outlined_strokes(&self) -> bool {
        self.stroke_groups.iter().any(|g| g.style.needs_outline())
    }
}

/// Host capability converting stroke geometry into filled outlines.
pub trait ShapeService {
    /// Return a shape whose filled regions cover the strokes of `shape`.
    ///
    /// The returned shape carries no stroke groups.
    fn convert_stroke_to_fill(&self, shape: &Shape) -> crate::PublishResult<Shape>;
}
