use smallvec::SmallVec;

use crate::foundation::core::{Affine, BezPath, Color, PathEl, ResourceId, fmt_num};
use crate::host::shape::{CapStyle, GradientStop, JoinStyle, SpreadMode, StrokeScaleType};
use crate::host::text::{FontStyle, TextBehavior};

/// Whether a path is painted as an area or as an outline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PathKind {
    /// Filled area.
    Fill,
    /// Stroked outline.
    Stroke,
}

/// Linear gradient geometry in output pixels.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LinearGradient {
    /// Spread mode.
    pub spread: SpreadMode,
    /// Start x.
    pub x1: f64,
    /// Start y.
    pub y1: f64,
    /// End x.
    pub x2: f64,
    /// End y.
    pub y2: f64,
    /// Stops in ramp order.
    pub stops: SmallVec<[GradientStop; 4]>,
}

/// Radial gradient geometry: a circle at the origin of `transform` space.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RadialGradient {
    /// Spread mode.
    pub spread: SpreadMode,
    /// Center x.
    pub cx: f64,
    /// Center y.
    pub cy: f64,
    /// Radius.
    pub r: f64,
    /// Focal point x.
    pub fx: f64,
    /// Focal point y.
    pub fy: f64,
    /// Gradient transform.
    pub transform: Affine,
    /// Stops in ramp order.
    pub stops: SmallVec<[GradientStop; 4]>,
}

/// Bitmap pattern paint.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BitmapPattern {
    /// `true` when clipped rather than tiled.
    pub clipped: bool,
    /// Pattern width in pixels.
    pub width: u32,
    /// Pattern height in pixels.
    pub height: u32,
    /// Pattern transform in output pixels.
    pub transform: Affine,
    /// Relative path of the exported image, if it was materialized.
    pub path: Option<String>,
}

/// Paint of a path.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Paint {
    /// Flat color.
    Solid {
        /// Color; alpha is carried by `opacity`.
        color: Color,
        /// Opacity in `0..=1`.
        opacity: f64,
    },
    /// Linear gradient.
    Linear(LinearGradient),
    /// Radial gradient.
    Radial(RadialGradient),
    /// Bitmap pattern.
    Pattern(BitmapPattern),
}

impl Paint {
    /// Opacity string of a solid paint.
    pub fn color_opacity(&self) -> Option<String> {
        match self {
            Paint::Solid { opacity, .. } => Some(fmt_num(*opacity)),
            _ => None,
        }
    }
}

/// Stroke attributes of a stroke path.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StrokeAttrs {
    /// Stroke width in pixels, at least `0.1`.
    pub width: f64,
    /// End cap.
    pub cap: CapStyle,
    /// Corner join; the miter limit rides on miter joins.
    pub join: JoinStyle,
    /// Scale behavior.
    pub scale_type: StrokeScaleType,
    /// Stroke hinting.
    pub hinting: bool,
}

/// One exported path with its paint.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PathRecord {
    /// Fill or stroke.
    pub kind: PathKind,
    /// Drawing commands (move, line, quadratic only).
    pub path: BezPath,
    /// Paint.
    pub paint: Paint,
    /// Stroke attributes, present exactly for stroke paths.
    pub stroke: Option<StrokeAttrs>,
}

impl PathRecord {
    /// Path data string: `M x y L x y Q cx cy x y ...`.
    pub fn svg_d(&self) -> String {
        let mut parts: Vec<String> = Vec::new();
        for el in self.path.elements() {
            match *el {
                PathEl::MoveTo(p) => parts.push(format!("M {} {}", fmt_num(p.x), fmt_num(p.y))),
                PathEl::LineTo(p) => parts.push(format!("L {} {}", fmt_num(p.x), fmt_num(p.y))),
                PathEl::QuadTo(c, p) => parts.push(format!(
                    "Q {} {} {} {}",
                    fmt_num(c.x),
                    fmt_num(c.y),
                    fmt_num(p.x),
                    fmt_num(p.y)
                )),
                PathEl::CurveTo(c1, c2, p) => parts.push(format!(
                    "C {} {} {} {} {} {}",
                    fmt_num(c1.x),
                    fmt_num(c1.y),
                    fmt_num(c2.x),
                    fmt_num(c2.y),
                    fmt_num(p.x),
                    fmt_num(p.y)
                )),
                PathEl::ClosePath => parts.push("Z".to_string()),
            }
        }
        parts.join(" ")
    }
}

/// Exported shape.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ShapeResource {
    /// Resource id.
    pub id: ResourceId,
    /// Library name.
    pub name: Option<String>,
    /// Fill paths first, then stroke paths.
    pub paths: Vec<PathRecord>,
}

/// Exported bitmap.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct BitmapResource {
    /// Resource id.
    pub id: ResourceId,
    /// Library name.
    pub name: Option<String>,
    /// Pixel width.
    pub width: u32,
    /// Pixel height.
    pub height: u32,
    /// Relative path of the exported image, if it was materialized.
    pub path: Option<String>,
}

/// Exported sound.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SoundResource {
    /// Resource id.
    pub id: ResourceId,
    /// Library name.
    pub name: Option<String>,
    /// Relative path of the exported audio, if it was materialized.
    pub path: Option<String>,
}

/// Font of a text resource.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FontDescriptor {
    /// Family name.
    pub family: String,
    /// Style.
    pub style: FontStyle,
    /// Size in pixels.
    pub size: u32,
}

/// Exported classic text.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TextResource {
    /// Resource id.
    pub id: ResourceId,
    /// Library name.
    pub name: Option<String>,
    /// Runtime behavior of the source field.
    pub behavior: TextBehavior,
    /// Font, when styling was read.
    pub font: Option<FontDescriptor>,
    /// CSS-like font shorthand, e.g. `"bold 12px 'Arial'"`; empty when styling was not read.
    pub font_shorthand: String,
    /// Text color.
    pub color: Color,
    /// Literal text with backslashes doubled and carriage returns escaped as `\r`.
    pub text: String,
}

/// Any exported resource.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResourceRecord {
    /// Shape.
    Shape(ShapeResource),
    /// Bitmap.
    Bitmap(BitmapResource),
    /// Sound.
    Sound(SoundResource),
    /// Text.
    Text(TextResource),
}

impl ResourceRecord {
    /// Resource id of the record.
    pub fn id(&self) -> ResourceId {
        match self {
            ResourceRecord::Shape(r) => r.id,
            ResourceRecord::Bitmap(r) => r.id,
            ResourceRecord::Sound(r) => r.id,
            ResourceRecord::Text(r) => r.id,
        }
    }
}

/// Exported resources partitioned by kind, each in creation order.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ResourceSet {
    /// Shapes.
    pub shapes: Vec<ShapeResource>,
    /// Bitmaps.
    pub bitmaps: Vec<BitmapResource>,
    /// Sounds.
    pub sounds: Vec<SoundResource>,
    /// Texts.
    pub texts: Vec<TextResource>,
}

impl ResourceSet {
    /// File a record under its kind.
    pub fn push(&mut self, record: ResourceRecord) {
        match record {
            ResourceRecord::Shape(r) => self.shapes.push(r),
            ResourceRecord::Bitmap(r) => self.bitmaps.push(r),
            ResourceRecord::Sound(r) => self.sounds.push(r),
            ResourceRecord::Text(r) => self.texts.push(r),
        }
    }

    /// Total number of records.
    pub fn len(&self) -> usize {
        self.shapes.len() + self.bitmaps.len() + self.sounds.len() + self.texts.len()
    }

    /// `true` when no record exists.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Find a shape by id.
    pub fn shape(&self, id: ResourceId) -> Option<&ShapeResource> {
        self.shapes.iter().find(|s| s.id == id)
    }

    /// Find a bitmap by id.
    pub fn bitmap(&self, id: ResourceId) -> Option<&BitmapResource> {
        self.bitmaps.iter().find(|s| s.id == id)
    }

    /// Find a sound by id.
    pub fn sound(&self, id: ResourceId) -> Option<&SoundResource> {
        self.sounds.iter().find(|s| s.id == id)
    }

    /// Find a text by id.
    pub fn text(&self, id: ResourceId) -> Option<&TextResource> {
        self.texts.iter().find(|s| s.id == id)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/resource.rs"]
mod tests;
