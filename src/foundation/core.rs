use crate::foundation::error::{PublishError, PublishResult};

pub use kurbo::{Affine, BezPath, PathEl, Point, Vec2};

/// Host-assigned resource identifier, unique per exported resource within one publish.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct ResourceId(pub u32);

impl ResourceId {
    /// Raw id `0`, used by the host to mean "no resource" (the main timeline).
    pub const NONE: ResourceId = ResourceId(0);

    /// Map the raw `0` sentinel to `None`.
    pub fn non_zero(self) -> Option<ResourceId> {
        (self.0 != 0).then_some(self)
    }
}

impl std::fmt::Display for ResourceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a placed display object instance on a timeline.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct ObjectId(pub u32);

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Timeline-local 0-based frame index.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct FrameIndex(pub u32);

/// Stacking target of a placed object.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stacking {
    /// No predecessor: the object goes to the bottom of its parent.
    Bottom,
    /// Directly above the object with this id.
    After(ObjectId),
}

impl From<ObjectId> for Stacking {
    /// Object id `0` is the host's "no predecessor" sentinel.
    fn from(id: ObjectId) -> Self {
        if id.0 == 0 {
            Stacking::Bottom
        } else {
            Stacking::After(id)
        }
    }
}

/// Straight (non-premultiplied) RGBA8 color.
///
/// Deserializes from either `{"r":..,"g":..,"b":..,"a":..}` (alpha defaults to 255) or a hex
/// string `"#rrggbb"` / `"#rrggbbaa"`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel, 255 is fully opaque.
    pub a: u8,
}

impl Color {
    /// Opaque black.
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    /// Opaque white.
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    /// Build an opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Build a color with explicit alpha.
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Lowercase `#rrggbb` string; alpha is carried separately as an opacity.
    pub fn hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Packed `0xRRGGBB` value.
    pub fn rgb_u32(self) -> u32 {
        (u32::from(self.r) << 16) | (u32::from(self.g) << 8) | u32::from(self.b)
    }

    /// Alpha as a `0..=1` fraction.
    pub fn opacity(self) -> f64 {
        f64::from(self.a) / 255.0
    }

    /// Parse `#rrggbb` or `#rrggbbaa` (the leading `#` is optional).
    pub fn from_hex(s: &str) -> PublishResult<Self> {
        let digits = s.strip_prefix('#').unwrap_or(s);
        if !(digits.len() == 6 || digits.len() == 8) || !digits.is_ascii() {
            return Err(PublishError::validation(format!(
                "color '{s}' must be #rrggbb or #rrggbbaa"
            )));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&digits[i..i + 2], 16)
                .map_err(|_| PublishError::validation(format!("color '{s}' is not hex")))
        };
        let a = if digits.len() == 8 { channel(6)? } else { 255 };
        Ok(Self::rgba(channel(0)?, channel(2)?, channel(4)?, a))
    }
}

impl<'de> serde::Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        fn opaque() -> u8 {
            255
        }

        #[derive(serde::Deserialize)]
        #[serde(untagged)]
        enum ColorDef {
            Hex(String),
            Parts {
                r: u8,
                g: u8,
                b: u8,
                #[serde(default = "opaque")]
                a: u8,
            },
        }

        match ColorDef::deserialize(deserializer)? {
            ColorDef::Hex(s) => Color::from_hex(&s).map_err(serde::de::Error::custom),
            ColorDef::Parts { r, g, b, a } => Ok(Color::rgba(r, g, b, a)),
        }
    }
}

/// Stage settings read from the document: size, background and playback rate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Stage {
    /// Stage width in pixels.
    pub width: u32,
    /// Stage height in pixels.
    pub height: u32,
    /// Background fill of the root container.
    pub background: Color,
    /// Playback rate in whole frames per second, always non-zero.
    pub fps: u32,
}

impl Stage {
    /// Build validated stage settings.
    pub fn new(width: u32, height: u32, background: Color, fps: u32) -> PublishResult<Self> {
        if fps == 0 {
            return Err(PublishError::validation("stage fps must be > 0"));
        }
        Ok(Self {
            width,
            height,
            background,
            fps,
        })
    }

    /// Build stage settings from a host frame rate, truncating fractional rates.
    pub fn from_frame_rate(
        width: u32,
        height: u32,
        background: Color,
        frame_rate: f64,
    ) -> PublishResult<Self> {
        if !frame_rate.is_finite() || frame_rate < 1.0 {
            return Err(PublishError::validation(format!(
                "frame rate {frame_rate} must be a finite value >= 1"
            )));
        }
        Self::new(width, height, background, frame_rate as u32)
    }
}

/// Format a number for generated text: at most 4 decimals, trailing zeros trimmed.
pub fn fmt_num(v: f64) -> String {
    if !v.is_finite() {
        return "0".to_string();
    }
    let mut s = format!("{v:.4}");
    if s.contains('.') {
        let trimmed = s.trim_end_matches('0').trim_end_matches('.').len();
        s.truncate(trimmed);
    }
    if s == "-0" {
        s = "0".to_string();
    }
    s
}

/// Comma-separated `a,b,c,d,tx,ty` coefficients of an affine matrix.
pub fn fmt_matrix(m: Affine) -> String {
    m.as_coeffs()
        .iter()
        .map(|v| fmt_num(*v))
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
