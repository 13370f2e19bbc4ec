//! Display-object filters attached through `UpdateFilter` commands.

use crate::foundation::core::Color;
use crate::host::shape::ColorRamp;

/// Filter render quality.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterQuality {
    /// One pass.
    #[default]
    Low,
    /// Two passes.
    Medium,
    /// Three passes.
    High,
}

/// Where a glow or bevel is drawn relative to the object.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterPlacement {
    /// Inside the object outline.
    Inner,
    /// Outside the object outline.
    #[default]
    Outer,
    /// Both sides.
    Full,
}

fn enabled() -> bool {
    true
}

/// Drop shadow parameters.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DropShadowFilter {
    /// Filter is active.
    #[serde(default = "enabled")]
    pub enabled: bool,
    /// Shadow angle in degrees.
    pub angle: f64,
    /// Horizontal blur.
    pub blur_x: f64,
    /// Vertical blur.
    pub blur_y: f64,
    /// Shadow offset distance.
    pub distance: f64,
    /// Hide the object, keep only the shadow.
    #[serde(default)]
    pub hide_object: bool,
    /// Inner shadow.
    #[serde(default)]
    pub inner_shadow: bool,
    /// Knockout.
    #[serde(default)]
    pub knockout: bool,
    /// Render quality.
    #[serde(default)]
    pub quality: FilterQuality,
    /// Strength in percent.
    pub strength: f64,
    /// Shadow color.
    pub color: Color,
}

/// Blur parameters.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BlurFilter {
    /// Filter is active.
    #[serde(default = "enabled")]
    pub enabled: bool,
    /// Horizontal blur.
    pub blur_x: f64,
    /// Vertical blur.
    pub blur_y: f64,
    /// Render quality.
    #[serde(default)]
    pub quality: FilterQuality,
}

/// Glow parameters.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GlowFilter {
    /// Filter is active.
    #[serde(default = "enabled")]
    pub enabled: bool,
    /// Horizontal blur.
    pub blur_x: f64,
    /// Vertical blur.
    pub blur_y: f64,
    /// Inner glow.
    #[serde(default)]
    pub inner_shadow: bool,
    /// Knockout.
    #[serde(default)]
    pub knockout: bool,
    /// Render quality.
    #[serde(default)]
    pub quality: FilterQuality,
    /// Strength in percent.
    pub strength: f64,
    /// Glow color.
    pub color: Color,
}

/// Bevel parameters.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BevelFilter {
    /// Filter is active.
    #[serde(default = "enabled")]
    pub enabled: bool,
    /// Light angle in degrees.
    pub angle: f64,
    /// Horizontal blur.
    pub blur_x: f64,
    /// Vertical blur.
    pub blur_y: f64,
    /// Bevel distance.
    pub distance: f64,
    /// Highlight color.
    pub highlight_color: Color,
    /// Knockout.
    #[serde(default)]
    pub knockout: bool,
    /// Render quality.
    #[serde(default)]
    pub quality: FilterQuality,
    /// Strength in percent.
    pub strength: f64,
    /// Shadow color.
    pub shadow_color: Color,
    /// Bevel placement.
    #[serde(default)]
    pub placement: FilterPlacement,
}

/// Parameters shared by the gradient glow and gradient bevel filters.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GradientFilter {
    /// Filter is active.
    #[serde(default = "enabled")]
    pub enabled: bool,
    /// Angle in degrees.
    pub angle: f64,
    /// Horizontal blur.
    pub blur_x: f64,
    /// Vertical blur.
    pub blur_y: f64,
    /// Distance.
    pub distance: f64,
    /// Knockout.
    #[serde(default)]
    pub knockout: bool,
    /// Render quality.
    #[serde(default)]
    pub quality: FilterQuality,
    /// Strength in percent.
    pub strength: f64,
    /// Placement.
    #[serde(default)]
    pub placement: FilterPlacement,
    /// Color ramp.
    pub ramp: ColorRamp,
}

/// Color adjustment parameters.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AdjustColorFilter {
    /// Filter is active.
    #[serde(default = "enabled")]
    pub enabled: bool,
    /// Brightness adjustment.
    pub brightness: f64,
    /// Contrast adjustment.
    pub contrast: f64,
    /// Saturation adjustment.
    pub saturation: f64,
    /// Hue rotation.
    pub hue: f64,
}

/// Closed set of filter kinds.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Filter {
    /// Drop shadow.
    DropShadow(DropShadowFilter),
    /// Blur.
    Blur(BlurFilter),
    /// Glow.
    Glow(GlowFilter),
    /// Bevel.
    Bevel(BevelFilter),
    /// Gradient glow.
    GradientGlow(GradientFilter),
    /// Gradient bevel.
    GradientBevel(GradientFilter),
    /// Color adjustment.
    AdjustColor(AdjustColorFilter),
}

impl Filter {
    /// Stable kind name.
    pub fn name(&self) -> &'static str {
        match self {
            Filter::DropShadow(_) => "DropShadowFilter",
            Filter::Blur(_) => "BlurFilter",
            Filter::Glow(_) => "GlowFilter",
            Filter::Bevel(_) => "BevelFilter",
            Filter::GradientGlow(_) => "GradientGlowFilter",
            Filter::GradientBevel(_) => "GradientBevelFilter",
            Filter::AdjustColor(_) => "AdjustColorFilter",
        }
    }

    /// Whether the filter is switched on.
    pub fn enabled(&self) -> bool {
        match self {
            Filter::DropShadow(f) => f.enabled,
            Filter::Blur(f) => f.enabled,
            Filter::Glow(f) => f.enabled,
            Filter::Bevel(f) => f.enabled,
            Filter::GradientGlow(f) | Filter::GradientBevel(f) => f.enabled,
            Filter::AdjustColor(f) => f.enabled,
        }
    }

    /// Color ramp of the gradient variants.
    pub fn ramp(&self) -> Option<&ColorRamp> {
        match self {
            Filter::GradientGlow(f) | Filter::GradientBevel(f) => Some(&f.ramp),
            _ => None,
        }
    }
}
