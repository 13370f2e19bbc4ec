use crate::foundation::core::Color;

/// Runtime behavior of a classic text field.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextBehavior {
    /// Fixed text baked at authoring time.
    #[default]
    Static,
    /// Text that can be changed at runtime.
    Dynamic,
    /// Text the user can type into.
    Input,
}

/// Font style of a text run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontStyle {
    /// Regular face.
    #[default]
    Regular,
    /// Bold face.
    Bold,
    /// Italic face.
    Italic,
    /// Bold italic face.
    BoldItalic,
}

/// Styling of one run of characters.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TextRun {
    /// Font family name.
    pub font_name: String,
    /// Font style.
    #[serde(default)]
    pub font_style: FontStyle,
    /// Font size in pixels.
    pub font_size: u32,
    /// Text color.
    #[serde(default = "default_run_color")]
    pub color: Color,
}

fn default_run_color() -> Color {
    Color::BLACK
}

/// Paragraph of a classic text field.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Paragraph {
    /// Runs in reading order.
    #[serde(default)]
    pub runs: Vec<TextRun>,
}

/// Classic text field as described by the host.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ClassicText {
    /// Runtime behavior.
    #[serde(default)]
    pub behavior: TextBehavior,
    /// Literal text content.
    #[serde(default)]
    pub text: String,
    /// Paragraph styling.
    #[serde(default)]
    pub paragraphs: Vec<Paragraph>,
}

impl ClassicText {
    /// Last run of the last paragraph that has runs.
    pub fn last_run(&self) -> Option<&TextRun> {
        self.paragraphs.iter().rev().find_map(|p| p.runs.last())
    }
}
