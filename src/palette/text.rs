use crate::foundation::core::{Color, ResourceId};
use crate::host::text::{ClassicText, FontStyle, TextBehavior};
use crate::model::resource::{FontDescriptor, TextResource};

/// CSS font-style/weight prefix of a font shorthand.
pub(crate) fn style_prefix(style: FontStyle) -> &'static str {
    match style {
        FontStyle::BoldItalic => "italic bold",
        FontStyle::Bold => "bold",
        FontStyle::Italic => "italic",
        FontStyle::Regular => "",
    }
}

/// `"<style> <size>px '<family>'"`, without a leading space for regular faces.
pub(crate) fn font_shorthand(font: &FontDescriptor) -> String {
    let size = format!("{}px '{}'", font.size, font.family);
    match style_prefix(font.style) {
        "" => size,
        prefix => format!("{prefix} {size}"),
    }
}

/// Doubles backslashes, then writes carriage returns as `\r`, so the encoding can be reversed.
pub(crate) fn escape_carriage_returns(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\r' => out.push_str("\\r"),
            c => out.push(c),
        }
    }
    out
}

/// Build a text record. Styling and content are only read from dynamic fields.
pub(crate) fn text_resource(id: ResourceId, name: Option<&str>, text: &ClassicText) -> TextResource {
    let dynamic = text.behavior == TextBehavior::Dynamic;
    let run = if dynamic { text.last_run() } else { None };
    let font = run.map(|r| FontDescriptor {
        family: r.font_name.clone(),
        style: r.font_style,
        size: r.font_size,
    });

    TextResource {
        id,
        name: name.map(str::to_string),
        behavior: text.behavior,
        font_shorthand: font.as_ref().map(font_shorthand).unwrap_or_default(),
        font,
        color: run.map_or(Color::BLACK, |r| r.color),
        text: if dynamic {
            escape_carriage_returns(&text.text)
        } else {
            String::new()
        },
    }
}

#[cfg(test)]
#[path = "../../tests/unit/palette/text.rs"]
mod tests;
