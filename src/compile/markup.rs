//! Markup fragments for resources and the HTML scaffold around them.

use std::fmt::Write as _;

use crate::foundation::core::{Affine, ResourceId, Stage, fmt_matrix, fmt_num};
use crate::model::resource::{
    BitmapResource, LinearGradient, Paint, PathKind, PathRecord, RadialGradient, ShapeResource,
    TextResource,
};

/// Inline style every fragment starts with; placement reveals it.
const HIDDEN: &str = "display: none; position: absolute;";

pub(crate) fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// CSS/SVG `matrix(a,b,c,d,tx,ty)` function.
pub(crate) fn css_matrix(m: Affine) -> String {
    format!("matrix({})", fmt_matrix(m))
}

pub(crate) fn element_class(id: ResourceId) -> String {
    format!("el_{id}")
}

fn write_stops(out: &mut String, stops: &[crate::host::shape::GradientStop]) {
    for s in stops {
        let _ = write!(
            out,
            "<stop offset=\"{}%\" stop-color=\"{}\" stop-opacity=\"{}\" />",
            fmt_num(s.offset),
            s.color.hex(),
            fmt_num(s.opacity)
        );
    }
}

fn linear_def(out: &mut String, def_id: &str, g: &LinearGradient) {
    let _ = write!(
        out,
        "<linearGradient id=\"{def_id}\" gradientUnits=\"userSpaceOnUse\" x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" spreadMethod=\"{}\">",
        fmt_num(g.x1),
        fmt_num(g.y1),
        fmt_num(g.x2),
        fmt_num(g.y2),
        g.spread.as_str()
    );
    write_stops(out, &g.stops);
    out.push_str("</linearGradient>");
}

fn radial_def(out: &mut String, def_id: &str, g: &RadialGradient) {
    let _ = write!(
        out,
        "<radialGradient id=\"{def_id}\" gradientUnits=\"userSpaceOnUse\" cx=\"{}\" cy=\"{}\" r=\"{}\" fx=\"{}\" fy=\"{}\" gradientTransform=\"{}\" spreadMethod=\"{}\">",
        fmt_num(g.cx),
        fmt_num(g.cy),
        fmt_num(g.r),
        fmt_num(g.fx),
        fmt_num(g.fy),
        css_matrix(g.transform),
        g.spread.as_str()
    );
    write_stops(out, &g.stops);
    out.push_str("</radialGradient>");
}

/// Definition element for non-solid paints, plus the value that references it.
fn paint_ref(paint: &Paint, def_id: &str, defs: &mut String) -> String {
    match paint {
        Paint::Solid { color, .. } => color.hex(),
        Paint::Linear(g) => {
            linear_def(defs, def_id, g);
            format!("url(#{def_id})")
        }
        Paint::Radial(g) => {
            radial_def(defs, def_id, g);
            format!("url(#{def_id})")
        }
        Paint::Pattern(p) => {
            let _ = write!(
                defs,
                "<pattern id=\"{def_id}\" patternUnits=\"userSpaceOnUse\" width=\"{}\" height=\"{}\" patternTransform=\"{}\">",
                p.width,
                p.height,
                css_matrix(p.transform)
            );
            if let Some(path) = &p.path {
                let _ = write!(
                    defs,
                    "<image href=\"{}\" width=\"{}\" height=\"{}\" />",
                    escape_html(path),
                    p.width,
                    p.height
                );
            }
            defs.push_str("</pattern>");
            format!("url(#{def_id})")
        }
    }
}

/// Attributes of one path element, in emission order, only those present.
pub(crate) fn path_attributes(
    rec: &PathRecord,
    def_id: &str,
    defs: &mut String,
) -> Vec<(&'static str, String)> {
    let mut attrs = vec![("d", rec.svg_d())];
    let paint = paint_ref(&rec.paint, def_id, defs);
    match rec.kind {
        PathKind::Fill => attrs.push(("fill", paint)),
        PathKind::Stroke => {
            attrs.push(("fill", "none".to_string()));
            attrs.push(("stroke", paint));
        }
    }
    if let Some(s) = &rec.stroke {
        attrs.push(("stroke-width", fmt_num(s.width)));
        attrs.push(("stroke-linecap", s.cap.as_str().to_string()));
        attrs.push(("stroke-linejoin", s.join.as_str().to_string()));
        if let Some(limit) = s.join.miter_limit() {
            attrs.push(("stroke-miterlimit", fmt_num(limit)));
        }
        if let Some(effect) = s.scale_type.vector_effect() {
            attrs.push(("vector-effect", effect.to_string()));
        }
    }
    if let Some(opacity) = rec.paint.color_opacity() {
        attrs.push(("opacity", opacity));
    }
    attrs
}

/// Vector fragment with one `<path>` per exported path.
pub(crate) fn shape_fragment(shape: &ShapeResource) -> String {
    let mut defs = String::new();
    let mut body = String::new();
    for (i, rec) in shape.paths.iter().enumerate() {
        let def_id = format!("paint_{}_{i}", shape.id);
        body.push_str("<path");
        for (name, value) in path_attributes(rec, &def_id, &mut defs) {
            let _ = write!(body, " {name}=\"{}\"", escape_html(&value));
        }
        body.push_str(" />");
    }

    let mut out = format!(
        "<svg class=\"{}\" version=\"1.1\" xmlns=\"http://www.w3.org/2000/svg\" style=\"{HIDDEN} overflow: visible;\">",
        element_class(shape.id)
    );
    if !defs.is_empty() {
        let _ = write!(out, "<defs>{defs}</defs>");
    }
    out.push_str(&body);
    out.push_str("</svg>");
    out
}

/// Sized container showing the exported image.
pub(crate) fn bitmap_fragment(bitmap: &BitmapResource) -> String {
    let image = bitmap
        .path
        .as_ref()
        .map(|p| format!(" background-image: url('{}');", escape_html(p)))
        .unwrap_or_default();
    format!(
        "<div class=\"{}\" style=\"{HIDDEN}{image} width: {}px; height: {}px;\"></div>",
        element_class(bitmap.id),
        bitmap.width,
        bitmap.height
    )
}

/// Lines of an escaped text record, split at `\r` with `\\` read back as one backslash.
fn text_lines(escaped: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    let mut chars = escaped.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            line.push(c);
            continue;
        }
        match chars.next() {
            Some('r') => lines.push(std::mem::take(&mut line)),
            Some(other) => line.push(other),
            None => line.push('\\'),
        }
    }
    lines.push(line);
    lines
}

/// Styled text block; escaped carriage returns become line breaks.
pub(crate) fn text_fragment(text: &TextResource) -> String {
    let font = if text.font_shorthand.is_empty() {
        String::new()
    } else {
        format!(" font: {};", escape_html(&text.font_shorthand))
    };
    let body = text_lines(&text.text)
        .iter()
        .map(|line| escape_html(line))
        .collect::<Vec<_>>()
        .join("<br/>");
    format!(
        "<p class=\"{}\" style=\"{HIDDEN} margin: 0; white-space: pre;{font} color: {};\">{body}</p>",
        element_class(text.id),
        text.color.hex()
    )
}

/// Empty container that a symbol timeline places its children into.
pub(crate) fn symbol_fragment(id: ResourceId) -> String {
    format!("<div class=\"{}\" style=\"{HIDDEN}\"></div>", element_class(id))
}

/// Paths the scaffold references.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScaffoldOptions {
    /// Folder holding the player runtime, relative to the markup.
    pub runtime_folder: String,
    /// Generated script file name, relative to the markup.
    pub script_file: String,
}

impl Default for ScaffoldOptions {
    fn default() -> Self {
        Self {
            runtime_folder: "Runtime".to_string(),
            script_file: "script.js".to_string(),
        }
    }
}

/// Complete HTML document: runtime, fps constant, script, and the stage container.
pub(crate) fn scaffold(stage: &Stage, opts: &ScaffoldOptions, fragments: &[String]) -> String {
    let mut inner = String::new();
    for f in fragments {
        inner.push('\n');
        inner.push_str(f);
    }
    if !inner.is_empty() {
        inner.push('\n');
    }

    format!(
        "<!DOCTYPE html>\n\
<html>\n\
<head>\n\
<meta charset=\"utf-8\">\n\
<script src=\"./{runtime}/runtime/anime.min.js\"></script>\n\
<script>\n\
const FPS = {fps};\n\
</script>\n\
<script src=\"./{script}\"></script>\n\
</head>\n\
<body style=\"margin: 0;\">\n\
<div id=\"canvas\" style=\"position: relative; width: {w}px; height: {h}px; background-color:#{bg:06X}; overflow: hidden;\">{inner}</div>\n\
</body>\n\
</html>\n",
        runtime = escape_html(&opts.runtime_folder),
        fps = stage.fps,
        script = escape_html(&opts.script_file),
        w = stage.width,
        h = stage.height,
        bg = stage.background.rgb_u32(),
    )
}

#[cfg(test)]
#[path = "../../tests/unit/compile/markup.rs"]
mod tests;
