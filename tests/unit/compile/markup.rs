use super::*;
use crate::foundation::core::{BezPath, Color, Point};
use crate::host::shape::{CapStyle, GradientStop, JoinStyle, SpreadMode, StrokeScaleType};
use crate::host::text::TextBehavior;
use crate::model::resource::{BitmapPattern, StrokeAttrs};
use smallvec::smallvec;

fn square() -> BezPath {
    let mut p = BezPath::new();
    p.move_to(Point::new(0.0, 0.0));
    p.line_to(Point::new(10.0, 0.0));
    p.line_to(Point::new(10.0, 10.0));
    p
}

fn solid_fill() -> PathRecord {
    PathRecord {
        kind: PathKind::Fill,
        path: square(),
        paint: Paint::Solid {
            color: Color::rgb(255, 0, 0),
            opacity: 0.5,
        },
        stroke: None,
    }
}

#[test]
fn fill_path_has_no_stroke_attributes() {
    let mut defs = String::new();
    let attrs = path_attributes(&solid_fill(), "paint_1_0", &mut defs);
    let names: Vec<&str> = attrs.iter().map(|(n, _)| *n).collect();
    assert_eq!(names, ["d", "fill", "opacity"]);
    assert_eq!(attrs[1].1, "#ff0000");
    assert_eq!(attrs[2].1, "0.5");
    assert!(defs.is_empty());
}

#[test]
fn stroke_path_lists_cap_join_and_limit() {
    let rec = PathRecord {
        kind: PathKind::Stroke,
        path: square(),
        paint: Paint::Solid {
            color: Color::BLACK,
            opacity: 1.0,
        },
        stroke: Some(StrokeAttrs {
            width: 2.5,
            cap: CapStyle::None,
            join: JoinStyle::Miter { limit: 4.0 },
            scale_type: StrokeScaleType::Normal,
            hinting: false,
        }),
    };
    let mut defs = String::new();
    let attrs = path_attributes(&rec, "p", &mut defs);
    let names: Vec<&str> = attrs.iter().map(|(n, _)| *n).collect();
    assert_eq!(
        names,
        [
            "d",
            "fill",
            "stroke",
            "stroke-width",
            "stroke-linecap",
            "stroke-linejoin",
            "stroke-miterlimit",
            "opacity"
        ]
    );
    assert_eq!(attrs[1].1, "none");
    assert_eq!(attrs[4].1, "butt");
    assert_eq!(attrs[5].1, "miter");
}

#[test]
fn unscaled_strokes_ask_for_non_scaling_effect() {
    let rec = PathRecord {
        kind: PathKind::Stroke,
        path: square(),
        paint: Paint::Solid {
            color: Color::BLACK,
            opacity: 1.0,
        },
        stroke: Some(StrokeAttrs {
            width: 1.0,
            cap: CapStyle::Round,
            join: JoinStyle::Round,
            scale_type: StrokeScaleType::None,
            hinting: false,
        }),
    };
    let mut defs = String::new();
    let attrs = path_attributes(&rec, "p", &mut defs);
    assert!(
        attrs
            .iter()
            .any(|(n, v)| *n == "vector-effect" && v == "non-scaling-stroke")
    );
}

#[test]
fn gradient_paints_go_into_defs() {
    let shape = ShapeResource {
        id: ResourceId(3),
        name: None,
        paths: vec![PathRecord {
            kind: PathKind::Fill,
            path: square(),
            paint: Paint::Linear(LinearGradient {
                spread: SpreadMode::Reflect,
                x1: -819.2,
                y1: 0.0,
                x2: 819.2,
                y2: 0.0,
                stops: smallvec![GradientStop {
                    offset: 0.0,
                    color: Color::WHITE,
                    opacity: 1.0,
                }],
            }),
            stroke: None,
        }],
    };
    let svg = shape_fragment(&shape);
    assert!(svg.starts_with("<svg class=\"el_3\""));
    assert!(svg.contains("<defs><linearGradient id=\"paint_3_0\""));
    assert!(svg.contains("x1=\"-819.2\""));
    assert!(svg.contains("spreadMethod=\"reflect\""));
    assert!(svg.contains("<stop offset=\"0%\" stop-color=\"#ffffff\" stop-opacity=\"1\" />"));
    assert!(svg.contains("fill=\"url(#paint_3_0)\""));
    assert!(svg.contains("display: none;"));
}

#[test]
fn pattern_without_file_has_no_image() {
    let mut defs = String::new();
    let paint = Paint::Pattern(BitmapPattern {
        clipped: true,
        width: 4,
        height: 2,
        transform: Affine::IDENTITY,
        path: None,
    });
    let value = paint_ref(&paint, "pat", &mut defs);
    assert_eq!(value, "url(#pat)");
    assert!(defs.contains("patternTransform=\"matrix(1,0,0,1,0,0)\""));
    assert!(!defs.contains("<image"));
}

#[test]
fn bitmap_fragment_references_exported_file() {
    let b = BitmapResource {
        id: ResourceId(2),
        name: Some("pic.png".to_string()),
        width: 16,
        height: 9,
        path: Some("./images/Image0.png".to_string()),
    };
    let html = bitmap_fragment(&b);
    assert!(html.contains("class=\"el_2\""));
    assert!(html.contains("background-image: url('./images/Image0.png');"));
    assert!(html.contains("width: 16px; height: 9px;"));
}

#[test]
fn text_is_escaped_and_broken_on_returns() {
    let t = TextResource {
        id: ResourceId(4),
        name: None,
        behavior: TextBehavior::Dynamic,
        font: None,
        font_shorthand: "bold 20px 'Verdana'".to_string(),
        color: Color::rgb(0, 0, 255),
        text: "a<b\\rc".to_string(),
    };
    let html = text_fragment(&t);
    assert!(html.contains("font: bold 20px &#39;Verdana&#39;;"));
    assert!(html.contains("color: #0000ff;"));
    assert!(html.ends_with(">a&lt;b<br/>c</p>"));
}

#[test]
fn literal_backslashes_survive_into_the_paragraph() {
    let t = TextResource {
        id: ResourceId(5),
        name: None,
        behavior: TextBehavior::Dynamic,
        font: None,
        font_shorthand: "12px 'Arial'".to_string(),
        color: Color::BLACK,
        text: crate::palette::text::escape_carriage_returns("C:\\reports\rnext\\"),
    };
    let html = text_fragment(&t);
    assert!(html.ends_with(">C:\\reports<br/>next\\</p>"));
}

#[test]
fn scaffold_wraps_fragments_in_the_stage() {
    let stage = Stage::new(100, 50, Color::rgb(0x12, 0x34, 0x56), 12).unwrap();
    let html = scaffold(
        &stage,
        &ScaffoldOptions::default(),
        &[symbol_fragment(ResourceId(9))],
    );
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("background-color:#123456;"));
    assert!(html.contains("overflow: hidden;\">\n<div class=\"el_9\""));
    assert!(html.contains("./Runtime/runtime/anime.min.js"));
    assert!(html.trim_end().ends_with("</html>"));
}
