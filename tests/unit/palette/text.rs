use super::*;
use crate::host::text::{Paragraph, TextRun};

fn run(name: &str, style: FontStyle, size: u32, color: Color) -> TextRun {
    TextRun {
        font_name: name.to_string(),
        font_style: style,
        font_size: size,
        color,
    }
}

#[test]
fn shorthand_covers_every_style() {
    let mut f = FontDescriptor {
        family: "Arial".to_string(),
        style: FontStyle::BoldItalic,
        size: 12,
    };
    assert_eq!(font_shorthand(&f), "italic bold 12px 'Arial'");
    f.style = FontStyle::Bold;
    assert_eq!(font_shorthand(&f), "bold 12px 'Arial'");
    f.style = FontStyle::Italic;
    assert_eq!(font_shorthand(&f), "italic 12px 'Arial'");
    f.style = FontStyle::Regular;
    assert_eq!(font_shorthand(&f), "12px 'Arial'");
}

#[test]
fn dynamic_text_takes_last_run_and_escapes_cr() {
    let text = ClassicText {
        behavior: TextBehavior::Dynamic,
        text: "Hello\rWorld".to_string(),
        paragraphs: vec![
            Paragraph {
                runs: vec![run("Times", FontStyle::Regular, 10, Color::BLACK)],
            },
            Paragraph {
                runs: vec![run("Verdana", FontStyle::Bold, 20, Color::rgb(255, 0, 0))],
            },
            Paragraph { runs: vec![] },
        ],
    };
    let rec = text_resource(ResourceId(3), Some("label"), &text);
    assert_eq!(rec.font_shorthand, "bold 20px 'Verdana'");
    assert_eq!(rec.color, Color::rgb(255, 0, 0));
    assert_eq!(rec.text, "Hello\\rWorld");
    assert_eq!(rec.name.as_deref(), Some("label"));
}

#[test]
fn backslashes_are_doubled_before_returns_are_escaped() {
    assert_eq!(escape_carriage_returns("C:\\reports"), "C:\\\\reports");
    assert_eq!(escape_carriage_returns("a\\\rb"), "a\\\\\\rb");
    assert_eq!(escape_carriage_returns("plain"), "plain");
}

#[test]
fn static_text_reads_no_styling() {
    let text = ClassicText {
        behavior: TextBehavior::Static,
        text: "baked".to_string(),
        paragraphs: vec![Paragraph {
            runs: vec![run("Arial", FontStyle::Bold, 30, Color::WHITE)],
        }],
    };
    let rec = text_resource(ResourceId(4), None, &text);
    assert!(rec.font.is_none());
    assert!(rec.font_shorthand.is_empty());
    assert!(rec.text.is_empty());
    assert_eq!(rec.color, Color::BLACK);
}
