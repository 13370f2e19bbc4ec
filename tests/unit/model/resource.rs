use super::*;
use crate::foundation::core::Point;

#[test]
fn svg_d_lists_moves_lines_and_quads() {
    let mut path = BezPath::new();
    path.move_to(Point::new(0.0, 0.0));
    path.line_to(Point::new(100.0, 0.0));
    path.quad_to(Point::new(100.0, 50.5), Point::new(0.0, 100.0));
    path.move_to(Point::new(10.0, 10.0));
    path.line_to(Point::new(20.0, 10.0));

    let rec = PathRecord {
        kind: PathKind::Fill,
        path,
        paint: Paint::Solid {
            color: Color::rgb(255, 0, 0),
            opacity: 1.0,
        },
        stroke: None,
    };
    assert_eq!(
        rec.svg_d(),
        "M 0 0 L 100 0 Q 100 50.5 0 100 M 10 10 L 20 10"
    );
    assert_eq!(rec.paint.color_opacity().as_deref(), Some("1"));
}

#[test]
fn resource_set_partitions_by_kind() {
    let mut set = ResourceSet::default();
    set.push(ResourceRecord::Bitmap(BitmapResource {
        id: ResourceId(2),
        name: Some("photo.png".to_string()),
        width: 4,
        height: 3,
        path: None,
    }));
    set.push(ResourceRecord::Shape(ShapeResource {
        id: ResourceId(1),
        name: None,
        paths: vec![],
    }));

    assert_eq!(set.len(), 2);
    assert_eq!(set.shapes.len(), 1);
    assert_eq!(set.bitmap(ResourceId(2)).map(|b| b.width), Some(4));
    assert!(set.sound(ResourceId(2)).is_none());
}

#[test]
fn record_id_matches_payload() {
    let rec = ResourceRecord::Sound(SoundResource {
        id: ResourceId(8),
        name: None,
        path: None,
    });
    assert_eq!(rec.id(), ResourceId(8));
}
