use super::*;
use crate::foundation::core::Point;
use crate::host::output::InMemorySink;
use crate::host::scene::{SceneFrame, StageDef};
use crate::host::shape::{EdgePath, FillStyle, FilledRegion, Shape};
use crate::host::text::ClassicText;
use crate::foundation::core::Color;
use crate::timeline::command::FrameCommand;

fn square() -> Shape {
    Shape {
        regions: vec![FilledRegion {
            fill: FillStyle::Solid { color: Color::BLACK },
            boundary: Some(EdgePath::polygon(&[
                Point::new(0.0, 0.0),
                Point::new(4.0, 0.0),
                Point::new(4.0, 4.0),
            ])),
            holes: vec![],
        }],
        stroke_groups: vec![],
    }
}

fn place(object: u32, resource: u32) -> FrameOp {
    FrameOp::Place {
        object_id: ObjectId(object),
        resource_id: ResourceId(resource),
        place_after: None,
        matrix: None,
        bounds: None,
    }
}

fn frames(ops: Vec<Vec<FrameOp>>) -> SceneTimeline {
    SceneTimeline {
        name: "Scene 1".to_string(),
        frames: ops.into_iter().map(|ops| SceneFrame { ops }).collect(),
    }
}

fn entry(id: u32, name: &str, item: LibraryItem) -> LibraryEntry {
    LibraryEntry {
        id: ResourceId(id),
        name: name.to_string(),
        linkage: false,
        item,
    }
}

fn doc(library: Vec<LibraryEntry>, scene: SceneTimeline) -> SceneDocument {
    SceneDocument {
        path: None,
        stage: StageDef {
            width: 100,
            height: 100,
            background: Color::WHITE,
            frame_rate: 24.0,
        },
        library,
        scenes: vec![scene],
    }
}

struct Harness {
    palette: ResourcePalette,
    model: DocumentModel,
    factory: TimelineBuilderFactory,
    sink: InMemorySink,
}

impl Harness {
    fn new() -> Self {
        Self {
            palette: ResourcePalette::new("out"),
            model: DocumentModel::new(),
            factory: TimelineBuilderFactory::new(),
            sink: InMemorySink::new(),
        }
    }

    fn run(
        &mut self,
        doc: &SceneDocument,
        range: Option<FrameRange>,
        linkage: bool,
    ) -> PublishResult<TimelineBuilder> {
        let mut services = ExportServices::new(&mut self.sink);
        let mut cx = ExportContext {
            palette: &mut self.palette,
            model: &mut self.model,
            factory: &mut self.factory,
            services: &mut services,
        };
        let mut g = FrameCommandGenerator::new(doc);
        let b = g.generate(&mut cx, &doc.scenes[0], range)?;
        if linkage {
            g.export_linkage(&mut cx)?;
        }
        Ok(b)
    }
}

#[test]
fn shared_resource_is_exported_once() {
    let d = doc(
        vec![entry(1, "sq", LibraryItem::Shape(square()))],
        frames(vec![vec![place(1, 1)], vec![place(2, 1)]]),
    );
    let mut h = Harness::new();
    let b = h.run(&d, None, false).unwrap();
    assert_eq!(h.palette.ids(), &[ResourceId(1)]);
    assert_eq!(h.palette.resources().shapes.len(), 1);
    assert_eq!(b.frame_index(), 2);
    assert_eq!(b.writer().frames()[1].commands.len(), 1);
}

#[test]
fn symbols_build_their_timeline_first() {
    let spinner = LibraryItem::Symbol {
        symbol: SymbolKind::MovieClip,
        timeline: frames(vec![vec![place(1, 1)], vec![]]),
    };
    let d = doc(
        vec![
            entry(1, "sq", LibraryItem::Shape(square())),
            entry(2, "Spinner", spinner),
        ],
        frames(vec![vec![place(7, 2)]]),
    );
    let mut h = Harness::new();
    h.run(&d, None, false).unwrap();

    let t = h.model.symbol_timeline(ResourceId(2)).unwrap();
    assert_eq!(t.frames.len(), 2);
    assert_eq!(t.name.as_deref(), Some("Spinner"));
    assert!(h.palette.has_resource_named("Spinner"));
    assert_eq!(h.factory.created(), 2);
}

#[test]
fn self_containing_symbol_is_an_identity_violation() {
    let looped = LibraryItem::Symbol {
        symbol: SymbolKind::Graphic,
        timeline: frames(vec![vec![place(1, 3)]]),
    };
    let d = doc(vec![entry(3, "Loop", looped)], frames(vec![vec![place(1, 3)]]));
    let err = Harness::new().run(&d, None, false).unwrap_err();
    assert!(matches!(err, PublishError::IdentityViolation(_)));
}

#[test]
fn frame_range_limits_recorded_frames() {
    let d = doc(
        vec![entry(1, "sq", LibraryItem::Shape(square()))],
        frames(vec![
            vec![place(1, 1)],
            vec![FrameOp::Remove {
                object_id: ObjectId(1),
            }],
            vec![place(2, 1)],
        ]),
    );
    let mut h = Harness::new();
    let b = h.run(&d, Some(FrameRange::new(1, 2).unwrap()), false).unwrap();
    let recorded = b.writer().frames();
    assert_eq!(recorded.len(), 2);
    assert!(matches!(recorded[0].commands[0], FrameCommand::Remove { .. }));

    let err = Harness::new()
        .run(&d, Some(FrameRange::new(1, 3).unwrap()), false)
        .unwrap_err();
    assert!(matches!(err, PublishError::Validation(_)));
    assert!(FrameRange::new(2, 1).is_err());
}

#[test]
fn linkage_items_are_exported_when_unplaced() {
    let mut linked = entry(5, "Caption", LibraryItem::Text(ClassicText::default()));
    linked.linkage = true;
    let mut placed = entry(1, "sq", LibraryItem::Shape(square()));
    placed.linkage = true;
    let d = doc(vec![placed, linked], frames(vec![vec![place(1, 1)]]));

    let mut h = Harness::new();
    h.run(&d, None, true).unwrap();
    assert_eq!(h.palette.ids(), &[ResourceId(1), ResourceId(5)]);
}

#[test]
fn button_placement_records_tracking() {
    let button = LibraryItem::Symbol {
        symbol: SymbolKind::Button {
            tracking: crate::timeline::command::ButtonTracking::AsMenuItem,
        },
        timeline: frames(vec![vec![]]),
    };
    let d = doc(vec![entry(4, "Btn", button)], frames(vec![vec![place(9, 4)]]));
    let mut h = Harness::new();
    let b = h.run(&d, None, false).unwrap();
    let FrameCommand::Place { media, .. } = &b.writer().frames()[0].commands[0] else {
        panic!("expected place");
    };
    assert!(matches!(
        media,
        Some(crate::timeline::command::PlacedMedia::Button { .. })
    ));
}
