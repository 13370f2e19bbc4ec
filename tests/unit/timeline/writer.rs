use super::*;
use crate::foundation::core::Color;
use crate::host::shape::ColorPoint;
use crate::timeline::command::LoopMode;
use crate::timeline::filter::{BlurFilter, FilterPlacement, FilterQuality, GradientFilter};

#[test]
fn show_frame_seals_in_sequence() {
    let mut w = TimelineWriter::new();
    w.place(ResourceId(1), ObjectId(5), Stacking::Bottom, None, None);
    assert_eq!(w.show_frame(), FrameIndex(0));
    assert!(w.pending_commands().is_empty());
    assert_eq!(w.show_frame(), FrameIndex(1));

    let frames = w.frames();
    assert_eq!(frames.len(), 2);
    assert_eq!(frames[0].commands.len(), 1);
    assert!(frames[1].commands.is_empty());
}

#[test]
fn audio_placement_has_no_stacking() {
    let mut w = TimelineWriter::new();
    let cue = SoundPlacement {
        loop_mode: LoopMode::Repeat,
        repeat_count: 3,
        sync: SyncMode::Event,
        in_pos44: 0,
        out_pos44: 44_100,
    };
    w.place_with_audio(ResourceId(9), ObjectId(2), Some(cue));
    match &w.pending_commands()[0] {
        FrameCommand::Place {
            stacking,
            matrix,
            media,
            ..
        } => {
            assert_eq!(*stacking, None);
            assert_eq!(*matrix, None);
            assert_eq!(*media, Some(PlacedMedia::Sound(cue)));
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn mask_and_color_transform_record_nothing() {
    let mut w = TimelineWriter::new();
    w.update_mask(ObjectId(1), ObjectId(3));
    w.update_color_transform(ObjectId(1), &ColorTransform::default());
    assert!(w.pending_commands().is_empty());
}

#[test]
fn gradient_filters_carry_percent_stops() {
    let mut w = TimelineWriter::new();
    w.add_filter(
        ObjectId(1),
        Filter::GradientGlow(GradientFilter {
            enabled: true,
            angle: 45.0,
            blur_x: 4.0,
            blur_y: 4.0,
            distance: 2.0,
            knockout: false,
            quality: FilterQuality::High,
            strength: 100.0,
            placement: FilterPlacement::Full,
            ramp: [
                ColorPoint {
                    pos: 0,
                    color: Color::rgba(255, 255, 255, 0),
                },
                ColorPoint {
                    pos: 255,
                    color: Color::BLACK,
                },
            ]
            .into_iter()
            .collect(),
        }),
    );
    w.add_filter(
        ObjectId(1),
        Filter::Blur(BlurFilter {
            enabled: true,
            blur_x: 1.0,
            blur_y: 1.0,
            quality: FilterQuality::Low,
        }),
    );

    let cmds = w.pending_commands();
    let FrameCommand::UpdateFilter { stops, .. } = &cmds[0] else {
        panic!("expected filter");
    };
    assert_eq!(stops.len(), 2);
    assert_eq!(stops[0].offset, 0.0);
    assert_eq!(stops[0].opacity, 0.0);
    assert_eq!(stops[1].offset, 100.0);

    let FrameCommand::UpdateFilter { stops, .. } = &cmds[1] else {
        panic!("expected filter");
    };
    assert!(stops.is_empty());
}

#[test]
fn finish_maps_zero_to_main_and_drops_unsealed() {
    let mut w = TimelineWriter::new();
    w.set_frame_label("start", LabelKind::Name);
    w.show_frame();
    w.remove(ObjectId(1));

    let t = w.finish(ResourceId::NONE, None);
    assert!(t.is_main());
    assert_eq!(t.frames.len(), 1);
    assert_eq!(
        t.frames[0].commands,
        vec![FrameCommand::SetFrameLabel {
            kind: LabelKind::Name,
            text: "start".to_string()
        }]
    );
}

#[test]
fn finish_keeps_symbol_identity() {
    let mut w = TimelineWriter::new();
    w.add_frame_script("stop();\n", 1);
    w.remove_frame_script(2);
    w.show_frame();
    let t = w.finish(ResourceId(12), Some("Walker"));
    assert_eq!(t.resource_id, Some(ResourceId(12)));
    assert_eq!(t.name.as_deref(), Some("Walker"));
    assert_eq!(t.frames[0].commands.len(), 2);
}
