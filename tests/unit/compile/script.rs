use super::*;
use crate::foundation::core::Affine;
use crate::model::resource::SoundResource;
use crate::timeline::command::BlendMode;

fn with_sound(path: Option<&str>) -> ResourceSet {
    let mut r = ResourceSet::default();
    r.sounds.push(SoundResource {
        id: ResourceId(4),
        name: None,
        path: path.map(str::to_string),
    });
    r
}

fn audio(cue: SoundPlacement) -> FrameCommand {
    FrameCommand::Place {
        resource_id: ResourceId(4),
        object_id: ObjectId(8),
        stacking: None,
        matrix: None,
        media: Some(PlacedMedia::Sound(cue)),
    }
}

#[test]
fn placement_carries_transform_and_stacking() {
    let cmd = FrameCommand::Place {
        resource_id: ResourceId(1),
        object_id: ObjectId(2),
        stacking: Some(Stacking::After(ObjectId(1))),
        matrix: Some(Affine::new([2.0, 0.0, 0.0, 2.0, 5.0, 0.0])),
        media: None,
    };
    let body = lower(&cmd, "canvas", &ResourceSet::default()).unwrap();
    assert_eq!(body, "place(canvas, 1, 2, 1, \"matrix(2,0,0,2,5,0)\");");
}

#[test]
fn restack_and_visibility_lower_to_helpers() {
    let r = ResourceSet::default();
    let z = FrameCommand::UpdateZOrder {
        object_id: ObjectId(3),
        stacking: Stacking::Bottom,
    };
    assert_eq!(lower(&z, "canvas", &r).unwrap(), "restack(3, 0);");
    let v = FrameCommand::UpdateVisibility {
        object_id: ObjectId(3),
        visible: false,
    };
    assert_eq!(lower(&v, "canvas", &r).unwrap(), "style(3, 'visibility', 'hidden');");
    let b = FrameCommand::UpdateBlendMode {
        object_id: ObjectId(3),
        mode: BlendMode::Add,
    };
    assert!(lower(&b, "canvas", &r).unwrap().contains("\"plus-lighter\""));
}

#[test]
fn repeat_cue_uses_count_and_start_offset() {
    let cue = SoundPlacement {
        loop_mode: LoopMode::Repeat,
        repeat_count: 3,
        in_pos44: 44_100,
        ..Default::default()
    };
    let body = lower(&audio(cue), "canvas", &with_sound(Some("./sounds/Sound0.WAV"))).unwrap();
    assert_eq!(body, "playSound(8, snd_4, 3, 1);");
}

#[test]
fn start_sync_only_plays_when_idle() {
    let cue = SoundPlacement {
        sync: SyncMode::Start,
        ..Default::default()
    };
    let body = lower(&audio(cue), "canvas", &with_sound(Some("./sounds/Sound0.WAV"))).unwrap();
    assert_eq!(body, "if (snd_4.paused) { playSound(8, snd_4, 1, 0); }");
}

#[test]
fn cue_without_exported_audio_is_an_empty_action() {
    let body = lower(&audio(SoundPlacement::default()), "canvas", &with_sound(None)).unwrap();
    assert!(body.is_empty());
    assert!(sound_declarations(&with_sound(None)).is_empty());
}

#[test]
fn parents_name_canvas_or_symbol_container() {
    assert_eq!(parent_expr(None), "canvas");
    assert_eq!(parent_expr(Some(ResourceId(12))), "el(12)");
}

#[test]
fn table_merges_frames_across_timelines() {
    let mut t = ActionTable::default();
    t.push(1, "a();".to_string());
    t.push(0, "b();".to_string());
    t.push(1, "c();".to_string());
    t.touch(3);
    assert_eq!(t.action_count(), 3);
    assert_eq!(t.dense_layers(), vec![vec![1], vec![0, 2], vec![], vec![]]);

    let script = assemble("", &t);
    assert!(script.starts_with("document.addEventListener('DOMContentLoaded'"));
    assert!(script.contains("        [1],\n        [0,2],\n        null,\n        null,\n"));
    assert!(script.trim_end().ends_with("});"));
}
