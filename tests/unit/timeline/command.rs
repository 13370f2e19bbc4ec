use super::*;

#[test]
fn blend_modes_decode_in_host_order() {
    assert_eq!(BlendMode::from_raw(0), Some(BlendMode::Normal));
    assert_eq!(BlendMode::from_raw(7), Some(BlendMode::Hardlight));
    assert_eq!(BlendMode::from_raw(9).map(BlendMode::name), Some("Subtract"));
    assert_eq!(BlendMode::from_raw(13), Some(BlendMode::Erase));
    assert_eq!(BlendMode::from_raw(14), None);
}

#[test]
fn unsupported_blend_modes_fall_back_to_normal_css() {
    assert_eq!(BlendMode::Multiply.css(), "multiply");
    assert_eq!(BlendMode::Erase.css(), "normal");
    assert_eq!(BlendMode::Layer.css(), "normal");
}

#[test]
fn label_kinds_decode() {
    assert_eq!(LabelKind::from_raw(0), LabelKind::None);
    assert_eq!(LabelKind::from_raw(1), LabelKind::Name);
    assert_eq!(LabelKind::from_raw(2), LabelKind::Comment);
    assert_eq!(LabelKind::from_raw(3), LabelKind::Anchor);
    assert_eq!(LabelKind::from_raw(42), LabelKind::None);
}

#[test]
fn object_id_only_for_display_commands() {
    let remove = FrameCommand::Remove {
        object_id: ObjectId(4),
    };
    assert_eq!(remove.object_id(), Some(ObjectId(4)));

    let label = FrameCommand::SetFrameLabel {
        kind: LabelKind::Name,
        text: "intro".to_string(),
    };
    assert_eq!(label.object_id(), None);
}

#[test]
fn commands_serialize_with_snake_case_tag() {
    let cmd = FrameCommand::UpdateVisibility {
        object_id: ObjectId(2),
        visible: false,
    };
    let v = serde_json::to_value(&cmd).unwrap();
    assert_eq!(v["cmd"], "update_visibility");
    assert_eq!(v["object_id"], 2);
}

#[test]
fn timeline_without_resource_is_main() {
    let main = Timeline {
        resource_id: None,
        name: None,
        frames: vec![],
    };
    assert!(main.is_main());
}
