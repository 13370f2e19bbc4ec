use super::*;

#[test]
fn fmt_num_trims_trailing_zeros() {
    assert_eq!(fmt_num(1.0), "1");
    assert_eq!(fmt_num(0.0), "0");
    assert_eq!(fmt_num(-819.2), "-819.2");
    assert_eq!(fmt_num(100.0), "100");
    assert_eq!(fmt_num(1.0 / 3.0), "0.3333");
    assert_eq!(fmt_num(-0.00001), "0");
    assert_eq!(fmt_num(f64::NAN), "0");
}

#[test]
fn fmt_matrix_lists_six_coefficients() {
    let m = Affine::new([1.0, 0.0, 0.0, 1.0, 10.5, -2.0]);
    assert_eq!(fmt_matrix(m), "1,0,0,1,10.5,-2");
}

#[test]
fn color_hex_and_opacity() {
    let red = Color::rgb(255, 0, 0);
    assert_eq!(red.hex(), "#ff0000");
    assert_eq!(fmt_num(red.opacity()), "1");
    assert_eq!(Color::rgb(0x12, 0x34, 0x56).rgb_u32(), 0x123456);
}

#[test]
fn color_parses_hex_with_optional_alpha() {
    assert_eq!(Color::from_hex("#00ff00").unwrap(), Color::rgb(0, 255, 0));
    assert_eq!(
        Color::from_hex("0000ff80").unwrap(),
        Color::rgba(0, 0, 255, 0x80)
    );
    assert!(Color::from_hex("#abc").is_err());
    assert!(Color::from_hex("#gg0000").is_err());
}

#[test]
fn color_deserializes_from_string_or_parts() {
    let a: Color = serde_json::from_str("\"#102030\"").unwrap();
    assert_eq!(a, Color::rgb(0x10, 0x20, 0x30));
    let b: Color = serde_json::from_str(r#"{"r":1,"g":2,"b":3}"#).unwrap();
    assert_eq!(b, Color::rgb(1, 2, 3));
    let c: Color = serde_json::from_str(r#"{"r":1,"g":2,"b":3,"a":4}"#).unwrap();
    assert_eq!(c.a, 4);
}

#[test]
fn stage_rejects_zero_fps() {
    assert!(Stage::new(10, 10, Color::WHITE, 0).is_err());
    assert!(Stage::from_frame_rate(10, 10, Color::WHITE, 0.5).is_err());
    let s = Stage::from_frame_rate(550, 400, Color::WHITE, 23.976).unwrap();
    assert_eq!(s.fps, 23);
}

#[test]
fn resource_zero_means_none() {
    assert_eq!(ResourceId::NONE.non_zero(), None);
    assert_eq!(ResourceId(7).non_zero(), Some(ResourceId(7)));
}

#[test]
fn object_zero_stacks_at_bottom() {
    assert_eq!(Stacking::from(ObjectId(0)), Stacking::Bottom);
    assert_eq!(Stacking::from(ObjectId(5)), Stacking::After(ObjectId(5)));
}
