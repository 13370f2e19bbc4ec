use super::*;

fn temp_dir(tag: &str) -> PathBuf {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let dir = std::env::temp_dir().join(format!(
        "stagepub_media_{tag}_{}_{nanos}",
        std::process::id()
    ));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn item(name: &str, source: Option<&str>) -> MediaItem {
    MediaItem {
        name: name.to_string(),
        source: source.map(PathBuf::from),
        width: 2,
        height: 2,
    }
}

#[test]
fn extension_is_read_as_written() {
    assert_eq!(item("art/photo.jpg", None).extension(), Some("jpg"));
    assert_eq!(item("art/Photo.JPG", None).extension(), Some("JPG"));
    assert_eq!(item("noext", None).extension(), None);
}

#[test]
fn bitmap_is_reencoded_to_destination_format() {
    let dir = temp_dir("bitmap");
    let img = image::RgbaImage::from_pixel(2, 2, image::Rgba([255, 0, 0, 255]));
    img.save(dir.join("red.png")).unwrap();

    let mut exporter = FsMediaExporter::new(&dir);
    let dest = dir.join("Image0.jpg");
    exporter
        .export_bitmap(&item("red.png", Some("red.png")), &dest)
        .unwrap();

    let decoded = image::open(&dest).unwrap();
    assert_eq!(decoded.width(), 2);
    assert_eq!(decoded.height(), 2);
}

#[test]
fn float_bitmap_is_narrowed_to_eight_bit_png() {
    let dir = temp_dir("float");
    let img = image::Rgb32FImage::from_pixel(2, 2, image::Rgb([0.25f32, 0.5, 1.0]));
    image::DynamicImage::ImageRgb32F(img)
        .save(dir.join("hdr.exr"))
        .unwrap();

    let mut exporter = FsMediaExporter::new(&dir);
    let dest = dir.join("Image0.png");
    exporter
        .export_bitmap(&item("hdr.exr", Some("hdr.exr")), &dest)
        .unwrap();

    let decoded = image::open(&dest).unwrap();
    assert_eq!(decoded.color(), image::ColorType::Rgba8);
    assert_eq!(decoded.width(), 2);
}

#[test]
fn unencodable_destination_is_recoverable() {
    let dir = temp_dir("unencodable");
    let img = image::RgbaImage::from_pixel(2, 2, image::Rgba([0, 255, 0, 255]));
    img.save(dir.join("green.png")).unwrap();

    let mut exporter = FsMediaExporter::new(&dir);
    let err = exporter
        .export_bitmap(&item("green.png", Some("green.png")), &dir.join("Image0.xyz"))
        .unwrap_err();
    assert!(err.is_recoverable());
}

#[test]
fn sound_is_copied() {
    let dir = temp_dir("sound");
    std::fs::write(dir.join("beep.wav"), b"RIFF....").unwrap();

    let mut exporter = FsMediaExporter::new(&dir);
    let dest = dir.join("Sound0.WAV");
    exporter
        .export_sound(&item("beep.wav", Some("beep.wav")), &dest)
        .unwrap();
    assert_eq!(std::fs::read(&dest).unwrap(), b"RIFF....");
}

#[test]
fn missing_source_is_recoverable() {
    let dir = temp_dir("missing");
    let mut exporter = FsMediaExporter::new(&dir);

    let err = exporter
        .export_sound(&item("gone.mp3", Some("gone.mp3")), &dir.join("Sound0.MP3"))
        .unwrap_err();
    assert!(err.is_recoverable());

    let err = exporter
        .export_bitmap(&item("anon.png", None), &dir.join("Image0.png"))
        .unwrap_err();
    assert!(err.is_recoverable());
}
