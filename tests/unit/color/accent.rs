use super::*;

fn solid(c: [u8; 3]) -> image::RgbaImage {
    image::RgbaImage::from_pixel(64, 64, image::Rgba([c[0], c[1], c[2], 255]))
}

#[test]
fn force_light_passes_threshold_for_every_gray_and_primary() {
    let mut samples: Vec<Rgb8> = (0..=255u8).map(|v| Rgb8::new(v, v, v)).collect();
    samples.extend([
        Rgb8::new(255, 0, 0),
        Rgb8::new(0, 255, 0),
        Rgb8::new(0, 0, 255),
        Rgb8::new(0, 0, 128),
        Rgb8::new(128, 0, 128),
    ]);
    for c in samples {
        let out = force_light_color(c);
        assert!(is_light(out), "{c} -> {out} is not light");
    }
}

#[test]
fn force_light_is_identity_for_light_colors() {
    let c = Rgb8::new(240, 230, 220);
    assert_eq!(force_light_color(c), c);
}

#[test]
fn force_light_black_converges_quickly() {
    // 0 -> 127 -> 191 -> 223
    assert_eq!(force_light_color(Rgb8::BLACK), Rgb8::new(223, 223, 223));
}

#[test]
fn explicit_red_is_lightened_not_raw() {
    let out = resolve_accent_color(None, Some(&AccentColor::parse("#FF0000")), Rgb8::BLACK);
    assert_ne!(out, Rgb8::new(255, 0, 0));
    assert!(is_light(out));
    assert_eq!(out.r, 255);
}

#[test]
fn explicit_color_beats_image() {
    let img = solid([250, 250, 250]);
    let out = resolve_accent_color(
        Some(&img),
        Some(&AccentColor::Rgb(Rgb8::new(0, 0, 100))),
        Rgb8::BLACK,
    );
    assert_eq!(out, force_light_color(Rgb8::new(0, 0, 100)));
}

#[test]
fn light_image_color_is_returned_as_is() {
    let img = solid([230, 220, 210]);
    assert_eq!(
        resolve_accent_color(Some(&img), None, Rgb8::BLACK),
        Rgb8::new(230, 220, 210)
    );
}

#[test]
fn dark_image_color_is_lightened() {
    let img = solid([0, 0, 100]);
    let out = resolve_accent_color(Some(&img), None, Rgb8::BLACK);
    assert!(is_light(out));
    assert_eq!(out, force_light_color(Rgb8::new(0, 0, 100)));
}

#[test]
fn light_minority_color_wins_over_dark_majority() {
    let mut img = image::RgbaImage::from_pixel(100, 100, image::Rgba([10, 10, 10, 255]));
    for y in 0..100 {
        for x in 0..30 {
            img.put_pixel(x, y, image::Rgba([250, 240, 230, 255]));
        }
    }
    let out = resolve_accent_color(Some(&img), None, Rgb8::BLACK);
    assert!(is_light(out));
    assert!(out.r > 240 && out.b > 200, "unexpected {out}");
}

#[test]
fn missing_or_empty_image_uses_lightened_default() {
    let default = Rgb8::new(0, 120, 215);
    assert_eq!(resolve_accent_color(None, None, default), force_light_color(default));

    let empty = image::RgbaImage::new(0, 0);
    assert_eq!(
        resolve_accent_color(Some(&empty), None, default),
        force_light_color(default)
    );
}

#[test]
fn unknown_name_falls_back_to_extraction() {
    let img = solid([230, 220, 210]);
    let out = resolve_accent_color(
        Some(&img),
        Some(&AccentColor::parse("qwxzkjp")),
        Rgb8::BLACK,
    );
    assert_eq!(out, Rgb8::new(230, 220, 210));
}

#[test]
fn accent_parse_classifies_inputs() {
    assert_eq!(AccentColor::parse("#ff0000"), AccentColor::Hex("#ff0000".into()));
    assert_eq!(AccentColor::parse("00FF00"), AccentColor::Hex("00FF00".into()));
    assert_eq!(
        AccentColor::parse("(10, 20, 30)"),
        AccentColor::Rgb(Rgb8::new(10, 20, 30))
    );
    assert_eq!(AccentColor::parse("gold"), AccentColor::Named("gold".into()));
    assert_eq!(AccentColor::parse("gold").to_rgb(), Some(Rgb8::new(255, 215, 0)));
    assert_eq!(AccentColor::parse("#GGGGGG").to_rgb(), None);
    assert_eq!(AccentColor::parse("1,2,300"), AccentColor::Named("1,2,300".into()));
}
