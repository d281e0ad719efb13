use super::*;

fn layer(w: u32, h: u32) -> TextLayer {
    TextLayer::new(Canvas::new(w, h).unwrap()).unwrap()
}

#[test]
fn untouched_layer_is_transparent() {
    let img = layer(8, 6).finish().unwrap();
    assert_eq!(img.dimensions(), (8, 6));
    assert!(img.pixels().all(|p| p[3] == 0));
}

#[test]
fn filled_rect_is_opaque_inside_and_clear_outside() {
    let mut l = layer(40, 30);
    l.fill_rect(Rect::new(10.0, 10.0, 30.0, 20.0), Rgb8::new(255, 0, 0));
    let img = l.finish().unwrap();
    assert_eq!(*img.get_pixel(15, 15), image::Rgba([255, 0, 0, 255]));
    assert_eq!(img.get_pixel(2, 2)[3], 0);
    assert_eq!(img.get_pixel(35, 25)[3], 0);
}

#[test]
fn builtin_engine_draws_nothing() {
    let mut l = layer(20, 20);
    let mut engine = TextEngine::builtin();
    assert!(!l.draw_text(&mut engine, "hello", 0.0, 0.0, Rgb8::WHITE));
    let img = l.finish().unwrap();
    assert!(img.pixels().all(|p| p[3] == 0));
}

#[test]
fn oversized_canvas_is_rejected() {
    let canvas = Canvas {
        width: 70_000,
        height: 10,
    };
    assert!(TextLayer::new(canvas).is_err());
}

#[test]
fn composite_keeps_base_where_layer_is_clear() {
    let mut base = image::RgbaImage::from_pixel(4, 4, image::Rgba([0, 0, 255, 255]));
    let mut top = image::RgbaImage::new(4, 4);
    top.put_pixel(1, 1, image::Rgba([255, 255, 0, 255]));
    composite_onto(&mut base, &top);
    assert_eq!(*base.get_pixel(0, 0), image::Rgba([0, 0, 255, 255]));
    assert_eq!(*base.get_pixel(1, 1), image::Rgba([255, 255, 0, 255]));
}
