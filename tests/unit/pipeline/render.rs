use super::*;

struct FixedFetcher(Option<Vec<u8>>);

impl ImageFetcher for FixedFetcher {
    fn fetch(&self, _url: &str) -> Option<Vec<u8>> {
        self.0.clone()
    }
}

fn small_renderer() -> Renderer {
    let loader = StaticConfigLoader::from_json(r#"{"canvas":{"width":108,"height":135}}"#).unwrap();
    Renderer::new(Box::new(loader))
}

fn png_bytes(w: u32, h: u32) -> Vec<u8> {
    let img = RgbaImage::from_pixel(w, h, image::Rgba([240, 240, 240, 255]));
    encode_png(&img, true).unwrap()
}

#[test]
fn image_background_is_borrowed() {
    let r = small_renderer();
    let src = BackgroundSource::Image(DynamicImage::new_rgb8(4, 4));
    assert!(matches!(r.resolve_background(&src), Some(Cow::Borrowed(_))));
}

#[test]
fn url_background_goes_through_fetcher() {
    let ok = small_renderer().with_fetcher(Arc::new(FixedFetcher(Some(png_bytes(5, 5)))));
    let src = BackgroundSource::Url("https://example.com/x.png".into());
    let img = ok.resolve_background(&src).unwrap();
    assert_eq!(img.width(), 5);

    let failing = small_renderer().with_fetcher(Arc::new(FixedFetcher(None)));
    assert!(failing.resolve_background(&src).is_none());
}

#[test]
fn corrupt_bytes_fall_back_to_none() {
    let r = small_renderer();
    let src = BackgroundSource::Bytes(b"not an image".to_vec());
    assert!(r.resolve_background(&src).is_none());
}

#[test]
fn fetched_photo_marks_report() {
    let r = small_renderer().with_fetcher(Arc::new(FixedFetcher(Some(png_bytes(20, 10)))));
    let req = RenderRequest::new("Headline").background_url("https://example.com/x.png");
    let out = r.render_detailed(&req).unwrap();
    assert_eq!(out.report.background, BackgroundKind::Photo);
    // Light photo: its dominant color is already light.
    assert_eq!(out.report.badge_color, Rgb8::new(240, 240, 240));
}

#[test]
fn archive_is_skipped_without_root() {
    let r = small_renderer();
    let out = r.render_detailed(&RenderRequest::new("x")).unwrap();
    assert!(out.report.archived.is_none());
}
