use super::*;

const SQUARE: &[u8] = br##"<svg xmlns="http://www.w3.org/2000/svg" width="20" height="10">
    <rect x="0" y="0" width="20" height="10" fill="#ff0000"/>
</svg>"##;

#[test]
fn rasterizes_at_target_width_preserving_aspect() {
    let tree = parse_svg(SQUARE).unwrap();
    let img = rasterize_svg_to_width(&tree, 40).unwrap();
    assert_eq!(img.dimensions(), (40, 20));
    assert_eq!(img.get_pixel(20, 10).0, [255, 0, 0, 255]);
}

#[test]
fn zero_width_is_rejected() {
    let tree = parse_svg(SQUARE).unwrap();
    assert!(rasterize_svg_to_width(&tree, 0).is_err());
}

#[test]
fn parse_errors_surface() {
    assert!(parse_svg(b"<svg").is_err());
}

#[test]
fn unpremultiply_restores_straight_color() {
    let mut px = [64u8, 0, 0, 128];
    unpremultiply_rgba8_in_place(&mut px);
    assert_eq!(px, [128, 0, 0, 128]);
}
