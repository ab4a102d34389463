use moving_sphere_box::overlay::{GLYPH_ADVANCE, GLYPH_HEIGHT, glyph, layout_text};

const BLACK: [f32; 4] = [0.0, 0.0, 0.0, 1.0];

#[test]
fn font_covers_the_counter_text() {
    for c in "fps: 0123456789.".chars() {
        assert!(glyph(c).is_some(), "missing glyph for {:?}", c);
    }
    assert!(glyph('x').is_none());
}

#[test]
fn one_glyph_becomes_one_quad_per_lit_pixel() {
    let quads = layout_text("1", 0.0, 14.0, 2.0, BLACK);
    assert_eq!(quads.len(), 10);
    assert!(quads.iter().all(|q| q.size == [2.0, 2.0] && q.color == BLACK));

    let top = quads.iter().map(|q| q.origin[1]).fold(f32::MAX, f32::min);
    let bottom = quads.iter().map(|q| q.origin[1] + q.size[1]).fold(f32::MIN, f32::max);
    assert_eq!(top, 14.0 - GLYPH_HEIGHT as f32 * 2.0);
    assert_eq!(bottom, 14.0);
}

#[test]
fn spaces_and_unknown_characters_only_advance() {
    assert!(layout_text("  ", 0.0, 10.0, 1.0, BLACK).is_empty());

    let plain = layout_text("1", 0.0, 10.0, 3.0, BLACK);
    let shifted = layout_text("?1", 0.0, 10.0, 3.0, BLACK);
    assert_eq!(plain.len(), shifted.len());
    for (a, b) in plain.iter().zip(&shifted) {
        assert_eq!(b.origin[0] - a.origin[0], GLYPH_ADVANCE as f32 * 3.0);
        assert_eq!(b.origin[1], a.origin[1]);
    }
}
