//! Screen-space text for the frame-rate counter.
//!
//! Text is drawn from a tiny 5x7 bitmap font covering the characters the
//! counter prints. Each lit glyph pixel becomes one solid quad; the quads are
//! rendered by [`crate::pipelines::overlay::OverlayRenderer`].

use bytemuck::{Pod, Zeroable};

pub const GLYPH_WIDTH: usize = 5;
pub const GLYPH_HEIGHT: usize = 7;
/// Horizontal distance between glyph origins, in font pixels.
pub const GLYPH_ADVANCE: usize = GLYPH_WIDTH + 1;

/// One solid rectangle in window pixels, `origin` is the top-left corner.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct OverlayQuad {
    pub origin: [f32; 2],
    pub size: [f32; 2],
    pub color: [f32; 4],
}

impl OverlayQuad {
    const ATTRS: [wgpu::VertexAttribute; 3] = wgpu::vertex_attr_array![
        1 => Float32x2, // origin
        2 => Float32x2, // size
        3 => Float32x4  // color
    ];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<OverlayQuad>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }
}

/// Rows of a glyph from top to bottom; bit 4 is the leftmost column.
pub fn glyph(c: char) -> Option<[u8; GLYPH_HEIGHT]> {
    let rows = match c {
        '0' => [0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110],
        '1' => [0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        '2' => [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b01000, 0b11111],
        '3' => [0b11111, 0b00010, 0b00100, 0b00010, 0b00001, 0b10001, 0b01110],
        '4' => [0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010],
        '5' => [0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110],
        '6' => [0b00110, 0b01000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110],
        '7' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000],
        '8' => [0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110],
        '9' => [0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00010, 0b01100],
        '.' => [0, 0, 0, 0, 0, 0b01100, 0b01100],
        ':' => [0, 0b01100, 0b01100, 0, 0b01100, 0b01100, 0],
        ' ' => [0; GLYPH_HEIGHT],
        'f' => [0b00110, 0b01001, 0b01000, 0b11100, 0b01000, 0b01000, 0b01000],
        'p' => [0, 0, 0b11110, 0b10001, 0b11110, 0b10000, 0b10000],
        's' => [0, 0, 0b01111, 0b10000, 0b01110, 0b00001, 0b11110],
        _ => return None,
    };
    Some(rows)
}

/// Lays out `text` starting at `x` with the bottom row of the glyphs ending at `baseline_y`.
///
/// Coordinates are window pixels with `y` pointing down. `pixel` is the size of
/// one font pixel. Characters without a glyph advance the cursor and draw nothing.
pub fn layout_text(text: &str, x: f32, baseline_y: f32, pixel: f32, color: [f32; 4]) -> Vec<OverlayQuad> {
    let top = baseline_y - GLYPH_HEIGHT as f32 * pixel;
    let mut quads = Vec::new();
    for (index, c) in text.chars().enumerate() {
        let Some(rows) = glyph(c) else { continue };
        let left = x + (index * GLYPH_ADVANCE) as f32 * pixel;
        for (row, bits) in rows.iter().enumerate() {
            for column in 0..GLYPH_WIDTH {
                if bits & (1 << (GLYPH_WIDTH - 1 - column)) == 0 {
                    continue;
                }
                quads.push(OverlayQuad {
                    origin: [left + column as f32 * pixel, top + row as f32 * pixel],
                    size: [pixel, pixel],
                    color,
                });
            }
        }
    }
    quads
}
