/// Generates a fully transparent RGBA8 canvas.
pub fn transparent_canvas(width: usize, height: usize) -> Vec<u8> {
    assert!(width > 0 && height > 0, "image dimensions must be positive");
    vec![0u8; width * height * 4]
}

/// Paints an opaque axis-aligned rectangle onto a tightly packed canvas.
pub fn fill_rect(
    buffer: &mut [u8],
    width: usize,
    x0: usize,
    y0: usize,
    w: usize,
    h: usize,
    rgba: [u8; 4],
) {
    for y in y0..y0 + h {
        for x in x0..x0 + w {
            let i = (y * width + x) * 4;
            buffer[i..i + 4].copy_from_slice(&rgba);
        }
    }
}
