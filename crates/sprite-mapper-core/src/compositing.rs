use image::RgbaImage;

/// Copy all of `src` into `canvas` with its top-left pixel at `(dx, dy)`.
///
/// Pixels falling outside the canvas are dropped. Source pixels replace the
/// canvas pixels (no alpha blending), so transparent areas of a sprite stay
/// transparent on the sheet.
pub fn blit_rgba(src: &RgbaImage, canvas: &mut RgbaImage, dx: u32, dy: u32) {
    let (cw, ch) = canvas.dimensions();
    let (sw, sh) = src.dimensions();
    for yy in 0..sh {
        let ty = dy + yy;
        if ty >= ch {
            break;
        }
        for xx in 0..sw {
            let tx = dx + xx;
            if tx >= cw {
                break;
            }
            canvas.put_pixel(tx, ty, *src.get_pixel(xx, yy));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn blit_clips_at_canvas_edge() {
        let src = RgbaImage::from_pixel(4, 4, Rgba([10, 20, 30, 255]));
        let mut canvas = RgbaImage::new(6, 6);
        blit_rgba(&src, &mut canvas, 4, 4);
        assert_eq!(canvas.get_pixel(5, 5)[0], 10);
        assert_eq!(canvas.get_pixel(3, 3)[3], 0);
    }
}
