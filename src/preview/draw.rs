//! Raster primitives used by the preview composer.
//!
//! Everything operates on an opaque RGBA canvas; alpha is only used as a
//! coverage value when blending onto it.

use fontdue::layout::Layout;
use fontdue::Font;
use image::{imageops, DynamicImage, Rgba, RgbaImage};

pub fn hex(rgb: u32) -> Rgba<u8> {
    Rgba([(rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8, 255])
}

fn blend(dst: &mut Rgba<u8>, src: Rgba<u8>, coverage: f32) {
    let a = coverage.clamp(0.0, 1.0) * (src.0[3] as f32 / 255.0);
    if a <= 0.0 {
        return;
    }
    let inv = 1.0 - a;
    for c in 0..3 {
        dst.0[c] = (src.0[c] as f32 * a + dst.0[c] as f32 * inv).round() as u8;
    }
    dst.0[3] = 255;
}

/// Per-corner radii, clockwise from top-left.
#[derive(Debug, Clone, Copy)]
pub struct Corners {
    pub top_left: u32,
    pub top_right: u32,
    pub bottom_right: u32,
    pub bottom_left: u32,
}

impl Corners {
    pub fn uniform(r: u32) -> Self {
        Corners {
            top_left: r,
            top_right: r,
            bottom_right: r,
            bottom_left: r,
        }
    }
}

/// Whether local point (x, y) lies inside a w×h rectangle with rounded corners.
fn inside_rounded(x: u32, y: u32, w: u32, h: u32, corners: Corners) -> bool {
    let (r, cx, cy) = if x < corners.top_left && y < corners.top_left {
        let r = corners.top_left;
        (r, r, r)
    } else if x >= w.saturating_sub(corners.top_right) && y < corners.top_right {
        let r = corners.top_right;
        (r, w.saturating_sub(r), r)
    } else if x >= w.saturating_sub(corners.bottom_right)
        && y >= h.saturating_sub(corners.bottom_right)
    {
        let r = corners.bottom_right;
        (r, w.saturating_sub(r), h.saturating_sub(r))
    } else if x < corners.bottom_left && y >= h.saturating_sub(corners.bottom_left) {
        let r = corners.bottom_left;
        (r, r, h.saturating_sub(r))
    } else {
        return true;
    };

    let dx = x as f32 + 0.5 - cx as f32;
    let dy = y as f32 + 0.5 - cy as f32;
    dx * dx + dy * dy <= (r * r) as f32
}

pub fn fill_rounded_rect(
    canvas: &mut RgbaImage,
    x: u32,
    y: u32,
    w: u32,
    h: u32,
    corners: Corners,
    color: Rgba<u8>,
) {
    for ly in 0..h {
        for lx in 0..w {
            let (px, py) = (x + lx, y + ly);
            if px >= canvas.width() || py >= canvas.height() {
                continue;
            }
            if inside_rounded(lx, ly, w, h, corners) {
                blend(canvas.get_pixel_mut(px, py), color, 1.0);
            }
        }
    }
}

/// Center-crop `img` to a square and scale it to `size`×`size` ("object-fit: cover").
pub fn cover_square(img: &DynamicImage, size: u32) -> RgbaImage {
    let rgba = img.to_rgba8();
    let side = rgba.width().min(rgba.height());
    let left = (rgba.width() - side) / 2;
    let top = (rgba.height() - side) / 2;
    let cropped = imageops::crop_imm(&rgba, left, top, side, side).to_image();
    imageops::resize(&cropped, size, size, imageops::FilterType::Lanczos3)
}

/// Paste `src` onto the canvas at (x, y), masked to the inscribed circle.
/// Edge pixels are antialiased by their distance to the rim.
pub fn blit_circle(canvas: &mut RgbaImage, src: &RgbaImage, x: u32, y: u32) {
    let d = src.width().min(src.height());
    let r = d as f32 / 2.0;
    for sy in 0..d {
        for sx in 0..d {
            let dx = sx as f32 + 0.5 - r;
            let dy = sy as f32 + 0.5 - r;
            let coverage = r - (dx * dx + dy * dy).sqrt() + 0.5;
            if coverage <= 0.0 {
                continue;
            }
            let (px, py) = (x + sx, y + sy);
            if px >= canvas.width() || py >= canvas.height() {
                continue;
            }
            blend(canvas.get_pixel_mut(px, py), *src.get_pixel(sx, sy), coverage);
        }
    }
}

/// Rasterize every glyph of a prepared layout onto the canvas, dropping
/// pixels at or below `clip_bottom`.
pub fn draw_layout(
    canvas: &mut RgbaImage,
    font: &Font,
    layout: &Layout,
    color: Rgba<u8>,
    clip_bottom: u32,
) {
    let bottom = i64::from(clip_bottom.min(canvas.height()));
    for glyph in layout.glyphs() {
        if glyph.width == 0 || glyph.height == 0 {
            continue;
        }
        let (_, bitmap) = font.rasterize_config(glyph.key);
        let gx = glyph.x.round() as i64;
        let gy = glyph.y.round() as i64;
        for row in 0..glyph.height {
            for col in 0..glyph.width {
                let coverage = bitmap[row * glyph.width + col];
                if coverage == 0 {
                    continue;
                }
                let px = gx + col as i64;
                let py = gy + row as i64;
                if px < 0 || py < 0 || px >= canvas.width() as i64 || py >= bottom {
                    continue;
                }
                blend(
                    canvas.get_pixel_mut(px as u32, py as u32),
                    color,
                    coverage as f32 / 255.0,
                );
            }
        }
    }
}

/// Right edge of the widest laid-out glyph, relative to `origin_x`.
pub fn layout_width(layout: &Layout, origin_x: f32) -> f32 {
    layout
        .glyphs()
        .iter()
        .map(|g| g.x + g.width as f32 - origin_x)
        .fold(0.0, f32::max)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BG: u32 = 0x050708;

    fn canvas(w: u32, h: u32) -> RgbaImage {
        RgbaImage::from_pixel(w, h, hex(BG))
    }

    #[test]
    fn hex_splits_channels() {
        assert_eq!(hex(0x16181C), Rgba([0x16, 0x18, 0x1C, 255]));
    }

    #[test]
    fn rounded_rect_fills_center_but_not_corner() {
        let mut img = canvas(100, 100);
        fill_rounded_rect(&mut img, 10, 10, 80, 60, Corners::uniform(20), hex(0xFFFFFF));
        assert_eq!(*img.get_pixel(50, 40), hex(0xFFFFFF));
        assert_eq!(*img.get_pixel(10, 10), hex(BG));
        assert_eq!(*img.get_pixel(5, 5), hex(BG));
    }

    #[test]
    fn small_corner_radius_keeps_more_of_the_corner() {
        let corners = Corners {
            top_left: 6,
            ..Corners::uniform(20)
        };
        let mut img = canvas(100, 100);
        fill_rounded_rect(&mut img, 0, 0, 80, 60, corners, hex(0xFFFFFF));
        assert_eq!(*img.get_pixel(3, 3), hex(0xFFFFFF));
        assert_eq!(*img.get_pixel(77, 2), hex(BG));
    }

    #[test]
    fn fill_clips_to_canvas() {
        let mut img = canvas(20, 20);
        fill_rounded_rect(&mut img, 15, 15, 50, 50, Corners::uniform(0), hex(0xFF0000));
        assert_eq!(*img.get_pixel(19, 19), hex(0xFF0000));
    }

    #[test]
    fn cover_square_crops_center() {
        let mut wide = RgbaImage::from_pixel(300, 100, hex(0x0000FF));
        for y in 0..100 {
            for x in 100..200 {
                wide.put_pixel(x, y, hex(0x00FF00));
            }
        }
        let square = cover_square(&DynamicImage::ImageRgba8(wide), 50);
        assert_eq!(square.dimensions(), (50, 50));
        assert_eq!(*square.get_pixel(25, 25), hex(0x00FF00));
    }

    #[test]
    fn blit_circle_masks_corners() {
        let src = RgbaImage::from_pixel(40, 40, hex(0xFF0000));
        let mut img = canvas(60, 60);
        blit_circle(&mut img, &src, 10, 10);
        assert_eq!(*img.get_pixel(30, 30), hex(0xFF0000));
        assert_eq!(*img.get_pixel(10, 10), hex(BG));
    }
}
