//! Social preview card: a 1200×630 PNG with the sender's chat bubble on the
//! left and a large circular portrait on the right.

pub mod avatar;
pub mod draw;
pub mod font;

pub use avatar::{AvatarSource, HttpAvatarSource};
pub use font::FontCache;

use std::io::Cursor;
use std::sync::Arc;

use fontdue::layout::{
    CoordinateSystem, HorizontalAlign, Layout, LayoutSettings, TextStyle, VerticalAlign,
    WrapStyle,
};
use fontdue::Font;
use image::{DynamicImage, ImageFormat, RgbaImage};

use crate::error::AppResult;
use crate::models::Profile;
use draw::{blit_circle, cover_square, draw_layout, fill_rounded_rect, hex, layout_width, Corners};

pub const WIDTH: u32 = 1200;
pub const HEIGHT: u32 = 630;

const BACKGROUND: u32 = 0x050708;
const FOREGROUND: u32 = 0xE7E9EA;
const BUBBLE: u32 = 0x16181C;

const PADDING: u32 = 56;
const RIGHT_PANEL_WIDTH: u32 = 624; // 52% of the card
const LEFT_PANEL_WIDTH: u32 = WIDTH - RIGHT_PANEL_WIDTH;
const PORTRAIT_DIAMETER: u32 = HEIGHT - 60;

const THUMB_SIZE: u32 = 56;
const THUMB_GAP: u32 = 16;

const BUBBLE_X: u32 = PADDING + THUMB_SIZE + THUMB_GAP;
const BUBBLE_MAX_WIDTH: u32 = 520;
const BUBBLE_PAD_X: u32 = 22;
const BUBBLE_PAD_Y: u32 = 20;
const BUBBLE_RADIUS: u32 = 20;
const BUBBLE_TAIL_RADIUS: u32 = 6;
const BUBBLE_TAGLINE_GAP: u32 = 24;

const MESSAGE_PX: f32 = 40.0;
const MESSAGE_LINE_HEIGHT: f32 = 1.25;
const TAGLINE_PX: f32 = 36.0;

/// Composes preview cards with a resident font.
pub struct PreviewComposer {
    font: Arc<Font>,
    tagline: String,
}

impl PreviewComposer {
    pub fn new(font: Arc<Font>, profile: &Profile) -> Self {
        PreviewComposer {
            font,
            tagline: profile.tagline(),
        }
    }

    /// Render the card. `message` is drawn wrapped as given; bounding its
    /// length is the caller's job.
    pub fn render(&self, message: &str, avatar: &DynamicImage) -> RgbaImage {
        let mut canvas = RgbaImage::from_pixel(WIDTH, HEIGHT, hex(BACKGROUND));
        let content_width = LEFT_PANEL_WIDTH - 2 * PADDING;

        let tagline = self.layout(
            &self.tagline,
            TAGLINE_PX,
            LayoutSettings {
                max_height: Some((HEIGHT - PADDING) as f32),
                vertical_align: VerticalAlign::Bottom,
                ..text_box(PADDING as f32, 0.0, content_width as f32, 1.0)
            },
        );
        let tagline_top = (HEIGHT - PADDING).saturating_sub(tagline.height().ceil() as u32);

        // Sender thumbnail
        let thumb = cover_square(avatar, THUMB_SIZE);
        blit_circle(&mut canvas, &thumb, PADDING, PADDING);

        // Chat bubble
        let bubble_max_width = BUBBLE_MAX_WIDTH.min(content_width - THUMB_SIZE - THUMB_GAP);
        let bubble_max_height = tagline_top.saturating_sub(PADDING + BUBBLE_TAGLINE_GAP);
        let text_x = (BUBBLE_X + BUBBLE_PAD_X) as f32;
        let text_y = (PADDING + BUBBLE_PAD_Y) as f32;
        let body = self.layout(
            message,
            MESSAGE_PX,
            text_box(
                text_x,
                text_y,
                (bubble_max_width - 2 * BUBBLE_PAD_X) as f32,
                MESSAGE_LINE_HEIGHT,
            ),
        );

        let bubble_width =
            (layout_width(&body, text_x).ceil() as u32 + 2 * BUBBLE_PAD_X).min(bubble_max_width);
        let bubble_height =
            (body.height().ceil() as u32 + 2 * BUBBLE_PAD_Y).min(bubble_max_height);
        fill_rounded_rect(
            &mut canvas,
            BUBBLE_X,
            PADDING,
            bubble_width,
            bubble_height,
            Corners {
                top_left: BUBBLE_TAIL_RADIUS,
                ..Corners::uniform(BUBBLE_RADIUS)
            },
            hex(BUBBLE),
        );
        draw_layout(
            &mut canvas,
            &self.font,
            &body,
            hex(FOREGROUND),
            PADDING + bubble_height,
        );

        draw_layout(&mut canvas, &self.font, &tagline, hex(FOREGROUND), HEIGHT);

        // Portrait
        let portrait = cover_square(avatar, PORTRAIT_DIAMETER);
        blit_circle(
            &mut canvas,
            &portrait,
            LEFT_PANEL_WIDTH + (RIGHT_PANEL_WIDTH - PORTRAIT_DIAMETER) / 2,
            (HEIGHT - PORTRAIT_DIAMETER) / 2,
        );

        canvas
    }

    fn layout(&self, text: &str, px: f32, settings: LayoutSettings) -> Layout {
        let mut layout = Layout::new(CoordinateSystem::PositiveYDown);
        layout.reset(&settings);
        layout.append(&[self.font.as_ref()], &TextStyle::new(text, px, 0));
        layout
    }
}

/// Top-left anchored, word-wrapped text box.
fn text_box(x: f32, y: f32, max_width: f32, line_height: f32) -> LayoutSettings {
    LayoutSettings {
        x,
        y,
        max_width: Some(max_width),
        max_height: None,
        horizontal_align: HorizontalAlign::Left,
        vertical_align: VerticalAlign::Top,
        line_height,
        wrap_style: WrapStyle::Word,
        wrap_hard_breaks: true,
    }
}

pub fn encode_png(img: &RgbaImage) -> AppResult<Vec<u8>> {
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)?;
    Ok(buf)
}
