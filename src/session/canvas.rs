//! Canvas raster for the crop session
//!
//! Repaints the session surface with tiny-skia: the base image scaled to the
//! current zoom, then the working selection stroked in viewport coordinates.
//! The host blits the resulting pixmap into its scrollable canvas widget.

use image::RgbaImage;
use tiny_skia::{Paint, PathBuilder, Pixmap, PixmapPaint, Stroke, Transform};

use super::state::CropCanvas;
use crate::domain::Rect;

/// Selection stroke width in viewport pixels
const STROKE_WIDTH: f32 = 2.0;

/// Convert a decoded bitmap into a pixmap for compositing
fn image_pixmap(img: &RgbaImage) -> Option<Pixmap> {
    Pixmap::from_vec(
        img.as_raw().clone(),
        tiny_skia::IntSize::from_wh(img.width(), img.height())?,
    )
}

/// Repaint the canvas surface
///
/// Clears the surface, draws the image at `original size x zoom`, and
/// re-strokes the working selection transformed into viewport scale.
/// Returns `None` only for bitmaps tiny-skia cannot represent.
pub fn render(canvas: &CropCanvas) -> Option<Pixmap> {
    let (width, height) = canvas.canvas_size();
    let mut surface = Pixmap::new(width.max(1), height.max(1))?;

    let base = image_pixmap(canvas.image())?;
    let zoom = canvas.zoom();
    surface.draw_pixmap(
        0,
        0,
        base.as_ref(),
        &PixmapPaint::default(),
        Transform::from_scale(zoom, zoom),
        None,
    );

    stroke_selection(&mut surface, canvas.selection().scaled(zoom));
    Some(surface)
}

/// Stroke the selection rectangle in red over the surface
fn stroke_selection(surface: &mut Pixmap, rect: Rect) {
    if rect.is_empty() {
        return;
    }
    let Some(skia_rect) = tiny_skia::Rect::from_xywh(rect.x, rect.y, rect.width, rect.height)
    else {
        return;
    };
    let path = PathBuilder::from_rect(skia_rect);

    let mut paint = Paint::default();
    paint.set_color_rgba8(255, 0, 0, 255);
    paint.anti_alias = true;

    let stroke = Stroke {
        width: STROKE_WIDTH,
        ..Default::default()
    };
    surface.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::messages::{CanvasMsg, PointerButton};
    use crate::domain::Point;

    fn white_canvas(width: u32, height: u32) -> CropCanvas {
        let img = RgbaImage::from_pixel(width, height, image::Rgba([255, 255, 255, 255]));
        CropCanvas::new(img)
    }

    #[test]
    fn test_surface_matches_canvas_size() {
        let mut canvas = white_canvas(200, 100);
        canvas.update(CanvasMsg::ZoomChanged(0.5));
        let surface = render(&canvas).unwrap();
        assert_eq!((surface.width(), surface.height()), (100, 50));
    }

    #[test]
    fn test_selection_is_stroked() {
        let mut canvas = white_canvas(100, 100);
        canvas.update(CanvasMsg::PointerPressed(
            PointerButton::Primary,
            Point::new(20.0, 20.0),
        ));
        canvas.update(CanvasMsg::PointerMoved(Point::new(80.0, 80.0)));
        canvas.update(CanvasMsg::PointerReleased);

        let surface = render(&canvas).unwrap();
        let plain = render(&white_canvas(100, 100)).unwrap();
        // The stroked rectangle must have changed some pixels
        assert_ne!(surface.data(), plain.data());
    }

    #[test]
    fn test_empty_selection_renders_plain_image() {
        let canvas = white_canvas(64, 64);
        let surface = render(&canvas).unwrap();
        let white = tiny_skia::PremultipliedColorU8::from_rgba(255, 255, 255, 255).unwrap();
        assert!(surface.pixels().iter().all(|px| *px == white));
    }
}
