//! Selection state machine for the crop canvas
//!
//! Drag modes are mutually exclusive: a primary-button press enters a
//! selection drag, a secondary or middle press enters a pan drag, and
//! release or pointer-leave returns to idle. The working selection lives in
//! original-image coordinates; zoom and pan only change how it is shown.

use image::RgbaImage;

use super::messages::{CanvasMsg, PointerButton};
use crate::domain::{CropRect, Point, Rect};

/// Zoom slider range
pub const MIN_ZOOM: f32 = 0.1;
pub const MAX_ZOOM: f32 = 2.0;

/// Mutually exclusive drag modes
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DragMode {
    #[default]
    Idle,
    /// Primary-button drag building the selection
    Selecting,
    /// Secondary/middle-button drag scrolling the viewport
    Panning,
}

/// Interactive crop canvas state
#[derive(Clone, Debug)]
pub struct CropCanvas {
    image: RgbaImage,
    zoom: f32,
    /// Scroll offset of the scrollable viewport, in viewport pixels
    scroll: Point,
    drag: DragMode,
    /// Selection anchor corner, in original-image coordinates
    anchor: Point,
    /// Pointer position and scroll offset captured at pan start
    pan_anchor: Point,
    pan_scroll: Point,
    /// Working selection, in original-image coordinates
    selection: Rect,
    output_scale: f64,
}

impl CropCanvas {
    /// Start a canvas session over a decoded bitmap
    pub fn new(image: RgbaImage) -> Self {
        Self {
            image,
            zoom: 1.0,
            scroll: Point::default(),
            drag: DragMode::Idle,
            anchor: Point::default(),
            pan_anchor: Point::default(),
            pan_scroll: Point::default(),
            selection: Rect::default(),
            output_scale: 1.0,
        }
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn scroll(&self) -> Point {
        self.scroll
    }

    pub fn drag(&self) -> DragMode {
        self.drag
    }

    /// The working selection in original-image coordinates
    pub fn selection(&self) -> Rect {
        self.selection
    }

    pub fn output_scale(&self) -> f64 {
        self.output_scale
    }

    /// Canvas pixel size at the current zoom
    pub fn canvas_size(&self) -> (u32, u32) {
        (
            (self.image.width() as f32 * self.zoom).round() as u32,
            (self.image.height() as f32 * self.zoom).round() as u32,
        )
    }

    /// Apply a canvas message
    pub fn update(&mut self, msg: CanvasMsg) {
        match msg {
            CanvasMsg::PointerPressed(button, pos) => self.pointer_pressed(button, pos),
            CanvasMsg::PointerMoved(pos) => self.pointer_moved(pos),
            CanvasMsg::PointerReleased | CanvasMsg::PointerLeft => self.drag = DragMode::Idle,
            CanvasMsg::ZoomChanged(zoom) => self.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM),
            CanvasMsg::OutputScaleChanged(scale) => {
                // An unparseable or non-positive value falls back to 1
                self.output_scale = match scale {
                    Some(s) if s > 0.0 => s,
                    _ => 1.0,
                };
            }
        }
    }

    fn pointer_pressed(&mut self, button: PointerButton, pos: Point) {
        match button {
            PointerButton::Secondary | PointerButton::Middle => {
                self.drag = DragMode::Panning;
                self.pan_anchor = pos;
                self.pan_scroll = self.scroll;
            }
            PointerButton::Primary => {
                self.drag = DragMode::Selecting;
                self.anchor = pos.to_original(self.zoom);
            }
        }
    }

    fn pointer_moved(&mut self, pos: Point) {
        match self.drag {
            DragMode::Panning => {
                // Translate the viewport by the pointer delta since pan start
                self.scroll = Point::new(
                    self.pan_scroll.x - (pos.x - self.pan_anchor.x),
                    self.pan_scroll.y - (pos.y - self.pan_anchor.y),
                );
            }
            DragMode::Selecting => {
                self.selection = Rect::from_corners(self.anchor, pos.to_original(self.zoom));
            }
            DragMode::Idle => {}
        }
    }

    /// The rounded crop for confirmation, carrying the current output scale
    pub fn confirm(&self) -> CropRect {
        CropRect::from_selection(self.selection, self.output_scale)
    }

    /// Live readout of the rounded selection and zoom, e.g.
    /// `x:100 y:50 w:200 h:150 zoom:1.0x`
    pub fn info_text(&self) -> String {
        let crop = self.confirm();
        format!(
            "x:{} y:{} w:{} h:{} zoom:{:.1}x",
            crop.x, crop.y, crop.width, crop.height, self.zoom
        )
    }
}
