//! Message types for the crop session
//!
//! These messages provide a decoupled interface between the host's widgets
//! and the session state. The host translates its native pointer/slider
//! events into these and feeds them to [`FilePicker::update`] and
//! [`CropCanvas::update`].
//!
//! [`FilePicker::update`]: super::picker::FilePicker::update
//! [`CropCanvas::update`]: super::state::CropCanvas::update

use crate::domain::Point;

/// Pointer button identity at drag start
///
/// A primary press starts a selection drag; a secondary or middle press
/// starts a pan drag. The host canvas is expected to suppress its default
/// context menu so secondary-button panning works.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
}

/// File picker messages
#[derive(Clone, Debug)]
pub enum PickerMsg {
    /// Search filter text changed
    FilterChanged(String),
    /// File at the given index of the filtered list clicked
    FileSelected(usize),
}

/// Crop canvas messages
///
/// Pointer positions are in viewport (canvas pixel) coordinates at the
/// current zoom level.
#[derive(Clone, Copy, Debug)]
pub enum CanvasMsg {
    /// Button pressed at a viewport position
    PointerPressed(PointerButton, Point),
    /// Pointer moved to a viewport position
    PointerMoved(Point),
    /// Button released; a selection drag finalizes, a pan drag ends
    PointerReleased,
    /// Pointer left the canvas; any drag in progress is abandoned
    PointerLeft,
    /// Zoom slider moved
    ZoomChanged(f32),
    /// Output scale input changed; `None` when the text did not parse
    OutputScaleChanged(Option<f64>),
}
