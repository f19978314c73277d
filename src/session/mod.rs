//! Interactive crop session
//!
//! One modal session at a time: a picker phase (choose the image file) that
//! advances to a canvas phase (draw the selection, zoom/pan, set the output
//! scale). All state is ephemeral and discarded on accept or cancel; the
//! only lasting output is the encoded alias written to the document.

pub mod canvas;
pub mod messages;
pub mod picker;
pub mod state;

pub use messages::{CanvasMsg, PickerMsg, PointerButton};
pub use picker::FilePicker;
pub use state::{CropCanvas, DragMode};

/// One crop session: picker first, canvas after a file is chosen
#[derive(Clone, Debug)]
pub struct CropSession {
    picker: FilePicker,
    canvas: Option<CropCanvas>,
}

impl CropSession {
    /// Start a session over the given image file names
    pub fn new(files: Vec<String>) -> Self {
        Self {
            picker: FilePicker::new(files),
            canvas: None,
        }
    }

    pub fn picker(&self) -> &FilePicker {
        &self.picker
    }

    pub fn picker_mut(&mut self) -> &mut FilePicker {
        &mut self.picker
    }

    /// The canvas phase, present once a file has been opened
    pub fn canvas(&self) -> Option<&CropCanvas> {
        self.canvas.as_ref()
    }

    pub fn canvas_mut(&mut self) -> Option<&mut CropCanvas> {
        self.canvas.as_mut()
    }

    /// Enter the canvas phase with a decoded bitmap
    pub(crate) fn open_canvas(&mut self, canvas: CropCanvas) {
        self.canvas = Some(canvas);
    }
}
