//! Layout computation for cropped embeds
//!
//! The crop is a display-time viewport transform, not a destructive edit:
//! the embed box shrinks to the crop size and a full-resolution copy of the
//! image is positioned inside it so only the cropped region shows.

use crate::domain::CropRect;

/// Computed display geometry for a cropped embed, in display pixels
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EmbedLayout {
    /// Embed box size: crop size times the output scale
    pub box_width: f64,
    pub box_height: f64,
    /// Full-image copy size: natural size times the output scale
    pub image_width: f64,
    pub image_height: f64,
    /// Offset of the image copy within the box; negative shifts pull the
    /// cropped region into view
    pub image_left: f64,
    pub image_top: f64,
}

/// Compute the clipped view for a crop over an image of the given natural size
pub fn crop_layout(crop: &CropRect, natural_width: u32, natural_height: u32) -> EmbedLayout {
    let scale = crop.scale;
    EmbedLayout {
        box_width: crop.width as f64 * scale,
        box_height: crop.height as f64 * scale,
        image_width: natural_width as f64 * scale,
        image_height: natural_height as f64 * scale,
        image_left: -(crop.x as f64 * scale),
        image_top: -(crop.y as f64 * scale),
    }
}
