//! Idempotent processing of rendered image embeds
//!
//! The renderer observes the host's rendered embeds, decodes their alias
//! text, and computes the cropped layout for those that match. Each node
//! carries a processed flag; re-running the pass on an already-processed
//! node is a no-op, which is the only synchronization the host's repeated
//! and overlapping reprocess invocations need.

use crate::domain::CropRect;

use super::layout::{EmbedLayout, crop_layout};

/// A rendered image embed as seen by the host view
#[derive(Clone, Debug, PartialEq)]
pub struct EmbedNode {
    /// Referenced image file name
    pub source: String,
    /// Alias text; an ordinary caption on uncropped embeds
    pub alias: Option<String>,
    /// Natural bitmap dimensions; `None` while decoding is pending or after
    /// a decode failure, in which case the node stays unprocessed
    pub natural_size: Option<(u32, u32)>,
    /// Set once the pass has laid this node out; later passes skip it
    pub processed: bool,
    /// The original image element is hidden to avoid double rendering
    pub original_hidden: bool,
    /// Computed crop layout, present on processed nodes
    pub layout: Option<EmbedLayout>,
    /// Whether the full-image hover overlay is currently shown
    pub preview_open: bool,
}

impl EmbedNode {
    /// Create an unprocessed node for an embed reference
    pub fn new(source: impl Into<String>, alias: Option<String>) -> Self {
        Self {
            source: source.into(),
            alias,
            natural_size: None,
            processed: false,
            original_hidden: false,
            layout: None,
            preview_open: false,
        }
    }

    /// The crop annotation carried by this embed's alias, if any
    pub fn crop(&self) -> Option<CropRect> {
        CropRect::decode(self.alias.as_deref()?)
    }
}

/// Renderer for crop-annotated embeds
#[derive(Clone, Copy, Debug, Default)]
pub struct EmbedRenderer {
    /// Attach the full-image hover preview to processed embeds
    pub show_preview_on_hover: bool,
}

impl EmbedRenderer {
    pub fn new(show_preview_on_hover: bool) -> Self {
        Self {
            show_preview_on_hover,
        }
    }

    /// Process every visible embed node
    ///
    /// Safe to invoke repeatedly in quick succession; already-processed
    /// nodes are skipped without further mutation.
    pub fn reprocess_visible_embeds(&self, embeds: &mut [EmbedNode]) {
        for embed in embeds {
            self.process(embed);
        }
    }

    fn process(&self, embed: &mut EmbedNode) {
        if embed.processed {
            return;
        }
        let Some(crop) = embed.crop() else {
            // Not a crop annotation; leave the embed as an ordinary image
            return;
        };
        // Natural dimensions are only trustworthy once the bitmap decoded;
        // a failed or pending decode leaves the embed untouched
        let Some((natural_width, natural_height)) = embed.natural_size else {
            return;
        };

        embed.layout = Some(crop_layout(&crop, natural_width, natural_height));
        embed.original_hidden = true;
        embed.processed = true;
        log::debug!(
            "cropped embed {}: {}x{} -> box {}x{}",
            embed.source,
            natural_width,
            natural_height,
            crop.width,
            crop.height,
        );
    }

    /// Pointer entered a processed embed's box; open the hover preview
    pub fn pointer_entered(&self, embed: &mut EmbedNode) {
        if self.show_preview_on_hover && embed.processed {
            embed.preview_open = true;
        }
    }

    /// Pointer position update while a preview is open
    ///
    /// The overlay persists while the pointer remains over the embed or the
    /// overlay itself and is removed once it leaves both.
    pub fn pointer_moved(&self, embed: &mut EmbedNode, over_embed: bool, over_preview: bool) {
        if embed.preview_open && !over_embed && !over_preview {
            embed.preview_open = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cropped_node() -> EmbedNode {
        let mut node = EmbedNode::new("photo.png", Some("150x200_Shift50x100".into()));
        node.natural_size = Some((800, 600));
        node
    }

    #[test]
    fn test_process_computes_layout_and_hides_original() {
        let mut node = cropped_node();
        EmbedRenderer::default().reprocess_visible_embeds(std::slice::from_mut(&mut node));

        assert!(node.processed);
        assert!(node.original_hidden);
        let layout = node.layout.unwrap();
        assert_eq!((layout.box_width, layout.box_height), (200.0, 150.0));
        assert_eq!((layout.image_left, layout.image_top), (-100.0, -50.0));
    }

    #[test]
    fn test_reprocess_is_idempotent() {
        let renderer = EmbedRenderer::default();
        let mut node = cropped_node();
        renderer.reprocess_visible_embeds(std::slice::from_mut(&mut node));
        let first = node.clone();

        renderer.reprocess_visible_embeds(std::slice::from_mut(&mut node));
        assert_eq!(node, first);
    }

    #[test]
    fn test_unmatched_alias_is_left_untouched() {
        let mut node = EmbedNode::new("photo.png", Some("just a caption".into()));
        node.natural_size = Some((800, 600));
        EmbedRenderer::default().reprocess_visible_embeds(std::slice::from_mut(&mut node));

        assert!(!node.processed);
        assert!(!node.original_hidden);
        assert_eq!(node.layout, None);
    }

    #[test]
    fn test_missing_natural_size_skips_processing() {
        let mut node = EmbedNode::new("photo.png", Some("1x1_Shift0x0".into()));
        EmbedRenderer::default().reprocess_visible_embeds(std::slice::from_mut(&mut node));
        assert!(!node.processed);

        // Once the bitmap decodes, a later pass picks the node up
        node.natural_size = Some((10, 10));
        EmbedRenderer::default().reprocess_visible_embeds(std::slice::from_mut(&mut node));
        assert!(node.processed);
    }

    #[test]
    fn test_hover_preview_lifecycle() {
        let renderer = EmbedRenderer::new(true);
        let mut node = cropped_node();
        renderer.reprocess_visible_embeds(std::slice::from_mut(&mut node));

        renderer.pointer_entered(&mut node);
        assert!(node.preview_open);

        // Moving onto the overlay keeps it open
        renderer.pointer_moved(&mut node, false, true);
        assert!(node.preview_open);

        // Leaving both embed and overlay closes it
        renderer.pointer_moved(&mut node, false, false);
        assert!(!node.preview_open);
    }

    #[test]
    fn test_hover_preview_disabled_by_default() {
        let renderer = EmbedRenderer::default();
        let mut node = cropped_node();
        renderer.reprocess_visible_embeds(std::slice::from_mut(&mut node));
        renderer.pointer_entered(&mut node);
        assert!(!node.preview_open);
    }
}
