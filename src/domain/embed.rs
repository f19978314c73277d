//! Image embed markup for plain-text note documents
//!
//! Embed syntax is `![[<filename>|<alias>]]`; the alias is normally a
//! caption and is repurposed here to carry the crop annotation. This module
//! only ever formats a new embed line or scans existing ones; it never
//! touches other document content.

use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;

/// Extensions recognized as croppable images
pub const IMAGE_EXTENSIONS: &[&str] =
    &["png", "jpg", "jpeg", "webp", "gif", "bmp", "tiff", "svg"];

static EMBED_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"!\[\[([^\[\]|]+)(?:\|([^\[\]]*))?\]\]").unwrap());

/// A single image embed reference found in document text
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Embed {
    /// Referenced file name
    pub source: String,
    /// Display alias, when one is present after the `|`
    pub alias: Option<String>,
}

/// Check a file name against the image extension allow-list
pub fn is_image_file(name: &str) -> bool {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
}

/// Format an embed reference with the given alias
pub fn embed_line(filename: &str, alias: &str) -> String {
    format!("![[{filename}|{alias}]]")
}

/// Scan document text for image embeds, in order of appearance
///
/// Embeds referencing non-image files are skipped; duplicates of the same
/// file under different aliases are kept as independent embeds.
pub fn find_embeds(document: &str) -> Vec<Embed> {
    EMBED_PATTERN
        .captures_iter(document)
        .filter(|caps| is_image_file(&caps[1]))
        .map(|caps| Embed {
            source: caps[1].to_string(),
            alias: caps.get(2).map(|m| m.as_str().to_string()),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_image_file() {
        assert!(is_image_file("photo.png"));
        assert!(is_image_file("photo.JPG"));
        assert!(is_image_file("dir/photo.webp"));
        assert!(!is_image_file("notes.md"));
        assert!(!is_image_file("photo"));
        assert!(!is_image_file("archive.tar.gz"));
    }

    #[test]
    fn test_embed_line() {
        assert_eq!(
            embed_line("photo.png", "150x200_Shift50x100"),
            "![[photo.png|150x200_Shift50x100]]"
        );
    }

    #[test]
    fn test_find_embeds() {
        let document = "intro\n![[photo.png|150x200_Shift50x100]]\n\
                        ![[notes.md|not an image]]\n![[plain.jpg]]\ntail";
        let embeds = find_embeds(document);
        assert_eq!(
            embeds,
            vec![
                Embed {
                    source: "photo.png".into(),
                    alias: Some("150x200_Shift50x100".into()),
                },
                Embed {
                    source: "plain.jpg".into(),
                    alias: None,
                },
            ]
        );
    }

    #[test]
    fn test_find_embeds_same_file_twice() {
        // Crop annotations are per-embed, not per-file
        let document = "![[a.png|1x1_Shift0x0]] ![[a.png|2x2_Shift1x1]]";
        let embeds = find_embeds(document);
        assert_eq!(embeds.len(), 2);
        assert_ne!(embeds[0].alias, embeds[1].alias);
    }
}
