//! Image file picker preceding the crop canvas

use super::messages::PickerMsg;

/// File list state for choosing the image to crop
///
/// The selection is kept by name so it survives filter changes that hide
/// the selected entry.
#[derive(Clone, Debug, Default)]
pub struct FilePicker {
    files: Vec<String>,
    filter: String,
    selected: Option<String>,
}

impl FilePicker {
    /// Create a picker over the given file names
    pub fn new(mut files: Vec<String>) -> Self {
        files.sort();
        Self {
            files,
            filter: String::new(),
            selected: None,
        }
    }

    /// Apply a picker message
    pub fn update(&mut self, msg: PickerMsg) {
        match msg {
            PickerMsg::FilterChanged(filter) => self.filter = filter,
            PickerMsg::FileSelected(index) => {
                self.selected = self.visible().get(index).map(|name| (*name).to_string());
            }
        }
    }

    /// File names matching the current filter, case-insensitively
    pub fn visible(&self) -> Vec<&str> {
        let needle = self.filter.to_lowercase();
        self.files
            .iter()
            .filter(|name| name.to_lowercase().contains(&needle))
            .map(String::as_str)
            .collect()
    }

    /// The chosen file, once one has been clicked
    pub fn selection(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Whether the vault had no images at all
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn picker() -> FilePicker {
        FilePicker::new(vec![
            "shots/Screen.png".into(),
            "cat.jpg".into(),
            "dog.webp".into(),
        ])
    }

    #[test]
    fn test_visible_is_sorted() {
        assert_eq!(picker().visible(), vec!["cat.jpg", "dog.webp", "shots/Screen.png"]);
    }

    #[test]
    fn test_filter_is_case_insensitive() {
        let mut picker = picker();
        picker.update(PickerMsg::FilterChanged("screen".into()));
        assert_eq!(picker.visible(), vec!["shots/Screen.png"]);
    }

    #[test]
    fn test_selection_survives_filter_change() {
        let mut picker = picker();
        picker.update(PickerMsg::FileSelected(0));
        assert_eq!(picker.selection(), Some("cat.jpg"));

        picker.update(PickerMsg::FilterChanged("dog".into()));
        assert_eq!(picker.selection(), Some("cat.jpg"));
    }

    #[test]
    fn test_select_out_of_range_is_ignored() {
        let mut picker = picker();
        picker.update(PickerMsg::FileSelected(17));
        assert_eq!(picker.selection(), None);
    }
}
