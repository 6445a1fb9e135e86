use crate::error::{MultiFileError, MultiFileResult};
use crate::size::SizeUnits;

/// Class names and attributes of the page markup contract.
///
/// Defaults match markup of the form:
///
/// ```html
/// <div class="js-field-file-multiple">
///   <input type="file" multiple class="js-field-input">
///   <a href="#" class="js-file-button-attach">Attach files</a>
/// </div>
/// ```
///
/// Rows are rendered into a `div.uploaded-files-container` inserted right after
/// the field.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MarkupConfig {
    /// Marker class of an upload field region
    pub field_class: String,
    /// Marker class of the native file input inside a field
    pub input_class: String,
    /// Marker class of the browse trigger inside a field
    pub browse_class: String,
    /// Marker class of a row's delete trigger
    pub delete_class: String,
    /// Extra decoration classes put on the delete trigger
    pub delete_decoration: String,
    /// Class of a file row
    pub row_class: String,
    /// Attribute holding the row's file identifier
    pub row_id_attribute: String,
    /// Classes of the box wrapping a row's content
    pub file_box_classes: String,
    /// Class of the inner wrapper inside the box
    pub inner_class: String,
    /// Class of the element showing name and size
    pub name_class: String,
    /// Class of the list container
    pub container_class: String,
    /// Class toggled on the field while files are dragged over it
    pub highlight_class: String,
}

impl Default for MarkupConfig {
    fn default() -> Self {
        Self {
            field_class: "js-field-file-multiple".into(),
            input_class: "js-field-input".into(),
            browse_class: "js-file-button-attach".into(),
            delete_class: "button-file-del".into(),
            delete_decoration: "btn-action-ico ico-trash".into(),
            row_class: "frm-field".into(),
            row_id_attribute: "data-file-id".into(),
            file_box_classes: "frm-field-file type-att file-active".into(),
            inner_class: "file-inner-wrap".into(),
            name_class: "file-name".into(),
            container_class: "uploaded-files-container".into(),
            highlight_class: "highlight".into(),
        }
    }
}

impl MarkupConfig {
    /// Set the field marker class.
    pub fn field_class(mut self, class: impl Into<String>) -> Self {
        self.field_class = class.into();
        self
    }
    /// Set the input marker class.
    pub fn input_class(mut self, class: impl Into<String>) -> Self {
        self.input_class = class.into();
        self
    }
    /// Set the browse trigger marker class.
    pub fn browse_class(mut self, class: impl Into<String>) -> Self {
        self.browse_class = class.into();
        self
    }
    /// Set the delete trigger marker class.
    pub fn delete_class(mut self, class: impl Into<String>) -> Self {
        self.delete_class = class.into();
        self
    }
    /// Set the list container class.
    pub fn container_class(mut self, class: impl Into<String>) -> Self {
        self.container_class = class.into();
        self
    }
    /// Set the highlight class.
    pub fn highlight_class(mut self, class: impl Into<String>) -> Self {
        self.highlight_class = class.into();
        self
    }

    /// CSS selector for a single class name.
    pub fn selector(class: &str) -> String {
        format!(".{class}")
    }

    /// CSS selector matching any row carrying an identifier.
    pub fn row_selector(&self) -> String {
        format!("[{}]", self.row_id_attribute)
    }

    /// Reject configurations the DOM layer cannot work with.
    ///
    /// Every marker must be a single non-empty class token; the identifier
    /// attribute must be non-empty.
    pub fn validate(&self) -> MultiFileResult<()> {
        let markers = [
            ("field_class", &self.field_class),
            ("input_class", &self.input_class),
            ("browse_class", &self.browse_class),
            ("delete_class", &self.delete_class),
            ("container_class", &self.container_class),
            ("highlight_class", &self.highlight_class),
        ];
        for (name, value) in markers {
            if value.is_empty() || value.contains(char::is_whitespace) {
                return Err(MultiFileError::config(format!(
                    "{name} must be a single class name, got {value:?}"
                )));
            }
        }
        if self.row_id_attribute.trim().is_empty() {
            return Err(MultiFileError::config("row_id_attribute is empty"));
        }
        Ok(())
    }
}

/// Everything a page needs to configure its upload fields.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct WidgetConfig {
    /// Markup contract
    pub markup: MarkupConfig,
    /// Unit labels for file sizes
    pub units: SizeUnits,
}
