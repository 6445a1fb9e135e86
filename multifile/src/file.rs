/// A selected file as far as the registry cares: something with a display name
/// and a byte size.
///
/// The web crate implements this for `web_sys::File`; tests use [`SimpleFile`].
pub trait FileHandle: Clone {
    /// File name shown in the row.
    fn name(&self) -> String;
    /// Size in bytes.
    fn size(&self) -> u64;
}

/// Plain in-memory file description.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimpleFile {
    /// File name
    pub name: String,
    /// Size in bytes
    pub size: u64,
}

impl SimpleFile {
    /// Create a file description.
    pub fn new(name: impl Into<String>, size: u64) -> Self {
        Self {
            name: name.into(),
            size,
        }
    }
}

impl FileHandle for SimpleFile {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn size(&self) -> u64 {
        self.size
    }
}
