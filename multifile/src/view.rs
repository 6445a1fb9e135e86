use crate::error::{MultiFileError, MultiFileResult};
use crate::id::FileId;

/// Rendering and native-input side of one upload field.
///
/// The controller only talks to the page through this trait, which keeps the
/// bookkeeping testable without a browser. Implementations own the field's
/// elements; the container is created lazily and dropped when it empties.
pub trait FieldView<F> {
    /// Handle to the list container rows are rendered into.
    type Container: Clone;

    /// Return the field's list container, creating and inserting it right
    /// after the field if absent.
    fn ensure_container(&mut self) -> MultiFileResult<Self::Container>;

    /// The current container, if one exists.
    fn container(&self) -> Option<Self::Container>;

    /// Append a row bound to `id` showing name and size, with a delete trigger.
    fn add_row(
        &mut self,
        container: &Self::Container,
        id: &FileId,
        name: &str,
        size_text: &str,
    ) -> MultiFileResult<()>;

    /// Remove the row bound to `id`. A missing row is not an error.
    fn remove_row(&mut self, container: &Self::Container, id: &FileId) -> MultiFileResult<()>;

    /// Remove the container iff it holds no rows. Returns `true` when removed.
    fn prune_container_if_empty(&mut self, container: &Self::Container) -> MultiFileResult<bool>;

    /// Clear the native input's transient selection text.
    fn clear_selection_text(&mut self) -> MultiFileResult<()>;

    /// Replace the native input's file collection with a new one built from
    /// `files`, in order.
    fn push_files(&mut self, files: &[F]) -> MultiFileResult<()>;

    /// Add or remove the drag-over highlight.
    fn set_highlight(&mut self, on: bool) -> MultiFileResult<()>;

    /// Open the native file picker.
    fn open_picker(&mut self) -> MultiFileResult<()>;
}

/// A row as rendered by [`MemoryFieldView`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderedRow {
    /// Bound identifier
    pub id: FileId,
    /// Displayed file name
    pub name: String,
    /// Displayed size text
    pub size_text: String,
}

#[derive(Clone, Debug)]
struct MemoryContainer {
    handle: u32,
    rows: Vec<RenderedRow>,
}

/// Headless [`FieldView`] that records what a page would show.
#[derive(Clone, Debug)]
pub struct MemoryFieldView<F> {
    container: Option<MemoryContainer>,
    containers_created: u32,
    input_files: Vec<F>,
    input_value: String,
    pushes: usize,
    highlighted: bool,
    pickers_opened: usize,
}

impl<F> Default for MemoryFieldView<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F> MemoryFieldView<F> {
    /// Create a view with no container and an empty input.
    pub fn new() -> Self {
        Self {
            container: None,
            containers_created: 0,
            input_files: Vec::new(),
            input_value: String::new(),
            pushes: 0,
            highlighted: false,
            pickers_opened: 0,
        }
    }

    /// Rows currently rendered, in document order. Empty without a container.
    pub fn rows(&self) -> &[RenderedRow] {
        match &self.container {
            Some(c) => &c.rows,
            None => &[],
        }
    }

    /// Whether the list container is present.
    pub fn has_container(&self) -> bool {
        self.container.is_some()
    }

    /// How many containers have been created over the view's lifetime.
    pub fn containers_created(&self) -> u32 {
        self.containers_created
    }

    /// Files the native input currently reports.
    pub fn input_files(&self) -> &[F] {
        &self.input_files
    }

    /// The input's visible selection text.
    pub fn input_value(&self) -> &str {
        &self.input_value
    }

    /// Simulate the browser filling the input's selection text after a pick.
    pub fn set_input_value(&mut self, value: impl Into<String>) {
        self.input_value = value.into();
    }

    /// Number of collection rebuilds pushed onto the input.
    pub fn pushes(&self) -> usize {
        self.pushes
    }

    /// Whether the highlight is on.
    pub fn is_highlighted(&self) -> bool {
        self.highlighted
    }

    /// Number of times the picker was opened.
    pub fn pickers_opened(&self) -> usize {
        self.pickers_opened
    }

    fn live_container(&mut self, handle: u32) -> MultiFileResult<&mut MemoryContainer> {
        match self.container.as_mut() {
            Some(c) if c.handle == handle => Ok(c),
            _ => Err(MultiFileError::dom(format!(
                "container #{handle} is no longer attached"
            ))),
        }
    }
}

impl<F: Clone> FieldView<F> for MemoryFieldView<F> {
    type Container = u32;

    fn ensure_container(&mut self) -> MultiFileResult<u32> {
        if let Some(c) = &self.container {
            return Ok(c.handle);
        }
        self.containers_created += 1;
        let handle = self.containers_created;
        self.container = Some(MemoryContainer {
            handle,
            rows: Vec::new(),
        });
        Ok(handle)
    }

    fn container(&self) -> Option<u32> {
        self.container.as_ref().map(|c| c.handle)
    }

    fn add_row(
        &mut self,
        container: &u32,
        id: &FileId,
        name: &str,
        size_text: &str,
    ) -> MultiFileResult<()> {
        let c = self.live_container(*container)?;
        c.rows.push(RenderedRow {
            id: id.clone(),
            name: name.to_owned(),
            size_text: size_text.to_owned(),
        });
        Ok(())
    }

    fn remove_row(&mut self, container: &u32, id: &FileId) -> MultiFileResult<()> {
        let c = self.live_container(*container)?;
        c.rows.retain(|r| &r.id != id);
        Ok(())
    }

    fn prune_container_if_empty(&mut self, container: &u32) -> MultiFileResult<bool> {
        let c = self.live_container(*container)?;
        if c.rows.is_empty() {
            self.container = None;
            return Ok(true);
        }
        Ok(false)
    }

    fn clear_selection_text(&mut self) -> MultiFileResult<()> {
        self.input_value.clear();
        Ok(())
    }

    fn push_files(&mut self, files: &[F]) -> MultiFileResult<()> {
        self.input_files = files.to_vec();
        self.pushes += 1;
        Ok(())
    }

    fn set_highlight(&mut self, on: bool) -> MultiFileResult<()> {
        self.highlighted = on;
        Ok(())
    }

    fn open_picker(&mut self) -> MultiFileResult<()> {
        self.pickers_opened += 1;
        Ok(())
    }
}
