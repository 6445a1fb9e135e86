#[cfg(feature = "tracing")]
use tracing::{debug, trace};

use crate::drop_zone::{DragKind, DropZone, DropZoneState};
use crate::error::MultiFileResult;
use crate::events::FieldEvent;
use crate::file::FileHandle;
use crate::id::FileId;
use crate::registry::FileRegistry;
use crate::size::{SizeUnits, format_size};
use crate::view::FieldView;

/// Orchestrates one upload field: registry, rendered rows, drop zone and the
/// native input's file collection.
///
/// After every call that changes the registry, the input's collection is
/// rebuilt from [`FileRegistry::snapshot`] so it always equals the rows on
/// screen, in the same order.
#[derive(Debug)]
pub struct FieldController<F, V> {
    registry: FileRegistry<F>,
    view: V,
    drop_zone: DropZone,
    units: SizeUnits,
}

impl<F, V> FieldController<F, V>
where
    F: FileHandle,
    V: FieldView<F>,
{
    /// Create a controller over `view` with an empty registry.
    pub fn new(view: V, units: SizeUnits) -> Self {
        Self::with_registry(FileRegistry::new(), view, units)
    }

    /// Create a controller with a caller-provided (usually empty) registry.
    pub fn with_registry(registry: FileRegistry<F>, view: V, units: SizeUnits) -> Self {
        Self {
            registry,
            view,
            drop_zone: DropZone::new(),
            units,
        }
    }

    /// Add a selected or dropped file group, preserving its order.
    ///
    /// An empty group is ignored: no rows, no container, no rebuild.
    pub fn on_files_selected(&mut self, files: Vec<F>) -> MultiFileResult<()> {
        if files.is_empty() {
            #[cfg(feature = "tracing")]
            trace!("empty file group ignored");
            return Ok(());
        }

        let container = self.view.ensure_container()?;
        let mut outcome = Ok(());
        for file in files {
            let name = file.name();
            let size_text = format_size(file.size(), &self.units);
            let id = match self.registry.register(file) {
                Ok(id) => id,
                Err(e) => {
                    outcome = Err(e);
                    break;
                }
            };
            if let Err(e) = self.view.add_row(&container, &id, &name, &size_text) {
                // a file without a row must not reach the input
                self.registry.unregister(&id);
                outcome = Err(e);
                break;
            }
        }

        if outcome.is_ok() {
            // The native element forgets its own selection; the registry keeps it.
            outcome = self.view.clear_selection_text();
        } else {
            // drops a container created for a group whose first row failed
            let _ = self.view.prune_container_if_empty(&container);
        }
        // files registered before a failure still get pushed
        let synced = self.sync_input();
        outcome.and(synced)
    }

    /// Remove the file bound to `id` and its row.
    ///
    /// Returns `false` without touching anything when `id` is not registered,
    /// e.g. a second click on a row that is already gone. The entry is only
    /// unregistered once its row is gone, so a failed removal can be retried.
    pub fn on_delete_clicked(&mut self, id: &FileId) -> MultiFileResult<bool> {
        if !self.registry.contains(id) {
            #[cfg(feature = "tracing")]
            trace!(%id, "delete of unknown file ignored");
            return Ok(false);
        }

        let container = self.view.container();
        if let Some(container) = &container {
            self.view.remove_row(container, id)?;
        }
        self.registry.unregister(id);

        let pruned = match &container {
            Some(container) => self.view.prune_container_if_empty(container).map(|_| ()),
            None => Ok(()),
        };
        let synced = self.sync_input();
        pruned.and(synced)?;
        Ok(true)
    }

    /// Apply one field event.
    pub fn handle(&mut self, event: FieldEvent<F>) -> MultiFileResult<()> {
        match event {
            FieldEvent::Drag(kind) => {
                let t = self.drop_zone.on_drag(kind);
                // a bare drop event carries no files; only the highlight changes
                if let Some(on) = t.highlight {
                    self.view.set_highlight(on)?;
                }
            }
            FieldEvent::Drop(files) => {
                let t = self.drop_zone.on_drag(DragKind::Drop);
                if let Some(on) = t.highlight {
                    self.view.set_highlight(on)?;
                }
                if t.forward_files {
                    self.on_files_selected(files)?;
                }
            }
            FieldEvent::BrowseClicked => {
                self.view.open_picker()?;
            }
            FieldEvent::InputChanged(files) => {
                self.on_files_selected(files)?;
            }
            FieldEvent::DeleteClicked(id) => {
                self.on_delete_clicked(&id)?;
            }
        }
        Ok(())
    }

    /// Rebuild the native collection from the registry and push it.
    fn sync_input(&mut self) -> MultiFileResult<()> {
        let files = self.registry.snapshot();
        self.view.push_files(&files)?;
        #[cfg(feature = "tracing")]
        debug!(count = files.len(), "input file collection rebuilt");
        Ok(())
    }

    /// Files currently held, in display order.
    pub fn files(&self) -> Vec<F> {
        self.registry.snapshot()
    }
}

impl<F, V> FieldController<F, V> {
    /// Identifiers currently held, in display order.
    pub fn ids(&self) -> Vec<FileId> {
        self.registry.ids()
    }

    /// Number of files held.
    pub fn len(&self) -> usize {
        self.registry.len()
    }

    /// Returns `true` when the field holds no files.
    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    /// Drag-over state.
    pub fn drop_state(&self) -> DropZoneState {
        self.drop_zone.state()
    }

    /// The underlying view.
    pub fn view(&self) -> &V {
        &self.view
    }

    /// Mutable access to the underlying view.
    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::file::SimpleFile;
    use crate::view::MemoryFieldView;

    type Field = FieldController<SimpleFile, MemoryFieldView<SimpleFile>>;

    fn field() -> Field {
        FieldController::new(MemoryFieldView::new(), SizeUnits::english())
    }

    fn files(names: &[&str]) -> Vec<SimpleFile> {
        names
            .iter()
            .enumerate()
            .map(|(i, n)| SimpleFile::new(*n, 1024 * (i as u64 + 1)))
            .collect()
    }

    #[test]
    fn selection_renders_rows_and_pushes_collection() {
        let mut f = field();
        f.view_mut().set_input_value("C:\\fakepath\\a.txt");
        f.on_files_selected(files(&["a.txt", "b.txt"])).unwrap();

        let rows = f.view().rows();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name, "a.txt");
        assert_eq!(rows[0].size_text, "1.0 KB");
        assert_eq!(rows[1].size_text, "2.0 KB");
        assert_eq!(f.view().input_files().len(), 2);
        assert_eq!(f.view().input_value(), "");
        assert_eq!(f.view().pushes(), 1);
    }

    #[test]
    fn empty_selection_is_ignored() {
        let mut f = field();
        f.on_files_selected(Vec::new()).unwrap();
        assert!(!f.view().has_container());
        assert_eq!(f.view().pushes(), 0);
        assert!(f.is_empty());
    }

    #[test]
    fn delete_unknown_is_noop() {
        let mut f = field();
        f.on_files_selected(files(&["a"])).unwrap();
        let pushes = f.view().pushes();
        assert!(!f.on_delete_clicked(&FileId::from("file_nope")).unwrap());
        assert_eq!(f.view().pushes(), pushes);
        assert_eq!(f.view().rows().len(), 1);
    }

    #[test]
    fn drag_events_toggle_highlight() {
        let mut f = field();
        f.handle(FieldEvent::Drag(DragKind::Enter)).unwrap();
        assert!(f.view().is_highlighted());
        assert_eq!(f.drop_state(), DropZoneState::Hovering);
        f.handle(FieldEvent::Drag(DragKind::Leave)).unwrap();
        assert!(!f.view().is_highlighted());
        assert_eq!(f.drop_state(), DropZoneState::Idle);
    }

    #[test]
    fn drop_adds_files_and_clears_highlight() {
        let mut f = field();
        f.handle(FieldEvent::Drag(DragKind::Over)).unwrap();
        f.handle(FieldEvent::Drop(files(&["x", "y", "z"]))).unwrap();
        assert!(!f.view().is_highlighted());
        assert_eq!(f.len(), 3);
        assert_eq!(f.view().input_files().len(), 3);
    }

    #[test]
    fn bare_drop_event_only_clears_highlight() {
        let mut f = field();
        f.on_files_selected(files(&["a"])).unwrap();
        f.handle(FieldEvent::Drag(DragKind::Enter)).unwrap();
        let pushes = f.view().pushes();

        f.handle(FieldEvent::Drag(DragKind::Drop)).unwrap();

        assert!(!f.view().is_highlighted());
        assert_eq!(f.drop_state(), DropZoneState::Idle);
        assert_eq!(f.view().pushes(), pushes);
        assert_eq!(f.len(), 1);
    }

    #[test]
    fn browse_click_opens_picker() {
        let mut f = field();
        f.handle(FieldEvent::BrowseClicked).unwrap();
        assert_eq!(f.view().pickers_opened(), 1);
        assert!(f.is_empty());
    }
}
