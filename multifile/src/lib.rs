#![deny(missing_docs)]
//! Accumulating multi-file upload fields.
//!
//! A browser `<input type="file" multiple>` forgets its previous selection every
//! time the user picks again. This crate keeps an ordered [`FileRegistry`] per
//! field as the source of truth and, after every change, rebuilds the file
//! collection the native input reports so a form submission always carries
//! exactly the files shown in the list.
//!
//! The crate is DOM-free. Rendering and the native input are reached through the
//! [`FieldView`] trait:
//! - [`MemoryFieldView`] is a headless implementation used by tests and hosts
//!   that only need the bookkeeping
//! - `multifile-web` implements it over real DOM elements with `web-sys`
//!
//! ```
//! use multifile::{FieldController, MemoryFieldView, SimpleFile, SizeUnits};
//!
//! let mut field: FieldController<SimpleFile, MemoryFieldView<SimpleFile>> =
//!     FieldController::new(MemoryFieldView::new(), SizeUnits::default());
//! field
//!     .on_files_selected(vec![SimpleFile::new("a.txt", 1536), SimpleFile::new("b.txt", 10)])
//!     .unwrap();
//! assert_eq!(field.view().input_files().len(), 2);
//! assert_eq!(field.view().rows()[0].size_text, "1.5 KB");
//!
//! let first = field.ids()[0].clone();
//! field.on_delete_clicked(&first).unwrap();
//! assert_eq!(field.view().input_files()[0].name, "b.txt");
//! ```

mod config;
mod drop_zone;
mod error;
mod events;
mod field;
mod file;
mod id;
mod manager;
mod registry;
mod size;
mod view;

pub use config::{MarkupConfig, WidgetConfig};
pub use drop_zone::{DragKind, DropZone, DropZoneState, Transition};
pub use error::{MultiFileError, MultiFileResult};
pub use events::FieldEvent;
pub use field::FieldController;
pub use file::{FileHandle, SimpleFile};
pub use id::{FileId, generate_file_id};
pub use manager::{FieldKey, FieldManager};
pub use registry::{FileRegistry, TrackedFile};
pub use size::{SizeUnits, format_size};
pub use view::{FieldView, MemoryFieldView, RenderedRow};
