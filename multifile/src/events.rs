use crate::drop_zone::DragKind;
use crate::id::FileId;

/// Domain events for driving one upload field.
///
/// Emitted by the DOM layer and handled by
/// [`FieldController::handle`](crate::FieldController::handle). They carry no
/// DOM types beyond the file handles, so the reducer runs headless in tests.
#[derive(Clone, Debug)]
pub enum FieldEvent<F> {
    /// `dragenter`, `dragover` or `dragleave` on the field
    Drag(DragKind),
    /// `drop` on the field with the dropped file group
    Drop(Vec<F>),
    /// The browse trigger was clicked
    BrowseClicked,
    /// The native input reported a new selection
    InputChanged(Vec<F>),
    /// A row's delete trigger was clicked
    DeleteClicked(FileId),
}
