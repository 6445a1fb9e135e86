#[cfg(feature = "tracing")]
use tracing::trace;

/// The four drag events a field listens to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DragKind {
    /// `dragenter`
    Enter,
    /// `dragover`
    Over,
    /// `dragleave`
    Leave,
    /// `drop`
    Drop,
}

impl DragKind {
    /// All drag kinds, in DOM listener registration order.
    pub const ALL: [DragKind; 4] = [
        DragKind::Enter,
        DragKind::Over,
        DragKind::Leave,
        DragKind::Drop,
    ];

    /// DOM event type name.
    pub fn event_name(self) -> &'static str {
        match self {
            DragKind::Enter => "dragenter",
            DragKind::Over => "dragover",
            DragKind::Leave => "dragleave",
            DragKind::Drop => "drop",
        }
    }
}

/// Hover state of one field.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DropZoneState {
    /// Nothing dragged over the field
    #[default]
    Idle,
    /// Files are being dragged over the field
    Hovering,
}

/// What the host must do after a drag event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transition {
    /// State after the event
    pub state: DropZoneState,
    /// `Some(true)` to add the highlight, `Some(false)` to remove it, `None` to leave it
    pub highlight: Option<bool>,
    /// Hand the event's file group to the selection pipeline
    pub forward_files: bool,
}

/// Idle/hovering state machine for one field.
#[derive(Clone, Copy, Debug, Default)]
pub struct DropZone {
    state: DropZoneState,
}

impl DropZone {
    /// Create an idle drop zone.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    pub fn state(&self) -> DropZoneState {
        self.state
    }

    /// Feed one drag event.
    ///
    /// `dragover` fires continuously while hovering; it re-applies the
    /// highlight, which is idempotent on the host side.
    pub fn on_drag(&mut self, kind: DragKind) -> Transition {
        let (state, highlight) = match kind {
            DragKind::Enter | DragKind::Over => (DropZoneState::Hovering, Some(true)),
            DragKind::Leave | DragKind::Drop => (DropZoneState::Idle, Some(false)),
        };
        #[cfg(feature = "tracing")]
        if state != self.state {
            trace!(from = ?self.state, to = ?state, event = kind.event_name(), "drop zone");
        }
        self.state = state;
        Transition {
            state,
            highlight,
            forward_files: kind == DragKind::Drop,
        }
    }
}
