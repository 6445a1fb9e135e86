use std::fmt;

use indexmap::IndexMap;

#[cfg(feature = "tracing")]
use tracing::{debug, trace};

use crate::error::{MultiFileError, MultiFileResult};
use crate::events::FieldEvent;
use crate::field::FieldController;
use crate::file::FileHandle;
use crate::id::FileId;
use crate::size::SizeUnits;
use crate::view::FieldView;

/// Opaque identifier for an upload field owned by a [`FieldManager`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FieldKey(u32);

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "field#{}", self.0)
    }
}

/// Owner of every upload field on a page.
///
/// Each field gets its own [`FieldController`]; fields share nothing, not even
/// the identifier space. A delete is therefore always addressed to a field,
/// which the host resolves from where the clicked row sits.
#[derive(Debug)]
pub struct FieldManager<F, V> {
    next_key: u32,
    fields: IndexMap<FieldKey, FieldController<F, V>>,
    units: SizeUnits,
}

impl<F, V> Default for FieldManager<F, V> {
    fn default() -> Self {
        Self::new(SizeUnits::default())
    }
}

impl<F, V> FieldManager<F, V> {
    /// Create a manager whose fields format sizes with `units`.
    pub fn new(units: SizeUnits) -> Self {
        Self {
            next_key: 0,
            fields: IndexMap::new(),
            units,
        }
    }

    /// Returns `true` if the field exists.
    pub fn contains(&self, key: FieldKey) -> bool {
        self.fields.contains_key(&key)
    }

    /// Controller of a field.
    pub fn field(&self, key: FieldKey) -> Option<&FieldController<F, V>> {
        self.fields.get(&key)
    }

    /// Field keys in attachment order.
    pub fn keys(&self) -> impl Iterator<Item = FieldKey> + '_ {
        self.fields.keys().copied()
    }

    /// Number of attached fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` when no field is attached.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<F, V> FieldManager<F, V>
where
    F: FileHandle,
    V: FieldView<F>,
{
    /// Attach a field rendered through `view`.
    pub fn add_field(&mut self, view: V) -> FieldKey {
        let units = self.units.clone();
        self.add_field_with_units(view, units)
    }

    /// Attach a field that formats sizes with its own unit labels.
    pub fn add_field_with_units(&mut self, view: V, units: SizeUnits) -> FieldKey {
        self.insert_field(FieldController::new(view, units))
    }

    /// Attach an already configured controller.
    pub fn insert_field(&mut self, controller: FieldController<F, V>) -> FieldKey {
        self.next_key = self.next_key.wrapping_add(1);
        let key = FieldKey(self.next_key);
        self.fields.insert(key, controller);
        #[cfg(feature = "tracing")]
        debug!(%key, "upload field attached");
        key
    }

    /// Detach a field and return its controller (if any).
    pub fn remove_field(&mut self, key: FieldKey) -> Option<FieldController<F, V>> {
        self.fields.shift_remove(&key)
    }

    /// Route an event to the field it happened on.
    pub fn dispatch(&mut self, key: FieldKey, event: FieldEvent<F>) -> MultiFileResult<()> {
        self.controller(key)?.handle(event)
    }

    /// Handle a delete click on the row bound to `id` inside field `key`.
    ///
    /// Returns `false` when the field no longer holds `id` (already removed).
    /// A detached field is not an error here: its rows may outlive it on the
    /// page.
    pub fn delete(&mut self, key: FieldKey, id: &FileId) -> MultiFileResult<bool> {
        let Some(ctrl) = self.fields.get_mut(&key) else {
            #[cfg(feature = "tracing")]
            trace!(%key, %id, "delete click for a detached field");
            return Ok(false);
        };
        ctrl.on_delete_clicked(id)
    }

    fn controller(&mut self, key: FieldKey) -> MultiFileResult<&mut FieldController<F, V>> {
        self.fields
            .get_mut(&key)
            .ok_or(MultiFileError::UnknownField(key))
    }
}
