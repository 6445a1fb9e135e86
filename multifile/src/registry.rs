use indexmap::IndexMap;

#[cfg(feature = "tracing")]
use tracing::trace;

use crate::error::MultiFileResult;
use crate::file::FileHandle;
use crate::id::{FileId, generate_file_id};

/// A registered file paired with the identifier of its row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrackedFile<F> {
    /// Identifier bound to the rendered row
    pub id: FileId,
    /// The file handle; owned by this entry only
    pub file: F,
}

/// Insertion-ordered store of the files one upload field currently holds.
///
/// This is the source of truth for the field. The native input's file
/// collection is derived from [`snapshot`](Self::snapshot) after every change
/// and is never read back.
#[derive(Clone, Debug)]
pub struct FileRegistry<F> {
    entries: IndexMap<FileId, TrackedFile<F>>,
    id_source: fn() -> MultiFileResult<FileId>,
}

impl<F> Default for FileRegistry<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F> FileRegistry<F> {
    /// Create an empty registry using random identifiers.
    pub fn new() -> Self {
        Self::with_id_source(generate_file_id)
    }

    /// Create an empty registry drawing identifiers from `id_source`.
    pub fn with_id_source(id_source: fn() -> MultiFileResult<FileId>) -> Self {
        Self {
            entries: IndexMap::new(),
            id_source,
        }
    }

    /// Insert `file` at the end and return its fresh identifier.
    ///
    /// An identifier already live in this registry is never handed out twice.
    pub fn register(&mut self, file: F) -> MultiFileResult<FileId> {
        let id = loop {
            let candidate = (self.id_source)()?;
            if !self.entries.contains_key(&candidate) {
                break candidate;
            }
            #[cfg(feature = "tracing")]
            trace!(id = %candidate, "identifier clash, rerolling");
        };
        self.entries.insert(
            id.clone(),
            TrackedFile {
                id: id.clone(),
                file,
            },
        );
        #[cfg(feature = "tracing")]
        trace!(%id, len = self.entries.len(), "registered file");
        Ok(id)
    }

    /// Remove the entry for `id`, returning it. Absent identifiers are a no-op.
    pub fn unregister(&mut self, id: &FileId) -> Option<TrackedFile<F>> {
        // shift_remove keeps the relative order of the remaining entries
        let removed = self.entries.shift_remove(id);
        #[cfg(feature = "tracing")]
        trace!(%id, removed = removed.is_some(), len = self.entries.len(), "unregister");
        removed
    }

    /// Returns `true` if `id` is live.
    pub fn contains(&self, id: &FileId) -> bool {
        self.entries.contains_key(id)
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when no files are registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Live identifiers in insertion order.
    pub fn ids(&self) -> Vec<FileId> {
        self.entries.keys().cloned().collect()
    }
}

impl<F: FileHandle> FileRegistry<F> {
    /// All live file handles in insertion order.
    ///
    /// Used to construct a brand-new native file collection.
    pub fn snapshot(&self) -> Vec<F> {
        self.entries.values().map(|t| t.file.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::file::SimpleFile;
    use std::cell::Cell;

    fn names(reg: &FileRegistry<SimpleFile>) -> Vec<String> {
        reg.snapshot().into_iter().map(|f| f.name).collect()
    }

    #[test]
    fn snapshot_follows_registration_order() {
        let mut reg = FileRegistry::new();
        for n in ["a", "b", "c"] {
            reg.register(SimpleFile::new(n, 1)).unwrap();
        }
        assert_eq!(names(&reg), ["a", "b", "c"]);
        assert_eq!(reg.len(), 3);
    }

    #[test]
    fn unregister_excises_without_reordering() {
        let mut reg = FileRegistry::new();
        let _a = reg.register(SimpleFile::new("a", 1)).unwrap();
        let b = reg.register(SimpleFile::new("b", 2)).unwrap();
        let _c = reg.register(SimpleFile::new("c", 3)).unwrap();
        let _d = reg.register(SimpleFile::new("d", 4)).unwrap();

        let removed = reg.unregister(&b).unwrap();
        assert_eq!(removed.file.name, "b");
        assert_eq!(names(&reg), ["a", "c", "d"]);
        assert!(!reg.contains(&b));
    }

    #[test]
    fn unregister_absent_is_noop() {
        let mut reg = FileRegistry::new();
        let a = reg.register(SimpleFile::new("a", 1)).unwrap();
        assert!(reg.unregister(&a).is_some());
        assert!(reg.unregister(&a).is_none());
        assert!(reg.unregister(&FileId::from("file_missing")).is_none());
        assert!(reg.is_empty());
    }

    #[test]
    fn snapshot_length_tracks_successful_removals() {
        let mut reg = FileRegistry::new();
        let mut live = Vec::new();
        for i in 0..20u64 {
            live.push(reg.register(SimpleFile::new(format!("f{i}"), i)).unwrap());
            if i % 3 == 2 {
                let victim = live.remove(0);
                assert!(reg.unregister(&victim).is_some());
                // second removal of the same id must not count
                assert!(reg.unregister(&victim).is_none());
            }
        }
        assert_eq!(reg.snapshot().len(), live.len());
        assert_eq!(reg.ids(), live);
    }

    thread_local! {
        static CALLS: Cell<u32> = const { Cell::new(0) };
    }

    fn clashing_source() -> MultiFileResult<FileId> {
        let n = CALLS.with(|c| {
            let n = c.get();
            c.set(n + 1);
            n
        });
        // first two calls collide on purpose
        Ok(FileId::new(if n < 2 { "file_same" } else { "file_other" }))
    }

    #[test]
    fn clashing_identifiers_are_rerolled() {
        CALLS.with(|c| c.set(0));
        let mut reg = FileRegistry::with_id_source(clashing_source);
        let first = reg.register(SimpleFile::new("a", 1)).unwrap();
        let second = reg.register(SimpleFile::new("b", 1)).unwrap();
        assert_eq!(first.as_str(), "file_same");
        assert_eq!(second.as_str(), "file_other");
        assert_eq!(reg.len(), 2);
    }
}
