use multifile::{
    FieldController, FieldView, FileId, MemoryFieldView, MultiFileError, MultiFileResult,
    SimpleFile, SizeUnits,
};

/// Memory view whose row operations can be told to fail.
#[derive(Default)]
struct FlakyView {
    inner: MemoryFieldView<SimpleFile>,
    adds: usize,
    fail_add_at: Option<usize>,
    fail_remove: bool,
}

impl FieldView<SimpleFile> for FlakyView {
    type Container = u32;

    fn ensure_container(&mut self) -> MultiFileResult<u32> {
        self.inner.ensure_container()
    }

    fn container(&self) -> Option<u32> {
        FieldView::<SimpleFile>::container(&self.inner)
    }

    fn add_row(
        &mut self,
        container: &u32,
        id: &FileId,
        name: &str,
        size_text: &str,
    ) -> MultiFileResult<()> {
        let nth = self.adds;
        self.adds += 1;
        if self.fail_add_at == Some(nth) {
            return Err(MultiFileError::dom("append row"));
        }
        self.inner.add_row(container, id, name, size_text)
    }

    fn remove_row(&mut self, container: &u32, id: &FileId) -> MultiFileResult<()> {
        if self.fail_remove {
            return Err(MultiFileError::dom("remove row"));
        }
        FieldView::<SimpleFile>::remove_row(&mut self.inner, container, id)
    }

    fn prune_container_if_empty(&mut self, container: &u32) -> MultiFileResult<bool> {
        FieldView::<SimpleFile>::prune_container_if_empty(&mut self.inner, container)
    }

    fn clear_selection_text(&mut self) -> MultiFileResult<()> {
        FieldView::<SimpleFile>::clear_selection_text(&mut self.inner)
    }

    fn push_files(&mut self, files: &[SimpleFile]) -> MultiFileResult<()> {
        self.inner.push_files(files)
    }

    fn set_highlight(&mut self, on: bool) -> MultiFileResult<()> {
        FieldView::<SimpleFile>::set_highlight(&mut self.inner, on)
    }

    fn open_picker(&mut self) -> MultiFileResult<()> {
        FieldView::<SimpleFile>::open_picker(&mut self.inner)
    }
}

type Field = FieldController<SimpleFile, FlakyView>;

fn field(view: FlakyView) -> Field {
    FieldController::new(view, SizeUnits::english())
}

fn batch(prefix: &str, n: usize) -> Vec<SimpleFile> {
    (0..n)
        .map(|i| SimpleFile::new(format!("{prefix}{i}.bin"), 10))
        .collect()
}

fn assert_in_sync(f: &Field) {
    let registry: Vec<String> = f.files().into_iter().map(|x| x.name).collect();
    let rows: Vec<String> = f.view().inner.rows().iter().map(|r| r.name.clone()).collect();
    let input: Vec<String> = f
        .view()
        .inner
        .input_files()
        .iter()
        .map(|x| x.name.clone())
        .collect();
    assert_eq!(rows, registry);
    assert_eq!(input, registry);
}

#[test]
fn failed_row_keeps_the_file_out_of_the_input() {
    let mut f = field(FlakyView {
        fail_add_at: Some(1),
        ..FlakyView::default()
    });

    let err = f.on_files_selected(batch("f", 3)).unwrap_err();
    assert!(matches!(err, MultiFileError::Dom { .. }));

    // the group stops at the failed row; the file before it stays
    assert_eq!(f.len(), 1);
    assert_eq!(f.view().inner.rows().len(), 1);
    assert_eq!(f.view().inner.input_files().len(), 1);
    assert_eq!(f.view().inner.input_files()[0].name, "f0.bin");
    assert_in_sync(&f);
}

#[test]
fn failed_first_row_leaves_no_container() {
    let mut f = field(FlakyView {
        fail_add_at: Some(0),
        ..FlakyView::default()
    });

    assert!(f.on_files_selected(batch("f", 2)).is_err());

    assert!(f.is_empty());
    assert!(!f.view().inner.has_container());
    assert!(f.view().inner.input_files().is_empty());
    assert_in_sync(&f);
}

#[test]
fn later_selection_recovers_after_a_failed_row() {
    let mut f = field(FlakyView {
        fail_add_at: Some(1),
        ..FlakyView::default()
    });
    assert!(f.on_files_selected(batch("a", 2)).is_err());

    f.on_files_selected(batch("b", 2)).unwrap();
    assert_eq!(f.len(), 3);
    assert_in_sync(&f);
}

#[test]
fn failed_row_removal_keeps_the_file_registered() {
    let mut f = field(FlakyView::default());
    f.on_files_selected(batch("f", 3)).unwrap();
    let victim = f.ids()[1].clone();

    f.view_mut().fail_remove = true;
    assert!(f.on_delete_clicked(&victim).is_err());

    assert_eq!(f.len(), 3);
    assert_eq!(f.view().inner.rows().len(), 3);
    assert_eq!(f.view().inner.input_files().len(), 3);
    assert_in_sync(&f);

    // the same click can be retried once the page cooperates
    f.view_mut().fail_remove = false;
    assert!(f.on_delete_clicked(&victim).unwrap());
    assert_eq!(f.len(), 2);
    assert!(f.view().inner.rows().iter().all(|r| r.id != victim));
    assert_in_sync(&f);
}
