//! DOM implementation of [`FieldView`].

use multifile::{FieldView, FileHandle, FileId, MarkupConfig, MultiFileError, MultiFileResult};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{DataTransfer, Document, Element, File, FileList, HtmlElement, HtmlInputElement};

/// A browser `File` as tracked by the registry.
#[derive(Clone, Debug)]
pub struct WebFile(pub File);

impl FileHandle for WebFile {
    fn name(&self) -> String {
        self.0.name()
    }

    fn size(&self) -> u64 {
        // Blob sizes are whole byte counts exposed as doubles
        self.0.size() as u64
    }
}

/// Collect a `FileList` into owned handles, keeping its order.
pub(crate) fn collect_files(list: Option<FileList>) -> Vec<WebFile> {
    let Some(list) = list else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.get(i))
        .map(WebFile)
        .collect()
}

pub(crate) fn dom_err(operation: &'static str) -> impl FnOnce(JsValue) -> MultiFileError {
    move |v| MultiFileError::dom(format!("{operation}: {v:?}"))
}

/// One upload field's elements.
#[derive(Debug)]
pub struct DomFieldView {
    document: Document,
    field: Element,
    input: HtmlInputElement,
    browse: Element,
    markup: MarkupConfig,
    container: Option<Element>,
}

impl DomFieldView {
    /// Resolve the input and browse trigger inside `field`.
    pub fn new(document: Document, field: Element, markup: MarkupConfig) -> MultiFileResult<Self> {
        let input_sel = MarkupConfig::selector(&markup.input_class);
        let input = field
            .query_selector(&input_sel)
            .map_err(dom_err("query input"))?
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
            .ok_or_else(|| MultiFileError::missing_element(input_sel))?;

        let browse_sel = MarkupConfig::selector(&markup.browse_class);
        let browse = field
            .query_selector(&browse_sel)
            .map_err(dom_err("query browse trigger"))?
            .ok_or_else(|| MultiFileError::missing_element(browse_sel))?;

        Ok(Self {
            document,
            field,
            input,
            browse,
            markup,
            container: None,
        })
    }

    /// The native file input.
    pub fn input(&self) -> &HtmlInputElement {
        &self.input
    }

    /// The browse trigger.
    pub fn browse(&self) -> &Element {
        &self.browse
    }

    fn div(&self, class: &str) -> MultiFileResult<Element> {
        let el = self
            .document
            .create_element("div")
            .map_err(dom_err("create div"))?;
        el.set_class_name(class);
        Ok(el)
    }

    /// An existing container already sitting right after the field.
    fn adjacent_container(&self) -> Option<Element> {
        self.field
            .next_element_sibling()
            .filter(|el| el.class_list().contains(&self.markup.container_class))
    }
}

impl FieldView<WebFile> for DomFieldView {
    type Container = Element;

    fn ensure_container(&mut self) -> MultiFileResult<Element> {
        if let Some(c) = self.container.as_ref().filter(|c| c.is_connected()) {
            return Ok(c.clone());
        }
        let container = match self.adjacent_container() {
            Some(existing) => existing,
            None => {
                let div = self.div(&self.markup.container_class)?;
                self.field
                    .after_with_node_1(&div)
                    .map_err(dom_err("insert list container"))?;
                div
            }
        };
        self.container = Some(container.clone());
        Ok(container)
    }

    fn container(&self) -> Option<Element> {
        self.container.clone()
    }

    fn add_row(
        &mut self,
        container: &Element,
        id: &FileId,
        name: &str,
        size_text: &str,
    ) -> MultiFileResult<()> {
        let m = &self.markup;

        let row = self.div(&m.row_class)?;
        row.set_attribute(&m.row_id_attribute, id.as_str())
            .map_err(dom_err("bind row id"))?;
        let file_box = self.div(&m.file_box_classes)?;
        let inner = self.div(&m.inner_class)?;

        let label = self.div(&m.name_class)?;
        label.set_text_content(Some(&format!("{name} {size_text}")));

        let delete = self
            .document
            .create_element("a")
            .map_err(dom_err("create delete trigger"))?;
        delete
            .set_attribute("href", "#")
            .map_err(dom_err("set delete href"))?;
        delete.set_class_name(format!("{} {}", m.delete_decoration, m.delete_class).trim());

        inner
            .append_with_node_2(&label, &delete)
            .map_err(dom_err("fill row"))?;
        file_box
            .append_with_node_1(&inner)
            .map_err(dom_err("fill row"))?;
        row.append_with_node_1(&file_box)
            .map_err(dom_err("fill row"))?;
        container
            .append_with_node_1(&row)
            .map_err(dom_err("append row"))?;
        Ok(())
    }

    fn remove_row(&mut self, container: &Element, id: &FileId) -> MultiFileResult<()> {
        let rows = container
            .query_selector_all(&self.markup.row_selector())
            .map_err(dom_err("query rows"))?;
        for i in 0..rows.length() {
            let Some(row) = rows.item(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
                continue;
            };
            if row.get_attribute(&self.markup.row_id_attribute).as_deref() == Some(id.as_str()) {
                row.remove();
                break;
            }
        }
        Ok(())
    }

    fn prune_container_if_empty(&mut self, container: &Element) -> MultiFileResult<bool> {
        if container.child_element_count() > 0 {
            return Ok(false);
        }
        container.remove();
        self.container = None;
        Ok(true)
    }

    fn clear_selection_text(&mut self) -> MultiFileResult<()> {
        self.input.set_value("");
        Ok(())
    }

    fn push_files(&mut self, files: &[WebFile]) -> MultiFileResult<()> {
        // FileList is immutable; every change needs a fresh DataTransfer
        let dt = DataTransfer::new().map_err(dom_err("construct DataTransfer"))?;
        let items = dt.items();
        for f in files {
            items
                .add_with_file(&f.0)
                .map_err(dom_err("add file to DataTransfer"))?;
        }
        self.input.set_files(dt.files().as_ref());
        Ok(())
    }

    fn set_highlight(&mut self, on: bool) -> MultiFileResult<()> {
        let classes = self.field.class_list();
        let class = &self.markup.highlight_class;
        if on {
            classes.add_1(class).map_err(dom_err("add highlight"))
        } else {
            classes.remove_1(class).map_err(dom_err("remove highlight"))
        }
    }

    fn open_picker(&mut self) -> MultiFileResult<()> {
        let input: &HtmlElement = self.input.as_ref();
        input.click();
        Ok(())
    }
}
