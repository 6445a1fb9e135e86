//! Page discovery and event listeners.

use std::cell::RefCell;

use multifile::{
    DragKind, FieldEvent, FieldKey, FieldManager, FileId, MarkupConfig, MultiFileError,
    MultiFileResult, WidgetConfig,
};
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{Document, DragEvent, Element, Event, EventTarget, HtmlInputElement};

use crate::dom::{DomFieldView, WebFile, collect_files, dom_err};

/// Where page-wide delete clicks are looked for.
#[derive(Clone, Debug, PartialEq, Eq)]
struct DeleteTarget {
    delete_selector: String,
    row_selector: String,
    row_id_attribute: String,
}

/// A delete click resolved to its row.
struct DeleteHit {
    row: Element,
    id: Option<String>,
}

#[derive(Default)]
struct PageState {
    manager: FieldManager<WebFile, DomFieldView>,
    attached: Vec<(FieldKey, Element)>,
    body_guarded: bool,
    delegation_installed: bool,
}

thread_local! {
    static PAGE: RefCell<PageState> = RefCell::new(PageState::default());
    // kept apart from PAGE: programmatic input clicks bubble to the document
    // while PAGE is borrowed
    static DELETE_TARGETS: RefCell<Vec<DeleteTarget>> = const { RefCell::new(Vec::new()) };
}

fn with_page<R>(f: impl FnOnce(&mut PageState) -> R) -> Option<R> {
    PAGE.with(|p| match p.try_borrow_mut() {
        Ok(mut page) => Some(f(&mut page)),
        Err(_) => {
            log::warn!("re-entrant upload field event ignored");
            None
        }
    })
}

fn report(res: MultiFileResult<()>) {
    if let Err(e) = res {
        log::warn!("upload field: {e}");
    }
}

fn dispatch(key: FieldKey, event: FieldEvent<WebFile>) {
    if let Some(res) = with_page(|page| page.manager.dispatch(key, event)) {
        report(res);
    }
}

fn listen(
    target: &EventTarget,
    event: &str,
    handler: impl FnMut(Event) + 'static,
) -> MultiFileResult<()> {
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    target
        .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
        .map_err(dom_err("add event listener"))?;
    // listeners live for the page's lifetime
    closure.forget();
    Ok(())
}

/// Attach every field matching `config` that is not attached yet.
///
/// Returns the number of newly attached fields. Fields violating the markup
/// contract are skipped with a warning.
pub fn attach(document: &Document, config: WidgetConfig) -> MultiFileResult<usize> {
    config.markup.validate()?;
    let markup = config.markup;

    let found = document
        .query_selector_all(&MarkupConfig::selector(&markup.field_class))
        .map_err(dom_err("query upload fields"))?;

    let mut added = 0;
    for i in 0..found.length() {
        let Some(field) = found.item(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
            continue;
        };
        let already = with_page(|page| page.attached.iter().any(|(_, el)| *el == field))
            .unwrap_or(true);
        if already {
            continue;
        }

        let view = match DomFieldView::new(document.clone(), field.clone(), markup.clone()) {
            Ok(v) => v,
            Err(e) => {
                log::warn!("skipping upload field: {e}");
                continue;
            }
        };
        let input = view.input().clone();
        let browse = view.browse().clone();

        let Some(key) = with_page(|page| {
            let key = page.manager.add_field_with_units(view, config.units.clone());
            page.attached.push((key, field.clone()));
            key
        }) else {
            continue;
        };

        install_field_listeners(key, &field, &browse, &input)?;
        added += 1;
    }

    guard_body(document)?;
    install_delete_delegation(document, &markup)?;
    log::debug!("attached {added} upload field(s)");
    Ok(added)
}

fn install_field_listeners(
    key: FieldKey,
    field: &Element,
    browse: &Element,
    input: &HtmlInputElement,
) -> MultiFileResult<()> {
    for kind in DragKind::ALL {
        listen(field, kind.event_name(), move |ev: Event| {
            ev.prevent_default();
            ev.stop_propagation();
            let event = match kind {
                DragKind::Drop => {
                    let files = ev
                        .dyn_ref::<DragEvent>()
                        .and_then(DragEvent::data_transfer)
                        .and_then(|dt| dt.files());
                    FieldEvent::Drop(collect_files(files))
                }
                other => FieldEvent::Drag(other),
            };
            dispatch(key, event);
        })?;
    }

    listen(browse, "click", move |ev: Event| {
        ev.prevent_default();
        dispatch(key, FieldEvent::BrowseClicked);
    })?;

    let source = input.clone();
    listen(input, "change", move |_ev: Event| {
        let files = collect_files(source.files());
        dispatch(key, FieldEvent::InputChanged(files));
    })?;

    Ok(())
}

/// Keep the browser from opening files dropped anywhere on the page.
fn guard_body(document: &Document) -> MultiFileResult<()> {
    if with_page(|page| std::mem::replace(&mut page.body_guarded, true)).unwrap_or(true) {
        return Ok(());
    }
    let body = document
        .body()
        .ok_or_else(|| MultiFileError::missing_element("body"))?;
    for kind in DragKind::ALL {
        listen(&body, kind.event_name(), |ev: Event| {
            ev.prevent_default();
            ev.stop_propagation();
        })?;
    }
    Ok(())
}

/// One document-level click listener resolves delete triggers for all fields,
/// including rows added after it was installed.
fn install_delete_delegation(document: &Document, markup: &MarkupConfig) -> MultiFileResult<()> {
    let target = DeleteTarget {
        delete_selector: MarkupConfig::selector(&markup.delete_class),
        row_selector: markup.row_selector(),
        row_id_attribute: markup.row_id_attribute.clone(),
    };
    DELETE_TARGETS.with(|t| {
        let mut t = t.borrow_mut();
        if !t.contains(&target) {
            t.push(target);
        }
    });

    if with_page(|page| std::mem::replace(&mut page.delegation_installed, true)).unwrap_or(true) {
        return Ok(());
    }
    listen(document, "click", on_document_click)
}

fn on_document_click(ev: Event) {
    let Some(clicked) = ev.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
        return;
    };
    let hit = DELETE_TARGETS.with(|targets| {
        targets.borrow().iter().find_map(|t| {
            let trigger = clicked.closest(&t.delete_selector).ok().flatten()?;
            let row = trigger.closest(&t.row_selector).ok().flatten()?;
            let id = row.get_attribute(&t.row_id_attribute);
            Some(DeleteHit { row, id })
        })
    });
    let Some(DeleteHit { row, id }) = hit else {
        return;
    };
    ev.prevent_default();
    let Some(id) = id else {
        log::warn!("delete trigger inside a row without an identifier");
        return;
    };
    let id = FileId::new(id);
    // rows sit in the list container placed right after their field
    let field = row
        .parent_element()
        .and_then(|container| container.previous_element_sibling());
    let res = with_page(|page| {
        let key = field.and_then(|field| {
            page.attached
                .iter()
                .find(|(_, el)| *el == field)
                .map(|(key, _)| *key)
        });
        match key {
            Some(key) => page.manager.delete(key, &id).map(|_| ()),
            None => {
                log::warn!("delete trigger outside any attached upload field");
                Ok(())
            }
        }
    });
    if let Some(res) = res {
        report(res);
    }
}
