//! Enhances server rendered pages: wires the header autocomplete, every input that declares a
//! suggestion target and the admin live search directly onto the existing DOM.

use std::{cell::RefCell, rc::Rc};

use anyhow::anyhow;
use gloo::{events::EventListener, utils::document};
use wasm_bindgen::JsCast;
use web_sys::{Document, Event, HtmlElement, HtmlFormElement, HtmlInputElement, KeyboardEvent, Node};

use crate::{
    api::GlooSuggestClient,
    autocomplete::{AutocompleteWidget, ClickTarget},
    config::{
        SuggestConfig, ADMIN_SEARCHBAR_ID, DECLARED_INPUTS_SELECTOR, HEADER_INPUT_ID,
        HEADER_SUGGEST_ID, SUGGEST_TARGET_ATTRIBUTE, SUGGEST_URL_ATTRIBUTE,
    },
    error::{AppError, AppResult},
    form_submitter::{DebouncedFormSubmitter, SubmitTarget},
    navigation::navigate_to,
    scheduler::BrowserScheduler,
    suggestion_box::{SuggestionBox, SuggestionRow},
};

/// Suggestion container that already exists in the page markup.
pub struct DomSuggestionBox {
    container: HtmlElement,
    row_listeners: RefCell<Vec<EventListener>>,
}

impl DomSuggestionBox {
    pub fn new(container: HtmlElement) -> Self {
        if let Err(e) = container.set_attribute("role", "listbox") {
            log::debug!("failed to mark suggestions as a listbox {e:?}");
        }
        Self {
            container,
            row_listeners: RefCell::new(Vec::new()),
        }
    }

    pub fn contains(&self, node: &Node) -> bool {
        self.container.contains(Some(node))
    }

    fn set_visible(&self, visible: bool) -> AppResult<()> {
        let display = if visible { "block" } else { "none" };
        self.container.style().set_property("display", display)?;
        Ok(())
    }

    fn render(&self, rows: Vec<SuggestionRow>) -> AppResult<()> {
        let document = document();
        self.row_listeners.borrow_mut().clear();
        self.container.set_inner_html("");
        let mut listeners = Vec::with_capacity(rows.len());
        for row in rows {
            let element = document.create_element("div")?;
            element.set_id(&row.element_id);
            element.set_class_name("sg-item");
            element.set_attribute("role", "option")?;
            element.set_attribute("data-slug", &row.slug)?;

            // text content only, titles and authors are not markup
            let title = document.create_element("div")?;
            title.set_class_name("sg-title");
            title.set_text_content(Some(&row.title));
            let authors = document.create_element("div")?;
            authors.set_class_name("muted small");
            authors.set_text_content(Some(&row.authors));
            element.append_child(&title)?;
            element.append_child(&authors)?;
            self.container.append_child(&element)?;

            let href = row.href;
            listeners.push(EventListener::new(&element, "click", move |_| {
                navigate_to(&href)
            }));
        }
        *self.row_listeners.borrow_mut() = listeners;
        self.set_visible(true)
    }
}

impl SuggestionBox for DomSuggestionBox {
    fn show(&self, rows: Vec<SuggestionRow>) {
        if let Err(e) = self.render(rows) {
            log::warn!("failed to render suggestions {e}");
            self.clear();
        }
    }

    fn clear(&self) {
        self.row_listeners.borrow_mut().clear();
        self.container.set_inner_html("");
        if let Err(e) = self.set_visible(false) {
            log::debug!("failed to hide suggestions {e}");
        }
    }
}

pub type DomAutocomplete = AutocompleteWidget<GlooSuggestClient, DomSuggestionBox, BrowserScheduler>;

/// A widget together with the listeners feeding it. Dropping it removes the listeners, including
/// the document level click listener, and aborts pending work.
pub struct AttachedAutocomplete {
    widget: DomAutocomplete,
    _listeners: Vec<EventListener>,
}

impl Drop for AttachedAutocomplete {
    fn drop(&mut self) {
        log::debug!("detaching autocomplete from {}", self.widget.config().endpoint_url);
        self.widget.cancel_pending();
    }
}

fn classify_click(event: &Event, input: &HtmlInputElement, suggestion_box: &DomSuggestionBox) -> ClickTarget {
    let Some(target) = event.target().and_then(|target| target.dyn_into::<Node>().ok()) else {
        return ClickTarget::Outside;
    };
    ClickTarget::classify(
        input.is_same_node(Some(&target)),
        suggestion_box.contains(&target),
    )
}

/// Attaches autocomplete behaviour to `input`, rendering into `container`.
/// There is no guard against attaching the same pair twice.
pub fn attach_autocomplete(input: HtmlInputElement, container: HtmlElement) -> AttachedAutocomplete {
    let config = SuggestConfig::from_endpoint_attribute(input.get_attribute(SUGGEST_URL_ATTRIBUTE));
    log::debug!("attaching autocomplete to {}", config.endpoint_url);
    let widget = AutocompleteWidget::new(
        config,
        Rc::new(GlooSuggestClient),
        DomSuggestionBox::new(container),
        BrowserScheduler,
    );

    let on_input = {
        let widget = widget.clone();
        let source = input.clone();
        EventListener::new(&input, "input", move |_| widget.on_input(&source.value()))
    };
    let on_keydown = {
        let widget = widget.clone();
        EventListener::new(&input, "keydown", move |event| {
            if let Some(event) = event.dyn_ref::<KeyboardEvent>() {
                widget.on_key(&event.key());
            }
        })
    };
    let on_page_click = {
        let widget = widget.clone();
        let input = input.clone();
        EventListener::new(&document(), "click", move |event| {
            let target = classify_click(event, &input, widget.suggestion_box());
            widget.on_page_click(target);
        })
    };

    AttachedAutocomplete {
        widget,
        _listeners: vec![on_input, on_keydown, on_page_click],
    }
}

fn element_by_id<T: JsCast>(document: &Document, id: &str) -> AppResult<T> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| AppError::MissingElement(format!("#{id}")))?
        .dyn_into::<T>()
        .map_err(|_| anyhow!("#{id} is not the expected kind of element").into())
}

/// The storefront header search, `#tbss-search` with its `#tbss-suggest` dropdown.
pub fn attach_header_autocomplete(document: &Document) -> AppResult<AttachedAutocomplete> {
    let input = element_by_id::<HtmlInputElement>(document, HEADER_INPUT_ID)?;
    let container = element_by_id::<HtmlElement>(document, HEADER_SUGGEST_ID)?;
    Ok(attach_autocomplete(input, container))
}

/// Every `input[data-suggest-url][data-suggest-target]` whose target selector resolves.
pub fn attach_declared_autocompletes(document: &Document) -> Vec<AttachedAutocomplete> {
    let inputs = match document.query_selector_all(DECLARED_INPUTS_SELECTOR) {
        Ok(inputs) => inputs,
        Err(e) => {
            log::warn!("failed to look up suggest inputs {e:?}");
            return Vec::new();
        }
    };
    (0..inputs.length())
        .filter_map(|index| inputs.item(index))
        .filter_map(|node| node.dyn_into::<HtmlInputElement>().ok())
        .filter_map(|input| {
            let selector = input.get_attribute(SUGGEST_TARGET_ATTRIBUTE)?;
            match document.query_selector(&selector) {
                Ok(Some(target)) => match target.dyn_into::<HtmlElement>() {
                    Ok(container) => Some(attach_autocomplete(input, container)),
                    Err(_) => None,
                },
                Ok(None) => {
                    log::debug!("suggest target {selector} not found");
                    None
                }
                Err(e) => {
                    log::debug!("invalid suggest target {selector} {e:?}");
                    None
                }
            }
        })
        .collect()
}

/// The enclosing `<form>` of a search input, looked up when the submit fires.
pub struct ClosestForm {
    input: HtmlInputElement,
}

impl SubmitTarget for ClosestForm {
    fn submit(&self) -> AppResult<()> {
        let Some(form) = self.input.closest("form")? else {
            log::debug!("search input has no enclosing form");
            return Ok(());
        };
        form.dyn_into::<HtmlFormElement>()
            .map_err(|_| anyhow!("closest form is not a form element"))?
            .submit()?;
        Ok(())
    }
}

pub struct AttachedSubmitter {
    _submitter: Rc<DebouncedFormSubmitter<ClosestForm, BrowserScheduler>>,
    _listener: EventListener,
}

pub fn attach_form_submitter(input: HtmlInputElement) -> AttachedSubmitter {
    let submitter = Rc::new(DebouncedFormSubmitter::new(
        ClosestForm {
            input: input.clone(),
        },
        BrowserScheduler,
    ));
    let listener = {
        let submitter = submitter.clone();
        EventListener::new(&input, "input", move |_| submitter.on_input())
    };
    AttachedSubmitter {
        _submitter: submitter,
        _listener: listener,
    }
}

/// Everything attached to the current page. Dropping it detaches all of it.
pub struct PageEnhancements {
    autocompletes: Vec<AttachedAutocomplete>,
    live_search: Rc<RefCell<Option<AttachedSubmitter>>>,
    _dom_ready: Option<EventListener>,
}

impl PageEnhancements {
    pub fn autocompletes(&self) -> &[AttachedAutocomplete] {
        &self.autocompletes
    }
}

fn attach_live_search(document: &Document) -> Option<AttachedSubmitter> {
    element_by_id::<HtmlInputElement>(document, ADMIN_SEARCHBAR_ID)
        .map(attach_form_submitter)
        .map_err(|e| log::debug!("live search not attached: {e}"))
        .ok()
}

pub fn enhance_page() -> PageEnhancements {
    let document = document();
    let mut autocompletes = Vec::new();
    match attach_header_autocomplete(&document) {
        Ok(header) => autocompletes.push(header),
        Err(e) => log::debug!("header autocomplete not attached: {e}"),
    }
    autocompletes.extend(attach_declared_autocompletes(&document));

    let live_search = Rc::new(RefCell::new(attach_live_search(&document)));
    // the admin search bar may only appear once the document finished parsing
    let dom_ready = live_search.borrow().is_none().then(|| {
        let live_search = live_search.clone();
        EventListener::once(&document, "DOMContentLoaded", move |_| {
            *live_search.borrow_mut() = attach_live_search(&gloo::utils::document());
        })
    });

    log::info!("enhanced page with {} autocomplete widgets", autocompletes.len());
    PageEnhancements {
        autocompletes,
        live_search,
        _dom_ready: dom_ready,
    }
}
