use std::cell::RefCell;

use leptos::prelude::*;
use tbss_app::{dom::PageEnhancements, BookSearch};
use wasm_bindgen::{prelude::wasm_bindgen, JsCast, JsValue};

thread_local! {
    static PAGE: RefCell<Option<PageEnhancements>> = const { RefCell::new(None) };
}

#[wasm_bindgen(start)]
pub fn start() {
    _ = console_log::init_with_level(log::Level::Debug);
    console_error_panic_hook::set_once();
    _ = any_spawner::Executor::init_wasm_bindgen();

    log::info!("enhancing catalog search");
    let enhancements = tbss_app::dom::enhance_page();
    PAGE.with(|page| *page.borrow_mut() = Some(enhancements));
}

/// Detaches every widget from the page, for shells that swap page content without reloading.
#[wasm_bindgen]
pub fn teardown() {
    if let Some(enhancements) = PAGE.with(|page| page.borrow_mut().take()) {
        log::info!(
            "detaching {} autocomplete widgets",
            enhancements.autocompletes().len()
        );
    }
}

/// Mounts the leptos search box into the element with id `container_id`.
#[wasm_bindgen]
pub fn mount_book_search(container_id: &str, endpoint: Option<String>) -> Result<(), JsValue> {
    let container = document()
        .get_element_by_id(container_id)
        .ok_or_else(|| JsValue::from_str(&format!("#{container_id} not found")))?
        .dyn_into::<web_sys::HtmlElement>()?;
    // an empty endpoint falls back to the default suggestion url
    let endpoint = endpoint.unwrap_or_default();
    leptos::mount::mount_to(container, move || view! { <BookSearch endpoint /> }).forget();
    Ok(())
}
