use cfg_if::cfg_if;
use leptos::{html::Div, prelude::*};

use crate::{
    components::suggestion_rows::SuggestionRows, suggestion_box::SignalSuggestionBox,
};

/// Search input with a suggestion dropdown, for pages rendered by leptos rather than the server
/// templates. Drives the same [`crate::autocomplete::AutocompleteWidget`] as the page enhancer.
#[component]
pub fn BookSearch(
    /// Overrides the suggestion endpoint, same as `data-suggest-url`.
    #[prop(optional, into)]
    #[cfg_attr(not(feature = "hydrate"), allow(unused_variables))]
    endpoint: Option<String>,
    #[prop(optional, into)] placeholder: Option<String>,
) -> impl IntoView {
    let suggestion_box = SignalSuggestionBox::new();
    let container = NodeRef::<Div>::new();

    cfg_if! {
        if #[cfg(feature = "hydrate")] {
            use crate::{
                api::GlooSuggestClient,
                autocomplete::{AutocompleteWidget, ClickTarget},
                config::SuggestConfig,
                scheduler::BrowserScheduler,
            };
            use leptos_use::on_click_outside;
            use std::rc::Rc;

            let config = SuggestConfig::from_endpoint_attribute(endpoint);
            let widget = StoredValue::new_local(AutocompleteWidget::new(
                config,
                Rc::new(GlooSuggestClient),
                suggestion_box,
                BrowserScheduler,
            ));
            let _ = on_click_outside(container, move |_| {
                widget.with_value(|widget| widget.on_page_click(ClickTarget::Outside))
            });
            let on_input = move |ev: leptos::ev::Event| {
                let value = event_target_value(&ev);
                widget.with_value(|widget| widget.on_input(&value));
            };
            let on_keydown = move |ev: leptos::ev::KeyboardEvent| {
                widget.with_value(|widget| widget.on_key(&ev.key()));
            };
        } else {
            let on_input = move |_: leptos::ev::Event| {};
            let on_keydown = move |_: leptos::ev::KeyboardEvent| {};
        }
    }

    view! {
        <div node_ref=container class="relative">
            <input
                type="search"
                name="q"
                autocomplete="off"
                class="input w-full"
                placeholder=placeholder.unwrap_or_else(|| "Search books, authors, tags".to_string())
                on:input=on_input
                on:keydown=on_keydown
            />
            <div
                role="listbox"
                class="suggest-box"
                style:display=move || if suggestion_box.visible.get() { "block" } else { "none" }
            >
                {move || view! { <SuggestionRows rows=suggestion_box.rows.get() /> }}
            </div>
        </div>
    }
}
