use leptos::prelude::*;

use crate::{navigation::navigate_to, suggestion_box::SuggestionRow};

/// The dropdown rows. Titles and authors come from the endpoint and are only ever rendered as text.
#[component]
pub fn SuggestionRows(rows: Vec<SuggestionRow>) -> impl IntoView {
    rows.into_iter()
        .map(|row| {
            let SuggestionRow {
                element_id,
                slug,
                title,
                authors,
                href,
            } = row;
            view! {
                <div
                    role="option"
                    class="sg-item"
                    id=element_id
                    data-slug=slug
                    on:click=move |_| navigate_to(&href)
                >
                    <div class="sg-title">{title}</div>
                    <div class="muted small">{authors}</div>
                </div>
            }
        })
        .collect_view()
}
