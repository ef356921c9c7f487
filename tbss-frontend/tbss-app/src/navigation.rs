use cfg_if::cfg_if;

/// Full page navigation to a suggestion's detail page.
pub fn navigate_to(href: &str) {
    cfg_if! {
        if #[cfg(feature = "hydrate")] {
            if let Err(e) = leptos::prelude::window().location().set_href(href) {
                log::warn!("navigation to {href} failed {e:?}");
            }
        } else {
            log::debug!("navigation to {href} requested outside the browser");
        }
    }
}
