//! Event Page WASM
//!
//! Browser bindings for the event page. Mounts a single [`page::Page`] when
//! the document is ready and exposes the handlers the markup calls inline
//! (`showPage`, `toggleAccordion`, `scrollToRegister`, ...).

use eventpage::{PageConfig, ScrollTarget};
use std::cell::RefCell;
use wasm_bindgen::prelude::*;

mod dom;
mod http;
mod page;

pub use http::HttpTransport;
use page::Page;

/// Configuration used when the page does not override it
const DEFAULT_CONFIG: &str = include_str!("../page.toml");

/// `<script type="application/toml">` element that may override the defaults
const CONFIG_ELEMENT_ID: &str = "pageConfig";

thread_local! {
    static PAGE: RefCell<Option<Page>> = const { RefCell::new(None) };
}

/// Run `f` against the mounted page
///
/// `None` before mount, or if a handler is already running.
pub(crate) fn with_page<R>(f: impl FnOnce(&mut Page) -> R) -> Option<R> {
    PAGE.with(|slot| match slot.try_borrow_mut() {
        Ok(mut page) => page.as_mut().map(f),
        Err(_) => {
            tracing::warn!("page busy, dropping event");
            None
        }
    })
}

/// Set up logging and mount once the document is ready
#[wasm_bindgen(start)]
pub fn init() -> Result<(), JsValue> {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    // Fails only if a logger is already installed
    if console_log::init_with_level(log::Level::Debug).is_err() {
        log::debug!("console logger already installed");
    }

    let document = dom::document()?;
    if document.ready_state() == "loading" {
        tracing::debug!("document still loading, waiting for DOMContentLoaded");
        dom::listen(&document, "DOMContentLoaded", |_| {
            if let Err(e) = mount() {
                tracing::error!("Failed to mount event page: {:?}", e);
            }
        })
    } else {
        mount()
    }
}

/// Build the page once; later calls are no-ops
fn mount() -> Result<(), JsValue> {
    if PAGE.with(|slot| slot.borrow().is_some()) {
        tracing::debug!("event page already mounted");
        return Ok(());
    }

    let window = dom::window()?;
    let document = dom::document()?;
    let override_toml = document
        .get_element_by_id(CONFIG_ELEMENT_ID)
        .and_then(|el| el.text_content());
    let config = resolve_config(override_toml.as_deref());

    let mut page = Page::new(window, document, config);
    page.bind_listeners()?;
    page.start_countdown();

    PAGE.with(|slot| *slot.borrow_mut() = Some(page));
    tracing::info!("event page mounted");
    Ok(())
}

/// Page override if it parses, else the embedded defaults
fn resolve_config(override_toml: Option<&str>) -> PageConfig {
    if let Some(text) = override_toml {
        match PageConfig::from_toml_str(text) {
            Ok(config) => return config,
            Err(e) => tracing::warn!("Ignoring page configuration: {:#}", e),
        }
    }

    PageConfig::from_toml_str(DEFAULT_CONFIG).unwrap_or_else(|e| {
        tracing::warn!("Embedded configuration invalid: {:#}", e);
        PageConfig::default()
    })
}

/// Switch to the page section with the given id
#[wasm_bindgen(js_name = showPage)]
pub fn show_page(page_id: &str) {
    with_page(|page| page.show_page(page_id));
}

/// Toggle the accordion item containing `button`
#[wasm_bindgen(js_name = toggleAccordion)]
pub fn toggle_accordion(button: web_sys::Element) {
    with_page(|page| page.toggle_accordion(&button));
}

#[wasm_bindgen(js_name = scrollToRegister)]
pub fn scroll_to_register() {
    with_page(|page| page.scroll_to(ScrollTarget::Register));
}

#[wasm_bindgen(js_name = scrollToDetails)]
pub fn scroll_to_details() {
    with_page(|page| page.scroll_to(ScrollTarget::Details));
}

/// Clear the form and bring it back from the success panel
#[wasm_bindgen(js_name = resetRegistration)]
pub fn reset_registration() {
    with_page(Page::reset_registration);
}

/// Cancel the countdown refresh; returns whether it was running
#[wasm_bindgen(js_name = stopCountdown)]
pub fn stop_countdown() -> bool {
    with_page(Page::stop_countdown).unwrap_or(false)
}

/// Validate a value against the registration rules
///
/// # Example (JavaScript)
/// ```javascript
/// const state = validateFieldValue('email', 'a@b.co', true);
/// // { value: 'a@b.co', isValid: true, message: '' }
/// ```
#[wasm_bindgen(js_name = validateFieldValue)]
pub fn validate_field_value(field_name: &str, value: &str, required: bool) -> Result<JsValue, JsValue> {
    let state = eventpage::validation::validate(field_name, value, required);
    Ok(serde_wasm_bindgen::to_value(&state)?)
}
