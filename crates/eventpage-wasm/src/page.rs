// File: src/page.rs
// Purpose: Page controller binding the pure widgets to the document

use crate::dom;
use crate::http::HttpTransport;
use eventpage::form::{error_slot, TERMS_ERROR_SLOT};
use eventpage::transport::TRANSPORT_FAILURE_MESSAGE;
use eventpage::validation::{rules, FieldValidator};
use eventpage::{
    hand_off, Accordion, Countdown, CountdownTimer, FieldSpec, FormController, FormSnapshot,
    PageConfig, PageNavigator, ScrollTarget, SubmitOutcome,
};
use gloo_timers::callback::Interval;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    BeforeUnloadEvent, Document, Element, Event, HtmlFormElement, HtmlInputElement, Node, Window,
};

const FORM_ID: &str = "registrationForm";
const SUCCESS_ID: &str = "successMessage";
const TIMER_DAYS_ID: &str = "timerDays";
const TIMER_HOURS_ID: &str = "timerHours";
const TIMER_MINUTES_ID: &str = "timerMinutes";
const TIMER_SECONDS_ID: &str = "timerSeconds";

const ACTIVE_CLASS: &str = "active";
const ERROR_CLASS: &str = "error";
const HIDDEN_CLASS: &str = "hidden";

/// Everything the page's handlers act on, built once at mount
pub struct Page {
    window: Window,
    document: Document,
    config: PageConfig,
    form: FormController,
    form_el: Option<HtmlFormElement>,
    /// Named checkboxes in the form, `terms` included
    checkboxes: Vec<String>,
    navigator: PageNavigator,
    accordion: Accordion,
    timer: CountdownTimer<Interval>,
}

impl Page {
    pub fn new(window: Window, document: Document, config: PageConfig) -> Self {
        let form_el = document
            .get_element_by_id(FORM_ID)
            .and_then(|el| el.dyn_into::<HtmlFormElement>().ok());

        let (form, checkboxes) = match &form_el {
            Some(el) => {
                let (fields, checkboxes) = discover_fields(el);
                (FormController::new(FieldValidator::registration(), fields), checkboxes)
            }
            None => (FormController::registration(), vec![rules::TERMS.to_string()]),
        };

        let pages = dom::query_all(&document, ".page")
            .iter()
            .map(Element::id)
            .filter(|id| !id.is_empty())
            .collect::<Vec<_>>();
        let mut navigator = PageNavigator::new(pages);
        match dom::query(&document, ".page.active") {
            Some(active) => {
                navigator.show(&active.id());
            }
            None => {
                if navigator.show(&config.navigation.default_page) {
                    render_active_page(&document, &config.navigation.default_page);
                }
            }
        }

        let accordion = Accordion::new(dom::query_all(&document, ".accordion-item").len());

        let target_ms = config.countdown.event_start_millis().unwrap_or_else(|e| {
            tracing::warn!("Countdown disabled: {:#}", e);
            0
        });
        let timer = CountdownTimer::new(target_ms, config.countdown.tick_ms);

        Self {
            window,
            document,
            config,
            form,
            form_el,
            checkboxes,
            navigator,
            accordion,
            timer,
        }
    }

    /// Attach the page-lifetime listeners
    pub fn bind_listeners(&self) -> Result<(), JsValue> {
        for link in dom::query_all(&self.document, ".nav-link") {
            dom::listen(&link, "click", |event: Event| {
                let href = event
                    .current_target()
                    .and_then(|t| t.dyn_into::<Element>().ok())
                    .and_then(|el| el.get_attribute("href"));
                let Some(href) = href.filter(|h| h.starts_with('#')) else {
                    return;
                };
                event.prevent_default();
                if let Some(page) = PageNavigator::page_from_href(&href) {
                    crate::with_page(|p| p.show_page(page));
                }
            })?;
        }

        if let Some(form_el) = &self.form_el {
            for field in self.form.fields() {
                if let Some(control) = self.control(&field.name) {
                    for event in ["blur", "change"] {
                        let name = field.name.clone();
                        dom::listen(&control, event, move |_| {
                            crate::with_page(|p| p.on_field_event(&name));
                        })?;
                    }
                }
            }

            dom::listen(form_el, "submit", |event: Event| {
                event.prevent_default();
                crate::with_page(Page::on_submit);
            })?;
        }

        dom::listen(&self.window, "beforeunload", |event: Event| {
            if crate::with_page(Page::has_unsaved_data).unwrap_or(false) {
                event.prevent_default();
                if let Some(event) = event.dyn_ref::<BeforeUnloadEvent>() {
                    event.set_return_value("");
                }
            }
        })?;

        dom::listen(&self.window, "pagehide", |_| {
            crate::with_page(Page::stop_countdown);
        })?;

        Ok(())
    }

    // ---- countdown ----

    /// Render now and every tick; a second call is a no-op
    pub fn start_countdown(&mut self) {
        let target_ms = self.timer.target_ms();
        let document = self.document.clone();
        let started = self.timer.start(|tick_ms| {
            Interval::new(tick_ms, move || render_countdown(&document, target_ms))
        });
        if started {
            render_countdown(&self.document, target_ms);
        }
    }

    pub fn stop_countdown(&mut self) -> bool {
        self.timer.stop()
    }

    // ---- navigation ----

    pub fn show_page(&mut self, page: &str) {
        if !self.navigator.show(page) {
            return;
        }

        render_active_page(&self.document, page);
        dom::jump_to_top(&self.window);
    }

    pub fn toggle_accordion(&mut self, button: &Element) {
        let items = dom::query_all(&self.document, ".accordion-item");
        if items.len() != self.accordion.len() {
            self.accordion = Accordion::new(items.len());
        }

        let Some(item) = button.parent_element() else {
            return;
        };
        let item: &Node = &item;
        let Some(index) = items.iter().position(|el| el.is_same_node(Some(item))) else {
            tracing::debug!("toggle outside any accordion item");
            return;
        };

        self.accordion.toggle(index);

        for (state, el) in self.accordion.items().zip(&items) {
            dom::set_class(el, ACTIVE_CLASS, state.open);
            if let Some(content) = dom::query_within(el, ".accordion-content").first() {
                let height = if state.open {
                    format!("{}px", content.scroll_height())
                } else {
                    "0".to_string()
                };
                dom::set_style(content, "max-height", &height);
            }
            if let Some(icon) = dom::query_within(el, ".accordion-icon").first() {
                icon.set_text_content(Some(state.glyph()));
            }
        }
    }

    pub fn scroll_to(&self, target: ScrollTarget) {
        match dom::query(&self.document, target.selector()) {
            Some(el) => dom::scroll_into_view(&el),
            None => tracing::debug!(selector = target.selector(), "scroll target missing"),
        }
    }

    // ---- registration form ----

    fn control(&self, name: &str) -> Option<Element> {
        let form_el = self.form_el.as_ref()?;
        form_el
            .query_selector(&format!("[name=\"{}\"]", name))
            .ok()
            .flatten()
    }

    /// Copy the document's current values into the controller
    fn sync_from_document(&mut self) {
        let names: Vec<String> = self.form.fields().iter().map(|f| f.name.clone()).collect();
        for name in names {
            if let Some(value) = self.control(&name).as_ref().and_then(dom::control_value) {
                self.form.set_value(&name, value);
            }
        }
        for name in &self.checkboxes {
            let checked = self
                .control(name)
                .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
                .map(|input| input.checked())
                .unwrap_or(false);
            self.form.set_checkbox(name, checked);
        }
        if !self.checkboxes.iter().any(|name| name == rules::TERMS) {
            let terms = dom::is_checked(&self.document, rules::TERMS);
            self.form.set_terms(terms);
        }
    }

    fn render_field(&self, name: &str) {
        let message = self.form.field_error(name);
        if let Some(control) = self.control(name) {
            dom::set_class(&control, ERROR_CLASS, message.is_some());
        }
        dom::set_text(&self.document, &error_slot(name), message.unwrap_or(""));
    }

    fn render_form_errors(&self) {
        for field in self.form.fields() {
            self.render_field(&field.name);
        }
        dom::set_text(
            &self.document,
            TERMS_ERROR_SLOT,
            self.form.terms_error().unwrap_or(""),
        );
    }

    pub fn on_field_event(&mut self, name: &str) {
        if let Some(value) = self.control(name).as_ref().and_then(dom::control_value) {
            self.form.set_value(name, value);
        }
        if self.form.validate_field(name).is_some() {
            self.render_field(name);
        }
    }

    pub fn on_submit(&mut self) {
        self.sync_from_document();
        let outcome = self.form.submit();
        self.render_form_errors();

        match outcome {
            SubmitOutcome::Submitted(snapshot) => self.show_success(snapshot),
            SubmitOutcome::Rejected(failing) => {
                tracing::debug!(?failing, "registration has errors");
            }
            SubmitOutcome::AlreadySubmitted => {}
        }
    }

    fn show_success(&self, snapshot: FormSnapshot) {
        if let Some(form_el) = &self.form_el {
            dom::set_class(form_el, HIDDEN_CLASS, true);
        }
        if let Some(success) = self.document.get_element_by_id(SUCCESS_ID) {
            dom::set_class(&success, ACTIVE_CLASS, true);
        }

        match snapshot.to_json() {
            Ok(json) => tracing::info!("Registration data: {}", json),
            Err(e) => tracing::warn!("Could not encode registration data: {}", e),
        }

        self.scroll_to(ScrollTarget::SuccessMessage);

        if self.config.transport.enabled {
            let transport = HttpTransport::new(self.config.transport.endpoint.clone());
            let window = self.window.clone();
            wasm_bindgen_futures::spawn_local(async move {
                if hand_off(&transport, &snapshot).await.is_err()
                    && window.alert_with_message(TRANSPORT_FAILURE_MESSAGE).is_err()
                {
                    tracing::debug!("alert unavailable");
                }
            });
        }
    }

    pub fn reset_registration(&mut self) {
        if let Some(form_el) = &self.form_el {
            form_el.reset();
        }
        self.form.reset();
        self.render_form_errors();

        if let Some(form_el) = &self.form_el {
            dom::set_class(form_el, HIDDEN_CLASS, false);
        }
        if let Some(success) = self.document.get_element_by_id(SUCCESS_ID) {
            dom::set_class(&success, ACTIVE_CLASS, false);
        }

        self.scroll_to(ScrollTarget::Form);
    }

    pub fn has_unsaved_data(&mut self) -> bool {
        self.sync_from_document();
        self.form.has_unsaved_data()
    }
}

/// Field specs for the named inputs and selects, and the named checkboxes
fn discover_fields(form_el: &HtmlFormElement) -> (Vec<FieldSpec>, Vec<String>) {
    let mut fields = Vec::new();
    let mut checkboxes = Vec::new();

    for el in dom::query_within(form_el, "input, select") {
        let Some(name) = el.get_attribute("name").filter(|n| !n.is_empty()) else {
            continue;
        };
        // `type_()` is the normalized type, so `type="Checkbox"` counts
        let input_type = el.dyn_ref::<HtmlInputElement>().map(HtmlInputElement::type_);
        if input_type.as_deref() == Some("checkbox") {
            if !checkboxes.contains(&name) {
                checkboxes.push(name);
            }
            continue;
        }

        let required = el.has_attribute("required");
        fields.push(if el.tag_name().eq_ignore_ascii_case("select") {
            FieldSpec::select(name, required)
        } else {
            FieldSpec::text(name, required)
        });
    }

    (fields, checkboxes)
}

/// Mark `page` and its nav link active, clearing every other one
fn render_active_page(document: &Document, page: &str) {
    for section in dom::query_all(document, ".page") {
        dom::set_class(&section, ACTIVE_CLASS, section.id() == page);
    }

    let href = PageNavigator::link_href(page);
    for link in dom::query_all(document, ".nav-link") {
        let matches = link.get_attribute("href").as_deref() == Some(href.as_str());
        dom::set_class(&link, ACTIVE_CLASS, matches);
    }
}

fn render_countdown(document: &Document, target_ms: i64) {
    let now_ms = js_sys::Date::now() as i64;
    let digits = Countdown::between(target_ms, now_ms).digits();

    dom::set_text(document, TIMER_DAYS_ID, &digits.days);
    dom::set_text(document, TIMER_HOURS_ID, &digits.hours);
    dom::set_text(document, TIMER_MINUTES_ID, &digits.minutes);
    dom::set_text(document, TIMER_SECONDS_ID, &digits.seconds);
}
