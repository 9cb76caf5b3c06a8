//! Browser tests for the page controller.
//!
//! Run with: `wasm-pack test --headless --firefox` or `--chrome`

use super::*;

use js_sys::{Array, Function, Object, Reflect};
use wasm_bindgen_test::*;
use web_sys::{Event, EventInit, HtmlInputElement, HtmlTextAreaElement};

wasm_bindgen_test_configure!(run_in_browser);

const CONTRACT_FORM: &str = r#"
<form id="word-form">
  <input name="contract_number">
  <input type="date" name="deadline">
  <div class="form-group">
    <div id="word-content-editor"></div>
    <textarea name="content"></textarea>
  </div>
</form>
"#;

const REQUIRED_BODY_FORM: &str = r#"
<form id="word-form">
  <input name="contract_number">
  <div class="form-group">
    <div id="word-content-editor"></div>
    <textarea name="content" required></textarea>
  </div>
</form>
"#;

/// Page fixture, removed from the document on drop.
struct Fixture {
    root: Element,
}

impl Fixture {
    fn new(html: &str) -> Self {
        let root = document().create_element("div").unwrap();
        root.set_inner_html(html);
        document().body().unwrap().append_child(&root).unwrap();
        Self { root }
    }
}

impl Drop for Fixture {
    fn drop(&mut self) {
        self.root.remove();
    }
}

fn document() -> Document {
    web_sys::window().unwrap().document().unwrap()
}

fn controller() -> PageController {
    let controller = PageController::new(JsValue::UNDEFINED).ok().expect("controller");
    assert!(controller.init().is_ok());
    controller
}

fn passes(controller: &PageController) -> u64 {
    controller.state.borrow().sync_passes.get()
}

fn form() -> HtmlFormElement {
    document()
        .get_element_by_id("word-form")
        .unwrap()
        .dyn_into()
        .unwrap()
}

/// A stand-in for a Quill instance: `root`, `getText()` and an `on()` that
/// records its handlers in `handlers`.
fn fake_quill(html: &str) -> Quill {
    let root = document().create_element("div").unwrap();
    root.set_inner_html(html);

    let quill = Object::new();
    Reflect::set(&quill, &"root".into(), &root).unwrap();
    let get_text = Function::new_no_args("return this.root.textContent + '\\n';");
    Reflect::set(&quill, &"getText".into(), &get_text).unwrap();
    let on = Function::new_with_args(
        "event, handler",
        "(this.handlers = this.handlers || []).push([event, handler]);",
    );
    Reflect::set(&quill, &"on".into(), &on).unwrap();
    quill.unchecked_into()
}

fn handlers(quill: &Quill) -> Array {
    let value = Reflect::get(quill, &"handlers".into()).unwrap();
    if value.is_undefined() {
        Array::new()
    } else {
        value.unchecked_into()
    }
}

fn set_editor_html(quill: &Quill, html: &str) {
    quill.root().set_inner_html(html);
}

fn submit(form: &HtmlFormElement) -> Event {
    let init = EventInit::new();
    init.set_cancelable(true);
    let event = Event::new_with_event_init_dict("submit", &init).unwrap();
    form.dispatch_event(&event).unwrap();
    event
}

fn preview_html(node_id: &str) -> String {
    document()
        .get_element_by_id(node_id)
        .map(|el| el.inner_html())
        .unwrap_or_default()
}

#[wasm_bindgen_test]
fn test_form_shown_twice_keeps_one_panel() {
    let _fixture = Fixture::new(CONTRACT_FORM);
    let controller = controller();

    assert!(controller.form_shown("word-form").is_ok());
    assert!(controller.form_shown("word-form").is_ok());

    let panels = form().query_selector_all(".document-preview").unwrap();
    assert_eq!(panels.length(), 1);
}

#[wasm_bindgen_test]
fn test_one_input_runs_one_pass() {
    let _fixture = Fixture::new(CONTRACT_FORM);
    let controller = controller();
    assert!(controller.form_shown("word-form").is_ok());
    assert!(controller.form_shown("word-form").is_ok());

    let number: HtmlInputElement = form()
        .query_selector(r#"input[name="contract_number"]"#)
        .unwrap()
        .unwrap()
        .dyn_into()
        .unwrap();
    let before = passes(&controller);
    number.set_value("ДГ-2024-777");
    number.dispatch_event(&Event::new("input").unwrap()).unwrap();

    assert_eq!(passes(&controller), before + 1);
    assert_eq!(preview_html("preview-word-contract-number"), "ДГ-2024-777");
}

#[wasm_bindgen_test]
fn test_unknown_form_is_rejected() {
    let _fixture = Fixture::new(CONTRACT_FORM);
    let controller = controller();

    assert!(controller.form_shown("excel-form").is_err());
    assert!(controller.sync_form("excel-form").is_err());
}

#[wasm_bindgen_test]
fn test_register_editor_twice_subscribes_once() {
    let _fixture = Fixture::new(CONTRACT_FORM);
    let controller = controller();
    let first = fake_quill("<p>Первый</p>");
    let second = fake_quill("<p>Второй</p>");

    assert!(controller.register_editor("word-content-editor", first.clone()).is_ok());
    assert!(controller.register_editor("word-content-editor", first.clone()).is_ok());
    assert!(controller.register_editor("word-content-editor", second.clone()).is_ok());

    let registered = handlers(&first);
    assert_eq!(registered.length(), 1);
    let entry: Array = registered.get(0).unchecked_into();
    assert_eq!(entry.get(0).as_string().as_deref(), Some("text-change"));
    assert_eq!(handlers(&second).length(), 0);
    assert_eq!(
        controller.content_html("word-content-editor").as_deref(),
        Some("<p>Первый</p>")
    );
    assert_eq!(preview_html("preview-word-content"), "<p>Первый</p>");
}

#[wasm_bindgen_test]
fn test_text_change_resyncs_preview() {
    let _fixture = Fixture::new(CONTRACT_FORM);
    let controller = controller();
    let quill = fake_quill("<p>Черновик</p>");
    assert!(controller.register_editor("word-content-editor", quill.clone()).is_ok());

    set_editor_html(&quill, "<p><em>Итог</em></p>");
    let entry: Array = handlers(&quill).get(0).unchecked_into();
    let handler: Function = entry.get(1).unchecked_into();
    let before = passes(&controller);
    handler.call0(&JsValue::NULL).unwrap();

    assert_eq!(passes(&controller), before + 1);
    assert_eq!(preview_html("preview-word-content"), "<p><em>Итог</em></p>");

    set_editor_html(&quill, "<p><br></p>");
    handler.call0(&JsValue::NULL).unwrap();
    assert_eq!(
        preview_html("preview-word-content"),
        r#"<p class="preview-placeholder">Дополнительный текст документа...</p>"#
    );
}

#[wasm_bindgen_test]
fn test_submit_fills_html_field_once() {
    let _fixture = Fixture::new(CONTRACT_FORM);
    let controller = controller();
    assert!(controller.form_shown("word-form").is_ok());
    let quill = fake_quill("<p>Пункт 1</p>");
    assert!(controller.register_editor("word-content-editor", quill.clone()).is_ok());

    submit(&form());
    set_editor_html(&quill, "<p>Пункт 2</p>");
    submit(&form());

    let hidden = form()
        .query_selector_all(r#"input[type="hidden"][name="content_html"]"#)
        .unwrap();
    assert_eq!(hidden.length(), 1);
    let hidden: HtmlInputElement = hidden.item(0).unwrap().dyn_into().unwrap();
    assert_eq!(hidden.value(), "<p>Пункт 2</p>");
}

#[wasm_bindgen_test]
fn test_required_body_is_filled_before_validation() {
    let _fixture = Fixture::new(REQUIRED_BODY_FORM);
    let window = web_sys::window().unwrap();
    Reflect::set(&window, &"alert".into(), &Function::new_no_args("")).unwrap();
    let controller = controller();
    let quill = fake_quill("<p>Итог</p>");
    assert!(controller.register_editor("word-content-editor", quill).is_ok());

    let event = submit(&form());

    assert!(!event.default_prevented());
    let body: HtmlTextAreaElement = form()
        .query_selector(r#"textarea[name="content"]"#)
        .unwrap()
        .unwrap()
        .dyn_into()
        .unwrap();
    assert_eq!(body.value(), "Итог\n");
}

#[wasm_bindgen_test]
fn test_set_content_updates_editor_and_preview() {
    let _fixture = Fixture::new(CONTRACT_FORM);
    let controller = controller();
    let quill = fake_quill("<p>старое</p>");
    assert!(controller.register_editor("word-content-editor", quill).is_ok());

    assert!(controller.set_content("word-content-editor", "<p>новое</p>").is_ok());

    assert_eq!(
        controller.content_text("word-content-editor").as_deref(),
        Some("новое\n")
    );
    assert_eq!(preview_html("preview-word-content"), "<p>новое</p>");
    assert!(controller.set_content("pdf-content-editor", "<p>x</p>").is_err());
}
