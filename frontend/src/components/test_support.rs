use std::time::Duration;

use gloo::timers::future::sleep;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, EventInit, HtmlElement, HtmlSelectElement};

/// Fresh element attached to the document body to render into
pub fn mount() -> Element {
    let document = gloo::utils::document();
    let root = document.create_element("div").unwrap();
    gloo::utils::body().append_child(&root).unwrap();
    root
}

/// Let yew run its scheduled renders
pub async fn settle() {
    sleep(Duration::from_millis(20)).await;
}

pub fn query<T: JsCast>(root: &Element, selector: &str) -> T {
    root.query_selector(selector)
        .unwrap()
        .unwrap_or_else(|| panic!("no element matches {}", selector))
        .dyn_into::<T>()
        .unwrap()
}

pub fn click(root: &Element, selector: &str) {
    query::<HtmlElement>(root, selector).click();
}

pub fn change_select(root: &Element, selector: &str, value: &str) {
    let select = query::<HtmlSelectElement>(root, selector);
    select.set_value(value);

    let init = EventInit::new();
    init.set_bubbles(true);
    let event = Event::new_with_event_init_dict("change", &init).unwrap();
    select.dispatch_event(&event).unwrap();
}
