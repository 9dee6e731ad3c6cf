use instant::Instant;
use runner_core::{ActionSink, Status, StatusSink, STATUS_FADE_MS};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

fn window_fn(name: &str) -> Option<js_sys::Function> {
    let window = web::window()?;
    js_sys::Reflect::get(&window, &JsValue::from_str(name))
        .ok()
        .and_then(|v| v.dyn_into::<js_sys::Function>().ok())
}

/// Forwards actions to the game's global `jump`, `crouch` and
/// `executeGestureAction("restart")` functions. Missing functions are
/// reported once and then skipped.
#[derive(Clone)]
pub struct JsActionSink {
    jump: Option<js_sys::Function>,
    crouch: Option<js_sys::Function>,
    gesture_action: Option<js_sys::Function>,
}

impl JsActionSink {
    pub fn from_window() -> Self {
        let lookup = |name: &str| {
            let f = window_fn(name);
            if f.is_none() {
                log::warn!("[game] window.{} is not a function; calls dropped", name);
            }
            f
        };
        Self {
            jump: lookup("jump"),
            crouch: lookup("crouch"),
            gesture_action: lookup("executeGestureAction"),
        }
    }

    fn call(f: &Option<js_sys::Function>, args: &[JsValue]) {
        let Some(f) = f else { return };
        let res = match args {
            [] => f.call0(&JsValue::NULL),
            [a] => f.call1(&JsValue::NULL, a),
            _ => return,
        };
        if let Err(e) = res {
            log::warn!("[game] {} threw: {:?}", String::from(f.name()), e);
        }
    }
}

impl ActionSink for JsActionSink {
    fn on_jump(&mut self) {
        Self::call(&self.jump, &[]);
    }

    fn on_crouch(&mut self, active: bool) {
        Self::call(&self.crouch, &[JsValue::from_bool(active)]);
    }

    fn on_restart(&mut self) {
        Self::call(&self.gesture_action, &[JsValue::from_str("restart")]);
    }
}

/// The `#message` element and its fade deadline.
pub struct StatusLine {
    element: Option<web::Element>,
    clear_at: Option<Instant>,
}

impl StatusLine {
    pub fn new(document: &web::Document) -> Self {
        let element = document.get_element_by_id("message");
        if element.is_none() {
            log::warn!("[dom] no #message element; status text hidden");
        }
        Self {
            element,
            clear_at: None,
        }
    }

    pub fn set(&mut self, status: &Status) {
        let Some(el) = &self.element else { return };
        el.set_text_content(Some(&status.text()));
        _ = el.set_attribute("style", &format!("color: {}", status.color()));
        self.clear_at = (!status.persists() && !status.text().is_empty())
            .then(|| Instant::now() + std::time::Duration::from_millis(STATUS_FADE_MS as u64));
    }

    /// Clear a transient message once its fade deadline passes.
    pub fn expire(&mut self) {
        let Some(at) = self.clear_at else { return };
        if Instant::now() >= at {
            if let Some(el) = &self.element {
                el.set_text_content(None);
            }
            self.clear_at = None;
        }
    }
}

#[derive(Clone)]
pub struct DomStatusSink {
    line: Rc<RefCell<StatusLine>>,
}

impl DomStatusSink {
    pub fn new(line: Rc<RefCell<StatusLine>>) -> Self {
        Self { line }
    }
}

impl StatusSink for DomStatusSink {
    fn show(&mut self, status: &Status) {
        self.line.borrow_mut().set(status);
    }
}
