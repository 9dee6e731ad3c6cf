use crate::dom;
use crate::keys::{command_for_keydown, KeyCommand};
use crate::overlay;
use instant::Instant;
use runner_core::Session;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Milliseconds on the session clock, measured from `origin`.
#[inline]
pub fn clock_ms(origin: Instant) -> f64 {
    origin.elapsed().as_secs_f64() * 1000.0
}

/// Restart the round and start it, as the Start button does.
fn start_round(session: &Rc<RefCell<Session>>, origin: Instant) {
    let mut s = session.borrow_mut();
    s.restart();
    s.start(clock_ms(origin));
}

fn run_command(
    cmd: KeyCommand,
    session: &Rc<RefCell<Session>>,
    document: &web::Document,
    origin: Instant,
) {
    match cmd {
        KeyCommand::Start => start_round(session, origin),
        KeyCommand::Calibrate => session.borrow_mut().calibrate_now(),
        KeyCommand::Restart => session.borrow_mut().restart(),
        KeyCommand::ToggleHelp => overlay::toggle_help(document),
        KeyCommand::ToggleDebug => overlay::toggle_debug(document),
    }
    log::debug!("[keys] {:?}", cmd);
}

/// Operator shortcuts. Game controls stay with the game page's own handlers.
pub fn wire_keyboard(document: &web::Document, session: Rc<RefCell<Session>>, origin: Instant) {
    let doc = document.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
        // auto-repeat must not re-fire commands or toggles
        if ev.repeat() {
            return;
        }
        if let Some(cmd) = command_for_keydown(&ev.code()) {
            run_command(cmd, &session, &doc, origin);
        }
    }) as Box<dyn FnMut(_)>);
    _ = document.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
    closure.forget();
}

pub fn wire_buttons(document: &web::Document, session: Rc<RefCell<Session>>, origin: Instant) {
    {
        let session = session.clone();
        dom::add_click_listener(document, "startButton", move || {
            start_round(&session, origin);
        });
    }
    {
        let session = session.clone();
        dom::add_click_listener(document, "calibrateButton", move || {
            session.borrow_mut().calibrate_now();
        });
    }
    dom::add_click_listener(document, "restartButton", move || {
        session.borrow_mut().restart();
    });
}
