use crate::events::clock_ms;
use crate::sink::StatusLine;
use crate::{dom, draw, overlay, pose};
use instant::Instant;
use runner_core::{ActionEvent, PoseFrame, Session, SessionMode, ThresholdConfig};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

pub const THRESHOLD_INPUTS: [&str; 3] = ["baselineAdjust", "jumpThreshold", "crouchThreshold"];

pub struct FrameContext {
    pub session: Rc<RefCell<Session>>,
    pub status: Rc<RefCell<StatusLine>>,
    pub document: web::Document,
    pub video: web::HtmlVideoElement,
    pub canvas: web::HtmlCanvasElement,
    pub ctx: web::CanvasRenderingContext2d,
    pub origin: Instant,
    pub last_estimate_ms: f32,
    sliders_locked: Option<bool>,
    events: Vec<ActionEvent>,
}

impl FrameContext {
    pub fn new(
        session: Rc<RefCell<Session>>,
        status: Rc<RefCell<StatusLine>>,
        document: web::Document,
        video: web::HtmlVideoElement,
        canvas: web::HtmlCanvasElement,
        ctx: web::CanvasRenderingContext2d,
        origin: Instant,
    ) -> Self {
        Self {
            session,
            status,
            document,
            video,
            canvas,
            ctx,
            origin,
            last_estimate_ms: 0.0,
            sliders_locked: None,
            events: Vec::new(),
        }
    }

    fn thresholds(&self) -> ThresholdConfig {
        let [adjust, jump, crouch] = THRESHOLD_INPUTS.map(|id| dom::input_value(&self.document, id));
        ThresholdConfig::from_inputs(&adjust, &jump, &crouch)
    }

    /// Feed one estimated pose through the session and repaint the overlay.
    pub fn process(&mut self, pose: Option<PoseFrame>) {
        let now = clock_ms(self.origin);
        dom::sync_canvas_to_video(&self.canvas, &self.video);
        draw::clear(&self.ctx, &self.canvas);
        if let Some(frame) = pose {
            let thresholds = self.thresholds();
            self.events.clear();
            let snap = {
                let mut session = self.session.borrow_mut();
                session.tick(&frame, now, &thresholds, &mut self.events);
                session.snapshot()
            };
            if !self.events.is_empty() {
                log::debug!("[pose] {} action(s) this frame", self.events.len());
            }
            let min = self.session.borrow().config().min_confidence;
            draw::skeleton(&self.ctx, &frame, min);
            draw::thresholds(&self.ctx, &self.canvas, &snap);
        } else {
            self.session.borrow_mut().advance_clock(now);
        }
        self.after_tick();
    }

    /// Idle frames skip estimation and only keep the clock and UI current.
    pub fn idle(&mut self) {
        let now = clock_ms(self.origin);
        self.session.borrow_mut().advance_clock(now);
        self.after_tick();
    }

    fn after_tick(&mut self) {
        let (locked, snap) = {
            let session = self.session.borrow();
            (session.thresholds_locked(), session.snapshot())
        };
        if self.sliders_locked != Some(locked) {
            dom::set_inputs_disabled(&self.document, &THRESHOLD_INPUTS, locked);
            self.sliders_locked = Some(locked);
        }
        self.status.borrow_mut().expire();
        if overlay::debug_visible(&self.document) {
            overlay::update_debug(&self.document, &snap, self.last_estimate_ms);
        }
    }

    fn wants_estimate(&self) -> bool {
        self.session.borrow().mode() != SessionMode::Idle
            && self.video.ready_state() >= 2
            && self.video.video_width() > 0
    }
}

async fn run_frame(frame_ctx: &Rc<RefCell<FrameContext>>) {
    if !frame_ctx.borrow().wants_estimate() {
        frame_ctx.borrow_mut().idle();
        return;
    }
    // No RefCell borrow may be held across this await.
    let video = frame_ctx.borrow().video.clone();
    let t0 = Instant::now();
    let pose = match pose::estimate(&video).await {
        Ok(pose) => pose,
        Err(e) => {
            log::warn!("[pose] {:#}", e);
            None
        }
    };
    let mut ctx = frame_ctx.borrow_mut();
    ctx.last_estimate_ms = t0.elapsed().as_secs_f32() * 1000.0;
    ctx.process(pose);
}

/// Drive the session from `requestAnimationFrame`. The next frame is only
/// requested after the current estimation resolves, so estimates never overlap.
pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        let frame_ctx = frame_ctx.clone();
        let tick = tick_clone.clone();
        spawn_local(async move {
            run_frame(&frame_ctx).await;
            request_frame(&tick);
        });
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    let Some(w) = web::window() else { return };
    if let Some(cb) = tick.borrow().as_ref() {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
