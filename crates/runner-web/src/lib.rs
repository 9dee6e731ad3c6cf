#![cfg(target_arch = "wasm32")]
use instant::Instant;
use runner_core::Session;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod camera;
mod dom;
mod draw;
mod events;
mod frame;
mod keys;
mod overlay;
mod pose;
mod sink;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("runner-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

fn element<T: JsCast>(document: &web::Document, id: &str) -> anyhow::Result<T> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", id))?
        .dyn_into::<T>()
        .map_err(|e| anyhow::anyhow!(format!("#{id}: {:?}", e)))
}

async fn init() -> anyhow::Result<()> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    let video: web::HtmlVideoElement = element(&document, "video")?;
    let canvas: web::HtmlCanvasElement = element(&document, "canvas")?;
    let ctx = canvas
        .get_context("2d")
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?
        .ok_or_else(|| anyhow::anyhow!("2d context unavailable"))?
        .dyn_into::<web::CanvasRenderingContext2d>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    camera::attach_webcam(&video).await?;
    dom::sync_canvas_to_video(&canvas, &video);

    let actions = sink::JsActionSink::from_window();
    let status = Rc::new(RefCell::new(sink::StatusLine::new(&document)));
    let session = Rc::new(RefCell::new(
        Session::default()
            .with_action_sink(actions)
            .with_status_sink(sink::DomStatusSink::new(status.clone())),
    ));
    let origin = Instant::now();

    events::wire_keyboard(&document, session.clone(), origin);
    events::wire_buttons(&document, session.clone(), origin);

    // Calibrate straight away so a player in frame can play without pressing Start.
    session.borrow_mut().calibrate_now();

    let frame_ctx = frame::FrameContext::new(session, status, document, video, canvas, ctx, origin);
    frame::start_loop(Rc::new(RefCell::new(frame_ctx)));
    log::info!("[pose] frame loop running");
    Ok(())
}
