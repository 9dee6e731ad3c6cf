use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

fn js_err(e: JsValue) -> anyhow::Error {
    anyhow::anyhow!(format!("{:?}", e))
}

/// Attach the front-facing webcam to `video` and wait for its metadata so
/// the intrinsic size is known before the first estimate.
pub async fn attach_webcam(video: &web::HtmlVideoElement) -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let devices = window.navigator().media_devices().map_err(js_err)?;

    let video_opts = js_sys::Object::new();
    js_sys::Reflect::set(&video_opts, &"facingMode".into(), &"user".into()).map_err(js_err)?;
    let constraints = js_sys::Object::new();
    js_sys::Reflect::set(&constraints, &"video".into(), &video_opts).map_err(js_err)?;

    let request = devices
        .get_user_media_with_constraints(constraints.unchecked_ref())
        .map_err(js_err)?;
    let stream: web::MediaStream = JsFuture::from(request)
        .await
        .map_err(|e| anyhow::anyhow!("camera access denied: {:?}", e))?
        .dyn_into()
        .map_err(js_err)?;
    video.set_src_object(Some(&stream));

    let loaded = js_sys::Promise::new(&mut |resolve, _reject| {
        let on_loaded = Closure::once_into_js(move || {
            _ = resolve.call0(&JsValue::NULL);
        });
        video.set_onloadedmetadata(Some(on_loaded.unchecked_ref()));
    });
    JsFuture::from(loaded).await.map_err(js_err)?;
    video.set_onloadedmetadata(None);

    if let Ok(playing) = video.play() {
        _ = JsFuture::from(playing).await;
    }
    log::info!(
        "[camera] webcam {}x{}",
        video.video_width(),
        video.video_height()
    );
    Ok(())
}
