use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

#[inline]
pub fn add_click_listener(
    document: &web::Document,
    element_id: &str,
    mut handler: impl FnMut() + 'static,
) {
    if let Some(el) = document.get_element_by_id(element_id) {
        let closure =
            wasm_bindgen::closure::Closure::wrap(Box::new(move || handler()) as Box<dyn FnMut()>);
        _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    } else {
        log::warn!("[dom] no #{} to wire", element_id);
    }
}

#[inline]
pub fn input(document: &web::Document, element_id: &str) -> Option<web::HtmlInputElement> {
    document
        .get_element_by_id(element_id)
        .and_then(|el| el.dyn_into::<web::HtmlInputElement>().ok())
}

/// Current value of an `<input>`, empty when the element is missing.
#[inline]
pub fn input_value(document: &web::Document, element_id: &str) -> String {
    input(document, element_id)
        .map(|el| el.value())
        .unwrap_or_default()
}

pub fn set_inputs_disabled(document: &web::Document, element_ids: &[&str], disabled: bool) {
    for id in element_ids {
        if let Some(el) = input(document, id) {
            el.set_disabled(disabled);
        }
    }
}

/// Match the overlay canvas backing store to the video's intrinsic size so
/// keypoint pixels map 1:1.
pub fn sync_canvas_to_video(canvas: &web::HtmlCanvasElement, video: &web::HtmlVideoElement) {
    let (w, h) = (video.video_width(), video.video_height());
    if w == 0 || h == 0 {
        return;
    }
    if canvas.width() != w || canvas.height() != h {
        canvas.set_width(w);
        canvas.set_height(h);
        log::info!("[dom] canvas resized to {}x{}", w, h);
    }
}
