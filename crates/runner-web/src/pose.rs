//! Bridge to the page's pose estimator.
//!
//! The page exposes `runnerPose.estimate(video)`, resolving to a flat
//! `Float32Array` of 17 COCO keypoints as `[x, y, score]` triples in video
//! pixels, or `null` when no person was found.

use runner_core::PoseFrame;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys as web;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(catch, js_namespace = runnerPose, js_name = estimate)]
    async fn estimate_pose(video: &web::HtmlVideoElement) -> Result<JsValue, JsValue>;
}

/// Run one estimation. `Ok(None)` means nobody was detected this frame.
pub async fn estimate(video: &web::HtmlVideoElement) -> anyhow::Result<Option<PoseFrame>> {
    let value = estimate_pose(video)
        .await
        .map_err(|e| anyhow::anyhow!("pose estimator failed: {:?}", e))?;
    if value.is_null() || value.is_undefined() {
        return Ok(None);
    }
    let flat = value
        .dyn_into::<js_sys::Float32Array>()
        .map_err(|v| anyhow::anyhow!("estimator returned {:?}, not a Float32Array", v))?
        .to_vec();
    if flat.is_empty() {
        return Ok(None);
    }
    Ok(Some(PoseFrame::from_flat(&flat)?))
}
