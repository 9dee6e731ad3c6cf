use runner_core::overlay::{threshold_lines, visible_bones, visible_joints};
use runner_core::{DebugSnapshot, PoseFrame};
use wasm_bindgen::JsValue;
use web_sys as web;

const BONE_COLOR: &str = "lime";
const JOINT_COLOR: &str = "red";
const JOINT_RADIUS: f64 = 5.0;

pub fn clear(ctx: &web::CanvasRenderingContext2d, canvas: &web::HtmlCanvasElement) {
    ctx.clear_rect(0.0, 0.0, canvas.width() as f64, canvas.height() as f64);
}

#[allow(deprecated)]
pub fn skeleton(ctx: &web::CanvasRenderingContext2d, frame: &PoseFrame, min_confidence: f32) {
    ctx.set_stroke_style(&JsValue::from_str(BONE_COLOR));
    ctx.set_line_width(2.0);
    for (a, b) in visible_bones(frame, min_confidence) {
        ctx.begin_path();
        ctx.move_to(a.x as f64, a.y as f64);
        ctx.line_to(b.x as f64, b.y as f64);
        ctx.stroke();
    }
    ctx.set_fill_style(&JsValue::from_str(JOINT_COLOR));
    for p in visible_joints(frame, min_confidence) {
        ctx.begin_path();
        _ = ctx.arc(
            p.x as f64,
            p.y as f64,
            JOINT_RADIUS,
            0.0,
            std::f64::consts::TAU,
        );
        ctx.fill();
    }
}

/// Dashed jump / baseline / crouch lines across the full canvas width.
#[allow(deprecated)]
pub fn thresholds(
    ctx: &web::CanvasRenderingContext2d,
    canvas: &web::HtmlCanvasElement,
    snap: &DebugSnapshot,
) {
    let Some(bands) = snap.bands else { return };
    let width = canvas.width() as f64;
    let dash = js_sys::Array::of2(&JsValue::from_f64(6.0), &JsValue::from_f64(4.0));
    _ = ctx.set_line_dash(&dash);
    ctx.set_line_width(1.5);
    ctx.set_font("12px sans-serif");
    for line in threshold_lines(&bands) {
        let y = line.y as f64;
        ctx.set_stroke_style(&JsValue::from_str(line.color));
        ctx.begin_path();
        ctx.move_to(0.0, y);
        ctx.line_to(width, y);
        ctx.stroke();
        ctx.set_fill_style(&JsValue::from_str(line.color));
        _ = ctx.fill_text(line.label, 6.0, y - 4.0);
    }
    _ = ctx.set_line_dash(&js_sys::Array::new());
}
