use runner_core::DebugSnapshot;
use web_sys as web;

const HELP_ID: &str = "help-overlay";
const DEBUG_ID: &str = "debug-panel";

#[inline]
pub fn show(document: &web::Document, id: &str) {
    if let Some(el) = document.get_element_by_id(id) {
        _ = el.class_list().remove_1("hidden");
        // fallback for environments without CSS class
        _ = el.set_attribute("style", "");
    }
}

#[inline]
pub fn hide(document: &web::Document, id: &str) {
    if let Some(el) = document.get_element_by_id(id) {
        _ = el.class_list().add_1("hidden");
        // fallback
        _ = el.set_attribute("style", "display:none");
    }
}

#[inline]
pub fn is_hidden(document: &web::Document, id: &str) -> bool {
    if let Some(el) = document.get_element_by_id(id) {
        if el.class_list().contains("hidden") {
            return true;
        }
        return el
            .get_attribute("style")
            .map(|s| s.contains("display:none"))
            .unwrap_or(false);
    }
    false
}

#[inline]
pub fn toggle(document: &web::Document, id: &str) {
    if is_hidden(document, id) {
        show(document, id);
    } else {
        hide(document, id);
    }
}

pub fn toggle_help(document: &web::Document) {
    toggle(document, HELP_ID);
}

pub fn toggle_debug(document: &web::Document) {
    toggle(document, DEBUG_ID);
}

pub fn debug_visible(document: &web::Document) -> bool {
    document.get_element_by_id(DEBUG_ID).is_some() && !is_hidden(document, DEBUG_ID)
}

/// Refresh the debug panel from the session snapshot.
pub fn update_debug(document: &web::Document, snap: &DebugSnapshot, estimate_ms: f32) {
    let Some(el) = document.get_element_by_id(DEBUG_ID) else {
        return;
    };
    let fmt_px = |v: Option<f32>| v.map_or_else(|| "-".to_string(), |v| format!("{v:.1}"));
    let bands = snap.bands.map_or_else(
        || "-".to_string(),
        |b| format!("jump&lt;{:.0} crouch&gt;{:.0}", b.jump_trigger, b.crouch_trigger),
    );
    let rows = [
        format!("Mode: {}", snap.mode.name()),
        format!("Baseline hip: {}", fmt_px(snap.baseline.map(|b| b.hip_y))),
        format!("Current hip: {}", fmt_px(snap.current.map(|c| c.hip_y))),
        format!("Hip velocity: {:.0} px/s", snap.velocity.hip_y_velocity),
        format!("Bands: {bands}"),
        format!("Calibration: {:.0}%", snap.calibration_progress * 100.0),
        format!(
            "Jumps: {} • Crouches: {}",
            snap.stats.jumps, snap.stats.crouches
        ),
        format!(
            "Hands up: {}",
            if snap.hold.is_gesturing { "holding" } else { "-" }
        ),
        format!("Pose estimate: {estimate_ms:.1} ms"),
    ];
    el.set_inner_html(&format!(
        "<div style='color: #cfe7ff; font: 12px monospace; background: rgba(10, 14, 24, 0.8); padding: 8px 12px; border-radius: 6px;'>{}</div>",
        rows.join("<br>")
    ));
}
