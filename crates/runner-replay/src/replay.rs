use crate::trace::TraceRecord;
use anyhow::Context;
use runner_core::{
    ActionEvent, ActionSink, GestureConfig, Session, Status, StatusSink, ThresholdConfig,
};
use serde::Serialize;

/// Logs game commands instead of driving a game.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogActionSink;

impl ActionSink for LogActionSink {
    fn on_jump(&mut self) {
        log::info!("[game] jump");
    }

    fn on_crouch(&mut self, active: bool) {
        log::info!("[game] crouch({})", active);
    }

    fn on_restart(&mut self) {
        log::info!("[game] restart");
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct LogStatusSink;

impl StatusSink for LogStatusSink {
    fn show(&mut self, status: &Status) {
        let text = status.text();
        if !text.is_empty() {
            log::debug!("[status] {}", text);
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ReplayEvent {
    pub t: f64,
    pub action: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scored: Option<bool>,
    #[serde(skip)]
    pub event: ActionEvent,
}

impl ReplayEvent {
    fn new(t: f64, event: ActionEvent) -> Self {
        let scored = match event {
            ActionEvent::CrouchEnd { scored } => Some(scored),
            _ => None,
        };
        Self {
            t,
            action: event.name(),
            scored,
            event,
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct ReplayReport {
    pub frames: usize,
    pub events: Vec<ReplayEvent>,
    pub jumps: u32,
    pub crouches: u32,
    pub final_mode: &'static str,
    pub baseline_hip_y: Option<f32>,
}

/// Calibrate on the opening frames of `records`, then classify the rest.
pub fn replay(
    records: &[TraceRecord],
    config: GestureConfig,
    thresholds: ThresholdConfig,
) -> anyhow::Result<ReplayReport> {
    thresholds.validate().context("invalid thresholds")?;
    let mut session = Session::new(config)
        .context("invalid gesture config")?
        .with_action_sink(LogActionSink)
        .with_status_sink(LogStatusSink);
    session.calibrate_now();

    let mut events = Vec::new();
    let mut out = Vec::new();
    for (i, record) in records.iter().enumerate() {
        let frame = record.to_frame(i + 1)?;
        out.clear();
        session.tick(&frame, record.t, &thresholds, &mut out);
        events.extend(out.iter().map(|&ev| ReplayEvent::new(record.t, ev)));
    }

    let stats = session.stats();
    log::info!(
        "[replay] {} frames, {} jumps, {} crouches",
        records.len(),
        stats.jumps,
        stats.crouches
    );
    Ok(ReplayReport {
        frames: records.len(),
        events,
        jumps: stats.jumps,
        crouches: stats.crouches,
        final_mode: session.mode().name(),
        baseline_hip_y: session.baseline().map(|b| b.hip_y),
    })
}
