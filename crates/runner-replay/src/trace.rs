//! JSON Lines trace format, one frame per line:
//!
//! ```text
//! {"t": 1033.3, "keypoints": [{"name": "left_hip", "x": 310.0, "y": 300.5, "score": 0.92}, ...]}
//! ```
//!
//! `t` is milliseconds on the capture clock. Blank lines are skipped.

use runner_core::{Keypoint, PoseFrame};
use serde::{Deserialize, Serialize};
use std::io::{BufRead, Write};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TraceError {
    #[error("line {line}: {source}")]
    Parse {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
    #[error("line {line}: unknown keypoint {name:?}")]
    UnknownKeypoint { line: usize, name: String },
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Encode(#[from] serde_json::Error),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TraceKeypoint {
    pub name: String,
    pub x: f32,
    pub y: f32,
    pub score: f32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TraceRecord {
    pub t: f64,
    pub keypoints: Vec<TraceKeypoint>,
}

impl TraceRecord {
    pub fn from_frame(t: f64, frame: &PoseFrame) -> Self {
        Self {
            t,
            keypoints: frame
                .iter()
                .map(|k| TraceKeypoint {
                    name: k.kind.name().to_string(),
                    x: k.position.x,
                    y: k.position.y,
                    score: k.score,
                })
                .collect(),
        }
    }

    /// Convert to a pose frame; `line` is only used for error messages.
    pub fn to_frame(&self, line: usize) -> Result<PoseFrame, TraceError> {
        let keypoints = self
            .keypoints
            .iter()
            .map(|k| {
                Keypoint::named(&k.name, k.x, k.y, k.score).ok_or_else(|| {
                    TraceError::UnknownKeypoint {
                        line,
                        name: k.name.clone(),
                    }
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(PoseFrame::new(keypoints))
    }
}

pub fn read_trace(reader: impl BufRead) -> Result<Vec<TraceRecord>, TraceError> {
    let mut records = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let record = serde_json::from_str(&line).map_err(|source| TraceError::Parse {
            line: i + 1,
            source,
        })?;
        records.push(record);
    }
    Ok(records)
}

pub fn write_trace(mut writer: impl Write, records: &[TraceRecord]) -> Result<(), TraceError> {
    for record in records {
        serde_json::to_writer(&mut writer, record)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    Ok(())
}
