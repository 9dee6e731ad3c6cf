//! Gesture core for a pose-controlled runner.
//!
//! Turns per-frame body keypoints into debounced game commands: jump, crouch
//! start/end and a hands-up restart. Platform free; the web and replay
//! front-ends feed frames in and forward [`ActionEvent`]s to the game.

pub mod calibration;
pub mod config;
pub mod constants;
pub mod gesture;
pub mod hands_up;
pub mod keypoint;
pub mod overlay;
pub mod session;
pub mod signal;

pub use calibration::*;
pub use config::*;
pub use constants::*;
pub use gesture::*;
pub use hands_up::*;
pub use keypoint::*;
pub use session::*;
pub use signal::*;
