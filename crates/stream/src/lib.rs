//! The acquisition and broadcast pipeline.
//!
//! `StreamSupervisor` owns the single capture loop: it reads through the
//! `CameraGuard`, recovers from read failures with `RecoveryPolicy`, encodes
//! with `FrameEncoder` and fans frames out with `Broadcaster` to a snapshot of
//! the `SessionRegistry`. `Control` turns transport events into calls on the
//! registry and supervisor.

pub mod config;
pub use config::StreamConfig;

pub mod error;
pub use error::StreamError;

mod guard;
pub use guard::CameraGuard;

mod recovery;
pub use recovery::{RecoveryAction, RecoveryPolicy, RecoveryState};

mod encoder;
pub use encoder::{EncodedFrame, FrameEncoder, OVERLAY_COLOR, frame_overlays};

mod broadcaster;
pub use broadcaster::Broadcaster;

mod stats;
pub use stats::{PipelineStats, StatsSnapshot};

mod registry;
pub use registry::SessionRegistry;

mod supervisor;
pub use supervisor::{StartOutcome, StopOutcome, StreamState, StreamSupervisor, SupervisorStatus};

mod control;
pub use control::Control;
