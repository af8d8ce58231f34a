//! Frame sources for the camcast pipeline.
//!
//! A `FrameSource` is a blocking device: `open` negotiates parameters,
//! `read` produces one `RawFrame`, `close` releases the device. Callers run
//! these on a blocking thread. `probe` picks the real camera when it works
//! and the synthetic generator otherwise.

pub mod config;
pub use config::SourceConfig;

pub mod error;
pub use error::VideoError;

mod videoframe;
pub use videoframe::RawFrame;

mod source;
pub use source::FrameSource;

pub mod synthetic;
pub use synthetic::SyntheticSource;

#[cfg(feature = "v4l2")]
pub mod v4l2;
#[cfg(feature = "v4l2")]
pub use v4l2::V4l2Source;

mod probe;
pub use probe::{Probed, SourceKind, probe, probe_with};
