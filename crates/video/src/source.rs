use crate::*;

/// A blocking frame producer.
///
/// Implementations are driven from one thread at a time; callers serialize
/// access (see the pipeline's camera guard) and never call `read` before a
/// successful `open`.
pub trait FrameSource: Send {
    /// Short human-readable name for logs.
    fn name(&self) -> &str;

    /// Open the device, returning the configuration that was actually applied.
    fn open(&mut self, config: &SourceConfig) -> Result<SourceConfig, VideoError>;

    /// Capture the next frame.
    fn read(&mut self) -> Result<RawFrame, VideoError>;

    /// Release the device, if open.
    fn close(&mut self);

    fn is_open(&self) -> bool;
}
