use {image::Image, std::time::SystemTime};

/// One captured frame, owned by the pipeline cycle that read it.
#[derive(Debug, Clone)]
pub struct RawFrame {
    pub image: Image,
    /// Source-local counter, starting at 1 after each `open`.
    pub sequence: u64,
    pub captured_at: SystemTime,
}

impl RawFrame {
    pub fn new(image: Image, sequence: u64) -> Self {
        Self {
            image,
            sequence,
            captured_at: SystemTime::now(),
        }
    }
}
