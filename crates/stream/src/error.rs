use {std::fmt, std::time::Duration};

#[derive(Debug)]
pub enum StreamError {
    /// The camera lock was not free within the wait; the cycle is skipped.
    LockTimeout(Duration),
    /// A read did not return within the read timeout.
    ReadTimeout(Duration),
    /// An earlier timed-out read still holds the device.
    Stalled(Duration),
    Read(video::VideoError),
    Encode(image::ImageError),
    /// A blocking task panicked or was cancelled.
    Task(String),
}

impl fmt::Display for StreamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreamError::LockTimeout(wait) => write!(f, "camera busy for {wait:?}"),
            StreamError::ReadTimeout(wait) => write!(f, "read timed out after {wait:?}"),
            StreamError::Stalled(wait) => {
                write!(f, "device stuck in an earlier read, lock busy for {wait:?}")
            }
            StreamError::Read(err) => write!(f, "read failed: {err}"),
            StreamError::Encode(err) => write!(f, "encode failed: {err}"),
            StreamError::Task(msg) => write!(f, "blocking task failed: {msg}"),
        }
    }
}

impl std::error::Error for StreamError {}

impl From<video::VideoError> for StreamError {
    fn from(err: video::VideoError) -> Self {
        StreamError::Read(err)
    }
}

impl From<image::ImageError> for StreamError {
    fn from(err: image::ImageError) -> Self {
        StreamError::Encode(err)
    }
}

impl From<tokio::task::JoinError> for StreamError {
    fn from(err: tokio::task::JoinError) -> Self {
        StreamError::Task(err.to_string())
    }
}
