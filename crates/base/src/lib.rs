mod clock;
pub use clock::*;

pub mod logging;
pub use logging::{FileLogger, StdoutLogger, init_file_logger, init_stdout_logger};

mod vec2;
pub use vec2::*;

// re-export so downstream crates can `use base::log`
pub use log;
