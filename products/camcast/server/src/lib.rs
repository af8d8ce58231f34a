//! Command-line handling shared by the camcast binaries.

use std::path::PathBuf;

pub const DEFAULT_ADDR: &str = "0.0.0.0:5000";
pub const DEFAULT_PROBE_ADDR: &str = "127.0.0.1:5000";

/// `camcast [ADDR] [LOG_DIR]`
#[derive(Debug, Clone, PartialEq)]
pub struct ServerArgs {
    pub addr: String,
    /// Log to daily files in this directory instead of stdout.
    pub log_dir: Option<PathBuf>,
}

impl ServerArgs {
    pub fn parse(args: impl IntoIterator<Item = String>) -> Self {
        let mut args = args.into_iter();
        Self {
            addr: args.next().unwrap_or_else(|| DEFAULT_ADDR.to_string()),
            log_dir: args.next().map(PathBuf::from),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> ServerArgs {
        ServerArgs::parse(args.iter().map(|s| s.to_string()))
    }

    #[test]
    fn test_defaults() {
        let args = parse(&[]);
        assert_eq!(args.addr, "0.0.0.0:5000");
        assert_eq!(args.log_dir, None);
    }

    #[test]
    fn test_addr_and_log_dir() {
        let args = parse(&["127.0.0.1:6000", "/var/log/camcast"]);
        assert_eq!(args.addr, "127.0.0.1:6000");
        assert_eq!(args.log_dir, Some(PathBuf::from("/var/log/camcast")));
    }
}
