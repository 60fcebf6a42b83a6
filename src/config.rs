use std::path::PathBuf;

/// Runtime configuration.
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | `CAFE_DATA_DIR` | unset | JSON data directory; in-memory stores when unset |
/// | `CAFE_MAILBOX_SIZE` | 100 | Order service mailbox capacity |
/// | `CAFE_LOG` | `info` | Log filter used when `RUST_LOG` is unset |
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub data_dir: Option<PathBuf>,
    pub mailbox_size: usize,
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: None,
            mailbox_size: 100,
            log_filter: "info".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            data_dir: lookup("CAFE_DATA_DIR")
                .filter(|d| !d.trim().is_empty())
                .map(PathBuf::from),
            mailbox_size: lookup("CAFE_MAILBOX_SIZE")
                .and_then(|s| s.parse().ok())
                .filter(|&n: &usize| n > 0)
                .unwrap_or(defaults.mailbox_size),
            log_filter: lookup("CAFE_LOG").unwrap_or(defaults.log_filter),
        }
    }
}
