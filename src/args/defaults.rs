pub(crate) const DEFAULT_USER_AGENT: &str = concat!("loadpace/", env!("CARGO_PKG_VERSION"));

/// Config files picked up from the working directory when `--config` is absent.
pub(crate) const DEFAULT_CONFIG_FILES: [&str; 2] = ["loadpace.toml", "loadpace.json"];

pub(crate) const DEFAULT_NUM_REQUESTS: &str = "10";
pub(crate) const DEFAULT_QPS: &str = "1.0";
pub(crate) const DEFAULT_TIMEOUT: &str = "10s";
pub(crate) const DEFAULT_CONNECT_TIMEOUT: &str = "5s";
