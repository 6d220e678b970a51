/// Name used for the binary, the config file stem and the env prefix.
pub const APP_NAME: &str = "vformat";

/// Optional TOML configuration file read from the working directory.
pub const CONFIG_FILE: &str = const_str::concat!(APP_NAME, ".toml");

/// Deepest BEGIN/END nesting the structure builder will open.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Upper bound for a configured nesting depth. Decoding and normalization
/// recurse once per level.
pub const MAX_DEPTH_LIMIT: usize = 256;

pub const DEFAULT_LOG_LEVEL: &str = "info";
