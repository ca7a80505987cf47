//! Common constants used throughout templ.

/// Environment variable overriding the template root directory.
pub const TEMPL_DIR_ENV: &str = "TEMPL_DIR";

/// Environment variable holding the log level filter.
pub const LOG_LEVEL_ENV: &str = "TEMPL_LOG_LEVEL";

/// Log level used when `TEMPL_LOG_LEVEL` is unset.
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Default template root, relative to the user's home directory.
pub const DEFAULT_TEMPL_SUBDIR: &str = ".config/templ";

/// Directory under the template root that holds local clones.
pub const LOCAL_REPOSITORIES_DIR: &str = "local";

/// Name of the directory marking a git working tree.
pub const GIT_DIR: &str = ".git";

/// Remote pulled from during updates.
pub const DEFAULT_REMOTE: &str = "origin";
