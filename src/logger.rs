use crate::constants::{DEFAULT_LOG_LEVEL, LOG_LEVEL_ENV};

/// Initialises `env_logger` on stderr.
///
/// The filter is read from `TEMPL_LOG_LEVEL` (default `warn`); `verbose`
/// raises it to `debug` regardless of the environment.
pub fn init_logger(verbose: bool) {
    let env = env_logger::Env::new().filter_or(LOG_LEVEL_ENV, DEFAULT_LOG_LEVEL);
    let mut builder = env_logger::Builder::from_env(env);
    if verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.init();
}
