//! Logger setup
//!
//! `RUST_LOG` is honored, defaulting to `warn`. `--verbose` raises the
//! global level to `debug`.

use log::LevelFilter;

/// Build the env_logger configuration for the binary
pub fn logger_builder(verbose: bool) -> env_logger::Builder {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    builder.format_timestamp(None);

    if verbose {
        builder.filter_level(LevelFilter::Debug);
    }

    builder
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::{Level, Log, Metadata};

    fn debug_enabled(logger: &env_logger::Logger) -> bool {
        let metadata = Metadata::builder()
            .level(Level::Debug)
            .target("slodash::config::file")
            .build();
        logger.enabled(&metadata)
    }

    #[test]
    fn test_verbose_enables_debug() {
        let logger = logger_builder(true).build();
        assert!(logger.filter() >= LevelFilter::Debug);
        assert!(debug_enabled(&logger));
    }

    #[test]
    fn test_default_level_is_warn() {
        if std::env::var_os("RUST_LOG").is_some() {
            return;
        }
        let logger = logger_builder(false).build();
        assert_eq!(logger.filter(), LevelFilter::Warn);
        assert!(!debug_enabled(&logger));
    }
}
